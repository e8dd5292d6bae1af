//! Command-line argument parsing for the viewer
//!
//! Supports:
//! - Opening one file as binary data
//! - Choosing the code font, its size and the theme
//! - An explicit config file instead of the user config
//! - Read-only mode and a starting offset

use clap::Parser;
use std::path::PathBuf;

/// Hex viewer and editor for binary files
#[derive(Parser, Debug)]
#[command(name = "codearea-view", version, about = "Hex viewer and editor for binary files")]
pub struct CliArgs {
    /// File to open
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Monospaced TrueType/OpenType font for the code grid
    #[arg(long, value_name = "TTF")]
    pub font: PathBuf,

    /// Font size in logical pixels (overrides the config)
    #[arg(long, value_name = "PX")]
    pub font_size: Option<f32>,

    /// Theme id, e.g. "light" or "dark" (overrides the config)
    #[arg(long, value_name = "ID")]
    pub theme: Option<String>,

    /// Read settings from this file instead of the user config
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Open without allowing edits
    #[arg(short = 'r', long)]
    pub read_only: bool,

    /// Place the caret at this byte offset (decimal or 0x-prefixed hex)
    #[arg(long, value_name = "OFFSET", value_parser = parse_offset)]
    pub offset: Option<u64>,
}

/// Startup settings derived from CLI arguments
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    pub file: PathBuf,
    pub font: PathBuf,
    pub font_size: Option<f32>,
    pub theme: Option<String>,
    pub config_path: Option<PathBuf>,
    pub read_only: bool,
    pub initial_offset: u64,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        if self.file.is_dir() {
            return Err(format!("{} is a directory", self.file.display()));
        }
        if let Some(size) = self.font_size {
            if !(size.is_finite() && size > 0.0) {
                return Err(format!("Invalid font size {}", size));
            }
        }

        Ok(StartupConfig {
            file: self.file,
            font: self.font,
            font_size: self.font_size,
            theme: self.theme,
            config_path: self.config,
            read_only: self.read_only,
            initial_offset: self.offset.unwrap_or(0),
        })
    }
}

/// Parses `1234` or `0x4D2`
fn parse_offset(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("Invalid offset '{}': {}", s, e))
}
