use anyhow::{Context, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use codearea::cli::CliArgs;
use codearea::config::CodeAreaConfig;
use codearea::model::{CaretPosition, CodeArea, EditationMode, Section};
use codearea::theme::{self, Theme};
use codearea::view::frame::CodeFont;

mod runtime;

use runtime::{App, FontSource};

fn main() -> Result<()> {
    let _guard = codearea::tracing::init();

    let args = CliArgs::parse();
    let startup = args.into_config().map_err(anyhow::Error::msg)?;

    let config = match &startup.config_path {
        Some(path) => CodeAreaConfig::load_from(path).map_err(anyhow::Error::msg)?,
        None => CodeAreaConfig::load(),
    };

    let bytes = std::fs::read(&startup.file)
        .with_context(|| format!("Failed to read {}", startup.file.display()))?;
    tracing::info!("Opened {} ({} bytes)", startup.file.display(), bytes.len());

    let font_data = std::fs::read(&startup.font)
        .with_context(|| format!("Failed to read font {}", startup.font.display()))?;
    let font_size = startup.font_size.unwrap_or(config.font_size);
    // fail before a window exists when the font cannot be parsed
    CodeFont::from_bytes(&font_data, font_size)
        .with_context(|| format!("Invalid font {}", startup.font.display()))?;

    let theme_id = startup.theme.as_deref().unwrap_or(&config.theme);
    let theme = theme::load_theme(theme_id).unwrap_or_else(|e| {
        tracing::warn!("Failed to load theme '{}': {}, using default", theme_id, e);
        Theme::default()
    });

    let mut area = CodeArea::with_bytes(bytes);
    if let Err(e) = config.apply(&mut area) {
        tracing::warn!("Config partially applied: {}", e);
    }
    if startup.read_only {
        area.set_editation_mode(EditationMode::ReadOnly);
    }
    let offset = startup.initial_offset.min(area.data_size());
    area.set_caret_position(CaretPosition::at(offset, Section::CodeMatrix));

    let font = FontSource {
        data: font_data,
        size: font_size,
    };
    let event_loop = EventLoop::new()?;
    let mut app = App::new(area, theme, font, &startup.file);

    event_loop.run_app(&mut app)?;

    Ok(())
}
