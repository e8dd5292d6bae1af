//! Code area configuration persistence
//!
//! Stores user preferences in `~/.config/codearea/config.yaml`. Every field
//! has a default, so a partial file only overrides what it names.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::code_type::{CodeCharactersCase, CodeType, PositionCodeType};
use crate::error::CodeAreaError;
use crate::layout::{Grouping, RowNumberLength, RowWrapping, ScrollBarVisibility};
use crate::model::{
    BackgroundPaintMode, CodeArea, CursorRenderingMode, EditationMode, ViewMode,
    DEFAULT_BLINK_INTERVAL, DEFAULT_BYTES_PER_ROW,
};
use crate::scroll::{HorizontalScrollUnit, ScrollUnits, VerticalScrollUnit};

/// Code area configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeAreaConfig {
    pub code_type: CodeType,
    pub view_mode: ViewMode,
    pub code_characters_case: CodeCharactersCase,
    pub position_code_type: PositionCodeType,
    /// Charset name, e.g. "UTF-8" or "ISO-8859-1"
    pub charset: String,
    pub editation_mode: EditationMode,
    pub row_wrapping: RowWrapping,
    pub bytes_per_row: usize,
    /// Upper bound for wrapped rows, 0 = unlimited
    pub max_bytes_per_row: usize,
    pub wrapping_bytes_group_size: usize,
    pub byte_group_size: usize,
    pub space_group_size: usize,
    /// Row number digits, 0 = enough for the data size
    pub row_position_length: usize,
    pub show_header: bool,
    pub show_shadow_cursor: bool,
    pub show_non_ascii: bool,
    pub background_mode: BackgroundPaintMode,
    pub vertical_scrollbar: ScrollBarVisibility,
    pub horizontal_scrollbar: ScrollBarVisibility,
    pub vertical_scroll_unit: VerticalScrollUnit,
    pub horizontal_scroll_unit: HorizontalScrollUnit,
    pub cursor_blink_ms: u64,
    pub cursor_rendering_mode: CursorRenderingMode,
    pub font_size: f32,
    /// Theme id, see [`crate::theme::load_theme`]
    pub theme: String,
}

impl Default for CodeAreaConfig {
    fn default() -> Self {
        let grouping = Grouping::default();
        Self {
            code_type: CodeType::default(),
            view_mode: ViewMode::default(),
            code_characters_case: CodeCharactersCase::default(),
            position_code_type: PositionCodeType::default(),
            charset: "UTF-8".to_string(),
            editation_mode: EditationMode::default(),
            row_wrapping: RowWrapping::default(),
            bytes_per_row: DEFAULT_BYTES_PER_ROW,
            max_bytes_per_row: 0,
            wrapping_bytes_group_size: 1,
            byte_group_size: grouping.byte_group_size,
            space_group_size: grouping.space_group_size,
            row_position_length: 0,
            show_header: true,
            show_shadow_cursor: true,
            show_non_ascii: false,
            background_mode: BackgroundPaintMode::default(),
            vertical_scrollbar: ScrollBarVisibility::default(),
            horizontal_scrollbar: ScrollBarVisibility::default(),
            vertical_scroll_unit: VerticalScrollUnit::default(),
            horizontal_scroll_unit: HorizontalScrollUnit::default(),
            cursor_blink_ms: DEFAULT_BLINK_INTERVAL.as_millis() as u64,
            cursor_rendering_mode: CursorRenderingMode::default(),
            font_size: 14.0,
            theme: "light".to_string(),
        }
    }
}

impl CodeAreaConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        let config = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        crate::config_paths::ensure_parent_dir(path)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn grouping(&self) -> Grouping {
        Grouping::new(self.byte_group_size, self.space_group_size)
    }

    pub fn scroll_units(&self) -> ScrollUnits {
        ScrollUnits {
            vertical: self.vertical_scroll_unit,
            horizontal: self.horizontal_scroll_unit,
        }
    }

    /// Push every setting into `area` through its validated setters.
    ///
    /// A rejected value is logged and skipped; the remaining settings are
    /// still applied and the first rejection is returned.
    pub fn apply(&self, area: &mut CodeArea) -> crate::error::Result<()> {
        let mut first_error: Option<CodeAreaError> = None;
        let mut check = |field: &str, result: crate::error::Result<()>| {
            if let Err(e) = result {
                tracing::warn!("Ignoring config value '{}': {}", field, e);
                first_error.get_or_insert(e);
            }
        };

        area.set_code_type(self.code_type);
        area.set_view_mode(self.view_mode);
        area.set_code_characters_case(self.code_characters_case);
        area.set_position_code_type(self.position_code_type);
        check("charset", area.set_charset(&self.charset));
        area.set_editation_mode(self.editation_mode);
        area.set_row_wrapping(self.row_wrapping);
        check("bytes_per_row", area.set_bytes_per_row(self.bytes_per_row));
        area.set_max_bytes_per_row(self.max_bytes_per_row);
        check(
            "wrapping_bytes_group_size",
            area.set_wrapping_group_size(self.wrapping_bytes_group_size),
        );
        area.set_grouping(self.grouping());
        check(
            "row_position_length",
            area.set_row_number_length(RowNumberLength::from_config(self.row_position_length)),
        );
        area.set_show_header(self.show_header);
        area.set_show_shadow_cursor(self.show_shadow_cursor);
        area.set_show_non_ascii(self.show_non_ascii);
        area.set_background_mode(self.background_mode);
        area.set_scrollbar_visibility(self.vertical_scrollbar, self.horizontal_scrollbar);
        area.set_scroll_units(self.scroll_units());
        area.set_cursor_rendering_mode(self.cursor_rendering_mode);
        if self.cursor_blink_ms == 0 {
            check(
                "cursor_blink_ms",
                Err(CodeAreaError::invalid_argument("blink interval must be positive")),
            );
        } else {
            area.set_blink_interval(Duration::from_millis(self.cursor_blink_ms));
        }

        tracing::debug!("Applied config to code area");
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
