//! Color profiles for the code area
//!
//! Profiles are YAML documents. Two are compiled into the binary; users can
//! add their own or shadow a built-in one by id.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/codearea/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary
//!
//! Any color left out of a YAML profile is derived from the ones given:
//! the stripe background is the "odd" shade of the background, the mirror
//! selection background is the gray of the selection background, and the
//! negative cursor is the complement of the cursor color.

use std::path::Path;

use serde::Deserialize;

use crate::config_paths;

// Embed theme YAML files at compile time
pub const LIGHT_YAML: &str = include_str!("../themes/light.yaml");
pub const DARK_YAML: &str = include_str!("../themes/dark.yaml");

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "light")
    pub id: &'static str,
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "light",
        yaml: LIGHT_YAML,
    },
    BuiltinTheme {
        id: "dark",
        yaml: DARK_YAML,
    },
];

/// Where the theme came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    User,
    Builtin,
}

/// Information about an available theme
#[derive(Debug, Clone)]
pub struct ThemeInfo {
    pub id: String,
    pub name: String,
    pub source: ThemeSource,
}

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_dir) = config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// List all available themes, user themes shadowing builtins with the same id
pub fn list_available_themes() -> Vec<ThemeInfo> {
    let mut themes = Vec::new();
    let mut seen_ids = std::collections::HashSet::new();

    if let Some(user_dir) = config_paths::themes_dir() {
        if let Ok(entries) = std::fs::read_dir(&user_dir) {
            let mut paths: Vec<_> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
            paths.sort();
            for path in paths {
                if !path
                    .extension()
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
                {
                    continue;
                }
                let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                if seen_ids.insert(id.to_string()) {
                    let name = from_file(&path)
                        .map(|t| t.name)
                        .unwrap_or_else(|_| id.to_string());
                    themes.push(ThemeInfo {
                        id: id.to_string(),
                        name,
                        source: ThemeSource::User,
                    });
                }
            }
        }
    }

    for builtin in BUILTIN_THEMES {
        if seen_ids.insert(builtin.id.to_string()) {
            let name = Theme::from_yaml(builtin.yaml)
                .map(|t| t.name)
                .unwrap_or_else(|_| builtin.id.to_string());
            themes.push(ThemeInfo {
                id: builtin.id.to_string(),
                name,
                source: ThemeSource::Builtin,
            });
        }
    }

    themes
}

// =============================================================================
// Color
// =============================================================================

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Inverse of [`Color::to_argb_u32`]
    pub fn from_argb_u32(pixel: u32) -> Self {
        Self {
            a: (pixel >> 24) as u8,
            r: (pixel >> 16) as u8,
            g: (pixel >> 8) as u8,
            b: pixel as u8,
        }
    }

    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim_start_matches('#');
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| format!("Invalid color {}: {}", s, e))
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Slightly shifted shade used for alternating row stripes
    ///
    /// Each component moves 16 steps: down when above 64, up otherwise.
    pub fn odd(&self) -> Self {
        let shift = |c: u8| if c > 64 { c - 16 } else { c + 16 };
        Color::rgba(shift(self.r), shift(self.g), shift(self.b), self.a)
    }

    /// Complement of each component
    pub fn negative(&self) -> Self {
        Color::rgba(255 - self.r, 255 - self.g, 255 - self.b, self.a)
    }

    /// Gray of the same average brightness
    pub fn gray(&self) -> Self {
        let level = ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8;
        Color::rgba(level, level, level, self.a)
    }
}

// =============================================================================
// YAML data
// =============================================================================

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub colors: ColorsData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColorsData {
    pub text: String,
    pub background: String,
    #[serde(default)]
    pub header: PairData,
    #[serde(default)]
    pub row_numbers: PairData,
    #[serde(default)]
    pub decoration_line: Option<String>,
    #[serde(default)]
    pub selection: SelectionData,
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub negative_cursor: Option<String>,
    #[serde(default)]
    pub alternate_background: Option<String>,
    #[serde(default)]
    pub search: SearchData,
    #[serde(default)]
    pub highlight: HighlightData,
}

/// Text and background pair; both fall back to the base colors
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PairData {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionData {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub mirror_text: Option<String>,
    #[serde(default)]
    pub mirror_background: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub match_background: Option<String>,
    #[serde(default)]
    pub current_match_background: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HighlightData {
    #[serde(default)]
    pub control_code: Option<String>,
    #[serde(default)]
    pub above_ascii: Option<String>,
}

// =============================================================================
// Resolved profile
// =============================================================================

/// Every color the render pipeline paints with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorProfile {
    pub text_color: Color,
    pub background: Color,
    pub header_text: Color,
    pub header_background: Color,
    pub row_number_text: Color,
    pub row_number_background: Color,
    pub decoration_line: Color,
    pub selection_color: Color,
    pub selection_background: Color,
    pub mirror_selection_color: Color,
    pub mirror_selection_background: Color,
    pub cursor_color: Color,
    pub cursor_negative_color: Color,
    pub alternate_background: Color,
    pub match_background: Color,
    pub current_match_background: Color,
    pub control_code_color: Color,
    pub above_ascii_color: Color,
}

impl ColorProfile {
    /// Profile with every optional color derived from the five base colors
    pub fn derived(text: Color, background: Color, selection_background: Color, cursor: Color) -> Self {
        Self {
            text_color: text,
            background,
            header_text: text,
            header_background: background,
            row_number_text: text,
            row_number_background: background,
            decoration_line: Color::GRAY,
            selection_color: Color::WHITE,
            selection_background,
            mirror_selection_color: Color::WHITE,
            mirror_selection_background: selection_background.gray(),
            cursor_color: cursor,
            cursor_negative_color: cursor.negative(),
            alternate_background: background.odd(),
            match_background: Color::rgb(255, 230, 128),
            current_match_background: Color::rgb(255, 166, 77),
            control_code_color: Color::rgb(176, 0, 0),
            above_ascii_color: Color::rgb(0, 80, 176),
        }
    }
}

impl Default for ColorProfile {
    fn default() -> Self {
        ColorProfile::derived(
            Color::BLACK,
            Color::WHITE,
            Color::rgb(96, 96, 255),
            Color::BLACK,
        )
    }
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ColorProfile,
}

impl Theme {
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse theme YAML: {}", e))?;
        Self::from_data(data)
    }

    pub fn from_builtin(id: &str) -> Result<Self, String> {
        BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown builtin theme: {}", id))
            .and_then(|t| Self::from_yaml(t.yaml))
    }

    /// Resolve raw strings into colors, deriving anything left out
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        if data.version != 1 {
            return Err(format!("Unsupported theme version: {}", data.version));
        }
        let c = data.colors;
        let opt = |value: &Option<String>| value.as_deref().map(Color::from_hex).transpose();

        let text = Color::from_hex(&c.text)?;
        let background = Color::from_hex(&c.background)?;
        let selection_background =
            opt(&c.selection.background)?.unwrap_or(Color::rgb(96, 96, 255));
        let cursor = opt(&c.cursor)?.unwrap_or(text);

        let mut colors = ColorProfile::derived(text, background, selection_background, cursor);
        let overrides = [
            (&c.header.text, &mut colors.header_text),
            (&c.header.background, &mut colors.header_background),
            (&c.row_numbers.text, &mut colors.row_number_text),
            (&c.row_numbers.background, &mut colors.row_number_background),
            (&c.decoration_line, &mut colors.decoration_line),
            (&c.selection.text, &mut colors.selection_color),
            (&c.selection.mirror_background, &mut colors.mirror_selection_background),
            (&c.negative_cursor, &mut colors.cursor_negative_color),
            (&c.alternate_background, &mut colors.alternate_background),
            (&c.search.match_background, &mut colors.match_background),
            (
                &c.search.current_match_background,
                &mut colors.current_match_background,
            ),
            (&c.highlight.control_code, &mut colors.control_code_color),
            (&c.highlight.above_ascii, &mut colors.above_ascii_color),
        ];
        for (value, slot) in overrides {
            if let Some(color) = opt(value)? {
                *slot = color;
            }
        }
        // mirror text follows the selection text unless set
        colors.mirror_selection_color = opt(&c.selection.mirror_text)?.unwrap_or(colors.selection_color);

        Ok(Theme {
            name: data.name,
            colors,
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_builtin("light").unwrap_or_else(|_| Theme {
            name: "Light".to_string(),
            colors: ColorProfile::default(),
        })
    }
}
