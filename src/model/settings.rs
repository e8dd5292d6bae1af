//! View and editing settings shared by layout, painting and commands

use serde::{Deserialize, Serialize};

/// Which sections of the row are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Dual,
    CodeMatrixOnly,
    TextPreviewOnly,
}

impl ViewMode {
    pub fn shows_code(self) -> bool {
        self != ViewMode::TextPreviewOnly
    }

    pub fn shows_preview(self) -> bool {
        self != ViewMode::CodeMatrixOnly
    }
}

/// How typed input and pastes affect the data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditationMode {
    /// No mutation is applied
    ReadOnly,
    /// Typed input replaces existing bytes and may append at the end
    #[default]
    Overwrite,
    /// Typed input is inserted before the caret
    Insert,
    /// Like overwrite, but the data size never changes
    Inplace,
}

impl EditationMode {
    pub fn is_editable(self) -> bool {
        self != EditationMode::ReadOnly
    }

    /// Insert toggles to overwrite and back; other modes are left alone
    pub fn toggled(self) -> Self {
        match self {
            EditationMode::Insert => EditationMode::Overwrite,
            EditationMode::Overwrite => EditationMode::Insert,
            other => other,
        }
    }
}

/// Background painting style of the main area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundPaintMode {
    Transparent,
    Plain,
    #[default]
    Striped,
}
