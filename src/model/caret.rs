//! Caret position, cursor appearance and the blink timer

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::code_type::CodeType;
use crate::model::ViewMode;

/// Logical column group the caret is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    CodeMatrix,
    TextPreview,
}

impl Section {
    pub fn other(self) -> Self {
        match self {
            Section::CodeMatrix => Section::TextPreview,
            Section::TextPreview => Section::CodeMatrix,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CaretPosition {
    /// Byte position in `0..=data_size`
    pub data_position: u64,
    /// Digit within the byte; always 0 in the text preview
    pub code_offset: usize,
    pub section: Section,
}

impl CaretPosition {
    pub const fn new(data_position: u64, code_offset: usize, section: Section) -> Self {
        Self {
            data_position,
            code_offset,
            section,
        }
    }

    pub const fn at(data_position: u64, section: Section) -> Self {
        Self::new(data_position, 0, section)
    }

    /// Forces the position into the valid range for the current data and view.
    ///
    /// Positions past the end snap to the end with offset 0, the section
    /// follows single-section view modes, and the code offset is clamped to
    /// the last digit.
    pub fn normalized(self, data_size: u64, code_type: CodeType, view_mode: ViewMode) -> Self {
        let section = match view_mode {
            ViewMode::CodeMatrixOnly => Section::CodeMatrix,
            ViewMode::TextPreviewOnly => Section::TextPreview,
            ViewMode::Dual => self.section,
        };
        let mut out = Self {
            section,
            ..self
        };
        if out.data_position >= data_size {
            out.data_position = data_size;
            out.code_offset = 0;
        }
        out.code_offset = match section {
            Section::TextPreview => 0,
            Section::CodeMatrix => out.code_offset.min(code_type.max_digits() - 1),
        };
        out
    }
}

/// Caret glyph shape, chosen by the editation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    /// Thin bar before the cell
    Insert,
    /// Box covering the whole cell
    Overwrite,
}

/// Width of the insert-mode bar in pixels
pub const INSERT_CURSOR_WIDTH: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorRenderingMode {
    /// Filled with the cursor color
    Paint,
    /// Pixels XOR-ed with the cursor color
    Xor,
    /// Cell repainted with inverted colors
    #[default]
    Negative,
}

// ============================================================================
// Blink
// ============================================================================

pub const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(450);

/// Cancellable periodic visibility toggle.
///
/// The timer is polled by whatever event loop hosts the widget: call
/// [`poll`](Self::poll) when [`next_deadline`](Self::next_deadline) passes.
/// A zero interval keeps the caret permanently visible. Once cancelled the
/// timer never reports another toggle.
#[derive(Debug, Clone)]
pub struct BlinkTimer {
    interval: Duration,
    visible: bool,
    next_toggle: Option<Instant>,
    cancelled: bool,
}

impl BlinkTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            visible: true,
            next_toggle: None,
            cancelled: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.restart(now);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows the caret and schedules the next toggle one interval from `now`
    pub fn restart(&mut self, now: Instant) {
        if self.cancelled {
            return;
        }
        self.visible = true;
        self.next_toggle = if self.interval.is_zero() {
            None
        } else {
            Some(now + self.interval)
        };
    }

    /// Toggles visibility if the deadline has passed.
    /// Returns true if the state changed (needs redraw).
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.cancelled {
            return false;
        }
        match self.next_toggle {
            Some(deadline) if now >= deadline => {
                self.visible = !self.visible;
                self.next_toggle = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_toggle
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.next_toggle = None;
        self.visible = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl Default for BlinkTimer {
    fn default() -> Self {
        BlinkTimer::new(DEFAULT_BLINK_INTERVAL)
    }
}
