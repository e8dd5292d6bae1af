//! Font metrics consumed by layout and painting

use unicode_width::UnicodeWidthChar;

/// Space between the font size and the row height
pub const SUB_FONT_SPACE: i32 = 3;

/// Per-character measurements of the code font, in pixels
pub trait FontMetrics {
    /// Advance of one grid cell (the width of `'w'`)
    fn char_width(&self) -> i32;

    /// Nominal font size
    fn font_size(&self) -> i32;

    /// Line height reported by the font
    fn font_height(&self) -> i32;

    /// Distance from the top of a line to the baseline
    fn ascent(&self) -> i32;

    /// Advance of a specific character
    fn advance(&self, ch: char) -> i32;

    fn is_monospace(&self) -> bool {
        let w = self.advance('w');
        w == self.advance(' ') && w == self.advance('i')
    }
}

/// Copyable snapshot of a [`FontMetrics`] provider used as layout input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub char_width: i32,
    pub font_height: i32,
    pub row_height: i32,
    pub ascent: i32,
    pub monospace: bool,
}

impl MetricsSnapshot {
    pub fn capture(metrics: &dyn FontMetrics) -> Self {
        Self {
            char_width: metrics.char_width().max(0),
            font_height: metrics.font_height().max(0),
            row_height: (metrics.font_size() + SUB_FONT_SPACE).max(0),
            ascent: metrics.ascent(),
            monospace: metrics.is_monospace(),
        }
    }

    /// Layout is meaningless until a font has been measured
    pub fn is_initialized(&self) -> bool {
        self.char_width > 0 && self.row_height > 0
    }
}

/// Grid metrics with fixed cell sizes.
///
/// Wide characters (East Asian full width) advance two cells, zero-width
/// characters none. Used by tests, benches and headless hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFontMetrics {
    pub char_width: i32,
    pub font_size: i32,
    pub font_height: i32,
    pub ascent: i32,
}

impl FixedFontMetrics {
    pub const fn new(char_width: i32, font_size: i32) -> Self {
        Self {
            char_width,
            font_size,
            font_height: font_size + font_size / 4,
            ascent: font_size,
        }
    }
}

impl Default for FixedFontMetrics {
    fn default() -> Self {
        FixedFontMetrics::new(8, 14)
    }
}

impl FontMetrics for FixedFontMetrics {
    fn char_width(&self) -> i32 {
        self.char_width
    }

    fn font_size(&self) -> i32 {
        self.font_size
    }

    fn font_height(&self) -> i32 {
        self.font_height
    }

    fn ascent(&self) -> i32 {
        self.ascent
    }

    fn advance(&self, ch: char) -> i32 {
        ch.width().unwrap_or(0) as i32 * self.char_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_row_height_adds_sub_font_space() {
        let snapshot = MetricsSnapshot::capture(&FixedFontMetrics::new(8, 14));
        assert_eq!(snapshot.row_height, 17);
        assert_eq!(snapshot.font_height, 17);
        assert!(snapshot.monospace);
        assert!(snapshot.is_initialized());
    }

    #[test]
    fn test_fixed_metrics_wide_chars() {
        let metrics = FixedFontMetrics::new(8, 14);
        assert_eq!(metrics.advance('A'), 8);
        assert_eq!(metrics.advance('漢'), 16);
        assert_eq!(metrics.advance('\u{0301}'), 0);
    }

    #[test]
    fn test_uninitialized_snapshot() {
        assert!(!MetricsSnapshot::default().is_initialized());
    }
}
