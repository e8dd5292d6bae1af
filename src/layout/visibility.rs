//! Visible slice of the document for the current scroll position

use std::ops::Range;

use crate::layout::LayoutGeometry;
use crate::scroll::ScrollPosition;

/// Rows, columns and per-section byte ranges the painter has to touch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRange {
    pub rows: Range<u64>,
    pub columns: Range<usize>,
    /// Bytes of a row whose code digits are at least partly visible
    pub code_bytes: Range<usize>,
    /// Bytes of a row whose preview characters are at least partly visible
    pub preview_bytes: Range<usize>,
}

impl VisibleRange {
    pub fn compute(geometry: &LayoutGeometry, scroll: &ScrollPosition) -> Self {
        let structure = &geometry.structure;

        let first_row = scroll.row_position.min(geometry.scroll_rows);
        // one extra row for the partially scrolled-in row at the bottom
        let row_count = geometry.rows_per_rect as u64 + 1;
        let rows = first_row..(first_row + row_count).min(geometry.scroll_rows);

        let first_char = scroll.char_position.min(structure.chars_per_row);
        let last_char = (first_char + geometry.chars_per_rect + 1).min(structure.chars_per_row);
        let columns = first_char..last_char;

        let code_bytes = if first_char < structure.code_chars && first_char < last_char {
            let end_char = last_char.min(structure.code_chars) - 1;
            structure.byte_from_char(first_char)..structure.byte_from_char(end_char) + 1
        } else {
            0..0
        };

        let preview_bytes = if structure.view_mode.shows_preview() {
            let start = first_char.max(structure.preview_char_pos);
            if start < last_char {
                (start - structure.preview_char_pos)..(last_char - structure.preview_char_pos)
            } else {
                0..0
            }
        } else {
            0..0
        };

        Self {
            rows,
            columns,
            code_bytes,
            preview_bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Top pixel of `row` in component coordinates
    pub fn row_y(geometry: &LayoutGeometry, scroll: &ScrollPosition, row: u64) -> i32 {
        let relative = row as i64 - scroll.row_position as i64;
        let y = geometry.data_view.y as i64 + relative * geometry.row_height() as i64
            - scroll.row_offset as i64;
        y.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Left pixel of the first column of every row
    pub fn row_x(geometry: &LayoutGeometry, scroll: &ScrollPosition) -> i32 {
        let x = geometry.data_view.x as i64 - scroll.horizontal_pixels(geometry.char_width());
        x.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}
