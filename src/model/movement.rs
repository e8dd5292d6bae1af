//! Caret movement
//!
//! Moves are computed in "shifted" coordinates (`position + row_shift`) so
//! that row boundaries fall on multiples of bytes per row even when the
//! first row is shifted. Results are always within `0..=data_size`.

use crate::layout::LayoutGeometry;
use crate::model::{CaretPosition, Section, ViewMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementDirection {
    Left,
    Right,
    Up,
    Down,
    RowStart,
    RowEnd,
    PageUp,
    PageDown,
    DocumentStart,
    DocumentEnd,
    /// Toggle between code matrix and preview (dual view only)
    SwitchSection,
}

/// Caret position after one step in `direction`
pub fn compute_move_position(
    caret: CaretPosition,
    direction: MovementDirection,
    geometry: &LayoutGeometry,
) -> CaretPosition {
    let structure = &geometry.structure;
    let bpr = structure.bytes_per_row as u64;
    let shift = geometry.row_shift as u64;
    let size = geometry.data_size;
    let last_digit = structure.digits() - 1;
    let in_code = caret.section == Section::CodeMatrix;

    let pos = caret.data_position.min(size);
    let shifted = pos + shift;
    let shifted_size = size + shift;
    let mut target = CaretPosition { data_position: pos, ..caret };

    match direction {
        MovementDirection::Left => {
            if in_code && caret.code_offset > 0 {
                target.code_offset = caret.code_offset - 1;
            } else if pos > 0 {
                target.data_position = pos - 1;
                target.code_offset = if in_code { last_digit } else { 0 };
            }
        }
        MovementDirection::Right => {
            if pos < size {
                if in_code && caret.code_offset < last_digit {
                    target.code_offset = caret.code_offset + 1;
                } else {
                    target.data_position = pos + 1;
                    target.code_offset = 0;
                }
            }
        }
        MovementDirection::Up => {
            if shifted >= bpr {
                target.data_position = (shifted - bpr).max(shift) - shift;
            }
        }
        MovementDirection::Down => {
            let below = shifted + bpr;
            if below < shifted_size || (below == shifted_size && caret.code_offset == 0) {
                target.data_position = pos + bpr;
            }
        }
        MovementDirection::RowStart => {
            let row_start = (shifted - shifted % bpr).max(shift);
            target.data_position = row_start - shift;
            target.code_offset = 0;
        }
        MovementDirection::RowEnd => {
            let row_end = (shifted + (bpr - 1 - shifted % bpr)).min(shifted_size);
            target.data_position = row_end - shift;
            target.code_offset = if in_code && target.data_position < size {
                last_digit
            } else {
                0
            };
        }
        MovementDirection::PageUp => {
            let increment = bpr * geometry.rows_per_page.max(1) as u64;
            let moved = if shifted < increment {
                (shifted % bpr).max(shift)
            } else {
                (shifted - increment).max(shift)
            };
            target.data_position = moved - shift;
        }
        MovementDirection::PageDown => {
            let increment = bpr * geometry.rows_per_page.max(1) as u64;
            if shifted + increment <= shifted_size {
                target.data_position = pos + increment;
            } else {
                let column = shifted % bpr;
                let last_row_start = shifted_size - shifted_size % bpr;
                if last_row_start + column <= shifted_size {
                    target.data_position = last_row_start + column - shift;
                } else if last_row_start >= bpr && last_row_start - bpr + column >= shifted {
                    target.data_position = last_row_start - bpr + column - shift;
                }
            }
        }
        MovementDirection::DocumentStart => {
            target.data_position = 0;
            target.code_offset = 0;
        }
        MovementDirection::DocumentEnd => {
            target.data_position = size;
            target.code_offset = 0;
        }
        MovementDirection::SwitchSection => {
            if structure.view_mode == ViewMode::Dual {
                target.section = caret.section.other();
                if target.section == Section::TextPreview {
                    target.code_offset = 0;
                }
            }
        }
    }

    target.normalized(size, structure.code_type, structure.view_mode)
}
