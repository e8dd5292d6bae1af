//! Pixel ↔ data position mapping
//!
//! Pixels are component coordinates; the data view origin, the scroll
//! position and the row shift are applied here and nowhere else.

use crate::layout::{LayoutGeometry, Point, Rect};
use crate::model::{CaretPosition, CursorShape, Section, INSERT_CURSOR_WIDTH};
use crate::scroll::ScrollPosition;

/// Region of the component under a point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    TopLeftCorner,
    Header,
    RowNumbers,
    CodeArea,
    VerticalScrollbar,
    HorizontalScrollbar,
    ScrollbarCorner,
    BottomLeftCorner,
}

/// How points left of or above the data view are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionOverflowMode {
    /// Snap to the first visible column/row
    #[default]
    Clamp,
    /// Resolve to the column/row before the visible one, so drag
    /// selection can scroll backwards
    Overflow,
}

/// Region containing `x`/`y`
pub fn zone_at(geometry: &LayoutGeometry, x: i32, y: i32) -> Zone {
    let data_view = &geometry.data_view;
    let scroll_right = data_view.right() + geometry.vertical_scrollbar.map_or(0, |r| r.width);
    let scroll_bottom =
        data_view.bottom() + geometry.horizontal_scrollbar.map_or(0, |r| r.height);

    if y < data_view.y {
        return if x < data_view.x {
            Zone::TopLeftCorner
        } else {
            Zone::Header
        };
    }
    if y >= data_view.bottom() && y < scroll_bottom {
        return if x < data_view.x {
            Zone::BottomLeftCorner
        } else if x >= data_view.right() && x < scroll_right {
            Zone::ScrollbarCorner
        } else {
            Zone::HorizontalScrollbar
        };
    }
    if x < data_view.x {
        return Zone::RowNumbers;
    }
    if x >= data_view.right() && x < scroll_right {
        return Zone::VerticalScrollbar;
    }
    Zone::CodeArea
}

/// Closest caret position to the point `x`/`y`.
///
/// Points outside the data view are clamped to its edges first. The row
/// and byte are clamped to the document, and positions past the end of the
/// data resolve to the end-of-data position.
pub fn pixel_to_position(
    geometry: &LayoutGeometry,
    scroll: &ScrollPosition,
    x: i32,
    y: i32,
    overflow: PositionOverflowMode,
) -> CaretPosition {
    let structure = &geometry.structure;
    let data_view = &geometry.data_view;
    let char_width = geometry.char_width().max(1) as i64;
    let row_height = geometry.row_height().max(1) as i64;
    let overflowing = overflow == PositionOverflowMode::Overflow;

    let mut back_x = 0;
    let mut x = x;
    if x < data_view.x {
        back_x = i64::from(overflowing);
        x = data_view.x;
    }
    x = x.min(data_view.right().max(data_view.x + 1) - 1);
    let char_x = (x - data_view.x) as i64 + scroll.char_offset as i64;
    let column = (char_x / char_width + scroll.char_position as i64 - back_x).max(0);
    let column = (column as usize).min(structure.chars_per_row.saturating_sub(1));

    let mut back_y = 0;
    let mut y = y;
    if y < data_view.y {
        back_y = i128::from(overflowing);
        y = data_view.y;
    }
    y = y.min(data_view.bottom().max(data_view.y + 1) - 1);
    let row_y = (y - data_view.y) as i64 + scroll.row_offset as i64;
    let row = (row_y as i128 / row_height as i128 + scroll.row_position as i128 - back_y).max(0);
    let row = (row as u64).min(geometry.scroll_rows.saturating_sub(1));

    let section = structure.section_at(column);
    let (byte, code_offset) = match section {
        Section::CodeMatrix => (
            structure.byte_from_char(column),
            structure.code_offset_from_char(column),
        ),
        Section::TextPreview => (
            (column - structure.preview_char_pos).min(structure.bytes_per_row - 1),
            0,
        ),
    };

    let start = structure.row_start(row, geometry.row_shift) + byte as i128;
    let size = geometry.data_size as i128;
    let caret = if start < 0 {
        CaretPosition::new(0, 0, section)
    } else if start >= size {
        CaretPosition::new(geometry.data_size, 0, section)
    } else {
        CaretPosition::new(start as u64, code_offset, section)
    };
    caret.normalized(geometry.data_size, structure.code_type, structure.view_mode)
}

/// Top-left pixel of the caret cell, or `None` when its row is more than
/// one row outside the data view.
pub fn position_to_pixel(
    geometry: &LayoutGeometry,
    scroll: &ScrollPosition,
    caret: &CaretPosition,
) -> Option<Point> {
    let structure = &geometry.structure;
    let (row, byte) = structure.row_and_byte(caret.data_position, geometry.row_shift);
    let relative_row = row as i128 - scroll.row_position as i128;
    if relative_row < -1 || relative_row > geometry.rows_per_rect as i128 {
        return None;
    }

    let column = structure.caret_column(byte, caret.code_offset, caret.section) as i64;
    let char_width = geometry.char_width() as i64;
    let data_view = &geometry.data_view;
    let x = data_view.x as i64 + column * char_width
        - scroll.horizontal_pixels(geometry.char_width());
    let y = data_view.y as i64 + relative_row as i64 * geometry.row_height() as i64
        - scroll.row_offset as i64;
    Some(Point::new(clamp_i32(x), clamp_i32(y)))
}

/// Rectangle the caret is drawn in for `shape`
pub fn caret_rect(
    geometry: &LayoutGeometry,
    scroll: &ScrollPosition,
    caret: &CaretPosition,
    shape: CursorShape,
) -> Option<Rect> {
    let point = position_to_pixel(geometry, scroll, caret)?;
    let width = match shape {
        CursorShape::Insert => INSERT_CURSOR_WIDTH,
        CursorShape::Overwrite => geometry.char_width(),
    };
    Some(Rect::new(point.x, point.y, width, geometry.row_height()))
}

/// Rectangle of the byte under the caret in the other section, used for
/// the shadow cursor in dual view.
pub fn mirror_rect(
    geometry: &LayoutGeometry,
    scroll: &ScrollPosition,
    caret: &CaretPosition,
) -> Option<Rect> {
    let mirror = CaretPosition::at(caret.data_position, caret.section.other());
    let point = position_to_pixel(geometry, scroll, &mirror)?;
    let cells = match caret.section {
        Section::TextPreview => geometry.structure.digits() as i32,
        Section::CodeMatrix => 1,
    };
    Some(Rect::new(
        point.x,
        point.y,
        geometry.char_width() * cells,
        geometry.row_height(),
    ))
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute_layout, FixedFontMetrics, LayoutInputs, MetricsSnapshot};

    fn geometry(data_size: u64) -> LayoutGeometry {
        compute_layout(&LayoutInputs {
            width: 800,
            height: 400,
            data_size,
            metrics: MetricsSnapshot::capture(&FixedFontMetrics::new(8, 14)),
            ..LayoutInputs::default()
        })
    }

    #[test]
    fn test_zones() {
        let g = geometry(100);
        assert_eq!(zone_at(&g, 0, 0), Zone::TopLeftCorner);
        assert_eq!(zone_at(&g, g.data_view.x + 5, 0), Zone::Header);
        assert_eq!(zone_at(&g, 0, g.data_view.y + 5), Zone::RowNumbers);
        assert_eq!(
            zone_at(&g, g.data_view.x + 5, g.data_view.y + 5),
            Zone::CodeArea
        );
    }

    #[test]
    fn test_click_on_second_digit() {
        let g = geometry(100);
        let scroll = ScrollPosition::default();
        // byte 2 starts at column 6; its second digit is column 7
        let x = g.data_view.x + 7 * 8 + 3;
        let y = g.data_view.y + 17 + 2;
        let caret = pixel_to_position(&g, &scroll, x, y, PositionOverflowMode::Clamp);
        assert_eq!(caret, CaretPosition::new(18, 1, Section::CodeMatrix));
    }

    #[test]
    fn test_click_in_preview() {
        let g = geometry(100);
        let scroll = ScrollPosition::default();
        let x = g.data_view.x + (g.structure.preview_char_pos as i32 + 4) * 8;
        let caret = pixel_to_position(&g, &scroll, x, g.data_view.y, PositionOverflowMode::Clamp);
        assert_eq!(caret, CaretPosition::new(4, 0, Section::TextPreview));
    }

    #[test]
    fn test_click_past_end_clamps_to_size() {
        let g = geometry(20);
        let scroll = ScrollPosition::default();
        let caret = pixel_to_position(&g, &scroll, 790, 390, PositionOverflowMode::Clamp);
        assert_eq!(caret.data_position, 20);
        assert_eq!(caret.code_offset, 0);
    }

    #[test]
    fn test_click_left_of_view_clamps() {
        let g = geometry(100);
        let scroll = ScrollPosition::default();
        let y = g.data_view.y + 17;
        let caret = pixel_to_position(&g, &scroll, 0, y, PositionOverflowMode::Clamp);
        assert_eq!(caret, CaretPosition::new(16, 0, Section::CodeMatrix));

        let scrolled = ScrollPosition::new(2, 0);
        let x = g.data_view.x;
        let caret = pixel_to_position(&g, &scrolled, x, 0, PositionOverflowMode::Overflow);
        assert_eq!(caret.data_position, 16, "overflow resolves to the row above");
    }

    #[test]
    fn test_position_to_pixel_offscreen() {
        let g = geometry(100_000);
        let scroll = ScrollPosition::new(100, 0);
        let far = CaretPosition::at(0, Section::CodeMatrix);
        assert_eq!(position_to_pixel(&g, &scroll, &far), None);
        let just_above = CaretPosition::at(99 * 16, Section::CodeMatrix);
        let point = position_to_pixel(&g, &scroll, &just_above).unwrap();
        assert_eq!(point.y, g.data_view.y - 17);
    }

    #[test]
    fn test_round_trip_through_cell_centre() {
        let g = geometry(300);
        let scroll = ScrollPosition::new(1, 0);
        for position in [16u64, 17, 40, 100, 150] {
            for section in [Section::CodeMatrix, Section::TextPreview] {
                let caret = CaretPosition::new(position, 0, section);
                let point = position_to_pixel(&g, &scroll, &caret).unwrap();
                let back = pixel_to_position(
                    &g,
                    &scroll,
                    point.x + 4,
                    point.y + 8,
                    PositionOverflowMode::Clamp,
                );
                assert_eq!(back, caret, "position {} in {:?}", position, section);
            }
        }
    }

    #[test]
    fn test_mirror_rect_widths() {
        let g = geometry(64);
        let scroll = ScrollPosition::default();
        let in_code = CaretPosition::at(3, Section::CodeMatrix);
        assert_eq!(mirror_rect(&g, &scroll, &in_code).unwrap().width, 8);
        let in_preview = CaretPosition::at(3, Section::TextPreview);
        let rect = mirror_rect(&g, &scroll, &in_preview).unwrap();
        assert_eq!(rect.width, 16);
        assert_eq!(rect.x, g.data_view.x + 9 * 8);
    }
}
