//! Scroll position and scrolling arithmetic
//!
//! The vertical position is a 64-bit row index plus a pixel offset into that
//! row; the horizontal position is a column index plus a pixel offset. Host
//! scrollbars only understand `i32` ranges, so when the document is taller
//! than `i32::MAX` pixels the vertical value is scaled proportionally
//! ("max mode") instead of being a pixel count.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScrollPosition {
    /// First (partially) visible row
    pub row_position: u64,
    /// Pixels of `row_position` scrolled out above the view
    pub row_offset: i32,
    /// First (partially) visible column
    pub char_position: usize,
    /// Pixels of `char_position` scrolled out left of the view
    pub char_offset: i32,
    /// Bytes the first row is shifted by, in `0..bytes_per_row`
    pub row_byte_shift: usize,
    /// Vertical scrollbar value is scaled rather than pixel based
    pub vertical_max_mode: bool,
}

impl ScrollPosition {
    pub const fn new(row_position: u64, char_position: usize) -> Self {
        Self {
            row_position,
            row_offset: 0,
            char_position,
            char_offset: 0,
            row_byte_shift: 0,
            vertical_max_mode: false,
        }
    }

    fn row_key(&self) -> (u64, i32) {
        (self.row_position, self.row_offset)
    }

    fn char_key(&self) -> (usize, i32) {
        (self.char_position, self.char_offset)
    }

    /// Clamps rows and columns to `max`, keeping the shift and mode flags
    pub fn clamped_to(self, max: &ScrollPosition) -> Self {
        let mut out = self;
        if out.row_key() > max.row_key() {
            out.row_position = max.row_position;
            out.row_offset = max.row_offset;
        }
        if out.char_key() > max.char_key() {
            out.char_position = max.char_position;
            out.char_offset = max.char_offset;
        }
        out.row_offset = out.row_offset.max(0);
        out.char_offset = out.char_offset.max(0);
        out
    }

    /// Horizontal scroll in pixels
    pub fn horizontal_pixels(&self, char_width: i32) -> i64 {
        self.char_position as i64 * char_width as i64 + self.char_offset as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalScrollUnit {
    /// Scroll by whole rows
    Row,
    #[default]
    Pixel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalScrollUnit {
    /// Scroll by whole columns
    #[default]
    Character,
    Pixel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScrollUnits {
    pub vertical: VerticalScrollUnit,
    pub horizontal: HorizontalScrollUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
}

/// How much of a position is inside the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionVisibility {
    Visible,
    Partial,
    NotVisible,
}

/// View measurements the scrolling functions need
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollViewport {
    pub rows_per_page: usize,
    pub rows_per_rect: usize,
    pub chars_per_page: usize,
    pub chars_per_rect: usize,
    pub view_width: i32,
    pub view_height: i32,
    pub char_width: i32,
    pub row_height: i32,
}

/// Rows mouse-wheel scrolling moves per notch
pub const WHEEL_SCROLL_ROWS: u64 = 3;

/// Furthest scroll position that still fills the view
pub fn maximum_scroll_position(
    rows_per_document: u64,
    chars_per_row: usize,
    viewport: &ScrollViewport,
    units: ScrollUnits,
) -> ScrollPosition {
    let mut max = ScrollPosition::default();
    let rows_per_page = viewport.rows_per_page as u64;
    if rows_per_document > rows_per_page {
        max.row_position = rows_per_document - rows_per_page;
    }
    if units.vertical == VerticalScrollUnit::Pixel && viewport.row_height > 0 {
        max.row_offset = viewport.view_height.max(0) % viewport.row_height;
    }
    if chars_per_row > viewport.chars_per_page {
        max.char_position = chars_per_row - viewport.chars_per_page;
    }
    if units.horizontal == HorizontalScrollUnit::Pixel && viewport.char_width > 0 {
        max.char_offset = viewport.view_width.max(0) % viewport.char_width;
    }
    max
}

/// Position after one scroll step in `direction`
pub fn compute_scrolling(
    start: ScrollPosition,
    direction: ScrollDirection,
    max: &ScrollPosition,
    rows_per_page: usize,
    rows_per_document: u64,
) -> ScrollPosition {
    let mut target = start;
    let rows_per_page = rows_per_page as u64;
    match direction {
        ScrollDirection::Up => {
            if start.row_position == 0 {
                target.row_offset = 0;
            } else {
                target.row_position = start.row_position - 1;
            }
        }
        ScrollDirection::Down => {
            if max.row_position > start.row_position {
                target.row_position = start.row_position + 1;
            }
        }
        ScrollDirection::Left => {
            if start.char_position == 0 {
                target.char_offset = 0;
            } else {
                target.char_position = start.char_position - 1;
            }
        }
        ScrollDirection::Right => {
            if max.char_position > start.char_position {
                target.char_position = start.char_position + 1;
            }
        }
        ScrollDirection::PageUp => {
            if start.row_position < rows_per_page {
                target.row_position = 0;
                target.row_offset = 0;
            } else {
                target.row_position = start.row_position - rows_per_page;
            }
        }
        ScrollDirection::PageDown => {
            if rows_per_document >= rows_per_page * 2
                && start.row_position <= rows_per_document - rows_per_page * 2
            {
                target.row_position = start.row_position + rows_per_page;
            } else if rows_per_document > rows_per_page {
                target.row_position = rows_per_document - rows_per_page;
            } else {
                target.row_position = 0;
            }
        }
    }
    target
}

fn check_top(scroll: &ScrollPosition, row: u64, unit: VerticalScrollUnit) -> PositionVisibility {
    if unit == VerticalScrollUnit::Row {
        return if row < scroll.row_position {
            PositionVisibility::NotVisible
        } else {
            PositionVisibility::Visible
        };
    }
    if row > scroll.row_position || (row == scroll.row_position && scroll.row_offset == 0) {
        PositionVisibility::Visible
    } else if row == scroll.row_position && scroll.row_offset > 0 {
        PositionVisibility::Partial
    } else {
        PositionVisibility::NotVisible
    }
}

/// Classifies a cell against the far edge of the view from the pixel
/// offset of its far side.
fn check_far_edge(far_side: i128, cell: i32, view: i32) -> PositionVisibility {
    if far_side <= view as i128 {
        PositionVisibility::Visible
    } else if far_side - (cell as i128) < view as i128 {
        PositionVisibility::Partial
    } else {
        PositionVisibility::NotVisible
    }
}

fn check_bottom(scroll: &ScrollPosition, row: u64, viewport: &ScrollViewport) -> PositionVisibility {
    let row_height = viewport.row_height.max(1);
    let bottom = (row as i128 - scroll.row_position as i128 + 1) * row_height as i128
        - scroll.row_offset as i128;
    check_far_edge(bottom, row_height, viewport.view_height)
}

fn check_left(
    scroll: &ScrollPosition,
    column: usize,
    unit: HorizontalScrollUnit,
) -> PositionVisibility {
    if unit == HorizontalScrollUnit::Character {
        return if column < scroll.char_position {
            PositionVisibility::NotVisible
        } else {
            PositionVisibility::Visible
        };
    }
    if column > scroll.char_position || (column == scroll.char_position && scroll.char_offset == 0)
    {
        PositionVisibility::Visible
    } else if column == scroll.char_position && scroll.char_offset > 0 {
        PositionVisibility::Partial
    } else {
        PositionVisibility::NotVisible
    }
}

fn check_right(
    scroll: &ScrollPosition,
    column: usize,
    viewport: &ScrollViewport,
) -> PositionVisibility {
    let char_width = viewport.char_width.max(1);
    let right = (column as i128 - scroll.char_position as i128 + 1) * char_width as i128
        - scroll.char_offset as i128;
    check_far_edge(right, char_width, viewport.view_width)
}

/// Visibility of the cell at `row`/`column` for the current scroll
pub fn position_visibility(
    scroll: &ScrollPosition,
    row: u64,
    column: usize,
    viewport: &ScrollViewport,
    units: ScrollUnits,
) -> PositionVisibility {
    let checks = [
        check_top(scroll, row, units.vertical),
        check_bottom(scroll, row, viewport),
        check_left(scroll, column, units.horizontal),
        check_right(scroll, column, viewport),
    ];
    if checks.contains(&PositionVisibility::NotVisible) {
        PositionVisibility::NotVisible
    } else if checks.contains(&PositionVisibility::Partial) {
        PositionVisibility::Partial
    } else {
        PositionVisibility::Visible
    }
}

/// Position and offset that put the far side of cell `index` exactly on
/// the far edge of a view `view` pixels long.
fn align_far_edge(
    index: u64,
    cell: i32,
    view: i32,
    per_page: usize,
    whole_cells: bool,
) -> (u64, i32) {
    if view < cell {
        return (index, 0);
    }
    if whole_cells {
        return ((index + 1).saturating_sub(per_page.max(1) as u64), 0);
    }
    let total = (index as i128 + 1) * cell as i128 - view as i128;
    if total <= 0 {
        return (0, 0);
    }
    ((total / cell as i128) as u64, (total % cell as i128) as i32)
}

/// Smallest scroll change that makes `row`/`column` fully visible, or
/// `None` when it already is.
pub fn reveal_scroll_position(
    scroll: &ScrollPosition,
    row: u64,
    column: usize,
    viewport: &ScrollViewport,
    units: ScrollUnits,
) -> Option<ScrollPosition> {
    let mut target = *scroll;
    let mut scrolled = false;
    let row_height = viewport.row_height.max(1);
    let char_width = viewport.char_width.max(1);

    if check_bottom(scroll, row, viewport) != PositionVisibility::Visible {
        let (position, offset) = align_far_edge(
            row,
            row_height,
            viewport.view_height,
            viewport.rows_per_page,
            units.vertical == VerticalScrollUnit::Row,
        );
        target.row_position = position;
        target.row_offset = offset;
        scrolled = true;
    }

    if check_top(scroll, row, units.vertical) != PositionVisibility::Visible {
        target.row_position = row;
        target.row_offset = 0;
        scrolled = true;
    }

    if check_right(scroll, column, viewport) != PositionVisibility::Visible {
        let (position, offset) = align_far_edge(
            column as u64,
            char_width,
            viewport.view_width,
            viewport.chars_per_page,
            units.horizontal == HorizontalScrollUnit::Character,
        );
        target.char_position = position as usize;
        target.char_offset = offset;
        scrolled = true;
    }

    if check_left(scroll, column, units.horizontal) != PositionVisibility::Visible {
        target.char_position = column;
        target.char_offset = 0;
        scrolled = true;
    }

    scrolled.then_some(target)
}

/// Scroll position that puts `row`/`column` in the middle of the view
pub fn center_scroll_position(
    scroll: &ScrollPosition,
    row: u64,
    column: usize,
    viewport: &ScrollViewport,
    max: &ScrollPosition,
    units: ScrollUnits,
) -> ScrollPosition {
    let mut target = *scroll;

    let half_rows = (viewport.rows_per_rect / 2) as u64;
    let row_correction = if viewport.rows_per_rect % 2 == 0 {
        viewport.row_height
    } else {
        0
    };
    let height_diff = (viewport.rows_per_rect as i32 * viewport.row_height + row_correction
        - viewport.view_height)
        / 2;
    let mut row_offset = if units.vertical == VerticalScrollUnit::Row {
        0
    } else {
        height_diff.max(0)
    };
    let mut center_row = row;
    if row < half_rows {
        center_row = 0;
        row_offset = 0;
    } else {
        center_row -= half_rows;
        if (center_row, row_offset) > max.row_key() {
            center_row = max.row_position;
            row_offset = max.row_offset;
        }
    }
    target.row_position = center_row;
    target.row_offset = row_offset;

    let half_chars = viewport.chars_per_rect / 2;
    let char_correction = if viewport.chars_per_rect % 2 == 0 {
        viewport.char_width
    } else {
        0
    };
    let width_diff = (viewport.chars_per_rect as i32 * viewport.char_width + char_correction
        - viewport.view_width)
        / 2;
    let mut char_offset = if units.horizontal == HorizontalScrollUnit::Character {
        0
    } else {
        width_diff.max(0)
    };
    let mut center_char = column;
    if column < half_chars {
        center_char = 0;
        char_offset = 0;
    } else {
        center_char -= half_chars;
        if (center_char, char_offset) > max.char_key() {
            center_char = max.char_position;
            char_offset = max.char_offset;
        }
    }
    target.char_position = center_char;
    target.char_offset = char_offset;
    target
}

/// Whether the document is too tall for a pixel-based `i32` scrollbar
pub fn needs_vertical_max_mode(scroll_rows: u64, row_height: i32) -> bool {
    row_height > 0 && scroll_rows > (i32::MAX / row_height) as u64
}

/// Value to show on a host vertical scrollbar.
///
/// In max mode the value is the fraction of `rows_to_last_page` scrolled,
/// scaled to `i32::MAX`.
pub fn vertical_scroll_value(
    scroll: &ScrollPosition,
    row_height: i32,
    rows_to_last_page: u64,
    unit: VerticalScrollUnit,
) -> i32 {
    if scroll.vertical_max_mode {
        if rows_to_last_page == 0 {
            return 0;
        }
        let value =
            scroll.row_position as u128 * i32::MAX as u128 / rows_to_last_page as u128;
        return value.min(i32::MAX as u128) as i32;
    }
    let pixels = scroll.row_position as i64 * row_height as i64;
    let pixels = match unit {
        VerticalScrollUnit::Row => pixels,
        VerticalScrollUnit::Pixel => pixels + scroll.row_offset as i64,
    };
    pixels.clamp(0, i32::MAX as i64) as i32
}

/// Applies a host vertical scrollbar value to `scroll`.
///
/// In max mode `value` is a fraction of `i32::MAX` mapped onto
/// `rows_to_last_page`; otherwise it is a pixel offset.
pub fn apply_vertical_scroll_value(
    scroll: &mut ScrollPosition,
    value: i32,
    row_height: i32,
    rows_to_last_page: u64,
    unit: VerticalScrollUnit,
) {
    let value = value.max(0);
    if scroll.vertical_max_mode {
        let target = value as u128 * rows_to_last_page as u128 / i32::MAX as u128;
        scroll.row_position = target as u64;
        scroll.row_offset = 0;
        return;
    }
    if row_height <= 0 {
        scroll.row_position = 0;
        scroll.row_offset = 0;
        return;
    }
    match unit {
        VerticalScrollUnit::Row => {
            let mut row = value / row_height;
            if value % row_height > 0 {
                row += 1;
            }
            scroll.row_position = row as u64;
            scroll.row_offset = 0;
        }
        VerticalScrollUnit::Pixel => {
            scroll.row_position = (value / row_height) as u64;
            scroll.row_offset = value % row_height;
        }
    }
}

/// Value to show on a host horizontal scrollbar
pub fn horizontal_scroll_value(
    scroll: &ScrollPosition,
    char_width: i32,
    unit: HorizontalScrollUnit,
) -> i32 {
    let pixels = match unit {
        HorizontalScrollUnit::Character => scroll.char_position as i64 * char_width as i64,
        HorizontalScrollUnit::Pixel => scroll.horizontal_pixels(char_width),
    };
    pixels.clamp(0, i32::MAX as i64) as i32
}

pub fn apply_horizontal_scroll_value(
    scroll: &mut ScrollPosition,
    value: i32,
    char_width: i32,
    unit: HorizontalScrollUnit,
) {
    let value = value.max(0);
    if char_width <= 0 {
        scroll.char_position = 0;
        scroll.char_offset = 0;
        return;
    }
    match unit {
        HorizontalScrollUnit::Character => {
            let mut column = value / char_width;
            if value % char_width > 0 {
                column += 1;
            }
            scroll.char_position = column as usize;
            scroll.char_offset = 0;
        }
        HorizontalScrollUnit::Pixel => {
            scroll.char_position = (value / char_width) as usize;
            scroll.char_offset = value % char_width;
        }
    }
}
