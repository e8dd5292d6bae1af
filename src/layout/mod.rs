//! Viewport layout
//!
//! All geometry is derived functionally from a [`LayoutInputs`] value:
//! `compute_layout(&inputs)` is pure, and [`LayoutCache`] memoizes the last
//! result until the inputs change or it is explicitly invalidated. Painting,
//! hit testing and scrolling all read the same immutable [`LayoutGeometry`]
//! snapshot.

pub mod mapper;
pub mod metrics;
pub mod structure;
pub mod visibility;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::code_type::{CodeType, PositionCodeType};
use crate::model::ViewMode;
use crate::scroll::{self, ScrollPosition, ScrollUnits, ScrollViewport};

pub use mapper::{PositionOverflowMode, Zone};
pub use metrics::{FixedFontMetrics, FontMetrics, MetricsSnapshot, SUB_FONT_SPACE};
pub use structure::{ColumnKind, Grouping, RowStructure};
pub use visibility::VisibleRange;

/// Default width of host scrollbars in pixels
pub const DEFAULT_SCROLLBAR_SIZE: i32 = 14;

/// Recompute passes when showing one scrollbar changes whether the other
/// one is needed
const MAX_SCROLLBAR_PASSES: usize = 3;

// ============================================================================
// Primitives
// ============================================================================

/// Integer pixel rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        let rect = Rect::new(x, y, right - x, bottom - y);
        (!rect.is_empty()).then_some(rect)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Border reserved around the component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

// ============================================================================
// Layout settings
// ============================================================================

/// Whether bytes per row is fixed or derived from the available width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowWrapping {
    #[default]
    Fixed,
    Wrap,
}

/// Digit count of the row-number column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowNumberLength {
    /// Enough digits for the largest position of the data
    #[default]
    Auto,
    Specified(usize),
}

impl RowNumberLength {
    /// `0` means automatic
    pub fn from_config(length: usize) -> Self {
        if length == 0 {
            RowNumberLength::Auto
        } else {
            RowNumberLength::Specified(length)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBarVisibility {
    Never,
    Always,
    #[default]
    IfNeeded,
}

// ============================================================================
// Inputs and geometry
// ============================================================================

/// Everything layout depends on. Equal inputs always produce equal geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutInputs {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub metrics: MetricsSnapshot,
    pub data_size: u64,
    pub row_shift: usize,
    pub code_type: CodeType,
    pub view_mode: ViewMode,
    pub row_wrapping: RowWrapping,
    /// Bytes per row in [`RowWrapping::Fixed`] mode
    pub bytes_per_row: usize,
    /// Upper bound in [`RowWrapping::Wrap`] mode, 0 for none
    pub max_bytes_per_row: usize,
    pub wrapping_group_size: usize,
    pub grouping: Grouping,
    pub row_number_length: RowNumberLength,
    pub position_code_type: PositionCodeType,
    pub show_header: bool,
    pub vertical_scrollbar: ScrollBarVisibility,
    pub horizontal_scrollbar: ScrollBarVisibility,
    pub scrollbar_size: i32,
    pub scroll_units: ScrollUnits,
}

impl Default for LayoutInputs {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            insets: Insets::default(),
            metrics: MetricsSnapshot::default(),
            data_size: 0,
            row_shift: 0,
            code_type: CodeType::default(),
            view_mode: ViewMode::default(),
            row_wrapping: RowWrapping::default(),
            bytes_per_row: 16,
            max_bytes_per_row: 0,
            wrapping_group_size: 1,
            grouping: Grouping::default(),
            row_number_length: RowNumberLength::default(),
            position_code_type: PositionCodeType::default(),
            show_header: true,
            vertical_scrollbar: ScrollBarVisibility::default(),
            horizontal_scrollbar: ScrollBarVisibility::default(),
            scrollbar_size: DEFAULT_SCROLLBAR_SIZE,
            scroll_units: ScrollUnits::default(),
        }
    }
}

/// Immutable geometry snapshot of the code area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutGeometry {
    pub structure: RowStructure,
    pub metrics: MetricsSnapshot,
    pub data_size: u64,
    pub row_shift: usize,
    pub rows_per_document: u64,
    /// Rows the scroll range covers; one more than `rows_per_document` when
    /// the end-of-data caret position starts a new row
    pub scroll_rows: u64,
    pub row_number_digits: usize,
    pub position_code_type: PositionCodeType,

    pub component: Rect,
    pub header: Rect,
    pub row_numbers: Rect,
    /// Scrollable area holding the grid, excluding scrollbars
    pub data_view: Rect,
    pub vertical_scrollbar: Option<Rect>,
    pub horizontal_scrollbar: Option<Rect>,

    pub rows_per_page: usize,
    pub rows_per_rect: usize,
    pub chars_per_page: usize,
    pub chars_per_rect: usize,
    /// Pixels of a partially visible last column
    pub last_char_offset: i32,
    /// Pixels of a partially visible last row
    pub last_row_offset: i32,

    pub max_scroll: ScrollPosition,
    pub vertical_max_mode: bool,
    pub scroll_units: ScrollUnits,
}

impl LayoutGeometry {
    pub fn bytes_per_row(&self) -> usize {
        self.structure.bytes_per_row
    }

    pub fn chars_per_row(&self) -> usize {
        self.structure.chars_per_row
    }

    pub fn char_width(&self) -> i32 {
        self.metrics.char_width
    }

    pub fn row_height(&self) -> i32 {
        self.metrics.row_height
    }

    pub fn viewport(&self) -> ScrollViewport {
        ScrollViewport {
            rows_per_page: self.rows_per_page,
            rows_per_rect: self.rows_per_rect,
            chars_per_page: self.chars_per_page,
            chars_per_rect: self.chars_per_rect,
            view_width: self.data_view.width,
            view_height: self.data_view.height,
            char_width: self.metrics.char_width,
            row_height: self.metrics.row_height,
        }
    }

    /// Clamps `scroll` into range and stamps the max-mode flag and row shift
    pub fn normalize_scroll(&self, scroll: ScrollPosition) -> ScrollPosition {
        let mut out = scroll.clamped_to(&self.max_scroll);
        out.vertical_max_mode = self.vertical_max_mode;
        out.row_byte_shift = self.row_shift;
        out
    }
}

// ============================================================================
// Computation
// ============================================================================

/// Sizes that depend on which scrollbars are shown
struct Pass {
    structure: RowStructure,
    inner: Rect,
    row_numbers_width: i32,
    header_height: i32,
    data_view_width: i32,
    data_view_height: i32,
    chars_per_page: usize,
}

fn row_number_digits(inputs: &LayoutInputs) -> usize {
    match inputs.row_number_length {
        RowNumberLength::Auto => inputs.position_code_type.digits_for(inputs.data_size),
        RowNumberLength::Specified(digits) => digits.max(1),
    }
}

fn per_rect(length: i32, cell: i32) -> usize {
    if cell <= 0 || length <= 0 {
        0
    } else {
        ((length + cell - 1) / cell) as usize
    }
}

fn per_page(length: i32, cell: i32) -> usize {
    if cell <= 0 || length <= 0 {
        0
    } else {
        (length / cell) as usize
    }
}

fn compute_pass(inputs: &LayoutInputs, digits: usize, vertical: bool, horizontal: bool) -> Pass {
    let metrics = &inputs.metrics;
    let inner = Rect::new(
        inputs.insets.left,
        inputs.insets.top,
        (inputs.width - inputs.insets.left - inputs.insets.right).max(0),
        (inputs.height - inputs.insets.top - inputs.insets.bottom).max(0),
    );
    let row_numbers_width = metrics.char_width * (digits as i32 + 1);
    let header_height = if inputs.show_header {
        metrics.font_height + metrics.font_height / 4
    } else {
        0
    };
    let vertical_size = if vertical { inputs.scrollbar_size } else { 0 };
    let horizontal_size = if horizontal { inputs.scrollbar_size } else { 0 };
    let data_view_width = inner.width - row_numbers_width - vertical_size;
    let data_view_height = inner.height - header_height - horizontal_size;
    let chars_per_page = per_page(data_view_width, metrics.char_width);

    let bytes_per_row = match inputs.row_wrapping {
        RowWrapping::Fixed => inputs.bytes_per_row.max(1),
        RowWrapping::Wrap => RowStructure::fit_bytes_per_row(
            inputs.code_type,
            inputs.view_mode,
            inputs.grouping,
            chars_per_page,
            inputs.max_bytes_per_row,
            inputs.wrapping_group_size,
        ),
    };
    let structure = RowStructure::new(
        inputs.code_type,
        inputs.view_mode,
        bytes_per_row,
        inputs.grouping,
    );

    Pass {
        structure,
        inner,
        row_numbers_width,
        header_height,
        data_view_width,
        data_view_height,
        chars_per_page,
    }
}

fn needed_scrollbars(inputs: &LayoutInputs, pass: &Pass) -> (bool, bool) {
    let vertical = match inputs.vertical_scrollbar {
        ScrollBarVisibility::Always => true,
        ScrollBarVisibility::Never => false,
        ScrollBarVisibility::IfNeeded => {
            let structure = &pass.structure;
            let row_shift = structure.effective_shift(inputs.row_shift);
            let rows = structure.rows_per_document(inputs.data_size, row_shift);
            rows as u128 * inputs.metrics.row_height.max(0) as u128
                > pass.data_view_height.max(0) as u128
        }
    };
    let horizontal = match inputs.horizontal_scrollbar {
        ScrollBarVisibility::Always => true,
        ScrollBarVisibility::Never => false,
        ScrollBarVisibility::IfNeeded => {
            inputs.metrics.char_width > 0 && pass.structure.chars_per_row > pass.chars_per_page
        }
    };
    (vertical, horizontal)
}

/// Derives the full geometry for `inputs`.
///
/// Never fails: zero or negative sizes and uninitialized metrics produce a
/// geometry with empty rectangles and no visible rows.
pub fn compute_layout(inputs: &LayoutInputs) -> LayoutGeometry {
    let digits = row_number_digits(inputs);
    let mut flags = (
        inputs.vertical_scrollbar == ScrollBarVisibility::Always,
        inputs.horizontal_scrollbar == ScrollBarVisibility::Always,
    );
    let mut pass = compute_pass(inputs, digits, flags.0, flags.1);
    for _ in 0..MAX_SCROLLBAR_PASSES {
        let needed = needed_scrollbars(inputs, &pass);
        if needed == flags {
            break;
        }
        flags = needed;
        pass = compute_pass(inputs, digits, flags.0, flags.1);
    }
    let (vertical_visible, horizontal_visible) = flags;

    let metrics = inputs.metrics;
    let inner = pass.inner;
    let scrollbar_size = inputs.scrollbar_size;
    let vertical_size = if vertical_visible { scrollbar_size } else { 0 };
    let horizontal_size = if horizontal_visible { scrollbar_size } else { 0 };

    let available_width = pass.row_numbers_width + vertical_size <= inner.width;
    let available_height = pass.header_height + horizontal_size <= inner.height;

    let header = if available_width && inputs.show_header {
        Rect::new(
            inner.x + pass.row_numbers_width,
            inner.y,
            inner.width - pass.row_numbers_width - vertical_size,
            pass.header_height,
        )
    } else {
        Rect::default()
    };
    let row_numbers = if available_height {
        Rect::new(
            inner.x,
            inner.y + pass.header_height,
            pass.row_numbers_width,
            inner.height - pass.header_height - horizontal_size,
        )
    } else {
        Rect::default()
    };
    let data_view = Rect::new(
        inner.x + pass.row_numbers_width,
        inner.y + pass.header_height,
        pass.data_view_width.max(0),
        pass.data_view_height.max(0),
    );
    let vertical_scrollbar = vertical_visible.then(|| {
        Rect::new(
            inner.right() - scrollbar_size,
            data_view.y,
            scrollbar_size,
            data_view.height,
        )
    });
    let horizontal_scrollbar = horizontal_visible.then(|| {
        Rect::new(
            data_view.x,
            inner.bottom() - scrollbar_size,
            data_view.width,
            scrollbar_size,
        )
    });

    let structure = pass.structure;
    let row_shift = structure.effective_shift(inputs.row_shift);
    let rows_per_document = structure.rows_per_document(inputs.data_size, row_shift);
    let (caret_row, _) = structure.row_and_byte(inputs.data_size, row_shift);
    let scroll_rows = rows_per_document.max(caret_row.saturating_add(1));

    let data_view_width = pass.data_view_width.max(0);
    let data_view_height = pass.data_view_height.max(0);
    let initialized = metrics.is_initialized();
    let last_char_offset = if initialized {
        data_view_width % metrics.char_width
    } else {
        0
    };
    let last_row_offset = if initialized {
        data_view_height % metrics.row_height
    } else {
        0
    };

    let mut geometry = LayoutGeometry {
        structure,
        metrics,
        data_size: inputs.data_size,
        row_shift,
        rows_per_document,
        scroll_rows,
        row_number_digits: digits,
        position_code_type: inputs.position_code_type,
        component: Rect::new(0, 0, inputs.width.max(0), inputs.height.max(0)),
        header,
        row_numbers,
        data_view,
        vertical_scrollbar,
        horizontal_scrollbar,
        rows_per_page: per_page(data_view_height, metrics.row_height),
        rows_per_rect: per_rect(data_view_height, metrics.row_height),
        chars_per_page: per_page(data_view_width, metrics.char_width),
        chars_per_rect: per_rect(data_view_width, metrics.char_width),
        last_char_offset,
        last_row_offset,
        max_scroll: ScrollPosition::default(),
        vertical_max_mode: scroll::needs_vertical_max_mode(scroll_rows, metrics.row_height),
        scroll_units: inputs.scroll_units,
    };

    if initialized {
        let viewport = geometry.viewport();
        geometry.max_scroll = scroll::maximum_scroll_position(
            scroll_rows,
            structure.chars_per_row,
            &viewport,
            inputs.scroll_units,
        );
    }

    tracing::debug!(
        bytes_per_row = structure.bytes_per_row,
        rows = rows_per_document,
        rows_per_page = geometry.rows_per_page,
        vertical_scrollbar = vertical_visible,
        horizontal_scrollbar = horizontal_visible,
        "layout recomputed"
    );

    geometry
}

// ============================================================================
// Cache
// ============================================================================

/// Memoizes the last computed geometry, keyed by its inputs
#[derive(Debug, Default)]
pub struct LayoutCache {
    entry: RefCell<Option<(LayoutInputs, Rc<LayoutGeometry>)>>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Geometry for `inputs`, recomputed only when they differ from the
    /// last call or after [`invalidate`](Self::invalidate)
    pub fn get(&self, inputs: &LayoutInputs) -> Rc<LayoutGeometry> {
        if let Some((cached_inputs, geometry)) = self.entry.borrow().as_ref() {
            if cached_inputs == inputs {
                return Rc::clone(geometry);
            }
        }
        let geometry = Rc::new(compute_layout(inputs));
        *self.entry.borrow_mut() = Some((inputs.clone(), Rc::clone(&geometry)));
        geometry
    }

    pub fn invalidate(&self) {
        self.entry.borrow_mut().take();
    }

    pub fn is_cached(&self) -> bool {
        self.entry.borrow().is_some()
    }
}
