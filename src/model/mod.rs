//! Code area model - the complete state of the widget
//!
//! [`CodeArea`] owns the data source, caret, selection, scroll position and
//! every display setting. Geometry is never stored: it is derived on demand
//! from [`CodeArea::layout_inputs`] through a memoizing
//! [`LayoutCache`](crate::layout::LayoutCache).

pub mod caret;
pub mod movement;
pub mod selection;
pub mod settings;

pub use caret::{
    BlinkTimer, CaretPosition, CursorRenderingMode, CursorShape, Section,
    DEFAULT_BLINK_INTERVAL, INSERT_CURSOR_WIDTH,
};
pub use movement::{compute_move_position, MovementDirection};
pub use selection::{update_selection, Selection, SelectionRange};
pub use settings::{BackgroundPaintMode, EditationMode, ViewMode};

use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::code_type::{CodeCharactersCase, CodeType, PositionCodeType};
use crate::codec::{codec_for_name, TextCodec, Utf8Codec};
use crate::data::{BinaryData, ByteArrayData};
use crate::error::{CodeAreaError, Result};
use crate::events::{CodeAreaEvents, DataChange};
use crate::layout::mapper::{self, PositionOverflowMode};
use crate::layout::{
    FontMetrics, Grouping, Insets, LayoutCache, LayoutGeometry, LayoutInputs, MetricsSnapshot,
    RowNumberLength, RowWrapping, ScrollBarVisibility, DEFAULT_SCROLLBAR_SIZE,
};
use crate::scroll::{self, ScrollDirection, ScrollPosition, ScrollUnits, WHEEL_SCROLL_ROWS};
use crate::view::highlight::SearchHighlight;

pub const DEFAULT_BYTES_PER_ROW: usize = 16;

/// Hex/binary code area widget state
pub struct CodeArea {
    data: Box<dyn BinaryData>,
    codec: Box<dyn TextCodec>,

    caret: CaretPosition,
    selection: Option<Selection>,
    scroll: ScrollPosition,
    blink: BlinkTimer,

    code_type: CodeType,
    view_mode: ViewMode,
    editation_mode: EditationMode,
    code_characters_case: CodeCharactersCase,
    position_code_type: PositionCodeType,
    row_wrapping: RowWrapping,
    bytes_per_row: usize,
    max_bytes_per_row: usize,
    wrapping_group_size: usize,
    grouping: Grouping,
    row_number_length: RowNumberLength,
    row_shift: usize,
    show_header: bool,
    show_shadow_cursor: bool,
    show_non_ascii: bool,
    background_mode: BackgroundPaintMode,
    cursor_rendering_mode: CursorRenderingMode,
    vertical_scrollbar: ScrollBarVisibility,
    horizontal_scrollbar: ScrollBarVisibility,
    scroll_units: ScrollUnits,

    width: i32,
    height: i32,
    insets: Insets,
    metrics: MetricsSnapshot,
    scrollbar_size: i32,

    layout: LayoutCache,
    search: SearchHighlight,
    events: CodeAreaEvents,
}

impl std::fmt::Debug for CodeArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeArea")
            .field("data_size", &self.data.size())
            .field("charset", &self.codec.name())
            .field("caret", &self.caret)
            .field("selection", &self.selection)
            .field("scroll", &self.scroll)
            .field("code_type", &self.code_type)
            .field("view_mode", &self.view_mode)
            .field("editation_mode", &self.editation_mode)
            .finish_non_exhaustive()
    }
}

impl Default for CodeArea {
    fn default() -> Self {
        CodeArea::new(Box::new(ByteArrayData::default()))
    }
}

impl CodeArea {
    pub fn new(data: Box<dyn BinaryData>) -> Self {
        let mut blink = BlinkTimer::default();
        blink.restart(Instant::now());
        Self {
            data,
            codec: Box::new(Utf8Codec),
            caret: CaretPosition::default(),
            selection: None,
            scroll: ScrollPosition::default(),
            blink,
            code_type: CodeType::default(),
            view_mode: ViewMode::default(),
            editation_mode: EditationMode::default(),
            code_characters_case: CodeCharactersCase::default(),
            position_code_type: PositionCodeType::default(),
            row_wrapping: RowWrapping::default(),
            bytes_per_row: DEFAULT_BYTES_PER_ROW,
            max_bytes_per_row: 0,
            wrapping_group_size: 1,
            grouping: Grouping::default(),
            row_number_length: RowNumberLength::default(),
            row_shift: 0,
            show_header: true,
            show_shadow_cursor: true,
            show_non_ascii: false,
            background_mode: BackgroundPaintMode::default(),
            cursor_rendering_mode: CursorRenderingMode::default(),
            vertical_scrollbar: ScrollBarVisibility::default(),
            horizontal_scrollbar: ScrollBarVisibility::default(),
            scroll_units: ScrollUnits::default(),
            width: 0,
            height: 0,
            insets: Insets::default(),
            metrics: MetricsSnapshot::default(),
            scrollbar_size: DEFAULT_SCROLLBAR_SIZE,
            layout: LayoutCache::new(),
            search: SearchHighlight::new(),
            events: CodeAreaEvents::default(),
        }
    }

    /// Code area over an in-memory copy of `bytes`
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        CodeArea::new(Box::new(ByteArrayData::new(bytes.into())))
    }

    // =========================================================================
    // Data
    // =========================================================================

    pub fn data(&self) -> &dyn BinaryData {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> &mut dyn BinaryData {
        self.data.as_mut()
    }

    pub fn data_size(&self) -> u64 {
        self.data.size()
    }

    /// Swaps the data source; caret, selection and scroll are reset
    pub fn set_data(&mut self, data: Box<dyn BinaryData>) {
        self.data = data;
        let data_size = self.data.size();
        tracing::info!(data_size, "data source replaced");
        self.layout.invalidate();
        self.reset_position();
        self.events
            .data_changed
            .emit(&DataChange::Replaced { data_size });
    }

    /// Called after bytes were mutated through [`data_mut`](Self::data_mut)
    pub fn notify_data_modified(&mut self) {
        let data_size = self.data.size();
        self.clamp_to_data();
        self.events
            .data_changed
            .emit(&DataChange::Modified { data_size });
    }

    /// Forces caret, selection and scroll into range for the current data
    /// size
    pub fn clamp_to_data(&mut self) {
        let size = self.data.size();
        let caret = self.caret.normalized(size, self.code_type, self.view_mode);
        self.set_caret_internal(caret);
        let selection = self.selection.and_then(|s| s.clamped(size));
        self.set_selection_internal(selection);
        let scroll = self.scroll;
        self.set_scroll_internal(scroll);
    }

    pub fn codec(&self) -> &dyn TextCodec {
        self.codec.as_ref()
    }

    pub fn charset(&self) -> &str {
        self.codec.name()
    }

    /// Selects a built-in charset by name
    pub fn set_charset(&mut self, name: &str) -> Result<()> {
        self.codec = codec_for_name(name)?;
        Ok(())
    }

    pub fn set_codec(&mut self, codec: Box<dyn TextCodec>) {
        self.codec = codec;
    }

    // =========================================================================
    // Caret
    // =========================================================================

    pub fn caret(&self) -> CaretPosition {
        self.caret
    }

    pub fn active_section(&self) -> Section {
        self.caret.section
    }

    /// Moves the caret without touching the selection
    pub fn set_caret_position(&mut self, caret: CaretPosition) {
        let caret = caret.normalized(self.data.size(), self.code_type, self.view_mode);
        self.set_caret_internal(caret);
    }

    fn set_caret_internal(&mut self, caret: CaretPosition) {
        self.blink.restart(Instant::now());
        if caret != self.caret {
            tracing::debug!(
                position = caret.data_position,
                offset = caret.code_offset,
                section = ?caret.section,
                "caret moved"
            );
            self.caret = caret;
            self.events.caret_moved.emit(&self.caret);
        }
    }

    /// One caret step, optionally extending the selection, then scrolls the
    /// caret into view
    pub fn move_caret(&mut self, direction: MovementDirection, extend: bool) {
        let geometry = self.geometry();
        let from = self.caret;
        let to = compute_move_position(from, direction, &geometry);
        if direction != MovementDirection::SwitchSection {
            let selection =
                update_selection(self.selection, from.data_position, to.data_position, extend);
            self.set_selection_internal(selection);
        }
        self.set_caret_internal(to);
        self.reveal_caret();
    }

    /// Caret to the point `x`/`y`; with `extend` the selection grows from
    /// the previous caret position
    pub fn click(&mut self, x: i32, y: i32, extend: bool) {
        self.pointer_to(x, y, extend, PositionOverflowMode::Clamp);
    }

    /// Pointer dragged to `x`/`y` with the button held
    pub fn drag(&mut self, x: i32, y: i32) {
        self.pointer_to(x, y, true, PositionOverflowMode::Overflow);
    }

    fn pointer_to(&mut self, x: i32, y: i32, extend: bool, overflow: PositionOverflowMode) {
        let geometry = self.geometry();
        let from = self.caret;
        let to = mapper::pixel_to_position(&geometry, &self.scroll, x, y, overflow);
        let selection = update_selection(self.selection, from.data_position, to.data_position, extend);
        self.set_selection_internal(selection);
        self.set_caret_internal(to);
        self.reveal_caret();
    }

    /// Caret to the start, no selection, no scroll
    pub fn reset_position(&mut self) {
        self.set_selection_internal(None);
        let section = match self.view_mode {
            ViewMode::TextPreviewOnly => Section::TextPreview,
            _ => Section::CodeMatrix,
        };
        self.set_caret_internal(CaretPosition::at(0, section));
        self.set_scroll_internal(ScrollPosition::default());
    }

    pub fn cursor_shape(&self) -> CursorShape {
        match self.editation_mode {
            EditationMode::Insert => CursorShape::Insert,
            _ => CursorShape::Overwrite,
        }
    }

    // =========================================================================
    // Blink
    // =========================================================================

    pub fn is_cursor_visible(&self) -> bool {
        self.blink.is_visible()
    }

    /// Advances the blink timer; true when the caret needs a repaint
    pub fn poll_blink(&mut self, now: Instant) -> bool {
        self.blink.poll(now)
    }

    pub fn next_blink_deadline(&self) -> Option<Instant> {
        self.blink.next_deadline()
    }

    pub fn blink_interval(&self) -> Duration {
        self.blink.interval()
    }

    /// `Duration::ZERO` keeps the caret permanently visible
    pub fn set_blink_interval(&mut self, interval: Duration) {
        self.blink.set_interval(interval, Instant::now());
    }

    /// Stops blinking for good; call when the widget is torn down
    pub fn shutdown(&mut self) {
        self.blink.cancel();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selection(&self) -> Option<SelectionRange> {
        self.selection.map(|s| s.range())
    }

    pub fn selection_state(&self) -> Option<Selection> {
        self.selection
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    /// Selects `range` (or clears with `None`); the caret is not moved
    pub fn set_selection(&mut self, range: Option<SelectionRange>) -> Result<()> {
        if let Some(range) = range {
            if range.last >= self.data.size() {
                return Err(CodeAreaError::invalid_argument(format!(
                    "selection {}..={} exceeds data size {}",
                    range.first,
                    range.last,
                    self.data.size()
                )));
            }
        }
        self.set_selection_internal(range.map(Selection::from_range));
        Ok(())
    }

    pub fn select_all(&mut self) {
        let size = self.data.size();
        self.set_selection_internal(Selection::new(0, size));
    }

    pub fn clear_selection(&mut self) {
        self.set_selection_internal(None);
    }

    fn set_selection_internal(&mut self, selection: Option<Selection>) {
        let old_range = self.selection.map(|s| s.range());
        self.selection = selection;
        let new_range = self.selection.map(|s| s.range());
        if old_range != new_range {
            tracing::debug!(selection = ?new_range, "selection changed");
            self.events.selection_changed.emit(&new_range);
        }
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    pub fn scroll_position(&self) -> ScrollPosition {
        self.scroll
    }

    pub fn set_scroll_position(&mut self, scroll: ScrollPosition) {
        self.set_scroll_internal(scroll);
    }

    fn set_scroll_internal(&mut self, scroll: ScrollPosition) {
        let geometry = self.geometry();
        let scroll = geometry.normalize_scroll(scroll);
        if scroll != self.scroll {
            self.scroll = scroll;
            self.events.scrolled.emit(&self.scroll);
        }
    }

    pub fn scroll(&mut self, direction: ScrollDirection) {
        let geometry = self.geometry();
        let target = scroll::compute_scrolling(
            self.scroll,
            direction,
            &geometry.max_scroll,
            geometry.rows_per_page,
            geometry.scroll_rows,
        );
        self.set_scroll_internal(target);
    }

    /// Mouse wheel: positive `notches` scroll down
    pub fn wheel_scroll(&mut self, notches: i32) {
        let rows = notches.unsigned_abs() as u64 * WHEEL_SCROLL_ROWS;
        let mut target = self.scroll;
        if notches >= 0 {
            target.row_position = target.row_position.saturating_add(rows);
        } else {
            target.row_position = target.row_position.saturating_sub(rows);
            if target.row_position == 0 {
                target.row_offset = 0;
            }
        }
        self.set_scroll_internal(target);
    }

    /// Row and column of the caret cell
    fn caret_cell(&self, geometry: &LayoutGeometry) -> (u64, usize) {
        let structure = &geometry.structure;
        let (row, byte) = structure.row_and_byte(self.caret.data_position, geometry.row_shift);
        let column = structure.caret_column(byte, self.caret.code_offset, self.caret.section);
        (row, column)
    }

    /// Minimal scroll that brings the caret into full view
    pub fn reveal_caret(&mut self) {
        let geometry = self.geometry();
        if !geometry.metrics.is_initialized() {
            return;
        }
        let (row, column) = self.caret_cell(&geometry);
        if let Some(target) = scroll::reveal_scroll_position(
            &self.scroll,
            row,
            column,
            &geometry.viewport(),
            geometry.scroll_units,
        ) {
            self.set_scroll_internal(target);
        }
    }

    pub fn center_on_caret(&mut self) {
        let geometry = self.geometry();
        if !geometry.metrics.is_initialized() {
            return;
        }
        let (row, column) = self.caret_cell(&geometry);
        let target = scroll::center_scroll_position(
            &self.scroll,
            row,
            column,
            &geometry.viewport(),
            &geometry.max_scroll,
            geometry.scroll_units,
        );
        self.set_scroll_internal(target);
    }

    pub fn vertical_scroll_value(&self) -> i32 {
        let geometry = self.geometry();
        scroll::vertical_scroll_value(
            &geometry.normalize_scroll(self.scroll),
            geometry.row_height(),
            geometry.max_scroll.row_position,
            self.scroll_units.vertical,
        )
    }

    pub fn set_vertical_scroll_value(&mut self, value: i32) {
        let geometry = self.geometry();
        let mut target = geometry.normalize_scroll(self.scroll);
        scroll::apply_vertical_scroll_value(
            &mut target,
            value,
            geometry.row_height(),
            geometry.max_scroll.row_position,
            self.scroll_units.vertical,
        );
        self.set_scroll_internal(target);
    }

    pub fn horizontal_scroll_value(&self) -> i32 {
        scroll::horizontal_scroll_value(
            &self.scroll,
            self.metrics.char_width,
            self.scroll_units.horizontal,
        )
    }

    pub fn set_horizontal_scroll_value(&mut self, value: i32) {
        let mut target = self.scroll;
        scroll::apply_horizontal_scroll_value(
            &mut target,
            value,
            self.metrics.char_width,
            self.scroll_units.horizontal,
        );
        self.set_scroll_internal(target);
    }

    // =========================================================================
    // Layout
    // =========================================================================

    pub fn layout_inputs(&self) -> LayoutInputs {
        LayoutInputs {
            width: self.width,
            height: self.height,
            insets: self.insets,
            metrics: self.metrics,
            data_size: self.data.size(),
            row_shift: self.row_shift,
            code_type: self.code_type,
            view_mode: self.view_mode,
            row_wrapping: self.row_wrapping,
            bytes_per_row: self.bytes_per_row,
            max_bytes_per_row: self.max_bytes_per_row,
            wrapping_group_size: self.wrapping_group_size,
            grouping: self.grouping,
            row_number_length: self.row_number_length,
            position_code_type: self.position_code_type,
            show_header: self.show_header,
            vertical_scrollbar: self.vertical_scrollbar,
            horizontal_scrollbar: self.horizontal_scrollbar,
            scrollbar_size: self.scrollbar_size,
            scroll_units: self.scroll_units,
        }
    }

    /// Current geometry, recomputed only when a layout input changed
    pub fn geometry(&self) -> Rc<LayoutGeometry> {
        self.layout.get(&self.layout_inputs())
    }

    /// Drops the memoized geometry
    pub fn invalidate_layout(&self) {
        self.layout.invalidate();
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        self.after_layout_change();
    }

    pub fn set_insets(&mut self, insets: Insets) {
        self.insets = insets;
        self.after_layout_change();
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics
    }

    pub fn set_font_metrics(&mut self, metrics: &dyn FontMetrics) {
        self.metrics = MetricsSnapshot::capture(metrics);
        self.after_layout_change();
    }

    pub fn set_scrollbar_size(&mut self, size: i32) -> Result<()> {
        if size < 0 {
            return Err(CodeAreaError::invalid_argument(
                "scrollbar size cannot be negative",
            ));
        }
        self.scrollbar_size = size;
        self.after_layout_change();
        Ok(())
    }

    /// Re-clamps the scroll position after geometry inputs changed
    fn after_layout_change(&mut self) {
        let scroll = self.scroll;
        self.set_scroll_internal(scroll);
    }

    fn after_structure_change(&mut self) {
        let caret = self.caret;
        self.set_caret_position(caret);
        self.after_layout_change();
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub fn code_type(&self) -> CodeType {
        self.code_type
    }

    pub fn set_code_type(&mut self, code_type: CodeType) {
        self.code_type = code_type;
        self.after_structure_change();
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
        self.after_structure_change();
    }

    pub fn editation_mode(&self) -> EditationMode {
        self.editation_mode
    }

    pub fn set_editation_mode(&mut self, mode: EditationMode) {
        if mode != self.editation_mode {
            tracing::debug!(?mode, "editation mode changed");
            self.editation_mode = mode;
            self.events.editation_mode_changed.emit(&self.editation_mode);
        }
    }

    /// Insert key: insert ⇄ overwrite
    pub fn toggle_editation_mode(&mut self) {
        self.set_editation_mode(self.editation_mode.toggled());
    }

    pub fn is_editable(&self) -> bool {
        self.editation_mode.is_editable()
    }

    pub fn code_characters_case(&self) -> CodeCharactersCase {
        self.code_characters_case
    }

    pub fn set_code_characters_case(&mut self, case: CodeCharactersCase) {
        self.code_characters_case = case;
    }

    pub fn position_code_type(&self) -> PositionCodeType {
        self.position_code_type
    }

    pub fn set_position_code_type(&mut self, code_type: PositionCodeType) {
        self.position_code_type = code_type;
        self.after_layout_change();
    }

    pub fn row_wrapping(&self) -> RowWrapping {
        self.row_wrapping
    }

    pub fn set_row_wrapping(&mut self, wrapping: RowWrapping) {
        self.row_wrapping = wrapping;
        self.after_structure_change();
    }

    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    /// Bytes per row in fixed mode; must be at least 1
    pub fn set_bytes_per_row(&mut self, bytes_per_row: usize) -> Result<()> {
        if bytes_per_row == 0 {
            return Err(CodeAreaError::invalid_argument(
                "bytes per row must be at least 1",
            ));
        }
        if self.row_shift >= bytes_per_row {
            return Err(CodeAreaError::invalid_argument(format!(
                "row shift {} must stay below bytes per row {}",
                self.row_shift, bytes_per_row
            )));
        }
        self.bytes_per_row = bytes_per_row;
        self.after_structure_change();
        Ok(())
    }

    pub fn max_bytes_per_row(&self) -> usize {
        self.max_bytes_per_row
    }

    /// 0 removes the cap
    pub fn set_max_bytes_per_row(&mut self, max: usize) {
        self.max_bytes_per_row = max;
        self.after_structure_change();
    }

    pub fn wrapping_group_size(&self) -> usize {
        self.wrapping_group_size
    }

    pub fn set_wrapping_group_size(&mut self, size: usize) -> Result<()> {
        if size == 0 {
            return Err(CodeAreaError::invalid_argument(
                "wrapping group size must be at least 1",
            ));
        }
        self.wrapping_group_size = size;
        self.after_structure_change();
        Ok(())
    }

    pub fn grouping(&self) -> Grouping {
        self.grouping
    }

    /// Group sizes of 0 disable that separator
    pub fn set_grouping(&mut self, grouping: Grouping) {
        self.grouping = grouping;
        self.after_structure_change();
    }

    pub fn row_number_length(&self) -> RowNumberLength {
        self.row_number_length
    }

    pub fn set_row_number_length(&mut self, length: RowNumberLength) -> Result<()> {
        if length == RowNumberLength::Specified(0) {
            return Err(CodeAreaError::invalid_argument(
                "row number length must be at least 1",
            ));
        }
        self.row_number_length = length;
        self.after_layout_change();
        Ok(())
    }

    /// Row shift in effect, reduced below the current bytes per row
    pub fn row_shift(&self) -> usize {
        self.geometry().row_shift
    }

    /// Shifts row boundaries; must be below bytes per row
    pub fn set_row_shift(&mut self, shift: usize) -> Result<()> {
        let bytes_per_row = self.geometry().bytes_per_row();
        if shift >= bytes_per_row {
            return Err(CodeAreaError::invalid_argument(format!(
                "row shift {} must stay below bytes per row {}",
                shift, bytes_per_row
            )));
        }
        self.row_shift = shift;
        self.after_layout_change();
        Ok(())
    }

    pub fn show_header(&self) -> bool {
        self.show_header
    }

    pub fn set_show_header(&mut self, show: bool) {
        self.show_header = show;
        self.after_layout_change();
    }

    pub fn show_shadow_cursor(&self) -> bool {
        self.show_shadow_cursor
    }

    pub fn set_show_shadow_cursor(&mut self, show: bool) {
        self.show_shadow_cursor = show;
    }

    pub fn show_non_ascii(&self) -> bool {
        self.show_non_ascii
    }

    pub fn set_show_non_ascii(&mut self, show: bool) {
        self.show_non_ascii = show;
    }

    pub fn background_mode(&self) -> BackgroundPaintMode {
        self.background_mode
    }

    pub fn set_background_mode(&mut self, mode: BackgroundPaintMode) {
        self.background_mode = mode;
    }

    pub fn cursor_rendering_mode(&self) -> CursorRenderingMode {
        self.cursor_rendering_mode
    }

    pub fn set_cursor_rendering_mode(&mut self, mode: CursorRenderingMode) {
        self.cursor_rendering_mode = mode;
    }

    pub fn scrollbar_visibility(&self) -> (ScrollBarVisibility, ScrollBarVisibility) {
        (self.vertical_scrollbar, self.horizontal_scrollbar)
    }

    pub fn set_scrollbar_visibility(
        &mut self,
        vertical: ScrollBarVisibility,
        horizontal: ScrollBarVisibility,
    ) {
        self.vertical_scrollbar = vertical;
        self.horizontal_scrollbar = horizontal;
        self.after_layout_change();
    }

    pub fn scroll_units(&self) -> ScrollUnits {
        self.scroll_units
    }

    pub fn set_scroll_units(&mut self, units: ScrollUnits) {
        self.scroll_units = units;
        let mut scroll = self.scroll;
        if units.vertical == scroll::VerticalScrollUnit::Row {
            scroll.row_offset = 0;
        }
        if units.horizontal == scroll::HorizontalScrollUnit::Character {
            scroll.char_offset = 0;
        }
        self.set_scroll_internal(scroll);
    }

    // =========================================================================
    // Highlighting and events
    // =========================================================================

    pub fn search_highlight(&self) -> &SearchHighlight {
        &self.search
    }

    pub fn search_highlight_mut(&mut self) -> &mut SearchHighlight {
        &mut self.search
    }

    pub fn events(&self) -> &CodeAreaEvents {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut CodeAreaEvents {
        &mut self.events
    }
}
