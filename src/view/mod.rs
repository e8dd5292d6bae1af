//! Render pipeline
//!
//! [`CodeAreaPainter`] paints a [`CodeArea`] through any [`Painter`] in
//! fixed passes:
//!
//! 1. component background and the corner separator
//! 2. header with column labels
//! 3. data view backgrounds: base, row stripes, selection, mirror
//!    selection and search matches
//! 4. row numbers
//! 5. code digits and preview characters
//! 6. cursor and shadow cursor
//! 7. scrollbar tracks
//!
//! Every pass only touches the rows and columns in the current
//! [`VisibleRange`]. Text is batched: consecutive cells are sent as one
//! `draw_text` call until the color, the printability of the character or
//! its rendered width changes.

pub mod frame;
pub mod highlight;
pub mod painter;

use std::ops::Range;
use std::rc::Rc;

pub use highlight::{ByteClass, SearchHighlight, SearchMatch};
pub use painter::{DrawCall, Painter, RecordingPainter};

use crate::codec::TextCodec;
use crate::commands::{Damage, DamageArea};
use crate::error::Result;
use crate::layout::mapper;
use crate::layout::{
    ColumnKind, FontMetrics, LayoutGeometry, Rect, VisibleRange, SUB_FONT_SPACE,
};
use crate::model::{
    BackgroundPaintMode, CaretPosition, CodeArea, CursorRenderingMode, CursorShape, Section,
    SelectionRange, ViewMode,
};
use crate::scroll::ScrollPosition;
use crate::theme::{Color, ColorProfile};

/// Drawn in place of characters that have no visible glyph
pub const UNPRINTABLE_PLACEHOLDER: char = '.';

/// Smallest scrollbar thumb length in pixels
const MIN_THUMB_SIZE: i32 = 16;

// ============================================================================
// Text runs
// ============================================================================

/// One grid cell as the text batcher sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    color: Color,
    printable: bool,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        color: Color::BLACK,
        printable: true,
    };
}

/// Sends `columns` of a line as batched text calls.
///
/// Leading blanks are skipped, inner blanks join the current run. A
/// character whose advance differs from the cell width is drawn on its own,
/// centered in its cell. Returns the number of draw calls issued.
fn draw_runs(
    painter: &mut dyn Painter,
    metrics: &dyn FontMetrics,
    origin_x: i32,
    baseline: i32,
    char_width: i32,
    columns: Range<usize>,
    mut cell_at: impl FnMut(usize) -> Cell,
) -> usize {
    let mut calls = 0;
    let mut run = String::new();
    let mut run_start = columns.start;
    let mut run_style: Option<(Color, bool)> = None;

    for column in columns {
        let cell = cell_at(column);
        if cell.ch == ' ' {
            if run.is_empty() {
                run_start = column + 1;
            } else {
                run.push(' ');
            }
            continue;
        }

        let native_width = metrics.advance(cell.ch) == char_width;
        let style = (cell.color, cell.printable);
        if !native_width || run_style != Some(style) {
            if let Some((color, _)) = run_style.take() {
                let x = origin_x + run_start as i32 * char_width;
                calls += flush_run(painter, &mut run, x, baseline, color);
            }
            run_start = column;
        }

        if !native_width {
            painter.draw_char_centered(
                origin_x + column as i32 * char_width,
                baseline,
                char_width,
                cell.ch,
                cell.color,
            );
            calls += 1;
            run_start = column + 1;
            continue;
        }

        run_style = Some(style);
        run.push(cell.ch);
    }

    if let Some((color, _)) = run_style {
        let x = origin_x + run_start as i32 * char_width;
        calls += flush_run(painter, &mut run, x, baseline, color);
    }
    calls
}

fn flush_run(
    painter: &mut dyn Painter,
    run: &mut String,
    x: i32,
    baseline: i32,
    color: Color,
) -> usize {
    let text = run.trim_end();
    let drawn = if text.is_empty() {
        0
    } else {
        painter.draw_text(x, baseline, text, color);
        1
    };
    run.clear();
    drawn
}

/// Fills consecutive columns that share a background override
fn fill_runs(
    painter: &mut dyn Painter,
    origin_x: i32,
    row_y: i32,
    char_width: i32,
    row_height: i32,
    columns: Range<usize>,
    mut color_at: impl FnMut(usize) -> Option<Color>,
) {
    let mut current: Option<(usize, Color)> = None;
    let end = columns.end;
    for column in columns {
        let color = color_at(column);
        match (current, color) {
            (Some((_, run_color)), Some(color)) if run_color == color => {}
            _ => {
                if let Some((start, run_color)) = current {
                    let rect = column_rect(origin_x, row_y, char_width, row_height, start..column);
                    painter.fill_rect(rect, run_color);
                }
                current = color.map(|color| (column, color));
            }
        }
    }
    if let Some((start, run_color)) = current {
        let rect = column_rect(origin_x, row_y, char_width, row_height, start..end);
        painter.fill_rect(rect, run_color);
    }
}

fn column_rect(
    origin_x: i32,
    row_y: i32,
    char_width: i32,
    row_height: i32,
    columns: Range<usize>,
) -> Rect {
    Rect::new(
        origin_x + columns.start as i32 * char_width,
        row_y,
        (columns.end - columns.start) as i32 * char_width,
        row_height,
    )
}

fn baseline(row_y: i32, row_height: i32) -> i32 {
    row_y + row_height - SUB_FONT_SPACE
}

// ============================================================================
// Painter state
// ============================================================================

/// Per-paint snapshot of everything the passes read
struct PaintContext<'a> {
    area: &'a CodeArea,
    geometry: Rc<LayoutGeometry>,
    metrics: &'a dyn FontMetrics,
    scroll: ScrollPosition,
    visible: VisibleRange,
    caret: CaretPosition,
    selection: Option<SelectionRange>,
    row_x: i32,
}

impl<'a> PaintContext<'a> {
    fn new(area: &'a CodeArea, metrics: &'a dyn FontMetrics) -> Self {
        let geometry = area.geometry();
        let scroll = area.scroll_position();
        let visible = VisibleRange::compute(&geometry, &scroll);
        let row_x = VisibleRange::row_x(&geometry, &scroll);
        Self {
            area,
            metrics,
            scroll,
            visible,
            caret: area.caret(),
            selection: area.selection(),
            row_x,
            geometry,
        }
    }

    fn row_y(&self, row: u64) -> i32 {
        VisibleRange::row_y(&self.geometry, &self.scroll, row)
    }

    fn char_width(&self) -> i32 {
        self.geometry.char_width()
    }

    fn row_height(&self) -> i32 {
        self.geometry.row_height()
    }

    fn is_selected(&self, position: i128) -> bool {
        position >= 0
            && self
                .selection
                .is_some_and(|range| range.contains(position as u64))
    }

    fn is_striped(&self, row: u64) -> bool {
        self.area.background_mode() == BackgroundPaintMode::Striped
            && row % 2 == 1
            && row < self.geometry.rows_per_document
    }
}

/// Decode table of the single-byte charset it was built for
struct CharTable {
    charset: String,
    table: [char; 256],
}

/// Paints a [`CodeArea`] with one [`ColorProfile`].
///
/// Keeps the row read buffer and the decode table of single-byte charsets
/// between paints.
pub struct CodeAreaPainter {
    colors: ColorProfile,
    row_data: Vec<u8>,
    row_chars: Vec<Cell>,
    char_table: Option<CharTable>,
}

impl CodeAreaPainter {
    pub fn new(colors: ColorProfile) -> Self {
        Self {
            colors,
            row_data: Vec::new(),
            row_chars: Vec::new(),
            char_table: None,
        }
    }

    pub fn colors(&self) -> &ColorProfile {
        &self.colors
    }

    pub fn set_colors(&mut self, colors: ColorProfile) {
        self.colors = colors;
    }

    /// Paints the whole component
    pub fn paint(
        &mut self,
        area: &CodeArea,
        metrics: &dyn FontMetrics,
        painter: &mut dyn Painter,
    ) -> Result<()> {
        let ctx = PaintContext::new(area, metrics);
        if !ctx.geometry.metrics.is_initialized() {
            return Ok(());
        }

        self.paint_outside(&ctx, painter);
        self.paint_header(&ctx, painter);
        self.paint_background(&ctx, painter);
        self.paint_row_numbers(&ctx, painter);
        self.paint_rows(&ctx, painter)?;
        self.paint_cursor(&ctx, painter)?;
        self.paint_scrollbars(&ctx, painter);
        painter.set_clip(None);

        tracing::trace!(
            rows = ?ctx.visible.rows,
            columns = ?ctx.visible.columns,
            "code area painted"
        );
        Ok(())
    }

    /// Repaints only what `damage` names
    pub fn paint_damage(
        &mut self,
        area: &CodeArea,
        metrics: &dyn FontMetrics,
        painter: &mut dyn Painter,
        damage: &Damage,
    ) -> Result<()> {
        let areas = match damage {
            Damage::None => return Ok(()),
            Damage::Full => return self.paint(area, metrics, painter),
            Damage::Areas(areas) => areas,
        };

        let ctx = PaintContext::new(area, metrics);
        if !ctx.geometry.metrics.is_initialized() {
            return Ok(());
        }
        for damaged in areas {
            match damaged {
                DamageArea::DataView => {
                    self.paint_background(&ctx, painter);
                    self.paint_rows(&ctx, painter)?;
                    self.paint_cursor(&ctx, painter)?;
                }
                DamageArea::Cursor => self.paint_cursor_rows(&ctx, painter)?,
                DamageArea::Header => self.paint_header(&ctx, painter),
                DamageArea::RowNumbers => self.paint_row_numbers(&ctx, painter),
                DamageArea::Scrollbars => self.paint_scrollbars(&ctx, painter),
            }
        }
        painter.set_clip(None);
        Ok(())
    }

    // =========================================================================
    // Passes
    // =========================================================================

    fn paint_outside(&mut self, ctx: &PaintContext, painter: &mut dyn Painter) {
        let geometry = &ctx.geometry;
        painter.set_clip(None);
        painter.fill_rect(geometry.component, self.colors.background);

        // separator under the top-left corner
        let header = geometry.header;
        if !header.is_empty() {
            let corner = Rect::new(
                geometry.row_numbers.x,
                header.bottom() - 1,
                geometry.row_numbers.width,
                1,
            );
            painter.fill_rect(corner, self.colors.decoration_line);
        }
    }

    fn paint_header(&mut self, ctx: &PaintContext, painter: &mut dyn Painter) {
        let geometry = &ctx.geometry;
        let header = geometry.header;
        if header.is_empty() {
            return;
        }
        painter.set_clip(Some(header));
        painter.fill_rect(header, self.colors.header_background);

        let structure = &geometry.structure;
        if structure.view_mode.shows_code() {
            let labels = header_labels(ctx);
            let columns = ctx.visible.columns.start.min(labels.len())
                ..ctx.visible.columns.end.min(labels.len());
            let color = self.colors.header_text;
            draw_runs(
                painter,
                ctx.metrics,
                ctx.row_x,
                baseline(header.y, ctx.row_height()),
                ctx.char_width(),
                columns,
                |column| Cell {
                    ch: labels[column],
                    color,
                    printable: true,
                },
            );
        }

        let line = Rect::new(header.x, header.bottom() - 1, header.width, 1);
        painter.fill_rect(line, self.colors.decoration_line);
    }

    fn paint_background(&mut self, ctx: &PaintContext, painter: &mut dyn Painter) {
        let view = ctx.geometry.data_view;
        if view.is_empty() {
            return;
        }
        painter.set_clip(Some(view));
        if ctx.area.background_mode() != BackgroundPaintMode::Transparent {
            painter.fill_rect(view, self.colors.background);
        }
        for row in ctx.visible.rows.clone() {
            self.paint_row_background(ctx, painter, row, false);
        }
    }

    /// Stripe and override backgrounds of one row; `fill_base` also repaints
    /// the plain background underneath
    fn paint_row_background(
        &self,
        ctx: &PaintContext,
        painter: &mut dyn Painter,
        row: u64,
        fill_base: bool,
    ) {
        let view = ctx.geometry.data_view;
        let row_y = ctx.row_y(row);
        let row_rect = Rect::new(view.x, row_y, view.width, ctx.row_height());
        if fill_base && ctx.area.background_mode() != BackgroundPaintMode::Transparent {
            painter.fill_rect(row_rect, self.colors.background);
        }
        if ctx.is_striped(row) {
            painter.fill_rect(row_rect, self.colors.alternate_background);
        }

        let structure = &ctx.geometry.structure;
        let row_start = structure.row_start(row, ctx.geometry.row_shift);
        let byte_background = |byte: usize, section: Section| {
            self.position_background(ctx, row_start + byte as i128, section)
        };
        fill_runs(
            painter,
            ctx.row_x,
            row_y,
            ctx.char_width(),
            ctx.row_height(),
            ctx.visible.columns.clone(),
            |column| match structure.column_kind(column) {
                ColumnKind::Code { byte, .. } => byte_background(byte, Section::CodeMatrix),
                ColumnKind::CodeGap { byte } => {
                    // only gaps between two equally colored bytes
                    let color = byte_background(byte, Section::CodeMatrix);
                    if color == byte_background(byte + 1, Section::CodeMatrix) {
                        color
                    } else {
                        None
                    }
                }
                ColumnKind::SectionGap => None,
                ColumnKind::Preview { byte } => byte_background(byte, Section::TextPreview),
            },
        );
    }

    /// Background override for a data position, `None` for the base color
    fn position_background(
        &self,
        ctx: &PaintContext,
        position: i128,
        section: Section,
    ) -> Option<Color> {
        if position < 0 || position >= ctx.geometry.data_size as i128 {
            return None;
        }
        if ctx.is_selected(position) {
            return Some(if section == ctx.caret.section {
                self.colors.selection_background
            } else {
                self.colors.mirror_selection_background
            });
        }
        ctx.area
            .search_highlight()
            .background(position as u64, &self.colors)
    }

    fn paint_row_numbers(&mut self, ctx: &PaintContext, painter: &mut dyn Painter) {
        let geometry = &ctx.geometry;
        let area_rect = geometry.row_numbers;
        if area_rect.is_empty() {
            return;
        }
        painter.set_clip(Some(area_rect));
        painter.fill_rect(area_rect, self.colors.row_number_background);

        let char_width = ctx.char_width();
        let row_height = ctx.row_height();
        let case = ctx.area.code_characters_case();
        let digits = geometry.row_number_digits;
        let mut label = vec!['0'; digits];
        for row in ctx.visible.rows.clone() {
            if row >= geometry.rows_per_document {
                break;
            }
            let row_y = ctx.row_y(row);
            if ctx.is_striped(row) {
                let stripe = Rect::new(area_rect.x, row_y, area_rect.width, row_height);
                painter.fill_rect(stripe, self.colors.alternate_background);
            }

            let position = geometry.structure.row_start(row, geometry.row_shift).max(0) as u64;
            geometry
                .position_code_type
                .format_into(position, case, &mut label);
            let color = self.colors.row_number_text;
            draw_runs(
                painter,
                ctx.metrics,
                area_rect.x,
                baseline(row_y, row_height),
                char_width,
                0..digits,
                |i| Cell {
                    ch: label[i],
                    color,
                    printable: true,
                },
            );
        }

        let line_x = area_rect.right() - char_width / 2;
        if line_x >= area_rect.x {
            let view = geometry.data_view;
            painter.fill_rect(
                Rect::new(line_x, view.y, 1, view.height),
                self.colors.decoration_line,
            );
        }
    }

    fn paint_rows(&mut self, ctx: &PaintContext, painter: &mut dyn Painter) -> Result<()> {
        let view = ctx.geometry.data_view;
        if view.is_empty() {
            return Ok(());
        }
        painter.set_clip(Some(view));

        let structure = &ctx.geometry.structure;
        if structure.view_mode == ViewMode::Dual {
            let line_x = ctx.row_x + structure.preview_char_pos as i32 * ctx.char_width()
                - ctx.char_width() / 2;
            if line_x >= view.x {
                painter.fill_rect(
                    Rect::new(line_x, view.y, 1, view.height),
                    self.colors.decoration_line,
                );
            }
        }

        self.prepare_codec(ctx.area.codec());
        for row in ctx.visible.rows.clone() {
            self.paint_row_text(ctx, painter, row)?;
        }
        Ok(())
    }

    /// Reads one row plus the tail a multi-byte character may need, fills
    /// the visible cells and draws them.
    fn paint_row_text(
        &mut self,
        ctx: &PaintContext,
        painter: &mut dyn Painter,
        row: u64,
    ) -> Result<()> {
        let geometry = &ctx.geometry;
        let structure = &geometry.structure;
        let area = ctx.area;
        let codec = area.codec();
        let bytes_per_row = structure.bytes_per_row;
        let max_bytes_per_char = codec.max_bytes_per_char().max(1);
        let read_length = bytes_per_row + max_bytes_per_char - 1;

        let row_start = structure.row_start(row, geometry.row_shift);
        let data_size = geometry.data_size as i128;
        let skip = if row_start < 0 {
            ((-row_start) as usize).min(bytes_per_row)
        } else {
            0
        };
        let read_from = row_start.max(0);
        let available = (data_size - read_from).clamp(0, (read_length - skip) as i128) as usize;

        self.row_data.clear();
        self.row_data.resize(read_length, 0);
        if available > 0 {
            area.data()
                .copy_to_slice(read_from as u64, &mut self.row_data[skip..skip + available])?;
        }
        let data_end = skip + available;
        let row_end = data_end.min(bytes_per_row);

        self.row_chars.clear();
        self.row_chars.resize(structure.chars_per_row, Cell::BLANK);

        let selection_color = |section: Section| {
            if section == ctx.caret.section {
                self.colors.selection_color
            } else {
                self.colors.mirror_selection_color
            }
        };

        let mut digits = ['0'; 8];
        let case = area.code_characters_case();
        let show_non_ascii = area.show_non_ascii();
        let code_bytes = ctx.visible.code_bytes.start.max(skip)..ctx.visible.code_bytes.end.min(row_end);
        for byte in code_bytes {
            let value = self.row_data[byte];
            let color = if ctx.is_selected(row_start + byte as i128) {
                selection_color(Section::CodeMatrix)
            } else if show_non_ascii {
                ByteClass::of(value)
                    .color(&self.colors)
                    .unwrap_or(self.colors.text_color)
            } else {
                self.colors.text_color
            };
            structure.code_type.byte_to_chars(value, case, &mut digits);
            let first = structure.char_pos(byte);
            for (offset, &ch) in digits.iter().take(structure.digits()).enumerate() {
                self.row_chars[first + offset] = Cell {
                    ch,
                    color,
                    printable: true,
                };
            }
        }

        if structure.view_mode.shows_preview() {
            let preview_bytes =
                ctx.visible.preview_bytes.start.max(skip)..ctx.visible.preview_bytes.end.min(row_end);
            for byte in preview_bytes {
                let decoded = self.decode_at(codec, &self.row_data[byte..data_end]);
                let printable = decoded.is_some_and(|ch| !ch.is_control());
                let ch = match decoded {
                    Some(ch) if printable => ch,
                    _ => UNPRINTABLE_PLACEHOLDER,
                };
                let color = if ctx.is_selected(row_start + byte as i128) {
                    selection_color(Section::TextPreview)
                } else {
                    self.colors.text_color
                };
                self.row_chars[structure.preview_char_pos + byte] = Cell {
                    ch,
                    color,
                    printable,
                };
            }
        }

        let row_chars = &self.row_chars;
        draw_runs(
            painter,
            ctx.metrics,
            ctx.row_x,
            baseline(ctx.row_y(row), ctx.row_height()),
            ctx.char_width(),
            ctx.visible.columns.clone(),
            |column| row_chars[column],
        );
        Ok(())
    }

    /// Repaints the caret row (and so the cell under the caret) then the
    /// cursor, for blink ticks
    fn paint_cursor_rows(&mut self, ctx: &PaintContext, painter: &mut dyn Painter) -> Result<()> {
        let view = ctx.geometry.data_view;
        if view.is_empty() {
            return Ok(());
        }
        let (row, _) = ctx
            .geometry
            .structure
            .row_and_byte(ctx.caret.data_position, ctx.geometry.row_shift);
        if ctx.visible.rows.contains(&row) {
            painter.set_clip(Some(view));
            self.paint_row_background(ctx, painter, row, true);
            self.prepare_codec(ctx.area.codec());
            self.paint_row_text(ctx, painter, row)?;
        }
        self.paint_cursor(ctx, painter)
    }

    fn paint_cursor(&mut self, ctx: &PaintContext, painter: &mut dyn Painter) -> Result<()> {
        let geometry = &ctx.geometry;
        let view = geometry.data_view;
        let area = ctx.area;
        let shape = area.cursor_shape();

        if area.is_cursor_visible() {
            let cursor = mapper::caret_rect(geometry, &ctx.scroll, &ctx.caret, shape);
            if let Some((cell, rect)) = cursor.and_then(|cell| Some((cell, cell.intersection(&view)?)))
            {
                painter.set_clip(Some(rect));
                match area.cursor_rendering_mode() {
                    CursorRenderingMode::Paint => painter.fill_rect(rect, self.colors.cursor_color),
                    CursorRenderingMode::Xor => painter.xor_rect(rect, self.colors.cursor_color),
                    CursorRenderingMode::Negative => {
                        painter.fill_rect(rect, self.colors.cursor_color);
                        if shape == CursorShape::Overwrite {
                            if let Some(ch) = self.char_under_caret(area, &ctx.caret)? {
                                painter.draw_char_centered(
                                    cell.x,
                                    baseline(cell.y, ctx.row_height()),
                                    ctx.char_width(),
                                    ch,
                                    self.colors.cursor_negative_color,
                                );
                            }
                        }
                    }
                }
            }
        }

        if geometry.structure.view_mode == ViewMode::Dual && area.show_shadow_cursor() {
            let mirror = mapper::mirror_rect(geometry, &ctx.scroll, &ctx.caret);
            if let Some(rect) = mirror.filter(|rect| rect.intersection(&view).is_some()) {
                painter.set_clip(Some(view));
                painter.draw_dashed_rect(rect, self.colors.cursor_color);
            }
        }
        Ok(())
    }

    /// Character drawn inside an overwrite cursor, `None` past the end
    fn char_under_caret(&mut self, area: &CodeArea, caret: &CaretPosition) -> Result<Option<char>> {
        let position = caret.data_position;
        let data_size = area.data_size();
        if position >= data_size {
            return Ok(None);
        }
        match caret.section {
            Section::CodeMatrix => {
                let value = area.data().byte_at(position)?;
                let mut digits = ['0'; 8];
                area.code_type()
                    .byte_to_chars(value, area.code_characters_case(), &mut digits);
                Ok(digits.get(caret.code_offset).copied())
            }
            Section::TextPreview => {
                let codec = area.codec();
                let length = (codec.max_bytes_per_char().max(1) as u64).min(data_size - position);
                let bytes = area.data().copy(position, length)?;
                self.prepare_codec(codec);
                let ch = self
                    .decode_at(codec, &bytes)
                    .filter(|ch| !ch.is_control())
                    .unwrap_or(UNPRINTABLE_PLACEHOLDER);
                Ok(Some(ch))
            }
        }
    }

    fn paint_scrollbars(&mut self, ctx: &PaintContext, painter: &mut dyn Painter) {
        let geometry = &ctx.geometry;
        let track_color = self.colors.alternate_background;
        let thumb_color = self.colors.decoration_line;

        if let Some(track) = geometry.vertical_scrollbar {
            painter.set_clip(Some(track));
            painter.fill_rect(track, track_color);
            let (offset, length) = thumb_span(
                track.height,
                geometry.scroll_rows as u128,
                geometry.rows_per_page as u128,
                ctx.scroll.row_position as u128,
                geometry.max_scroll.row_position as u128,
            );
            painter.fill_rect(
                Rect::new(track.x + 2, track.y + offset, track.width - 4, length),
                thumb_color,
            );
        }

        if let Some(track) = geometry.horizontal_scrollbar {
            painter.set_clip(Some(track));
            painter.fill_rect(track, track_color);
            let (offset, length) = thumb_span(
                track.width,
                geometry.structure.chars_per_row as u128,
                geometry.chars_per_page as u128,
                ctx.scroll.char_position as u128,
                geometry.max_scroll.char_position as u128,
            );
            painter.fill_rect(
                Rect::new(track.x + offset, track.y + 2, length, track.height - 4),
                thumb_color,
            );
        }
    }

    // =========================================================================
    // Decoding
    // =========================================================================

    /// Builds the decode table when the charset is single-byte and changed
    fn prepare_codec(&mut self, codec: &dyn TextCodec) {
        let current = self.char_table.as_ref().map(|t| t.charset.as_str());
        if current == Some(codec.name()) {
            return;
        }
        self.char_table = codec.single_byte_table().map(|table| CharTable {
            charset: codec.name().to_string(),
            table,
        });
        tracing::debug!(charset = codec.name(), "preview codec prepared");
    }

    /// Character starting at `bytes[0]`
    fn decode_at(&self, codec: &dyn TextCodec, bytes: &[u8]) -> Option<char> {
        let first = *bytes.first()?;
        match &self.char_table {
            Some(table) if table.charset == codec.name() => Some(table.table[first as usize]),
            _ => codec.decode_char(bytes).map(|(ch, _)| ch),
        }
    }
}

impl Default for CodeAreaPainter {
    fn default() -> Self {
        CodeAreaPainter::new(ColorProfile::default())
    }
}

/// Header characters for the code columns of a row.
///
/// Each byte gets its index in the position code type, at least two digits
/// wide, starting at its first code column. A label that would touch the
/// previous one is skipped.
fn header_labels(ctx: &PaintContext) -> Vec<char> {
    let geometry = &ctx.geometry;
    let structure = &geometry.structure;
    let case = ctx.area.code_characters_case();
    let width = geometry
        .position_code_type
        .digits_for(structure.bytes_per_row as u64 - 1)
        .max(2);

    let mut labels = vec![' '; structure.code_chars];
    let mut label = vec!['0'; width];
    let mut next_free = 0;
    for byte in 0..structure.bytes_per_row {
        let column = structure.char_pos(byte);
        if column < next_free {
            continue;
        }
        geometry
            .position_code_type
            .format_into(byte as u64, case, &mut label);
        for (i, &ch) in label.iter().enumerate() {
            if let Some(slot) = labels.get_mut(column + i) {
                *slot = ch;
            }
        }
        next_free = column + width + 1;
    }
    labels
}

/// Offset and length of a scrollbar thumb along a track of `track` pixels
fn thumb_span(track: i32, total: u128, page: u128, position: u128, max: u128) -> (i32, i32) {
    if track <= 0 || total == 0 || page >= total {
        return (0, track.max(0));
    }
    let length = ((track as u128 * page / total) as i32)
        .max(MIN_THUMB_SIZE)
        .min(track);
    let room = (track - length) as u128;
    let offset = if max == 0 {
        0
    } else {
        (room * position.min(max) / max) as i32
    };
    (offset, length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_type::CodeType;
    use crate::layout::{FixedFontMetrics, Grouping};

    const METRICS: FixedFontMetrics = FixedFontMetrics::new(8, 14);

    // header is 21px high, first row baseline at 21 + 17 - 3
    const FIRST_BASELINE: i32 = 35;

    fn area(bytes: Vec<u8>) -> CodeArea {
        let mut area = CodeArea::with_bytes(bytes);
        area.set_font_metrics(&METRICS);
        area.resize(800, 21 + 10 * 17);
        area
    }

    fn paint(area: &CodeArea) -> RecordingPainter {
        let mut painter = RecordingPainter::new();
        CodeAreaPainter::default()
            .paint(area, &METRICS, &mut painter)
            .unwrap();
        painter
    }

    /// Grid text runs of the first row, without the row number
    fn first_row_runs(area: &CodeArea, painter: &RecordingPainter) -> Vec<String> {
        let data_x = area.geometry().data_view.x;
        painter
            .texts_at(FIRST_BASELINE)
            .into_iter()
            .filter(|(x, _)| *x >= data_x)
            .map(|(_, text)| text.to_string())
            .collect()
    }

    #[test]
    fn test_uniform_row_is_one_run() {
        let area = area(b"ABCDEFGHIJKLMNOP".to_vec());
        let painter = paint(&area);
        assert_eq!(area.geometry().data_view.x, 24);
        assert_eq!(
            first_row_runs(&area, &painter),
            vec!["41 42 43 44 45 46 47 48 49 4A 4B 4C 4D 4E 4F 50 ABCDEFGHIJKLMNOP"]
        );
    }

    #[test]
    fn test_unprintable_breaks_run() {
        let area = area(vec![b'A', 0x00, b'B']);
        let painter = paint(&area);
        // code columns end at 8, the preview starts at column 48
        let code_and_a = format!("41 00 42{}A", " ".repeat(40));
        assert_eq!(
            first_row_runs(&area, &painter),
            vec![code_and_a, ".".to_string(), "B".to_string()]
        );
    }

    #[test]
    fn test_selection_colors_break_runs() {
        let mut area = area(vec![0x11; 4]);
        area.set_selection(Some(SelectionRange::new(1, 2))).unwrap();
        let painter = paint(&area);
        let colors = ColorProfile::default();
        let x = area.geometry().data_view.x;

        assert!(painter.texts().contains(&("11 11", colors.selection_color)));
        // gap between the selected bytes is filled, the one after is not
        assert!(painter
            .fills_with(colors.selection_background)
            .contains(&Rect::new(x + 3 * 8, 21, 5 * 8, 17)));
        // the preview mirrors a code matrix selection
        assert!(painter
            .fills_with(colors.mirror_selection_background)
            .contains(&Rect::new(x + 49 * 8, 21, 16, 17)));
    }

    #[test]
    fn test_header_labels_skip_touching_columns() {
        let mut area = area(vec![0; 4]);
        area.set_grouping(Grouping::NONE);
        let painter = paint(&area);
        let x = area.geometry().data_view.x;
        let header_baseline = 17 - 3;
        assert_eq!(
            painter.texts_at(header_baseline),
            vec![(x, "00  02  04  06  08  0A  0C  0E")]
        );
    }

    #[test]
    fn test_row_numbers_use_position_digits() {
        let area = area(vec![0; 40]);
        let painter = paint(&area);
        // 40 bytes need two hex digits; rows at 0x00, 0x10, 0x20
        let numbers: Vec<_> = painter
            .calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { x: 0, text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec!["00", "10", "20"]);
    }

    #[test]
    fn test_wide_char_drawn_centered() {
        let mut area = area("漢".as_bytes().to_vec());
        area.set_view_mode(ViewMode::TextPreviewOnly);
        area.set_cursor_rendering_mode(CursorRenderingMode::Paint);
        let painter = paint(&area);
        assert_eq!(
            painter.count(|call| matches!(call, DrawCall::CenteredChar { ch: '漢', .. })),
            1
        );
    }

    #[test]
    fn test_non_ascii_highlight() {
        let mut area = area(vec![0x41, 0x90]);
        area.set_show_non_ascii(true);
        let painter = paint(&area);
        let colors = ColorProfile::default();
        let runs = painter.texts();
        assert!(runs.contains(&("41", colors.text_color)));
        assert!(runs.contains(&("90", colors.above_ascii_color)));
    }

    #[test]
    fn test_negative_cursor_redraws_digit() {
        let mut area = area(vec![0xAB]);
        area.set_code_type(CodeType::Hexadecimal);
        let painter = paint(&area);
        let colors = ColorProfile::default();
        let x = area.geometry().data_view.x;
        assert!(painter
            .fills_with(colors.cursor_color)
            .contains(&Rect::new(x, 21, 8, 17)));
        assert!(painter.calls.contains(&DrawCall::CenteredChar {
            x,
            baseline: FIRST_BASELINE,
            cell_width: 8,
            ch: 'A',
            color: colors.cursor_negative_color,
        }));
        // shadow cursor over the preview cell
        assert_eq!(
            painter.count(|call| matches!(call, DrawCall::DashedRect { .. })),
            1
        );
    }

    #[test]
    fn test_cursor_damage_repaints_caret_row_only() {
        let area = area(vec![b'0'; 64]);
        let mut painter = RecordingPainter::new();
        CodeAreaPainter::default()
            .paint_damage(&area, &METRICS, &mut painter, &Damage::cursor())
            .unwrap();
        assert_eq!(painter.texts().len(), 1);
    }

    #[test]
    fn test_uninitialized_metrics_paint_nothing() {
        let area = CodeArea::with_bytes(vec![1, 2, 3]);
        let painter = paint(&area);
        assert!(painter.calls.is_empty());
    }

    #[test]
    fn test_thumb_span() {
        assert_eq!(thumb_span(100, 10, 20, 0, 0), (0, 100));
        assert_eq!(thumb_span(100, 1000, 10, 0, 990), (0, 16));
        assert_eq!(thumb_span(100, 1000, 10, 990, 990), (84, 16));
    }
}
