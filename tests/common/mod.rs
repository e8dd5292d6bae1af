//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use codearea::clipboard::{ClipboardContent, ClipboardProvider, MemoryClipboard};
use codearea::commands::Cmd;
use codearea::data::BinaryData;
use codearea::error::{CodeAreaError, Result};
use codearea::handler::DefaultCommandHandler;
use codearea::layout::{
    compute_layout, FixedFontMetrics, LayoutGeometry, LayoutInputs, MetricsSnapshot,
    SUB_FONT_SPACE,
};
use codearea::messages::Msg;
use codearea::model::CodeArea;
use codearea::theme::ColorProfile;
use codearea::update::update;
use codearea::view::painter::RecordingPainter;
use codearea::view::CodeAreaPainter;

/// 8 px wide characters, 14 px font: header is 21 px, rows are 17 px
pub const METRICS: FixedFontMetrics = FixedFontMetrics::new(8, 14);

pub const HEADER_HEIGHT: i32 = 21;
pub const ROW_HEIGHT: i32 = 17;

/// Component size fitting a dual view of 16 bytes per row and ten rows
pub const WIDTH: i32 = 800;
pub const HEIGHT: i32 = HEADER_HEIGHT + 10 * ROW_HEIGHT;

/// Code area over `bytes`, sized and measured like a small window
pub fn area_with_bytes(bytes: impl Into<Vec<u8>>) -> CodeArea {
    sized_area(bytes, WIDTH, HEIGHT)
}

pub fn sized_area(bytes: impl Into<Vec<u8>>, width: i32, height: i32) -> CodeArea {
    let mut area = CodeArea::with_bytes(bytes);
    area.set_font_metrics(&METRICS);
    area.resize(width, height);
    area
}

/// Code area over `count` bytes counting up from 0 and wrapping at 256
pub fn area_with_sequence(count: usize) -> CodeArea {
    area_with_bytes((0..count).map(|i| i as u8).collect::<Vec<_>>())
}

/// Geometry for default settings over `data_size` bytes
pub fn geometry_for(data_size: u64, width: i32, height: i32) -> LayoutGeometry {
    compute_layout(&inputs_for(data_size, width, height))
}

pub fn inputs_for(data_size: u64, width: i32, height: i32) -> LayoutInputs {
    LayoutInputs {
        width,
        height,
        metrics: MetricsSnapshot::capture(&METRICS),
        data_size,
        ..LayoutInputs::default()
    }
}

pub fn test_handler() -> DefaultCommandHandler {
    DefaultCommandHandler::new(Box::new(MemoryClipboard::new()))
}

/// Handler whose clipboard already holds `text` without a binary payload
pub fn handler_with_text(text: &str) -> DefaultCommandHandler {
    let mut handler = test_handler();
    handler
        .clipboard_mut()
        .set_contents(ClipboardContent::text(text))
        .expect("memory clipboard accepts content");
    handler
}

pub fn clipboard_content(handler: &mut DefaultCommandHandler) -> ClipboardContent {
    handler
        .clipboard_mut()
        .contents()
        .expect("memory clipboard is available")
}

/// All bytes of the area's data source
pub fn bytes_of(area: &CodeArea) -> Vec<u8> {
    area.data()
        .copy(0, area.data_size())
        .expect("whole-range copy succeeds")
}

/// Send one message through the update loop
pub fn send(area: &mut CodeArea, handler: &mut DefaultCommandHandler, msg: Msg) -> Option<Cmd> {
    update(area, handler, msg)
}

/// Type every character of `text` through the update loop
pub fn type_text(area: &mut CodeArea, handler: &mut DefaultCommandHandler, text: &str) {
    for ch in text.chars() {
        update(area, handler, Msg::key_typed(ch));
    }
}

/// Full paint of `area` with the default profile into a fresh recording
pub fn paint(area: &CodeArea) -> RecordingPainter {
    paint_with(area, ColorProfile::default())
}

pub fn paint_with(area: &CodeArea, colors: ColorProfile) -> RecordingPainter {
    let mut painter = CodeAreaPainter::new(colors);
    let mut recording = RecordingPainter::new();
    painter
        .paint(area, &METRICS, &mut recording)
        .expect("paint succeeds with initialized metrics");
    recording
}

/// Baseline of visible row `row` with no scrolling
pub fn row_baseline(row: i32) -> i32 {
    HEADER_HEIGHT + (row + 1) * ROW_HEIGHT - SUB_FONT_SPACE
}

/// Read-only data source of `size` zero bytes that allocates nothing
#[derive(Debug, Clone, Copy)]
pub struct ZeroData {
    pub size: u64,
}

impl BinaryData for ZeroData {
    fn size(&self) -> u64 {
        self.size
    }

    fn byte_at(&self, position: u64) -> Result<u8> {
        if position >= self.size {
            return Err(out_of_range(position, self.size));
        }
        Ok(0)
    }

    fn copy_to_slice(&self, position: u64, target: &mut [u8]) -> Result<()> {
        let end = position.checked_add(target.len() as u64);
        if end.map_or(true, |end| end > self.size) {
            return Err(out_of_range(position, self.size));
        }
        target.fill(0);
        Ok(())
    }
}

fn out_of_range(position: u64, size: u64) -> CodeAreaError {
    CodeAreaError::broken_data(format!("position {} past end of {} zero bytes", position, size))
}
