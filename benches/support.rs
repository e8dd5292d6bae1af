//! Shared helpers for benchmarks

use codearea::layout::{FixedFontMetrics, LayoutInputs, MetricsSnapshot, RowWrapping};
use codearea::model::CodeArea;

pub const METRICS: FixedFontMetrics = FixedFontMetrics::new(8, 14);

/// 1920x1080 window
pub const WIDTH: i32 = 1920;
pub const HEIGHT: i32 = 1080;

/// Create a code area over `size` bytes of repeating sample data
#[allow(dead_code)]
pub fn make_area(size: usize) -> CodeArea {
    let text = b"The quick brown fox jumps over the lazy dog.\n\x00\x01\x7f\x80\xff";
    let bytes: Vec<u8> = text.iter().copied().cycle().take(size).collect();
    let mut area = CodeArea::with_bytes(bytes);
    area.set_font_metrics(&METRICS);
    area.resize(WIDTH, HEIGHT);
    area
}

/// Layout inputs for `data_size` bytes in a full-HD window
#[allow(dead_code)]
pub fn make_inputs(data_size: u64, wrapping: RowWrapping) -> LayoutInputs {
    LayoutInputs {
        width: WIDTH,
        height: HEIGHT,
        metrics: MetricsSnapshot::capture(&METRICS),
        data_size,
        row_wrapping: wrapping,
        ..LayoutInputs::default()
    }
}
