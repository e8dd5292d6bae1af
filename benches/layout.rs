//! Benchmarks for layout computation and coordinate mapping
//!
//! Run with: cargo bench layout

mod support;
use support::{make_area, make_inputs};

use codearea::code_type::CodeType;
use codearea::layout::mapper::{pixel_to_position, position_to_pixel};
use codearea::layout::{compute_layout, Grouping, PositionOverflowMode, RowWrapping, VisibleRange};
use codearea::model::{CaretPosition, Section};
use codearea::scroll::ScrollPosition;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

// ============================================================================
// Geometry
// ============================================================================

#[divan::bench(args = [0, 4096, 1 << 20, 1 << 40, u64::MAX / 2])]
fn compute_fixed_rows(data_size: u64) {
    let inputs = make_inputs(data_size, RowWrapping::Fixed);
    divan::black_box(compute_layout(divan::black_box(&inputs)));
}

#[divan::bench(args = [4096, 1 << 20, 1 << 40])]
fn compute_wrapped_rows(data_size: u64) {
    let inputs = make_inputs(data_size, RowWrapping::Wrap);
    divan::black_box(compute_layout(divan::black_box(&inputs)));
}

#[divan::bench]
fn compute_wrapped_binary_grouped() {
    let mut inputs = make_inputs(1 << 20, RowWrapping::Wrap);
    inputs.code_type = CodeType::Binary;
    inputs.grouping = Grouping::new(2, 8);
    divan::black_box(compute_layout(divan::black_box(&inputs)));
}

#[divan::bench]
fn memoized_geometry(bencher: divan::Bencher) {
    let area = make_area(1 << 16);
    area.geometry();
    bencher.bench_local(|| divan::black_box(area.geometry()));
}

#[divan::bench]
fn visible_range(bencher: divan::Bencher) {
    let geometry = compute_layout(&make_inputs(1 << 30, RowWrapping::Fixed));
    let scroll = ScrollPosition::new(1 << 20, 0);
    bencher.bench_local(|| VisibleRange::compute(&geometry, divan::black_box(&scroll)));
}

// ============================================================================
// Coordinate mapping
// ============================================================================

#[divan::bench]
fn pixel_to_position_full_view(bencher: divan::Bencher) {
    let area = make_area(1 << 16);
    let geometry = area.geometry();
    let scroll = area.scroll_position();
    let view = geometry.data_view;

    bencher.bench_local(|| {
        for y in (view.y..view.bottom()).step_by(17) {
            for x in (view.x..view.right()).step_by(8) {
                divan::black_box(pixel_to_position(
                    &geometry,
                    &scroll,
                    x,
                    y,
                    PositionOverflowMode::Clamp,
                ));
            }
        }
    });
}

#[divan::bench]
fn position_to_pixel_full_page(bencher: divan::Bencher) {
    let mut area = make_area(1 << 16);
    area.set_scroll_position(ScrollPosition::new(100, 0));
    let geometry = area.geometry();
    let scroll = area.scroll_position();
    let first = 100 * geometry.bytes_per_row() as u64;
    let last = first + (geometry.rows_per_page * geometry.bytes_per_row()) as u64;

    bencher.bench_local(|| {
        for position in first..last {
            let caret = CaretPosition::new(position, 1, Section::CodeMatrix);
            divan::black_box(position_to_pixel(&geometry, &scroll, &caret));
        }
    });
}
