//! Render pipeline output captured through a recording painter

mod common;

use codearea::commands::{Damage, DamageArea};
use codearea::layout::{Rect, SUB_FONT_SPACE};
use codearea::model::{
    BackgroundPaintMode, CaretPosition, CursorRenderingMode, EditationMode, Section,
    SelectionRange, ViewMode,
};
use codearea::scroll::ScrollPosition;
use codearea::theme::ColorProfile;
use codearea::view::{CodeAreaPainter, DrawCall, RecordingPainter, SearchMatch};
use common::{
    area_with_bytes, area_with_sequence, paint, row_baseline, HEADER_HEIGHT, METRICS, ROW_HEIGHT,
};

const DATA_X: i32 = 24;

fn row_number_texts(recording: &RecordingPainter) -> Vec<String> {
    recording
        .calls
        .iter()
        .filter_map(|call| match call {
            DrawCall::Text { x: 0, text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn dashed_count(recording: &RecordingPainter) -> usize {
    recording.count(|call| matches!(call, DrawCall::DashedRect { .. }))
}

// ========================================================================
// Frame structure
// ========================================================================

#[test]
fn test_full_paint_starts_and_ends_unclipped() {
    let area = area_with_sequence(40);
    let recording = paint(&area);
    let colors = ColorProfile::default();

    assert_eq!(recording.calls.first(), Some(&DrawCall::Clip(None)));
    assert_eq!(
        recording.calls.get(1),
        Some(&DrawCall::FillRect {
            rect: area.geometry().component,
            color: colors.background,
        })
    );
    assert_eq!(recording.calls.last(), Some(&DrawCall::Clip(None)));
}

#[test]
fn test_rows_draw_code_then_preview() {
    let area = area_with_bytes(b"0123456789abcdefXY".to_vec());
    let recording = paint(&area);

    let first = recording.texts_at(row_baseline(0));
    assert_eq!(first[0], (0, "00"));
    assert_eq!(
        first[1],
        (
            DATA_X,
            "30 31 32 33 34 35 36 37 38 39 61 62 63 64 65 66 0123456789abcdef"
        )
    );

    let second = recording.texts_at(row_baseline(1));
    assert_eq!(second[0], (0, "10"));
    assert_eq!(second[1], (DATA_X, &*format!("58 59{}XY", " ".repeat(43))));
}

#[test]
fn test_scrolled_view_paints_scrolled_rows() {
    let mut area = area_with_bytes(vec![0; 4096]);
    area.set_scroll_position(ScrollPosition::new(100, 0));
    let recording = paint(&area);

    let numbers = row_number_texts(&recording);
    assert_eq!(numbers.first().map(String::as_str), Some("0640"));
    assert!(numbers.iter().all(|n| n.starts_with("06")), "{:?}", numbers);
    // the caret row is out of view, so no cursor is painted
    assert_eq!(
        recording.count(|call| matches!(call, DrawCall::CenteredChar { .. })),
        0
    );
}

#[test]
fn test_hidden_header_moves_rows_up() {
    let mut area = area_with_sequence(16);
    area.set_show_header(false);
    let recording = paint(&area);

    let first_baseline = ROW_HEIGHT - SUB_FONT_SPACE;
    let texts = recording.texts_at(first_baseline);
    assert_eq!(texts[0], (0, "00"));
    assert!(texts[1].1.starts_with("00 01 02"));
}

// ========================================================================
// Backgrounds
// ========================================================================

#[test]
fn test_striped_rows_inside_document_only() {
    let mut area = area_with_sequence(64);
    area.set_background_mode(BackgroundPaintMode::Striped);
    let recording = paint(&area);
    let colors = ColorProfile::default();
    let width = area.geometry().data_view.width;

    let stripes: Vec<Rect> = recording
        .fills_with(colors.alternate_background)
        .into_iter()
        .filter(|rect| rect.x == DATA_X)
        .collect();
    assert_eq!(
        stripes,
        vec![
            Rect::new(DATA_X, HEADER_HEIGHT + 17, width, 17),
            Rect::new(DATA_X, HEADER_HEIGHT + 3 * 17, width, 17),
        ]
    );
}

#[test]
fn test_search_matches_fill_both_sections() {
    let mut area = area_with_bytes(vec![0; 32]);
    area.search_highlight_mut()
        .set_matches(vec![SearchMatch::new(2, 3), SearchMatch::new(20, 2)]);
    area.search_highlight_mut().set_current(Some(1));
    let recording = paint(&area);
    let colors = ColorProfile::default();

    // bytes 2..=4 with the gaps between them, then their preview cells
    assert_eq!(
        recording.fills_with(colors.match_background),
        vec![
            Rect::new(DATA_X + 6 * 8, HEADER_HEIGHT, 8 * 8, 17),
            Rect::new(DATA_X + 50 * 8, HEADER_HEIGHT, 3 * 8, 17),
        ]
    );
    assert_eq!(
        recording.fills_with(colors.current_match_background),
        vec![
            Rect::new(DATA_X + 12 * 8, HEADER_HEIGHT + 17, 5 * 8, 17),
            Rect::new(DATA_X + 52 * 8, HEADER_HEIGHT + 17, 2 * 8, 17),
        ]
    );
}

#[test]
fn test_preview_selection_mirrors_into_code() {
    let mut area = area_with_sequence(32);
    area.set_caret_position(CaretPosition::at(6, Section::TextPreview));
    area.set_selection(Some(SelectionRange::new(4, 5))).unwrap();
    let recording = paint(&area);
    let colors = ColorProfile::default();

    assert_eq!(
        recording.fills_with(colors.selection_background),
        vec![Rect::new(DATA_X + 52 * 8, HEADER_HEIGHT, 2 * 8, 17)]
    );
    assert_eq!(
        recording.fills_with(colors.mirror_selection_background),
        vec![Rect::new(DATA_X + 12 * 8, HEADER_HEIGHT, 5 * 8, 17)]
    );
}

#[test]
fn test_vertical_thumb_tracks_scroll() {
    let mut area = area_with_bytes(vec![0; 4096]);
    let colors = ColorProfile::default();
    let track = area.geometry().vertical_scrollbar.expect("tall data");

    let thumb = |recording: &RecordingPainter| {
        recording
            .fills_with(colors.decoration_line)
            .into_iter()
            .find(|rect| rect.x == track.x + 2)
            .expect("thumb painted")
    };

    let recording = paint(&area);
    assert!(recording
        .fills_with(colors.alternate_background)
        .contains(&track));
    assert_eq!(thumb(&recording).y, track.y);

    let max = area.geometry().max_scroll;
    area.set_scroll_position(max);
    let recording = paint(&area);
    assert_eq!(thumb(&recording).bottom(), track.bottom());
}

// ========================================================================
// Cursor
// ========================================================================

#[test]
fn test_cursor_rendering_modes() {
    let caret_cell = Rect::new(DATA_X, HEADER_HEIGHT, 8, 17);
    let colors = ColorProfile::default();

    let mut area = area_with_bytes(vec![0xAB, 0xCD]);
    area.set_cursor_rendering_mode(CursorRenderingMode::Xor);
    let recording = paint(&area);
    assert!(recording.calls.contains(&DrawCall::XorRect {
        rect: caret_cell,
        color: colors.cursor_color,
    }));

    area.set_cursor_rendering_mode(CursorRenderingMode::Paint);
    let recording = paint(&area);
    assert!(recording.fills_with(colors.cursor_color).contains(&caret_cell));
    assert_eq!(
        recording.count(|call| matches!(call, DrawCall::CenteredChar { .. })),
        0
    );
}

#[test]
fn test_insert_mode_uses_thin_cursor() {
    let mut area = area_with_bytes(vec![0xAB]);
    area.set_editation_mode(EditationMode::Insert);
    let recording = paint(&area);
    let colors = ColorProfile::default();

    assert!(recording
        .fills_with(colors.cursor_color)
        .contains(&Rect::new(DATA_X, HEADER_HEIGHT, 2, 17)));
    // the negative digit is only drawn inside a full-cell cursor
    assert_eq!(
        recording.count(|call| matches!(call, DrawCall::CenteredChar { .. })),
        0
    );
}

#[test]
fn test_hidden_blink_phase_keeps_shadow_cursor() {
    let mut area = area_with_bytes(vec![0xAB]);
    let deadline = area.next_blink_deadline().expect("blinking by default");
    assert!(area.poll_blink(deadline));
    assert!(!area.is_cursor_visible());

    let recording = paint(&area);
    let colors = ColorProfile::default();
    assert!(!recording
        .fills_with(colors.cursor_color)
        .contains(&Rect::new(DATA_X, HEADER_HEIGHT, 8, 17)));
    assert_eq!(dashed_count(&recording), 1);
}

#[test]
fn test_shadow_cursor_only_in_dual_view() {
    let mut area = area_with_bytes(vec![1, 2, 3]);
    area.set_caret_position(CaretPosition::at(2, Section::TextPreview));
    let recording = paint(&area);
    assert!(recording.calls.contains(&DrawCall::DashedRect {
        rect: Rect::new(DATA_X + 6 * 8, HEADER_HEIGHT, 2 * 8, 17),
        color: ColorProfile::default().cursor_color,
    }));

    area.set_show_shadow_cursor(false);
    assert_eq!(dashed_count(&paint(&area)), 0);

    area.set_show_shadow_cursor(true);
    area.set_view_mode(ViewMode::CodeMatrixOnly);
    assert_eq!(dashed_count(&paint(&area)), 0);
}

// ========================================================================
// Preview decoding
// ========================================================================

#[test]
fn test_preview_follows_charset() {
    let mut area = area_with_bytes(vec![0xE9, b'a']);
    let preview_x = DATA_X + 48 * 8;

    // a lone 0xE9 is not UTF-8
    let recording = paint(&area);
    let texts = recording.texts_at(row_baseline(0));
    assert!(texts.contains(&(preview_x, ".")));
    assert!(texts.contains(&(preview_x + 8, "a")));

    area.set_charset("ISO-8859-1").unwrap();
    let recording = paint(&area);
    assert_eq!(
        recording.texts_at(row_baseline(0))[1],
        (DATA_X, &*format!("E9 61{}éa", " ".repeat(43)))
    );
}

#[test]
fn test_multibyte_character_spanning_rows() {
    // 'é' in UTF-8 starts on the last byte of the first row
    let mut bytes = vec![b'x'; 15];
    bytes.extend_from_slice("é".as_bytes());
    let area = area_with_bytes(bytes);
    let recording = paint(&area);

    let texts = recording.texts_at(row_baseline(0));
    let preview = texts.last().expect("preview run").1;
    assert!(preview.ends_with("xé"), "{}", preview);
}

// ========================================================================
// Partial repaint
// ========================================================================

#[test]
fn test_row_number_damage_paints_only_row_numbers() {
    let area = area_with_sequence(40);
    let mut recording = RecordingPainter::new();
    CodeAreaPainter::default()
        .paint_damage(
            &area,
            &METRICS,
            &mut recording,
            &Damage::Areas(vec![DamageArea::RowNumbers]),
        )
        .unwrap();

    assert_eq!(row_number_texts(&recording), vec!["00", "10", "20"]);
    assert_eq!(recording.texts().len(), 3);
}

#[test]
fn test_no_damage_paints_nothing() {
    let area = area_with_sequence(40);
    let mut recording = RecordingPainter::new();
    CodeAreaPainter::default()
        .paint_damage(&area, &METRICS, &mut recording, &Damage::None)
        .unwrap();
    assert!(recording.calls.is_empty());
}
