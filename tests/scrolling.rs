//! Scroll stepping, scrollbar values and caret reveal

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use codearea::commands::Cmd;
use codearea::layout::mapper::position_to_pixel;
use codearea::messages::{EditorMsg, Msg};
use codearea::model::{CaretPosition, CodeArea, MovementDirection, Section};
use codearea::scroll::{
    HorizontalScrollUnit, ScrollDirection, ScrollPosition, ScrollUnits, VerticalScrollUnit,
};
use common::{area_with_sequence, send, sized_area, test_handler, ZeroData, HEIGHT, METRICS};

fn scroll_by(area: &mut CodeArea, msg: EditorMsg) -> Option<Cmd> {
    let mut handler = test_handler();
    send(area, &mut handler, Msg::Editor(msg))
}

fn row_of(area: &CodeArea) -> u64 {
    area.scroll_position().row_position
}

// ========================================================================
// Stepping
// ========================================================================

#[test]
fn test_line_and_page_steps() {
    // 100 full rows plus the end position's own row
    let mut area = area_with_sequence(16 * 100);
    assert_eq!(area.geometry().max_scroll.row_position, 91);

    assert_eq!(
        scroll_by(&mut area, EditorMsg::Scroll(ScrollDirection::Down)),
        Some(Cmd::Redraw)
    );
    assert_eq!(row_of(&area), 1);
    scroll_by(&mut area, EditorMsg::Scroll(ScrollDirection::Up));
    assert_eq!(row_of(&area), 0);
    assert_eq!(
        scroll_by(&mut area, EditorMsg::Scroll(ScrollDirection::Up)),
        None
    );

    scroll_by(&mut area, EditorMsg::Scroll(ScrollDirection::PageDown));
    assert_eq!(row_of(&area), 10);

    area.set_scroll_position(ScrollPosition::new(85, 0));
    scroll_by(&mut area, EditorMsg::Scroll(ScrollDirection::PageDown));
    assert_eq!(row_of(&area), 91);

    area.set_scroll_position(ScrollPosition::new(5, 0));
    scroll_by(&mut area, EditorMsg::Scroll(ScrollDirection::PageUp));
    assert_eq!(row_of(&area), 0);
}

#[test]
fn test_scrolling_leaves_caret_alone() {
    let mut area = area_with_sequence(16 * 100);
    area.set_caret_position(CaretPosition::at(3, Section::CodeMatrix));
    scroll_by(&mut area, EditorMsg::Scroll(ScrollDirection::PageDown));
    assert_eq!(area.caret().data_position, 3);
    // the caret is now above the view
    assert!(position_to_pixel(&area.geometry(), &area.scroll_position(), &area.caret()).is_none());
}

#[test]
fn test_horizontal_steps_need_overflow() {
    let mut area = area_with_sequence(64);
    assert_eq!(area.geometry().max_scroll.char_position, 0);
    scroll_by(&mut area, EditorMsg::Scroll(ScrollDirection::Right));
    assert_eq!(area.scroll_position().char_position, 0);

    let mut area = sized_area(vec![0; 64], 300, HEIGHT);
    assert!(area.geometry().max_scroll.char_position > 0);
    scroll_by(&mut area, EditorMsg::Scroll(ScrollDirection::Right));
    assert_eq!(area.scroll_position().char_position, 1);
    scroll_by(&mut area, EditorMsg::Scroll(ScrollDirection::Left));
    assert_eq!(area.scroll_position().char_position, 0);
}

#[test]
fn test_wheel_moves_three_rows_per_notch() {
    let mut area = area_with_sequence(16 * 100);
    scroll_by(&mut area, EditorMsg::Wheel(2));
    assert_eq!(row_of(&area), 6);
    scroll_by(&mut area, EditorMsg::Wheel(-1));
    assert_eq!(row_of(&area), 3);
    scroll_by(&mut area, EditorMsg::Wheel(-5));
    assert_eq!(row_of(&area), 0);
    scroll_by(&mut area, EditorMsg::Wheel(100));
    assert_eq!(row_of(&area), 91);
}

#[test]
fn test_scroll_position_is_clamped() {
    let mut area = area_with_sequence(16 * 100);
    area.set_scroll_position(ScrollPosition::new(5000, 300));
    let scroll = area.scroll_position();
    assert_eq!(scroll.row_position, 91);
    assert_eq!(scroll.char_position, 0);
}

// ========================================================================
// Scrollbar values
// ========================================================================

#[test]
fn test_vertical_scrollbar_in_pixels() {
    let mut area = area_with_sequence(16 * 100);
    scroll_by(&mut area, EditorMsg::VerticalScrollbar(5 * 17 + 3));
    let scroll = area.scroll_position();
    assert_eq!((scroll.row_position, scroll.row_offset), (5, 3));
    assert_eq!(area.vertical_scroll_value(), 88);
}

#[test]
fn test_vertical_scrollbar_in_rows() {
    let mut area = area_with_sequence(16 * 100);
    area.set_scroll_units(ScrollUnits {
        vertical: VerticalScrollUnit::Row,
        horizontal: HorizontalScrollUnit::Character,
    });
    scroll_by(&mut area, EditorMsg::VerticalScrollbar(5 * 17 + 3));
    let scroll = area.scroll_position();
    assert_eq!((scroll.row_position, scroll.row_offset), (6, 0));
    assert_eq!(area.vertical_scroll_value(), 6 * 17);
}

#[test]
fn test_switching_to_row_units_drops_offset() {
    let mut area = area_with_sequence(16 * 100);
    area.set_vertical_scroll_value(40);
    assert_eq!(area.scroll_position().row_offset, 6);
    area.set_scroll_units(ScrollUnits {
        vertical: VerticalScrollUnit::Row,
        ..ScrollUnits::default()
    });
    assert_eq!(area.scroll_position().row_offset, 0);
    assert_eq!(area.scroll_position().row_position, 2);
}

#[test]
fn test_horizontal_scrollbar_units() {
    let mut area = sized_area(vec![0; 64], 300, HEIGHT);
    scroll_by(&mut area, EditorMsg::HorizontalScrollbar(8 * 3 + 5));
    assert_eq!(area.scroll_position().char_position, 4);
    assert_eq!(area.horizontal_scroll_value(), 32);

    area.set_scroll_units(ScrollUnits {
        horizontal: HorizontalScrollUnit::Pixel,
        ..ScrollUnits::default()
    });
    area.set_horizontal_scroll_value(8 * 3 + 5);
    let scroll = area.scroll_position();
    assert_eq!((scroll.char_position, scroll.char_offset), (3, 5));
    assert_eq!(area.horizontal_scroll_value(), 29);
}

// ========================================================================
// Max mode
// ========================================================================

fn huge_area() -> CodeArea {
    let mut area = CodeArea::new(Box::new(ZeroData { size: 1 << 40 }));
    area.set_font_metrics(&METRICS);
    area.resize(800, HEIGHT);
    area
}

#[test]
fn test_huge_documents_switch_to_max_mode() {
    let area = huge_area();
    let geometry = area.geometry();
    assert!(geometry.vertical_max_mode);
    assert!(geometry.vertical_scrollbar.is_some());
    assert!(!common::geometry_for(16 * 100, 800, HEIGHT).vertical_max_mode);
}

#[test]
fn test_max_mode_scales_scrollbar_value() {
    let mut area = huge_area();
    let max_row = area.geometry().max_scroll.row_position;

    area.set_vertical_scroll_value(i32::MAX / 2);
    let row = row_of(&area);
    assert!(row.abs_diff(max_row / 2) <= 64, "row {} of {}", row, max_row);
    let value = area.vertical_scroll_value();
    assert!((value - i32::MAX / 2).abs() <= 2, "value {}", value);

    area.set_vertical_scroll_value(0);
    assert_eq!(row_of(&area), 0);
    assert_eq!(area.vertical_scroll_value(), 0);
}

#[test]
fn test_max_mode_document_end_reaches_scrollbar_end() {
    let mut area = huge_area();
    let mut handler = test_handler();
    send(
        &mut area,
        &mut handler,
        Msg::move_caret(MovementDirection::DocumentEnd, false),
    );
    assert_eq!(area.caret().data_position, 1 << 40);
    assert_eq!(row_of(&area), area.geometry().max_scroll.row_position);
    assert_eq!(area.vertical_scroll_value(), i32::MAX);
    assert!(position_to_pixel(&area.geometry(), &area.scroll_position(), &area.caret()).is_some());
}

// ========================================================================
// Reveal and center
// ========================================================================

#[test]
fn test_reveal_scrolls_minimally() {
    let mut area = area_with_sequence(16 * 100);
    area.set_caret_position(CaretPosition::at(16 * 30, Section::CodeMatrix));
    scroll_by(&mut area, EditorMsg::RevealCaret);
    // row 30 ends on the bottom edge of the ten-row view
    assert_eq!(row_of(&area), 21);

    area.set_caret_position(CaretPosition::at(16 * 25, Section::CodeMatrix));
    assert_eq!(scroll_by(&mut area, EditorMsg::RevealCaret), None);

    area.set_caret_position(CaretPosition::at(16 * 4, Section::CodeMatrix));
    scroll_by(&mut area, EditorMsg::RevealCaret);
    assert_eq!(row_of(&area), 4);
}

#[test]
fn test_center_puts_caret_mid_view() {
    let mut area = area_with_sequence(16 * 100);
    area.set_caret_position(CaretPosition::at(16 * 50, Section::TextPreview));
    scroll_by(&mut area, EditorMsg::CenterCaret);
    assert_eq!(row_of(&area), 45);

    // near the start the view cannot scroll above row 0
    area.set_caret_position(CaretPosition::at(16 * 2, Section::TextPreview));
    scroll_by(&mut area, EditorMsg::CenterCaret);
    assert_eq!(row_of(&area), 0);

    // near the end it stops at the last page
    area.set_caret_position(CaretPosition::at(16 * 99, Section::TextPreview));
    scroll_by(&mut area, EditorMsg::CenterCaret);
    assert_eq!(row_of(&area), 91);
}

#[test]
fn test_reveal_brings_column_into_view() {
    let mut area = sized_area(vec![0; 64], 300, HEIGHT);
    area.set_caret_position(CaretPosition::at(15, Section::TextPreview));
    area.reveal_caret();
    assert!(area.scroll_position().char_position > 0);
    assert!(position_to_pixel(&area.geometry(), &area.scroll_position(), &area.caret()).is_some());
}

// ========================================================================
// Events
// ========================================================================

#[test]
fn test_scrolled_listener_sees_each_change() {
    let mut area = area_with_sequence(16 * 100);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    area.events_mut()
        .scrolled
        .add(move |scroll: &ScrollPosition| sink.borrow_mut().push(scroll.row_position));

    scroll_by(&mut area, EditorMsg::Wheel(1));
    scroll_by(&mut area, EditorMsg::Scroll(ScrollDirection::Down));
    // already at the top after this, so the second step changes nothing
    scroll_by(&mut area, EditorMsg::Scroll(ScrollDirection::PageUp));
    scroll_by(&mut area, EditorMsg::Scroll(ScrollDirection::Up));

    assert_eq!(*seen.borrow(), vec![3, 4, 0]);
}
