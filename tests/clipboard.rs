//! Copy, cut and paste through the update loop

mod common;

use codearea::clipboard::ClipboardContent;
use codearea::code_type::{CodeCharactersCase, CodeType};
use codearea::commands::Cmd;
use codearea::error::CodeAreaError;
use codearea::handler::CommandHandler;
use codearea::messages::{EditMsg, Msg};
use codearea::model::{CaretPosition, EditationMode, Section, SelectionRange};
use common::{
    area_with_bytes, bytes_of, clipboard_content, handler_with_text, send, test_handler,
};

// ========================================================================
// Copy
// ========================================================================

#[test]
fn test_copy_without_selection_leaves_clipboard_alone() {
    let mut area = area_with_bytes(vec![1, 2, 3]);
    let mut handler = handler_with_text("keep");
    assert_eq!(send(&mut area, &mut handler, Msg::Edit(EditMsg::Copy)), None);
    assert_eq!(clipboard_content(&mut handler), ClipboardContent::text("keep"));
}

#[test]
fn test_copy_publishes_binary_and_text() {
    let mut area = area_with_bytes(b"hello world".to_vec());
    let mut handler = test_handler();
    area.set_selection(Some(SelectionRange::new(6, 10))).unwrap();

    send(&mut area, &mut handler, Msg::Edit(EditMsg::Copy));

    let content = clipboard_content(&mut handler);
    assert_eq!(content.binary.as_deref(), Some(&b"world"[..]));
    assert_eq!(content.text.as_deref(), Some("world"));
    // copying never touches the data or the selection
    assert_eq!(area.data_size(), 11);
    assert_eq!(area.selection(), Some(SelectionRange::new(6, 10)));
}

#[test]
fn test_copy_as_code_uses_code_type_and_case() {
    let mut area = area_with_bytes(vec![0x01, 0x0A, 0xFF]);
    let mut handler = test_handler();
    area.select_all();

    send(&mut area, &mut handler, Msg::Edit(EditMsg::CopyAsCode));
    assert_eq!(
        clipboard_content(&mut handler).text.as_deref(),
        Some("01 0A FF")
    );

    area.set_code_characters_case(CodeCharactersCase::Lower);
    send(&mut area, &mut handler, Msg::Edit(EditMsg::CopyAsCode));
    assert_eq!(
        clipboard_content(&mut handler).text.as_deref(),
        Some("01 0a ff")
    );

    area.set_code_type(CodeType::Decimal);
    send(&mut area, &mut handler, Msg::Edit(EditMsg::CopyAsCode));
    assert_eq!(
        clipboard_content(&mut handler).text.as_deref(),
        Some("001 010 255")
    );
}

// ========================================================================
// Cut
// ========================================================================

#[test]
fn test_cut_copies_then_removes() {
    let mut area = area_with_bytes(vec![1, 2, 3, 4, 5]);
    let mut handler = test_handler();
    area.set_selection(Some(SelectionRange::new(1, 3))).unwrap();

    send(&mut area, &mut handler, Msg::Edit(EditMsg::Cut));

    assert_eq!(bytes_of(&area), vec![1, 5]);
    assert_eq!(area.caret().data_position, 1);
    assert_eq!(
        clipboard_content(&mut handler).binary,
        Some(vec![2, 3, 4])
    );
}

#[test]
fn test_cut_in_inplace_mode_only_copies() {
    let mut area = area_with_bytes(vec![1, 2, 3]);
    let mut handler = test_handler();
    area.set_editation_mode(EditationMode::Inplace);
    area.set_selection(Some(SelectionRange::new(0, 1))).unwrap();

    send(&mut area, &mut handler, Msg::Edit(EditMsg::Cut));

    assert_eq!(bytes_of(&area), vec![1, 2, 3]);
    assert_eq!(clipboard_content(&mut handler).binary, Some(vec![1, 2]));
}

// ========================================================================
// Paste
// ========================================================================

#[test]
fn test_copy_then_overwrite_paste_reproduces_bytes() {
    let original: Vec<u8> = (0..48).map(|i| (i * 7) as u8).collect();
    let mut area = area_with_bytes(original.clone());
    let mut handler = test_handler();
    area.select_all();
    send(&mut area, &mut handler, Msg::Edit(EditMsg::Copy));

    // scribble over the data, then paste the copy back from the start
    area.clear_selection();
    area.data_mut()
        .as_editable()
        .unwrap()
        .fill(0, 48, 0xEE)
        .unwrap();
    area.set_caret_position(CaretPosition::at(0, Section::CodeMatrix));
    send(&mut area, &mut handler, Msg::Edit(EditMsg::Paste));

    assert_eq!(bytes_of(&area), original);
    assert_eq!(area.caret().data_position, 48);
}

#[test]
fn test_paste_replaces_selection() {
    let mut area = area_with_bytes(vec![1, 2, 3, 4, 5, 6]);
    let mut handler = test_handler();
    area.set_selection(Some(SelectionRange::new(0, 0))).unwrap();
    send(&mut area, &mut handler, Msg::Edit(EditMsg::Copy));

    area.set_selection(Some(SelectionRange::new(2, 4))).unwrap();
    area.set_caret_position(CaretPosition::at(5, Section::CodeMatrix));
    send(&mut area, &mut handler, Msg::Edit(EditMsg::Paste));

    // [3, 4, 5] removed, then 1 overwrites the byte at the selection start
    assert_eq!(bytes_of(&area), vec![1, 2, 1]);
    assert!(area.selection().is_none());
}

#[test]
fn test_insert_paste_shifts_data() {
    let mut area = area_with_bytes(vec![1, 2]);
    let mut handler = handler_with_text("xy");
    area.set_editation_mode(EditationMode::Insert);
    area.set_caret_position(CaretPosition::at(1, Section::TextPreview));

    send(&mut area, &mut handler, Msg::Edit(EditMsg::Paste));

    assert_eq!(bytes_of(&area), vec![1, b'x', b'y', 2]);
    assert_eq!(area.caret(), CaretPosition::at(3, Section::TextPreview));
}

#[test]
fn test_text_paste_substitutes_unmappable_chars() {
    let mut area = area_with_bytes(vec![0x41, 0x42]);
    area.set_charset("US-ASCII").unwrap();
    let mut handler = handler_with_text("aé");

    let cmd = send(&mut area, &mut handler, Msg::Edit(EditMsg::Paste));

    assert_eq!(cmd, Some(Cmd::Redraw));
    assert_eq!(bytes_of(&area), vec![b'a', b'?']);
    assert_eq!(area.caret().data_position, 2);
}

#[test]
fn test_inplace_paste_is_truncated_at_end() {
    let mut area = area_with_bytes(vec![0; 4]);
    let mut handler = handler_with_text("abcdef");
    area.set_editation_mode(EditationMode::Inplace);
    area.set_caret_position(CaretPosition::at(2, Section::CodeMatrix));

    send(&mut area, &mut handler, Msg::Edit(EditMsg::Paste));

    assert_eq!(bytes_of(&area), vec![0, 0, b'a', b'b']);
    assert_eq!(area.caret().data_position, 4);
}

#[test]
fn test_paste_as_code_parses_text() {
    let mut area = area_with_bytes(Vec::new());
    let mut handler = handler_with_text("01 0a FF");

    send(&mut area, &mut handler, Msg::Edit(EditMsg::PasteAsCode));

    assert_eq!(bytes_of(&area), vec![0x01, 0x0A, 0xFF]);
    assert_eq!(area.caret().data_position, 3);
}

#[test]
fn test_paste_as_code_accepts_packed_and_delimited_input() {
    let mut area = area_with_bytes(Vec::new());
    let mut handler = handler_with_text("dead,beef;\n01");
    send(&mut area, &mut handler, Msg::Edit(EditMsg::PasteAsCode));
    assert_eq!(bytes_of(&area), vec![0xDE, 0xAD, 0xBE, 0xEF, 0x01]);
}

#[test]
fn test_copy_as_code_round_trips_for_every_code_type() {
    let original: Vec<u8> = vec![0x00, 0x01, 0x7F, 0x80, 0xA5, 0xFF];
    for code_type in CodeType::ALL {
        let mut source = area_with_bytes(original.clone());
        let mut handler = test_handler();
        source.set_code_type(code_type);
        source.select_all();
        send(&mut source, &mut handler, Msg::Edit(EditMsg::CopyAsCode));

        // only the code text travels, as when pasting from another program
        let text = clipboard_content(&mut handler).text.unwrap();
        let mut handler = handler_with_text(&text);
        let mut target = area_with_bytes(Vec::new());
        target.set_code_type(code_type);
        send(&mut target, &mut handler, Msg::Edit(EditMsg::PasteAsCode));

        assert_eq!(bytes_of(&target), original, "{:?}: {}", code_type, text);
    }
}

#[test]
fn test_invalid_code_text_changes_nothing() {
    let mut area = area_with_bytes(vec![7, 8]);
    let mut handler = handler_with_text("01 zz 02");

    let cmd = send(&mut area, &mut handler, Msg::Edit(EditMsg::PasteAsCode));

    assert_eq!(cmd, None);
    assert_eq!(bytes_of(&area), vec![7, 8]);

    let err = handler.paste_as_code(&mut area).unwrap_err();
    assert!(matches!(err, CodeAreaError::EncodingFailure(_)));
}

#[test]
fn test_oversized_decimal_code_is_rejected() {
    let mut area = area_with_bytes(Vec::new());
    area.set_code_type(CodeType::Decimal);
    let mut handler = handler_with_text("256");
    send(&mut area, &mut handler, Msg::Edit(EditMsg::PasteAsCode));
    assert_eq!(area.data_size(), 0);
}

// ========================================================================
// Clipboard failures
// ========================================================================

#[test]
fn test_unavailable_clipboard_is_swallowed() {
    use codearea::clipboard::MemoryClipboard;
    use codearea::handler::DefaultCommandHandler;

    let mut clipboard = MemoryClipboard::new();
    clipboard.set_unavailable(true);
    let mut handler = DefaultCommandHandler::new(Box::new(clipboard));
    let mut area = area_with_bytes(vec![1, 2, 3]);
    area.select_all();

    assert_eq!(send(&mut area, &mut handler, Msg::Edit(EditMsg::Copy)), None);
    assert_eq!(
        send(&mut area, &mut handler, Msg::Edit(EditMsg::Paste)),
        Some(Cmd::Redraw)
    );
    assert_eq!(bytes_of(&area), vec![1, 2, 3]);
    assert!(!handler.can_paste());
}

#[test]
fn test_can_paste_reflects_clipboard() {
    let mut handler = test_handler();
    assert!(!handler.can_paste());
    let mut handler = handler_with_text("00");
    assert!(handler.can_paste());
}
