//! Keyboard input mapping
//!
//! Translates winit key events into code area messages. Navigation keys
//! move the caret (Shift extends the selection), printable characters are
//! typed into the active section, and a few function keys switch display
//! settings.

use winit::keyboard::{Key, ModifiersState, NamedKey};

use codearea::messages::{EditMsg, EditorMsg, Msg, UiMsg, ViewMsg};
use codearea::model::{MovementDirection, ViewMode};

/// Cmd on macOS, Ctrl elsewhere
fn command_key(modifiers: ModifiersState) -> bool {
    if cfg!(target_os = "macos") {
        modifiers.super_key()
    } else {
        modifiers.control_key()
    }
}

/// Dual → code matrix only → text preview only → dual
fn next_view_mode(mode: ViewMode) -> ViewMode {
    match mode {
        ViewMode::Dual => ViewMode::CodeMatrixOnly,
        ViewMode::CodeMatrixOnly => ViewMode::TextPreviewOnly,
        ViewMode::TextPreviewOnly => ViewMode::Dual,
    }
}

/// Message for a pressed key, `None` when the key is not bound
pub fn key_to_msg(key: &Key, modifiers: ModifiersState, view_mode: ViewMode) -> Option<Msg> {
    let shift = modifiers.shift_key();
    let command = command_key(modifiers);
    let move_caret = |direction| Some(Msg::move_caret(direction, shift));

    match key {
        Key::Named(NamedKey::ArrowLeft) => move_caret(MovementDirection::Left),
        Key::Named(NamedKey::ArrowRight) => move_caret(MovementDirection::Right),
        Key::Named(NamedKey::ArrowUp) => move_caret(MovementDirection::Up),
        Key::Named(NamedKey::ArrowDown) => move_caret(MovementDirection::Down),
        Key::Named(NamedKey::Home) if command => move_caret(MovementDirection::DocumentStart),
        Key::Named(NamedKey::End) if command => move_caret(MovementDirection::DocumentEnd),
        Key::Named(NamedKey::Home) => move_caret(MovementDirection::RowStart),
        Key::Named(NamedKey::End) => move_caret(MovementDirection::RowEnd),
        Key::Named(NamedKey::PageUp) => move_caret(MovementDirection::PageUp),
        Key::Named(NamedKey::PageDown) => move_caret(MovementDirection::PageDown),
        Key::Named(NamedKey::Tab) => move_caret(MovementDirection::SwitchSection),
        Key::Named(NamedKey::Escape) => Some(Msg::Editor(EditorMsg::ClearSelection)),

        Key::Named(NamedKey::Backspace) => Some(Msg::Edit(EditMsg::Backspace)),
        Key::Named(NamedKey::Delete) => Some(Msg::Edit(EditMsg::Delete)),
        Key::Named(NamedKey::Insert) => Some(Msg::Edit(EditMsg::ToggleEditationMode)),

        Key::Named(NamedKey::F2) => Some(Msg::View(ViewMsg::CycleCodeType)),
        Key::Named(NamedKey::F3) => Some(Msg::View(ViewMsg::ToggleNonAsciiHighlight)),
        Key::Named(NamedKey::F4) => Some(Msg::View(ViewMsg::SetViewMode(next_view_mode(
            view_mode,
        )))),
        Key::Named(NamedKey::Space) if !command => Some(Msg::key_typed(' ')),

        Key::Character(text) if command => {
            let ch = text.chars().next()?.to_ascii_lowercase();
            match (ch, shift) {
                ('a', _) => Some(Msg::Editor(EditorMsg::SelectAll)),
                ('c', false) => Some(Msg::Edit(EditMsg::Copy)),
                ('c', true) => Some(Msg::Edit(EditMsg::CopyAsCode)),
                ('x', _) => Some(Msg::Edit(EditMsg::Cut)),
                ('v', false) => Some(Msg::Edit(EditMsg::Paste)),
                ('v', true) => Some(Msg::Edit(EditMsg::PasteAsCode)),
                ('l', _) => Some(Msg::Editor(EditorMsg::CenterCaret)),
                _ => None,
            }
        }
        Key::Character(text) if !modifiers.alt_key() => {
            let ch = text.chars().next()?;
            (!ch.is_control()).then(|| Msg::key_typed(ch))
        }
        _ => None,
    }
}

/// Resize message with the window size clamped into the widget's range
pub fn resize_msg(width: u32, height: u32) -> Msg {
    let clamp = |v: u32| v.min(i32::MAX as u32) as i32;
    Msg::Ui(UiMsg::Resize(clamp(width), clamp(height)))
}
