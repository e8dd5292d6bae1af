//! Message types for the Elm-style architecture
//!
//! Every input the widget reacts to arrives as a [`Msg`] and is applied by
//! [`update`](crate::update::update).

use crate::code_type::{CodeCharactersCase, CodeType};
use crate::model::{EditationMode, MovementDirection, ViewMode};
use crate::scroll::ScrollDirection;
use crate::view::highlight::SearchMatch;

/// Caret, selection and scrolling messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMsg {
    /// Arrow keys, Home/End, PageUp/PageDown, Ctrl+Home/End, Tab
    Move {
        direction: MovementDirection,
        extend: bool,
    },
    SelectAll,
    ClearSelection,
    /// Mouse press at a component pixel (Shift held extends)
    Click { x: i32, y: i32, extend: bool },
    /// Mouse moved with the button held
    Drag { x: i32, y: i32 },
    Scroll(ScrollDirection),
    /// Wheel notches, positive scrolls down
    Wheel(i32),
    /// Host vertical scrollbar moved to a value
    VerticalScrollbar(i32),
    /// Host horizontal scrollbar moved to a value
    HorizontalScrollbar(i32),
    RevealCaret,
    CenterCaret,
}

/// Data-mutating and clipboard messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMsg {
    KeyTyped(char),
    Backspace,
    Delete,
    Copy,
    CopyAsCode,
    Cut,
    Paste,
    PasteAsCode,
    /// Insert key
    ToggleEditationMode,
}

/// Display setting messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMsg {
    SetViewMode(ViewMode),
    SetCodeType(CodeType),
    /// Binary → octal → decimal → hexadecimal → binary
    CycleCodeType,
    SetCodeCharactersCase(CodeCharactersCase),
    SetCharset(String),
    SetEditationMode(EditationMode),
    ToggleNonAsciiHighlight,
    SetSearchMatches(Vec<SearchMatch>),
    /// Select the match by index, scrolling it into view
    FocusSearchMatch(usize),
}

/// Window and timer messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMsg {
    /// Caret blink timer deadline passed
    BlinkCursor,
    Resize(i32, i32),
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Editor(EditorMsg),
    Edit(EditMsg),
    View(ViewMsg),
    Ui(UiMsg),
}

impl Msg {
    pub fn move_caret(direction: MovementDirection, extend: bool) -> Self {
        Msg::Editor(EditorMsg::Move { direction, extend })
    }

    pub fn key_typed(ch: char) -> Self {
        Msg::Edit(EditMsg::KeyTyped(ch))
    }
}
