//! Caret, selection and scroll message handlers

use crate::commands::{Cmd, DamageArea};
use crate::handler::CommandHandler;
use crate::messages::EditorMsg;
use crate::model::CodeArea;

/// Handle caret movement, selection and scrolling messages
pub fn update_editor(
    area: &mut CodeArea,
    handler: &mut dyn CommandHandler,
    msg: EditorMsg,
) -> Option<Cmd> {
    let before = (area.caret(), area.selection(), area.scroll_position());

    match msg {
        EditorMsg::Move { direction, extend } => handler.move_caret(area, direction, extend),
        EditorMsg::SelectAll => handler.select_all(area),
        EditorMsg::ClearSelection => handler.clear_selection(area),
        EditorMsg::Click { x, y, extend } => handler.click(area, x, y, extend),
        EditorMsg::Drag { x, y } => handler.drag(area, x, y),
        EditorMsg::Scroll(direction) => handler.scroll(area, direction),
        EditorMsg::Wheel(notches) => handler.wheel_scroll(area, notches),
        EditorMsg::VerticalScrollbar(value) => area.set_vertical_scroll_value(value),
        EditorMsg::HorizontalScrollbar(value) => area.set_horizontal_scroll_value(value),
        EditorMsg::RevealCaret => area.reveal_caret(),
        EditorMsg::CenterCaret => area.center_on_caret(),
    }

    let (caret, selection, scroll) = before;
    if scroll != area.scroll_position() || selection != area.selection() {
        Some(Cmd::Redraw)
    } else if caret != area.caret() {
        Some(Cmd::RedrawAreas(vec![DamageArea::DataView]))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::handler::DefaultCommandHandler;
    use crate::model::{MovementDirection, SelectionRange};

    #[test]
    fn test_move_without_change_needs_no_redraw() {
        let mut area = CodeArea::with_bytes(vec![1, 2, 3]);
        let mut handler = DefaultCommandHandler::new(Box::new(MemoryClipboard::new()));
        let msg = EditorMsg::Move {
            direction: MovementDirection::Left,
            extend: false,
        };
        assert_eq!(update_editor(&mut area, &mut handler, msg), None);

        let msg = EditorMsg::Move {
            direction: MovementDirection::DocumentEnd,
            extend: true,
        };
        assert_eq!(update_editor(&mut area, &mut handler, msg), Some(Cmd::Redraw));
        assert_eq!(area.selection(), Some(SelectionRange::new(0, 2)));
    }
}
