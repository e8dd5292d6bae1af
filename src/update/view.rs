//! Display setting message handlers

use crate::code_type::CodeType;
use crate::commands::Cmd;
use crate::messages::ViewMsg;
use crate::model::{CaretPosition, CodeArea};

/// Handle view mode, code type, charset and highlighting messages
pub fn update_view(area: &mut CodeArea, msg: ViewMsg) -> Option<Cmd> {
    match msg {
        ViewMsg::SetViewMode(mode) => area.set_view_mode(mode),
        ViewMsg::SetCodeType(code_type) => area.set_code_type(code_type),
        ViewMsg::CycleCodeType => {
            let current = area.code_type();
            let index = CodeType::ALL
                .iter()
                .position(|&c| c == current)
                .unwrap_or(0);
            area.set_code_type(CodeType::ALL[(index + 1) % CodeType::ALL.len()]);
        }
        ViewMsg::SetCodeCharactersCase(case) => area.set_code_characters_case(case),
        ViewMsg::SetCharset(name) => {
            if let Err(err) = area.set_charset(&name) {
                tracing::warn!("Failed to switch charset to '{}': {}", name, err);
                return None;
            }
        }
        ViewMsg::SetEditationMode(mode) => area.set_editation_mode(mode),
        ViewMsg::ToggleNonAsciiHighlight => {
            let show = !area.show_non_ascii();
            area.set_show_non_ascii(show);
        }
        ViewMsg::SetSearchMatches(matches) => area.search_highlight_mut().set_matches(matches),
        ViewMsg::FocusSearchMatch(index) => {
            if !area.search_highlight_mut().set_current(Some(index)) {
                return None;
            }
            let Some(found) = area.search_highlight().current().copied() else {
                return None;
            };
            let section = area.active_section();
            area.clear_selection();
            area.set_caret_position(CaretPosition::at(found.position, section));
            area.reveal_caret();
        }
    }
    Some(Cmd::Redraw)
}
