//! Window and timer message handlers

use std::time::Instant;

use crate::commands::{Cmd, DamageArea};
use crate::messages::UiMsg;
use crate::model::CodeArea;

pub fn update_ui(area: &mut CodeArea, msg: UiMsg) -> Option<Cmd> {
    match msg {
        UiMsg::BlinkCursor => area
            .poll_blink(Instant::now())
            .then(|| Cmd::RedrawAreas(vec![DamageArea::Cursor])),
        UiMsg::Resize(width, height) => {
            area.resize(width, height);
            Some(Cmd::Redraw)
        }
    }
}
