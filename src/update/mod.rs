//! Message dispatch for the code area
//!
//! Every input the host forwards becomes a [`Msg`]; [`update`] routes it to
//! the caret, edit, view or timer handler and reports what to repaint.

mod edit;
mod editor;
mod ui;
mod view;

use crate::commands::Cmd;
use crate::handler::CommandHandler;
use crate::messages::Msg;
use crate::model::CodeArea;

#[cfg(debug_assertions)]
use crate::messages::UiMsg;
#[cfg(debug_assertions)]
use crate::tracing::CaretSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use edit::update_edit;
pub use editor::update_editor;
pub use ui::update_ui;
pub use view::update_view;

/// Applies `msg` to `area`, returning the repaint the host should schedule.
///
/// Debug builds wrap the dispatch in a tracing span and log caret and
/// selection changes per message.
#[inline]
pub fn update(area: &mut CodeArea, handler: &mut dyn CommandHandler, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(area, handler, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(area, handler, msg)
    }
}

fn update_inner(area: &mut CodeArea, handler: &mut dyn CommandHandler, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Editor(m) => editor::update_editor(area, handler, m),
        Msg::Edit(m) => edit::update_edit(area, handler, m),
        Msg::View(m) => view::update_view(area, m),
        Msg::Ui(m) => ui::update_ui(area, m),
    }
}

/// Dispatch with a span per message and a caret diff afterwards; blink
/// ticks stay silent
#[cfg(debug_assertions)]
fn update_traced(area: &mut CodeArea, handler: &mut dyn CommandHandler, msg: Msg) -> Option<Cmd> {
    let is_noisy = matches!(&msg, Msg::Ui(UiMsg::BlinkCursor));

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = CaretSnapshot::from_area(area);
    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(area, handler, msg);

    let after = CaretSnapshot::from_area(area);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "caret", %diff, "state changed");
    }
    debug_assert!(
        area.caret().data_position <= area.data_size(),
        "caret past end of data after {}",
        msg_name
    );

    result
}

/// Display name for a message, including its arguments
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Editor(m) => format!("Editor::{:?}", m),
        Msg::Edit(m) => format!("Edit::{:?}", m),
        Msg::View(m) => format!("View::{:?}", m),
        Msg::Ui(m) => format!("Ui::{:?}", m),
    }
}
