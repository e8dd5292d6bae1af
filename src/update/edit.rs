//! Data-mutating and clipboard message handlers

use crate::commands::Cmd;
use crate::error::CodeAreaError;
use crate::handler::CommandHandler;
use crate::messages::EditMsg;
use crate::model::CodeArea;

/// Handle edit messages through the command handler
///
/// `EncodingFailure` and `UnsupportedOperation` are logged and end the
/// message; any other error is handed to the host.
pub fn update_edit(
    area: &mut CodeArea,
    handler: &mut dyn CommandHandler,
    msg: EditMsg,
) -> Option<Cmd> {
    let size_before = area.data_size();
    let result = match msg {
        EditMsg::KeyTyped(ch) => handler.key_typed(area, ch),
        EditMsg::Backspace => handler.backspace(area),
        EditMsg::Delete => handler.delete(area),
        EditMsg::Copy => return handler.copy(area).err().map(Cmd::ReportError),
        EditMsg::CopyAsCode => return handler.copy_as_code(area).err().map(Cmd::ReportError),
        EditMsg::Cut => handler.cut(area),
        EditMsg::Paste => handler.paste(area),
        EditMsg::PasteAsCode => handler.paste_as_code(area),
        EditMsg::ToggleEditationMode => {
            area.toggle_editation_mode();
            Ok(())
        }
    };

    match result {
        Ok(()) => Some(Cmd::Redraw),
        Err(err @ (CodeAreaError::EncodingFailure(_) | CodeAreaError::UnsupportedOperation(_))) => {
            tracing::warn!("{:?} rejected: {}", msg, err);
            (area.data_size() != size_before).then_some(Cmd::Redraw)
        }
        Err(err) => {
            tracing::error!("{:?} failed: {}", msg, err);
            Some(Cmd::ReportError(err))
        }
    }
}
