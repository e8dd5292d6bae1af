//! Edit command handling
//!
//! [`CommandHandler`] turns edit intents into data-source mutations plus the
//! matching caret, selection and scroll updates. The trait is the seam a
//! host uses to wrap editing (an undo recorder, a macro recorder) without
//! touching the widget; [`DefaultCommandHandler`] is the plain
//! implementation.
//!
//! Policy shared by every mutating command:
//! - editation mode `ReadOnly` turns the command into a silent no-op,
//! - a data source without an editable view yields `UnsupportedOperation`,
//! - clipboard failures are logged and swallowed,
//! - after a data-source error caret, selection and scroll are re-clamped
//!   before the error is returned.

use crate::clipboard::{ClipboardContent, ClipboardProvider, SystemClipboard};
use crate::code_type::{encode_code_string, parse_code_string};
use crate::codec::bytes_to_text_lossy;
use crate::data::EditableBinaryData;
use crate::error::{CodeAreaError, Result};
use crate::model::{
    CaretPosition, CodeArea, EditationMode, MovementDirection, Section, SelectionRange,
};
use crate::scroll::ScrollDirection;

/// Highest character value treated as a control code by text entry
const LAST_CONTROL_CODE: u32 = 0x1F;

/// Edit intents a code area understands
pub trait CommandHandler {
    /// Typed character: a digit in the code matrix, text in the preview
    fn key_typed(&mut self, area: &mut CodeArea, ch: char) -> Result<()>;

    fn backspace(&mut self, area: &mut CodeArea) -> Result<()>;

    fn delete(&mut self, area: &mut CodeArea) -> Result<()>;

    /// Removes the selected bytes, if any
    fn delete_selection(&mut self, area: &mut CodeArea) -> Result<()>;

    fn copy(&mut self, area: &mut CodeArea) -> Result<()>;

    fn copy_as_code(&mut self, area: &mut CodeArea) -> Result<()>;

    fn cut(&mut self, area: &mut CodeArea) -> Result<()>;

    fn paste(&mut self, area: &mut CodeArea) -> Result<()>;

    fn paste_as_code(&mut self, area: &mut CodeArea) -> Result<()>;

    fn can_paste(&mut self) -> bool;

    fn select_all(&mut self, area: &mut CodeArea) {
        area.select_all();
    }

    fn clear_selection(&mut self, area: &mut CodeArea) {
        area.clear_selection();
    }

    fn move_caret(&mut self, area: &mut CodeArea, direction: MovementDirection, extend: bool) {
        area.move_caret(direction, extend);
    }

    fn click(&mut self, area: &mut CodeArea, x: i32, y: i32, extend: bool) {
        area.click(x, y, extend);
    }

    fn drag(&mut self, area: &mut CodeArea, x: i32, y: i32) {
        area.drag(x, y);
    }

    fn scroll(&mut self, area: &mut CodeArea, direction: ScrollDirection) {
        area.scroll(direction);
    }

    fn wheel_scroll(&mut self, area: &mut CodeArea, notches: i32) {
        area.wheel_scroll(notches);
    }
}

/// Command handler writing through a [`ClipboardProvider`]
pub struct DefaultCommandHandler {
    clipboard: Box<dyn ClipboardProvider>,
}

impl std::fmt::Debug for DefaultCommandHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultCommandHandler").finish_non_exhaustive()
    }
}

impl Default for DefaultCommandHandler {
    fn default() -> Self {
        Self::new(Box::new(SystemClipboard::new()))
    }
}

impl DefaultCommandHandler {
    pub fn new(clipboard: Box<dyn ClipboardProvider>) -> Self {
        Self { clipboard }
    }

    pub fn clipboard_mut(&mut self) -> &mut dyn ClipboardProvider {
        self.clipboard.as_mut()
    }

    fn write_clipboard(&mut self, content: ClipboardContent) {
        if let Err(err) = self.clipboard.set_contents(content) {
            tracing::warn!("Clipboard unavailable, copy skipped: {}", err);
        }
    }

    fn read_clipboard(&mut self) -> Option<ClipboardContent> {
        match self.clipboard.contents() {
            Ok(content) if !content.is_empty() => Some(content),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!("Clipboard unavailable, paste skipped: {}", err);
                None
            }
        }
    }

    fn selected_bytes(area: &CodeArea) -> Result<Option<Vec<u8>>> {
        let Some(range) = area.selection() else {
            return Ok(None);
        };
        let bytes = area.data().copy(range.first, range.len())?;
        Ok(Some(bytes))
    }

    fn type_digit(area: &mut CodeArea, ch: char) -> Result<()> {
        let caret = area.caret();
        let code_type = area.code_type();
        let mode = area.editation_mode();
        if !code_type.is_valid_digit(ch, caret.code_offset) {
            return Ok(());
        }
        let Some(digit) = code_type.digit_value(ch) else {
            return Ok(());
        };

        if mode != EditationMode::Inplace {
            remove_selection(area)?;
        }
        let caret = area.caret();
        let position = caret.data_position;
        let offset = caret.code_offset;
        let at_end = position >= area.data_size();
        if at_end && mode == EditationMode::Inplace {
            return Ok(());
        }

        mutate(area, |data| {
            match mode {
                EditationMode::Insert if offset > 0 => {
                    let value = data.byte_at(position)?;
                    let rest = code_type.trailing_digits_value(value, offset);
                    if rest > 0 {
                        data.insert(position + 1, &[rest])?;
                        data.set_byte(position, value - rest)?;
                    }
                }
                EditationMode::Insert => data.insert_zeros(position, 1)?,
                _ if at_end => data.insert_zeros(position, 1)?,
                _ => {}
            }
            let value = data.byte_at(position)?;
            data.set_byte(position, code_type.set_digit(value, digit, offset))
        })?;
        tracing::debug!(position, offset, digit, ?mode, "digit entered");

        let next = if offset + 1 < code_type.max_digits() {
            CaretPosition::new(position, offset + 1, Section::CodeMatrix)
        } else {
            CaretPosition::at(position + 1, Section::CodeMatrix)
        };
        place_caret(area, next);
        Ok(())
    }

    fn type_text(area: &mut CodeArea, ch: char) -> Result<()> {
        if (ch as u32) <= LAST_CONTROL_CODE {
            return Ok(());
        }
        let Some(bytes) = area.codec().encode_char(ch) else {
            return Ok(());
        };
        let mode = area.editation_mode();
        let length = bytes.len() as u64;

        if mode == EditationMode::Inplace {
            let position = area.caret().data_position;
            if position + length > area.data_size() {
                return Ok(());
            }
        } else {
            remove_selection(area)?;
        }

        let position = area.caret().data_position;
        let size = area.data_size();
        mutate(area, |data| {
            if mode != EditationMode::Insert && position < size {
                data.remove(position, length.min(size - position))?;
            }
            data.insert(position, &bytes)
        })?;
        tracing::debug!(position, length, ?mode, "text entered");

        place_caret(area, CaretPosition::at(position + length, Section::TextPreview));
        Ok(())
    }

    /// Writes `bytes` at the caret according to the editation mode
    fn paste_bytes(area: &mut CodeArea, bytes: Vec<u8>) -> Result<()> {
        let mode = area.editation_mode();
        if mode == EditationMode::Inplace {
            area.clear_selection();
        } else {
            remove_selection(area)?;
        }

        let caret = area.caret();
        let position = caret.data_position;
        let size = area.data_size();
        let length = bytes.len() as u64;
        let written = match mode {
            EditationMode::Inplace => length.min(size - position),
            _ => length,
        };

        mutate(area, |data| match mode {
            EditationMode::Insert => data.insert(position, &bytes),
            EditationMode::Inplace => data.replace(position, &bytes[..written as usize]),
            _ => {
                data.remove(position, length.min(size - position))?;
                data.insert(position, &bytes)
            }
        })?;
        tracing::debug!(position, written, ?mode, "bytes pasted");

        place_caret(area, CaretPosition::at(position + written, caret.section));
        Ok(())
    }
}

impl CommandHandler for DefaultCommandHandler {
    fn key_typed(&mut self, area: &mut CodeArea, ch: char) -> Result<()> {
        if !area.is_editable() {
            return Ok(());
        }
        ensure_editable(area)?;
        match area.active_section() {
            Section::CodeMatrix => Self::type_digit(area, ch),
            Section::TextPreview => Self::type_text(area, ch),
        }
    }

    fn backspace(&mut self, area: &mut CodeArea) -> Result<()> {
        if !area.is_editable() || area.editation_mode() == EditationMode::Inplace {
            return Ok(());
        }
        ensure_editable(area)?;
        if area.has_selection() {
            return remove_selection(area);
        }

        let caret = area.caret();
        let position = caret.data_position;
        if position == 0 || position > area.data_size() {
            return Ok(());
        }
        mutate(area, |data| data.remove(position - 1, 1))?;
        place_caret(area, CaretPosition::at(position - 1, caret.section));
        Ok(())
    }

    fn delete(&mut self, area: &mut CodeArea) -> Result<()> {
        if !area.is_editable() || area.editation_mode() == EditationMode::Inplace {
            return Ok(());
        }
        ensure_editable(area)?;
        if area.has_selection() {
            return remove_selection(area);
        }

        let caret = area.caret();
        let position = caret.data_position;
        if position >= area.data_size() {
            return Ok(());
        }
        mutate(area, |data| data.remove(position, 1))?;
        place_caret(area, CaretPosition::at(position, caret.section));
        Ok(())
    }

    fn delete_selection(&mut self, area: &mut CodeArea) -> Result<()> {
        if !area.is_editable() || area.editation_mode() == EditationMode::Inplace {
            return Ok(());
        }
        ensure_editable(area)?;
        remove_selection(area)
    }

    fn copy(&mut self, area: &mut CodeArea) -> Result<()> {
        if let Some(bytes) = Self::selected_bytes(area)? {
            let text = bytes_to_text_lossy(&bytes);
            tracing::debug!(length = bytes.len(), "copy");
            self.write_clipboard(ClipboardContent::new(bytes, text));
        }
        Ok(())
    }

    fn copy_as_code(&mut self, area: &mut CodeArea) -> Result<()> {
        if let Some(bytes) = Self::selected_bytes(area)? {
            let text = encode_code_string(&bytes, area.code_type(), area.code_characters_case());
            tracing::debug!(length = bytes.len(), code_type = ?area.code_type(), "copy as code");
            self.write_clipboard(ClipboardContent::new(bytes, text));
        }
        Ok(())
    }

    fn cut(&mut self, area: &mut CodeArea) -> Result<()> {
        if !area.is_editable() || !area.has_selection() {
            return Ok(());
        }
        ensure_editable(area)?;
        self.copy(area)?;
        match area.editation_mode() {
            EditationMode::Overwrite | EditationMode::Insert => remove_selection(area),
            _ => Ok(()),
        }
    }

    fn paste(&mut self, area: &mut CodeArea) -> Result<()> {
        if !area.is_editable() {
            return Ok(());
        }
        ensure_editable(area)?;
        let Some(content) = self.read_clipboard() else {
            return Ok(());
        };
        let bytes = match (content.binary, content.text) {
            (Some(binary), _) => binary,
            (None, Some(text)) => area.codec().encode_str_lossy(&text),
            (None, None) => return Ok(()),
        };
        if bytes.is_empty() {
            return Ok(());
        }
        Self::paste_bytes(area, bytes)
    }

    fn paste_as_code(&mut self, area: &mut CodeArea) -> Result<()> {
        if !area.is_editable() {
            return Ok(());
        }
        ensure_editable(area)?;
        let Some(content) = self.read_clipboard() else {
            return Ok(());
        };
        let bytes = match (content.binary, content.text) {
            (Some(binary), _) => binary,
            (None, Some(text)) => parse_code_string(&text, area.code_type())?,
            (None, None) => return Ok(()),
        };
        if bytes.is_empty() {
            return Ok(());
        }
        Self::paste_bytes(area, bytes)
    }

    fn can_paste(&mut self) -> bool {
        self.clipboard
            .contents()
            .map(|content| !content.is_empty())
            .unwrap_or(false)
    }
}

// ============================================================================
// Shared mutation helpers
// ============================================================================

fn ensure_editable(area: &mut CodeArea) -> Result<()> {
    if area.data_mut().as_editable().is_none() {
        return Err(CodeAreaError::UnsupportedOperation(
            "data source is not editable",
        ));
    }
    Ok(())
}

/// Runs `op` against the editable data, then re-clamps the widget state
/// whether or not it succeeded
fn mutate<T>(
    area: &mut CodeArea,
    op: impl FnOnce(&mut dyn EditableBinaryData) -> Result<T>,
) -> Result<T> {
    let data = area
        .data_mut()
        .as_editable()
        .ok_or(CodeAreaError::UnsupportedOperation(
            "data source is not editable",
        ))?;
    match op(data) {
        Ok(value) => {
            area.notify_data_modified();
            Ok(value)
        }
        Err(err) => {
            tracing::warn!("Data source mutation failed: {}", err);
            area.clamp_to_data();
            Err(err)
        }
    }
}

/// Removes the selected range and puts the caret at its start
fn remove_selection(area: &mut CodeArea) -> Result<()> {
    let Some(SelectionRange { first, last }) = area.selection() else {
        return Ok(());
    };
    let section = area.active_section();
    mutate(area, |data| data.remove(first, last - first + 1))?;
    tracing::debug!(first, last, "selection deleted");
    place_caret(area, CaretPosition::at(first, section));
    Ok(())
}

fn place_caret(area: &mut CodeArea, caret: CaretPosition) {
    area.clear_selection();
    area.set_caret_position(caret);
    area.reveal_caret();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::code_type::CodeType;
    use crate::data::ByteArrayData;

    fn handler() -> DefaultCommandHandler {
        DefaultCommandHandler::new(Box::new(MemoryClipboard::new()))
    }

    fn bytes(area: &CodeArea) -> Vec<u8> {
        area.data().copy(0, area.data_size()).unwrap()
    }

    fn type_str(handler: &mut DefaultCommandHandler, area: &mut CodeArea, text: &str) {
        for ch in text.chars() {
            handler.key_typed(area, ch).unwrap();
        }
    }

    #[test]
    fn test_overwrite_appends_at_end() {
        let mut area = CodeArea::with_bytes(vec![1, 2, 3]);
        let mut h = handler();
        area.set_caret_position(CaretPosition::at(3, Section::CodeMatrix));
        type_str(&mut h, &mut area, "FF");
        assert_eq!(bytes(&area), vec![1, 2, 3, 0xFF]);
        assert_eq!(area.caret(), CaretPosition::at(4, Section::CodeMatrix));
    }

    #[test]
    fn test_invalid_digit_is_ignored() {
        let mut area = CodeArea::with_bytes(vec![0x12]);
        let mut h = handler();
        h.key_typed(&mut area, 'g').unwrap();
        assert_eq!(bytes(&area), vec![0x12]);
        area.set_code_type(CodeType::Decimal);
        // a leading decimal digit above 2 would exceed 255
        h.key_typed(&mut area, '3').unwrap();
        assert_eq!(bytes(&area), vec![0x12]);
        assert_eq!(area.caret().code_offset, 0);
    }

    #[test]
    fn test_insert_splits_remaining_digits() {
        let mut area = CodeArea::with_bytes(vec![0xAB]);
        let mut h = handler();
        area.set_editation_mode(EditationMode::Insert);
        area.set_caret_position(CaretPosition::new(0, 1, Section::CodeMatrix));
        h.key_typed(&mut area, '5').unwrap();
        assert_eq!(bytes(&area), vec![0xA5, 0x0B]);
        assert_eq!(area.caret(), CaretPosition::at(1, Section::CodeMatrix));
    }

    #[test]
    fn test_insert_at_first_digit_inserts_byte() {
        let mut area = CodeArea::with_bytes(vec![0xAB]);
        let mut h = handler();
        area.set_editation_mode(EditationMode::Insert);
        h.key_typed(&mut area, 'c').unwrap();
        assert_eq!(bytes(&area), vec![0xC0, 0xAB]);
        assert_eq!(area.caret(), CaretPosition::new(0, 1, Section::CodeMatrix));
    }

    #[test]
    fn test_inplace_never_grows() {
        let mut area = CodeArea::with_bytes(vec![0x00, 0x00]);
        let mut h = handler();
        area.set_editation_mode(EditationMode::Inplace);
        type_str(&mut h, &mut area, "1234");
        assert_eq!(bytes(&area), vec![0x12, 0x34]);
        type_str(&mut h, &mut area, "56");
        assert_eq!(bytes(&area), vec![0x12, 0x34]);
        h.backspace(&mut area).unwrap();
        assert_eq!(area.data_size(), 2);
    }

    #[test]
    fn test_text_entry_overwrites_in_preview() {
        let mut area = CodeArea::with_bytes(b"abcd".to_vec());
        let mut h = handler();
        area.set_caret_position(CaretPosition::at(1, Section::TextPreview));
        type_str(&mut h, &mut area, "é");
        assert_eq!(bytes(&area), "aéd".as_bytes().to_vec());
        assert_eq!(area.caret(), CaretPosition::at(3, Section::TextPreview));
        // control codes are not text
        h.key_typed(&mut area, '\u{8}').unwrap();
        assert_eq!(area.data_size(), 4);
    }

    #[test]
    fn test_delete_selection_moves_caret_to_first() {
        let mut area = CodeArea::with_bytes((0..10).collect::<Vec<u8>>());
        let mut h = handler();
        area.set_selection(Some(SelectionRange::new(2, 5))).unwrap();
        h.delete(&mut area).unwrap();
        assert_eq!(bytes(&area), vec![0, 1, 6, 7, 8, 9]);
        assert_eq!(area.caret().data_position, 2);
        assert!(!area.has_selection());
    }

    #[test]
    fn test_backspace_and_delete_single_byte() {
        let mut area = CodeArea::with_bytes(vec![1, 2, 3]);
        let mut h = handler();
        area.set_caret_position(CaretPosition::new(1, 1, Section::CodeMatrix));
        h.delete(&mut area).unwrap();
        assert_eq!(bytes(&area), vec![1, 3]);
        assert_eq!(area.caret(), CaretPosition::at(1, Section::CodeMatrix));
        h.backspace(&mut area).unwrap();
        assert_eq!(bytes(&area), vec![3]);
        assert_eq!(area.caret().data_position, 0);
        h.backspace(&mut area).unwrap();
        assert_eq!(bytes(&area), vec![3]);
    }

    #[test]
    fn test_read_only_mode_is_silent() {
        let mut area = CodeArea::with_bytes(vec![1, 2, 3]);
        let mut h = handler();
        area.set_editation_mode(EditationMode::ReadOnly);
        area.select_all();
        h.key_typed(&mut area, 'F').unwrap();
        h.delete(&mut area).unwrap();
        h.cut(&mut area).unwrap();
        assert_eq!(bytes(&area), vec![1, 2, 3]);
    }

    #[test]
    fn test_read_only_source_is_unsupported() {
        let mut area = CodeArea::new(Box::new(ByteArrayData::read_only(vec![1, 2, 3])));
        let mut h = handler();
        let err = h.key_typed(&mut area, 'F').unwrap_err();
        assert!(matches!(err, CodeAreaError::UnsupportedOperation(_)));
        // copying never mutates and still works
        area.select_all();
        h.copy(&mut area).unwrap();
        assert!(h.can_paste());
    }

    #[test]
    fn test_cut_then_paste_restores() {
        let mut area = CodeArea::with_bytes(vec![1, 2, 3, 4]);
        let mut h = handler();
        area.set_editation_mode(EditationMode::Insert);
        area.set_selection(Some(SelectionRange::new(1, 2))).unwrap();
        h.cut(&mut area).unwrap();
        assert_eq!(bytes(&area), vec![1, 4]);
        h.paste(&mut area).unwrap();
        assert_eq!(bytes(&area), vec![1, 2, 3, 4]);
        assert_eq!(area.caret().data_position, 3);
    }

    #[test]
    fn test_paste_as_code_rejects_whole_input() {
        let mut area = CodeArea::with_bytes(vec![9]);
        let mut h = handler();
        h.clipboard_mut()
            .set_contents(ClipboardContent::text("01 zz 02"))
            .unwrap();
        let err = h.paste_as_code(&mut area).unwrap_err();
        assert!(matches!(err, CodeAreaError::EncodingFailure(_)));
        assert_eq!(bytes(&area), vec![9]);
    }

    #[test]
    fn test_unavailable_clipboard_degrades_to_no_op() {
        let mut clipboard = MemoryClipboard::new();
        clipboard.set_unavailable(true);
        let mut h = DefaultCommandHandler::new(Box::new(clipboard));
        let mut area = CodeArea::with_bytes(vec![1, 2]);
        area.select_all();
        h.copy(&mut area).unwrap();
        h.paste(&mut area).unwrap();
        assert_eq!(bytes(&area), vec![1, 2]);
        assert!(!h.can_paste());
    }
}
