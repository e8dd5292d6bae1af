//! Text codecs for the preview section
//!
//! The preview decodes raw bytes into characters and text entry encodes
//! typed characters back into bytes. Both directions go through
//! [`TextCodec`] so a host can plug in any charset it supports.

use crate::error::{CodeAreaError, Result};

/// Character set used by the text preview and by text entry/paste
pub trait TextCodec {
    /// Canonical charset name, e.g. `"UTF-8"`
    fn name(&self) -> &str;

    /// Longest byte sequence a single character can encode to
    fn max_bytes_per_char(&self) -> usize;

    /// Encodes one character, `None` if the charset cannot represent it
    fn encode_char(&self, ch: char) -> Option<Vec<u8>>;

    /// Decodes the character starting at `bytes[0]`.
    ///
    /// Returns the character and how many bytes it consumed, or `None`
    /// when the bytes do not start a valid sequence.
    fn decode_char(&self, bytes: &[u8]) -> Option<(char, usize)>;

    /// Single-byte charsets expose their full decode table so the painter
    /// can map bytes without going through `decode_char` per cell.
    fn single_byte_table(&self) -> Option<[char; 256]> {
        None
    }

    /// Encodes a whole string, failing on the first unrepresentable char
    fn encode_str(&self, text: &str) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(text.len());
        for ch in text.chars() {
            let bytes = self.encode_char(ch).ok_or_else(|| {
                CodeAreaError::EncodingFailure(format!(
                    "character {:?} is not representable in {}",
                    ch,
                    self.name()
                ))
            })?;
            out.extend_from_slice(&bytes);
        }
        Ok(out)
    }

    /// Encodes a whole string, writing `?` for unrepresentable chars
    fn encode_str_lossy(&self, text: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(text.len());
        for ch in text.chars() {
            match self.encode_char(ch) {
                Some(bytes) => out.extend_from_slice(&bytes),
                None => out.push(b'?'),
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Codec;

impl TextCodec for Utf8Codec {
    fn name(&self) -> &str {
        "UTF-8"
    }

    fn max_bytes_per_char(&self) -> usize {
        4
    }

    fn encode_char(&self, ch: char) -> Option<Vec<u8>> {
        let mut buf = [0u8; 4];
        Some(ch.encode_utf8(&mut buf).as_bytes().to_vec())
    }

    fn decode_char(&self, bytes: &[u8]) -> Option<(char, usize)> {
        let first = *bytes.first()?;
        let len = match first {
            0x00..=0x7F => 1,
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return None,
        };
        let slice = bytes.get(..len)?;
        let text = std::str::from_utf8(slice).ok()?;
        text.chars().next().map(|ch| (ch, len))
    }

    fn encode_str(&self, text: &str) -> Result<Vec<u8>> {
        Ok(text.as_bytes().to_vec())
    }

    fn encode_str_lossy(&self, text: &str) -> Vec<u8> {
        text.as_bytes().to_vec()
    }
}

/// ISO-8859-1: every byte maps to the code point of the same value
#[derive(Debug, Clone, Copy, Default)]
pub struct Latin1Codec;

impl TextCodec for Latin1Codec {
    fn name(&self) -> &str {
        "ISO-8859-1"
    }

    fn max_bytes_per_char(&self) -> usize {
        1
    }

    fn encode_char(&self, ch: char) -> Option<Vec<u8>> {
        u8::try_from(ch as u32).ok().map(|b| vec![b])
    }

    fn decode_char(&self, bytes: &[u8]) -> Option<(char, usize)> {
        bytes.first().map(|&b| (b as char, 1))
    }

    fn single_byte_table(&self) -> Option<[char; 256]> {
        let mut table = ['\0'; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8 as char;
        }
        Some(table)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiCodec;

impl TextCodec for AsciiCodec {
    fn name(&self) -> &str {
        "US-ASCII"
    }

    fn max_bytes_per_char(&self) -> usize {
        1
    }

    fn encode_char(&self, ch: char) -> Option<Vec<u8>> {
        ch.is_ascii().then(|| vec![ch as u8])
    }

    fn decode_char(&self, bytes: &[u8]) -> Option<(char, usize)> {
        bytes
            .first()
            .filter(|b| b.is_ascii())
            .map(|&b| (b as char, 1))
    }

    fn single_byte_table(&self) -> Option<[char; 256]> {
        let mut table = [char::REPLACEMENT_CHARACTER; 256];
        for (i, slot) in table.iter_mut().enumerate().take(0x80) {
            *slot = i as u8 as char;
        }
        Some(table)
    }
}

/// Looks up a built-in codec by charset name (case-insensitive)
pub fn codec_for_name(name: &str) -> Result<Box<dyn TextCodec>> {
    match name.to_ascii_uppercase().as_str() {
        "UTF-8" | "UTF8" => Ok(Box::new(Utf8Codec)),
        "ISO-8859-1" | "LATIN1" | "LATIN-1" => Ok(Box::new(Latin1Codec)),
        "US-ASCII" | "ASCII" => Ok(Box::new(AsciiCodec)),
        _ => Err(CodeAreaError::invalid_argument(format!(
            "unsupported charset '{}'",
            name
        ))),
    }
}

/// Decodes bytes as UTF-8 for the clipboard text fallback
pub fn bytes_to_text_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
