//! Numeral bases used to render bytes as code digits
//!
//! A [`CodeType`] fixes how many digits each byte occupies in the code
//! matrix and which characters are valid at each digit position. The
//! positional arithmetic for single-digit edits and the copy/paste-as-code
//! string format live here as well, so the command handler only has to
//! decide *where* a digit goes.

use serde::{Deserialize, Serialize};

use crate::error::{CodeAreaError, Result};

const UPPER_DIGITS: &[u8; 16] = b"0123456789ABCDEF";
const LOWER_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Numeral base of the code matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeType {
    Binary,
    Octal,
    Decimal,
    #[default]
    Hexadecimal,
}

impl CodeType {
    pub const ALL: [CodeType; 4] = [
        CodeType::Binary,
        CodeType::Octal,
        CodeType::Decimal,
        CodeType::Hexadecimal,
    ];

    pub const fn base(self) -> u32 {
        match self {
            CodeType::Binary => 2,
            CodeType::Octal => 8,
            CodeType::Decimal => 10,
            CodeType::Hexadecimal => 16,
        }
    }

    /// Number of digits a single byte is rendered with
    pub const fn max_digits(self) -> usize {
        match self {
            CodeType::Binary => 8,
            CodeType::Octal => 3,
            CodeType::Decimal => 3,
            CodeType::Hexadecimal => 2,
        }
    }

    /// Weight of the digit at `code_offset` (most significant digit first)
    fn place_value(self, code_offset: usize) -> u32 {
        let exponent = (self.max_digits() - 1).saturating_sub(code_offset) as u32;
        self.base().pow(exponent)
    }

    /// Numeric value of `ch` in this base, ignoring position
    pub fn digit_value(self, ch: char) -> Option<u8> {
        ch.to_digit(self.base()).map(|d| d as u8)
    }

    /// Whether `ch` may be typed at `code_offset`.
    ///
    /// The leading digit of octal and decimal codes has a narrower range
    /// so a typed byte can never start above 255.
    pub fn is_valid_digit(self, ch: char, code_offset: usize) -> bool {
        match self {
            CodeType::Binary => matches!(ch, '0' | '1'),
            CodeType::Octal if code_offset == 0 => matches!(ch, '0'..='3'),
            CodeType::Octal => matches!(ch, '0'..='7'),
            CodeType::Decimal if code_offset == 0 => matches!(ch, '0'..='2'),
            CodeType::Decimal => ch.is_ascii_digit(),
            CodeType::Hexadecimal => ch.is_ascii_hexdigit(),
        }
    }

    /// Writes the digits of `value` into `out`, which must hold at least
    /// [`max_digits`](Self::max_digits) characters.
    pub fn byte_to_chars(self, value: u8, case: CodeCharactersCase, out: &mut [char]) {
        let table = case.table();
        let base = self.base();
        for (offset, slot) in out.iter_mut().take(self.max_digits()).enumerate() {
            let digit = (value as u32 / self.place_value(offset)) % base;
            *slot = table[digit as usize] as char;
        }
    }

    pub fn format_byte(self, value: u8, case: CodeCharactersCase) -> String {
        let mut chars = ['0'; 8];
        self.byte_to_chars(value, case, &mut chars);
        chars[..self.max_digits()].iter().collect()
    }

    /// Parses a single code token (1..=max_digits characters) into a byte
    pub fn parse_byte(self, code: &str) -> Result<u8> {
        let len = code.chars().count();
        if len == 0 {
            return Err(CodeAreaError::EncodingFailure("empty code".into()));
        }
        if len > self.max_digits() {
            return Err(CodeAreaError::EncodingFailure(format!(
                "code '{}' is longer than {} digits",
                code,
                self.max_digits()
            )));
        }

        let mut value: u32 = 0;
        for ch in code.chars() {
            let digit = self.digit_value(ch).ok_or_else(|| {
                CodeAreaError::EncodingFailure(format!("invalid character '{}' in '{}'", ch, code))
            })?;
            value = value * self.base() + digit as u32;
        }

        u8::try_from(value).map_err(|_| {
            CodeAreaError::EncodingFailure(format!("number '{}' is too big for a byte", code))
        })
    }

    /// Replaces the digit at `code_offset` of `value` with `digit`.
    ///
    /// Octal and decimal place-value arithmetic can overflow a byte. Decimal
    /// clamps the leading digit to 200 and subtracts 200 for interior
    /// digits; octal truncates to eight bits.
    pub fn set_digit(self, value: u8, digit: u8, code_offset: usize) -> u8 {
        let digit = digit as u32;
        let current = value as u32;
        match self {
            CodeType::Binary => {
                let mask = 0x80u32 >> code_offset;
                ((current & !mask) | (digit << (7 - code_offset))) as u8
            }
            CodeType::Hexadecimal => {
                if code_offset == 1 {
                    ((current & 0xF0) | digit) as u8
                } else {
                    ((current & 0x0F) | (digit << 4)) as u8
                }
            }
            CodeType::Decimal => {
                let updated = match code_offset {
                    0 => {
                        let v = current % 100 + digit * 100;
                        if v > 255 {
                            200
                        } else {
                            v
                        }
                    }
                    1 => {
                        let v = (current / 100) * 100 + digit * 10 + current % 10;
                        if v > 255 {
                            v - 200
                        } else {
                            v
                        }
                    }
                    _ => {
                        let v = (current / 10) * 10 + digit;
                        if v > 255 {
                            v - 200
                        } else {
                            v
                        }
                    }
                };
                updated as u8
            }
            CodeType::Octal => {
                let updated = match code_offset {
                    0 => current % 64 + digit * 64,
                    1 => (current / 64) * 64 + digit * 8 + current % 8,
                    _ => (current / 8) * 8 + digit,
                };
                (updated & 0xFF) as u8
            }
        }
    }

    /// Value of the digits from `code_offset` to the end of the byte
    pub fn trailing_digits_value(self, value: u8, code_offset: usize) -> u8 {
        let modulus = self.base() * self.place_value(code_offset);
        (value as u32 % modulus) as u8
    }
}

/// Letter case used for hexadecimal digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeCharactersCase {
    Lower,
    #[default]
    Upper,
}

impl CodeCharactersCase {
    fn table(self) -> &'static [u8; 16] {
        match self {
            CodeCharactersCase::Lower => LOWER_DIGITS,
            CodeCharactersCase::Upper => UPPER_DIGITS,
        }
    }
}

/// Numeral base used for row numbers and header labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionCodeType {
    Octal,
    Decimal,
    #[default]
    Hexadecimal,
}

impl PositionCodeType {
    pub const fn base(self) -> u64 {
        match self {
            PositionCodeType::Octal => 8,
            PositionCodeType::Decimal => 10,
            PositionCodeType::Hexadecimal => 16,
        }
    }

    /// Digits needed to print every position in `0..=data_size`, minimum 1.
    ///
    /// Equivalent to `ceil(log_base(data_size + 1))` without floating point.
    pub fn digits_for(self, data_size: u64) -> usize {
        let base = self.base();
        let mut digits = 1;
        let mut limit = base;
        while limit <= data_size {
            digits += 1;
            match limit.checked_mul(base) {
                Some(next) => limit = next,
                None => break,
            }
        }
        digits
    }

    /// Writes `value` right-aligned into `out`, zero padded, keeping the
    /// least significant digits when `out` is too short.
    pub fn format_into(self, value: u64, case: CodeCharactersCase, out: &mut [char]) {
        let table = case.table();
        let base = self.base();
        let mut rest = value;
        for slot in out.iter_mut().rev() {
            *slot = table[(rest % base) as usize] as char;
            rest /= base;
        }
    }

    pub fn format(self, value: u64, digits: usize, case: CodeCharactersCase) -> String {
        let mut chars = vec!['0'; digits];
        self.format_into(value, case, &mut chars);
        chars.into_iter().collect()
    }
}

/// Characters that end a token in paste-as-code input
pub fn is_code_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, ',' | ';' | ':')
}

/// Renders `bytes` as fixed-width codes separated by single spaces
pub fn encode_code_string(bytes: &[u8], code_type: CodeType, case: CodeCharactersCase) -> String {
    let digits = code_type.max_digits();
    let mut out = String::with_capacity(bytes.len() * (digits + 1));
    let mut chars = ['0'; 8];
    for (i, &byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        code_type.byte_to_chars(byte, case, &mut chars);
        out.extend(&chars[..digits]);
    }
    out
}

/// Parses paste-as-code input into bytes.
///
/// Tokens end at a delimiter (whitespace, `,`, `;`, `:`) or after
/// `max_digits` characters, so both `"01 0a ff"` and `"010aff"` parse to
/// the same bytes. Empty tokens between consecutive delimiters are skipped.
/// The whole input is validated before anything is returned.
pub fn parse_code_string(text: &str, code_type: CodeType) -> Result<Vec<u8>> {
    let max_digits = code_type.max_digits();
    let mut bytes = Vec::with_capacity(text.len() / (max_digits + 1) + 1);
    let mut token = String::with_capacity(max_digits);

    for ch in text.chars() {
        if is_code_delimiter(ch) {
            if !token.is_empty() {
                bytes.push(code_type.parse_byte(&token)?);
                token.clear();
            }
            continue;
        }

        token.push(ch);
        if token.chars().count() == max_digits {
            bytes.push(code_type.parse_byte(&token)?);
            token.clear();
        }
    }

    if !token.is_empty() {
        bytes.push(code_type.parse_byte(&token)?);
    }

    Ok(bytes)
}
