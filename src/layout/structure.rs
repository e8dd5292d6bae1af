//! Column structure of a single row
//!
//! A row is measured in character columns. In the code matrix each byte
//! takes `max_digits` columns, separated by grouping gaps; the text preview
//! takes one column per byte and starts one column after the code matrix in
//! dual view. Every conversion between columns and bytes on a row goes
//! through [`RowStructure`], so painting, hit testing and caret placement
//! agree on where a byte lives.

use crate::code_type::CodeType;
use crate::model::{Section, ViewMode};

/// Gap columns inserted between bytes of the code matrix.
///
/// A gap of one column follows every `byte_group_size` bytes and a gap of
/// two columns follows every `space_group_size` bytes (the wider gap wins
/// where both apply). A size of 0 disables that kind of gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grouping {
    pub byte_group_size: usize,
    pub space_group_size: usize,
}

impl Grouping {
    /// Digits of neighbouring bytes touch
    pub const NONE: Grouping = Grouping {
        byte_group_size: 0,
        space_group_size: 0,
    };

    pub const fn new(byte_group_size: usize, space_group_size: usize) -> Self {
        Self {
            byte_group_size,
            space_group_size,
        }
    }

    /// Total gap columns before byte `byte` on the row
    pub fn gaps_before(&self, byte: usize) -> usize {
        let spaces = if self.space_group_size > 0 {
            byte / self.space_group_size
        } else {
            0
        };
        let groups = if self.byte_group_size > 0 {
            let all = byte / self.byte_group_size;
            let shared = if self.space_group_size > 0 {
                byte / lcm(self.byte_group_size, self.space_group_size)
            } else {
                0
            };
            all - shared
        } else {
            0
        };
        groups + 2 * spaces
    }

    /// Width of the gap following byte `byte` (0, 1 or 2 columns)
    pub fn gap_after(&self, byte: usize) -> usize {
        self.gaps_before(byte + 1) - self.gaps_before(byte)
    }
}

impl Default for Grouping {
    fn default() -> Self {
        Grouping::new(1, 0)
    }
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: usize, b: usize) -> usize {
    a / gcd(a, b) * b
}

/// What a column of the row shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Digit `code_offset` of byte `byte` in the code matrix
    Code { byte: usize, code_offset: usize },
    /// Gap following byte `byte` in the code matrix
    CodeGap { byte: usize },
    /// Column between code matrix and preview in dual view
    SectionGap,
    /// Preview character of byte `byte`
    Preview { byte: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowStructure {
    pub code_type: CodeType,
    pub view_mode: ViewMode,
    pub bytes_per_row: usize,
    pub grouping: Grouping,
    /// Columns taken by the code matrix (0 in preview-only view)
    pub code_chars: usize,
    /// First column of the preview section
    pub preview_char_pos: usize,
    pub chars_per_row: usize,
}

impl RowStructure {
    pub fn new(
        code_type: CodeType,
        view_mode: ViewMode,
        bytes_per_row: usize,
        grouping: Grouping,
    ) -> Self {
        let bytes_per_row = bytes_per_row.max(1);
        let digits = code_type.max_digits();
        let code_chars = if view_mode.shows_code() {
            (bytes_per_row - 1) * digits + grouping.gaps_before(bytes_per_row - 1) + digits
        } else {
            0
        };
        let (preview_char_pos, chars_per_row) = match view_mode {
            ViewMode::Dual => (code_chars + 1, code_chars + 1 + bytes_per_row),
            ViewMode::CodeMatrixOnly => (code_chars, code_chars),
            ViewMode::TextPreviewOnly => (0, bytes_per_row),
        };

        Self {
            code_type,
            view_mode,
            bytes_per_row,
            grouping,
            code_chars,
            preview_char_pos,
            chars_per_row,
        }
    }

    pub fn digits(&self) -> usize {
        self.code_type.max_digits()
    }

    /// First code column of byte `byte` on the row
    pub fn char_pos(&self, byte: usize) -> usize {
        byte * self.digits() + self.grouping.gaps_before(byte)
    }

    pub fn last_code_char_pos(&self, byte: usize) -> usize {
        self.char_pos(byte) + self.digits() - 1
    }

    /// Byte whose code digits (or trailing gap) cover `column`.
    ///
    /// Exact inverse of [`char_pos`](Self::char_pos): the largest byte `b`
    /// with `char_pos(b) <= column`, clamped to the last byte of the row.
    pub fn byte_from_char(&self, column: usize) -> usize {
        let (mut low, mut high) = (0usize, self.bytes_per_row - 1);
        while low < high {
            let mid = low + (high - low + 1) / 2;
            if self.char_pos(mid) <= column {
                low = mid;
            } else {
                high = mid - 1;
            }
        }
        low
    }

    /// Digit index for `column`, clamped to the last digit for gap columns
    pub fn code_offset_from_char(&self, column: usize) -> usize {
        let byte = self.byte_from_char(column);
        column
            .saturating_sub(self.char_pos(byte))
            .min(self.digits() - 1)
    }

    /// Section the column belongs to; the dual-view section gap counts
    /// as code matrix.
    pub fn section_at(&self, column: usize) -> Section {
        match self.view_mode {
            ViewMode::CodeMatrixOnly => Section::CodeMatrix,
            ViewMode::TextPreviewOnly => Section::TextPreview,
            ViewMode::Dual if column >= self.preview_char_pos => Section::TextPreview,
            ViewMode::Dual => Section::CodeMatrix,
        }
    }

    pub fn column_kind(&self, column: usize) -> ColumnKind {
        if self.section_at(column) == Section::TextPreview {
            return ColumnKind::Preview {
                byte: column - self.preview_char_pos,
            };
        }
        if column >= self.code_chars {
            return ColumnKind::SectionGap;
        }
        let byte = self.byte_from_char(column);
        let offset = column - self.char_pos(byte);
        if offset < self.digits() {
            ColumnKind::Code {
                byte,
                code_offset: offset,
            }
        } else {
            ColumnKind::CodeGap { byte }
        }
    }

    /// Column of the caret at `byte`/`code_offset` in `section`
    pub fn caret_column(&self, byte: usize, code_offset: usize, section: Section) -> usize {
        match section {
            Section::TextPreview => self.preview_char_pos + byte,
            Section::CodeMatrix => self.char_pos(byte) + code_offset,
        }
    }

    /// Rows needed for `data_size` bytes with the first row shifted right
    /// by `row_shift` bytes. An empty document still has one row.
    pub fn rows_per_document(&self, data_size: u64, row_shift: usize) -> u64 {
        let bpr = self.bytes_per_row as u128;
        let shifted = data_size as u128 + row_shift as u128;
        shifted.div_ceil(bpr).max(1) as u64
    }

    /// Row index and byte-on-row of `position`
    pub fn row_and_byte(&self, position: u64, row_shift: usize) -> (u64, usize) {
        let bpr = self.bytes_per_row as u128;
        let shifted = position as u128 + row_shift as u128;
        ((shifted / bpr) as u64, (shifted % bpr) as usize)
    }

    /// `row_shift` reduced below the bytes per row of this structure
    pub fn effective_shift(&self, row_shift: usize) -> usize {
        row_shift % self.bytes_per_row
    }

    /// Data position of the first column of `row`, negative for the part of
    /// the first row that precedes the data when the row is shifted.
    pub fn row_start(&self, row: u64, row_shift: usize) -> i128 {
        row as i128 * self.bytes_per_row as i128 - row_shift as i128
    }

    /// Columns a row of `bytes_per_row` bytes needs in `view_mode`
    pub fn row_width(
        code_type: CodeType,
        view_mode: ViewMode,
        bytes_per_row: usize,
        grouping: Grouping,
    ) -> usize {
        RowStructure::new(code_type, view_mode, bytes_per_row, grouping).chars_per_row
    }

    /// Most bytes per row whose full row fits in `available_chars` columns.
    ///
    /// Capped at `max_bytes_per_row` (0 = no cap), then rounded down to a
    /// multiple of `wrapping_group_size`; never less than 1.
    pub fn fit_bytes_per_row(
        code_type: CodeType,
        view_mode: ViewMode,
        grouping: Grouping,
        available_chars: usize,
        max_bytes_per_row: usize,
        wrapping_group_size: usize,
    ) -> usize {
        let fits = |n: usize| Self::row_width(code_type, view_mode, n, grouping) <= available_chars;
        if !fits(1) {
            return 1;
        }

        let mut high = available_chars.max(1);
        if max_bytes_per_row > 0 {
            high = high.min(max_bytes_per_row);
        }
        let mut low = 1;
        while low < high {
            let mid = low + (high - low + 1) / 2;
            if fits(mid) {
                low = mid;
            } else {
                high = mid - 1;
            }
        }

        if wrapping_group_size > 1 && low >= wrapping_group_size {
            low -= low % wrapping_group_size;
        }
        low.max(1)
    }
}
