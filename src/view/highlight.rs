//! Extra background/foreground coloring on top of the base grid
//!
//! Two hooks exist: search matches (a list of byte spans with one "current"
//! match) colored as backgrounds, and non-ASCII highlighting that gives code
//! digits of control and high bytes their own text color.

use crate::theme::{Color, ColorProfile};

/// Byte span found by a host-side search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub position: u64,
    pub length: u64,
}

impl SearchMatch {
    pub fn new(position: u64, length: u64) -> Self {
        Self { position, length }
    }

    pub fn end(&self) -> u64 {
        self.position.saturating_add(self.length)
    }

    pub fn contains(&self, position: u64) -> bool {
        position >= self.position && position < self.end()
    }
}

/// Ordered, non-overlapping matches plus the index of the current one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHighlight {
    matches: Vec<SearchMatch>,
    current: Option<usize>,
}

impl SearchHighlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the match list; matches are kept sorted by position
    pub fn set_matches(&mut self, mut matches: Vec<SearchMatch>) {
        matches.retain(|m| m.length > 0);
        matches.sort_by_key(|m| m.position);
        self.matches = matches;
        self.current = None;
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    pub fn clear(&mut self) {
        self.matches.clear();
        self.current = None;
    }

    pub fn current(&self) -> Option<&SearchMatch> {
        self.current.and_then(|i| self.matches.get(i))
    }

    /// Returns false when `index` is out of range
    pub fn set_current(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) if i >= self.matches.len() => false,
            _ => {
                self.current = index;
                true
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Match covering `position`, found by binary search
    pub fn match_at(&self, position: u64) -> Option<(usize, &SearchMatch)> {
        let index = self.matches.partition_point(|m| m.end() <= position);
        self.matches
            .get(index)
            .filter(|m| m.contains(position))
            .map(|m| (index, m))
    }

    /// Background override for the byte at `position`
    pub fn background(&self, position: u64, colors: &ColorProfile) -> Option<Color> {
        let (index, _) = self.match_at(position)?;
        if Some(index) == self.current {
            Some(colors.current_match_background)
        } else {
            Some(colors.match_background)
        }
    }
}

/// Text color class of a byte for non-ASCII highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteClass {
    Control,
    Ascii,
    AboveAscii,
}

impl ByteClass {
    pub fn of(value: u8) -> Self {
        match value {
            0x00..=0x1F => ByteClass::Control,
            0x20..=0x7F => ByteClass::Ascii,
            _ => ByteClass::AboveAscii,
        }
    }

    /// Text color override, `None` for plain ASCII
    pub fn color(self, colors: &ColorProfile) -> Option<Color> {
        match self {
            ByteClass::Control => Some(colors.control_code_color),
            ByteClass::Ascii => None,
            ByteClass::AboveAscii => Some(colors.above_ascii_color),
        }
    }
}
