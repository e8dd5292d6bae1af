//! Byte selection with anchor (fixed end) and head (moving end)
//!
//! Both ends are caret positions, i.e. boundaries between bytes. The
//! selected bytes are `min(anchor, head)..max(anchor, head)`, exposed as an
//! inclusive [`SelectionRange`]. A selection whose ends meet is never
//! stored: the model keeps `Option<Selection>` and clears it instead.

/// Inclusive byte range, always `first <= last`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    pub first: u64,
    pub last: u64,
}

impl SelectionRange {
    pub fn new(first: u64, last: u64) -> Self {
        Self {
            first: first.min(last),
            last: first.max(last),
        }
    }

    pub fn len(&self) -> u64 {
        self.last - self.first + 1
    }

    pub fn contains(&self, position: u64) -> bool {
        position >= self.first && position <= self.last
    }

    /// Range clipped to `data_size`, `None` if nothing remains
    pub fn clamped(&self, data_size: u64) -> Option<Self> {
        if data_size == 0 || self.first >= data_size {
            return None;
        }
        Some(Self::new(self.first, self.last.min(data_size - 1)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection started
    pub anchor: u64,
    /// Boundary following the caret
    pub head: u64,
}

impl Selection {
    /// `None` when `anchor == head`
    pub fn new(anchor: u64, head: u64) -> Option<Self> {
        (anchor != head).then_some(Self { anchor, head })
    }

    /// Selection covering exactly `range`
    pub fn from_range(range: SelectionRange) -> Self {
        Self {
            anchor: range.first,
            head: range.last + 1,
        }
    }

    pub fn start(&self) -> u64 {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> u64 {
        self.anchor.max(self.head)
    }

    pub fn is_reversed(&self) -> bool {
        self.head < self.anchor
    }

    pub fn range(&self) -> SelectionRange {
        SelectionRange::new(self.start(), self.end() - 1)
    }

    pub fn contains(&self, position: u64) -> bool {
        position >= self.start() && position < self.end()
    }

    /// Moves the head; `None` when it lands on the anchor
    pub fn extended_to(self, head: u64) -> Option<Self> {
        Selection::new(self.anchor, head)
    }

    /// Clips both ends to `data_size`
    pub fn clamped(self, data_size: u64) -> Option<Self> {
        Selection::new(self.anchor.min(data_size), self.head.min(data_size))
    }
}

/// Selection after the caret moved from `from` to `to`.
///
/// Without `extend` any selection is dropped. With `extend`, a missing
/// selection starts at `from`, an existing one moves its head.
pub fn update_selection(
    current: Option<Selection>,
    from: u64,
    to: u64,
    extend: bool,
) -> Option<Selection> {
    if !extend {
        return None;
    }
    match current {
        Some(selection) => selection.extended_to(to),
        None => Selection::new(from, to),
    }
}
