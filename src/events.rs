//! Change notifications
//!
//! One typed listener list per category. Listeners are plain closures
//! registered on the widget; the returned [`ListenerId`] removes them again.

use std::fmt;

use crate::model::{CaretPosition, EditationMode, SelectionRange};
use crate::scroll::ScrollPosition;

/// Handle for removing a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// Ordered callbacks for a single event type
pub struct ListenerList<T> {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener<T>)>,
}

impl<T> ListenerList<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn add(&mut self, listener: impl FnMut(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not registered
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &T) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T> Default for ListenerList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ListenerList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerList")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Payload of a data change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataChange {
    /// The whole data source was swapped
    Replaced { data_size: u64 },
    /// Bytes were modified in place, inserted or removed
    Modified { data_size: u64 },
}

impl DataChange {
    pub fn data_size(&self) -> u64 {
        match *self {
            DataChange::Replaced { data_size } | DataChange::Modified { data_size } => data_size,
        }
    }
}

/// All notification channels of a code area
#[derive(Debug, Default)]
pub struct CodeAreaEvents {
    pub caret_moved: ListenerList<CaretPosition>,
    pub selection_changed: ListenerList<Option<SelectionRange>>,
    pub data_changed: ListenerList<DataChange>,
    pub scrolled: ListenerList<ScrollPosition>,
    pub editation_mode_changed: ListenerList<EditationMode>,
}
