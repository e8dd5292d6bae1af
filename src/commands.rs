//! Command types for the Elm-style architecture
//!
//! Commands represent side effects the host performs after an update.

use crate::error::CodeAreaError;

// ============================================================================
// Damage Tracking (partial redraw optimization)
// ============================================================================

/// Represents which parts of the widget need repainting
///
/// When in doubt, use `Damage::Full` for correctness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Damage {
    /// No redraw needed (default state for accumulation)
    #[default]
    None,
    /// Redraw everything (always safe fallback)
    Full,
    /// Redraw specific areas only
    Areas(Vec<DamageArea>),
}

/// Regions of the widget that can be repainted independently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageArea {
    /// Grid, preview, backgrounds and cursor
    DataView,
    /// Caret cell only (blink)
    Cursor,
    Header,
    RowNumbers,
    Scrollbars,
}

impl Damage {
    pub fn areas(areas: Vec<DamageArea>) -> Self {
        if areas.is_empty() {
            Damage::None
        } else {
            Damage::Areas(areas)
        }
    }

    pub fn cursor() -> Self {
        Damage::Areas(vec![DamageArea::Cursor])
    }

    /// Merge another damage into this one
    ///
    /// Full absorbs everything, None is the identity.
    pub fn merge(&mut self, other: Damage) {
        match (&mut *self, other) {
            (Damage::None, other) => *self = other,
            (_, Damage::None) => {}
            (Damage::Full, _) => {}
            (this, Damage::Full) => *this = Damage::Full,
            (Damage::Areas(areas), Damage::Areas(other_areas)) => {
                for area in other_areas {
                    if !areas.contains(&area) {
                        areas.push(area);
                    }
                }
            }
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Damage::Full)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Damage::None)
    }

    /// True when nothing but the caret cell changed
    pub fn is_cursor_only(&self) -> bool {
        matches!(self, Damage::Areas(areas) if areas.as_slice() == [DamageArea::Cursor])
    }
}

/// Side effects requested by [`update`](crate::update::update)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Repaint the whole widget
    Redraw,
    /// Repaint some regions only
    RedrawAreas(Vec<DamageArea>),
    /// An edit failed in a way the host has to decide about
    ReportError(CodeAreaError),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::RedrawAreas(areas) => !areas.is_empty(),
            // the failed edit re-clamped the caret, so repaint
            Cmd::ReportError(_) => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Combined damage of this command; batches merge their parts
    pub fn damage(&self) -> Damage {
        match self {
            Cmd::None => Damage::None,
            Cmd::Redraw | Cmd::ReportError(_) => Damage::Full,
            Cmd::RedrawAreas(areas) => Damage::areas(areas.clone()),
            Cmd::Batch(cmds) => {
                let mut damage = Damage::None;
                for cmd in cmds {
                    damage.merge(cmd.damage());
                    if damage.is_full() {
                        break;
                    }
                }
                damage
            }
        }
    }

    /// First error carried by this command, if any
    pub fn error(&self) -> Option<&CodeAreaError> {
        match self {
            Cmd::ReportError(err) => Some(err),
            Cmd::Batch(cmds) => cmds.iter().find_map(|c| c.error()),
            _ => None,
        }
    }
}
