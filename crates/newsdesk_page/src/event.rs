//! Event types for the synchronous page event model
//!
//! All widget interaction flows through these events. Handlers run to
//! completion before the next event is delivered, so a handler may freely
//! mutate the fragment it is bound to without interleaving concerns.
//!
//! `Change` events are never synthesized by callers directly: they are
//! queued by [`Fragment::write_value`](crate::fragment::Fragment::write_value)
//! and drained by whoever owns the dispatch loop.

use crate::fragment::ElementId;

/// A key press as seen by a focused form control
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCode {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    /// Any printable character; the resulting text edit arrives as an
    /// `Input` event, so listeners rarely inspect this directly.
    Char(char),
}

/// What happened, independent of where
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// The element gained keyboard focus
    FocusGained,
    /// The element's text value was edited by the user
    Input,
    /// A key went down while the element had focus
    KeyDown(KeyCode),
    /// A pointer interaction landed on the element
    Click,
    /// The element's value was written programmatically
    Change,
}

/// An event targeted at a single element of a fragment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    pub target: ElementId,
    pub kind: EventKind,
}

impl Event {
    pub fn new(target: ElementId, kind: EventKind) -> Self {
        Self { target, kind }
    }
}
