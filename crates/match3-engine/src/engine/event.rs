use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::matching::Match;

/// Notification emitted while a move is being resolved.
///
/// Serialized as `{"kind": "Match", "match": {...}}` or `{"kind": "Refill"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "kind", content = "match")]
pub enum BoardEvent<T> {
    /// A match about to be cleared. Sent before any cell of the pass is emptied.
    Match(Match<T>),
    /// A cascade pass finished refilling the board.
    Refill,
}

impl<T> BoardEvent<T> {
    #[must_use]
    pub fn as_match(&self) -> Option<&Match<T>> {
        match self {
            Self::Match(m) => Some(m),
            Self::Refill => None,
        }
    }
}

/// Receives board events synchronously, in the order they happen.
///
/// Events are passed by shared reference while the board is mid-resolution,
/// so a listener cannot reach back into the board.
pub trait BoardListener<T> {
    fn on_event(&mut self, event: &BoardEvent<T>);
}

impl<T, F> BoardListener<T> for F
where
    F: FnMut(&BoardEvent<T>),
{
    fn on_event(&mut self, event: &BoardEvent<T>) {
        self(event);
    }
}

/// Single-slot listener registration with direct dispatch.
pub struct EventEmitter<T> {
    listener: Option<Box<dyn BoardListener<T>>>,
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("has_listener", &self.has_listener())
            .finish()
    }
}

impl<T> EventEmitter<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { listener: None }
    }

    /// Registers `listener`, replacing any previous one.
    pub fn set<L>(&mut self, listener: L)
    where
        L: BoardListener<T> + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    #[must_use]
    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Delivers the event built by `event` to the listener, if one is registered.
    ///
    /// `event` is not called when nobody is listening.
    pub fn emit<F>(&mut self, event: F)
    where
        F: FnOnce() -> BoardEvent<T>,
    {
        if let Some(listener) = &mut self.listener {
            listener.on_event(&event());
        }
    }
}
