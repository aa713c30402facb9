//! Keyboard state
//!
//! Only a handful of key identifiers mean anything to the game; everything
//! else is dropped at the boundary.

use std::collections::HashSet;

use serde::Serialize;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter,
    /// Lowercase `i`, opens the instructions screen
    Instructions,
}

impl Key {
    /// Map a host key identifier (`KeyboardEvent.key`) to a game key
    ///
    /// Matching is exact: `I` (shifted) is not the instructions key.
    pub fn from_identifier(id: &str) -> Option<Self> {
        match id {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "Enter" => Some(Key::Enter),
            "i" => Some(Key::Instructions),
            _ => None,
        }
    }

    pub fn identifier(&self) -> &'static str {
        match self {
            Key::ArrowUp => "ArrowUp",
            Key::ArrowDown => "ArrowDown",
            Key::Enter => "Enter",
            Key::Instructions => "i",
        }
    }
}

/// Set of currently held keys
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key held; returns true if this is a fresh press
    ///
    /// Host auto-repeat delivers extra key-downs for a held key, which report
    /// false here.
    pub fn key_down(&mut self, key: Key) -> bool {
        self.held.insert(key)
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Drop all held keys (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}
