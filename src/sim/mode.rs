//! Menu / play / instructions / game-over state machine

use super::input::Key;
use super::state::GameMode;

/// Side effect attached to a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    None,
    ResetScores,
}

impl GameMode {
    /// Key-driven transition out of this mode, if any
    ///
    /// `Playing` has no key transitions; it only ends when a side reaches the
    /// winning score.
    pub fn on_key(self, key: Key) -> Option<(GameMode, TransitionEffect)> {
        match (self, key) {
            (GameMode::Menu, Key::Enter) => Some((GameMode::Playing, TransitionEffect::None)),
            (GameMode::Menu, Key::Instructions) => {
                Some((GameMode::Instructions, TransitionEffect::None))
            }
            (GameMode::Instructions, Key::Enter) => Some((GameMode::Menu, TransitionEffect::None)),
            (GameMode::GameOver, Key::Enter) => {
                Some((GameMode::Menu, TransitionEffect::ResetScores))
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Menu => "menu",
            GameMode::Playing => "playing",
            GameMode::Instructions => "instructions",
            GameMode::GameOver => "gameover",
        }
    }
}
