//! Simulation module
//!
//! All gameplay logic lives here. This module must stay headless:
//! - One update per call, velocities in pixels per update
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod mode;
pub mod state;
pub mod tick;

pub use collision::{bounce_off_walls, hit_computer_paddle, hit_player_paddle, scoring_side};
pub use input::{InputState, Key};
pub use mode::TransitionEffect;
pub use state::{Ball, BallStep, GameEvent, GameMode, GameState, Paddle, Scores, Side, Surface};
pub use tick::{autopilot, handle_key_down, handle_key_up, tick};
