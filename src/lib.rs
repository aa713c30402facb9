//! Arcade Pong - classic Pong against a computer paddle
//!
//! Core modules:
//! - `sim`: Headless simulation (entities, collisions, scoring, game modes)
//! - `renderer`: Mode-specific drawing over an abstract 2D surface
//! - `driver`: Per-frame update scheduling
//! - `platform`: Browser bindings (canvas surface, window size)
//! - `settings`: Player preferences

pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{FrameDriver, TimestepMode};
pub use settings::{Settings, SettingsError, Theme};

/// Game configuration constants
pub mod consts {
    /// Points needed to win a game
    pub const WINNING_SCORE: u32 = 5;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Vertical speed in pixels per update
    pub const PADDLE_SPEED: f32 = 10.0;
    /// Gap between the left wall and the player paddle
    pub const PLAYER_PADDLE_X: f32 = 10.0;
    /// Computer paddle sits at `width - COMPUTER_PADDLE_INSET`
    pub const COMPUTER_PADDLE_INSET: f32 = 20.0;
    /// Fraction of paddle speed the computer uses to chase the ball
    pub const AI_GAIN: f32 = 0.6;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 7.0;
    /// Horizontal serve speed (sign is random)
    pub const BALL_SERVE_SPEED_X: f32 = 7.0;
    /// Vertical serve speed is drawn from `[-BALL_SERVE_SPEED_Y, BALL_SERVE_SPEED_Y)`
    pub const BALL_SERVE_SPEED_Y: f32 = 3.0;

    /// Smallest surface dimension accepted from the host
    pub const MIN_SURFACE_DIMENSION: f32 = 1.0;

    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame delta clamp (seconds) for the fixed timestep accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;
}
