//! Game state and core simulation types
//!
//! Everything the frame update touches lives in [`GameState`]; nothing here
//! knows about the drawing surface or the host.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision;
use crate::consts::*;

/// Which side of the court an entity or point belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    /// Human-controlled, left edge
    Player,
    /// Computer-controlled, right edge
    Computer,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Computer => "Computer",
        }
    }
}

/// Coarse game screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GameMode {
    #[default]
    Menu,
    Playing,
    Instructions,
    GameOver,
}

/// Something notable that happened during an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// Ball reflected off the top or bottom wall
    WallBounce,
    /// Ball reflected off a paddle
    PaddleHit(Side),
    /// A point was scored and the ball was re-served
    Scored(Side),
    /// Game mode transition
    ModeChanged { from: GameMode, to: GameMode },
}

/// Logical size of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    /// Build a surface, clamping degenerate host dimensions to a usable minimum
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: clamp_dimension("width", width),
            height: clamp_dimension("height", height),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

fn clamp_dimension(name: &str, value: f32) -> f32 {
    // NaN fails the comparison and is clamped too
    if value >= MIN_SURFACE_DIMENSION {
        value
    } else {
        log::warn!(
            "Surface {} {} out of range, clamping to {}",
            name,
            value,
            MIN_SURFACE_DIMENSION
        );
        MIN_SURFACE_DIMENSION
    }
}

/// A vertical paddle (position is the top-left corner)
#[derive(Debug, Clone, Serialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Vertical speed magnitude (pixels per update)
    pub speed: f32,
    pub side: Side,
}

impl Paddle {
    /// Player paddle, flush against the left edge
    pub fn player(surface: &Surface) -> Self {
        Self::new(PLAYER_PADDLE_X, surface, Side::Player)
    }

    /// Computer paddle, flush against the right edge
    pub fn computer(surface: &Surface) -> Self {
        Self::new(surface.width - COMPUTER_PADDLE_INSET, surface, Side::Computer)
    }

    fn new(x: f32, surface: &Surface, side: Side) -> Self {
        Self {
            pos: Vec2::new(x, surface.height / 2.0 - PADDLE_HEIGHT / 2.0),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
            side,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    /// Apply held movement keys (player paddle only, one step per update)
    pub fn steer(&mut self, up: bool, down: bool) {
        if up {
            self.pos.y -= self.speed;
        }
        if down {
            self.pos.y += self.speed;
        }
    }

    /// Per-update movement and bounds clamping
    ///
    /// The computer paddle chases the ball's vertical position at a fraction
    /// of full speed, so it can be beaten by steep shots.
    pub fn update(&mut self, ball: Option<&Ball>, surface: &Surface) {
        if self.side == Side::Computer {
            if let Some(ball) = ball {
                let center = self.center_y();
                if ball.pos.y < center {
                    self.pos.y -= self.speed * AI_GAIN;
                } else if ball.pos.y > center {
                    self.pos.y += self.speed * AI_GAIN;
                }
            }
        }

        self.clamp_to(surface);
    }

    /// Keep the paddle inside the surface vertically
    pub fn clamp_to(&mut self, surface: &Surface) {
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
        }
        if self.pos.y + self.height > surface.height {
            self.pos.y = surface.height - self.height;
        }
    }
}

/// Outcome of one ball update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallStep {
    pub wall_bounce: bool,
    pub paddle_hit: Option<Side>,
    pub scored: Option<Side>,
}

/// The ball (position is the center)
#[derive(Debug, Clone, Serialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Create a freshly served ball
    pub fn new<R: Rng>(surface: &Surface, rng: &mut R) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        };
        ball.reset(surface, rng);
        ball
    }

    /// Re-center and serve in a random direction
    pub fn reset<R: Rng>(&mut self, surface: &Surface, rng: &mut R) {
        self.pos = surface.center();
        self.radius = BALL_RADIUS;
        let speed_x = if rng.random_bool(0.5) {
            BALL_SERVE_SPEED_X
        } else {
            -BALL_SERVE_SPEED_X
        };
        let speed_y = rng.random_range(-BALL_SERVE_SPEED_Y..BALL_SERVE_SPEED_Y);
        self.vel = Vec2::new(speed_x, speed_y);
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    /// Advance one update: move, bounce, collide, then score
    pub fn update<R: Rng>(
        &mut self,
        player: &Paddle,
        computer: &Paddle,
        surface: &Surface,
        rng: &mut R,
    ) -> BallStep {
        let mut step = BallStep::default();

        self.pos += self.vel;

        step.wall_bounce = collision::bounce_off_walls(self, surface);

        if collision::hit_player_paddle(self, player) {
            step.paddle_hit = Some(Side::Player);
        }
        if collision::hit_computer_paddle(self, computer) {
            step.paddle_hit = Some(Side::Computer);
        }

        step.scored = collision::scoring_side(self, surface);
        if step.scored.is_some() {
            self.reset(surface, rng);
        }

        step
    }
}

/// Point tallies for both sides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scores {
    pub player: u32,
    pub computer: u32,
}

impl Scores {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Computer => self.computer += 1,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether either side has reached the winning score
    pub fn has_winner(&self) -> bool {
        self.player >= WINNING_SCORE || self.computer >= WINNING_SCORE
    }

    /// Winner for display; ties go to the computer
    pub fn leader(&self) -> Side {
        if self.player > self.computer {
            Side::Player
        } else {
            Side::Computer
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Seed the serve RNG was created from
    pub seed: u64,
    #[serde(skip)]
    rng: Pcg32,
    pub surface: Surface,
    pub mode: GameMode,
    pub scores: Scores,
    pub player: Paddle,
    pub computer: Paddle,
    pub ball: Ball,
    /// Number of playing updates simulated
    pub time_ticks: u64,
    /// Events since the host last drained them
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game in the menu for the given surface size
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        let surface = Surface::new(width, height);
        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = Ball::new(&surface, &mut rng);

        Self {
            seed,
            rng,
            surface,
            mode: GameMode::Menu,
            scores: Scores::default(),
            player: Paddle::player(&surface),
            computer: Paddle::computer(&surface),
            ball,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Host resized the drawing surface
    ///
    /// Only the computer paddle follows the right edge; the player paddle's
    /// offset from the left edge never changes.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.surface = Surface::new(width, height);
        self.computer.pos.x = self.surface.width - COMPUTER_PADDLE_INSET;
        log::debug!(
            "Surface resized to {}x{}",
            self.surface.width,
            self.surface.height
        );
    }

    /// Switch mode, recording the transition
    pub fn set_mode(&mut self, to: GameMode) {
        let from = self.mode;
        if from == to {
            return;
        }
        self.mode = to;
        log::info!("Mode {} -> {}", from.as_str(), to.as_str());
        self.push_event(GameEvent::ModeChanged { from, to });
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Serve a fresh ball from the center
    pub fn reset_ball(&mut self) {
        self.ball.reset(&self.surface, &mut self.rng);
    }

    /// Split borrow for the ball update
    pub(crate) fn step_ball(&mut self) -> BallStep {
        self.ball
            .update(&self.player, &self.computer, &self.surface, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(1, 800.0, 600.0);
        assert_eq!(state.mode, GameMode::Menu);
        assert_eq!(state.scores, Scores::default());
        assert_eq!(state.player.pos, Vec2::new(10.0, 250.0));
        assert_eq!(state.computer.pos, Vec2::new(780.0, 250.0));
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.radius, BALL_RADIUS);
    }

    #[test]
    fn test_surface_clamps_degenerate_dimensions() {
        let surface = Surface::new(0.0, -20.0);
        assert_eq!(surface.width, MIN_SURFACE_DIMENSION);
        assert_eq!(surface.height, MIN_SURFACE_DIMENSION);

        let surface = Surface::new(f32::NAN, 480.0);
        assert_eq!(surface.width, MIN_SURFACE_DIMENSION);
        assert_eq!(surface.height, 480.0);
    }

    #[test]
    fn test_resize_moves_only_computer_paddle() {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.resize(1024.0, 768.0);
        assert_eq!(state.computer.pos.x, 1004.0);
        assert_eq!(state.player.pos.x, PLAYER_PADDLE_X);
        assert_eq!(state.surface, Surface::new(1024.0, 768.0));
    }

    #[test]
    fn test_computer_paddle_chases_ball() {
        let surface = Surface::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut paddle = Paddle::computer(&surface);
        let mut ball = Ball::new(&surface, &mut rng);

        ball.pos.y = 100.0;
        paddle.update(Some(&ball), &surface);
        assert_eq!(paddle.pos.y, 250.0 - PADDLE_SPEED * AI_GAIN);

        ball.pos.y = 500.0;
        let before = paddle.pos.y;
        paddle.update(Some(&ball), &surface);
        assert_eq!(paddle.pos.y, before + PADDLE_SPEED * AI_GAIN);

        // Ball level with the paddle center: no movement
        ball.pos.y = paddle.center_y();
        let before = paddle.pos.y;
        paddle.update(Some(&ball), &surface);
        assert_eq!(paddle.pos.y, before);
    }

    #[test]
    fn test_player_paddle_ignores_ball() {
        let surface = Surface::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut paddle = Paddle::player(&surface);
        let mut ball = Ball::new(&surface, &mut rng);
        ball.pos.y = 0.0;
        paddle.update(Some(&ball), &surface);
        assert_eq!(paddle.pos.y, 250.0);
    }

    #[test]
    fn test_steer_applies_both_keys() {
        let surface = Surface::new(800.0, 600.0);
        let mut paddle = Paddle::player(&surface);
        paddle.steer(true, true);
        assert_eq!(paddle.pos.y, 250.0);
        paddle.steer(true, false);
        assert_eq!(paddle.pos.y, 240.0);
        paddle.steer(false, true);
        assert_eq!(paddle.pos.y, 250.0);
    }

    #[test]
    fn test_scores_leader_and_winner() {
        let mut scores = Scores::default();
        assert!(!scores.has_winner());
        assert_eq!(scores.leader(), Side::Computer);

        for _ in 0..WINNING_SCORE {
            scores.award(Side::Player);
        }
        assert!(scores.has_winner());
        assert_eq!(scores.leader(), Side::Player);

        scores.reset();
        assert_eq!(scores, Scores::default());
    }

    #[test]
    fn test_set_mode_records_transition() {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.set_mode(GameMode::Playing);
        state.set_mode(GameMode::Playing);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ModeChanged {
                from: GameMode::Menu,
                to: GameMode::Playing
            }]
        );
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_same_seed_same_serves() {
        let mut a = GameState::new(42, 800.0, 600.0);
        let mut b = GameState::new(42, 800.0, 600.0);
        for _ in 0..10 {
            a.reset_ball();
            b.reset_ball();
            assert_eq!(a.ball.vel, b.ball.vel);
        }
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_bounds(
            start_y in -2000.0f32..2000.0,
            height in 100.0f32..2000.0,
            ball_y in -500.0f32..2500.0,
            is_computer in any::<bool>(),
        ) {
            let surface = Surface::new(800.0, height);
            let mut rng = Pcg32::seed_from_u64(0);
            let mut paddle = if is_computer {
                Paddle::computer(&surface)
            } else {
                Paddle::player(&surface)
            };
            let mut ball = Ball::new(&surface, &mut rng);
            ball.pos.y = ball_y;
            paddle.pos.y = start_y;

            paddle.update(Some(&ball), &surface);

            prop_assert!(paddle.pos.y >= 0.0);
            prop_assert!(paddle.pos.y <= surface.height - paddle.height);
        }

        #[test]
        fn prop_reset_serves_from_center(
            seed in any::<u64>(),
            width in 1.0f32..4000.0,
            height in 1.0f32..4000.0,
        ) {
            let surface = Surface::new(width, height);
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut ball = Ball::new(&surface, &mut rng);
            ball.pos = Vec2::new(-50.0, 12.0);

            ball.reset(&surface, &mut rng);

            prop_assert_eq!(ball.pos, Vec2::new(width / 2.0, height / 2.0));
            prop_assert_eq!(ball.vel.x.abs(), BALL_SERVE_SPEED_X);
            prop_assert!(ball.vel.y >= -BALL_SERVE_SPEED_Y);
            prop_assert!(ball.vel.y < BALL_SERVE_SPEED_Y);
            prop_assert_eq!(ball.radius, BALL_RADIUS);
        }
    }
}
