//! Frame driver
//!
//! Called once per host animation frame. By default runs exactly one
//! simulation update per frame, so game speed follows the display refresh
//! rate. `TimestepMode::Fixed` decouples the two with an accumulator, which
//! changes observed speed on displays that are not at the chosen rate.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::sim::{GameEvent, GameState, InputState, tick};

/// Number of frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// How simulation updates are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimestepMode {
    /// One update per animation frame
    #[default]
    PerFrame,
    /// `hz` updates per second of wall time, independent of frame rate
    Fixed { hz: u32 },
}

/// What happened during one frame
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    /// Simulation updates scheduled this frame
    pub updates: u32,
    /// Events raised by those updates and by input since the last frame
    pub events: Vec<GameEvent>,
}

/// Schedules simulation updates against animation frames
#[derive(Debug, Clone)]
pub struct FrameDriver {
    mode: TimestepMode,
    accumulator: f32,
    last_time: f64,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
    /// Set once the accumulator has had to discard time
    backlog_dropped: bool,
}

impl FrameDriver {
    pub fn new(mode: TimestepMode) -> Self {
        Self {
            mode,
            accumulator: 0.0,
            last_time: 0.0,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
            backlog_dropped: false,
        }
    }

    pub fn mode(&self) -> TimestepMode {
        self.mode
    }

    /// Measured frames per second over the last 60 frames (0 until warmed up)
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Run the updates due for a frame at host time `time_ms`
    pub fn frame(&mut self, state: &mut GameState, input: &InputState, time_ms: f64) -> FrameReport {
        let updates = match self.mode {
            TimestepMode::PerFrame => {
                tick(state, input);
                1
            }
            TimestepMode::Fixed { hz } => self.run_fixed(state, input, time_ms, hz),
        };
        self.last_time = time_ms;
        self.track_fps(time_ms);

        let events = state.drain_events();
        for event in &events {
            log::trace!("{:?}", event);
        }

        FrameReport { updates, events }
    }

    fn run_fixed(&mut self, state: &mut GameState, input: &InputState, time_ms: f64, hz: u32) -> u32 {
        let step = 1.0 / hz.max(1) as f32;
        let dt = if self.last_time > 0.0 {
            ((time_ms - self.last_time) / 1000.0) as f32
        } else {
            step
        };
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= step && substeps < MAX_SUBSTEPS {
            tick(state, input);
            self.accumulator -= step;
            substeps += 1;
        }

        // Rate too high to keep up: drop the backlog instead of carrying it
        if substeps == MAX_SUBSTEPS && self.accumulator >= step {
            if !self.backlog_dropped {
                log::warn!(
                    "Fixed timestep of {} Hz cannot keep up; dropping backlog",
                    hz
                );
                self.backlog_dropped = true;
            }
            self.accumulator %= step;
        }
        substeps
    }

    fn track_fps(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample is the slot about to be overwritten
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time_ms - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW as f64 - 1.0) * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(TimestepMode::default())
    }
}
