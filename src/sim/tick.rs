//! Per-frame simulation update and key handling

use super::input::{InputState, Key};
use super::mode::TransitionEffect;
use super::state::{GameEvent, GameMode, GameState};

/// Handle a host key-down event
///
/// The key is marked held, then menu-level transitions are evaluated if the
/// game is not in play. With `debounce` set, auto-repeat key-downs for an
/// already-held key do not trigger transitions.
///
/// Returns the new mode if a transition happened.
pub fn handle_key_down(
    state: &mut GameState,
    input: &mut InputState,
    key_id: &str,
    debounce: bool,
) -> Option<GameMode> {
    let key = Key::from_identifier(key_id)?;
    let fresh = input.key_down(key);
    if debounce && !fresh {
        log::trace!("{} repeat ignored", key.identifier());
        return None;
    }
    if state.mode == GameMode::Playing {
        return None;
    }

    let (to, effect) = state.mode.on_key(key)?;
    if effect == TransitionEffect::ResetScores {
        state.scores.reset();
    }
    state.set_mode(to);
    Some(to)
}

/// Handle a host key-up event
pub fn handle_key_up(input: &mut InputState, key_id: &str) {
    if let Some(key) = Key::from_identifier(key_id) {
        input.key_up(key);
    }
}

/// Advance the game by one update
///
/// Only the `Playing` mode simulates; other modes are static screens.
/// Returns true if the simulation advanced.
pub fn tick(state: &mut GameState, input: &InputState) -> bool {
    if state.mode != GameMode::Playing {
        return false;
    }

    state.time_ticks += 1;

    state
        .player
        .steer(input.is_held(Key::ArrowUp), input.is_held(Key::ArrowDown));
    state.player.update(None, &state.surface);
    state.computer.update(Some(&state.ball), &state.surface);

    let step = state.step_ball();
    if step.wall_bounce {
        state.push_event(GameEvent::WallBounce);
    }
    if let Some(side) = step.paddle_hit {
        log::debug!("{} paddle hit", side.as_str());
        state.push_event(GameEvent::PaddleHit(side));
    }
    if let Some(side) = step.scored {
        state.scores.award(side);
        log::info!(
            "{} scores ({} - {})",
            side.as_str(),
            state.scores.player,
            state.scores.computer
        );
        state.push_event(GameEvent::Scored(side));
    }

    if state.scores.has_winner() {
        log::info!("{} wins", state.scores.leader().as_str());
        state.set_mode(GameMode::GameOver);
    }

    true
}

/// Steer the player paddle toward the ball by holding arrow keys
///
/// Used by the headless demo; keeps a dead zone around the paddle center so
/// the paddle does not jitter.
pub fn autopilot(state: &GameState, input: &mut InputState) {
    let paddle = &state.player;
    let target = state.ball.pos.y;
    let dead_zone = paddle.height / 4.0;
    let center = paddle.center_y();

    input.key_up(Key::ArrowUp);
    input.key_up(Key::ArrowDown);
    if target < center - dead_zone {
        input.key_down(Key::ArrowUp);
    } else if target > center + dead_zone {
        input.key_down(Key::ArrowDown);
    }
}
