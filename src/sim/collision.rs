//! Collision detection and response for the rectangular court
//!
//! All checks are axis-aligned. Reflection is a sign flip on one velocity
//! component; paddle hits also snap the ball flush against the paddle face so
//! the same contact cannot reflect twice.

use super::state::{Ball, Paddle, Side, Surface};

/// Reflect off the top or bottom wall
///
/// Returns true if the vertical velocity was flipped.
pub fn bounce_off_walls(ball: &mut Ball, surface: &Surface) -> bool {
    if ball.pos.y - ball.radius < 0.0 || ball.pos.y + ball.radius > surface.height {
        ball.vel.y = -ball.vel.y;
        return true;
    }
    false
}

/// Whether the ball's center lies strictly inside the paddle's vertical span
///
/// Strict on both ends: a ball exactly level with a paddle edge is a miss.
#[inline]
pub fn within_paddle_span(ball: &Ball, paddle: &Paddle) -> bool {
    ball.pos.y > paddle.top() && ball.pos.y < paddle.bottom()
}

/// Resolve contact with the left (player) paddle
pub fn hit_player_paddle(ball: &mut Ball, paddle: &Paddle) -> bool {
    if ball.left() < paddle.right() && within_paddle_span(ball, paddle) {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = paddle.right() + ball.radius;
        log::trace!("Player paddle hit at y={:.1}", ball.pos.y);
        return true;
    }
    false
}

/// Resolve contact with the right (computer) paddle
pub fn hit_computer_paddle(ball: &mut Ball, paddle: &Paddle) -> bool {
    if ball.right() > paddle.left() && within_paddle_span(ball, paddle) {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = paddle.left() - ball.radius;
        log::trace!("Computer paddle hit at y={:.1}", ball.pos.y);
        return true;
    }
    false
}

/// Side that earns a point if the ball has fully left the court
pub fn scoring_side(ball: &Ball, surface: &Surface) -> Option<Side> {
    if ball.right() < 0.0 {
        Some(Side::Computer)
    } else if ball.left() > surface.width {
        Some(Side::Player)
    } else {
        None
    }
}
