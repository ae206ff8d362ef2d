//! Fixed timestep simulation tick
//!
//! Advances one session by exactly one tick. Velocities are per tick, so
//! there is no `dt`; the caller is responsible for pacing.

use glam::Vec2;

use super::rect::{intersects, struck_side};
use super::state::{GameEvent, GameState, Phase};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Launch ball (space, edge-triggered)
    pub launch: bool,
    /// Move paddle left (held)
    pub left: bool,
    /// Move paddle right (held)
    pub right: bool,
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    if input.launch {
        state.launch();
    }

    // Paddle only moves while the ball is in normal flight
    if state.phase == Phase::Playing {
        state.paddle.step(input.left, input.right);
    }

    if state.phase == Phase::Serve {
        state.ball.lock_to(&state.paddle);
        return;
    }

    let vel = state.ball.vel;
    state.ball.rect.translate(vel);

    bounce_walls(state);
    bounce_paddle(state);
    hit_block(state);
    check_floor(state);
}

fn bounce_walls(state: &mut GameState) {
    let ball = &mut state.ball;

    if ball.rect.top() <= 0.0 {
        ball.vel.y = -ball.vel.y;
        state.events.push(GameEvent::WallBounce);
    }

    if ball.rect.left() <= 0.0 || ball.rect.right() >= SCREEN_WIDTH {
        ball.vel.x = -ball.vel.x;
        state.events.push(GameEvent::WallBounce);
    }
}

/// Horizontal velocity after a normal paddle hit
///
/// Linear in where the ball centre lands along the paddle: centre gives 0,
/// the edges give -PADDLE_REBOUND/2 and +PADDLE_REBOUND/2.
pub fn paddle_rebound_vx(ball_center_x: f32, paddle_left: f32, paddle_width: f32) -> f32 {
    let hit_offset = (ball_center_x - paddle_left) / paddle_width;
    (hit_offset - 0.5) * PADDLE_REBOUND
}

fn bounce_paddle(state: &mut GameState) {
    if !intersects(&state.ball.rect, &state.paddle.rect) {
        return;
    }

    let ball = &mut state.ball;
    if state.phase == Phase::Spectator {
        // Full-width paddle acts as a plain wall
        ball.vel.y = -ball.vel.y;
    } else if ball.vel.y > 0.0 {
        // Only while descending, so a ball still inside the paddle can't bounce twice
        ball.vel.y = -ball.vel.y;
        ball.vel.x = paddle_rebound_vx(
            ball.rect.center_x(),
            state.paddle.rect.left(),
            state.paddle.rect.w,
        );
    }
    state.events.push(GameEvent::PaddleBounce);
}

/// Cap each velocity component to `max` keeping its sign
#[inline]
pub fn clamp_speed(vel: Vec2, max: f32) -> Vec2 {
    let clamp_axis = |v: f32| if v.abs() > max { max.copysign(v) } else { v };
    Vec2::new(clamp_axis(vel.x), clamp_axis(vel.y))
}

/// Resolve at most one block per tick, the first overlapping one in layout order
fn hit_block(state: &mut GameState) {
    let spectator = state.phase == Phase::Spectator;
    let ball_rect = state.ball.rect;

    let Some(block) = state.blocks.first_hit(&ball_rect) else {
        return;
    };

    // Spectator mode passes through visually without destroying anything
    if !spectator {
        block.visible = false;
    }
    let tier = block.tier;
    let block_rect = block.rect;

    let mut vel = state.ball.vel;
    if let Some(side) = struck_side(&ball_rect, vel, &block_rect) {
        vel = side.reflect(vel);
    }

    if !spectator {
        vel = clamp_speed(vel * tier.speed_boost(), tier.max_speed());
        state.score += tier.score();
        log::debug!(
            "{:?} block destroyed, score {}, {} remaining",
            tier,
            state.score,
            state.blocks.remaining()
        );
    }

    state.ball.vel = vel;
    state.events.push(GameEvent::BlockHit {
        tier,
        destroyed: !spectator,
    });
}

fn check_floor(state: &mut GameState) {
    if state.ball.rect.bottom() < SCREEN_HEIGHT {
        return;
    }

    match state.phase {
        Phase::Playing => state.lose_life(),
        Phase::Spectator => {
            state.ball.vel.y = -state.ball.vel.y;
            state.events.push(GameEvent::FloorBounce);
        }
        Phase::Serve => {}
    }
}
