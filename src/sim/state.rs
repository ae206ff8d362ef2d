//! Game session state and core simulation types
//!
//! One `GameState` lives for exactly one play session (menu to game over).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::{BlockGrid, Tier};
use super::rect::Rect;
use crate::consts::*;

/// Current phase of a session
///
/// Lives and phase move together: `Spectator` is entered exactly when lives
/// reach zero and is never left within the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ball locked to the paddle, waiting for launch input
    Serve,
    /// Ball in flight
    Playing,
    /// Game over: full-width paddle, blocks indestructible, ball bounces forever
    Spectator,
}

/// Side effects produced by a tick, drained by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball left the paddle with this velocity
    Launched { vel: Vec2 },
    /// Ball bounced off the top or a side wall
    WallBounce,
    /// Ball touched the paddle
    PaddleBounce,
    /// Ball bounced off the floor (spectator mode only)
    FloorBounce,
    /// Ball struck a block
    BlockHit { tier: Tier, destroyed: bool },
    /// Ball fell past the paddle
    LifeLost { remaining: u8 },
    /// Last life lost, spectator mode entered
    GameOver,
}

/// The ball: bounding box plus per-tick velocity
#[derive(Debug, Clone)]
pub struct Ball {
    pub rect: Rect,
    pub vel: Vec2,
}

impl Ball {
    pub fn new() -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, BALL_SIZE, BALL_SIZE),
            vel: Vec2::ZERO,
        }
    }

    /// Sit the ball on top of the paddle, horizontally centred
    pub fn lock_to(&mut self, paddle: &Paddle) {
        self.rect.x = paddle.rect.center_x() - BALL_SIZE / 2.0;
        self.rect.y = paddle.rect.top() - BALL_SIZE;
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    pub rect: Rect,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            rect: Rect::new(
                SCREEN_WIDTH / 2.0 - PADDLE_WIDTH / 2.0,
                PADDLE_Y,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
        }
    }
}

impl Paddle {
    /// Restore normal width, centred horizontally
    pub fn recenter(&mut self) {
        self.rect.w = PADDLE_WIDTH;
        self.rect.x = SCREEN_WIDTH / 2.0 - PADDLE_WIDTH / 2.0;
    }

    /// Cover the whole bottom of the screen
    pub fn stretch_full_width(&mut self) {
        self.rect.x = 0.0;
        self.rect.w = SCREEN_WIDTH;
    }

    /// Move one step left/right; each direction only while that edge is on screen
    pub fn step(&mut self, left: bool, right: bool) {
        if right && self.rect.right() < SCREEN_WIDTH {
            self.rect.x += PADDLE_SPEED;
        }
        if left && self.rect.left() > 0.0 {
            self.rect.x -= PADDLE_SPEED;
        }
    }
}

/// Pick one of three launch vectors with equal probability
///
/// Straight up uses `base_speed`; the diagonals use a fixed component
/// magnitude regardless of `base_speed`.
pub fn generate_launch_speed<R: Rng + ?Sized>(rng: &mut R, base_speed: f32) -> Vec2 {
    match rng.random_range(0..3) {
        0 => Vec2::new(0.0, -base_speed),
        1 => Vec2::new(-DIAGONAL_LAUNCH_SPEED, -DIAGONAL_LAUNCH_SPEED),
        _ => Vec2::new(DIAGONAL_LAUNCH_SPEED, -DIAGONAL_LAUNCH_SPEED),
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Launch vector RNG
    pub rng: Pcg32,
    pub score: u32,
    pub lives: u8,
    pub phase: Phase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub blocks: BlockGrid,
    /// Velocity pre-computed after a life loss, used by the next launch
    pub pending_launch: Option<Vec2>,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            lives: STARTING_LIVES,
            phase: Phase::Serve,
            time_ticks: 0,
            ball: Ball::new(),
            paddle: Paddle::default(),
            blocks: BlockGrid::standard(),
            pending_launch: None,
            events: Vec::new(),
        };
        state.ball.lock_to(&state.paddle);
        state
    }

    /// True until the ball first leaves the paddle after a serve
    pub fn is_ball_locked(&self) -> bool {
        self.phase == Phase::Serve
    }

    pub fn is_spectator(&self) -> bool {
        self.phase == Phase::Spectator
    }

    /// Release the ball from the paddle (only valid while serving)
    ///
    /// Returns false when there is nothing to launch.
    pub fn launch(&mut self) -> bool {
        if self.phase != Phase::Serve {
            return false;
        }
        let vel = match self.pending_launch.take() {
            Some(vel) => vel,
            None => generate_launch_speed(&mut self.rng, BALL_BASE_SPEED),
        };
        self.ball.vel = vel;
        self.phase = Phase::Playing;
        self.events.push(GameEvent::Launched { vel });
        log::info!("Ball launched with velocity ({}, {})", vel.x, vel.y);
        true
    }

    /// Ball fell past the paddle in normal play
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost {
            remaining: self.lives,
        });

        if self.lives == 0 {
            self.enter_spectator();
        } else {
            log::info!("Life lost, {} remaining", self.lives);
            self.paddle.recenter();
            self.ball.lock_to(&self.paddle);
            self.phase = Phase::Serve;
            self.pending_launch = Some(generate_launch_speed(&mut self.rng, BALL_BASE_SPEED));
        }
    }

    fn enter_spectator(&mut self) {
        self.phase = Phase::Spectator;
        self.ball.rect.x = SCREEN_WIDTH / 2.0 - BALL_SIZE / 2.0;
        self.ball.rect.y = SCREEN_HEIGHT / 2.0 - BALL_SIZE / 2.0;
        self.paddle.stretch_full_width();
        self.events.push(GameEvent::GameOver);
        log::info!("Game over with score {}", self.score);
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
