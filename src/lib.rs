//! Breakout - A single-screen ball-and-paddle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `app`: Menu / playing / quit state machine and the fixed-timestep loop
//! - `platform`: Presentation capabilities (render, input, audio, clock)
//! - `ui`: Screen layout drawn through the render sink
//! - `audio`: Sound effects and asset loading
//! - `settings`: Runtime configuration

pub mod app;
pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use app::{App, Screen};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Target simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 906.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Paddle defaults - sits 50px above the bottom edge
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 14.0;
    pub const PADDLE_Y: f32 = SCREEN_HEIGHT - 50.0;
    /// Horizontal paddle movement per tick while a direction key is held
    pub const PADDLE_SPEED: f32 = 7.0;
    /// Rebound spread: an edge hit leaves with |vx| = PADDLE_REBOUND / 2
    pub const PADDLE_REBOUND: f32 = 10.0;

    /// Ball defaults (velocities are pixels per tick)
    pub const BALL_SIZE: f32 = 10.0;
    pub const BALL_BASE_SPEED: f32 = 4.0;
    /// Fixed component magnitude of the diagonal launches
    pub const DIAGONAL_LAUNCH_SPEED: f32 = 3.5;

    /// Block defaults
    pub const BLOCK_WIDTH: f32 = 60.0;
    pub const BLOCK_HEIGHT: f32 = 10.0;
    pub const GRID_ROWS: usize = 8;
    pub const GRID_COLS: usize = 14;
    pub const GRID_SPACING: f32 = 5.0;
    pub const GRID_TOP_OFFSET: f32 = 200.0;
    /// Rows sharing one colour tier
    pub const ROWS_PER_TIER: usize = 2;

    /// Edge proximity used to decide which side of a block was struck
    pub const SIDE_THRESHOLD: f32 = 10.0;

    /// Session defaults
    pub const STARTING_LIVES: u8 = 3;

    /// Text flash half-period (ms)
    pub const FLASH_PERIOD_MS: u64 = 500;
}
