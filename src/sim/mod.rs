//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (velocities are pixels per tick)
//! - Seeded RNG only
//! - Stable iteration order (grid layout order)
//! - No rendering, audio or platform dependencies; side effects are
//!   reported as `GameEvent`s for the caller to act on

pub mod grid;
pub mod rect;
pub mod state;
pub mod tick;

pub use grid::{Block, BlockGrid, Tier};
pub use rect::{Rect, Side, intersects, struck_side};
pub use state::{Ball, GameEvent, GameState, Paddle, Phase, generate_launch_speed};
pub use tick::{TickInput, tick};
