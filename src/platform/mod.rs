//! Platform abstraction layer
//!
//! The game core consumes the presentation shell only through these
//! capabilities:
//! - Render sink (clear, rectangles, ellipses, text, present)
//! - Input source (drained discrete events + held-key snapshot)
//! - Audio sink (asset decoding, fire-and-forget playback)
//! - Clock (elapsed time and frame pacing)
//!
//! A concrete shell bundles one of each into a `Presentation` that is handed
//! to the app at construction.

pub mod sound;
pub mod terminal;

use std::path::Path;

use crate::sim::Rect;

/// An RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

/// Text size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    /// Menu title and game-over banner
    Title,
    /// HUD and prompts
    Body,
}

/// Drawing capabilities; coordinates are game-screen pixels
pub trait RenderSink {
    fn clear(&mut self, color: Color);
    fn draw_rect(&mut self, rect: &Rect, color: Color);
    fn draw_ellipse(&mut self, rect: &Rect, color: Color);
    /// Draw text with its top-left corner at (x, y)
    fn draw_text(&mut self, text: &str, color: Color, x: f32, y: f32, size: TextSize);
    /// Rendered width of `text` in game-screen pixels
    fn text_width(&self, text: &str, size: TextSize) -> f32;
    /// Show everything drawn since the last clear
    fn present(&mut self) -> std::io::Result<()>;
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Left,
    Right,
    Quit,
}

/// Discrete input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close / interrupt
    Quit,
    KeyDown(Key),
}

/// Input capabilities
pub trait InputSource {
    /// Drain every event queued since the last call
    fn poll_events(&mut self) -> Vec<InputEvent>;
    /// Whether a key is held right now
    fn is_pressed(&self, key: Key) -> bool;
}

/// Opaque handle to a loaded sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub usize);

/// Audio capabilities; playback is fire-and-forget
pub trait AudioSink {
    /// Decode a sound asset; `None` if it can never be played
    fn load(&mut self, path: &Path) -> Option<SoundHandle>;
    /// Play a loaded sound; unknown handles are ignored
    fn play(&mut self, sound: SoundHandle);
}

/// Timing capabilities
pub trait Clock {
    /// Milliseconds since the clock was created
    fn elapsed_ms(&self) -> u64;
    /// Block until the next frame is due
    fn wait_frame(&mut self);
}

/// Everything the app needs from a presentation shell
pub struct Presentation<R, I, A, C> {
    pub renderer: R,
    pub input: I,
    pub audio: A,
    pub clock: C,
}
