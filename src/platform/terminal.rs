//! Terminal presentation shell built on crossterm
//!
//! The 906x800 play field is scaled onto the terminal. Every character cell
//! holds two vertically stacked pixels drawn with an upper-half block, so
//! the thin block rows stay distinguishable.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{self, Attribute, Print};
use crossterm::{ExecutableCommand, QueueableCommand, cursor, terminal};

use super::{Clock, Color, InputEvent, InputSource, Key, RenderSink, TextSize};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::Rect;

/// Ticks a key stays pressed after its last repeat, for terminals that never
/// report key releases. Repeats arrive every 30-50 ms once they start.
const HOLD_WINDOW: u64 = 8;

/// Ticks a fresh press stays held while waiting for the first repeat; the
/// OS delay before repeating is 250-600 ms.
const FIRST_REPEAT_WINDOW: u64 = 36;

/// Last tick a held key was seen, and whether it has started repeating
#[derive(Debug, Clone, Copy)]
struct Hold {
    last: u64,
    repeating: bool,
}

impl Hold {
    fn window(self) -> u64 {
        if self.repeating {
            HOLD_WINDOW
        } else {
            FIRST_REPEAT_WINDOW
        }
    }
}

/// Raw mode + alternate screen for the lifetime of the guard
pub struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;

        // Request key-release events; terminals without support ignore this
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        log::debug!("Keyboard enhancement: {}", keyboard_enhanced);

        Ok(Self { keyboard_enhanced })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(style::ResetColor);
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn to_term_color(c: Color) -> style::Color {
    style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

struct TextSpan {
    col: u16,
    row: u16,
    text: String,
    color: Color,
    bold: bool,
}

/// Half-block pixel canvas scaled to the terminal size
pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    background: Color,
    /// cols x (rows * 2) pixels, row-major
    pixels: Vec<Color>,
    texts: Vec<TextSpan>,
    /// Follow the real terminal size (off for fixed-size canvases)
    track_resize: bool,
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer sized to the current terminal
    pub fn new(out: W) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut renderer = Self::with_size(out, cols, rows);
        renderer.track_resize = true;
        Ok(renderer)
    }

    pub fn with_size(out: W, cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            out,
            cols,
            rows,
            background: Color::BLACK,
            pixels: vec![Color::BLACK; cols as usize * rows as usize * 2],
            texts: Vec::new(),
            track_resize: false,
        }
    }

    fn pixel_height(&self) -> usize {
        self.rows as usize * 2
    }

    fn scale_x(&self) -> f32 {
        self.cols as f32 / SCREEN_WIDTH
    }

    fn scale_y(&self) -> f32 {
        self.pixel_height() as f32 / SCREEN_HEIGHT
    }

    /// Pixel span covered by a rect; never empty for on-screen rects
    fn pixel_bounds(&self, rect: &Rect) -> Option<(usize, usize, usize, usize)> {
        let (w, h) = (self.cols as f32, self.pixel_height() as f32);
        let x0 = (rect.left() * self.scale_x()).floor().clamp(0.0, w);
        let y0 = (rect.top() * self.scale_y()).floor().clamp(0.0, h);
        let x1 = (rect.right() * self.scale_x()).ceil().clamp(0.0, w).max(x0 + 1.0);
        let y1 = (rect.bottom() * self.scale_y()).ceil().clamp(0.0, h).max(y0 + 1.0);
        if x0 >= w || y0 >= h {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1.min(w) as usize, y1.min(h) as usize))
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        let idx = y * self.cols as usize + x;
        if let Some(p) = self.pixels.get_mut(idx) {
            *p = color;
        }
    }

    /// Pick up terminal resizes between frames
    fn refresh_size(&mut self) {
        if !self.track_resize {
            return;
        }
        if let Ok((cols, rows)) = terminal::size() {
            if (cols, rows) != (self.cols, self.rows) && cols > 0 && rows > 0 {
                log::debug!("Terminal resized to {}x{}", cols, rows);
                self.cols = cols;
                self.rows = rows;
                self.pixels = vec![self.background; cols as usize * rows as usize * 2];
            }
        }
    }

    fn write_frame(&mut self) -> io::Result<()> {
        let cols = self.cols as usize;
        let mut current: Option<(Color, Color)> = None;

        for row in 0..self.rows as usize {
            self.out.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..cols {
                let top = self.pixels[(row * 2) * cols + col];
                let bottom = self.pixels[(row * 2 + 1) * cols + col];
                if current != Some((top, bottom)) {
                    self.out.queue(style::SetForegroundColor(to_term_color(top)))?;
                    self.out.queue(style::SetBackgroundColor(to_term_color(bottom)))?;
                    current = Some((top, bottom));
                }
                self.out.queue(Print('▀'))?;
            }
        }

        self.out
            .queue(style::SetBackgroundColor(to_term_color(self.background)))?;
        for span in &self.texts {
            self.out.queue(cursor::MoveTo(span.col, span.row))?;
            self.out.queue(style::SetForegroundColor(to_term_color(span.color)))?;
            if span.bold {
                self.out.queue(style::SetAttribute(Attribute::Bold))?;
            }
            self.out.queue(Print(&span.text))?;
            if span.bold {
                self.out.queue(style::SetAttribute(Attribute::NormalIntensity))?;
            }
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    fn clear(&mut self, color: Color) {
        self.refresh_size();
        self.background = color;
        self.pixels.fill(color);
        self.texts.clear();
    }

    fn draw_rect(&mut self, rect: &Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.set_pixel(x, y, color);
            }
        }
    }

    fn draw_ellipse(&mut self, rect: &Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(rect) else {
            return;
        };
        let (sx, sy) = (self.scale_x(), self.scale_y());
        let cx = rect.center_x() * sx;
        let cy = rect.center_y() * sy;
        let rx = (rect.w * sx / 2.0).max(0.5);
        let ry = (rect.h * sy / 2.0).max(0.5);

        let mut filled = false;
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = (x as f32 + 0.5 - cx) / rx;
                let dy = (y as f32 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.set_pixel(x, y, color);
                    filled = true;
                }
            }
        }
        // Smaller than a pixel: still show it
        if !filled {
            self.set_pixel(x0, y0, color);
        }
    }

    fn draw_text(&mut self, text: &str, color: Color, x: f32, y: f32, size: TextSize) {
        let col = (x * self.scale_x()).round().max(0.0) as u16;
        let row = (y * self.rows as f32 / SCREEN_HEIGHT).floor().max(0.0) as u16;
        if col >= self.cols || row >= self.rows {
            return;
        }
        let room = (self.cols - col) as usize;
        self.texts.push(TextSpan {
            col,
            row,
            text: text.chars().take(room).collect(),
            color,
            bold: size == TextSize::Title,
        });
    }

    fn text_width(&self, text: &str, _size: TextSize) -> f32 {
        text.chars().count() as f32 / self.scale_x()
    }

    fn present(&mut self) -> io::Result<()> {
        self.write_frame()
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Key::Quit),
        _ => None,
    }
}

/// Keyboard input read on a dedicated thread
pub struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    held: HashMap<Key, Hold>,
    frame: u64,
}

impl TerminalInput {
    /// Spawn the reader thread
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || {
            loop {
                match event::read() {
                    Ok(ev) => {
                        if tx.send(ev).is_err() {
                            break; // receiver dropped → program exiting
                        }
                    }
                    Err(e) => {
                        log::warn!("Terminal input failed: {}", e);
                        break;
                    }
                }
            }
        });
        Self::from_receiver(rx)
    }

    pub fn from_receiver(rx: mpsc::Receiver<Event>) -> Self {
        Self {
            rx,
            held: HashMap::new(),
            frame: 0,
        }
    }

    fn handle_key(&mut self, key: KeyEvent, events: &mut Vec<InputEvent>) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            events.push(InputEvent::Quit);
            return;
        }
        let Some(mapped) = map_key(key.code) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press => {
                // Without release reporting, OS repeats also arrive as presses
                let repeating = self.held.get(&mapped).is_some_and(|h| self.is_live(*h));
                self.held.insert(
                    mapped,
                    Hold {
                        last: self.frame,
                        repeating,
                    },
                );
                events.push(InputEvent::KeyDown(mapped));
            }
            KeyEventKind::Repeat => {
                self.held.insert(
                    mapped,
                    Hold {
                        last: self.frame,
                        repeating: true,
                    },
                );
            }
            KeyEventKind::Release => {
                self.held.remove(&mapped);
            }
        }
    }
}

impl TerminalInput {
    fn is_live(&self, hold: Hold) -> bool {
        self.frame.saturating_sub(hold.last) <= hold.window()
    }
}

impl InputSource for TerminalInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.frame += 1;
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(Event::Key(key)) => self.handle_key(key, &mut events),
                Ok(_) => {}
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    // Reader thread is gone; nothing can ever arrive again
                    events.push(InputEvent::Quit);
                    break;
                }
            }
        }
        events
    }

    fn is_pressed(&self, key: Key) -> bool {
        self.held.get(&key).is_some_and(|h| self.is_live(*h))
    }
}

/// Wall clock with fixed-rate frame pacing
pub struct FrameClock {
    start: Instant,
    frame: Duration,
    next: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        let frame = Duration::from_secs(1) / fps.max(1);
        Self {
            start: now,
            frame,
            next: now + frame,
        }
    }
}

impl Clock for FrameClock {
    fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn wait_frame(&mut self) {
        let now = Instant::now();
        if now < self.next {
            thread::sleep(self.next - now);
            self.next += self.frame;
        } else {
            // Running behind: don't try to catch up
            self.next = now + self.frame;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn renderer() -> TerminalRenderer<Vec<u8>> {
        // Exactly 1/10 scale horizontally, 1/10 vertically in pixels
        TerminalRenderer::with_size(Vec::new(), 906, 400)
    }

    fn pixel(r: &TerminalRenderer<Vec<u8>>, x: usize, y: usize) -> Color {
        r.pixels[y * r.cols as usize + x]
    }

    #[test]
    fn test_draw_rect_scales() {
        let mut r = TerminalRenderer::with_size(Vec::new(), 90, 40);
        r.clear(Color::BLACK);
        // 906px -> 90 cols, 800px -> 80 pixel rows
        r.draw_rect(&Rect::new(0.0, 200.0, 60.0, 10.0), Color::RED);
        assert_eq!(pixel(&r, 0, 20), Color::RED);
        assert_eq!(pixel(&r, 5, 20), Color::RED);
        assert_eq!(pixel(&r, 8, 20), Color::BLACK);
        assert_eq!(pixel(&r, 0, 22), Color::BLACK);
    }

    #[test]
    fn test_tiny_shapes_stay_visible() {
        let mut r = TerminalRenderer::with_size(Vec::new(), 10, 5);
        r.clear(Color::BLACK);
        r.draw_ellipse(&Rect::new(448.0, 395.0, 10.0, 10.0), Color::WHITE);
        assert!(r.pixels.contains(&Color::WHITE));
    }

    #[test]
    fn test_offscreen_rect_ignored() {
        let mut r = renderer();
        r.clear(Color::BLACK);
        r.draw_rect(&Rect::new(2000.0, 2000.0, 10.0, 10.0), Color::RED);
        assert!(!r.pixels.contains(&Color::RED));
    }

    #[test]
    fn test_text_placement_and_width() {
        let mut r = TerminalRenderer::with_size(Vec::new(), 90, 40);
        r.clear(Color::BLACK);
        // One column is 906/90 px wide
        assert!((r.text_width("ABC", TextSize::Body) - 3.0 * 906.0 / 90.0).abs() < 1e-3);

        r.draw_text("SCORE:", Color::WHITE, 20.0, 10.0, TextSize::Body);
        r.draw_text("BREAKOUT", Color::WHITE, 400.0, 400.0, TextSize::Title);
        assert_eq!(r.texts[0].col, 2);
        assert_eq!(r.texts[0].row, 0);
        assert_eq!(r.texts[1].row, 20);
        assert!(r.texts[1].bold);
    }

    #[test]
    fn test_present_writes_frame() {
        let mut r = TerminalRenderer::with_size(Vec::new(), 4, 2);
        r.clear(Color::BLACK);
        r.draw_text("HI", Color::WHITE, 0.0, 0.0, TextSize::Body);
        r.present().unwrap();
        let written = String::from_utf8_lossy(&r.out);
        assert_eq!(written.matches('▀').count(), 8);
        assert!(written.contains("HI"));
    }

    #[test]
    fn test_input_press_and_release() {
        let (tx, rx) = mpsc::channel();
        let mut input = TerminalInput::from_receiver(rx);

        tx.send(key(KeyCode::Char(' '), KeyEventKind::Press)).unwrap();
        tx.send(key(KeyCode::Left, KeyEventKind::Press)).unwrap();
        let events = input.poll_events();
        assert_eq!(
            events,
            vec![InputEvent::KeyDown(Key::Space), InputEvent::KeyDown(Key::Left)]
        );
        assert!(input.is_pressed(Key::Left));
        assert!(!input.is_pressed(Key::Right));

        tx.send(key(KeyCode::Left, KeyEventKind::Release)).unwrap();
        assert!(input.poll_events().is_empty());
        assert!(!input.is_pressed(Key::Left));
    }

    #[test]
    fn test_input_hold_window_expires() {
        let (tx, rx) = mpsc::channel();
        let mut input = TerminalInput::from_receiver(rx);

        tx.send(key(KeyCode::Right, KeyEventKind::Press)).unwrap();
        input.poll_events();
        tx.send(key(KeyCode::Right, KeyEventKind::Repeat)).unwrap();
        input.poll_events();
        for _ in 0..HOLD_WINDOW {
            input.poll_events();
            assert!(input.is_pressed(Key::Right));
        }
        input.poll_events();
        assert!(!input.is_pressed(Key::Right));
        drop(tx);
    }

    #[test]
    fn test_input_held_through_initial_repeat_delay() {
        let (tx, rx) = mpsc::channel();
        let mut input = TerminalInput::from_receiver(rx);

        // No release reporting: the first repeat shows up as another press
        // about half a second later
        tx.send(key(KeyCode::Left, KeyEventKind::Press)).unwrap();
        input.poll_events();
        for _ in 0..30 {
            input.poll_events();
            assert!(input.is_pressed(Key::Left));
        }
        tx.send(key(KeyCode::Left, KeyEventKind::Press)).unwrap();
        assert_eq!(input.poll_events(), vec![InputEvent::KeyDown(Key::Left)]);

        // Repeating now, so the short window applies
        for _ in 0..HOLD_WINDOW {
            input.poll_events();
            assert!(input.is_pressed(Key::Left));
        }
        input.poll_events();
        assert!(!input.is_pressed(Key::Left));
    }

    #[test]
    fn test_input_tap_expires_after_first_repeat_window() {
        let (tx, rx) = mpsc::channel();
        let mut input = TerminalInput::from_receiver(rx);

        tx.send(key(KeyCode::Right, KeyEventKind::Press)).unwrap();
        input.poll_events();
        for _ in 0..FIRST_REPEAT_WINDOW {
            input.poll_events();
        }
        assert!(input.is_pressed(Key::Right));
        input.poll_events();
        assert!(!input.is_pressed(Key::Right));
        drop(tx);
    }

    #[test]
    fn test_input_quit_keys() {
        let (tx, rx) = mpsc::channel();
        let mut input = TerminalInput::from_receiver(rx);
        tx.send(key(KeyCode::Char('q'), KeyEventKind::Press)).unwrap();
        tx.send(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )))
        .unwrap();
        assert_eq!(
            input.poll_events(),
            vec![InputEvent::KeyDown(Key::Quit), InputEvent::Quit]
        );

        drop(tx);
        assert_eq!(input.poll_events(), vec![InputEvent::Quit]);
    }
}
