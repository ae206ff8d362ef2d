//! Screen layout
//!
//! Pure drawing through a `RenderSink`; no game logic here.

use crate::consts::*;
use crate::platform::{Color, RenderSink, TextSize};
use crate::sim::{BlockGrid, GameState};

/// Flashing text is visible during even half-periods
pub fn flash_on(elapsed_ms: u64) -> bool {
    (elapsed_ms / FLASH_PERIOD_MS) % 2 == 0
}

fn draw_centered<R: RenderSink + ?Sized>(
    r: &mut R,
    text: &str,
    color: Color,
    y: f32,
    size: TextSize,
) {
    let x = SCREEN_WIDTH / 2.0 - r.text_width(text, size) / 2.0;
    r.draw_text(text, color, x, y, size);
}

fn draw_blocks<R: RenderSink + ?Sized>(r: &mut R, blocks: &BlockGrid) {
    for block in blocks.visible() {
        r.draw_rect(&block.rect, block.tier.rgb().into());
    }
}

/// Title screen over a block backdrop
pub fn draw_menu<R: RenderSink + ?Sized>(r: &mut R, blocks: &BlockGrid, elapsed_ms: u64) {
    r.clear(Color::BLACK);
    draw_blocks(r, blocks);
    draw_centered(r, "BREAKOUT", Color::WHITE, 400.0, TextSize::Title);
    if flash_on(elapsed_ms) {
        draw_centered(r, "Press SPACE to Play", Color::WHITE, 550.0, TextSize::Body);
    }
}

/// Play field, HUD and (in spectator mode) the game-over overlay
pub fn draw_session<R: RenderSink + ?Sized>(r: &mut R, state: &GameState, elapsed_ms: u64) {
    r.clear(Color::BLACK);
    draw_blocks(r, &state.blocks);

    let paddle_color = if state.is_spectator() {
        Color::RED
    } else {
        Color::BLUE
    };
    r.draw_rect(&state.paddle.rect, paddle_color);
    r.draw_ellipse(&state.ball.rect, Color::WHITE);

    draw_hud(r, state, elapsed_ms);

    if state.is_spectator() {
        draw_centered(
            r,
            "GAME OVER",
            Color::RED,
            SCREEN_HEIGHT / 2.0 - 20.0,
            TextSize::Title,
        );
        draw_centered(
            r,
            "SPACE to Restart/Q to Quit",
            Color::WHITE,
            SCREEN_HEIGHT / 2.0 + 30.0,
            TextSize::Body,
        );
    }
}

fn draw_hud<R: RenderSink + ?Sized>(r: &mut R, state: &GameState, elapsed_ms: u64) {
    let label = "SCORE:";
    r.draw_text(label, Color::WHITE, 20.0, 10.0, TextSize::Body);

    let score_color = if flash_on(elapsed_ms) {
        Color::WHITE
    } else {
        Color::BLACK
    };
    let score_x = 20.0 + r.text_width(label, TextSize::Body) + 10.0;
    r.draw_text(
        &format!(" {} ", state.score),
        score_color,
        score_x,
        10.0,
        TextSize::Body,
    );

    let lives = format!("LIVES: {}", state.lives);
    let lives_x = SCREEN_WIDTH - r.text_width(&lives, TextSize::Body) - 20.0;
    r.draw_text(&lives, Color::WHITE, lives_x, 10.0, TextSize::Body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Rect;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Rect(Rect, Color),
        Ellipse(Rect, Color),
        Text(String, Color, f32, f32),
    }

    /// Fixed-width text, 10px per character
    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl RenderSink for Recorder {
        fn clear(&mut self, _color: Color) {
            self.0.push(Op::Clear);
        }
        fn draw_rect(&mut self, rect: &Rect, color: Color) {
            self.0.push(Op::Rect(*rect, color));
        }
        fn draw_ellipse(&mut self, rect: &Rect, color: Color) {
            self.0.push(Op::Ellipse(*rect, color));
        }
        fn draw_text(&mut self, text: &str, color: Color, x: f32, y: f32, _size: TextSize) {
            self.0.push(Op::Text(text.to_string(), color, x, y));
        }
        fn text_width(&self, text: &str, _size: TextSize) -> f32 {
            text.len() as f32 * 10.0
        }
        fn present(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Recorder {
        fn texts(&self) -> Vec<&str> {
            self.0
                .iter()
                .filter_map(|op| match op {
                    Op::Text(s, ..) => Some(s.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    #[test]
    fn test_flash_timing() {
        assert!(flash_on(0));
        assert!(flash_on(499));
        assert!(!flash_on(500));
        assert!(!flash_on(999));
        assert!(flash_on(1000));
    }

    #[test]
    fn test_menu_prompt_flashes() {
        let blocks = BlockGrid::standard();
        let mut r = Recorder::default();
        draw_menu(&mut r, &blocks, 100);
        assert_eq!(r.texts(), vec!["BREAKOUT", "Press SPACE to Play"]);
        // Title centred: 906/2 - 80/2
        assert!(r.0.contains(&Op::Text("BREAKOUT".into(), Color::WHITE, 413.0, 400.0)));

        let mut r = Recorder::default();
        draw_menu(&mut r, &blocks, 600);
        assert_eq!(r.texts(), vec!["BREAKOUT"]);
        assert_eq!(r.0[0], Op::Clear);
    }

    #[test]
    fn test_session_layout() {
        let state = GameState::new(1);
        let mut r = Recorder::default();
        draw_session(&mut r, &state, 0);

        let rects = r.0.iter().filter(|op| matches!(op, Op::Rect(..))).count();
        // Every block plus the paddle
        assert_eq!(rects, GRID_ROWS * GRID_COLS + 1);
        assert!(r.0.contains(&Op::Rect(state.paddle.rect, Color::BLUE)));
        assert!(r.0.contains(&Op::Ellipse(state.ball.rect, Color::WHITE)));
        assert!(r.0.contains(&Op::Text(" 0 ".into(), Color::WHITE, 90.0, 10.0)));
        // 906 - 80 - 20
        assert!(r.0.contains(&Op::Text("LIVES: 3".into(), Color::WHITE, 806.0, 10.0)));
        assert!(!r.texts().contains(&"GAME OVER"));
    }

    #[test]
    fn test_score_flashes_black() {
        let state = GameState::new(1);
        let mut r = Recorder::default();
        draw_session(&mut r, &state, 700);
        assert!(r.0.contains(&Op::Text(" 0 ".into(), Color::BLACK, 90.0, 10.0)));
    }

    #[test]
    fn test_spectator_overlay() {
        let mut state = GameState::new(1);
        state.lives = 1;
        state.launch();
        state.lose_life();

        let mut r = Recorder::default();
        draw_session(&mut r, &state, 0);
        assert!(r.0.contains(&Op::Rect(state.paddle.rect, Color::RED)));
        let texts = r.texts();
        assert!(texts.contains(&"GAME OVER"));
        assert!(texts.contains(&"SPACE to Restart/Q to Quit"));
        assert!(texts.contains(&"LIVES: 0"));
    }
}
