//! Top-level game flow
//!
//! `Menu -> Playing -> (life lost: Playing | game over: Playing/spectator)
//! -> Menu`, with `Quit` reachable from anywhere. One call to `update` is one
//! fixed tick; `run` drives it at the configured rate against a
//! `Presentation`.

use crate::audio::AudioManager;
use crate::platform::{AudioSink, Clock, InputEvent, InputSource, Key, Presentation, RenderSink};
use crate::settings::Settings;
use crate::sim::{BlockGrid, GameEvent, GameState, TickInput, tick};
use crate::ui;

/// Which screen the app is on
#[derive(Debug)]
pub enum Screen {
    /// Title screen with a decorative block grid
    Menu { backdrop: BlockGrid },
    /// A session in progress, including its spectator (game over) phase
    Playing(Box<GameState>),
    /// Terminal state
    Quit,
}

impl Screen {
    fn menu() -> Self {
        Screen::Menu {
            backdrop: BlockGrid::standard(),
        }
    }
}

pub struct App {
    screen: Screen,
    settings: Settings,
    audio: AudioManager,
}

impl App {
    pub fn new(settings: Settings, audio: AudioManager) -> Self {
        Self {
            screen: Screen::menu(),
            settings,
            audio,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.screen, Screen::Quit)
    }

    /// Advance one tick given this tick's drained events and held movement keys
    ///
    /// Returns the simulation events produced, for audio and logging.
    pub fn update(&mut self, events: &[InputEvent], left: bool, right: bool) -> Vec<GameEvent> {
        let quit = events
            .iter()
            .any(|e| matches!(e, InputEvent::Quit | InputEvent::KeyDown(Key::Quit)));
        if quit {
            log::info!("Quit requested");
            self.screen = Screen::Quit;
            return Vec::new();
        }

        let space = events.contains(&InputEvent::KeyDown(Key::Space));

        match &mut self.screen {
            Screen::Menu { .. } => {
                if space {
                    let seed = self.settings.session_seed();
                    log::info!("Starting session with seed {}", seed);
                    self.screen = Screen::Playing(Box::new(GameState::new(seed)));
                }
                Vec::new()
            }
            Screen::Playing(state) => {
                if space && state.is_spectator() {
                    log::info!("Returning to menu (final score {})", state.score);
                    self.screen = Screen::menu();
                    return Vec::new();
                }

                let input = TickInput {
                    launch: space && state.is_ball_locked(),
                    left,
                    right,
                };
                tick(state, &input);
                state.drain_events()
            }
            Screen::Quit => Vec::new(),
        }
    }

    /// Draw the current screen (nothing for `Quit`)
    pub fn draw<R: RenderSink + ?Sized>(&self, renderer: &mut R, elapsed_ms: u64) {
        match &self.screen {
            Screen::Menu { backdrop } => ui::draw_menu(renderer, backdrop, elapsed_ms),
            Screen::Playing(state) => ui::draw_session(renderer, state, elapsed_ms),
            Screen::Quit => {}
        }
    }

    /// Run until a quit input arrives
    pub fn run<R, I, A, C>(&mut self, p: &mut Presentation<R, I, A, C>) -> std::io::Result<()>
    where
        R: RenderSink,
        I: InputSource,
        A: AudioSink,
        C: Clock,
    {
        while self.is_running() {
            p.clock.wait_frame();

            let events = p.input.poll_events();
            let left = p.input.is_pressed(Key::Left);
            let right = p.input.is_pressed(Key::Right);

            let game_events = self.update(&events, left, right);
            self.audio.play_events(&mut p.audio, &game_events);

            if !self.is_running() {
                break;
            }
            self.draw(&mut p.renderer, p.clock.elapsed_ms());
            p.renderer.present()?;
        }
        Ok(())
    }
}
