//! Breakout entry point
//!
//! Loads settings and assets, sets up the terminal shell and runs the game
//! loop until the player quits.

use std::io::{self, BufWriter};

use breakout::App;
use breakout::audio::AudioManager;
use breakout::platform::Presentation;
use breakout::platform::sound::RodioAudio;
use breakout::platform::terminal::{FrameClock, TerminalGuard, TerminalInput, TerminalRenderer};
use breakout::settings::Settings;

fn main() -> io::Result<()> {
    // Logs go to stderr; redirect it (2>breakout.log) to keep the screen clean
    env_logger::init();
    log::info!("Breakout starting...");

    let settings = Settings::load(&Settings::default_path());

    let mut sink = RodioAudio::open();
    let mut audio = AudioManager::load(&settings.assets_dir, &mut sink);
    audio.set_muted(!settings.sound_enabled);

    let guard = TerminalGuard::enter()?;
    let mut presentation = Presentation {
        renderer: TerminalRenderer::new(BufWriter::new(io::stdout()))?,
        input: TerminalInput::spawn(),
        audio: sink,
        clock: FrameClock::new(settings.target_fps),
    };

    let mut app = App::new(settings, audio);
    let result = app.run(&mut presentation);

    // Restore the terminal before anything else is printed
    drop(presentation);
    drop(guard);

    log::info!("Breakout exiting");
    result
}
