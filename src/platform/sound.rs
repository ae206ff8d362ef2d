//! Sound playback through rodio
//!
//! Assets are decoded once at load time and kept as buffered sources, so
//! every play is a cheap clone appended to a detached sink.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use rodio::source::Buffered;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use super::{AudioSink, SoundHandle};

type Sound = Buffered<Decoder<BufReader<File>>>;

#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Decode(rodio::decoder::DecoderError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "{}", e),
            LoadError::Decode(e) => write!(f, "cannot decode: {}", e),
        }
    }
}

/// Open and fully validate a sound file
fn decode(path: &Path) -> Result<Sound, LoadError> {
    let file = File::open(path).map_err(LoadError::Io)?;
    let source = Decoder::new(BufReader::new(file)).map_err(LoadError::Decode)?;
    log::debug!(
        "Decoded {}: {} Hz, {} channel(s)",
        path.display(),
        source.sample_rate(),
        source.channels()
    );
    Ok(source.buffered())
}

/// Default output device plus the sounds decoded for it
pub struct RodioAudio {
    /// `None` when no output device could be opened; the stream must stay
    /// alive for as long as anything plays
    output: Option<(OutputStream, OutputStreamHandle)>,
    sounds: Vec<Sound>,
}

impl RodioAudio {
    /// Open the default output device, or run silent without one
    pub fn open() -> Self {
        let output = match OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(e) => {
                log::warn!("No audio output ({}); sound disabled", e);
                None
            }
        };
        Self {
            output,
            sounds: Vec::new(),
        }
    }

    /// A sink with no device: nothing loads and nothing plays
    pub fn disconnected() -> Self {
        Self {
            output: None,
            sounds: Vec::new(),
        }
    }
}

impl AudioSink for RodioAudio {
    fn load(&mut self, path: &Path) -> Option<SoundHandle> {
        self.output.as_ref()?;
        match decode(path) {
            Ok(sound) => {
                self.sounds.push(sound);
                Some(SoundHandle(self.sounds.len() - 1))
            }
            Err(e) => {
                log::warn!("Failed to load {}: {}", path.display(), e);
                None
            }
        }
    }

    fn play(&mut self, sound: SoundHandle) {
        let (Some((_, handle)), Some(source)) = (&self.output, self.sounds.get(sound.0)) else {
            return;
        };
        match Sink::try_new(handle) {
            Ok(sink) => {
                sink.append(source.clone());
                sink.detach();
            }
            Err(e) => log::debug!("Dropped sound {:?}: {}", sound, e),
        }
    }
}
