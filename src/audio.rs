//! Sound effects
//!
//! Maps simulation events to sound effects and resolves each effect to a
//! asset decoded by the audio sink. Assets that are missing or fail to
//! decode leave the effect without a handle, so playing it becomes a no-op.

use std::path::Path;

use crate::platform::{AudioSink, SoundHandle};
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a wall, the paddle or the spectator floor
    Bounce,
    /// Ball hits a block
    Score,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 2] = [SoundEffect::Bounce, SoundEffect::Score];

    /// Asset file name under the assets directory
    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::Bounce => "bounce.wav",
            SoundEffect::Score => "258020_kodack_arcade-bleep-sound.wav",
        }
    }

    /// Sound triggered by a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::WallBounce | GameEvent::PaddleBounce | GameEvent::FloorBounce => {
                Some(SoundEffect::Bounce)
            }
            GameEvent::BlockHit { .. } => Some(SoundEffect::Score),
            GameEvent::Launched { .. } | GameEvent::LifeLost { .. } | GameEvent::GameOver => None,
        }
    }

    fn index(self) -> usize {
        match self {
            SoundEffect::Bounce => 0,
            SoundEffect::Score => 1,
        }
    }
}

/// Audio manager for the game
#[derive(Debug, Clone, Default)]
pub struct AudioManager {
    handles: [Option<SoundHandle>; 2],
    muted: bool,
}

impl AudioManager {
    /// No sounds loaded; every `play` is a no-op
    pub fn silent() -> Self {
        Self::default()
    }

    /// Load every effect from `assets_dir` into `sink`, skipping the ones
    /// that fail
    pub fn load<A: AudioSink + ?Sized>(assets_dir: &Path, sink: &mut A) -> Self {
        let mut manager = Self::default();
        for effect in SoundEffect::ALL {
            let handle = sink.load(&assets_dir.join(effect.file_name()));
            if handle.is_none() {
                log::warn!("{:?} sound disabled", effect);
            }
            manager.handles[effect.index()] = handle;
        }
        manager
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Handle for an effect, if its asset loaded
    pub fn handle(&self, effect: SoundEffect) -> Option<SoundHandle> {
        self.handles[effect.index()]
    }

    /// Play a sound effect
    pub fn play<A: AudioSink + ?Sized>(&self, sink: &mut A, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let Some(handle) = self.handle(effect) else {
            return;
        };
        sink.play(handle);
    }

    /// Play whatever sounds a batch of events calls for
    pub fn play_events<A: AudioSink + ?Sized>(&self, sink: &mut A, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(sink, effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Tier;

    /// Accepts the asset files named in `decodable`
    #[derive(Default)]
    struct RecordingSink {
        decodable: Vec<&'static str>,
        loaded: Vec<String>,
        played: Vec<SoundHandle>,
    }

    impl AudioSink for RecordingSink {
        fn load(&mut self, path: &Path) -> Option<SoundHandle> {
            let name = path.file_name()?.to_str()?.to_string();
            if !self.decodable.iter().any(|d| *d == name) {
                return None;
            }
            self.loaded.push(name);
            Some(SoundHandle(self.loaded.len() - 1))
        }

        fn play(&mut self, sound: SoundHandle) {
            self.played.push(sound);
        }
    }

    fn loaded() -> AudioManager {
        AudioManager {
            handles: [Some(SoundHandle(0)), Some(SoundHandle(1))],
            muted: false,
        }
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::WallBounce),
            Some(SoundEffect::Bounce)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::FloorBounce),
            Some(SoundEffect::Bounce)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::BlockHit {
                tier: Tier::Green,
                destroyed: true
            }),
            Some(SoundEffect::Score)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::GameOver), None);
    }

    #[test]
    fn test_play_events() {
        let mut sink = RecordingSink::default();
        let events = [
            GameEvent::PaddleBounce,
            GameEvent::LifeLost { remaining: 2 },
            GameEvent::BlockHit {
                tier: Tier::Red,
                destroyed: true,
            },
        ];
        loaded().play_events(&mut sink, &events);
        assert_eq!(sink.played, vec![SoundHandle(0), SoundHandle(1)]);
    }

    #[test]
    fn test_load_keeps_effects_distinct() {
        let mut sink = RecordingSink {
            decodable: vec!["bounce.wav", "258020_kodack_arcade-bleep-sound.wav"],
            ..RecordingSink::default()
        };
        let audio = AudioManager::load(Path::new("assets"), &mut sink);
        assert_eq!(sink.loaded, vec!["bounce.wav", "258020_kodack_arcade-bleep-sound.wav"]);

        audio.play(&mut sink, SoundEffect::Score);
        audio.play(&mut sink, SoundEffect::Bounce);
        assert_eq!(sink.played, vec![SoundHandle(1), SoundHandle(0)]);
    }

    #[test]
    fn test_undecodable_sounds_are_noops() {
        // Only the score sound decodes
        let mut sink = RecordingSink {
            decodable: vec!["258020_kodack_arcade-bleep-sound.wav"],
            ..RecordingSink::default()
        };
        let audio = AudioManager::load(Path::new("assets"), &mut sink);
        assert!(audio.handle(SoundEffect::Bounce).is_none());
        assert_eq!(audio.handle(SoundEffect::Score), Some(SoundHandle(0)));

        audio.play(&mut sink, SoundEffect::Bounce);
        assert!(sink.played.is_empty());
        audio.play(&mut sink, SoundEffect::Score);
        assert_eq!(sink.played, vec![SoundHandle(0)]);
    }

    #[test]
    fn test_muted() {
        let mut sink = RecordingSink::default();
        let mut audio = loaded();
        audio.set_muted(true);
        audio.play(&mut sink, SoundEffect::Score);
        assert!(sink.played.is_empty());
    }
}
