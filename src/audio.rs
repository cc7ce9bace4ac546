//! Sound effect playback through a fixed pool of sources
//!
//! Sources are handed out round-robin, so a burst of effects never needs
//! more than `NUM_SOUND_SOURCES` live voices; the oldest one is reused.

use serde::{Deserialize, Serialize};

use crate::consts::NUM_SOUND_SOURCES;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ball bounces off a wall (also the test sound)
    Bounce,
    /// Ball lost past the bat
    Fail,
    /// Block destroyed
    BlockBreak,
}

/// Index of a voice in the source pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceId(pub usize);

/// Backend that actually emits sound for a source
pub trait SoundSink {
    fn play(&mut self, source: SourceId, effect: SoundEffect, volume: f32);
}

/// Sink that records playback in the log only
#[derive(Debug, Default)]
pub struct LogSink;

impl SoundSink for LogSink {
    fn play(&mut self, source: SourceId, effect: SoundEffect, volume: f32) {
        log::debug!("sound {:?} on source {} (volume {:.2})", effect, source.0, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<S: SoundSink = LogSink> {
    sink: S,
    cur_source: usize,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager<LogSink> {
    fn default() -> Self {
        Self::new(LogSink)
    }
}

impl<S: SoundSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            cur_source: 0,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Next source in the pool
    pub fn next_source(&mut self) -> SourceId {
        let id = SourceId(self.cur_source % NUM_SOUND_SOURCES);
        self.cur_source = self.cur_source.wrapping_add(1);
        id
    }

    /// Play a sound effect on the next free source
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let source = self.next_source();
        self.sink.play(source, effect, vol);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(usize, SoundEffect)>);

    impl SoundSink for Recorder {
        fn play(&mut self, source: SourceId, effect: SoundEffect, _volume: f32) {
            self.0.push((source.0, effect));
        }
    }

    #[test]
    fn test_sources_rotate_through_pool() {
        let mut audio = AudioManager::new(Recorder::default());
        for _ in 0..NUM_SOUND_SOURCES + 2 {
            audio.play(SoundEffect::Bounce);
        }
        let sources: Vec<usize> = audio.sink().0.iter().map(|(s, _)| *s).collect();
        assert_eq!(sources[0], 0);
        assert_eq!(sources[NUM_SOUND_SOURCES - 1], NUM_SOUND_SOURCES - 1);
        assert_eq!(sources[NUM_SOUND_SOURCES], 0);
        assert_eq!(sources[NUM_SOUND_SOURCES + 1], 1);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_muted(true);
        audio.play(SoundEffect::Fail);
        assert!(audio.sink().0.is_empty());

        audio.set_muted(false);
        audio.play(SoundEffect::BlockBreak);
        assert_eq!(audio.sink().0, vec![(0, SoundEffect::BlockBreak)]);
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut audio = AudioManager::default();
        audio.set_master_volume(3.0);
        assert_eq!(audio.effective_volume(), 1.0);
        audio.set_master_volume(-1.0);
        assert_eq!(audio.effective_volume(), 0.0);
    }
}
