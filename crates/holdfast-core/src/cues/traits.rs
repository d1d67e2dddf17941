//! Cue output capability trait.

use super::patterns::{TonePattern, VibrationPattern};

/// Output channel for cues. Implementations live with the caller (audio
/// backend, haptics bridge, TTS); the dispatcher only ever calls these
/// three methods and discards their errors, so a broken channel can
/// never disturb session timing.
pub trait CueSink: Send {
    fn play_tone(&mut self, _pattern: &TonePattern) -> Result<(), Box<dyn std::error::Error>> {
        Ok(()) // default no-op
    }

    fn vibrate(&mut self, _pattern: &VibrationPattern) -> Result<(), Box<dyn std::error::Error>> {
        Ok(()) // default no-op
    }

    fn speak(&mut self, _phrase: &str) -> Result<(), Box<dyn std::error::Error>> {
        Ok(()) // default no-op
    }
}

/// Sink that does nothing. For headless runs and tests.
#[derive(Debug, Default)]
pub struct NullCues;

impl CueSink for NullCues {}
