//! Cues: transition signals and the channels that carry them.

mod dispatcher;
mod patterns;
mod traits;

pub use dispatcher::{Cue, CueDispatcher};
pub use patterns::{tones, vibrations, Note, TonePattern, VibrationPattern, Waveform};
pub use traits::{CueSink, NullCues};
