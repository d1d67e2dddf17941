//! Cue pattern data.
//!
//! Tone patterns are small note sequences for a beep synthesizer
//! (frequencies follow the C major scale around C5); vibration patterns
//! are alternating on/off pulse trains. Sinks interpret these however
//! their output channel allows - a terminal bell ignores everything but
//! the name, a real audio backend schedules each note at its offset.

/// Oscillator shape for a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// A single note: frequency, length, and offset from pattern start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub freq_hz: u32,
    pub duration_ms: u32,
    pub offset_ms: u32,
    pub waveform: Waveform,
    pub volume: f32,
}

const fn sine(freq_hz: u32, duration_ms: u32, offset_ms: u32, volume: f32) -> Note {
    Note {
        freq_hz,
        duration_ms,
        offset_ms,
        waveform: Waveform::Sine,
        volume,
    }
}

const fn triangle(freq_hz: u32, duration_ms: u32, offset_ms: u32, volume: f32) -> Note {
    Note {
        freq_hz,
        duration_ms,
        offset_ms,
        waveform: Waveform::Triangle,
        volume,
    }
}

/// A named tone sequence.
#[derive(Debug, Clone, Copy)]
pub struct TonePattern {
    pub name: &'static str,
    pub notes: &'static [Note],
}

/// A named vibration pulse train: on/off durations in milliseconds,
/// starting with an on pulse.
#[derive(Debug, Clone, Copy)]
pub struct VibrationPattern {
    pub name: &'static str,
    pub pulses_ms: &'static [u32],
}

pub mod tones {
    use super::{sine, triangle, TonePattern};

    /// Ascending C5-E5-G5, the "begin work" signal.
    pub static START_HOLD: TonePattern = TonePattern {
        name: "start_hold",
        notes: &[
            sine(523, 100, 0, 0.30),
            sine(659, 100, 80, 0.30),
            sine(784, 200, 160, 0.35),
        ],
    };

    /// Descending mirror of the start cue.
    pub static END_HOLD: TonePattern = TonePattern {
        name: "end_hold",
        notes: &[
            sine(784, 150, 0, 0.25),
            sine(659, 150, 120, 0.20),
            sine(523, 200, 240, 0.15),
        ],
    };

    /// Low and soft; rest should sound like rest.
    pub static START_REST: TonePattern = TonePattern {
        name: "start_rest",
        notes: &[sine(392, 200, 0, 0.20), sine(330, 250, 180, 0.15)],
    };

    /// Alternating chirp; must stay distinguishable from START_HOLD.
    pub static SWITCH_SIDES: TonePattern = TonePattern {
        name: "switch_sides",
        notes: &[
            sine(659, 120, 0, 0.30),
            sine(523, 120, 140, 0.30),
            sine(659, 160, 280, 0.35),
        ],
    };

    pub static COUNTDOWN_3: TonePattern = TonePattern {
        name: "countdown_3",
        notes: &[triangle(440, 80, 0, 0.25)],
    };

    pub static COUNTDOWN_2: TonePattern = TonePattern {
        name: "countdown_2",
        notes: &[triangle(523, 80, 0, 0.30)],
    };

    pub static COUNTDOWN_1: TonePattern = TonePattern {
        name: "countdown_1",
        notes: &[triangle(659, 100, 0, 0.35)],
    };

    pub static REP_COMPLETE: TonePattern = TonePattern {
        name: "rep_complete",
        notes: &[sine(880, 80, 0, 0.20), sine(1047, 100, 60, 0.25)],
    };

    /// Four rising chords, C major walking up to the final octave.
    pub static WORKOUT_COMPLETE: TonePattern = TonePattern {
        name: "workout_complete",
        notes: &[
            sine(523, 200, 0, 0.15),
            sine(659, 200, 0, 0.15),
            sine(784, 200, 0, 0.15),
            sine(587, 200, 250, 0.15),
            sine(740, 200, 250, 0.15),
            sine(880, 200, 250, 0.15),
            sine(659, 200, 500, 0.18),
            sine(784, 200, 500, 0.18),
            sine(988, 200, 500, 0.18),
            sine(523, 400, 750, 0.20),
            sine(659, 400, 750, 0.20),
            sine(784, 400, 750, 0.20),
            sine(1047, 400, 750, 0.20),
        ],
    };
}

pub mod vibrations {
    use super::VibrationPattern;

    pub static START_HOLD: VibrationPattern = VibrationPattern {
        name: "start_hold",
        pulses_ms: &[150, 50, 150],
    };

    pub static END_HOLD: VibrationPattern = VibrationPattern {
        name: "end_hold",
        pulses_ms: &[100, 80, 100, 80, 100],
    };

    pub static START_REST: VibrationPattern = VibrationPattern {
        name: "start_rest",
        pulses_ms: &[80, 100, 80],
    };

    pub static SWITCH_SIDES: VibrationPattern = VibrationPattern {
        name: "switch_sides",
        pulses_ms: &[120, 60, 120],
    };

    pub static COUNTDOWN_3: VibrationPattern = VibrationPattern {
        name: "countdown_3",
        pulses_ms: &[40],
    };

    pub static COUNTDOWN_2: VibrationPattern = VibrationPattern {
        name: "countdown_2",
        pulses_ms: &[60],
    };

    pub static COUNTDOWN_1: VibrationPattern = VibrationPattern {
        name: "countdown_1",
        pulses_ms: &[100],
    };

    pub static REP_COMPLETE: VibrationPattern = VibrationPattern {
        name: "rep_complete",
        pulses_ms: &[50, 50, 50],
    };

    pub static WORKOUT_COMPLETE: VibrationPattern = VibrationPattern {
        name: "workout_complete",
        pulses_ms: &[200, 100, 200, 100, 300, 100, 400],
    };
}
