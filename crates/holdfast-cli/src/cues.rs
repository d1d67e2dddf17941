//! Terminal cue sink.
//!
//! The terminal has one sound: the bell. Every tone pattern maps to it,
//! speech becomes a printed line, and vibration falls through to the
//! trait's no-op.

use std::io::Write;

use holdfast_core::cues::{CueSink, TonePattern};

pub struct TerminalCues;

impl CueSink for TerminalCues {
    fn play_tone(&mut self, _pattern: &TonePattern) -> Result<(), Box<dyn std::error::Error>> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }

    fn speak(&mut self, phrase: &str) -> Result<(), Box<dyn std::error::Error>> {
        println!("\n  \"{phrase}\"");
        Ok(())
    }
}
