//! Shared test fixtures.

use std::sync::{Arc, Mutex};

use holdfast_core::cues::{CueSink, TonePattern, VibrationPattern};
use holdfast_core::{CueDispatcher, ManualClock, TimerEngine};

/// Handle onto a recording sink's call log. The sink itself is boxed
/// into the dispatcher; the test keeps this handle.
#[derive(Clone, Default)]
pub struct CueLog(Arc<Mutex<Vec<String>>>);

impl CueLog {
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count_of(&self, entry: &str) -> usize {
        self.entries().iter().filter(|e| e.as_str() == entry).count()
    }
}

/// Sink that records every call as "tone:<name>", "buzz:<name>", or
/// "say:<phrase>".
pub struct RecordingCues {
    log: CueLog,
}

impl RecordingCues {
    pub fn new() -> (Self, CueLog) {
        let log = CueLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl CueSink for RecordingCues {
    fn play_tone(&mut self, pattern: &TonePattern) -> Result<(), Box<dyn std::error::Error>> {
        self.log.0.lock().unwrap().push(format!("tone:{}", pattern.name));
        Ok(())
    }

    fn vibrate(&mut self, pattern: &VibrationPattern) -> Result<(), Box<dyn std::error::Error>> {
        self.log.0.lock().unwrap().push(format!("buzz:{}", pattern.name));
        Ok(())
    }

    fn speak(&mut self, phrase: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.log.0.lock().unwrap().push(format!("say:{phrase}"));
        Ok(())
    }
}

/// Engine on a manual clock with a recording sink.
pub fn recording_engine() -> (TimerEngine, Arc<ManualClock>, CueLog) {
    let clock = Arc::new(ManualClock::new());
    let (sink, log) = RecordingCues::new();
    let engine = TimerEngine::with_clock(CueDispatcher::new(Box::new(sink)), clock.clone());
    (engine, clock, log)
}
