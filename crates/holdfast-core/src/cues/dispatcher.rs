//! Cue dispatch.
//!
//! Maps session transitions to sink calls, gated by the user's settings.
//! Stateless between calls and infallible from the engine's point of
//! view: sink errors are swallowed here.

use crate::settings::Settings;

use super::patterns::{tones, vibrations, TonePattern, VibrationPattern};
use super::traits::CueSink;

/// A transition the engine wants announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// `side_changed` selects the switch-sides pattern instead of the
    /// generic start pattern; the two never both fire for one step.
    StartHold { side_changed: bool },
    EndHold,
    StartRest,
    RepComplete,
    /// Seconds remaining, 3 down to 1.
    Countdown(u8),
    WorkoutComplete,
}

pub struct CueDispatcher {
    sink: Box<dyn CueSink>,
}

impl CueDispatcher {
    pub fn new(sink: Box<dyn CueSink>) -> Self {
        Self { sink }
    }

    /// Fire one cue through every enabled channel.
    pub fn dispatch(&mut self, cue: Cue, settings: &Settings) {
        let (tone, vibration, phrase) = lookup(cue);
        if settings.sound_enabled {
            let _ = self.sink.play_tone(tone);
        }
        if settings.vibration_enabled {
            let _ = self.sink.vibrate(vibration);
        }
        // Voice is a sub-feature of sound, not an independent channel.
        if settings.sound_enabled && settings.voice_enabled {
            if let Some(phrase) = phrase {
                let _ = self.sink.speak(phrase);
            }
        }
    }
}

fn lookup(cue: Cue) -> (
    &'static TonePattern,
    &'static VibrationPattern,
    Option<&'static str>,
) {
    match cue {
        Cue::StartHold { side_changed: false } => {
            (&tones::START_HOLD, &vibrations::START_HOLD, Some("Hold"))
        }
        Cue::StartHold { side_changed: true } => (
            &tones::SWITCH_SIDES,
            &vibrations::SWITCH_SIDES,
            Some("Switch sides"),
        ),
        Cue::EndHold => (&tones::END_HOLD, &vibrations::END_HOLD, None),
        Cue::StartRest => (&tones::START_REST, &vibrations::START_REST, Some("Rest")),
        Cue::RepComplete => (&tones::REP_COMPLETE, &vibrations::REP_COMPLETE, None),
        Cue::Countdown(1) => (&tones::COUNTDOWN_1, &vibrations::COUNTDOWN_1, None),
        Cue::Countdown(2) => (&tones::COUNTDOWN_2, &vibrations::COUNTDOWN_2, None),
        Cue::Countdown(_) => (&tones::COUNTDOWN_3, &vibrations::COUNTDOWN_3, None),
        Cue::WorkoutComplete => (
            &tones::WORKOUT_COMPLETE,
            &vibrations::WORKOUT_COMPLETE,
            Some("Workout complete. Great job."),
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Log(Arc<Mutex<Vec<String>>>);

    impl Log {
        fn entries(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct Recorder(Log);

    impl CueSink for Recorder {
        fn play_tone(&mut self, pattern: &TonePattern) -> Result<(), Box<dyn std::error::Error>> {
            self.0 .0.lock().unwrap().push(format!("tone:{}", pattern.name));
            Ok(())
        }

        fn vibrate(
            &mut self,
            pattern: &VibrationPattern,
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.0 .0.lock().unwrap().push(format!("buzz:{}", pattern.name));
            Ok(())
        }

        fn speak(&mut self, phrase: &str) -> Result<(), Box<dyn std::error::Error>> {
            self.0 .0.lock().unwrap().push(format!("say:{phrase}"));
            Ok(())
        }
    }

    /// Sink whose every channel fails.
    struct Broken;

    impl CueSink for Broken {
        fn play_tone(&mut self, _: &TonePattern) -> Result<(), Box<dyn std::error::Error>> {
            Err("no audio device".into())
        }

        fn vibrate(&mut self, _: &VibrationPattern) -> Result<(), Box<dyn std::error::Error>> {
            Err("no haptics".into())
        }

        fn speak(&mut self, _: &str) -> Result<(), Box<dyn std::error::Error>> {
            Err("no tts".into())
        }
    }

    fn recorder() -> (CueDispatcher, Log) {
        let log = Log::default();
        (CueDispatcher::new(Box::new(Recorder(log.clone()))), log)
    }

    #[test]
    fn all_channels_fire_when_enabled() {
        let (mut dispatcher, log) = recorder();
        let settings = Settings {
            voice_enabled: true,
            ..Settings::default()
        };
        dispatcher.dispatch(Cue::StartRest, &settings);
        assert_eq!(
            log.entries(),
            vec!["tone:start_rest", "buzz:start_rest", "say:Rest"]
        );
    }

    #[test]
    fn sound_off_silences_tones() {
        let (mut dispatcher, log) = recorder();
        let settings = Settings {
            sound_enabled: false,
            ..Settings::default()
        };
        dispatcher.dispatch(Cue::EndHold, &settings);
        assert_eq!(log.entries(), vec!["buzz:end_hold"]);
    }

    #[test]
    fn voice_requires_sound() {
        let (mut dispatcher, log) = recorder();
        let settings = Settings {
            sound_enabled: false,
            voice_enabled: true,
            vibration_enabled: false,
            ..Settings::default()
        };
        dispatcher.dispatch(Cue::StartHold { side_changed: false }, &settings);
        assert!(log.entries().is_empty());
    }

    #[test]
    fn side_change_substitutes_switch_pattern() {
        let (mut dispatcher, log) = recorder();
        let settings = Settings::default();
        dispatcher.dispatch(Cue::StartHold { side_changed: true }, &settings);
        let entries = log.entries();
        assert!(entries.contains(&"tone:switch_sides".to_string()));
        assert!(!entries.iter().any(|e| e == "tone:start_hold"));
    }

    #[test]
    fn countdown_numbers_map_to_patterns() {
        let (mut dispatcher, log) = recorder();
        let settings = Settings::default();
        dispatcher.dispatch(Cue::Countdown(3), &settings);
        dispatcher.dispatch(Cue::Countdown(2), &settings);
        dispatcher.dispatch(Cue::Countdown(1), &settings);
        let tones: Vec<_> = log
            .entries()
            .into_iter()
            .filter(|e| e.starts_with("tone:"))
            .collect();
        assert_eq!(
            tones,
            vec!["tone:countdown_3", "tone:countdown_2", "tone:countdown_1"]
        );
    }

    #[test]
    fn sink_errors_are_swallowed() {
        let mut dispatcher = CueDispatcher::new(Box::new(Broken));
        let settings = Settings {
            voice_enabled: true,
            ..Settings::default()
        };
        // Must not panic or propagate.
        dispatcher.dispatch(Cue::WorkoutComplete, &settings);
    }
}
