//! Session settings.

use serde::{Deserialize, Serialize};

use crate::plan::PlanOverrides;

/// Per-session user preferences consumed by the engine and the cue
/// dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Master switch for tones. Voice additionally requires this.
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default = "default_true")]
    pub vibration_enabled: bool,
    /// Spoken announcements. Off by default.
    #[serde(default)]
    pub voice_enabled: bool,
    /// Replaces the level's hold duration when positive.
    #[serde(default)]
    pub custom_hold_secs: Option<u32>,
    /// Replaces the level's rest-between-reps duration when positive.
    #[serde(default)]
    pub custom_rest_secs: Option<u32>,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            vibration_enabled: true,
            voice_enabled: false,
            custom_hold_secs: None,
            custom_rest_secs: None,
        }
    }
}

impl Settings {
    /// Plan overrides derived from the custom duration preferences.
    pub fn overrides(&self) -> PlanOverrides {
        PlanOverrides {
            hold_secs: self.custom_hold_secs,
            rest_secs: self.custom_rest_secs,
        }
    }
}
