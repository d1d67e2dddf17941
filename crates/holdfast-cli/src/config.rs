//! CLI configuration.
//!
//! TOML file at `~/.config/holdfast/config.toml` holding the default
//! progression level, the bad-day switch, cue channel preferences, and
//! optional custom durations. Command-line flags override these per
//! invocation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use holdfast_core::{catalog, Settings};

use crate::storage::data_dir;

/// Session defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub bad_day: bool,
}

/// Cue channel switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuesConfig {
    #[serde(default = "default_true")]
    pub sound: bool,
    #[serde(default = "default_true")]
    pub vibration: bool,
    #[serde(default)]
    pub voice: bool,
}

/// Optional duration overrides, in seconds. Absent means "use the
/// level's value".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DurationsConfig {
    #[serde(default)]
    pub hold_secs: Option<u32>,
    #[serde(default)]
    pub rest_secs: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub cues: CuesConfig,
    #[serde(default)]
    pub durations: DurationsConfig,
}

fn default_level() -> String {
    "standard".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            bad_day: false,
        }
    }
}

impl Default for CuesConfig {
    fn default() -> Self {
        Self {
            sound: true,
            vibration: true,
            voice: false,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults on first run.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(_) => {
                let config = Self::default();
                config.save_to(&path)?;
                Ok(config)
            }
        }
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::path()?)
    }

    fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Engine settings derived from this config.
    pub fn settings(&self) -> Settings {
        Settings {
            sound_enabled: self.cues.sound,
            vibration_enabled: self.cues.vibration,
            voice_enabled: self.cues.voice,
            custom_hold_secs: self.durations.hold_secs,
            custom_rest_secs: self.durations.rest_secs,
        }
    }

    /// Value of one config key, rendered for display.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "session.level" => Some(self.session.level.clone()),
            "session.bad_day" => Some(self.session.bad_day.to_string()),
            "cues.sound" => Some(self.cues.sound.to_string()),
            "cues.vibration" => Some(self.cues.vibration.to_string()),
            "cues.voice" => Some(self.cues.voice.to_string()),
            "durations.hold_secs" => Some(render_opt(self.durations.hold_secs)),
            "durations.rest_secs" => Some(render_opt(self.durations.rest_secs)),
            _ => None,
        }
    }

    /// Parse and apply one key/value pair without persisting. The
    /// `config set` command follows this with a save.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        match key {
            "session.level" => {
                if !catalog::level_order().contains(&value) {
                    return Err(format!("unknown level: {value}").into());
                }
                self.session.level = value.to_string();
            }
            "session.bad_day" => self.session.bad_day = value.parse()?,
            "cues.sound" => self.cues.sound = value.parse()?,
            "cues.vibration" => self.cues.vibration = value.parse()?,
            "cues.voice" => self.cues.voice = value.parse()?,
            "durations.hold_secs" => self.durations.hold_secs = parse_duration(value)?,
            "durations.rest_secs" => self.durations.rest_secs = parse_duration(value)?,
            _ => return Err(format!("unknown config key: {key}").into()),
        }
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.apply(key, value)?;
        self.save()
    }

    /// The keys `get`/`set` understand, for help output.
    pub fn keys() -> [&'static str; 7] {
        [
            "session.level",
            "session.bad_day",
            "cues.sound",
            "cues.vibration",
            "cues.voice",
            "durations.hold_secs",
            "durations.rest_secs",
        ]
    }
}

fn render_opt(value: Option<u32>) -> String {
    match value {
        Some(n) => n.to_string(),
        None => "unset".to_string(),
    }
}

/// "off" or "0" clears an override; a positive integer sets it.
fn parse_duration(value: &str) -> Result<Option<u32>, Box<dyn std::error::Error>> {
    if value == "off" || value == "0" {
        return Ok(None);
    }
    Ok(Some(value.parse()?))
}
