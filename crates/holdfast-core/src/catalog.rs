//! Built-in exercise and progression-level catalog.
//!
//! The three McGill Big 3 exercises and the rep pyramids for each
//! progression level. Plans are generated against this content; the
//! bad-day level substitutes for whatever level was asked for when the
//! user wants a gentle session.

use serde::{Deserialize, Serialize};

/// A catalog exercise. `sides` is present exactly when `bilateral` is
/// true and names the two sides in workout order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseDescriptor {
    pub id: String,
    pub name: String,
    pub bilateral: bool,
    pub sides: Option<[String; 2]>,
    pub instructions: Vec<String>,
    pub tips: Vec<String>,
}

/// A progression level: rep pyramid plus the three step durations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionLevel {
    pub id: String,
    pub name: String,
    /// Short human label, e.g. "5-3-1 x 10s".
    pub description: String,
    /// Reps per set; one entry per set, descending in the usual program.
    pub pyramid: Vec<u32>,
    pub hold_secs: u32,
    pub rest_between_reps_secs: u32,
    pub rest_between_sets_secs: u32,
}

// ── Exercises ────────────────────────────────────────────────────────

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn curl_up() -> ExerciseDescriptor {
    ExerciseDescriptor {
        id: "curl-up".into(),
        name: "McGill Curl-Up".into(),
        bilateral: false,
        sides: None,
        instructions: strings(&[
            "Lie on back, one knee bent, foot flat",
            "Hands under lower back arch",
            "Lift head and shoulders as one unit",
            "Keep chin tucked - don't pull neck",
            "Hold, then slowly lower",
        ]),
        tips: strings(&[
            "No movement in lower back",
            "Imagine grapefruit under chin",
        ]),
    }
}

pub fn side_plank() -> ExerciseDescriptor {
    ExerciseDescriptor {
        id: "side-plank".into(),
        name: "Side Plank".into(),
        bilateral: true,
        sides: Some(["Left".into(), "Right".into()]),
        instructions: strings(&[
            "Lie on side, elbow under shoulder",
            "Stack knees (beginner) or feet (advanced)",
            "Place top hand on opposite shoulder",
            "Lift hips to form straight line",
            "Hold, then lower with control",
        ]),
        tips: strings(&[
            "Keep hips aligned with torso",
            "Breathe normally throughout",
        ]),
    }
}

pub fn bird_dog() -> ExerciseDescriptor {
    ExerciseDescriptor {
        id: "bird-dog".into(),
        name: "Bird Dog".into(),
        bilateral: true,
        sides: Some(["Left arm/Right leg".into(), "Right arm/Left leg".into()]),
        instructions: strings(&[
            "Start on all fours",
            "Keep spine neutral",
            "Raise opposite arm and leg",
            "Form straight line hand to foot",
            "Hold, then return with control",
        ]),
        tips: strings(&["No movement in lower back", "Don't let hips rotate"]),
    }
}

/// All exercises in program order.
pub fn all_exercises() -> Vec<ExerciseDescriptor> {
    vec![curl_up(), side_plank(), bird_dog()]
}

/// Look up an exercise by id.
pub fn exercise(id: &str) -> Option<ExerciseDescriptor> {
    all_exercises().into_iter().find(|e| e.id == id)
}

// ── Levels ───────────────────────────────────────────────────────────

pub fn beginner() -> ProgressionLevel {
    ProgressionLevel {
        id: "beginner".into(),
        name: "Beginner".into(),
        description: "3-2-1 x 5s".into(),
        pyramid: vec![3, 2, 1],
        hold_secs: 5,
        rest_between_reps_secs: 5,
        rest_between_sets_secs: 10,
    }
}

pub fn developing() -> ProgressionLevel {
    ProgressionLevel {
        id: "developing".into(),
        name: "Developing".into(),
        description: "5-3-1 x 8s".into(),
        pyramid: vec![5, 3, 1],
        hold_secs: 8,
        rest_between_reps_secs: 5,
        rest_between_sets_secs: 10,
    }
}

pub fn standard() -> ProgressionLevel {
    ProgressionLevel {
        id: "standard".into(),
        name: "Standard".into(),
        description: "5-3-1 x 10s".into(),
        pyramid: vec![5, 3, 1],
        hold_secs: 10,
        rest_between_reps_secs: 5,
        rest_between_sets_secs: 10,
    }
}

pub fn advanced() -> ProgressionLevel {
    ProgressionLevel {
        id: "advanced".into(),
        name: "Advanced".into(),
        description: "8-5-3 x 10s".into(),
        pyramid: vec![8, 5, 3],
        hold_secs: 10,
        rest_between_reps_secs: 5,
        rest_between_sets_secs: 15,
    }
}

pub fn challenge() -> ProgressionLevel {
    ProgressionLevel {
        id: "challenge".into(),
        name: "Challenge".into(),
        description: "1 x 60s".into(),
        pyramid: vec![1],
        hold_secs: 60,
        rest_between_reps_secs: 10,
        rest_between_sets_secs: 15,
    }
}

/// The fixed gentle routine substituted on bad days, regardless of the
/// configured level.
pub fn bad_day_level() -> ProgressionLevel {
    ProgressionLevel {
        id: "bad-day".into(),
        name: "Bad Day".into(),
        description: "3 x 5s gentle".into(),
        pyramid: vec![3],
        hold_secs: 5,
        rest_between_reps_secs: 5,
        rest_between_sets_secs: 5,
    }
}

/// Level ids in progression order. Excludes the bad-day level, which is
/// reached via the bad-day flag rather than selected directly.
pub fn level_order() -> [&'static str; 5] {
    ["beginner", "developing", "standard", "advanced", "challenge"]
}

/// All selectable levels in progression order.
pub fn all_levels() -> Vec<ProgressionLevel> {
    vec![beginner(), developing(), standard(), advanced(), challenge()]
}

/// Look up a level by id. Unknown ids fall back to standard, so a stale
/// saved preference still yields a usable session.
pub fn level(id: &str) -> ProgressionLevel {
    all_levels()
        .into_iter()
        .find(|l| l.id == id)
        .unwrap_or_else(standard)
}
