//! Plan step types.

use serde::{Deserialize, Serialize};

/// What a step asks of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Hold,
    Rest,
}

/// One timed interval of a workout. Immutable once generated; the timer
/// walks the step sequence and never edits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    /// Interval length in milliseconds. Always positive.
    pub duration_ms: u64,
    /// 1-based rep index within the set. Rests carry the rep of the
    /// hold they follow.
    pub rep: u32,
    pub total_reps: u32,
    /// 1-based set index.
    pub set: u32,
    pub total_sets: u32,
    /// Side label for bilateral exercises.
    pub side: Option<String>,
    /// True for the longer rest between two sets rather than two reps.
    #[serde(default)]
    pub is_set_rest: bool,
}

impl Step {
    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&StepKind::Hold).unwrap(), "\"hold\"");
        assert_eq!(serde_json::to_string(&StepKind::Rest).unwrap(), "\"rest\"");
    }

    #[test]
    fn duration_secs_is_fractional() {
        let step = Step {
            kind: StepKind::Hold,
            duration_ms: 4370,
            rep: 1,
            total_reps: 1,
            set: 1,
            total_sets: 1,
            side: None,
            is_set_rest: false,
        };
        assert!((step.duration_secs() - 4.37).abs() < f64::EPSILON);
    }
}
