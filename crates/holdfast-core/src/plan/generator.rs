//! Workout plan generation.
//!
//! Expands an exercise and a progression level into the flat step
//! sequence the timer consumes. Bilateral exercises complete one side's
//! full rep count before switching, which keeps position changes to one
//! per set. The final step of every plan is a hold; trailing rest is
//! never emitted.

use serde::{Deserialize, Serialize};

use crate::catalog::{self, ExerciseDescriptor, ProgressionLevel};
use crate::error::{CoreError, Result};

use super::step::{Step, StepKind};

/// Per-session duration overrides. Only positive values substitute; the
/// set-rest duration and the pyramid are never overridden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOverrides {
    pub hold_secs: Option<u32>,
    pub rest_secs: Option<u32>,
}

/// A fully expanded workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub exercise: ExerciseDescriptor,
    /// Effective level: bad-day substitution and overrides already
    /// applied, so consumers see the durations that will actually run.
    pub level: ProgressionLevel,
    pub steps: Vec<Step>,
    pub total_holds: u32,
}

/// Expand (exercise id, level id, bad-day flag, overrides) into a plan.
///
/// Ids resolve against the built-in catalog; an unknown level falls back
/// to standard while an unknown exercise is an error. The bad-day flag
/// substitutes the gentle fixed level before overrides apply.
pub fn generate_plan(
    exercise_id: &str,
    level_id: &str,
    bad_day: bool,
    overrides: &PlanOverrides,
) -> Result<WorkoutPlan> {
    let exercise = catalog::exercise(exercise_id)
        .ok_or_else(|| CoreError::UnknownExercise(exercise_id.to_string()))?;
    let level = if bad_day {
        catalog::bad_day_level()
    } else {
        catalog::level(level_id)
    };
    generate_plan_with(exercise, level, overrides)
}

/// Expand a concrete exercise/level pair. Callers with their own level
/// definitions come through here; `generate_plan` resolves catalog ids
/// first and then delegates.
pub fn generate_plan_with(
    exercise: ExerciseDescriptor,
    mut level: ProgressionLevel,
    overrides: &PlanOverrides,
) -> Result<WorkoutPlan> {
    if let Some(hold) = overrides.hold_secs {
        if hold > 0 {
            level.hold_secs = hold;
        }
    }
    if let Some(rest) = overrides.rest_secs {
        if rest > 0 {
            level.rest_between_reps_secs = rest;
        }
    }
    validate(&level)?;

    let total_sets = level.pyramid.len() as u32;
    let mut steps = Vec::new();

    for (set_index, &reps) in level.pyramid.iter().enumerate() {
        let set = set_index as u32 + 1;
        let last_set = set_index + 1 == level.pyramid.len();

        if exercise.bilateral {
            let [side_a, side_b] = exercise.sides.clone().ok_or_else(|| {
                CoreError::InvalidPlan("bilateral exercise has no side labels".into())
            })?;

            // First side always rests after each hold; the side switch
            // needs the gap even on the set's last rep.
            for rep in 1..=reps {
                steps.push(hold_step(&level, rep, reps, set, total_sets, Some(side_a.clone())));
                steps.push(rest_step(
                    &level,
                    rep,
                    reps,
                    set,
                    total_sets,
                    Some(side_a.clone()),
                    false,
                ));
            }
            for rep in 1..=reps {
                steps.push(hold_step(&level, rep, reps, set, total_sets, Some(side_b.clone())));
                let last_rep = rep == reps;
                if !(last_rep && last_set) {
                    steps.push(rest_step(
                        &level,
                        rep,
                        reps,
                        set,
                        total_sets,
                        Some(side_b.clone()),
                        last_rep,
                    ));
                }
            }
        } else {
            for rep in 1..=reps {
                steps.push(hold_step(&level, rep, reps, set, total_sets, None));
                let last_rep = rep == reps;
                if !(last_rep && last_set) {
                    steps.push(rest_step(&level, rep, reps, set, total_sets, None, last_rep));
                }
            }
        }
    }

    let total_holds = steps.iter().filter(|s| s.kind == StepKind::Hold).count() as u32;
    Ok(WorkoutPlan {
        exercise,
        level,
        steps,
        total_holds,
    })
}

fn hold_step(
    level: &ProgressionLevel,
    rep: u32,
    total_reps: u32,
    set: u32,
    total_sets: u32,
    side: Option<String>,
) -> Step {
    Step {
        kind: StepKind::Hold,
        duration_ms: secs_to_ms(level.hold_secs),
        rep,
        total_reps,
        set,
        total_sets,
        side,
        is_set_rest: false,
    }
}

fn rest_step(
    level: &ProgressionLevel,
    rep: u32,
    total_reps: u32,
    set: u32,
    total_sets: u32,
    side: Option<String>,
    set_rest: bool,
) -> Step {
    let secs = if set_rest {
        level.rest_between_sets_secs
    } else {
        level.rest_between_reps_secs
    };
    Step {
        kind: StepKind::Rest,
        duration_ms: secs_to_ms(secs),
        rep,
        total_reps,
        set,
        total_sets,
        side,
        is_set_rest: set_rest,
    }
}

fn secs_to_ms(secs: u32) -> u64 {
    u64::from(secs) * 1000
}

fn validate(level: &ProgressionLevel) -> Result<()> {
    if level.pyramid.is_empty() {
        return Err(CoreError::InvalidPlan("pyramid has no sets".into()));
    }
    if level.pyramid.iter().any(|&reps| reps == 0) {
        return Err(CoreError::InvalidPlan("pyramid set with zero reps".into()));
    }
    if level.hold_secs == 0 {
        return Err(CoreError::InvalidPlan("hold duration must be positive".into()));
    }
    if level.rest_between_reps_secs == 0 || level.rest_between_sets_secs == 0 {
        return Err(CoreError::InvalidPlan("rest duration must be positive".into()));
    }
    Ok(())
}
