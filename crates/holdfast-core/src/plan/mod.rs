//! Plan generation: expanding an exercise and level into timed steps.

mod generator;
mod step;

pub use generator::{generate_plan, generate_plan_with, PlanOverrides, WorkoutPlan};
pub use step::{Step, StepKind};
