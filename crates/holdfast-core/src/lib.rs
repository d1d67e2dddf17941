//! # Holdfast Core Library
//!
//! Core logic for Holdfast, a guided timer for isometric-hold routines
//! in the McGill Big 3 style (curl-up, side plank, bird dog).
//!
//! ## Architecture
//!
//! The library is organized around three components:
//!
//! - **Plan generation**: expands an exercise and a progression level
//!   into the ordered hold/rest step sequence of one session
//! - **Timer engine**: a wall-clock state machine the caller samples;
//!   every control call and tick returns typed session events
//! - **Cue dispatch**: maps step transitions to tone, vibration, and
//!   speech calls behind a capability trait the caller implements
//!
//! ## Key Components
//!
//! - [`generate_plan`]: catalog ids in, [`WorkoutPlan`] out
//! - [`TimerEngine`]: start / resume / pause / skip / stop / tick
//! - [`CueDispatcher`] and [`CueSink`]: cue routing and output
//! - [`catalog`]: the built-in exercises and progression levels

pub mod catalog;
pub mod cues;
pub mod error;
pub mod events;
pub mod plan;
pub mod settings;
pub mod timer;

pub use catalog::{ExerciseDescriptor, ProgressionLevel};
pub use cues::{Cue, CueDispatcher, CueSink, NullCues};
pub use error::{CoreError, Result};
pub use events::{SessionEvent, TickPhase};
pub use plan::{generate_plan, generate_plan_with, PlanOverrides, Step, StepKind, WorkoutPlan};
pub use settings::Settings;
pub use timer::{Clock, ManualClock, SystemClock, TimerEngine, TimerState};
