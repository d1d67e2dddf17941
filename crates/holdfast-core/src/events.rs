//! Session event types.
//!
//! Every observable change in a session is expressed as a `SessionEvent`.
//! Control calls and `tick()` return the events they caused; the caller
//! consumes the stream however it likes (render, record, forward).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::Step;

/// Phase reported in tick events. `Ready` covers the 3-2-1 pre-roll
/// before the first step of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickPhase {
    Ready,
    Hold,
    Rest,
}

/// Event emitted by the session timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// Periodic progress sample for the current interval. `time_secs` is
    /// the ceiling of the remaining time, so a 10s hold displays 10..1
    /// and never shows 0 while time is left.
    Tick {
        time_secs: u64,
        progress_pct: f64,
        phase: TickPhase,
        rep: u32,
        total_reps: u32,
        set: u32,
        total_sets: u32,
        side: Option<String>,
        is_running: bool,
        at: DateTime<Utc>,
    },
    /// A new step became current.
    PhaseChange { step: Step, at: DateTime<Utc> },
    /// The incoming step is on the other side of the body.
    SideSwitch { side: String, at: DateTime<Utc> },
    /// A hold was abandoned via `skip()`.
    Skipped {
        set: u32,
        rep: u32,
        side: Option<String>,
        at: DateTime<Utc>,
    },
    /// Running/paused flip. `get_ready` is set while the pre-roll is the
    /// active interval.
    StateChange {
        is_running: bool,
        get_ready: bool,
        at: DateTime<Utc>,
    },
    /// The final step finished (or was skipped). Terminal.
    Completed {
        duration_secs: u64,
        total_holds: u32,
        at: DateTime<Utc>,
    },
    /// The session was aborted via `stop()`.
    Stopped { at: DateTime<Utc> },
}
