//! Session timing: clock abstraction and the timer engine.

mod clock;
mod engine;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{TimerEngine, TimerState};
