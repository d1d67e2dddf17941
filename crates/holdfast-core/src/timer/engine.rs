//! Session timer engine.
//!
//! Wall-clock state machine over a generated workout plan. The engine
//! owns no threads and no timers: the caller samples `tick()` on its own
//! cadence (100 ms is typical) and consumes the returned events.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> CountingIn -> Running <-> Paused -> ... -> Complete
//! ```
//!
//! Remaining time is re-derived from a step-start anchor and `clock.now()`
//! on every sample, so late ticks cannot accumulate drift over a session
//! and pause/resume preserves the frozen remainder to the millisecond.
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use holdfast_core::{
//!     generate_plan, CueDispatcher, NullCues, PlanOverrides, Settings, TimerEngine,
//! };
//!
//! let plan = generate_plan("curl-up", "standard", false, &PlanOverrides::default()).unwrap();
//! let mut engine = TimerEngine::new(CueDispatcher::new(Box::new(NullCues)));
//! engine.start(Arc::new(plan), Settings::default()).unwrap();
//! engine.resume();
//! // ...then on a 100ms cadence:
//! for event in engine.tick() {
//!     println!("{event:?}");
//! }
//! ```

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cues::{Cue, CueDispatcher};
use crate::error::{CoreError, Result};
use crate::events::{SessionEvent, TickPhase};
use crate::plan::{Step, StepKind, WorkoutPlan};
use crate::settings::Settings;

use super::clock::{Clock, SystemClock};

/// Fixed pre-roll before the first step of a session.
const GET_READY_MS: u64 = 3_000;

/// Timer lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    /// No live session, or a loaded plan that has not been activated.
    Idle,
    /// The get-ready pre-roll is running.
    CountingIn,
    Running,
    Paused,
    /// A session finished naturally. Terminal until the next `start()`.
    Complete,
}

pub struct TimerEngine {
    dispatcher: CueDispatcher,
    clock: Arc<dyn Clock>,
    plan: Option<Arc<WorkoutPlan>>,
    settings: Settings,
    state: TimerState,
    step_index: usize,
    /// Remaining ms at the last anchor point (activation or step entry).
    remaining_at_anchor_ms: u64,
    /// Set while the clock runs; `None` when frozen.
    anchor: Option<Instant>,
    /// Ceiling of the remaining seconds the last time cues were
    /// evaluated. Countdown cues edge-trigger against this.
    last_ceiling: u64,
    /// The pre-roll runs once per session; afterwards resume means
    /// "continue", not "count in again".
    getting_ready_done: bool,
    /// First activation instant. Completion duration is measured from
    /// here, pauses included.
    session_started: Option<Instant>,
}

impl TimerEngine {
    /// Engine on the system clock.
    pub fn new(dispatcher: CueDispatcher) -> Self {
        Self::with_clock(dispatcher, Arc::new(SystemClock))
    }

    /// Engine on an injected clock.
    pub fn with_clock(dispatcher: CueDispatcher, clock: Arc<dyn Clock>) -> Self {
        Self {
            dispatcher,
            clock,
            plan: None,
            settings: Settings::default(),
            state: TimerState::Idle,
            step_index: 0,
            remaining_at_anchor_ms: 0,
            anchor: None,
            last_ceiling: 0,
            getting_ready_done: false,
            session_started: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn plan(&self) -> Option<&Arc<WorkoutPlan>> {
        self.plan.as_ref()
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.plan.as_ref().and_then(|p| p.steps.get(self.step_index))
    }

    /// False until the pre-roll of the current session has finished.
    pub fn getting_ready_done(&self) -> bool {
        self.getting_ready_done
    }

    /// Remaining time in the current interval, live against the clock.
    pub fn remaining_ms(&self) -> u64 {
        match self.anchor {
            Some(anchor) => {
                let elapsed = self.clock.now().duration_since(anchor).as_millis() as u64;
                self.remaining_at_anchor_ms.saturating_sub(elapsed)
            }
            None => self.remaining_at_anchor_ms,
        }
    }

    /// Progress through the current interval, 0.0 to 100.0.
    pub fn progress_pct(&self) -> f64 {
        let total = self.interval_total_ms();
        if total == 0 {
            return 0.0;
        }
        let remaining = self.remaining_ms().min(total);
        (total - remaining) as f64 / total as f64 * 100.0
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Load a plan and reset to a fresh session. Emits the initial tick
    /// for the first step; the clock does not start until `resume()`.
    ///
    /// Starting over a live session replaces it silently.
    pub fn start(&mut self, plan: Arc<WorkoutPlan>, settings: Settings) -> Result<Vec<SessionEvent>> {
        if plan.steps.is_empty() {
            return Err(CoreError::InvalidPlan("plan has no steps".into()));
        }
        self.settings = settings;
        self.state = TimerState::Idle;
        self.step_index = 0;
        self.remaining_at_anchor_ms = plan.steps[0].duration_ms;
        self.anchor = None;
        self.last_ceiling = 0;
        self.getting_ready_done = false;
        self.session_started = None;
        self.plan = Some(plan);
        Ok(self.tick_event().into_iter().collect())
    }

    /// Begin or continue the session. The first activation of a fresh
    /// plan runs the 3-2-1 pre-roll; a resume after pause replays the
    /// current step's start cue so the user re-orients without looking.
    ///
    /// No-op without a plan or when already running or complete.
    pub fn resume(&mut self) -> Vec<SessionEvent> {
        if self.plan.is_none() {
            return Vec::new();
        }
        match self.state {
            TimerState::Idle | TimerState::Paused => {}
            _ => return Vec::new(),
        }

        let mut events = Vec::new();
        if !self.getting_ready_done {
            if self.state == TimerState::Idle {
                self.remaining_at_anchor_ms = GET_READY_MS;
                self.last_ceiling = GET_READY_MS / 1000 + 1;
                self.session_started = Some(self.clock.now());
            }
            self.state = TimerState::CountingIn;
            self.anchor = Some(self.clock.now());
            events.push(SessionEvent::StateChange {
                is_running: true,
                get_ready: true,
                at: Utc::now(),
            });
            self.fire_countdown_cues(self.remaining_ms());
            events.extend(self.tick_event());
        } else {
            self.state = TimerState::Running;
            self.anchor = Some(self.clock.now());
            events.push(SessionEvent::StateChange {
                is_running: true,
                get_ready: false,
                at: Utc::now(),
            });
            if let Some(step) = self.current_step() {
                let cue = match step.kind {
                    StepKind::Hold => Cue::StartHold { side_changed: false },
                    StepKind::Rest => Cue::StartRest,
                };
                self.dispatcher.dispatch(cue, &self.settings);
            }
        }
        events
    }

    /// Freeze the clock, preserving the exact remainder. Silent: pausing
    /// fires no cue.
    pub fn pause(&mut self) -> Vec<SessionEvent> {
        match self.state {
            TimerState::CountingIn | TimerState::Running => {
                let get_ready = self.state == TimerState::CountingIn;
                self.remaining_at_anchor_ms = self.remaining_ms();
                self.anchor = None;
                self.state = TimerState::Paused;
                vec![SessionEvent::StateChange {
                    is_running: false,
                    get_ready,
                    at: Utc::now(),
                }]
            }
            _ => Vec::new(),
        }
    }

    /// Single-button control: pause when running, resume otherwise.
    pub fn toggle(&mut self) -> Vec<SessionEvent> {
        match self.state {
            TimerState::CountingIn | TimerState::Running => self.pause(),
            _ => self.resume(),
        }
    }

    /// Abort the session: drop the plan and return to Idle. Distinct
    /// from natural completion; no cue fires.
    ///
    /// No-op in Idle and Complete.
    pub fn stop(&mut self) -> Vec<SessionEvent> {
        match self.state {
            TimerState::CountingIn | TimerState::Running | TimerState::Paused => {
                self.clear_session();
                vec![SessionEvent::Stopped { at: Utc::now() }]
            }
            _ => Vec::new(),
        }
    }

    /// Abandon the current hold and move on. Valid only while Running or
    /// Paused on a Hold step; the abandoned rep's completion cues do not
    /// fire. Skipping the final hold completes the workout.
    pub fn skip(&mut self) -> Result<Vec<SessionEvent>> {
        match self.state {
            TimerState::Running | TimerState::Paused => {}
            _ => {
                return Err(CoreError::InvalidControlCall(
                    "skip requires a running or paused session",
                ))
            }
        }
        if !self.getting_ready_done {
            return Err(CoreError::InvalidControlCall(
                "skip before the first hold begins",
            ));
        }
        let step = match self.current_step() {
            Some(step) if step.kind == StepKind::Hold => step.clone(),
            Some(_) => {
                return Err(CoreError::InvalidControlCall(
                    "skip is only valid during a hold",
                ))
            }
            None => return Err(CoreError::InvalidControlCall("no step to skip")),
        };

        let mut events = vec![SessionEvent::Skipped {
            set: step.set,
            rep: step.rep,
            side: step.side.clone(),
            at: Utc::now(),
        }];
        events.extend(self.advance(false));
        Ok(events)
    }

    /// Sample the clock. Returns the events produced by elapsed time:
    /// usually one tick event, or the transition events when the current
    /// interval has expired. Empty outside CountingIn/Running.
    pub fn tick(&mut self) -> Vec<SessionEvent> {
        match self.state {
            TimerState::CountingIn => {
                let remaining = self.remaining_ms();
                if remaining == 0 {
                    self.getting_ready_done = true;
                    self.state = TimerState::Running;
                    let mut events = vec![SessionEvent::StateChange {
                        is_running: true,
                        get_ready: false,
                        at: Utc::now(),
                    }];
                    events.extend(self.enter_step(None));
                    events
                } else {
                    self.fire_countdown_cues(remaining);
                    self.tick_event().into_iter().collect()
                }
            }
            TimerState::Running => {
                let remaining = self.remaining_ms();
                if remaining == 0 {
                    self.advance(true)
                } else {
                    self.fire_countdown_cues(remaining);
                    self.tick_event().into_iter().collect()
                }
            }
            _ => Vec::new(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// True while the pre-roll is the active interval (counting in, or
    /// paused inside the count-in).
    fn in_ready_window(&self) -> bool {
        self.plan.is_some()
            && !self.getting_ready_done
            && matches!(self.state, TimerState::CountingIn | TimerState::Paused)
    }

    fn interval_total_ms(&self) -> u64 {
        if self.in_ready_window() {
            GET_READY_MS
        } else {
            self.current_step().map(|s| s.duration_ms).unwrap_or(0)
        }
    }

    /// Tick event for the current interval. During the pre-roll the
    /// step metadata previews the upcoming first step under the Ready
    /// phase.
    fn tick_event(&self) -> Option<SessionEvent> {
        let step = self.current_step()?;
        let phase = if self.in_ready_window() {
            TickPhase::Ready
        } else {
            match step.kind {
                StepKind::Hold => TickPhase::Hold,
                StepKind::Rest => TickPhase::Rest,
            }
        };
        Some(SessionEvent::Tick {
            time_secs: self.remaining_ms().div_ceil(1000),
            progress_pct: self.progress_pct(),
            phase,
            rep: step.rep,
            total_reps: step.total_reps,
            set: step.set,
            total_sets: step.total_sets,
            side: step.side.clone(),
            is_running: matches!(self.state, TimerState::CountingIn | TimerState::Running),
            at: Utc::now(),
        })
    }

    /// Countdown cues edge-trigger on the ceiling of the remaining
    /// seconds crossing 3, 2, 1. A late sample that crosses several
    /// ceilings at once fires each missed cue exactly once.
    fn fire_countdown_cues(&mut self, remaining_ms: u64) {
        let ceiling = remaining_ms.div_ceil(1000);
        for n in [3u64, 2, 1] {
            if self.last_ceiling > n && ceiling <= n {
                self.dispatcher.dispatch(Cue::Countdown(n as u8), &self.settings);
            }
        }
        if ceiling < self.last_ceiling {
            self.last_ceiling = ceiling;
        }
    }

    /// Anchor the current step, fire its start cue, and emit its entry
    /// events. `previous_side` drives side-switch detection.
    fn enter_step(&mut self, previous_side: Option<String>) -> Vec<SessionEvent> {
        let step = match self.current_step().cloned() {
            Some(step) => step,
            None => return Vec::new(),
        };
        self.remaining_at_anchor_ms = step.duration_ms;
        // Baseline one above the full ceiling so a step of exactly 3s
        // still gets its countdown at entry.
        self.last_ceiling = step.duration_ms.div_ceil(1000) + 1;
        if self.state != TimerState::Paused {
            self.anchor = Some(self.clock.now());
        }

        let side_changed = matches!(
            (&previous_side, &step.side),
            (Some(prev), Some(next)) if prev != next
        );
        let cue = match step.kind {
            StepKind::Hold => Cue::StartHold { side_changed },
            StepKind::Rest => Cue::StartRest,
        };
        self.dispatcher.dispatch(cue, &self.settings);

        let mut events = Vec::new();
        if side_changed {
            if let Some(side) = step.side.clone() {
                events.push(SessionEvent::SideSwitch {
                    side,
                    at: Utc::now(),
                });
            }
        }
        events.push(SessionEvent::PhaseChange {
            step,
            at: Utc::now(),
        });
        events.extend(self.tick_event());
        events
    }

    /// Step boundary: leave the current step and enter the next, or
    /// finish the workout. `expired` is false for skips, which stay
    /// silent about the abandoned rep.
    fn advance(&mut self, expired: bool) -> Vec<SessionEvent> {
        let plan = match self.plan.clone() {
            Some(plan) => plan,
            None => return Vec::new(),
        };
        let outgoing = plan.steps[self.step_index].clone();

        if expired && outgoing.kind == StepKind::Hold {
            self.dispatcher.dispatch(Cue::EndHold, &self.settings);
            self.dispatcher.dispatch(Cue::RepComplete, &self.settings);
        }

        self.step_index += 1;
        if self.step_index >= plan.steps.len() {
            return self.complete(&plan);
        }
        self.enter_step(outgoing.side)
    }

    fn complete(&mut self, plan: &WorkoutPlan) -> Vec<SessionEvent> {
        let duration_secs = self
            .session_started
            .map(|started| {
                let ms = self.clock.now().duration_since(started).as_millis() as u64;
                (ms + 500) / 1000
            })
            .unwrap_or(0);
        self.dispatcher.dispatch(Cue::WorkoutComplete, &self.settings);
        self.plan = None;
        self.state = TimerState::Complete;
        self.step_index = 0;
        self.anchor = None;
        self.remaining_at_anchor_ms = 0;
        vec![SessionEvent::Completed {
            duration_secs,
            total_holds: plan.total_holds,
            at: Utc::now(),
        }]
    }

    fn clear_session(&mut self) {
        self.plan = None;
        self.state = TimerState::Idle;
        self.step_index = 0;
        self.remaining_at_anchor_ms = 0;
        self.anchor = None;
        self.last_ceiling = 0;
        self.getting_ready_done = false;
        self.session_started = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::cues::NullCues;
    use crate::plan::{generate_plan, PlanOverrides};
    use crate::timer::clock::ManualClock;

    fn engine() -> (TimerEngine, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let engine = TimerEngine::with_clock(
            CueDispatcher::new(Box::new(NullCues)),
            clock.clone(),
        );
        (engine, clock)
    }

    fn bad_day_plan() -> Arc<WorkoutPlan> {
        Arc::new(generate_plan("curl-up", "standard", true, &PlanOverrides::default()).unwrap())
    }

    #[test]
    fn start_loads_plan_but_does_not_run() {
        let (mut engine, _clock) = engine();
        let events = engine.start(bad_day_plan(), Settings::default()).unwrap();
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining_ms(), 5000);
        assert!(matches!(
            events.as_slice(),
            [SessionEvent::Tick {
                time_secs: 5,
                is_running: false,
                ..
            }]
        ));
    }

    #[test]
    fn start_rejects_empty_plan() {
        let (mut engine, _clock) = engine();
        let plan = Arc::new(WorkoutPlan {
            exercise: crate::catalog::curl_up(),
            level: crate::catalog::standard(),
            steps: Vec::new(),
            total_holds: 0,
        });
        let err = engine.start(plan, Settings::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPlan(_)));
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn first_resume_counts_in() {
        let (mut engine, clock) = engine();
        engine.start(bad_day_plan(), Settings::default()).unwrap();
        engine.resume();
        assert_eq!(engine.state(), TimerState::CountingIn);
        assert_eq!(engine.remaining_ms(), GET_READY_MS);

        clock.advance(Duration::from_millis(GET_READY_MS));
        let events = engine.tick();
        assert_eq!(engine.state(), TimerState::Running);
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::PhaseChange { .. })));
        assert_eq!(engine.remaining_ms(), 5000);
    }

    #[test]
    fn pause_preserves_exact_remainder() {
        let (mut engine, clock) = engine();
        engine.start(bad_day_plan(), Settings::default()).unwrap();
        engine.resume();
        clock.advance(Duration::from_millis(GET_READY_MS));
        engine.tick();

        clock.advance(Duration::from_millis(630));
        engine.tick();
        engine.pause();
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(engine.remaining_ms(), 4370);

        // A long wall-clock gap while paused changes nothing.
        clock.advance(Duration::from_secs(3600));
        assert_eq!(engine.remaining_ms(), 4370);

        engine.resume();
        assert_eq!(engine.state(), TimerState::Running);
        clock.advance(Duration::from_millis(370));
        engine.tick();
        assert_eq!(engine.remaining_ms(), 4000);
    }

    #[test]
    fn toggle_flips_between_running_and_paused() {
        let (mut engine, clock) = engine();
        engine.start(bad_day_plan(), Settings::default()).unwrap();
        engine.toggle();
        assert_eq!(engine.state(), TimerState::CountingIn);
        engine.toggle();
        assert_eq!(engine.state(), TimerState::Paused);
        clock.advance(Duration::from_millis(10));
        engine.toggle();
        assert_eq!(engine.state(), TimerState::CountingIn);
    }

    #[test]
    fn stop_clears_the_session() {
        let (mut engine, clock) = engine();
        engine.start(bad_day_plan(), Settings::default()).unwrap();
        engine.resume();
        clock.advance(Duration::from_millis(500));
        let events = engine.stop();
        assert!(matches!(events.as_slice(), [SessionEvent::Stopped { .. }]));
        assert_eq!(engine.state(), TimerState::Idle);
        assert!(engine.plan().is_none());
        assert!(engine.tick().is_empty());
    }

    #[test]
    fn stop_is_a_noop_when_idle() {
        let (mut engine, _clock) = engine();
        assert!(engine.stop().is_empty());
        engine.start(bad_day_plan(), Settings::default()).unwrap();
        // Loaded but not activated: still Idle, still a no-op.
        assert!(engine.stop().is_empty());
        assert!(engine.plan().is_some());
    }

    #[test]
    fn resume_without_plan_is_a_noop() {
        let (mut engine, _clock) = engine();
        assert!(engine.resume().is_empty());
        assert!(engine.toggle().is_empty());
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn skip_rejected_during_count_in() {
        let (mut engine, _clock) = engine();
        engine.start(bad_day_plan(), Settings::default()).unwrap();
        engine.resume();
        let err = engine.skip().unwrap_err();
        assert!(matches!(err, CoreError::InvalidControlCall(_)));
    }

    #[test]
    fn skip_rejected_on_rest() {
        let (mut engine, clock) = engine();
        engine.start(bad_day_plan(), Settings::default()).unwrap();
        engine.resume();
        clock.advance(Duration::from_millis(GET_READY_MS));
        engine.tick();
        // Into the first rest.
        clock.advance(Duration::from_millis(5000));
        engine.tick();
        assert_eq!(engine.current_step().unwrap().kind, StepKind::Rest);
        let err = engine.skip().unwrap_err();
        assert!(matches!(err, CoreError::InvalidControlCall(_)));
    }

    #[test]
    fn skip_advances_without_finishing_the_rep() {
        let (mut engine, clock) = engine();
        engine.start(bad_day_plan(), Settings::default()).unwrap();
        engine.resume();
        clock.advance(Duration::from_millis(GET_READY_MS));
        engine.tick();

        let events = engine.skip().unwrap();
        assert!(matches!(
            events.first(),
            Some(SessionEvent::Skipped { set: 1, rep: 1, .. })
        ));
        assert_eq!(engine.current_step().unwrap().kind, StepKind::Rest);
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn skip_while_paused_stays_paused() {
        let (mut engine, clock) = engine();
        engine.start(bad_day_plan(), Settings::default()).unwrap();
        engine.resume();
        clock.advance(Duration::from_millis(GET_READY_MS));
        engine.tick();
        engine.pause();

        engine.skip().unwrap();
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(engine.current_step().unwrap().kind, StepKind::Rest);
        // The new step is frozen at its full duration.
        assert_eq!(engine.remaining_ms(), 5000);
        clock.advance(Duration::from_secs(10));
        assert_eq!(engine.remaining_ms(), 5000);
    }

    #[test]
    fn replaced_session_does_not_emit_stop() {
        let (mut engine, clock) = engine();
        engine.start(bad_day_plan(), Settings::default()).unwrap();
        engine.resume();
        clock.advance(Duration::from_millis(1000));
        engine.tick();

        let events = engine.start(bad_day_plan(), Settings::default()).unwrap();
        assert!(!events
            .iter()
            .any(|e| matches!(e, SessionEvent::Stopped { .. })));
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining_ms(), 5000);
    }

    #[test]
    fn snapshot_queries_track_progress() {
        let (mut engine, clock) = engine();
        engine.start(bad_day_plan(), Settings::default()).unwrap();
        assert_eq!(engine.progress_pct(), 0.0);
        engine.resume();
        clock.advance(Duration::from_millis(GET_READY_MS));
        engine.tick();

        clock.advance(Duration::from_millis(2500));
        engine.tick();
        assert_eq!(engine.step_index(), 0);
        assert_eq!(engine.remaining_ms(), 2500);
        assert!((engine.progress_pct() - 50.0).abs() < 1e-9);
    }
}
