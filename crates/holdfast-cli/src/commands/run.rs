//! The interactive session command.
//!
//! Drives the engine off a 100ms interval while reading control lines
//! from stdin: Enter toggles pause, `s` skips the current hold, `q`
//! stops. Completed sessions are recorded to the history database.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

use holdfast_core::{
    generate_plan, CueDispatcher, SessionEvent, Settings, StepKind, TickPhase, TimerEngine,
    WorkoutPlan,
};

use crate::config::Config;
use crate::cues::TerminalCues;
use crate::storage::Database;

use super::format_duration;

const TICK_MS: u64 = 100;

#[derive(Args)]
pub struct RunArgs {
    /// Exercise id (curl-up, side-plank, bird-dog)
    pub exercise: String,
    /// Progression level (defaults to the configured level)
    #[arg(long, value_parser = ["beginner", "developing", "standard", "advanced", "challenge"])]
    pub level: Option<String>,
    /// Use the gentle bad-day routine
    #[arg(long)]
    pub bad_day: bool,
    /// Override the hold duration, in seconds
    #[arg(long)]
    pub hold: Option<u32>,
    /// Override the rest duration, in seconds
    #[arg(long)]
    pub rest: Option<u32>,
    /// Disable every cue channel
    #[arg(long)]
    pub quiet: bool,
    /// Disable tones only
    #[arg(long)]
    pub no_sound: bool,
    /// Disable vibration only
    #[arg(long)]
    pub no_vibration: bool,
    /// Announce phases out loud
    #[arg(long)]
    pub voice: bool,
}

enum Outcome {
    Completed { duration_secs: u64 },
    Stopped,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(session(args))
}

async fn session(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let settings = merge_settings(&config, &args);
    let level = args
        .level
        .clone()
        .unwrap_or_else(|| config.session.level.clone());
    let bad_day = args.bad_day || config.session.bad_day;

    let plan = Arc::new(generate_plan(
        &args.exercise,
        &level,
        bad_day,
        &settings.overrides(),
    )?);
    print_banner(&plan, bad_day);

    let mut engine = TimerEngine::new(CueDispatcher::new(Box::new(TerminalCues)));
    let mut skipped = 0u32;
    let mut outcome: Option<Outcome> = None;

    println!("controls: Enter = pause/resume, s = skip hold, q = stop");
    for event in engine.start(plan.clone(), settings)? {
        render(&event);
    }
    for event in engine.resume() {
        render(&event);
    }

    let mut interval = tokio::time::interval(Duration::from_millis(TICK_MS));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    while outcome.is_none() {
        tokio::select! {
            _ = interval.tick() => {
                for event in engine.tick() {
                    track(&event, &mut skipped, &mut outcome);
                    render(&event);
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line?.as_deref().map(str::trim) {
                    Some("") => {
                        for event in engine.toggle() {
                            render(&event);
                        }
                    }
                    Some("s") => match engine.skip() {
                        Ok(events) => {
                            for event in events {
                                track(&event, &mut skipped, &mut outcome);
                                render(&event);
                            }
                        }
                        Err(e) => println!("\n{e}"),
                    },
                    Some("q") => {
                        for event in engine.stop() {
                            track(&event, &mut skipped, &mut outcome);
                            render(&event);
                        }
                    }
                    Some(_) => {}
                    // stdin closed: run hands-free on the interval alone.
                    None => stdin_open = false,
                }
            }
        }
    }

    if let Some(Outcome::Completed { duration_secs }) = outcome {
        let completed = plan.total_holds.saturating_sub(skipped);
        let db = Database::open()?;
        db.record_workout(
            &plan.exercise.id,
            &plan.level.id,
            bad_day,
            completed,
            plan.total_holds,
            duration_secs,
            chrono::Utc::now(),
        )?;

        let stats = db.stats(chrono::Utc::now().date_naive())?;
        println!(
            "today: {}/3 exercises  streak: {} day{}",
            stats.today_exercises.len(),
            stats.streak_days,
            if stats.streak_days == 1 { "" } else { "s" },
        );
    }
    Ok(())
}

fn merge_settings(config: &Config, args: &RunArgs) -> Settings {
    let mut settings = config.settings();
    if args.hold.is_some() {
        settings.custom_hold_secs = args.hold;
    }
    if args.rest.is_some() {
        settings.custom_rest_secs = args.rest;
    }
    if args.no_sound {
        settings.sound_enabled = false;
    }
    if args.no_vibration {
        settings.vibration_enabled = false;
    }
    if args.voice {
        settings.voice_enabled = true;
    }
    if args.quiet {
        settings.sound_enabled = false;
        settings.vibration_enabled = false;
        settings.voice_enabled = false;
    }
    settings
}

fn print_banner(plan: &WorkoutPlan, bad_day: bool) {
    let total_ms: u64 = plan.steps.iter().map(|s| s.duration_ms).sum();
    println!(
        "{} - {} ({})",
        plan.exercise.name, plan.level.name, plan.level.description
    );
    if bad_day {
        println!("bad-day mode: gentle routine");
    }
    println!(
        "{} holds, about {}",
        plan.total_holds,
        format_duration(total_ms / 1000 + 3)
    );
}

/// Update session bookkeeping from one event.
fn track(event: &SessionEvent, skipped: &mut u32, outcome: &mut Option<Outcome>) {
    match event {
        SessionEvent::Skipped { .. } => *skipped += 1,
        SessionEvent::Completed { duration_secs, .. } => {
            *outcome = Some(Outcome::Completed {
                duration_secs: *duration_secs,
            });
        }
        SessionEvent::Stopped { .. } => *outcome = Some(Outcome::Stopped),
        _ => {}
    }
}

fn render(event: &SessionEvent) {
    match event {
        SessionEvent::Tick {
            time_secs,
            progress_pct,
            phase,
            rep,
            total_reps,
            set,
            side,
            ..
        } => {
            let label = match phase {
                TickPhase::Ready => "ready",
                TickPhase::Hold => "hold ",
                TickPhase::Rest => "rest ",
            };
            let side_label = side.as_deref().unwrap_or("");
            print!(
                "\r{label} {time_secs:>3}s [{}] rep {rep}/{total_reps} set {set} {side_label}   ",
                progress_bar(*progress_pct)
            );
            let _ = std::io::stdout().flush();
        }
        SessionEvent::PhaseChange { step, .. } => {
            let kind = match step.kind {
                StepKind::Hold => "hold",
                StepKind::Rest if step.is_set_rest => "set rest",
                StepKind::Rest => "rest",
            };
            let side = step
                .side
                .as_deref()
                .map(|s| format!(" ({s})"))
                .unwrap_or_default();
            println!(
                "\n-> {kind} {}s  rep {}/{} set {}/{}{side}",
                step.duration_ms / 1000,
                step.rep,
                step.total_reps,
                step.set,
                step.total_sets,
            );
        }
        SessionEvent::SideSwitch { side, .. } => {
            println!("\n== switch sides: {side} ==");
        }
        SessionEvent::Skipped { rep, set, .. } => {
            println!("\nskipped rep {rep} of set {set}");
        }
        SessionEvent::StateChange {
            is_running,
            get_ready,
            ..
        } => {
            if *get_ready && *is_running {
                println!("\nget ready...");
            } else if !is_running {
                println!("\npaused (Enter to resume)");
            }
        }
        SessionEvent::Completed {
            duration_secs,
            total_holds,
            ..
        } => {
            println!(
                "\n\nworkout complete: {total_holds} holds in {}",
                format_duration(*duration_secs)
            );
        }
        SessionEvent::Stopped { .. } => {
            println!("\nstopped");
        }
    }
}

fn progress_bar(pct: f64) -> String {
    const WIDTH: usize = 20;
    let filled = (((pct / 100.0) * WIDTH as f64).round() as usize).min(WIDTH);
    format!("{}{}", "#".repeat(filled), "-".repeat(WIDTH - filled))
}
