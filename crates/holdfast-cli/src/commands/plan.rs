//! Print the step sequence a session would run.

use clap::Args;

use holdfast_core::{generate_plan, PlanOverrides, StepKind};

use crate::config::Config;

use super::format_duration;

#[derive(Args)]
pub struct PlanArgs {
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
    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let level = args.level.unwrap_or_else(|| config.session.level.clone());
    let overrides = PlanOverrides {
        hold_secs: args.hold.or(config.durations.hold_secs),
        rest_secs: args.rest.or(config.durations.rest_secs),
    };
    let bad_day = args.bad_day || config.session.bad_day;

    let plan = generate_plan(&args.exercise, &level, bad_day, &overrides)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!(
        "{} - {} ({})",
        plan.exercise.name, plan.level.name, plan.level.description
    );
    for (i, step) in plan.steps.iter().enumerate() {
        let kind = match step.kind {
            StepKind::Hold => "hold",
            StepKind::Rest if step.is_set_rest => "set rest",
            StepKind::Rest => "rest",
        };
        let side = step
            .side
            .as_deref()
            .map(|s| format!("  {s}"))
            .unwrap_or_default();
        println!(
            "{:>3}  {kind:<8} {:>3}s  rep {}/{} set {}/{}{side}",
            i + 1,
            step.duration_ms / 1000,
            step.rep,
            step.total_reps,
            step.set,
            step.total_sets,
        );
    }

    let total_ms: u64 = plan.steps.iter().map(|s| s.duration_ms).sum();
    println!(
        "total: {} holds, {}",
        plan.total_holds,
        format_duration(total_ms / 1000)
    );
    Ok(())
}
