//! Workout history and streaks.

use chrono::Utc;
use clap::Args;

use holdfast_core::catalog;

use crate::storage::Database;

use super::format_duration;

#[derive(Args)]
pub struct StatsArgs {
    /// Also list the last N sessions
    #[arg(long, value_name = "N")]
    pub recent: Option<u32>,
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: StatsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let stats = db.stats(Utc::now().date_naive())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!(
        "streak: {} day{}",
        stats.streak_days,
        if stats.streak_days == 1 { "" } else { "s" }
    );
    println!("this week: {}/7 days", stats.week_days_active);
    println!("last 28 days: {}/28 days", stats.month_days_active);
    println!("total sessions: {}", stats.total_sessions);

    println!();
    println!("today:");
    for ex in catalog::all_exercises() {
        let done = stats.today_exercises.iter().any(|id| id == &ex.id);
        println!("  [{}] {}", if done { "x" } else { " " }, ex.name);
    }

    if let Some(n) = args.recent {
        println!();
        for record in db.recent(n)? {
            println!(
                "{}  {:<12} {:<10} {:>2}/{} holds  {}{}",
                record.completed_at.format("%Y-%m-%d %H:%M"),
                record.exercise,
                record.level,
                record.holds_completed,
                record.holds_planned,
                format_duration(record.duration_secs),
                if record.bad_day { "  (bad day)" } else { "" },
            );
        }
    }
    Ok(())
}
