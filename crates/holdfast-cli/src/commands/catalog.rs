//! Browse the built-in exercises and levels.

use clap::Subcommand;

use holdfast_core::catalog;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List the exercises
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the progression levels
    Levels {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show instructions and tips for one exercise
    Show {
        /// Exercise id
        exercise: String,
    },
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CatalogAction::List { json } => {
            let exercises = catalog::all_exercises();
            if json {
                println!("{}", serde_json::to_string_pretty(&exercises)?);
            } else {
                for ex in exercises {
                    let marker = if ex.bilateral { "  (both sides)" } else { "" };
                    println!("{:<12} {}{marker}", ex.id, ex.name);
                }
            }
        }
        CatalogAction::Levels { json } => {
            let levels = catalog::all_levels();
            if json {
                println!("{}", serde_json::to_string_pretty(&levels)?);
            } else {
                for level in levels {
                    println!("{:<12} {:<12} {}", level.id, level.name, level.description);
                }
            }
        }
        CatalogAction::Show { exercise } => {
            let ex = catalog::exercise(&exercise)
                .ok_or_else(|| format!("unknown exercise: {exercise}"))?;
            println!("{}", ex.name);
            if let Some([first, second]) = &ex.sides {
                println!("bilateral: {first}, then {second}");
            }
            println!();
            for (i, line) in ex.instructions.iter().enumerate() {
                println!("{}. {line}", i + 1);
            }
            if !ex.tips.is_empty() {
                println!();
                for tip in &ex.tips {
                    println!("tip: {tip}");
                }
            }
        }
    }
    Ok(())
}
