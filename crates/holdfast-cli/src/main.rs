use clap::{Parser, Subcommand};

mod commands;
mod config;
mod cues;
mod storage;

#[derive(Parser)]
#[command(name = "holdfast-cli", version, about = "Holdfast - guided McGill Big 3 hold timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a guided workout session in the terminal
    Run(commands::run::RunArgs),
    /// Print the step sequence a session would run
    Plan(commands::plan::PlanArgs),
    /// Browse the built-in exercises and levels
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Workout history, streak, and today's checklist
    Stats(commands::stats::StatsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Catalog { action } => commands::catalog::run(action),
        Commands::Stats(args) => commands::stats::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
