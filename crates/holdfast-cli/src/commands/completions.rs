//! Shell completion generation.

use clap::{Args, CommandFactory};
use clap_complete::Shell;

#[derive(Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = crate::Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "holdfast-cli", &mut std::io::stdout());
    Ok(())
}
