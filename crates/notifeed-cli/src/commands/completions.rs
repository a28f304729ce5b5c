use clap::Args;
use clap_complete::{generate, Shell};

#[derive(Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Writes the completion script for `shell` to stdout.
pub fn run(args: CompletionsArgs, command: &mut clap::Command) -> Result<(), Box<dyn std::error::Error>> {
    generate(args.shell, command, "notifeed", &mut std::io::stdout());
    Ok(())
}
