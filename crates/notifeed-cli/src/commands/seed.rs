use chrono::Utc;
use clap::Args;
use notifeed_core::storage::sample_notifications;

use super::InputArgs;

#[derive(Args)]
pub struct SeedArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Overwrite an existing list
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: SeedArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = args.input.store()?;
    if store.path().exists() && !args.force {
        return Err(format!("{} already exists (use --force to overwrite)", store.path().display()).into());
    }

    let list = sample_notifications(Utc::now());
    store.write_all(&list)?;
    println!("wrote {} notifications to {}", list.len(), store.path().display());
    Ok(())
}
