use std::time::Instant;

use clap::Args;
use notifeed_core::{Event, Source};

use super::{parse_source, InputArgs};

#[derive(Args)]
pub struct DeleteArgs {
    /// Card whose delete button is tapped (telegram, tradingview)
    #[arg(long, short, value_parser = parse_source)]
    pub source: Source,
    #[command(flatten)]
    pub input: InputArgs,
}

pub fn run(args: DeleteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut widget = args.input.mount()?;
    match widget.tap_delete(args.source, Instant::now()) {
        Some(Event::SourceDeleted { removed, .. }) => {
            println!("deleted {removed} {} notifications", args.source);
        }
        _ => println!("nothing to delete for {}", args.source),
    }
    Ok(())
}
