use std::time::Instant;

use chrono::Utc;
use clap::Args;

use super::{render_card, InputArgs};

#[derive(Args)]
pub struct CardsArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CardsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let widget = args.input.mount()?;
    let cards = widget.cards(Instant::now(), Utc::now());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    if widget.is_empty() {
        println!("No notifications yet");
        return Ok(());
    }
    let visible: Vec<String> = cards.iter().filter(|c| c.visible).map(render_card).collect();
    println!("{}", visible.join("\n\n"));
    Ok(())
}
