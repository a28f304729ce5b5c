use chrono::Utc;
use clap::Args;
use notifeed_core::Source;

use super::{parse_source, render_item, InputArgs};

#[derive(Args)]
pub struct DetailArgs {
    /// Card to open (telegram, tradingview)
    #[arg(long, short, value_parser = parse_source)]
    pub source: Source,
    #[command(flatten)]
    pub input: InputArgs,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: DetailArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut widget = args.input.mount()?;
    let Some((view, _opened)) = widget.tap_card(args.source) else {
        if args.json {
            println!("null");
        } else {
            println!("No notifications from {}", args.source);
        }
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let now = Utc::now();
    let date_format = &widget.config().format.date_format;
    println!("{}", view.source);
    for item in &view.items {
        println!("  {}", render_item(item, now, date_format));
    }
    Ok(())
}
