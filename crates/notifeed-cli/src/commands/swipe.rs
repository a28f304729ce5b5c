//! Drives a simulated pan gesture through the widget.
//!
//! The recognizer runs on its own thread, the way a touch system would run
//! it, and the widget is pumped on a virtual 60 fps clock until every
//! animation has landed.

use std::thread;
use std::time::{Duration, Instant};

use clap::Args;
use notifeed_core::{Event, GestureMessage, Source};
use serde_json::json;
use tracing::debug;

use super::{parse_source, InputArgs};

const FRAME: Duration = Duration::from_millis(16);
const MAX_FRAMES: u32 = 10_000;

#[derive(Args)]
pub struct SwipeArgs {
    /// Card to swipe (telegram, tradingview)
    #[arg(long, short, value_parser = parse_source)]
    pub source: Source,
    /// Leftward travel in pixels
    #[arg(long, short)]
    pub distance: f64,
    /// Vertical travel in pixels over the same touch
    #[arg(long, default_value_t = 0.0)]
    pub vertical: f64,
    /// Number of move events the touch is split into
    #[arg(long, default_value_t = 8)]
    pub steps: u32,
    #[command(flatten)]
    pub input: InputArgs,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SwipeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut widget = args.input.mount()?;
    let mut pan = widget
        .recognizer(args.source)
        .ok_or_else(|| format!("{} has no card", args.source))?;

    let (distance, vertical, steps) = (args.distance, args.vertical, args.steps.max(1));
    let touch = thread::spawn(move || {
        pan.begin();
        for step in 1..=steps {
            let t = f64::from(step) / f64::from(steps);
            pan.update(-distance * t, vertical * t);
        }
        pan.end()
    });
    let release = touch.join().map_err(|_| "gesture thread panicked")?;

    let start = Instant::now();
    let mut at = start;
    let mut events = widget.pump(at);
    let mut frames = 0;
    while widget.is_animating(at) && frames < MAX_FRAMES {
        at += FRAME;
        frames += 1;
        events.extend(widget.pump(at));
    }
    debug!(frames, "animations settled");

    let deleted = events.iter().find_map(|e| match e {
        Event::SourceDeleted { removed, .. } => Some(*removed),
        _ => None,
    });

    if args.json {
        let out = json!({
            "release": release,
            "deleted": deleted,
            "events": events,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match (release, deleted) {
        (None, _) => println!("not recognized as a swipe, card unchanged"),
        (Some(_), Some(removed)) => println!("deleted {removed} {} notifications", args.source),
        (Some(GestureMessage::Release { offset, .. }), None) => {
            println!("released at {offset}px, card settled back")
        }
        (Some(_), None) => println!("card settled back"),
    }
    Ok(())
}
