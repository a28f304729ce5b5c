use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "notifeed", version, about = "Notification summary cards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one summary card per source
    Cards(commands::cards::CardsArgs),
    /// List every notification of one source, newest first
    Detail(commands::detail::DetailArgs),
    /// Simulate a swipe on a card
    Swipe(commands::swipe::SwipeArgs),
    /// Tap the delete button of a card
    Delete(commands::delete::DeleteArgs),
    /// Write the sample notification list
    Seed(commands::seed::SeedArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("NOTIFEED_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Cards(args) => commands::cards::run(args),
        Commands::Detail(args) => commands::detail::run(args),
        Commands::Swipe(args) => commands::swipe::run(args),
        Commands::Delete(args) => commands::delete::run(args),
        Commands::Seed(args) => commands::seed::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions(args) => commands::completions::run(args, &mut Cli::command()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
