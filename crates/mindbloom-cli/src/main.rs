use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "mindbloom", version, about = "MindBloom CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a mood check-in
    Checkin(commands::checkin::CheckinArgs),
    /// List recorded check-ins
    Entries {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Streak, weekly average and today's affirmation
    Stats,
    /// Print the garden layout as JSON
    Garden,
    /// Guided box-breathing session
    Breathe(commands::breathe::BreatheArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Log to stderr so stdout stays machine-readable.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Checkin(args) => commands::checkin::run(args),
        Commands::Entries { json } => commands::entries::run(json),
        Commands::Stats => commands::stats::run(),
        Commands::Garden => commands::garden::run(),
        Commands::Breathe(args) => commands::breathe::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
