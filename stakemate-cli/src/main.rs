mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stakemate")]
#[command(about = "Join wagered match sessions with on-chain stakes")]
#[command(version)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote the stake for a wager without joining anything
    Quote {
        /// Wager in native currency units (e.g. "2.5")
        wager: String,
    },
    /// Join a session by code against the configured services
    Join {
        /// Session code shared by the creator
        code: String,
    },
    /// Run the join flow against an in-process loopback peer
    Demo {
        /// Wager the simulated session carries
        #[arg(default_value = "2.0")]
        wager: f64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "stakemate={}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::load(cli.config)?;
    config.validate()?;

    let result = match cli.command {
        Commands::Quote { wager } => commands::quote(&config, &wager).await,
        Commands::Join { code } => commands::join(&config, &code).await,
        Commands::Demo { wager } => commands::demo(&config, wager).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
