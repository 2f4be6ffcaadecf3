//! CLI frontend for the Furrow agrarian era simulation.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "furrow",
    about = "Furrow: an agrarian era simulation with a multi-scale map view",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log simulation internals to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation headlessly and print the final metrics
    Simulate {
        /// Number of days to simulate
        #[arg(short, long, default_value = "365")]
        days: u64,

        /// RNG seed (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Session config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also print the event log
        #[arg(short, long)]
        events: bool,
    },

    /// List the historical eras and their policies
    Eras {
        /// Session config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the zoom levels
    Levels {
        /// Session config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the default configuration as TOML
    Config,

    /// Drive the frame scheduler without a window
    Frames {
        /// Number of frames to run
        #[arg(short = 'n', long, default_value = "60")]
        frames: u64,

        /// Seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f64,

        /// Start with fast-forward on
        #[arg(short, long)]
        fast: bool,

        /// Level id to move to before running
        #[arg(short, long)]
        level: Option<String>,

        /// Session config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Simulate {
            days,
            seed,
            config,
            json,
            events,
        } => commands::simulate::run(config.as_deref(), days, seed, json, events),
        Commands::Eras { config } => commands::eras::run(config.as_deref()),
        Commands::Levels { config } => commands::levels::run(config.as_deref()),
        Commands::Config => commands::config::run(),
        Commands::Frames {
            frames,
            dt,
            fast,
            level,
            config,
        } => commands::frames::run(config.as_deref(), frames, dt, fast, level.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
