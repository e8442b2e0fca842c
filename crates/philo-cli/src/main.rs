//! Terminal frontend for PhilosoApp.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use philo_core::AppConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(
    name = "philo",
    about = "PhilosoApp: philosophy lessons as short games",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding the saved session
    #[arg(long, global = true, default_value = ".philosoapp")]
    data_dir: PathBuf,

    /// RNG seed for reproducible content picks
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List lesson units and their objectives
    Units,

    /// Select the active unit
    Unit {
        /// Unit identifier: I, II or III
        unit: String,
    },

    /// Show score, completed activities and achievements
    Stats,

    /// List completed activities
    Portfolio,

    /// Write the portfolio to a JSON file
    Export {
        /// Output file (default: philosoapp_portfolio.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Merge an exported portfolio into the saved session
    Import {
        /// File produced by `philo export`
        file: PathBuf,
    },

    /// Play an activity on the selected unit
    Play {
        /// reading, dialogue, dilemma, story, flashcards or quiz
        module: String,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = AppConfig::default().with_data_dir(cli.data_dir);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let result = match cli.command {
        Commands::Units => commands::units::run(),
        Commands::Unit { unit } => commands::unit::run(&config, &unit),
        Commands::Stats => commands::stats::run(&config),
        Commands::Portfolio => commands::portfolio::run(&config),
        Commands::Export { output, stdout } => {
            commands::export::run(&config, output.as_deref(), stdout)
        }
        Commands::Import { file } => commands::import::run(&config, &file),
        Commands::Play { module } => commands::play::run(&config, &module),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
