//! Starmart CLI - build a sales star schema from raw CSV extracts.
//!
//! # Commands
//!
//! ```bash
//! starmart run        # full pipeline: ingest, clean, model, query
//! starmart clean      # raw extracts -> cleaned silver layer
//! starmart model      # silver layer -> gold star schema
//! starmart query      # analytical queries over an existing gold layer
//! ```
//!
//! Stage directories default to `data/`, `silver/` and `gold/` and can
//! be overridden per command with `--raw`, `--silver` and `--gold`.

use clap::{Args, Parser, Subcommand};
use starmart::{pipeline, ConsoleReporter, StagePaths};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "starmart")]
#[command(about = "Build a sales star schema from raw CSV extracts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct StageArgs {
    /// Directory containing the raw CSV extracts
    #[arg(long, default_value = "data")]
    raw: PathBuf,

    /// Directory for the cleaned tables
    #[arg(long, default_value = "silver")]
    silver: PathBuf,

    /// Directory for the star-schema tables
    #[arg(long, default_value = "gold")]
    gold: PathBuf,
}

impl StageArgs {
    fn paths(&self) -> StagePaths {
        StagePaths::new(&self.raw, &self.silver, &self.gold)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: ingest, clean, model, query
    Run {
        #[command(flatten)]
        stage: StageArgs,
    },

    /// Clean the raw tables and persist the silver layer
    Clean {
        #[command(flatten)]
        stage: StageArgs,
    },

    /// Build the star schema from the silver layer
    Model {
        #[command(flatten)]
        stage: StageArgs,
    },

    /// Run the analytical queries over the gold layer
    Query {
        #[command(flatten)]
        stage: StageArgs,
    },
}

fn main() {
    let cli = Cli::parse();
    let reporter = ConsoleReporter;

    let result = match cli.command {
        Commands::Run { stage } => pipeline::run(&stage.paths(), &reporter).map(|_| ()),
        Commands::Clean { stage } => pipeline::run_clean(&stage.paths(), &reporter),
        Commands::Model { stage } => pipeline::run_model(&stage.paths(), &reporter),
        Commands::Query { stage } => pipeline::run_queries(&stage.paths(), &reporter).map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}
