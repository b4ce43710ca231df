//! fracdrill CLI — fraction arithmetic practice from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::Directive;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "fracdrill", version, about = "Fraction arithmetic practice drill")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Practice interactively
    Play {
        /// Operations to practice (e.g. "add,sub" or "all")
        #[arg(long)]
        operations: Option<String>,

        /// Denominator range: 1-5, 1-10, 1-12, 1-15
        #[arg(long)]
        range: Option<String>,

        /// Question type: missing-result, missing-operand, both
        #[arg(long)]
        question_type: Option<String>,

        /// Stop after this many answers
        #[arg(long)]
        rounds: Option<u32>,

        /// Seed for reproducible problems
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Where to save the running tally
        #[arg(long)]
        progress_file: Option<PathBuf>,

        /// Ignore saved progress and start a new session
        #[arg(long)]
        fresh: bool,
    },

    /// Print problems with their answers
    Generate {
        /// Number of problems
        #[arg(long, default_value = "10")]
        count: usize,

        /// Seed for reproducible problems
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Operations to include (e.g. "add,sub" or "all")
        #[arg(long)]
        operations: Option<String>,

        /// Denominator range: 1-5, 1-10, 1-12, 1-15
        #[arg(long)]
        range: Option<String>,

        /// Question type: missing-result, missing-operand, both
        #[arg(long)]
        question_type: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show saved session progress
    Stats {
        /// Progress file to read
        #[arg(long)]
        progress_file: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter fracdrill.toml
    Init,
}

fn main() {
    let default_directive = match "fracdrill=info".parse::<Directive>() {
        Ok(directive) => directive,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_directive),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            operations,
            range,
            question_type,
            rounds,
            seed,
            config,
            progress_file,
            fresh,
        } => commands::play::execute(
            operations,
            range,
            question_type,
            rounds,
            seed,
            config,
            progress_file,
            fresh,
        ),
        Commands::Generate {
            count,
            seed,
            format,
            operations,
            range,
            question_type,
            config,
        } => commands::generate::execute(
            count,
            seed,
            format,
            operations,
            range,
            question_type,
            config,
        ),
        Commands::Stats {
            progress_file,
            config,
        } => commands::stats::execute(progress_file, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
