// Copyright (c) 2024 Botho Foundation

//! Lottery draw simulator CLI
//!
//! Generates tickets against a random winning grid and reports prize pools
//! and payouts per tier.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loto::commands::{self, run::RunOptions};
use loto::config;
use loto::date::DrawDate;

#[derive(Parser)]
#[command(name = "loto")]
#[command(about = "Lottery draw simulator - play tickets and settle prize pools")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Path to config file (default: ~/.loto/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Play a draw
    Run {
        /// Number of tickets to generate (1 to 1000000)
        #[arg(short, long)]
        tickets: Option<u64>,

        /// Draw date (dd-mm-yyyy or dd-mm-yy)
        #[arg(long)]
        date: Option<DrawDate>,

        /// Print the winning grid and every ticket
        #[arg(short, long, conflicts_with = "quiet")]
        verbose: bool,

        /// Only print the final report
        #[arg(short, long)]
        quiet: bool,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Worker threads (0 = one per core)
        #[arg(long)]
        threads: Option<usize>,

        /// Grids on every ticket (1 to 6, random when unset)
        #[arg(long)]
        grids: Option<u8>,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };

    match cli.command {
        Commands::Init { force } => commands::init::run(&config_path, force),
        Commands::Run {
            tickets,
            date,
            verbose,
            quiet,
            seed,
            threads,
            grids,
            no_progress,
        } => {
            let verbose = match (verbose, quiet) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            commands::run::run(
                &config_path,
                RunOptions {
                    tickets,
                    date,
                    verbose,
                    seed,
                    threads,
                    grids,
                    no_progress,
                },
            )
        }
    }
}
