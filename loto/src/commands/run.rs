// Copyright (c) 2024 Botho Foundation

use anyhow::{bail, Context, Result};
use bth_loto_draw::{
    simulation::check_ticket_count, DrawConfig, DrawOutcome, Simulation, TicketPlan, MAX_GRIDS,
    MIN_GRIDS,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::commands::{prompt_draw_date, prompt_ticket_count, prompt_yes_no};
use crate::config::Config;
use crate::date::DrawDate;
use crate::report;

/// Options of `loto run` that override the config file.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub tickets: Option<u64>,
    pub date: Option<DrawDate>,
    /// `Some(true)` for `--verbose`, `Some(false)` for `--quiet`
    pub verbose: Option<bool>,
    pub seed: Option<u64>,
    pub threads: Option<usize>,
    pub grids: Option<u8>,
    pub no_progress: bool,
}

/// Everything a draw needs once flags, config and prompts are combined.
#[derive(Debug, Clone)]
pub struct DrawSettings {
    pub draw: DrawConfig,
    pub date: DrawDate,
    pub verbose: bool,
    pub threads: usize,
}

/// Run the run command
pub fn run(config_path: &Path, options: RunOptions) -> Result<()> {
    let config = Config::load_or_default(config_path)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    println!("========== LOTO ==========");
    let settings = resolve_settings(&config, &options, &mut input, &mut stdout)?;

    let mut out = BufWriter::new(stdout.lock());
    let outcome = execute(&settings, !options.no_progress, &mut out)?;
    report::write_summary(&mut out, &settings.date, &outcome)?;
    out.flush()?;

    Ok(())
}

/// Merge flags over config values, prompting for whatever is still missing.
pub fn resolve_settings<R: BufRead, W: Write>(
    config: &Config,
    options: &RunOptions,
    input: &mut R,
    output: &mut W,
) -> Result<DrawSettings> {
    let tickets = match options.tickets.or(config.draw.tickets) {
        Some(tickets) => {
            check_ticket_count(tickets)?;
            tickets
        }
        None => prompt_ticket_count(input, output)?,
    };

    let date = match options.date.clone().or_else(|| config.draw.date.clone()) {
        Some(date) => date,
        None => prompt_draw_date(input, output)?,
    };

    let verbose = match options.verbose.or(config.draw.verbose) {
        Some(verbose) => verbose,
        None => prompt_yes_no(input, output, "Verbose mode")?,
    };

    let plan = match options.grids.or(config.draw.grids_per_ticket) {
        Some(grids) if (MIN_GRIDS..=MAX_GRIDS).contains(&grids) => TicketPlan::fixed(grids),
        Some(grids) => bail!(
            "Grids per ticket must be between {} and {}, got {}",
            MIN_GRIDS,
            MAX_GRIDS,
            grids
        ),
        None => TicketPlan::random(),
    };

    let draw = DrawConfig {
        tickets,
        plan,
        payout: config.payout.table()?,
        seed: options.seed.or(config.draw.seed),
        chunk_size: config.draw.chunk_size,
    };

    Ok(DrawSettings {
        draw,
        date,
        verbose,
        threads: options.threads.unwrap_or(config.draw.threads),
    })
}

/// Draw the winning grid and play every ticket, printing tickets in
/// verbose mode.
pub fn execute<W: Write>(settings: &DrawSettings, progress: bool, out: &mut W) -> Result<DrawOutcome> {
    let simulation =
        Simulation::new(settings.draw.clone()).context("Invalid draw configuration")?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.threads)
        .build()
        .context("Failed to start worker threads")?;
    debug!(threads = pool.current_num_threads(), "Worker pool ready");

    info!(
        date = %settings.date,
        tickets = settings.draw.tickets,
        seed = simulation.seed(),
        "Running draw"
    );

    let outcome = if settings.verbose {
        report::write_winning_grid(&mut *out, simulation.winning_grid())?;

        let mut write_error = None;
        let outcome = simulation.run_sequential(|ticket| {
            if write_error.is_none() {
                write_error = report::write_ticket(&mut *out, ticket).err();
            }
        })?;
        if let Some(e) = write_error {
            return Err(e).context("Failed to write ticket report");
        }
        outcome
    } else if progress {
        let bar = ProgressBar::new(settings.draw.tickets);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} tickets ({per_sec})",
            )?
            .progress_chars("##-"),
        );
        let outcome = pool.install(|| simulation.run_with_progress(|done| bar.inc(done)))?;
        bar.finish_and_clear();
        outcome
    } else {
        pool.install(|| simulation.run())?
    };

    Ok(outcome)
}
