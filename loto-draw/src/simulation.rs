// Copyright (c) 2024 Botho Foundation

//! Draw orchestration.
//!
//! A [`Simulation`] owns the winning grid and the ticket id sequence. Ticket
//! ids are reserved up front and cut into chunks; each chunk is generated
//! from its own ChaCha stream and folded into a partial [`Tally`]. Partial
//! tallies are merged in a single reduction, so the outcome depends only on
//! the seed and the chunk size, never on thread count.

use std::ops::Range;
use std::time::{Duration, Instant};

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::DrawError;
use crate::grid::{Grid, GridSizing};
use crate::settlement::{PayoutTable, Settlement, Tally};
use crate::ticket::{Ticket, TicketId, TicketPlan, TicketSequence};

/// Fewest tickets in a draw.
pub const MIN_TICKETS: u64 = 1;

/// Most tickets in a draw.
pub const MAX_TICKETS: u64 = 1_000_000;

/// Tickets generated per work unit.
pub const DEFAULT_CHUNK_SIZE: u64 = 4096;

/// ChaCha stream used for the winning grid. Ticket chunks use their first
/// ticket id as stream, and ids start at 1.
const WINNING_STREAM: u64 = 0;

/// Parameters of one draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawConfig {
    /// Number of tickets to generate.
    pub tickets: u64,

    /// How each ticket is generated.
    pub plan: TicketPlan,

    /// Share of the stake paid into each tier.
    pub payout: PayoutTable,

    /// Seed of the run. A random seed is picked when unset.
    pub seed: Option<u64>,

    /// Tickets per work unit (0 is treated as 1).
    pub chunk_size: u64,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            tickets: 1000,
            plan: TicketPlan::default(),
            payout: PayoutTable::default(),
            seed: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Validate a requested ticket count.
pub fn check_ticket_count(tickets: u64) -> Result<(), DrawError> {
    if (MIN_TICKETS..=MAX_TICKETS).contains(&tickets) {
        Ok(())
    } else {
        Err(DrawError::TicketCountOutOfRange {
            requested: tickets,
            min: MIN_TICKETS,
            max: MAX_TICKETS,
        })
    }
}

/// Result of a finished draw.
#[derive(Clone, Debug)]
pub struct DrawOutcome {
    pub seed: u64,
    pub first_ticket: TicketId,
    pub last_ticket: TicketId,
    pub tally: Tally,
    pub settlement: Settlement,
    /// Wall-clock time spent generating and settling tickets.
    pub elapsed: Duration,
}

/// One lottery draw: a winning grid and the tickets played against it.
#[derive(Debug)]
pub struct Simulation {
    config: DrawConfig,
    seed: u64,
    winning: Grid<'static>,
    sequence: TicketSequence,
}

impl Simulation {
    /// Validate the configuration and draw the winning grid.
    pub fn new(config: DrawConfig) -> Result<Self, DrawError> {
        check_ticket_count(config.tickets)?;

        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(WINNING_STREAM);
        let winning = Grid::draw(GridSizing::MINIMUM, &mut rng)?;

        debug!(
            seed,
            main = ?winning.main_numbers().as_slice(),
            bonus = ?winning.bonus_numbers().as_slice(),
            "Winning grid drawn"
        );

        Ok(Self {
            config,
            seed,
            winning,
            sequence: TicketSequence::new(),
        })
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The grid every ticket is scored against.
    pub fn winning_grid(&self) -> &Grid<'static> {
        &self.winning
    }

    /// Run the draw across the rayon pool.
    pub fn run(&self) -> Result<DrawOutcome, DrawError> {
        self.run_with_progress(|_| {})
    }

    /// Run the draw across the rayon pool, calling `progress` with the
    /// number of tickets in each finished chunk.
    pub fn run_with_progress<F>(&self, progress: F) -> Result<DrawOutcome, DrawError>
    where
        F: Fn(u64) + Sync,
    {
        let started = Instant::now();
        let ids = self.sequence.reserve(self.config.tickets);
        info!(
            tickets = self.config.tickets,
            threads = rayon::current_num_threads(),
            seed = self.seed,
            "Starting draw"
        );

        let tally = self
            .chunks(ids.clone())
            .into_par_iter()
            .map(|chunk| -> Result<Tally, DrawError> {
                let len = chunk.end - chunk.start;
                let mut tally = Tally::new();
                self.generate_chunk(chunk, |ticket| tally.record_ticket(ticket))?;
                progress(len);
                Ok(tally)
            })
            .try_reduce(Tally::new, |a, b| Ok(a.merge(b)))?;

        Ok(self.finish(ids, tally, started))
    }

    /// Run the draw on the calling thread in ticket id order, handing each
    /// ticket to `on_ticket` once it is scored.
    pub fn run_sequential<F>(&self, mut on_ticket: F) -> Result<DrawOutcome, DrawError>
    where
        F: FnMut(&Ticket<'_>),
    {
        let started = Instant::now();
        let ids = self.sequence.reserve(self.config.tickets);
        info!(
            tickets = self.config.tickets,
            seed = self.seed,
            "Starting sequential draw"
        );

        let mut tally = Tally::new();
        for chunk in self.chunks(ids.clone()) {
            self.generate_chunk(chunk, |ticket| {
                tally.record_ticket(ticket);
                on_ticket(ticket);
            })?;
        }

        Ok(self.finish(ids, tally, started))
    }

    fn chunks(&self, ids: Range<u64>) -> Vec<Range<u64>> {
        let size = self.config.chunk_size.max(1);
        (ids.start..ids.end)
            .step_by(size as usize)
            .map(|start| start..(start + size).min(ids.end))
            .collect()
    }

    fn generate_chunk<F>(&self, ids: Range<u64>, mut visit: F) -> Result<(), DrawError>
    where
        F: FnMut(&Ticket<'_>),
    {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(ids.start);

        for id in ids {
            let ticket = Ticket::generate(TicketId::new(id), &self.config.plan, &self.winning, &mut rng)?;
            visit(&ticket);
        }
        Ok(())
    }

    fn finish(&self, ids: Range<u64>, tally: Tally, started: Instant) -> DrawOutcome {
        let settlement = Settlement::compute(&tally, &self.config.payout);
        let elapsed = started.elapsed();

        info!(
            tickets = tally.tickets,
            grids = tally.grids,
            winning_grids = tally.winning_grids(),
            total_stake = %settlement.total_stake,
            unclaimed = %settlement.unclaimed,
            elapsed_ms = elapsed.as_millis() as u64,
            "Draw settled"
        );

        DrawOutcome {
            seed: self.seed,
            first_ticket: TicketId::new(ids.start),
            last_ticket: TicketId::new(ids.end.saturating_sub(1)),
            tally,
            settlement,
            elapsed,
        }
    }
}
