// Copyright (c) 2024 Botho Foundation

//! Tickets: bundles of one to six grids played against the same winning grid.

use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

use crate::error::DrawError;
use crate::grid::{Grid, GridSizing};

/// Fewest grids on a ticket.
pub const MIN_GRIDS: u8 = 1;

/// Most grids on a ticket.
pub const MAX_GRIDS: u8 = 6;

const GRID_CAPACITY: usize = MAX_GRIDS as usize;

/// Identifier of a ticket within a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TicketId(u64);

impl TicketId {
    /// Placeholder for a ticket that was never given an id.
    pub const UNASSIGNED: TicketId = TicketId(0);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues ticket ids in strictly increasing order, starting at 1.
///
/// The counter is atomic so a caller can hand out whole blocks of ids before
/// dispatching work to other threads.
#[derive(Debug)]
pub struct TicketSequence {
    next: AtomicU64,
}

impl TicketSequence {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Sequence whose first id is `first` (0 is bumped to 1).
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first.max(1)),
        }
    }

    /// Take the next id.
    pub fn next_id(&self) -> TicketId {
        TicketId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Take `count` consecutive ids at once.
    pub fn reserve(&self, count: u64) -> Range<u64> {
        let first = self.next.fetch_add(count, Ordering::Relaxed);
        first..first + count
    }
}

impl Default for TicketSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// How many grids a ticket holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridCount {
    Fixed(u8),
    /// Uniform in `MIN_GRIDS..=MAX_GRIDS`.
    Random,
}

impl GridCount {
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Result<u8, DrawError> {
        let count = match self {
            GridCount::Fixed(count) => count,
            GridCount::Random => rng.gen_range(MIN_GRIDS..=MAX_GRIDS),
        };
        check_grid_count(count)?;
        Ok(count)
    }
}

fn check_grid_count(count: u8) -> Result<(), DrawError> {
    if (MIN_GRIDS..=MAX_GRIDS).contains(&count) {
        Ok(())
    } else {
        Err(DrawError::GridCountOutOfRange {
            requested: count,
            min: MIN_GRIDS,
            max: MAX_GRIDS,
        })
    }
}

/// Recipe for generating a ticket: grid count plus per-grid sizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TicketPlan {
    pub grid_count: GridCount,
    pub sizing: GridSizing,
}

impl TicketPlan {
    pub const fn new(grid_count: GridCount, sizing: GridSizing) -> Self {
        Self { grid_count, sizing }
    }

    /// Random grid count, random sizing for every grid.
    pub const fn random() -> Self {
        Self::new(GridCount::Random, GridSizing::Random)
    }

    /// `grids` minimum-size grids.
    pub const fn fixed(grids: u8) -> Self {
        Self::new(GridCount::Fixed(grids), GridSizing::MINIMUM)
    }
}

impl Default for TicketPlan {
    fn default() -> Self {
        Self::random()
    }
}

/// A played ticket. All grids are scored against the same winning grid.
#[derive(Clone, Debug)]
pub struct Ticket<'w> {
    id: TicketId,
    grids: heapless::Vec<Grid<'w>, GRID_CAPACITY>,
    total_stake: u64,
}

impl<'w> Ticket<'w> {
    /// Generate a ticket from a plan and score every grid.
    pub fn generate<R: Rng + ?Sized>(
        id: TicketId,
        plan: &TicketPlan,
        winning: &'w Grid<'w>,
        rng: &mut R,
    ) -> Result<Self, DrawError> {
        let count = plan.grid_count.resolve(rng)?;

        let mut ticket = Self::empty(id);
        for _ in 0..count {
            let grid = Grid::draw(plan.sizing, rng)?;
            ticket.push(grid, winning)?;
        }
        Ok(ticket)
    }

    /// Build a ticket from already drawn grids, scoring each against
    /// `winning`.
    pub fn from_grids<I>(id: TicketId, grids: I, winning: &'w Grid<'w>) -> Result<Self, DrawError>
    where
        I: IntoIterator<Item = Grid<'w>>,
    {
        let grids: Vec<Grid<'w>> = grids.into_iter().collect();
        check_grid_count(u8::try_from(grids.len()).unwrap_or(u8::MAX))?;

        let mut ticket = Self::empty(id);
        for grid in grids {
            ticket.push(grid, winning)?;
        }
        Ok(ticket)
    }

    fn empty(id: TicketId) -> Self {
        Self {
            id,
            grids: heapless::Vec::new(),
            total_stake: 0,
        }
    }

    fn push(&mut self, mut grid: Grid<'w>, winning: &'w Grid<'w>) -> Result<(), DrawError> {
        grid.attach_winning(winning);
        let stake = grid.stake();
        let requested = u8::try_from(self.grids.len() + 1).unwrap_or(u8::MAX);
        self.grids
            .push(grid)
            .map_err(|_| DrawError::GridCountOutOfRange {
                requested,
                min: MIN_GRIDS,
                max: MAX_GRIDS,
            })?;
        self.total_stake += stake;
        Ok(())
    }

    pub fn id(&self) -> TicketId {
        self.id
    }

    pub fn grids(&self) -> &[Grid<'w>] {
        &self.grids
    }

    pub fn grid_count(&self) -> usize {
        self.grids.len()
    }

    /// Sum of the stakes of every grid.
    pub fn total_stake(&self) -> u64 {
        self.total_stake
    }
}
