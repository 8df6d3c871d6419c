// Copyright (c) 2024 Botho Foundation

//! Draw settlement: winner tallies per tier and the split of the prize pool.
//!
//! # Pool flow
//!
//! ```text
//! Total stake collected
//!        │
//!        ├──(19.53%)──> Tier 1 pool ──> shared by tier 1 winners
//!        ├──( 5.06%)──> Tier 2 pool
//!        ├──(10.89%)──> Tier 3 pool
//!        ├──( 4.72%)──> Tier 4 pool
//!        ├──(33.72%)──> Tier 5 pool
//!        ├──(18.87%)──> Tier 6 pool
//!        │
//!        └──────────────> Unclaimed: everything not paid to a tier with winners
//! ```
//!
//! A tier with no winner keeps its pool unclaimed. Pools are rounded half up
//! to the cent; when rounding would pay out more than the stake, the last
//! tiers are trimmed so the pools never exceed it.

use crate::error::DrawError;
use crate::money::Amount;
use crate::rank::{Rank, Tier, TIER_COUNT};
use crate::ticket::Ticket;

/// Basis points in a whole.
pub const BPS_SCALE: u32 = 10_000;

/// Share of the total stake paid into each tier pool, in basis points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayoutTable {
    tier_bps: [u32; TIER_COUNT],
}

impl PayoutTable {
    /// Reference shares: 19.53%, 5.06%, 10.89%, 4.72%, 33.72%, 18.87%.
    pub const STANDARD_BPS: [u32; TIER_COUNT] = [1953, 506, 1089, 472, 3372, 1887];

    /// Table from per-tier shares. Shares may total less than the whole
    /// stake, never more.
    pub fn new(tier_bps: [u32; TIER_COUNT]) -> Result<Self, DrawError> {
        let total_bps: u32 = tier_bps.iter().sum();
        if total_bps > BPS_SCALE {
            return Err(DrawError::PayoutTableOverAllocated { total_bps });
        }
        Ok(Self { tier_bps })
    }

    pub fn share_bps(&self, tier: Tier) -> u32 {
        self.tier_bps[tier.index()]
    }

    pub fn tier_bps(&self) -> &[u32; TIER_COUNT] {
        &self.tier_bps
    }

    /// Pool of one tier for a given total stake, before trimming.
    pub fn pool(&self, tier: Tier, total_stake: Amount) -> Amount {
        total_stake.share_bps(self.share_bps(tier))
    }

    /// Pools of every tier for a given total stake. The pools add up to at
    /// most `total_stake`.
    pub fn pools(&self, total_stake: Amount) -> [Amount; TIER_COUNT] {
        let mut remaining = total_stake;
        Tier::ALL.map(|tier| {
            let pool = self.pool(tier, total_stake).min(remaining);
            remaining = remaining.saturating_sub(pool);
            pool
        })
    }
}

impl Default for PayoutTable {
    fn default() -> Self {
        Self {
            tier_bps: Self::STANDARD_BPS,
        }
    }
}

/// Running totals of a draw.
///
/// Tallies are additive: partial tallies from independent batches of
/// tickets merge into the tally of the whole draw.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub tickets: u64,
    pub grids: u64,
    /// Sum of every grid's stake, in currency units.
    pub total_stake: u64,
    /// Winning grids credited to each tier. A complementary grid is counted
    /// in its simple tier and in the bonus tier.
    pub winners_by_tier: [u64; TIER_COUNT],
    /// Grids per rank, indexed like [`Rank::ALL`].
    pub grids_by_rank: [u64; Rank::ALL.len()],
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one scored grid.
    pub fn record_grid(&mut self, rank: Rank, stake: u64) {
        self.grids += 1;
        self.total_stake += stake;
        self.grids_by_rank[rank.index()] += 1;
        for tier in rank.tiers() {
            self.winners_by_tier[tier.index()] += 1;
        }
    }

    /// Count a ticket and every grid on it.
    pub fn record_ticket(&mut self, ticket: &Ticket<'_>) {
        self.tickets += 1;
        for grid in ticket.grids() {
            self.record_grid(grid.rank(), grid.stake());
        }
    }

    /// Combine two partial tallies.
    pub fn merge(mut self, other: Tally) -> Tally {
        self.tickets += other.tickets;
        self.grids += other.grids;
        self.total_stake += other.total_stake;
        for (mine, theirs) in self.winners_by_tier.iter_mut().zip(other.winners_by_tier) {
            *mine += theirs;
        }
        for (mine, theirs) in self.grids_by_rank.iter_mut().zip(other.grids_by_rank) {
            *mine += theirs;
        }
        self
    }

    pub fn winners(&self, tier: Tier) -> u64 {
        self.winners_by_tier[tier.index()]
    }

    /// Grids that earned `rank`.
    pub fn grids_with_rank(&self, rank: Rank) -> u64 {
        self.grids_by_rank[rank.index()]
    }

    /// Grids that won anything.
    pub fn winning_grids(&self) -> u64 {
        self.grids - self.grids_with_rank(Rank::NoPrize)
    }

    pub fn total_stake_amount(&self) -> Amount {
        Amount::from_units(self.total_stake)
    }
}

/// Payout of one tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierPayout {
    pub tier: Tier,
    pub winners: u64,
    pub pool: Amount,
    /// Amount paid to each winning grid; `None` when the tier has no winner.
    pub per_grid: Option<Amount>,
}

/// Settled prize pools of a draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub total_stake: Amount,
    pub tiers: [TierPayout; TIER_COUNT],
    /// Stake not paid out to any tier with winners.
    pub unclaimed: Amount,
}

impl Settlement {
    /// Split the pools of a finished tally.
    pub fn compute(tally: &Tally, table: &PayoutTable) -> Settlement {
        let total_stake = tally.total_stake_amount();
        let pools = table.pools(total_stake);

        let tiers = Tier::ALL.map(|tier| {
            let winners = tally.winners(tier);
            let pool = pools[tier.index()];
            TierPayout {
                tier,
                winners,
                pool,
                per_grid: pool.split(winners),
            }
        });

        let claimed: Amount = tiers
            .iter()
            .filter(|payout| payout.winners > 0)
            .map(|payout| payout.pool)
            .sum();

        Settlement {
            total_stake,
            tiers,
            unclaimed: total_stake.saturating_sub(claimed),
        }
    }

    pub fn tier(&self, tier: Tier) -> &TierPayout {
        &self.tiers[tier.index()]
    }

    /// Total paid into tiers that have at least one winner.
    pub fn claimed(&self) -> Amount {
        self.total_stake.saturating_sub(self.unclaimed)
    }
}
