// Copyright (c) 2024 Botho Foundation

//! Property-based tests for grid generation, scoring and settlement.
//!
//! These check the draw invariants for arbitrary seeds and inputs rather than
//! a handful of fixed grids.

use bth_loto_draw::{
    binomial, Amount, Grid, GridSizing, PayoutTable, Rank, Settlement, Tally, Tier, BASE_STAKE,
    TIER_COUNT,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn arb_sizing() -> impl Strategy<Value = GridSizing> {
    prop_oneof![
        Just(GridSizing::Random),
        (5u8..=9, 1u8..=10).prop_map(|(main, bonus)| GridSizing::Fixed { main, bonus }),
    ]
}

fn arb_rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

/// Valid payout tables, from near-empty to fully allocated.
fn arb_payout_table() -> impl Strategy<Value = PayoutTable> {
    prop::array::uniform6(1u32..1000).prop_map(|weights| {
        let total: u32 = weights.iter().sum();
        PayoutTable::new(weights.map(|w| w * 10_000 / total)).unwrap()
    })
}

fn tally_of(ranks: &[Rank]) -> Tally {
    let mut tally = Tally::new();
    for &rank in ranks {
        tally.record_grid(rank, BASE_STAKE);
    }
    tally
}

// ============================================================================
// Grid Property Tests
// ============================================================================

proptest! {
    /// Property: drawn numbers are unique and inside their pools.
    #[test]
    fn prop_drawn_numbers_unique_and_in_range(seed in any::<u64>(), sizing in arb_sizing()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = Grid::draw(sizing, &mut rng).unwrap();

        let main = grid.main_numbers().as_slice();
        prop_assert!(main.iter().all(|n| (1..=49).contains(n)));
        let mut sorted: Vec<u8> = grid.main_numbers().sorted().collect();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), main.len());

        let bonus = grid.bonus_numbers().as_slice();
        prop_assert!(bonus.iter().all(|n| (1..=10).contains(n)));
        let mut sorted: Vec<u8> = grid.bonus_numbers().sorted().collect();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), bonus.len());
    }

    /// Property: the stake is always bonus × C(main, 5) × base stake.
    #[test]
    fn prop_stake_formula(seed in any::<u64>(), sizing in arb_sizing()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = Grid::draw(sizing, &mut rng).unwrap();

        let main = grid.main_numbers().len() as u8;
        let bonus = grid.bonus_numbers().len() as u64;
        prop_assert_eq!(Some(grid.stake()), binomial(main, 5).map(|c| bonus * c * BASE_STAKE));
    }

    /// Property: random sizing honours the bonus bound of its main count.
    #[test]
    fn prop_random_sizing_bounds(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (main, bonus) = GridSizing::Random.resolve(&mut rng).unwrap();

        let bound = match main {
            9 => 1,
            8 => 3,
            7 => 8,
            _ => 10,
        };
        prop_assert!((5..=9).contains(&main));
        prop_assert!((1..=bound).contains(&bonus));
    }

    /// Property: scoring twice against the same winning grid changes nothing,
    /// and the rank always follows from the match counts.
    #[test]
    fn prop_scoring_idempotent(seed in any::<u64>(), sizing in arb_sizing()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let winning = Grid::draw(GridSizing::MINIMUM, &mut rng).unwrap();
        let mut grid = Grid::draw(sizing, &mut rng).unwrap();

        let first = grid.attach_winning(&winning);
        let score = grid.score();
        let second = grid.attach_winning(&winning);

        prop_assert_eq!(first, second);
        prop_assert_eq!(score, grid.score());
        prop_assert_eq!(grid.rank(), Rank::from_matches(grid.matched_main(), grid.matched_bonus()));
        prop_assert!(grid.matched_main() as usize <= grid.main_numbers().len());
        prop_assert!(grid.matched_bonus() as usize <= grid.bonus_numbers().len());
    }
}

// ============================================================================
// Settlement Property Tests
// ============================================================================

proptest! {
    /// Property: simple tiers never count more winners than grids, and each
    /// complementary grid is counted exactly twice.
    #[test]
    fn prop_tier_counts(ranks in prop::collection::vec(arb_rank(), 0..200)) {
        let tally = tally_of(&ranks);

        let simple: u64 = tally.winners_by_tier[..TIER_COUNT - 1].iter().sum();
        prop_assert!(simple <= tally.grids);

        let credits: u64 = tally.winners_by_tier.iter().sum();
        let expected: u64 = ranks.iter().map(|r| r.tiers().count() as u64).sum();
        prop_assert_eq!(credits, expected);

        let complementary = ranks.iter().filter(|r| r.is_complementary()).count() as u64;
        let bonus_only = ranks.iter().filter(|r| **r == Rank::Bonus).count() as u64;
        prop_assert_eq!(tally.winners(Tier::BONUS), complementary + bonus_only);
    }

    /// Property: merging partial tallies gives the tally of the whole.
    #[test]
    fn prop_merge_matches_whole(
        ranks in prop::collection::vec(arb_rank(), 0..200),
        split in any::<prop::sample::Index>(),
    ) {
        let at = split.index(ranks.len() + 1);
        let (left, right) = ranks.split_at(at);

        prop_assert_eq!(tally_of(left).merge(tally_of(right)), tally_of(&ranks));
        prop_assert_eq!(tally_of(right).merge(tally_of(left)), tally_of(&ranks));
    }

    /// Property: claimed pools and the unclaimed remainder add up to the stake.
    #[test]
    fn prop_settlement_conserves_stake(
        ranks in prop::collection::vec(arb_rank(), 1..200),
        extra_stake in 0u64..1_000_000,
        table in prop_oneof![Just(PayoutTable::default()), arb_payout_table()],
    ) {
        let mut tally = tally_of(&ranks);
        tally.total_stake += extra_stake;
        let settlement = Settlement::compute(&tally, &table);

        let pools: Amount = settlement.tiers.iter().map(|t| t.pool).sum();
        prop_assert!(pools <= settlement.total_stake);

        let claimed: Amount = settlement
            .tiers
            .iter()
            .filter(|t| t.winners > 0)
            .map(|t| t.pool)
            .sum();
        prop_assert_eq!(claimed + settlement.unclaimed, settlement.total_stake);

        for payout in &settlement.tiers {
            prop_assert_eq!(payout.per_grid.is_some(), payout.winners > 0);
        }
    }
}
