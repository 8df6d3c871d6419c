// Copyright (c) 2024 Botho Foundation

//! Integration tests for bth-loto-draw
//!
//! These tests drive a draw end to end:
//! - Ticket construction against a shared winning grid
//! - Tallying and settling hand-built tickets
//! - Full seeded simulations
//! - Error propagation from construction failures

use bth_loto_draw::{
    Amount, DrawConfig, DrawError, Grid, GridCount, GridSizing, PayoutTable, Rank, Settlement,
    Simulation, Tally, Ticket, TicketId, TicketPlan, TicketSequence, Tier,
};

fn winning() -> Grid<'static> {
    Grid::from_numbers(&[3, 14, 15, 26, 48], &[7]).unwrap()
}

// ============================================================================
// Settlement Tests
// ============================================================================

mod settlement {
    use super::*;

    #[test]
    fn test_exact_main_match_settles_in_second_tier() {
        let winning = winning();
        let played = Grid::from_numbers(&[48, 26, 15, 14, 3], &[2]).unwrap();
        let ticket = Ticket::from_grids(TicketId::new(1), [played], &winning).unwrap();
        assert_eq!(ticket.grids()[0].rank(), Rank::Second);

        let mut tally = Tally::new();
        tally.record_ticket(&ticket);
        assert_eq!(tally.winners_by_tier, [0, 1, 0, 0, 0, 0]);

        let settlement = Settlement::compute(&tally, &PayoutTable::default());
        // 5.06% of 2.00 = 0.1012 -> 0.10
        let second = settlement.tier(Tier::new(2).unwrap());
        assert_eq!(second.pool, Amount::from_cents(10));
        assert_eq!(second.per_grid, Some(Amount::from_cents(10)));
        assert_eq!(settlement.unclaimed, Amount::from_cents(190));
    }

    #[test]
    fn test_multi_ticket_settlement() {
        let winning = winning();
        let sequence = TicketSequence::new();

        let tickets = vec![
            Ticket::from_grids(
                sequence.next_id(),
                [
                    // 5 + bonus: first tier
                    Grid::from_numbers(&[3, 14, 15, 26, 48], &[7]).unwrap(),
                    // 4 + bonus: third tier and bonus tier
                    Grid::from_numbers(&[3, 14, 15, 26, 1], &[7]).unwrap(),
                ],
                &winning,
            )
            .unwrap(),
            Ticket::from_grids(
                sequence.next_id(),
                [
                    // bonus only
                    Grid::from_numbers(&[1, 2, 4, 5, 6], &[7]).unwrap(),
                    // nothing
                    Grid::from_numbers(&[1, 2, 4, 5, 6], &[1]).unwrap(),
                ],
                &winning,
            )
            .unwrap(),
        ];

        let tally = tickets.iter().fold(Tally::new(), |mut tally, ticket| {
            tally.record_ticket(ticket);
            tally
        });
        assert_eq!(tally.tickets, 2);
        assert_eq!(tally.grids, 4);
        assert_eq!(tally.total_stake, 8);
        assert_eq!(tally.winners_by_tier, [1, 0, 1, 0, 0, 2]);
        assert_eq!(tally.grids_with_rank(Rank::ThirdWithBonus), 1);

        let settlement = Settlement::compute(&tally, &PayoutTable::default());
        // 18.87% of 8.00 = 1.5096 -> 1.51, split between two grids.
        let bonus = settlement.tier(Tier::BONUS);
        assert_eq!(bonus.pool, Amount::from_cents(151));
        assert_eq!(bonus.per_grid, Some(Amount::from_cents(76)));

        let claimed = settlement.tier(Tier::FIRST).pool
            + settlement.tier(Tier::new(3).unwrap()).pool
            + bonus.pool;
        assert_eq!(settlement.unclaimed, Amount::from_units(8).saturating_sub(claimed));
    }

    #[test]
    fn test_custom_payout_table() {
        let table = PayoutTable::new([10_000, 0, 0, 0, 0, 0]).unwrap();
        let mut tally = Tally::new();
        tally.record_grid(Rank::First, 2);
        tally.record_grid(Rank::First, 2);
        tally.record_grid(Rank::First, 2);

        let settlement = Settlement::compute(&tally, &table);
        assert_eq!(settlement.tier(Tier::FIRST).per_grid, Some(Amount::from_units(2)));
        assert_eq!(settlement.unclaimed, Amount::ZERO);
    }
}

// ============================================================================
// Simulation Tests
// ============================================================================

mod simulation {
    use super::*;

    #[test]
    fn test_seeded_draws_are_reproducible() {
        let config = DrawConfig {
            tickets: 2_500,
            seed: Some(2024),
            ..DrawConfig::default()
        };
        let a = Simulation::new(config.clone()).unwrap();
        let b = Simulation::new(config).unwrap();

        assert_eq!(
            a.winning_grid().main_numbers(),
            b.winning_grid().main_numbers()
        );
        assert_eq!(a.run().unwrap().tally, b.run().unwrap().tally);
    }

    #[test]
    fn test_chunk_size_does_not_change_ticket_count() {
        for chunk_size in [0, 1, 7, 10_000] {
            let config = DrawConfig {
                tickets: 50,
                seed: Some(1),
                chunk_size,
                ..DrawConfig::default()
            };
            let outcome = Simulation::new(config).unwrap().run().unwrap();
            assert_eq!(outcome.tally.tickets, 50);
            assert!(outcome.tally.grids >= 50);
            assert!(outcome.tally.grids <= 300);
        }
    }

    #[test]
    fn test_verbose_observer_sees_scored_tickets() {
        let config = DrawConfig {
            tickets: 25,
            seed: Some(8),
            ..DrawConfig::default()
        };
        let simulation = Simulation::new(config).unwrap();
        let winning_main = simulation.winning_grid().main_numbers().clone();

        let mut stake = 0;
        let outcome = simulation
            .run_sequential(|ticket| {
                stake += ticket.total_stake();
                for grid in ticket.grids() {
                    let attached = grid.winning_grid().unwrap();
                    assert_eq!(attached.main_numbers(), &winning_main);
                }
            })
            .unwrap();
        assert_eq!(outcome.tally.total_stake, stake);
    }

    #[test]
    fn test_minimum_plan_draw() {
        let config = DrawConfig {
            tickets: 10,
            plan: TicketPlan::new(GridCount::Fixed(6), GridSizing::MINIMUM),
            seed: Some(99),
            ..DrawConfig::default()
        };
        let outcome = Simulation::new(config).unwrap().run().unwrap();
        assert_eq!(outcome.tally.grids, 60);
        assert_eq!(outcome.settlement.total_stake, Amount::from_units(120));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn test_boundary_errors() {
        let mut rng = rand::thread_rng();
        assert!(matches!(
            Grid::draw(GridSizing::Fixed { main: 10, bonus: 1 }, &mut rng),
            Err(DrawError::MainCountOutOfRange { requested: 10, .. })
        ));
        assert!(matches!(
            Grid::draw(GridSizing::Fixed { main: 5, bonus: 0 }, &mut rng),
            Err(DrawError::BonusCountOutOfRange { requested: 0, .. })
        ));

        let winning = winning();
        assert!(matches!(
            Ticket::generate(TicketId::new(1), &TicketPlan::fixed(7), &winning, &mut rng),
            Err(DrawError::GridCountOutOfRange { requested: 7, .. })
        ));
    }

    #[test]
    fn test_unscored_grid_reports_missing_reference() {
        let mut grid = Grid::from_numbers(&[1, 2, 3, 4, 5], &[1]).unwrap();
        assert_eq!(grid.rescore(), Err(DrawError::MissingWinningGrid));
    }

    #[test]
    fn test_over_allocated_table() {
        assert!(matches!(
            PayoutTable::new([9_000, 1_001, 0, 0, 0, 0]),
            Err(DrawError::PayoutTableOverAllocated { total_bps: 10_001 })
        ));
    }
}
