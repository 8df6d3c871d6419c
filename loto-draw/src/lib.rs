// Copyright (c) 2024 Botho Foundation

//! Lottery draw simulation.
//!
//! A draw generates betting tickets, scores every grid on them against one
//! winning grid, and splits a share of the collected stake between prize
//! tiers.
//!
//! ## Grids
//!
//! | Numbers | Pool    | Count per grid |
//! |---------|---------|----------------|
//! | Main    | 1 to 49 | 5 to 9         |
//! | Bonus   | 1 to 10 | 1 to 10        |
//!
//! A grid costs `bonus × C(main, 5) × 2` currency units.
//!
//! ## Key Concepts
//!
//! - **Ticket**: one to six grids played together.
//! - **Rank**: prize class of a grid, derived from how many main and bonus
//!   numbers it shares with the winning grid.
//! - **Tier**: one of six prize pools. Complementary ranks (9, 10, 11) are
//!   paid from a main tier and from the bonus tier.
//! - **Settlement**: per-tier pools as fixed shares of the total stake, each
//!   split evenly between its winning grids.
//!
//! ## Example
//!
//! ```
//! use bth_loto_draw::{DrawConfig, Simulation};
//!
//! let config = DrawConfig { tickets: 100, seed: Some(7), ..DrawConfig::default() };
//! let outcome = Simulation::new(config)?.run()?;
//! assert_eq!(outcome.tally.tickets, 100);
//! # Ok::<(), bth_loto_draw::DrawError>(())
//! ```

pub mod error;
pub mod grid;
pub mod money;
pub mod numbers;
pub mod rank;
pub mod settlement;
pub mod simulation;
pub mod ticket;

pub use error::DrawError;
pub use grid::{binomial, Grid, GridSizing, Score, BASE_STAKE};
pub use money::Amount;
pub use numbers::{BonusNumbers, MainNumbers, NumberKind, NumberSet};
pub use rank::{Rank, Tier, TIER_COUNT};
pub use settlement::{PayoutTable, Settlement, Tally, TierPayout};
pub use simulation::{DrawConfig, DrawOutcome, Simulation, MAX_TICKETS, MIN_TICKETS};
pub use ticket::{GridCount, Ticket, TicketId, TicketPlan, TicketSequence, MAX_GRIDS, MIN_GRIDS};
