// Copyright (c) 2024 Botho Foundation

//! A single playable grid: main numbers, bonus numbers and the stake they
//! cost, scored against the draw's winning grid.
//!
//! # Stake
//!
//! A grid with more than five main numbers plays every 5-number combination
//! of them, once per bonus number:
//!
//! ```text
//! stake = bonus_count × C(main_count, 5) × BASE_STAKE
//! ```
//!
//! # Scoring
//!
//! The winning grid is borrowed, never copied. Thousands of grids share one
//! reference for the whole draw and only read it.

use rand::Rng;

use crate::error::DrawError;
use crate::numbers::{BonusNumbers, MainNumbers, NumberKind};
use crate::rank::Rank;

/// Stake of a single 5-number, 1-bonus combination, in currency units.
pub const BASE_STAKE: u64 = 2;

/// Main numbers per played combination.
pub const COMBINATION_SIZE: u8 = 5;

/// How many numbers a new grid checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridSizing {
    /// Exactly `main` main numbers and `bonus` bonus numbers.
    Fixed { main: u8, bonus: u8 },
    /// Main count uniform in 5..=9, bonus count uniform up to a bound that
    /// shrinks as the main count grows (see [`random_bonus_bound`]).
    Random,
}

impl GridSizing {
    /// Smallest playable grid: 5 main numbers, 1 bonus number.
    pub const MINIMUM: GridSizing = GridSizing::Fixed {
        main: COMBINATION_SIZE,
        bonus: 1,
    };

    /// Resolve to concrete `(main, bonus)` counts.
    ///
    /// Fixed counts outside the playable ranges are rejected, never clamped.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Result<(u8, u8), DrawError> {
        let (main, bonus) = match self {
            GridSizing::Fixed { main, bonus } => (main, bonus),
            GridSizing::Random => {
                let main = rng.gen_range(
                    NumberKind::Main.min_count()..=NumberKind::Main.max_count(),
                );
                let bonus = rng.gen_range(NumberKind::Bonus.min_count()..=random_bonus_bound(main));
                (main, bonus)
            }
        };
        NumberKind::Main.check_count(main)?;
        NumberKind::Bonus.check_count(bonus)?;
        Ok((main, bonus))
    }
}

impl Default for GridSizing {
    fn default() -> Self {
        GridSizing::MINIMUM
    }
}

/// Upper bound of the random bonus count for a grid with `main_count` main
/// numbers.
pub const fn random_bonus_bound(main_count: u8) -> u8 {
    match main_count {
        9 => 1,
        8 => 3,
        7 => 8,
        _ => NumberKind::Bonus.max_count(),
    }
}

/// `n!` in exact integer arithmetic; `None` once it no longer fits in a
/// `u64` (`n > 20`).
pub fn factorial(n: u8) -> Option<u64> {
    (1..=n as u64).try_fold(1u64, |acc, i| acc.checked_mul(i))
}

/// Number of ways to choose `k` items among `n`, computed from factorials.
/// `None` when `n!` overflows.
pub fn binomial(n: u8, k: u8) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let numerator = factorial(n)?;
    let denominator = factorial(k)?.checked_mul(factorial(n - k)?)?;
    Some(numerator / denominator)
}

/// Matches against the winning grid and the rank they earn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub matched_main: u8,
    pub matched_bonus: u8,
    pub rank: Rank,
}

impl Score {
    fn against(grid: &Grid<'_>, winning: &Grid<'_>) -> Score {
        let matched_main = grid.main.matches(&winning.main);
        let matched_bonus = grid.bonus.matches(&winning.bonus);
        Score {
            matched_main,
            matched_bonus,
            rank: Rank::from_matches(matched_main, matched_bonus),
        }
    }
}

/// One playable grid.
#[derive(Clone, Debug)]
pub struct Grid<'w> {
    main: MainNumbers,
    bonus: BonusNumbers,
    stake: u64,
    winning: Option<&'w Grid<'w>>,
    score: Score,
}

impl<'w> Grid<'w> {
    /// Draw a new grid of the given sizing. The grid starts unscored.
    pub fn draw<R: Rng + ?Sized>(sizing: GridSizing, rng: &mut R) -> Result<Self, DrawError> {
        let (main_count, bonus_count) = sizing.resolve(rng)?;
        let main = MainNumbers::draw(NumberKind::Main, main_count, rng)?;
        let bonus = BonusNumbers::draw(NumberKind::Bonus, bonus_count, rng)?;
        Self::from_sets(main, bonus)
    }

    /// Build a grid from explicitly chosen numbers.
    pub fn from_numbers(main: &[u8], bonus: &[u8]) -> Result<Self, DrawError> {
        let main = MainNumbers::from_slice(NumberKind::Main, main)?;
        let bonus = BonusNumbers::from_slice(NumberKind::Bonus, bonus)?;
        Self::from_sets(main, bonus)
    }

    fn from_sets(main: MainNumbers, bonus: BonusNumbers) -> Result<Self, DrawError> {
        let stake = Self::stake_for(main.len() as u8, bonus.len() as u8)?;
        Ok(Self {
            main,
            bonus,
            stake,
            winning: None,
            score: Score::default(),
        })
    }

    /// Stake of a grid with the given counts. Counts outside the playable
    /// ranges are rejected.
    pub fn stake_for(main_count: u8, bonus_count: u8) -> Result<u64, DrawError> {
        NumberKind::Main.check_count(main_count)?;
        NumberKind::Bonus.check_count(bonus_count)?;
        let combinations = binomial(main_count, COMBINATION_SIZE)
            .ok_or_else(|| NumberKind::Main.count_error(main_count))?;
        Ok(bonus_count as u64 * combinations * BASE_STAKE)
    }

    /// Attach the draw's winning grid and score against it.
    ///
    /// Match counts are recomputed from scratch, so attaching the same grid
    /// again yields the same score.
    pub fn attach_winning(&mut self, winning: &'w Grid<'w>) -> Rank {
        self.winning = Some(winning);
        self.score = Score::against(self, winning);
        self.score.rank
    }

    /// Recompute the score against the attached winning grid.
    pub fn rescore(&mut self) -> Result<Rank, DrawError> {
        let winning = self.winning.ok_or(DrawError::MissingWinningGrid)?;
        self.score = Score::against(self, winning);
        Ok(self.score.rank)
    }

    pub fn main_numbers(&self) -> &MainNumbers {
        &self.main
    }

    pub fn bonus_numbers(&self) -> &BonusNumbers {
        &self.bonus
    }

    pub fn stake(&self) -> u64 {
        self.stake
    }

    pub fn winning_grid(&self) -> Option<&'w Grid<'w>> {
        self.winning
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn matched_main(&self) -> u8 {
        self.score.matched_main
    }

    pub fn matched_bonus(&self) -> u8 {
        self.score.matched_bonus
    }

    /// Rank earned; [`Rank::NoPrize`] until a winning grid is attached.
    pub fn rank(&self) -> Rank {
        self.score.rank
    }
}
