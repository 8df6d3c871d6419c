// Copyright (c) 2024 Botho Foundation

//! Bounded sets of unique numbers drawn without replacement.
//!
//! A grid checks two independent sets of numbers: main numbers (1 to 49) and
//! bonus numbers (1 to 10). Both pools are small, so each set keeps a 64-bit
//! presence mask next to the picks. Rejection sampling and match counting
//! then cost a bit test and a popcount instead of a scan.

use std::fmt;

use rand::Rng;

use crate::error::DrawError;

/// Capacity of a main number set.
pub const MAIN_CAPACITY: usize = 9;

/// Capacity of a bonus number set.
pub const BONUS_CAPACITY: usize = 10;

/// Which of the two number pools a set draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// Main numbers, 1 to 49, 5 to 9 per grid.
    Main,
    /// Bonus ("chance") numbers, 1 to 10, 1 to 10 per grid.
    Bonus,
}

impl NumberKind {
    /// Lowest number of the pool.
    pub const fn lowest(self) -> u8 {
        1
    }

    /// Highest number of the pool.
    pub const fn highest(self) -> u8 {
        match self {
            NumberKind::Main => 49,
            NumberKind::Bonus => 10,
        }
    }

    /// Fewest numbers a grid may check from this pool.
    pub const fn min_count(self) -> u8 {
        match self {
            NumberKind::Main => 5,
            NumberKind::Bonus => 1,
        }
    }

    /// Most numbers a grid may check from this pool.
    pub const fn max_count(self) -> u8 {
        match self {
            NumberKind::Main => MAIN_CAPACITY as u8,
            NumberKind::Bonus => BONUS_CAPACITY as u8,
        }
    }

    /// Reject a count outside `min_count()..=max_count()`.
    pub fn check_count(self, count: u8) -> Result<(), DrawError> {
        if (self.min_count()..=self.max_count()).contains(&count) {
            Ok(())
        } else {
            Err(self.count_error(count))
        }
    }

    pub(crate) fn count_error(self, requested: u8) -> DrawError {
        let (min, max) = (self.min_count(), self.max_count());
        match self {
            NumberKind::Main => DrawError::MainCountOutOfRange { requested, min, max },
            NumberKind::Bonus => DrawError::BonusCountOutOfRange { requested, min, max },
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberKind::Main => write!(f, "main"),
            NumberKind::Bonus => write!(f, "bonus"),
        }
    }
}

/// A duplicate-free set of numbers from one pool, kept in draw order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberSet<const CAP: usize> {
    kind: NumberKind,
    picks: heapless::Vec<u8, CAP>,
    /// Bit `n` is set when number `n` has been picked.
    mask: u64,
}

/// Main numbers of a grid.
pub type MainNumbers = NumberSet<MAIN_CAPACITY>;

/// Bonus numbers of a grid.
pub type BonusNumbers = NumberSet<BONUS_CAPACITY>;

impl<const CAP: usize> NumberSet<CAP> {
    fn empty(kind: NumberKind) -> Self {
        Self {
            kind,
            picks: heapless::Vec::new(),
            mask: 0,
        }
    }

    /// Draw `count` distinct numbers uniformly from the pool of `kind`.
    ///
    /// Each slot draws from the whole pool and redraws until it hits a
    /// number not already picked.
    pub fn draw<R: Rng + ?Sized>(
        kind: NumberKind,
        count: u8,
        rng: &mut R,
    ) -> Result<Self, DrawError> {
        kind.check_count(count)?;

        let mut set = Self::empty(kind);
        while set.len() < count as usize {
            let number = rng.gen_range(kind.lowest()..=kind.highest());
            if !set.contains(number) {
                set.push_new(number)?;
            }
        }
        Ok(set)
    }

    /// Build a set from explicit numbers, validating range, uniqueness and
    /// count.
    pub fn from_slice(kind: NumberKind, numbers: &[u8]) -> Result<Self, DrawError> {
        kind.check_count(u8::try_from(numbers.len()).unwrap_or(u8::MAX))?;

        let mut set = Self::empty(kind);
        for &number in numbers {
            set.insert(number)?;
        }
        Ok(set)
    }

    /// Add one number, rejecting out-of-pool values and repeats.
    pub fn insert(&mut self, number: u8) -> Result<(), DrawError> {
        let kind = self.kind;
        if !(kind.lowest()..=kind.highest()).contains(&number) {
            return Err(DrawError::NumberOutOfRange {
                kind,
                number,
                min: kind.lowest(),
                max: kind.highest(),
            });
        }
        if self.contains(number) {
            return Err(DrawError::DuplicateNumber { kind, number });
        }
        self.push_new(number)
    }

    fn push_new(&mut self, number: u8) -> Result<(), DrawError> {
        let kind = self.kind;
        let next_len = u8::try_from(self.picks.len() + 1).unwrap_or(u8::MAX);
        self.picks
            .push(number)
            .map_err(|_| kind.count_error(next_len))?;
        self.mask |= 1u64 << number;
        Ok(())
    }

    /// Pool this set draws from.
    pub fn kind(&self) -> NumberKind {
        self.kind
    }

    /// Whether `number` has been picked.
    pub fn contains(&self, number: u8) -> bool {
        number < 64 && self.mask & (1u64 << number) != 0
    }

    /// Count of numbers present in both sets.
    pub fn matches<const OTHER: usize>(&self, other: &NumberSet<OTHER>) -> u8 {
        (self.mask & other.mask).count_ones() as u8
    }

    /// Picks in draw order.
    pub fn as_slice(&self) -> &[u8] {
        &self.picks
    }

    /// Picks in ascending order.
    pub fn sorted(&self) -> impl Iterator<Item = u8> {
        let mut remaining = self.mask;
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let number = remaining.trailing_zeros() as u8;
            remaining &= remaining - 1;
            Some(number)
        })
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }
}
