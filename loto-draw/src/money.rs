// Copyright (c) 2024 Botho Foundation

//! Currency amounts in integer cents.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Cents per currency unit.
pub const CENTS_PER_UNIT: u64 = 100;

/// A currency amount in cents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Whole currency units, as stakes are expressed.
    pub const fn from_units(units: u64) -> Self {
        Self(units * CENTS_PER_UNIT)
    }

    pub fn saturating_sub(self, other: Amount) -> Amount {
        Amount(self.0.saturating_sub(other.0))
    }

    /// `self × bps / 10000`, rounded half up to the cent.
    pub fn share_bps(self, bps: u32) -> Amount {
        Amount(div_round_half_up(self.0 as u128 * bps as u128, 10_000))
    }

    /// `self / parts`, rounded half up to the cent. `None` when `parts` is 0.
    pub fn split(self, parts: u64) -> Option<Amount> {
        (parts > 0).then(|| Amount(div_round_half_up(self.0 as u128, parts as u128)))
    }
}

fn div_round_half_up(numerator: u128, denominator: u128) -> u64 {
    ((2 * numerator + denominator) / (2 * denominator)) as u64
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, other: Amount) -> Amount {
        Amount(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Amount) {
        self.0 += other.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / CENTS_PER_UNIT,
            self.0 % CENTS_PER_UNIT
        )
    }
}
