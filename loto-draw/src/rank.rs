// Copyright (c) 2024 Botho Foundation

//! Prize ranks and the tiers they credit.
//!
//! | Main matched | Bonus matched | Rank | Tiers credited |
//! |--------------|---------------|------|----------------|
//! | 5            | yes           | 1    | 1              |
//! | 5            | no            | 2    | 2              |
//! | 4            | yes           | 9    | 3 and 6        |
//! | 4            | no            | 3    | 3              |
//! | 3            | yes           | 10   | 4 and 6        |
//! | 3            | no            | 4    | 4              |
//! | 2            | yes           | 11   | 5 and 6        |
//! | 2            | no            | 5    | 5              |
//! | 0 or 1       | yes           | 6    | 6              |
//!
//! Anything else wins nothing. Ranks 9 to 11 are the complementary ranks:
//! the grid is paid from its simple tier and from the bonus tier.

use std::fmt;

/// Number of prize tiers in a draw.
pub const TIER_COUNT: usize = 6;

/// Prize rank of a scored grid.
///
/// The discriminant is the rank number used on reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Rank {
    #[default]
    NoPrize = 0,
    First = 1,
    Second = 2,
    Third = 3,
    Fourth = 4,
    Fifth = 5,
    Bonus = 6,
    ThirdWithBonus = 9,
    FourthWithBonus = 10,
    FifthWithBonus = 11,
}

impl Rank {
    /// Every rank, in report order.
    pub const ALL: [Rank; 10] = [
        Rank::NoPrize,
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Bonus,
        Rank::ThirdWithBonus,
        Rank::FourthWithBonus,
        Rank::FifthWithBonus,
    ];

    /// Rank for a grid with `matched_main` main numbers and `matched_bonus`
    /// bonus numbers in common with the winning grid.
    pub const fn from_matches(matched_main: u8, matched_bonus: u8) -> Rank {
        let bonus = matched_bonus > 0;
        match (matched_main, bonus) {
            (5, true) => Rank::First,
            (5, false) => Rank::Second,
            (4, true) => Rank::ThirdWithBonus,
            (4, false) => Rank::Third,
            (3, true) => Rank::FourthWithBonus,
            (3, false) => Rank::Fourth,
            (2, true) => Rank::FifthWithBonus,
            (2, false) => Rank::Fifth,
            (0 | 1, true) => Rank::Bonus,
            _ => Rank::NoPrize,
        }
    }

    /// Rank number as printed on reports (0 for no prize).
    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn is_winning(self) -> bool {
        !matches!(self, Rank::NoPrize)
    }

    /// Whether this rank is paid from both a simple tier and the bonus tier.
    pub const fn is_complementary(self) -> bool {
        matches!(
            self,
            Rank::ThirdWithBonus | Rank::FourthWithBonus | Rank::FifthWithBonus
        )
    }

    /// Tiers whose winner counters this rank increments.
    pub fn tiers(self) -> impl Iterator<Item = Tier> {
        let (simple, bonus) = match self {
            Rank::NoPrize => (None, None),
            Rank::First => (Some(Tier::FIRST), None),
            Rank::Second => (Some(Tier(2)), None),
            Rank::Third => (Some(Tier(3)), None),
            Rank::Fourth => (Some(Tier(4)), None),
            Rank::Fifth => (Some(Tier(5)), None),
            Rank::Bonus => (None, Some(Tier::BONUS)),
            Rank::ThirdWithBonus => (Some(Tier(3)), Some(Tier::BONUS)),
            Rank::FourthWithBonus => (Some(Tier(4)), Some(Tier::BONUS)),
            Rank::FifthWithBonus => (Some(Tier(5)), Some(Tier::BONUS)),
        };
        simple.into_iter().chain(bonus)
    }

    /// Position of this rank in [`Rank::ALL`].
    pub(crate) fn index(self) -> usize {
        match self {
            Rank::NoPrize => 0,
            Rank::First => 1,
            Rank::Second => 2,
            Rank::Third => 3,
            Rank::Fourth => 4,
            Rank::Fifth => 5,
            Rank::Bonus => 6,
            Rank::ThirdWithBonus => 7,
            Rank::FourthWithBonus => 8,
            Rank::FifthWithBonus => 9,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A prize tier, 1 to [`TIER_COUNT`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tier(u8);

impl Tier {
    pub const FIRST: Tier = Tier(1);

    /// The bonus ("chance") tier, also credited by complementary ranks.
    pub const BONUS: Tier = Tier(TIER_COUNT as u8);

    pub const ALL: [Tier; TIER_COUNT] = [Tier(1), Tier(2), Tier(3), Tier(4), Tier(5), Tier(6)];

    pub fn new(number: u8) -> Option<Tier> {
        (1..=TIER_COUNT as u8).contains(&number).then_some(Tier(number))
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// Zero-based index into per-tier arrays.
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_table() {
        assert_eq!(Rank::from_matches(5, 1), Rank::First);
        assert_eq!(Rank::from_matches(5, 0), Rank::Second);
        assert_eq!(Rank::from_matches(4, 1), Rank::ThirdWithBonus);
        assert_eq!(Rank::from_matches(4, 0), Rank::Third);
        assert_eq!(Rank::from_matches(3, 2), Rank::FourthWithBonus);
        assert_eq!(Rank::from_matches(3, 0), Rank::Fourth);
        assert_eq!(Rank::from_matches(2, 1), Rank::FifthWithBonus);
        assert_eq!(Rank::from_matches(2, 0), Rank::Fifth);
        assert_eq!(Rank::from_matches(1, 1), Rank::Bonus);
        assert_eq!(Rank::from_matches(0, 3), Rank::Bonus);
        assert_eq!(Rank::from_matches(1, 0), Rank::NoPrize);
        assert_eq!(Rank::from_matches(0, 0), Rank::NoPrize);
    }

    #[test]
    fn test_rank_numbers() {
        assert_eq!(Rank::from_matches(5, 1).number(), 1);
        assert_eq!(Rank::from_matches(5, 0).number(), 2);
        assert_eq!(Rank::from_matches(0, 0).number(), 0);
        assert_eq!(Rank::from_matches(4, 1).number(), 9);
        assert_eq!(Rank::from_matches(3, 1).number(), 10);
        assert_eq!(Rank::from_matches(2, 1).number(), 11);
    }

    #[test]
    fn test_more_than_five_main_matches_wins_nothing() {
        // A 9-number grid can hold more than 5 winning numbers; the table
        // only pays exact counts.
        assert_eq!(Rank::from_matches(6, 1), Rank::NoPrize);
        assert_eq!(Rank::from_matches(9, 0), Rank::NoPrize);
    }

    #[test]
    fn test_tiers_credited() {
        let tiers = |rank: Rank| rank.tiers().map(Tier::number).collect::<Vec<_>>();

        assert!(tiers(Rank::NoPrize).is_empty());
        assert_eq!(tiers(Rank::First), vec![1]);
        assert_eq!(tiers(Rank::Fifth), vec![5]);
        assert_eq!(tiers(Rank::Bonus), vec![6]);
        assert_eq!(tiers(Rank::ThirdWithBonus), vec![3, 6]);
        assert_eq!(tiers(Rank::FourthWithBonus), vec![4, 6]);
        assert_eq!(tiers(Rank::FifthWithBonus), vec![5, 6]);
    }

    #[test]
    fn test_complementary_ranks_credit_two_tiers() {
        for rank in Rank::ALL {
            let credited = rank.tiers().count();
            if rank.is_complementary() {
                assert_eq!(credited, 2, "{rank:?}");
            } else if rank.is_winning() {
                assert_eq!(credited, 1, "{rank:?}");
            } else {
                assert_eq!(credited, 0);
            }
        }
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, rank) in Rank::ALL.iter().enumerate() {
            assert_eq!(rank.index(), i);
        }
    }

    #[test]
    fn test_tier_bounds() {
        assert!(Tier::new(0).is_none());
        assert!(Tier::new(7).is_none());
        assert_eq!(Tier::new(6), Some(Tier::BONUS));
        assert_eq!(Tier::ALL.map(Tier::number), [1, 2, 3, 4, 5, 6]);
        assert_eq!(Tier::FIRST.index(), 0);
    }
}
