// Copyright (c) 2024 Botho Foundation

//! Error types for grid, ticket and draw construction.

use thiserror::Error;

use crate::numbers::NumberKind;

/// Errors raised while building grids, tickets or a draw.
///
/// Every variant is a construction failure: the offending value is reported
/// back to the caller and nothing is clamped or retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// Requested count of main numbers outside the playable range.
    #[error("main number count {requested} out of range ({min} to {max})")]
    MainCountOutOfRange { requested: u8, min: u8, max: u8 },

    /// Requested count of bonus numbers outside the playable range.
    #[error("bonus number count {requested} out of range ({min} to {max})")]
    BonusCountOutOfRange { requested: u8, min: u8, max: u8 },

    /// Requested number of grids on a ticket outside the allowed range.
    #[error("grid count {requested} out of range ({min} to {max})")]
    GridCountOutOfRange { requested: u8, min: u8, max: u8 },

    /// Requested number of tickets for a draw outside the allowed range.
    #[error("ticket count {requested} out of range ({min} to {max})")]
    TicketCountOutOfRange { requested: u64, min: u64, max: u64 },

    /// A number that does not belong to the pool it was checked against.
    #[error("{kind} number {number} out of range ({min} to {max})")]
    NumberOutOfRange {
        kind: NumberKind,
        number: u8,
        min: u8,
        max: u8,
    },

    /// The same number was checked twice on one grid.
    #[error("{kind} number {number} appears more than once")]
    DuplicateNumber { kind: NumberKind, number: u8 },

    /// Scoring was requested on a grid with no winning grid attached.
    #[error("no winning grid attached")]
    MissingWinningGrid,

    /// Tier shares add up to more than the whole stake.
    #[error("payout shares total {total_bps} bps, more than 10000")]
    PayoutTableOverAllocated { total_bps: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DrawError::MainCountOutOfRange {
            requested: 10,
            min: 5,
            max: 9,
        };
        assert_eq!(err.to_string(), "main number count 10 out of range (5 to 9)");

        let err = DrawError::DuplicateNumber {
            kind: NumberKind::Bonus,
            number: 3,
        };
        assert_eq!(err.to_string(), "bonus number 3 appears more than once");

        assert_eq!(
            DrawError::MissingWinningGrid.to_string(),
            "no winning grid attached"
        );
    }
}
