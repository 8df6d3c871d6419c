// Copyright (c) 2024 Botho Foundation

//! Console report of a draw.

use std::io::{self, Write};
use std::time::Duration;

use bth_loto_draw::{DrawOutcome, Grid, NumberSet, Ticket};

use crate::date::DrawDate;

const CURRENCY: &str = "€";

/// Numbers of a set in ascending order, tab separated.
fn numbers<const CAP: usize>(set: &NumberSet<CAP>) -> String {
    set.sorted()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("\t")
}

/// One grid on a single line: sorted numbers, then the stake.
pub fn format_grid(grid: &Grid<'_>) -> String {
    format!(
        "\t{} ||\t{}\t({} {})",
        numbers(grid.main_numbers()),
        numbers(grid.bonus_numbers()),
        grid.stake(),
        CURRENCY
    )
}

/// Matches and rank of a scored grid, empty when nothing matched.
fn format_score(grid: &Grid<'_>) -> String {
    let mut parts = Vec::new();
    if grid.matched_main() > 0 {
        parts.push(format!("{} main", grid.matched_main()));
    }
    if grid.matched_bonus() > 0 {
        parts.push(format!("{} bonus", grid.matched_bonus()));
    }

    let mut line = String::new();
    if !parts.is_empty() {
        line.push_str("\t-> ");
        line.push_str(&parts.join(" & "));
    }
    if grid.rank().is_winning() {
        line.push_str(&format!(" -> rank {}", grid.rank()));
    }
    line
}

pub fn write_winning_grid<W: Write>(out: &mut W, grid: &Grid<'_>) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{:*^57}", " Winning grid ")?;
    writeln!(out, "{}", format_grid(grid))?;
    writeln!(out)
}

/// Block listing every grid of a ticket with its score.
pub fn write_ticket<W: Write>(out: &mut W, ticket: &Ticket<'_>) -> io::Result<()> {
    writeln!(out, "{:=^57}", format!(" Ticket #{} ", ticket.id()))?;
    for (i, grid) in ticket.grids().iter().enumerate() {
        writeln!(out, "Grid {}:{}{}", i + 1, format_grid(grid), format_score(grid))?;
    }
    writeln!(
        out,
        "{:-^57}",
        format!(" Total: {} {} ", ticket.total_stake(), CURRENCY)
    )?;
    writeln!(out)
}

/// Final totals, pools and payouts of a draw.
pub fn write_summary<W: Write>(
    out: &mut W,
    date: &DrawDate,
    outcome: &DrawOutcome,
) -> io::Result<()> {
    let tally = &outcome.tally;
    let settlement = &outcome.settlement;

    writeln!(out, "Draw date: {}", date)?;
    writeln!(out, "Tickets played: {}", tally.tickets)?;
    writeln!(out, "Grids played: {}", tally.grids)?;
    writeln!(out, "Total stake: {} {}", tally.total_stake, CURRENCY)?;

    writeln!(out, "Prize pools:")?;
    for payout in &settlement.tiers {
        writeln!(out, "Tier {}: {} {}", payout.tier, payout.pool, CURRENCY)?;
    }

    writeln!(out, "Winning grids per tier:")?;
    for payout in &settlement.tiers {
        write!(out, "Tier {}: {}", payout.tier, payout.winners)?;
        if let Some(per_grid) = payout.per_grid {
            write!(out, "\t-> {} {}\tper grid", per_grid, CURRENCY)?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "Unclaimed stake: {} {}", settlement.unclaimed, CURRENCY)?;
    writeln!(out, "**********")?;
    writeln!(out, "Elapsed time: {}", format_elapsed(outcome.elapsed))
}

/// Whole minutes and remaining seconds, `M min., S sec.`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{} min., {} sec.", secs / 60, secs % 60)
}
