// Copyright (c) 2024 Botho Foundation

//! CLI Commands
//!
//! Implementation of the `loto` subcommands and their interactive prompts.

pub mod init;
pub mod run;

use anyhow::{bail, Result};
use bth_loto_draw::{MAX_TICKETS, MIN_TICKETS};
use std::io::{BufRead, Write};

use crate::date::DrawDate;

/// Read one line after printing `prompt`. Fails on end of input.
fn read_answer<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("Input closed while waiting for an answer");
    }
    Ok(line.trim().to_string())
}

/// Ask for a ticket count until one in range is given.
pub fn prompt_ticket_count<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<u64> {
    let prompt = format!(
        "Number of tickets to generate ({} to {}): ",
        MIN_TICKETS, MAX_TICKETS
    );
    loop {
        let answer = read_answer(input, output, &prompt)?;
        match answer.parse::<u64>() {
            Ok(count) if (MIN_TICKETS..=MAX_TICKETS).contains(&count) => return Ok(count),
            _ => writeln!(output, "'{}' is not a valid ticket count", answer)?,
        }
    }
}

/// Ask for the draw date until a valid one is given.
pub fn prompt_draw_date<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<DrawDate> {
    loop {
        let answer = read_answer(input, output, "Draw date (dd-mm-yyyy): ")?;
        match DrawDate::parse(&answer) {
            Ok(date) => return Ok(date),
            Err(e) => writeln!(output, "Invalid date: {}", e)?,
        }
    }
}

/// Ask a yes/no question until the answer starts with `y` or `n`.
pub fn prompt_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<bool> {
    let prompt = format!("{} (y/n) ? ", question);
    loop {
        let answer = read_answer(input, output, &prompt)?;
        match answer.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => {}
        }
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("\x1b[32m{}\x1b[0m", message);
}
