// Copyright (c) 2024 Botho Foundation

//! Command-line front end of the lottery draw simulator.
//!
//! Collects the draw parameters from flags, the config file or interactive
//! prompts, runs the draw with `bth-loto-draw` and prints the report.

pub mod commands;
pub mod config;
pub mod date;
pub mod report;
