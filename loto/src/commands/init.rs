// Copyright (c) 2024 Botho Foundation

use anyhow::{bail, Result};
use std::path::Path;
use tracing::info;

use crate::commands::print_success;
use crate::config::Config;

/// Run the init command
pub fn run(config_path: &Path, force: bool) -> Result<()> {
    if Config::exists(config_path) && !force {
        bail!(
            "Config already exists at {}\nUse a different --config path or pass --force to overwrite it.",
            config_path.display()
        );
    }

    Config::default().save(config_path)?;

    info!("Config initialized at {}", config_path.display());
    println!();
    print_success("Default configuration created.");
    println!("Config saved to: {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Set [draw] tickets, date and verbose to skip the prompts");
    println!("  2. Run 'loto run' to play a draw");

    Ok(())
}
