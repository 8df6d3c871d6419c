// Copyright (c) 2024 Botho Foundation

use anyhow::{anyhow, Context, Result};
use bth_loto_draw::{simulation::DEFAULT_CHUNK_SIZE, PayoutTable, TIER_COUNT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::date::DrawDate;

/// Main configuration for the simulator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub draw: DrawSection,
    #[serde(default)]
    pub payout: PayoutSection,
}

/// Draw parameters. Unset values are asked for interactively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawSection {
    /// Number of tickets to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickets: Option<u64>,

    /// Draw date (dd-mm-yyyy or dd-mm-yy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DrawDate>,

    /// Print every ticket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,

    /// Fixed seed for reproducible draws
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Worker threads (0 = one per core)
    #[serde(default)]
    pub threads: usize,

    /// Grids on every ticket; random 1 to 6 when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grids_per_ticket: Option<u8>,

    /// Tickets per work unit
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u64,
}

fn default_chunk_size() -> u64 {
    DEFAULT_CHUNK_SIZE
}

impl Default for DrawSection {
    fn default() -> Self {
        Self {
            tickets: None,
            date: None,
            verbose: None,
            seed: None,
            threads: 0,
            grids_per_ticket: None,
            chunk_size: default_chunk_size(),
        }
    }
}

/// Share of the collected stake paid into each tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutSection {
    /// Basis points per tier, tier 1 first
    #[serde(default = "default_tier_bps")]
    pub tier_bps: [u32; TIER_COUNT],
}

fn default_tier_bps() -> [u32; TIER_COUNT] {
    PayoutTable::STANDARD_BPS
}

impl Default for PayoutSection {
    fn default() -> Self {
        Self {
            tier_bps: default_tier_bps(),
        }
    }
}

impl PayoutSection {
    /// Validated payout table
    pub fn table(&self) -> Result<PayoutTable> {
        PayoutTable::new(self.tier_bps).context("Invalid [payout] section")
    }
}

impl Config {
    /// Load config from a file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load config if the file exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if Self::exists(path) {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Check if config file exists
    pub fn exists(path: &Path) -> bool {
        path.exists()
    }
}

/// Get the default config directory path
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".loto"))
        .ok_or_else(|| anyhow!("Could not determine home directory"))
}

/// Get the default config file path
pub fn default_config_path() -> Result<PathBuf> {
    Ok(default_data_dir()?.join("config.toml"))
}
