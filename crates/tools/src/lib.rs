//! Shared plumbing for the headless binaries.
//! This module exists so every tool loads tuning files and installs logging the same way.
//! It does not own any simulation rules.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use crawl_core::{InputJournal, Tuning};
use env_logger::{Builder, Env};

/// Installs `env_logger`, defaulting to `info` when `RUST_LOG` is unset.
pub fn init_logging() {
    let env = Env::default().default_filter_or("info");
    let _ = Builder::from_env(env).format_timestamp(None).try_init();
}

/// Reads a JSON tuning file. Missing fields keep their defaults; no path means
/// the default tuning.
pub fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    Tuning::from_json_str(&raw)
        .with_context(|| format!("failed to parse tuning file {}", path.display()))
}

pub fn read_journal(path: &Path) -> Result<InputJournal> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read journal file {}", path.display()))?;
    serde_json::from_str(&raw).context("failed to deserialize journal JSON")
}

pub fn write_journal(path: &Path, journal: &InputJournal) -> Result<()> {
    let encoded = serde_json::to_string_pretty(journal).context("failed to encode journal")?;
    fs::write(path, encoded)
        .with_context(|| format!("failed to write journal file {}", path.display()))
}
