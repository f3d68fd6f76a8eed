//! Seeding configuration.
//!
//! A seed config is a [`SeedSchema`] plus where and how to write it:
//!
//! ```yaml
//! database: clowder.db
//! batch_size: 100
//! dry_run: false
//! skip_duplicates: false
//! version: 1
//! seed: 42
//! machines:
//!   count: 5
//! reservations:
//!   count: 5
//!   window:
//!     start: "2017-01-01 00:00"
//!     end: "2018-01-31 23:59"
//! ```

use anyhow::Context;
use seed_core::SeedSchema;
use seed_populate_sqlite::DEFAULT_BATCH_SIZE;
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn default_database() -> PathBuf {
    PathBuf::from("clowder.db")
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Existing SQLite database to seed
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Rows per INSERT statement
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Generate and log, but write nothing
    #[serde(default)]
    pub dry_run: bool,

    /// Skip rows whose id already exists instead of failing
    #[serde(default)]
    pub skip_duplicates: bool,

    #[serde(flatten)]
    pub schema: SeedSchema,
}

impl SeedConfig {
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config: SeedConfig =
            serde_yaml::from_str(yaml).context("Failed to parse seed config")?;
        config.schema.check_version()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed config {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid seed config {}", path.display()))
    }
}
