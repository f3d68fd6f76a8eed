//! Seed schema definitions.
//!
//! A seed schema describes how many rows of each entity to generate and the
//! value ranges and time window they are drawn from. Schemas are written in
//! YAML:
//!
//! ```yaml
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

use crate::records::Reference;
use crate::window::{ScheduleSpec, WindowSpec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroU32;
use std::path::Path;

/// Only supported schema version.
pub const SCHEMA_VERSION: u32 = 1;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Unsupported schema version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),
}

// ============================================================================
// Value Ranges
// ============================================================================

const fn bound(n: u32) -> NonZeroU32 {
    match NonZeroU32::new(n) {
        Some(b) => b,
        None => panic!("bound must be non-zero"),
    }
}

const NAME_BOUND: NonZeroU32 = bound(100);
const ARCH_BOUND: NonZeroU32 = bound(10);
const CORES_BOUND: NonZeroU32 = bound(12);
const MEMORY_BOUND: NonZeroU32 = bound(12);
const SELECTOR_BOUND: NonZeroU32 = bound(10);

/// Exclusive upper bounds for the Machine fields. Every field is drawn from `[0, bound)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineRanges {
    pub name: NonZeroU32,
    pub arch: NonZeroU32,
    pub microarch: NonZeroU32,
    pub cores: NonZeroU32,
    pub memory: NonZeroU32,
}

impl Default for MachineRanges {
    fn default() -> Self {
        Self {
            name: NAME_BOUND,
            arch: ARCH_BOUND,
            microarch: ARCH_BOUND,
            cores: CORES_BOUND,
            memory: MEMORY_BOUND,
        }
    }
}

/// Exclusive upper bounds for the Reservation selector fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationRanges {
    pub pxepath: NonZeroU32,
    pub nfsroot: NonZeroU32,
}

impl Default for ReservationRanges {
    fn default() -> Self {
        Self {
            pxepath: SELECTOR_BOUND,
            nfsroot: SELECTOR_BOUND,
        }
    }
}

// ============================================================================
// Plans
// ============================================================================

/// How many machines to generate, and from which ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachinePlan {
    /// Signed so that a negative count reaches the generator and is rejected there.
    pub count: i64,

    #[serde(default)]
    pub ranges: MachineRanges,
}

/// How many reservations to generate, for whom, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationPlan {
    pub count: i64,

    /// Existing user to reserve for; defaults to the store's first user
    #[serde(default)]
    pub user: Option<Reference>,

    /// Existing machine to reserve; defaults to the store's first machine
    #[serde(default)]
    pub machine: Option<Reference>,

    pub window: WindowSpec,

    #[serde(default)]
    pub schedule: ScheduleSpec,

    #[serde(default)]
    pub ranges: ReservationRanges,
}

/// Full seed schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedSchema {
    pub version: u32,

    /// RNG seed; when absent every run draws fresh entropy
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub machines: Option<MachinePlan>,

    #[serde(default)]
    pub reservations: Option<ReservationPlan>,
}

impl SeedSchema {
    /// Parse a schema from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let schema: SeedSchema = serde_yaml::from_str(yaml)?;
        schema.check_version()?;
        Ok(schema)
    }

    /// Load a schema from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn check_version(&self) -> Result<(), SchemaError> {
        if self.version != SCHEMA_VERSION {
            return Err(SchemaError::UnsupportedVersion(self.version));
        }
        Ok(())
    }
}
