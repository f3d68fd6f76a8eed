//! Record types produced by the generator and consumed by record stores.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a row owned outside the generator (a User or a Machine).
///
/// Stores hand these out and the generator copies them into records unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    /// Integer primary key
    Int(i64),
    /// Text primary key
    Text(String),
}

impl From<i64> for Reference {
    fn from(id: i64) -> Self {
        Reference::Int(id)
    }
}

impl From<&str> for Reference {
    fn from(id: &str) -> Self {
        Reference::Text(id.to_string())
    }
}

impl From<String> for Reference {
    fn from(id: String) -> Self {
        Reference::Text(id)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Int(id) => write!(f, "{id}"),
            Reference::Text(id) => f.write_str(id),
        }
    }
}

/// A schedulable hardware resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    pub id: i64,
    pub name: i64,
    /// Processor architecture class
    pub arch: i64,
    /// Microarchitecture variant
    pub microarch: i64,
    pub cores: i64,
    /// Memory size code
    pub memory: i64,
}

/// A time-bounded claim by a user on a machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub user: Reference,
    pub machine: Reference,
    /// Unix timestamp (seconds)
    pub start: i64,
    /// Unix timestamp (seconds)
    pub end: i64,
    /// Actual completion time, unset at creation
    pub ended: Option<i64>,
    /// Boot configuration selector
    pub pxepath: i64,
    /// Network filesystem root selector
    pub nfsroot: i64,
}

impl Reservation {
    /// Length of the reserved interval in seconds.
    pub fn duration_secs(&self) -> i64 {
        self.end - self.start
    }
}
