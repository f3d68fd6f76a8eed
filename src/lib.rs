//! clowder-seed
//!
//! Seeds the clowder machine-reservation database with synthetic `Machines`
//! and `Reservations` rows.
//!
//! # Crates
//!
//! - `seed_core` - record types, seed schema, `RecordStore` contract
//! - `seed_generator` - pure, seeded record generation
//! - `seed_populate_sqlite` - batched, parameterized SQLite inserts
//!
//! # Example
//!
//! ```no_run
//! use clowder_seed::{run_seed, SeedConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! clowder_seed::logging::init_tracing("clowder_seed=info,seed_populate_sqlite=info")?;
//! let config = SeedConfig::from_file("seed.yaml")?;
//! let report = run_seed(&config)?;
//! println!("{} rows inserted", report.total_rows_inserted());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod logging;
pub mod seed;
pub mod testing;

pub use config::SeedConfig;
pub use seed::{run_seed, seed_store, PopulateMetrics, SeedError, SeedReport};

// Re-exports for convenience
pub use seed_core::{Machine, RecordStore, Reference, Reservation, SeedSchema};
pub use seed_generator::{generate_machines, generate_reservations, RecordGenerator};
pub use seed_populate_sqlite::SqlitePopulator;
