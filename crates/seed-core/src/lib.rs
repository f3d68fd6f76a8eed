//! Core types for clowder-seed.
//!
//! This crate provides the foundational types shared by the generator and
//! the record stores:
//!
//! - [`Machine`], [`Reservation`] - generated records
//! - [`Reference`] - opaque foreign key to an externally owned row
//! - [`SeedSchema`] - seed plans loaded from YAML
//! - [`Schedule`] - how reservation intervals are derived from a window
//! - [`RecordStore`] - persistence contract
//!
//! ```text
//! seed-core (this crate)
//!    │
//!    ├─── seed-generator        (produces records)
//!    └─── seed-populate-sqlite  (implements RecordStore)
//! ```

pub mod records;
pub mod schema;
pub mod store;
pub mod window;

// Re-exports for convenience
pub use records::{Machine, Reference, Reservation};
pub use schema::{
    MachinePlan, MachineRanges, ReservationPlan, ReservationRanges, SchemaError, SeedSchema,
    SCHEMA_VERSION,
};
pub use store::RecordStore;
pub use window::{
    parse_duration_to_secs, parse_timestamp, Schedule, ScheduleSpec, TimestampSpec, WindowSpec,
};
