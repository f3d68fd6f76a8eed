//! SQLite record store for clowder-seed.
//!
//! Writes generated [`Machine`](seed_core::Machine) and
//! [`Reservation`](seed_core::Reservation) records into the `Machines` and
//! `Reservations` tables of an existing database using parameterized,
//! batched inserts, and looks up existing users and machines for
//! reservations to reference.

pub mod error;
pub mod insert;
pub mod populator;
pub mod testing;

pub use error::SqlitePopulatorError;
pub use insert::{
    InsertMode, TableLayout, DEFAULT_BATCH_SIZE, MACHINES, MAX_BOUND_PARAMETERS, RESERVATIONS, USERS,
};
pub use populator::SqlitePopulator;
