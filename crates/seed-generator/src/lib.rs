//! Synthetic record generator for a machine-reservation system.
//!
//! Produces randomized but internally consistent [`Machine`](seed_core::Machine)
//! and [`Reservation`](seed_core::Reservation) records for seeding a database.
//! Generation is pure: nothing here opens a connection or builds SQL.
//!
//! ```text
//! SeedSchema (YAML)
//!        │
//!        ▼
//! ┌──────────────────┐
//! │ RecordGenerator  │
//! │                  │
//! │  - rng (StdRng)  │
//! │  - ranges        │
//! │  - schedule      │
//! └────────┬─────────┘
//!          │
//!          ▼
//!   Machine / Reservation ──► RecordStore
//! ```
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use seed_generator::{generate_machines, generate_reservations};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let machines = generate_machines(&mut rng, 5).unwrap();
//! assert_eq!(machines.len(), 5);
//!
//! // 2017-01-01 00:00 .. 2018-01-31 23:59 UTC
//! let reservations =
//!     generate_reservations(&mut rng, 5, "u1", "m1", 1483228800, 1517443140).unwrap();
//! assert!(reservations.iter().all(|r| r.start < r.end && r.ended.is_none()));
//! ```

pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use generator::{
    checked_count, generate_machines, generate_reservations, GeneratorError, MachineIterator,
    RecordGenerator, ReservationIterator,
};
pub use generators::timestamp::TimeWindow;
