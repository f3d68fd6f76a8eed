//! Persistence contract for generated records.

use crate::records::{Machine, Reference, Reservation};

/// A destination for generated records.
///
/// The generator never touches a store; callers generate records and hand
/// them over. Stores own their connection and decide how `id` collisions are
/// handled.
pub trait RecordStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Insert machines, returning the number of rows written.
    fn insert_machines(&mut self, machines: &[Machine]) -> Result<u64, Self::Error>;

    /// Insert reservations, returning the number of rows written.
    fn insert_reservations(&mut self, reservations: &[Reservation]) -> Result<u64, Self::Error>;

    /// An existing user to attach reservations to, if any.
    fn first_user(&self) -> Result<Option<Reference>, Self::Error>;

    /// An existing machine to attach reservations to, if any.
    fn first_machine(&self) -> Result<Option<Reference>, Self::Error>;
}
