//! Test support: an in-memory record store and clowder database fixtures.

use rusqlite::Connection;
use seed_core::{Machine, RecordStore, Reference, Reservation};
use std::convert::Infallible;
use std::path::Path;

pub use seed_populate_sqlite::testing::CLOWDER_DDL;

/// Create a clowder database with the given users at `path`.
pub fn create_clowder_database(path: &Path, user_ids: &[i64]) -> rusqlite::Result<()> {
    let conn = Connection::open(path)?;
    conn.execute_batch(CLOWDER_DDL)?;
    for id in user_ids {
        conn.execute(
            "INSERT INTO Users(id, username, name, email, phone) VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                id,
                format!("user{id}"),
                format!("User {id}"),
                format!("user{id}@example.com"),
                "555-0100"
            ],
        )?;
    }
    Ok(())
}

/// Record store keeping everything in vectors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub users: Vec<Reference>,
    pub machines: Vec<Machine>,
    pub reservations: Vec<Reservation>,
}

impl MemoryStore {
    pub fn with_users(users: impl IntoIterator<Item = Reference>) -> Self {
        Self {
            users: users.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl RecordStore for MemoryStore {
    type Error = Infallible;

    fn insert_machines(&mut self, machines: &[Machine]) -> Result<u64, Self::Error> {
        self.machines.extend_from_slice(machines);
        Ok(machines.len() as u64)
    }

    fn insert_reservations(&mut self, reservations: &[Reservation]) -> Result<u64, Self::Error> {
        self.reservations.extend_from_slice(reservations);
        Ok(reservations.len() as u64)
    }

    fn first_user(&self) -> Result<Option<Reference>, Self::Error> {
        // Lowest id in SQLite's order: integers sort before text
        Ok(self
            .users
            .iter()
            .min_by_key(|user| match user {
                Reference::Int(id) => (0, *id, ""),
                Reference::Text(id) => (1, 0, id.as_str()),
            })
            .cloned())
    }

    fn first_machine(&self) -> Result<Option<Reference>, Self::Error> {
        Ok(self.machines.iter().map(|m| m.id).min().map(Reference::Int))
    }
}
