//! SQLite record store.

use crate::error::SqlitePopulatorError;
use crate::insert::{
    insert_batch, machine_params, reference_from_value, reservation_params, rows_per_statement,
    InsertMode, TableLayout, DEFAULT_BATCH_SIZE, MACHINES, RESERVATIONS, USERS,
};
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use seed_core::{Machine, RecordStore, Reference, Reservation};
use std::path::Path;
use tracing::{debug, info};

/// Populator that writes generated records into an existing SQLite database.
///
/// Tables are never created here; `Machines`, `Reservations` and `Users`
/// must already exist. The connection is owned by the populator and closed
/// when it is dropped.
pub struct SqlitePopulator {
    conn: Connection,
    batch_size: usize,
    mode: InsertMode,
}

impl SqlitePopulator {
    /// Open an existing database file.
    ///
    /// Fails if the file does not exist rather than creating an empty database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SqlitePopulatorError> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // Test connection
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        info!("Opened SQLite database {}", path.display());

        Ok(Self::with_connection(conn))
    }

    /// Create a populator over an existing connection.
    pub fn with_connection(conn: Connection) -> Self {
        Self {
            conn,
            batch_size: DEFAULT_BATCH_SIZE,
            mode: InsertMode::default(),
        }
    }

    /// Set the batch size for INSERT operations.
    ///
    /// Batches too wide for one statement are split further when inserting.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Skip rows whose `id` already exists instead of failing the insert.
    pub fn with_skip_duplicates(mut self, skip: bool) -> Self {
        self.mode = if skip {
            InsertMode::SkipDuplicates
        } else {
            InsertMode::Fail
        };
        self
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Get the row count for a table.
    pub fn row_count(&self, table: &TableLayout) -> Result<u64, SqlitePopulatorError> {
        let sql = format!("SELECT COUNT(*) FROM \"{}\"", table.name);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Insert all rows in batches inside a single transaction.
    ///
    /// Any failure rolls the transaction back, so nothing from this call persists.
    fn insert_all(
        &mut self,
        table: &TableLayout,
        rows: Vec<Vec<Value>>,
    ) -> Result<u64, SqlitePopulatorError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let batch_size = rows_per_statement(table, self.batch_size);
        if batch_size < self.batch_size {
            debug!(
                "Batch size {} exceeds the parameter limit for '{}', using {}",
                self.batch_size, table.name, batch_size
            );
        }

        info!(
            "Inserting {} rows into '{}' (batch size: {})",
            rows.len(),
            table.name,
            batch_size
        );

        let tx = self.conn.transaction()?;
        let mut inserted = 0u64;

        for (batch, chunk) in rows.chunks(batch_size).enumerate() {
            let written = insert_batch(&tx, table, chunk, self.mode)?;
            inserted += written;
            debug!(
                "Batch {} into '{}': {} of {} rows written",
                batch + 1,
                table.name,
                written,
                chunk.len()
            );
        }

        tx.commit()?;
        Ok(inserted)
    }

    /// Lowest `id` in `table`, if the table has any rows.
    fn first_id(&self, table: &TableLayout) -> Result<Option<Reference>, SqlitePopulatorError> {
        let sql = format!(
            "SELECT \"id\" FROM \"{}\" ORDER BY \"id\" LIMIT 1",
            table.name
        );
        let value: Option<Value> = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .optional()?;

        value
            .map(|v| reference_from_value(table.name, v))
            .transpose()
    }
}

impl RecordStore for SqlitePopulator {
    type Error = SqlitePopulatorError;

    fn insert_machines(&mut self, machines: &[Machine]) -> Result<u64, Self::Error> {
        let rows = machines.iter().map(machine_params).collect();
        self.insert_all(&MACHINES, rows)
    }

    fn insert_reservations(&mut self, reservations: &[Reservation]) -> Result<u64, Self::Error> {
        let rows = reservations.iter().map(reservation_params).collect();
        self.insert_all(&RESERVATIONS, rows)
    }

    fn first_user(&self) -> Result<Option<Reference>, Self::Error> {
        self.first_id(&USERS)
    }

    fn first_machine(&self) -> Result<Option<Reference>, Self::Error> {
        self.first_id(&MACHINES)
    }
}
