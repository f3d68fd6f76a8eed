//! Batched INSERT logic for SQLite population.

use crate::error::SqlitePopulatorError;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use seed_core::{Machine, Reference, Reservation};

/// Default batch size for INSERT operations.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Most parameters bundled SQLite binds in one statement (`SQLITE_MAX_VARIABLE_NUMBER`).
pub const MAX_BOUND_PARAMETERS: usize = 32_766;

/// Table name and column order used for inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

pub const MACHINES: TableLayout = TableLayout {
    name: "Machines",
    columns: &["id", "name", "arch", "microarch", "cores", "memory"],
};

pub const RESERVATIONS: TableLayout = TableLayout {
    name: "Reservations",
    columns: &[
        "id", "user", "machine", "start", "end", "ended", "pxepath", "nfsroot",
    ],
};

pub const USERS: TableLayout = TableLayout {
    name: "Users",
    columns: &["id"],
};

/// What to do when a row's `id` already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertMode {
    /// Fail the statement (and the enclosing transaction)
    #[default]
    Fail,
    /// Skip the conflicting row
    SkipDuplicates,
}

impl InsertMode {
    fn verb(self) -> &'static str {
        match self {
            InsertMode::Fail => "INSERT",
            InsertMode::SkipDuplicates => "INSERT OR IGNORE",
        }
    }
}

/// Rows per INSERT statement for `table`.
///
/// `batch_size`, capped so one statement never binds more than
/// [`MAX_BOUND_PARAMETERS`] values.
pub fn rows_per_statement(table: &TableLayout, batch_size: usize) -> usize {
    let max_rows = (MAX_BOUND_PARAMETERS / table.columns.len().max(1)).max(1);
    batch_size.clamp(1, max_rows)
}

/// Build a multi-row INSERT statement with `?` placeholders.
pub fn build_insert_sql(table: &TableLayout, row_count: usize, mode: InsertMode) -> String {
    let columns = table
        .columns
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");

    let row_placeholders = format!("({})", vec!["?"; table.columns.len()].join(", "));
    let placeholders = vec![row_placeholders.as_str(); row_count].join(", ");

    format!(
        "{} INTO \"{}\" ({}) VALUES {}",
        mode.verb(),
        table.name,
        columns,
        placeholders
    )
}

/// Bound parameters for one machine, in [`MACHINES`] column order.
pub fn machine_params(machine: &Machine) -> Vec<Value> {
    vec![
        Value::Integer(machine.id),
        Value::Integer(machine.name),
        Value::Integer(machine.arch),
        Value::Integer(machine.microarch),
        Value::Integer(machine.cores),
        Value::Integer(machine.memory),
    ]
}

/// Bound parameters for one reservation, in [`RESERVATIONS`] column order.
pub fn reservation_params(reservation: &Reservation) -> Vec<Value> {
    vec![
        Value::Integer(reservation.id),
        reference_value(&reservation.user),
        reference_value(&reservation.machine),
        Value::Integer(reservation.start),
        Value::Integer(reservation.end),
        reservation.ended.map_or(Value::Null, Value::Integer),
        Value::Integer(reservation.pxepath),
        Value::Integer(reservation.nfsroot),
    ]
}

pub fn reference_value(reference: &Reference) -> Value {
    match reference {
        Reference::Int(id) => Value::Integer(*id),
        Reference::Text(id) => Value::Text(id.clone()),
    }
}

/// Convert an `id` column value read back from `table` into a reference.
pub fn reference_from_value(table: &str, value: Value) -> Result<Reference, SqlitePopulatorError> {
    let kind = match value {
        Value::Integer(id) => return Ok(Reference::Int(id)),
        Value::Text(id) => return Ok(Reference::Text(id)),
        Value::Null => "null",
        Value::Real(_) => "real",
        Value::Blob(_) => "blob",
    };
    Err(SqlitePopulatorError::UnsupportedReference {
        table: table.to_string(),
        kind,
    })
}

/// Insert a batch of rows into a SQLite table.
///
/// Returns the number of rows actually written, which is lower than
/// `rows.len()` only when duplicates are skipped.
pub fn insert_batch(
    conn: &Connection,
    table: &TableLayout,
    rows: &[Vec<Value>],
    mode: InsertMode,
) -> Result<u64, SqlitePopulatorError> {
    if rows.is_empty() {
        return Ok(0);
    }

    let sql = build_insert_sql(table, rows.len(), mode);
    let inserted = conn.execute(&sql, params_from_iter(rows.iter().flatten()))?;

    Ok(inserted as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_insert_sql() {
        let sql = build_insert_sql(&MACHINES, 2, InsertMode::Fail);
        assert_eq!(
            sql,
            "INSERT INTO \"Machines\" (\"id\", \"name\", \"arch\", \"microarch\", \"cores\", \"memory\") \
             VALUES (?, ?, ?, ?, ?, ?), (?, ?, ?, ?, ?, ?)"
        );
    }

    #[test]
    fn test_build_insert_sql_skip_duplicates() {
        let sql = build_insert_sql(&RESERVATIONS, 1, InsertMode::SkipDuplicates);
        assert!(sql.starts_with("INSERT OR IGNORE INTO \"Reservations\""));
        // "end" is a keyword and must stay quoted
        assert!(sql.contains("\"end\""));
        assert!(sql.ends_with("VALUES (?, ?, ?, ?, ?, ?, ?, ?)"));
    }

    #[test]
    fn test_rows_per_statement() {
        assert_eq!(rows_per_statement(&MACHINES, 100), 100);
        assert_eq!(rows_per_statement(&MACHINES, 10_000), 5_461);
        assert_eq!(rows_per_statement(&RESERVATIONS, 5_000), 4_095);
        assert_eq!(rows_per_statement(&RESERVATIONS, 0), 1);
    }

    #[test]
    fn test_reservation_params() {
        let reservation = Reservation {
            id: 9,
            user: Reference::from("u1"),
            machine: Reference::from(3),
            start: 10,
            end: 20,
            ended: None,
            pxepath: 4,
            nfsroot: 5,
        };
        let params = reservation_params(&reservation);

        assert_eq!(params.len(), RESERVATIONS.columns.len());
        assert_eq!(params[1], Value::Text("u1".to_string()));
        assert_eq!(params[2], Value::Integer(3));
        assert_eq!(params[5], Value::Null);
    }

    #[test]
    fn test_reference_from_value() {
        assert_eq!(
            reference_from_value("Users", Value::Integer(4)).unwrap(),
            Reference::Int(4)
        );
        assert_eq!(
            reference_from_value("Users", Value::Text("alice".into())).unwrap(),
            Reference::Text("alice".into())
        );
        assert!(matches!(
            reference_from_value("Users", Value::Real(1.5)),
            Err(SqlitePopulatorError::UnsupportedReference { kind: "real", .. })
        ));
    }

    #[test]
    fn test_insert_batch_empty() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(
            insert_batch(&conn, &MACHINES, &[], InsertMode::Fail).unwrap(),
            0
        );
    }
}
