//! SQLite seeding integration tests.
//!
//! Each test creates a throwaway clowder database, seeds it from the YAML
//! fixture, and checks what landed in the tables.

use clowder_seed::testing::create_clowder_database;
use clowder_seed::{run_seed, SeedConfig, SeedError};
use rusqlite::Connection;
use std::path::Path;

const FIXTURE: &str = "tests/fixtures/seed_config.yaml";

fn config_for(db: &Path) -> SeedConfig {
    let mut config = SeedConfig::from_file(FIXTURE).expect("Failed to load seed fixture");
    config.database = db.to_path_buf();
    config
}

fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

#[test]
fn test_seed_clowder_database() -> Result<(), Box<dyn std::error::Error>> {
    clowder_seed::logging::init_tracing("clowder_seed=debug,seed_populate_sqlite=debug").ok();

    let dir = tempfile::tempdir()?;
    let db = dir.path().join("clowder.db");
    create_clowder_database(&db, &[3, 1, 2])?;

    let report = run_seed(&config_for(&db))?;
    assert_eq!(report.total_rows_inserted(), 10);

    let conn = Connection::open(&db)?;
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM Machines"), 5);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM Reservations"), 5);

    // Field ranges
    assert_eq!(
        count(
            &conn,
            "SELECT COUNT(*) FROM Machines WHERE name BETWEEN 0 AND 99 AND arch BETWEEN 0 AND 9 \
             AND microarch BETWEEN 0 AND 9 AND cores BETWEEN 0 AND 11 AND memory BETWEEN 0 AND 11"
        ),
        5
    );

    // Every reservation: first user, first machine, unset ended, well-formed interval
    let first_machine = count(&conn, "SELECT MIN(id) FROM Machines");
    let matching = count(
        &conn,
        &format!(
            "SELECT COUNT(*) FROM Reservations WHERE user = 1 AND machine = {first_machine} \
             AND ended IS NULL AND start >= 0 AND start < 1483228800 \
             AND end >= 1483228800 AND end < 1517443140 \
             AND pxepath BETWEEN 0 AND 9 AND nfsroot BETWEEN 0 AND 9"
        ),
    );
    assert_eq!(matching, 5);

    Ok(())
}

#[test]
fn test_same_seed_same_rows() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut ids = Vec::new();

    for name in ["a.db", "b.db"] {
        let db = dir.path().join(name);
        create_clowder_database(&db, &[1])?;
        run_seed(&config_for(&db))?;

        let conn = Connection::open(&db)?;
        let mut stmt = conn.prepare("SELECT id FROM Machines ORDER BY id")?;
        let machine_ids: Vec<i64> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<_, _>>()?;
        ids.push(machine_ids);
    }

    assert_eq!(ids[0], ids[1]);
    Ok(())
}

#[test]
fn test_reseeding_same_seed_fails_without_skip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let db = dir.path().join("clowder.db");
    create_clowder_database(&db, &[1])?;

    let mut config = config_for(&db);
    config.schema.reservations = None;
    run_seed(&config)?;

    // Same seed, same ids: the primary key rejects the whole second run
    assert!(run_seed(&config).is_err());

    config.skip_duplicates = true;
    let report = run_seed(&config)?;
    assert_eq!(report.machines.unwrap().rows_inserted, 0);

    let conn = Connection::open(&db)?;
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM Machines"), 5);
    Ok(())
}

#[test]
fn test_no_users() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let db = dir.path().join("clowder.db");
    create_clowder_database(&db, &[])?;

    let err = run_seed(&config_for(&db)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SeedError>(),
        Some(SeedError::MissingReference("user"))
    ));

    let conn = Connection::open(&db)?;
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM Reservations"), 0);
    Ok(())
}

#[test]
fn test_dry_run() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let db = dir.path().join("clowder.db");
    create_clowder_database(&db, &[1])?;

    let mut config = config_for(&db);
    config.dry_run = true;
    let report = run_seed(&config)?;

    assert_eq!(report.total_rows_inserted(), 0);
    let conn = Connection::open(&db)?;
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM Machines"), 0);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM Reservations"), 0);
    Ok(())
}

#[test]
fn test_missing_database() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir.path().join("absent.db"));

    assert!(run_seed(&config).is_err());
    assert!(!dir.path().join("absent.db").exists());
}
