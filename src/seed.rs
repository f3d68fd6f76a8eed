//! Seeding run: generate records and hand them to a store.

use anyhow::Context;
use seed_core::{Machine, RecordStore, Reference, ReservationPlan, SchemaError, SeedSchema};
use seed_generator::{checked_count, GeneratorError, RecordGenerator, TimeWindow};
use seed_populate_sqlite::SqlitePopulator;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::SeedConfig;

/// Errors that abort a seeding run.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// No reference configured and the store has no row to fall back to.
    #[error("No existing {0} to reference")]
    MissingReference(&'static str),

    #[error("Store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

fn store_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> SeedError {
    SeedError::Store(Box::new(e))
}

/// Metrics for one table.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    pub rows_generated: u64,
    /// Zero on a dry run; lower than generated when duplicates were skipped
    pub rows_inserted: u64,
    pub generation_duration: Duration,
    pub insert_duration: Duration,
    pub total_duration: Duration,
}

impl PopulateMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    pub dry_run: bool,
    pub machines: Option<PopulateMetrics>,
    pub reservations: Option<PopulateMetrics>,
}

impl SeedReport {
    pub fn total_rows_inserted(&self) -> u64 {
        [&self.machines, &self.reservations]
            .into_iter()
            .flatten()
            .map(|m| m.rows_inserted)
            .sum()
    }
}

/// Reservation plan with every argument checked.
struct PreparedReservations<'a> {
    plan: &'a ReservationPlan,
    count: u64,
    window: TimeWindow,
}

/// Seed the database named in `config`.
pub fn run_seed(config: &SeedConfig) -> anyhow::Result<SeedReport> {
    let mut populator = SqlitePopulator::open(&config.database)
        .with_context(|| format!("Failed to open database {}", config.database.display()))?
        .with_batch_size(config.batch_size)
        .with_skip_duplicates(config.skip_duplicates);

    let report = seed_store(&config.schema, &mut populator, config.dry_run)
        .with_context(|| format!("Failed to seed {}", config.database.display()))?;

    info!(
        "Seeded {}: {} rows inserted",
        config.database.display(),
        report.total_rows_inserted()
    );
    Ok(report)
}

/// Generate the records `schema` asks for and insert them into `store`.
///
/// Machines are inserted before reservations so a freshly seeded machine can
/// be referenced. Every plan is validated before anything is written.
pub fn seed_store<S: RecordStore>(
    schema: &SeedSchema,
    store: &mut S,
    dry_run: bool,
) -> Result<SeedReport, SeedError> {
    schema.check_version()?;

    let machine_count = schema
        .machines
        .as_ref()
        .map(|plan| checked_count(plan.count))
        .transpose()?;

    let mut generator = RecordGenerator::from_seed_option(schema.seed);
    if schema.seed.is_none() {
        debug!("No seed configured, drawing from entropy");
    }
    if let Some(plan) = &schema.machines {
        generator = generator.with_machine_ranges(plan.ranges);
    }

    let reservations = match &schema.reservations {
        Some(plan) => {
            let schedule = plan.schedule.resolve()?;
            let (start, end) = plan.window.resolve()?;
            let window = TimeWindow::new(start, end)?;
            window.check_schedule(schedule)?;
            generator = generator
                .with_schedule(schedule)
                .with_reservation_ranges(plan.ranges);
            Some(PreparedReservations {
                plan,
                count: checked_count(plan.count)?,
                window,
            })
        }
        None => None,
    };

    let mut report = SeedReport {
        dry_run,
        ..SeedReport::default()
    };

    let mut generated_machines: Vec<Machine> = Vec::new();
    if let Some(count) = machine_count {
        let start_time = Instant::now();
        let mut metrics = PopulateMetrics {
            rows_generated: count,
            ..PopulateMetrics::default()
        };

        info!("Generating {} machines (dry_run={})", count, dry_run);
        generated_machines = generator.machines(count).collect();
        metrics.generation_duration = start_time.elapsed();

        if !dry_run {
            let insert_start = Instant::now();
            metrics.rows_inserted = store
                .insert_machines(&generated_machines)
                .map_err(store_error)?;
            metrics.insert_duration = insert_start.elapsed();
            if metrics.rows_inserted < count {
                warn!(
                    "{} of {} machines skipped as duplicates",
                    count - metrics.rows_inserted,
                    count
                );
            }
        }

        metrics.total_duration = start_time.elapsed();
        info!(
            "Machines: {} generated, {} inserted in {:?}",
            metrics.rows_generated, metrics.rows_inserted, metrics.total_duration
        );
        report.machines = Some(metrics);
    }

    if let Some(prepared) = reservations {
        let start_time = Instant::now();

        let user = match &prepared.plan.user {
            Some(user) => user.clone(),
            None => store
                .first_user()
                .map_err(store_error)?
                .ok_or(SeedError::MissingReference("user"))?,
        };

        let machine = match &prepared.plan.machine {
            Some(machine) => machine.clone(),
            None => {
                let existing = store.first_machine().map_err(store_error)?;
                // On a dry run the generated machines were never written
                let planned = || {
                    dry_run
                        .then(|| generated_machines.iter().map(|m| m.id).min())
                        .flatten()
                        .map(Reference::Int)
                };
                existing
                    .or_else(planned)
                    .ok_or(SeedError::MissingReference("machine"))?
            }
        };

        info!(
            "Generating {} reservations of machine {} for user {} (dry_run={})",
            prepared.count, machine, user, dry_run
        );

        let mut metrics = PopulateMetrics {
            rows_generated: prepared.count,
            ..PopulateMetrics::default()
        };
        let generated: Vec<_> = generator
            .reservations(prepared.count, user, machine, prepared.window)?
            .collect();
        metrics.generation_duration = start_time.elapsed();

        if !dry_run {
            let insert_start = Instant::now();
            metrics.rows_inserted = store
                .insert_reservations(&generated)
                .map_err(store_error)?;
            metrics.insert_duration = insert_start.elapsed();
        }

        metrics.total_duration = start_time.elapsed();
        info!(
            "Reservations: {} generated, {} inserted in {:?} ({:.2} rows/sec)",
            metrics.rows_generated,
            metrics.rows_inserted,
            metrics.total_duration,
            metrics.rows_per_second()
        );
        report.reservations = Some(metrics);
    }

    Ok(report)
}
