//! Record generator for machines and reservations.

use crate::generators::timestamp::TimeWindow;
use crate::generators::{generate_machine, generate_reservation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seed_core::{Machine, MachineRanges, Reference, Reservation, ReservationRanges, Schedule};

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Negative count, empty window, or a window the schedule cannot draw from
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convert a caller-supplied count, rejecting negative values.
pub fn checked_count(count: i64) -> Result<u64, GeneratorError> {
    u64::try_from(count).map_err(|_| {
        GeneratorError::InvalidArgument(format!("count must be non-negative, got {count}"))
    })
}

/// Generate `count` machines with the default ranges.
///
/// Ids are drawn independently and are not checked for uniqueness.
pub fn generate_machines<R: Rng>(rng: &mut R, count: i64) -> Result<Vec<Machine>, GeneratorError> {
    let count = checked_count(count)?;
    let ranges = MachineRanges::default();

    Ok((0..count).map(|_| generate_machine(rng, &ranges)).collect())
}

/// Generate `count` reservations of `machine_ref` for `user_ref`.
///
/// Uses the default ranges and [`Schedule::Legacy`]: `start` falls in
/// `[0, window_start)` and `end` in `[window_start, window_end)`.
pub fn generate_reservations<R: Rng>(
    rng: &mut R,
    count: i64,
    user_ref: impl Into<Reference>,
    machine_ref: impl Into<Reference>,
    window_start: i64,
    window_end: i64,
) -> Result<Vec<Reservation>, GeneratorError> {
    let count = checked_count(count)?;
    let window = TimeWindow::new(window_start, window_end)?;
    let schedule = Schedule::Legacy;
    window.check_schedule(schedule)?;

    let user = user_ref.into();
    let machine = machine_ref.into();
    let ranges = ReservationRanges::default();

    Ok((0..count)
        .map(|_| generate_reservation(rng, &ranges, schedule, &user, &machine, window))
        .collect())
}

/// Configurable record generator owning its own randomness stream.
///
/// Two generators built with the same seed and settings produce identical
/// records; generators never share state, so each may live on its own thread.
pub struct RecordGenerator {
    rng: StdRng,
    machine_ranges: MachineRanges,
    reservation_ranges: ReservationRanges,
    schedule: Schedule,
}

impl RecordGenerator {
    /// Create a deterministic generator from `seed`.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create a generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic when `seed` is given, entropy-seeded otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        }
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            machine_ranges: MachineRanges::default(),
            reservation_ranges: ReservationRanges::default(),
            schedule: Schedule::default(),
        }
    }

    pub fn with_machine_ranges(mut self, ranges: MachineRanges) -> Self {
        self.machine_ranges = ranges;
        self
    }

    pub fn with_reservation_ranges(mut self, ranges: ReservationRanges) -> Self {
        self.reservation_ranges = ranges;
        self
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Generate the next machine.
    pub fn next_machine(&mut self) -> Machine {
        generate_machine(&mut self.rng, &self.machine_ranges)
    }

    /// Generate the next reservation.
    pub fn next_reservation(
        &mut self,
        user: &Reference,
        machine: &Reference,
        window: TimeWindow,
    ) -> Result<Reservation, GeneratorError> {
        window.check_schedule(self.schedule)?;

        Ok(generate_reservation(
            &mut self.rng,
            &self.reservation_ranges,
            self.schedule,
            user,
            machine,
            window,
        ))
    }

    /// Generate multiple machines.
    ///
    /// Returns an iterator that lazily generates machines.
    pub fn machines(&mut self, count: u64) -> MachineIterator<'_> {
        MachineIterator {
            generator: self,
            remaining: count,
        }
    }

    /// Generate multiple reservations.
    ///
    /// The window is checked against the schedule up front, so the returned
    /// iterator always yields exactly `count` reservations.
    pub fn reservations(
        &mut self,
        count: u64,
        user: Reference,
        machine: Reference,
        window: TimeWindow,
    ) -> Result<ReservationIterator<'_>, GeneratorError> {
        window.check_schedule(self.schedule)?;

        Ok(ReservationIterator {
            generator: self,
            user,
            machine,
            window,
            remaining: count,
        })
    }
}

/// Exact hint for `remaining` items, saturating where `usize` is narrower than `u64`.
fn remaining_hint(remaining: u64) -> (usize, Option<usize>) {
    let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
    (remaining, Some(remaining))
}

/// Iterator that lazily generates machines.
pub struct MachineIterator<'a> {
    generator: &'a mut RecordGenerator,
    remaining: u64,
}

impl Iterator for MachineIterator<'_> {
    type Item = Machine;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.generator.next_machine())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        remaining_hint(self.remaining)
    }
}

impl ExactSizeIterator for MachineIterator<'_> {}

/// Iterator that lazily generates reservations.
pub struct ReservationIterator<'a> {
    generator: &'a mut RecordGenerator,
    user: Reference,
    machine: Reference,
    window: TimeWindow,
    remaining: u64,
}

impl Iterator for ReservationIterator<'_> {
    type Item = Reservation;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;

        // Cannot fail: the window was checked when the iterator was built
        self.generator
            .next_reservation(&self.user, &self.machine, self.window)
            .ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        remaining_hint(self.remaining)
    }
}

impl ExactSizeIterator for ReservationIterator<'_> {}
