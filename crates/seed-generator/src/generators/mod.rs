//! Field-level generators and the record builders that combine them.

pub mod id;
pub mod numeric;
pub mod timestamp;

use rand::Rng;
use seed_core::{Machine, MachineRanges, Reference, Reservation, ReservationRanges, Schedule};
use timestamp::TimeWindow;

/// Draw one machine; every field is independent of the others.
pub fn generate_machine<R: Rng>(rng: &mut R, ranges: &MachineRanges) -> Machine {
    Machine {
        id: id::generate_id(rng),
        name: numeric::generate_code(rng, ranges.name),
        arch: numeric::generate_code(rng, ranges.arch),
        microarch: numeric::generate_code(rng, ranges.microarch),
        cores: numeric::generate_code(rng, ranges.cores),
        memory: numeric::generate_code(rng, ranges.memory),
    }
}

/// Draw one reservation of `machine` for `user` inside `window`.
///
/// `window` must have been checked against `schedule`.
pub fn generate_reservation<R: Rng>(
    rng: &mut R,
    ranges: &ReservationRanges,
    schedule: Schedule,
    user: &Reference,
    machine: &Reference,
    window: TimeWindow,
) -> Reservation {
    let id = id::generate_id(rng);
    let (start, end) = timestamp::generate_interval(rng, schedule, window);

    Reservation {
        id,
        user: user.clone(),
        machine: machine.clone(),
        start,
        end,
        ended: None,
        pxepath: numeric::generate_code(rng, ranges.pxepath),
        nfsroot: numeric::generate_code(rng, ranges.nfsroot),
    }
}
