//! Reservation interval generators.

use crate::generator::GeneratorError;
use rand::Rng;
use seed_core::Schedule;

/// Half-open scheduling window `[start, end)` in Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: i64,
    end: i64,
}

impl TimeWindow {
    /// Create a window, rejecting `end <= start`.
    pub fn new(start: i64, end: i64) -> Result<Self, GeneratorError> {
        if end <= start {
            return Err(GeneratorError::InvalidArgument(format!(
                "window end {end} must be after window start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Check that `schedule` can draw at least one interval from this window.
    pub fn check_schedule(&self, schedule: Schedule) -> Result<(), GeneratorError> {
        match schedule {
            Schedule::Legacy => {
                if self.start <= 0 {
                    return Err(GeneratorError::InvalidArgument(format!(
                        "window start {} leaves no room for a start time in [0, {})",
                        self.start, self.start
                    )));
                }
            }
            Schedule::Bounded { max_duration_secs } => {
                if max_duration_secs < 1 {
                    return Err(GeneratorError::InvalidArgument(format!(
                        "max duration must be at least one second, got {max_duration_secs}"
                    )));
                }
                if self.end <= self.start.saturating_add(1) {
                    return Err(GeneratorError::InvalidArgument(format!(
                        "window [{}, {}) is too short for a bounded schedule",
                        self.start, self.end
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Draw a `(start, end)` pair for `schedule`.
///
/// The window must have passed [`TimeWindow::check_schedule`] for `schedule`.
/// Both policies yield `start < end`.
pub fn generate_interval<R: Rng>(rng: &mut R, schedule: Schedule, window: TimeWindow) -> (i64, i64) {
    match schedule {
        Schedule::Legacy => {
            let start = rng.gen_range(0..window.start);
            let end = rng.gen_range(window.start..window.end);
            (start, end)
        }
        Schedule::Bounded { max_duration_secs } => {
            let last_end = window.end - 1;
            let start = rng.gen_range(window.start..last_end);
            let max_end = start.saturating_add(max_duration_secs).min(last_end);
            let end = rng.gen_range(start + 1..=max_end);
            (start, end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const WINDOW_START: i64 = 1_483_228_800; // 2017-01-01 00:00
    const WINDOW_END: i64 = 1_517_443_140; // 2018-01-31 23:59

    #[test]
    fn test_window_rejects_empty() {
        assert!(TimeWindow::new(10, 10).is_err());
        assert!(TimeWindow::new(10, 5).is_err());
        assert!(TimeWindow::new(10, 11).is_ok());
    }

    #[test]
    fn test_legacy_interval() {
        let mut rng = StdRng::seed_from_u64(42);
        let window = TimeWindow::new(WINDOW_START, WINDOW_END).unwrap();

        for _ in 0..1000 {
            let (start, end) = generate_interval(&mut rng, Schedule::Legacy, window);
            assert!((0..WINDOW_START).contains(&start));
            assert!((WINDOW_START..WINDOW_END).contains(&end));
            assert!(start < end);
        }
    }

    #[test]
    fn test_legacy_needs_positive_start() {
        let window = TimeWindow::new(0, 100).unwrap();
        assert!(window.check_schedule(Schedule::Legacy).is_err());
        assert!(window
            .check_schedule(Schedule::Bounded {
                max_duration_secs: 10
            })
            .is_ok());
    }

    #[test]
    fn test_bounded_interval() {
        let mut rng = StdRng::seed_from_u64(42);
        let window = TimeWindow::new(WINDOW_START, WINDOW_END).unwrap();
        let schedule = Schedule::Bounded {
            max_duration_secs: 7_200,
        };
        window.check_schedule(schedule).unwrap();

        for _ in 0..1000 {
            let (start, end) = generate_interval(&mut rng, schedule, window);
            assert!(start >= WINDOW_START);
            assert!(end < WINDOW_END);
            assert!(start < end);
            assert!(end - start <= 7_200);
        }
    }

    #[test]
    fn test_bounded_smallest_window() {
        let mut rng = StdRng::seed_from_u64(42);
        let window = TimeWindow::new(100, 102).unwrap();
        let schedule = Schedule::Bounded {
            max_duration_secs: 3_600,
        };
        window.check_schedule(schedule).unwrap();

        for _ in 0..10 {
            assert_eq!(generate_interval(&mut rng, schedule, window), (100, 101));
        }
    }

    #[test]
    fn test_bounded_rejects_short_window_and_duration() {
        let window = TimeWindow::new(100, 101).unwrap();
        assert!(window
            .check_schedule(Schedule::Bounded {
                max_duration_secs: 10
            })
            .is_err());

        let window = TimeWindow::new(100, 200).unwrap();
        assert!(window
            .check_schedule(Schedule::Bounded {
                max_duration_secs: 0
            })
            .is_err());
    }
}
