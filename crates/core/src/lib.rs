//! Units, calendar constants, and small shared helpers for the dv_map workspace.

/// Kerbin calendar constants (seconds).
pub mod constants {
    /// Seconds per Kerbin day (six hours).
    pub const SECONDS_PER_DAY: u64 = 21_600;
    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: u64 = 3_600;
    /// Days per Kerbin calendar year.
    pub const DAYS_PER_YEAR: u64 = 426;
    /// Seconds per Kerbin calendar year.
    pub const SECONDS_PER_YEAR: u64 = SECONDS_PER_DAY * DAYS_PER_YEAR;
}

/// Unit conversion for display.
pub mod units {
    /// Convert metres per second to kilometres per second.
    #[inline]
    pub fn ms_to_kms(v: f64) -> f64 {
        v / 1_000.0
    }
}

/// Mission-elapsed time on the Kerbin calendar.
pub mod time {
    use std::fmt;

    use super::constants::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_YEAR};

    /// Elapsed time split into calendar fields.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MissionClock {
        pub years: u64,
        pub days: u64,
        pub hours: u64,
        pub minutes: u64,
        pub seconds: u64,
    }

    impl MissionClock {
        /// Split `seconds` (rounded to the nearest second, negatives clamp to zero).
        pub fn from_seconds(seconds: f64) -> Self {
            let total = if seconds.is_finite() {
                seconds.max(0.0).round() as u64
            } else {
                0
            };
            let years = total / SECONDS_PER_YEAR;
            let rem = total % SECONDS_PER_YEAR;
            let days = rem / SECONDS_PER_DAY;
            let rem = rem % SECONDS_PER_DAY;
            Self {
                years,
                days,
                hours: rem / SECONDS_PER_HOUR,
                minutes: (rem % SECONDS_PER_HOUR) / 60,
                seconds: rem % 60,
            }
        }
    }

    impl fmt::Display for MissionClock {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "T+{}.{:03} {:02}:{:02}:{:02}",
                self.years, self.days, self.hours, self.minutes, self.seconds
            )
        }
    }

    /// Format elapsed seconds as `T+Y.DDD HH:MM:SS`.
    pub fn format_elapsed(seconds: f64) -> String {
        MissionClock::from_seconds(seconds).to_string()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn splits_calendar_fields() {
            // 1 year, 2 days, 3h 4m 5s
            let secs = SECONDS_PER_YEAR + 2 * SECONDS_PER_DAY + 3 * 3_600 + 4 * 60 + 5;
            let clock = MissionClock::from_seconds(secs as f64);
            assert_eq!(
                clock,
                MissionClock {
                    years: 1,
                    days: 2,
                    hours: 3,
                    minutes: 4,
                    seconds: 5
                }
            );
            assert_eq!(clock.to_string(), "T+1.002 03:04:05");
        }

        #[test]
        fn negative_and_nan_clamp_to_zero() {
            assert_eq!(format_elapsed(-10.0), "T+0.000 00:00:00");
            assert_eq!(format_elapsed(f64::NAN), "T+0.000 00:00:00");
        }

        #[test]
        fn days_count_within_the_year() {
            // 426-day year plus one day and 65 s
            assert_eq!(format_elapsed(9_223_265.0), "T+1.001 00:01:05");
        }

        #[test]
        fn rounds_to_nearest_second() {
            assert_eq!(format_elapsed(59.6), "T+0.000 00:01:00");
        }
    }
}
