//! # Garden Booking Testing
//!
//! Testing utilities and helpers for the garden booking workflow.
//!
//! This crate provides:
//! - Deterministic `Clock` implementations (`FixedClock`, `ManualClock`)
//! - A Given/When/Then harness for reducers (`ReducerTest`)
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use garden_booking_testing::{FixedClock, ReducerTest};
//!
//! ReducerTest::new(BookingReducer::new())
//!     .with_env(BookingEnvironment::new(clock, submitter))
//!     .given_state(BookingState::default())
//!     .when_action(BookingAction::Next)
//!     .then_state(|state| assert!(!state.errors().is_empty()))
//!     .run();
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use garden_booking_core::environment::Clock;

pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, NaiveDate, NaiveDateTime, NaiveTime};
    use std::sync::{PoisonError, RwLock};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use garden_booking_core::environment::Clock;
    /// use garden_booking_testing::mocks::FixedClock;
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
    /// let clock = FixedClock::at(date, 17, 59);
    /// assert_eq!(clock.now(), clock.now());
    /// assert_eq!(clock.today(), date);
    /// ```
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock {
        time: NaiveDateTime,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: NaiveDateTime) -> Self {
            Self { time }
        }

        /// Create a fixed clock at `hour:minute` on `date`
        ///
        /// Out-of-range hours or minutes fall back to midnight.
        #[must_use]
        pub fn at(date: NaiveDate, hour: u32, minute: u32) -> Self {
            let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
            Self::new(date.and_time(time))
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.time
        }
    }

    /// Clock whose time is moved explicitly by the test
    ///
    /// Useful for workflows that re-read the clock, such as refreshing the
    /// slots of a date after time has passed.
    #[derive(Debug)]
    pub struct ManualClock {
        time: RwLock<NaiveDateTime>,
    }

    impl ManualClock {
        /// Create a manual clock starting at `time`
        #[must_use]
        pub const fn new(time: NaiveDateTime) -> Self {
            Self {
                time: RwLock::new(time),
            }
        }

        /// Move the clock to `time`
        pub fn set(&self, time: NaiveDateTime) {
            *self.time.write().unwrap_or_else(PoisonError::into_inner) = time;
        }

        /// Move the clock forward by `duration`
        pub fn advance(&self, duration: chrono::Duration) {
            let mut time = self.time.write().unwrap_or_else(PoisonError::into_inner);
            *time += duration;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> NaiveDateTime {
            *self.time.read().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// The reference day used by [`test_clock`]: Tuesday 2025-06-10
    #[must_use]
    pub fn test_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap_or_default()
    }

    /// Create a default fixed clock for tests (2025-06-10 09:30, before opening)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::at(test_day(), 9, 30)
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, ManualClock, test_clock, test_day};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
        assert_eq!(clock.today(), test_day());
    }

    #[test]
    fn fixed_clock_at_sets_wall_time() {
        let clock = FixedClock::at(test_day(), 18, 30);
        assert_eq!(clock.now().time(), NaiveTime::from_hms_opt(18, 30, 0).unwrap_or_default());
    }

    #[test]
    fn manual_clock_moves_forward() {
        let clock = ManualClock::new(test_clock().now());
        clock.advance(chrono::Duration::hours(3));
        assert_eq!(clock.now(), FixedClock::at(test_day(), 12, 30).now());

        let tomorrow = test_day().succ_opt().unwrap_or_default();
        clock.set(FixedClock::at(tomorrow, 8, 0).now());
        assert_eq!(clock.today(), tomorrow);
    }
}
