//! Time slot generation and the booking horizon.
//!
//! Slots are hourly start times inside the operating window. A slot is
//! offered for a date only while its start instant is still in the future;
//! instants are compared on a naive local clock.

use crate::types::TimeSlot;
use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// First slot hour of the default operating window
pub const DEFAULT_OPENING_HOUR: u32 = 10;

/// Last slot hour of the default operating window
pub const DEFAULT_CLOSING_HOUR: u32 = 18;

/// Days after today that can be booked by default
pub const DEFAULT_HORIZON_DAYS: u32 = 3;

/// Hours of the day in which slots start (both ends inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotWindow {
    opening_hour: u32,
    closing_hour: u32,
}

impl SlotWindow {
    /// Create a window, or `None` unless `opening_hour <= closing_hour <= 23`
    #[must_use]
    pub const fn new(opening_hour: u32, closing_hour: u32) -> Option<Self> {
        if opening_hour <= closing_hour && closing_hour <= 23 {
            Some(Self {
                opening_hour,
                closing_hour,
            })
        } else {
            None
        }
    }

    /// First slot hour
    #[must_use]
    pub const fn opening_hour(&self) -> u32 {
        self.opening_hour
    }

    /// Last slot hour
    #[must_use]
    pub const fn closing_hour(&self) -> u32 {
        self.closing_hour
    }

    /// Every slot hour of the window
    #[must_use]
    pub const fn hours(&self) -> RangeInclusive<u32> {
        self.opening_hour..=self.closing_hour
    }

    /// Number of slots in a day that has not started yet
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.hours().count()
    }
}

impl Default for SlotWindow {
    fn default() -> Self {
        Self {
            opening_hour: DEFAULT_OPENING_HOUR,
            closing_hour: DEFAULT_CLOSING_HOUR,
        }
    }
}

/// The range of bookable dates: today through `days_ahead` days later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingHorizon {
    days_ahead: u32,
}

impl BookingHorizon {
    /// Create a horizon spanning today plus `days_ahead` days
    #[must_use]
    pub const fn new(days_ahead: u32) -> Self {
        Self { days_ahead }
    }

    /// Days after today that can be booked
    #[must_use]
    pub const fn days_ahead(&self) -> u32 {
        self.days_ahead
    }

    /// Last bookable date
    #[must_use]
    pub fn last_day(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(u64::from(self.days_ahead)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Whether `date` lies in `[today, today + days_ahead]`
    #[must_use]
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= today && date <= self.last_day(today)
    }

    /// Every bookable date, in order
    #[must_use]
    pub fn dates(&self, today: NaiveDate) -> Vec<NaiveDate> {
        today
            .iter_days()
            .take_while(|date| *date <= self.last_day(today))
            .collect()
    }
}

impl Default for BookingHorizon {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON_DAYS)
    }
}

/// Scheduling rules the engine is configured with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPolicy {
    /// Operating hours
    pub window: SlotWindow,
    /// Bookable date range
    pub horizon: BookingHorizon,
}

impl BookingPolicy {
    /// Create a policy from a window and a horizon
    #[must_use]
    pub const fn new(window: SlotWindow, horizon: BookingHorizon) -> Self {
        Self { window, horizon }
    }
}

/// Computes the bookable slots of a date relative to "now"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotGenerator {
    window: SlotWindow,
}

impl SlotGenerator {
    /// Generator over the default 10:00-18:00 window
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator over a configured window
    #[must_use]
    pub const fn with_window(window: SlotWindow) -> Self {
        Self { window }
    }

    /// The operating window
    #[must_use]
    pub const fn window(&self) -> SlotWindow {
        self.window
    }

    /// Slots of `date` whose start is strictly later than `now`, in order
    ///
    /// An empty list is a valid answer (the day is over, or lies in the past).
    #[must_use]
    pub fn generate(&self, date: NaiveDate, now: NaiveDateTime) -> Vec<TimeSlot> {
        self.window
            .hours()
            .filter_map(TimeSlot::at_hour)
            .filter(|slot| date.and_time(slot.start()) > now)
            .collect()
    }

    /// Whether `slot` is offered for `date` at `now`
    #[must_use]
    pub fn is_available(&self, date: NaiveDate, slot: TimeSlot, now: NaiveDateTime) -> bool {
        self.window.hours().contains(&slot.hour()) && date.and_time(slot.start()) > now
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, minute, 0).unwrap()
    }

    fn labels(slots: &[TimeSlot]) -> Vec<String> {
        slots.iter().map(TimeSlot::label).collect()
    }

    #[test]
    fn before_opening_offers_the_whole_day() {
        let slots = SlotGenerator::new().generate(day(), at(day(), 9, 30));
        assert_eq!(slots.len(), 9);
        assert_eq!(slots.first().map(TimeSlot::hour), Some(10));
        assert_eq!(slots.last().map(TimeSlot::hour), Some(18));
    }

    #[test]
    fn one_minute_before_last_slot_offers_only_last_slot() {
        let slots = SlotGenerator::new().generate(day(), at(day(), 17, 59));
        assert_eq!(labels(&slots), vec!["6:00 PM"]);
    }

    #[test]
    fn after_closing_offers_nothing() {
        assert!(SlotGenerator::new().generate(day(), at(day(), 18, 30)).is_empty());
    }

    #[test]
    fn slot_starting_now_is_excluded() {
        let slots = SlotGenerator::new().generate(day(), at(day(), 11, 0));
        assert_eq!(slots.first().map(TimeSlot::hour), Some(12));
    }

    #[test]
    fn past_dates_offer_nothing() {
        let yesterday = day().pred_opt().unwrap();
        assert!(SlotGenerator::new().generate(yesterday, at(day(), 8, 0)).is_empty());
    }

    #[test]
    fn configured_window_is_respected() {
        let generator = SlotGenerator::with_window(SlotWindow::new(8, 12).unwrap());
        let tomorrow = day().succ_opt().unwrap();
        assert_eq!(generator.generate(tomorrow, at(day(), 20, 0)).len(), 5);
        assert!(!generator.is_available(tomorrow, TimeSlot::at_hour(13).unwrap(), at(day(), 20, 0)));
    }

    #[test]
    fn invalid_windows_are_rejected() {
        assert!(SlotWindow::new(18, 10).is_none());
        assert!(SlotWindow::new(10, 24).is_none());
        assert_eq!(SlotWindow::new(0, 23).map(|w| w.slot_count()), Some(24));
    }

    #[test]
    fn horizon_is_inclusive() {
        let horizon = BookingHorizon::default();
        let today = day();
        assert!(horizon.contains(today, today));
        assert!(horizon.contains(today + Days::new(3), today));
        assert!(!horizon.contains(today + Days::new(4), today));
        assert!(!horizon.contains(today.pred_opt().unwrap(), today));
        assert_eq!(horizon.dates(today).len(), 4);
    }

    proptest! {
        #[test]
        fn later_days_offer_every_slot(offset in 1u64..=3, hour in 0u32..24, minute in 0u32..60) {
            let today = day();
            let date = today + Days::new(offset);
            let slots = SlotGenerator::new().generate(date, at(today, hour, minute));
            prop_assert_eq!(slots.len(), 9);
        }

        #[test]
        fn generated_slots_are_ordered_and_in_the_future(hour in 0u32..24, minute in 0u32..60) {
            let now = at(day(), hour, minute);
            let slots = SlotGenerator::new().generate(day(), now);
            prop_assert!(slots.windows(2).all(|pair| pair[0] < pair[1]));
            for slot in &slots {
                prop_assert!(day().and_time(slot.start()) > now);
                prop_assert!(SlotGenerator::new().is_available(day(), *slot, now));
            }
        }
    }
}
