//! Candidate hourly slots for a weekday.

use crate::interval::WeeklyInterval;

/// Candidate hours `[start_hour, end_hour)` of an interval, in ascending order.
///
/// No interval configured for the weekday yields an empty list.
pub fn possible_slots(interval: Option<&WeeklyInterval>) -> Vec<u32> {
    match interval {
        Some(interval) => (interval.start_hour()..interval.end_hour()).collect(),
        None => Vec::new(),
    }
}

/// Number of one-hour slots an interval offers, `end_hour - start_hour`.
pub fn slot_count(interval: &WeeklyInterval) -> u32 {
    interval.end_hour().saturating_sub(interval.start_hour())
}
