//! Tests for slot resolution against bookings, the current time and the
//! guest's timezone offset.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use slot_engine::booking::{requester_instant, requester_local};
use slot_engine::resolver::{at_hour, blocking_window, end_of_day_utc, is_past_day, resolve_slots};
use slot_engine::{AvailabilityQuery, AvailabilityResult, Booking, HostId, SchedulingError, WeeklyInterval};

const HOST: HostId = HostId(7);

// ── Helpers ─────────────────────────────────────────────────────────────────

/// 2026-03-16 is a Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

fn utc(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn business_hours(weekday: u8) -> WeeklyInterval {
    WeeklyInterval::new(HOST, weekday, 480, 1080).unwrap()
}

fn booking(at: &str) -> Booking {
    Booking {
        host_id: HOST,
        scheduled_at: utc(at),
        guest_name: "Guest".to_string(),
        guest_email: "guest@example.com".to_string(),
        note: None,
    }
}

fn query(date: NaiveDate, offset: i32) -> AvailabilityQuery {
    AvailabilityQuery {
        reference_date: date,
        timezone_offset_minutes: offset,
    }
}

/// The Sunday before `monday()`, at noon UTC.
fn day_before() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
}

// ── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn free_future_day_offers_every_slot() {
    let interval = business_hours(1);

    let result = resolve_slots(Some(&interval), &[], &query(monday(), 0), Tz::UTC, day_before()).unwrap();

    let expected: Vec<u32> = (8..=17).collect();
    assert_eq!(result.possible_slots, expected);
    assert_eq!(result.available_slots, expected);
}

#[test]
fn booked_hour_is_not_available() {
    let interval = business_hours(1);
    let bookings = vec![booking("2026-03-16T10:00:00Z")];

    let result = resolve_slots(Some(&interval), &bookings, &query(monday(), 0), Tz::UTC, day_before()).unwrap();

    assert_eq!(result.possible_slots.len(), 10);
    assert_eq!(result.available_slots.len(), 9);
    assert!(!result.available_slots.contains(&10));
    assert!(result.possible_slots.contains(&10));
}

#[test]
fn missing_interval_gives_empty_result() {
    let result = resolve_slots(None, &[], &query(monday(), 0), Tz::UTC, day_before()).unwrap();

    assert!(result.possible_slots.is_empty());
    assert!(result.available_slots.is_empty());
}

#[test]
fn elapsed_day_gives_empty_result() {
    let interval = business_hours(1);
    let a_week_later = Utc.with_ymd_and_hms(2026, 3, 23, 9, 0, 0).unwrap();

    let result = resolve_slots(Some(&interval), &[], &query(monday(), 0), Tz::UTC, a_week_later).unwrap();

    assert_eq!(result, AvailabilityResult::empty());
}

#[test]
fn booking_on_another_day_does_not_block() {
    let interval = business_hours(1);
    let bookings = vec![booking("2026-03-23T10:00:00Z"), booking("2026-03-09T10:00:00Z")];

    let result = resolve_slots(Some(&interval), &bookings, &query(monday(), 0), Tz::UTC, day_before()).unwrap();

    assert_eq!(result.available_slots.len(), 10);
}

// ── Timezone offsets ────────────────────────────────────────────────────────

#[test]
fn offset_west_of_utc_shifts_bookings_back_to_guest_time() {
    // Guest at UTC-3 reports +180. A 13:00Z booking is 10:00 for them.
    let interval = business_hours(1);
    let bookings = vec![booking("2026-03-16T13:00:00Z")];

    let result = resolve_slots(Some(&interval), &bookings, &query(monday(), 180), Tz::UTC, day_before()).unwrap();

    assert!(!result.available_slots.contains(&10));
    assert!(result.available_slots.contains(&13));
    assert_eq!(result.available_slots.len(), 9);
}

#[test]
fn offset_east_of_utc_crossing_midnight_still_blocks() {
    // Guest at UTC+9 reports -540. 08:00 on Monday is 23:00Z on Sunday.
    let interval = business_hours(1);
    let bookings = vec![booking("2026-03-15T23:00:00Z")];

    let result = resolve_slots(Some(&interval), &bookings, &query(monday(), -540), Tz::UTC, day_before()).unwrap();

    assert_eq!(result.available_slots.first(), Some(&9));
    assert_eq!(result.available_slots.len(), 9);
}

#[test]
fn half_hour_offsets_match_bookings_on_the_guest_hour() {
    // UTC+5:30 reports -330. 14:00 local is 08:30Z.
    let interval = business_hours(1);
    let bookings = vec![booking("2026-03-16T08:30:00Z")];

    let result = resolve_slots(Some(&interval), &bookings, &query(monday(), -330), Tz::UTC, day_before()).unwrap();

    assert!(!result.available_slots.contains(&14));
    assert_eq!(result.available_slots.len(), 9);
}

#[test]
fn blocking_window_is_guest_wall_clock_shifted_by_offset() {
    let interval = business_hours(1);

    let (start, end) = blocking_window(&interval, monday(), 180).unwrap();

    assert_eq!(start, utc("2026-03-16T11:00:00Z"));
    assert_eq!(end, utc("2026-03-16T21:00:00Z"));
}

#[test]
fn booking_at_window_end_on_next_day_does_not_block_midnight_slot() {
    let interval = WeeklyInterval::new(HOST, 1, 0, 1440).unwrap();
    let bookings = vec![booking("2026-03-17T00:00:00Z")];

    let result = resolve_slots(Some(&interval), &bookings, &query(monday(), 0), Tz::UTC, day_before()).unwrap();

    assert_eq!(result.available_slots.len(), 24);
}

// ── Past slots on the current day ───────────────────────────────────────────

#[test]
fn slots_earlier_today_are_not_available() {
    let interval = business_hours(1);
    let now = utc("2026-03-16T12:30:00Z");

    let result = resolve_slots(Some(&interval), &[], &query(monday(), 0), Tz::UTC, now).unwrap();

    assert_eq!(result.possible_slots.len(), 10);
    assert_eq!(result.available_slots, vec![13, 14, 15, 16, 17]);
}

#[test]
fn past_check_compares_absolute_instants() {
    // At 12:30Z it is 09:30 for a UTC-3 guest, so 10:00 local is still ahead.
    let interval = business_hours(1);
    let now = utc("2026-03-16T12:30:00Z");

    let result = resolve_slots(Some(&interval), &[], &query(monday(), 180), Tz::UTC, now).unwrap();

    assert_eq!(result.available_slots, (10..=17).collect::<Vec<u32>>());
}

#[test]
fn slot_starting_exactly_now_is_still_available() {
    let interval = business_hours(1);
    let now = utc("2026-03-16T13:00:00Z");

    let result = resolve_slots(Some(&interval), &[], &query(monday(), 0), Tz::UTC, now).unwrap();

    assert_eq!(result.available_slots.first(), Some(&13));
}

// ── Server timezone ─────────────────────────────────────────────────────────

#[test]
fn day_end_follows_server_timezone() {
    let sunday = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
    let now = utc("2026-03-16T01:00:00Z");

    assert!(is_past_day(sunday, Tz::UTC, now).unwrap());
    // Sao Paulo is UTC-3: its Sunday ends at 02:59:59.999Z on Monday.
    assert!(!is_past_day(sunday, Tz::America__Sao_Paulo, now).unwrap());
    assert_eq!(
        end_of_day_utc(sunday, Tz::America__Sao_Paulo).unwrap(),
        utc("2026-03-16T02:59:59.999Z")
    );
}

#[test]
fn day_end_across_dst_change_uses_the_evening_offset() {
    // New York springs forward on 2026-03-08; by 23:59 it is UTC-4.
    let dst_day = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();

    assert_eq!(
        end_of_day_utc(dst_day, Tz::America__New_York).unwrap(),
        utc("2026-03-09T03:59:59.999Z")
    );
}

// ── Date range ──────────────────────────────────────────────────────────────

#[test]
fn dates_outside_supported_years_are_rejected() {
    let interval = business_hours(1);

    for date in [NaiveDate::MAX, NaiveDate::MIN, NaiveDate::from_ymd_opt(10_000, 1, 3).unwrap()] {
        let result = resolve_slots(Some(&interval), &[], &query(date, 0), Tz::UTC, day_before());
        assert!(
            matches!(result, Err(SchedulingError::Validation(_))),
            "expected {} to be rejected",
            date
        );
    }
}

#[test]
fn helpers_report_overflow_instead_of_panicking() {
    let last_hour = NaiveDate::MAX.and_hms_opt(23, 0, 0).unwrap();

    assert!(at_hour(NaiveDate::MAX, 24).is_err());
    assert!(end_of_day_utc(NaiveDate::MAX, Tz::UTC).is_err());
    assert!(requester_local(last_hour.and_utc(), -60).is_err());
    assert!(requester_instant(last_hour, 60).is_err());
    assert!(requester_local(last_hour.and_utc(), 0).is_ok());
}
