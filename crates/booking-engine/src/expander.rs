//! Series expansion -- decides which stored bookings occupy a slot on a given date.
//!
//! Each booking is resolved on its own; there is no interaction between bookings.
//!
//! - One-off bookings (every onboarding call, and follow-ups without recurrence)
//!   are active only on their exact `date`.
//! - Weekly follow-ups are active on every date that shares the anchor's weekday,
//!   from the anchor date through `end_date` (both inclusive), or forever when no
//!   end date is set.

use crate::booking::Booking;
use crate::calendar::CalendarDate;

/// Whether `booking` occupies a slot on `date`.
pub fn is_active_on(booking: &Booking, date: CalendarDate) -> bool {
    if !booking.is_weekly_series() {
        return booking.date == date;
    }

    date.weekday() == booking.date.weekday()
        && date >= booking.date
        && booking.end_date.is_none_or(|end| date <= end)
}

/// Return the bookings from `all` that are active on `date`, in input order.
///
/// The time each returned booking occupies is its `time` field, unchanged
/// across every occurrence of a series.
pub fn active_bookings(date: CalendarDate, all: &[Booking]) -> Vec<Booking> {
    all.iter()
        .filter(|booking| is_active_on(booking, date))
        .cloned()
        .collect()
}

/// List the dates in `[from, to]` (inclusive) on which `booking` occurs.
///
/// A one-off booking yields at most one date. A weekly series steps seven days
/// at a time from whichever is later of its anchor and `from`, aligned to the
/// anchor's weekday, and stops at `to` or the series end date.
pub fn occurrences(booking: &Booking, from: CalendarDate, to: CalendarDate) -> Vec<CalendarDate> {
    if from > to {
        return Vec::new();
    }

    if !booking.is_weekly_series() {
        return if booking.date >= from && booking.date <= to {
            vec![booking.date]
        } else {
            Vec::new()
        };
    }

    let last = match booking.end_date {
        Some(end) => end.min(to),
        None => to,
    };

    // First occurrence on or after `from`.
    let mut cursor = if booking.date >= from {
        booking.date
    } else {
        let behind = (from.as_naive() - booking.date.as_naive()).num_days();
        let weeks = (behind + 6) / 7;
        match booking.date.add_days(weeks * 7) {
            Some(date) => date,
            None => return Vec::new(),
        }
    };

    let mut dates = Vec::new();
    while cursor <= last {
        dates.push(cursor);
        cursor = match cursor.add_days(7) {
            Some(next) => next,
            None => break,
        };
    }
    dates
}
