//! Detect overlapping calls on a single day.
//!
//! Every call occupies the half-open minute range `[start, start + duration)`,
//! with the duration fixed by its call type. Back-to-back calls (one starts
//! exactly when another ends) are NOT conflicts.
//!
//! The scans here take bookings already narrowed to one day (see
//! [`crate::expander::active_bookings`]) and return the offending booking rather
//! than a bare flag, so callers can say which call is in the way.

use crate::booking::{Booking, CallType};
use crate::calendar::{CalendarDate, ClockTime};
use crate::expander::is_active_on;

/// A half-open range of minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: u16,
    pub end: u16,
}

impl Interval {
    /// The range a call of `call_type` starting at `time` occupies.
    pub fn of(time: ClockTime, call_type: CallType) -> Self {
        let start = time.minutes();
        Self {
            start,
            end: start + call_type.duration_minutes(),
        }
    }

    pub fn of_booking(booking: &Booking) -> Self {
        Self::of(booking.time, booking.call_type)
    }

    /// Two ranges overlap iff `a.start < b.end && a.end > b.start`.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Find the first booking in `existing` whose call overlaps a candidate call of
/// `call_type` starting at `time`.
pub fn find_overlap<'a>(
    time: ClockTime,
    call_type: CallType,
    existing: &'a [Booking],
) -> Option<&'a Booking> {
    let candidate = Interval::of(time, call_type);
    existing
        .iter()
        .find(|booking| candidate.overlaps(&Interval::of_booking(booking)))
}

/// Whether a candidate call overlaps any booking in `existing`.
pub fn overlaps(time: ClockTime, call_type: CallType, existing: &[Booking]) -> bool {
    find_overlap(time, call_type, existing).is_some()
}

/// Find a booking for the client with `phone` among the bookings active on `date`.
///
/// `day_bookings` should be the output of
/// [`active_bookings`](crate::expander::active_bookings) for `date`; a client
/// holds at most one call per day.
pub fn find_client_booking<'a>(
    phone: &str,
    date: CalendarDate,
    day_bookings: &'a [Booking],
) -> Option<&'a Booking> {
    day_bookings
        .iter()
        .find(|booking| booking.client_phone == phone && is_active_on(booking, date))
}
