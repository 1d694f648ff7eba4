//! Lay a day's active bookings onto the slot grid and compute free slots.
//!
//! A booking is placed on the grid slot whose label equals its `time`. A slot
//! shows at most one booking; if several active bookings share a start time the
//! first in input order is shown.
//!
//! [`day_summary`] gives the headline counts shown above a day.

use serde::Serialize;

use crate::booking::{Booking, CallType};
use crate::calendar::{CalendarDate, ClockTime};
use crate::conflict;
use crate::expander::active_bookings;
use crate::slots::generate_time_slots;

/// One row of a rendered day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSlot {
    pub time: ClockTime,
    pub booking: Option<Booking>,
}

/// Counts of the calls active on a date, plus who is booked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: CalendarDate,
    pub total: usize,
    pub onboarding: usize,
    pub follow_up: usize,
    /// Active bookings ordered by start time.
    pub bookings: Vec<Booking>,
}

/// Summarize the bookings active on `date`, weekly occurrences included.
pub fn day_summary(date: CalendarDate, all: &[Booking]) -> DaySummary {
    let mut bookings = active_bookings(date, all);
    bookings.sort_by_key(|b| b.time);

    let onboarding = bookings
        .iter()
        .filter(|b| b.call_type == CallType::Onboarding)
        .count();

    DaySummary {
        date,
        total: bookings.len(),
        onboarding,
        follow_up: bookings.len() - onboarding,
        bookings,
    }
}

/// Build the full slot grid for `date` from the complete booking set.
pub fn day_grid(date: CalendarDate, all: &[Booking]) -> Vec<GridSlot> {
    let active = active_bookings(date, all);

    generate_time_slots()
        .into_iter()
        .map(|time| GridSlot {
            time,
            booking: active.iter().find(|b| b.time == time).cloned(),
        })
        .collect()
}

/// Slots on `date` where a new call of `call_type` would not overlap any
/// active booking. Returned in grid order.
pub fn free_slots(date: CalendarDate, call_type: CallType, all: &[Booking]) -> Vec<ClockTime> {
    let active = active_bookings(date, all);

    generate_time_slots()
        .into_iter()
        .filter(|&time| !conflict::overlaps(time, call_type, &active))
        .collect()
}

/// The earliest slot on `date` that can take a call of `call_type`.
pub fn first_free_slot(
    date: CalendarDate,
    call_type: CallType,
    all: &[Booking],
) -> Option<ClockTime> {
    free_slots(date, call_type, all).into_iter().next()
}
