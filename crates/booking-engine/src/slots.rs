//! The fixed grid of bookable start times, identical for every day.

use crate::calendar::ClockTime;

/// Earliest bookable start (10:30), in minutes since midnight.
pub const FIRST_SLOT_MINUTES: u16 = 10 * 60 + 30;

/// Latest bookable start (19:30), in minutes since midnight.
pub const LAST_SLOT_MINUTES: u16 = 19 * 60 + 30;

pub const SLOT_STEP_MINUTES: u16 = 20;

/// Produce the ordered start-time labels `10:30, 10:50, ..., 19:30`.
///
/// Pure and restartable: every call returns the same 28 entries.
pub fn generate_time_slots() -> Vec<ClockTime> {
    let mut slots = Vec::new();
    let mut minutes = FIRST_SLOT_MINUTES;
    while minutes <= LAST_SLOT_MINUTES {
        if let Some(slot) = ClockTime::from_hm(minutes / 60, minutes % 60) {
            slots.push(slot);
        }
        minutes += SLOT_STEP_MINUTES;
    }
    slots
}

/// Whether `time` is one of the labels produced by [`generate_time_slots`].
pub fn is_canonical_slot(time: ClockTime) -> bool {
    let minutes = time.minutes();
    (FIRST_SLOT_MINUTES..=LAST_SLOT_MINUTES).contains(&minutes)
        && (minutes - FIRST_SLOT_MINUTES) % SLOT_STEP_MINUTES == 0
}
