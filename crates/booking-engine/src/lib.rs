//! # booking-engine
//!
//! Booking resolution for a single coach's daily call calendar.
//!
//! Two call types exist: one-time 40 minute onboarding calls and 20 minute
//! follow-ups that may repeat weekly. The engine answers two questions over an
//! immutable snapshot of stored bookings: which bookings occupy the calendar on
//! a given date, and whether a proposed call would overlap one of them.
//!
//! ## Modules
//!
//! - [`calendar`] — Timezone-naive `CalendarDate` and `ClockTime` values
//! - [`booking`] — Booking records, call types and clients
//! - [`expander`] — Which bookings (including weekly series) are active on a date
//! - [`conflict`] — Half-open overlap detection between calls on one day
//! - [`slots`] — The fixed 20 minute grid of bookable start times
//! - [`grid`] — Day grid rendering, day summaries and free slot search
//! - [`store`] — The storage collaborator interface and an in-memory store
//! - [`scheduler`] — The check-then-create booking workflow over a store
//! - [`error`] — Error types

pub mod booking;
pub mod calendar;
pub mod conflict;
pub mod error;
pub mod expander;
pub mod grid;
pub mod scheduler;
pub mod slots;
pub mod store;

pub use booking::{Booking, BookingId, CallType, Client, NewBooking};
pub use calendar::{CalendarDate, ClockTime};
pub use conflict::{find_client_booking, find_overlap, overlaps};
pub use error::EngineError;
pub use expander::{active_bookings, is_active_on, occurrences};
pub use grid::{day_grid, day_summary, first_free_slot, free_slots, DaySummary, GridSlot};
pub use scheduler::{BookingOutcome, BookingRequest, Rejection, Scheduler};
pub use slots::{generate_time_slots, is_canonical_slot};
pub use store::{highest_sequence_id, BookingStore, ClientStore, MemoryStore, StoreError};
