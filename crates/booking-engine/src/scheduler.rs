//! The booking workflow: read a snapshot, resolve the day, validate, then write.
//!
//! The resolution functions are pure; this module is the thin layer that feeds
//! them from a [`BookingStore`] and turns their answers into outcomes. It holds
//! no lock: callers that share a store across threads must serialize `book`
//! calls themselves so the check-then-create sequence is not interleaved.

use serde::Serialize;
use tracing::{debug, info};

use crate::booking::{Booking, BookingId, CallType, Client, NewBooking};
use crate::calendar::{CalendarDate, ClockTime};
use crate::conflict::{find_client_booking, find_overlap};
use crate::error::{EngineError, Result};
use crate::expander::active_bookings;
use crate::grid::{day_grid, day_summary, DaySummary, GridSlot};
use crate::slots::is_canonical_slot;
use crate::store::BookingStore;

/// Everything needed to book a call for a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub client: Client,
    pub call_type: CallType,
    pub date: CalendarDate,
    pub time: ClockTime,
    /// Repeat weekly. Only meaningful for follow-ups.
    pub recurring: bool,
    pub end_date: Option<CalendarDate>,
}

impl BookingRequest {
    fn into_new_booking(self) -> NewBooking {
        NewBooking {
            client_name: self.client.name,
            client_phone: self.client.phone,
            call_type: self.call_type,
            date: self.date,
            time: self.time,
            recurring: self.recurring,
            end_date: self.end_date,
        }
    }
}

/// Why a well-formed request was turned down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// The requested time range intersects another call that day.
    Overlap { with: Booking },
    /// The client already has a call that day.
    ClientAlreadyBooked { existing: Booking },
    /// The client already holds a call of this type at this time on this date.
    ///
    /// Only reachable through a store whose `list_bookings_for_client_and_date`
    /// returns a record that `list_bookings` did not. With a consistent store
    /// the same record already triggers `ClientAlreadyBooked`.
    ClientSlotTaken { existing: Booking },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Overlap { with } => write!(
                f,
                "overlaps the {} call with {} at {}",
                with.call_type, with.client_name, with.time
            ),
            Rejection::ClientAlreadyBooked { existing } => write!(
                f,
                "{} already has a call on this date at {}",
                existing.client_name, existing.time
            ),
            Rejection::ClientSlotTaken { existing } => write!(
                f,
                "{} already holds this {} slot",
                existing.client_name, existing.call_type
            ),
        }
    }
}

/// Result of a booking attempt that got past input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    Booked(Booking),
    Rejected(Rejection),
}

/// Drives the resolution engine against a store.
#[derive(Debug)]
pub struct Scheduler<S> {
    store: S,
}

impl<S: BookingStore> Scheduler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Bookings active on `date`, fetched fresh from the store.
    pub fn active_on(&self, date: CalendarDate) -> Result<Vec<Booking>> {
        let all = self.store.list_bookings()?;
        Ok(active_bookings(date, &all))
    }

    /// The rendered slot grid for `date`.
    pub fn day(&self, date: CalendarDate) -> Result<Vec<GridSlot>> {
        let all = self.store.list_bookings()?;
        Ok(day_grid(date, &all))
    }

    /// Booking counts for `date`.
    pub fn summary(&self, date: CalendarDate) -> Result<DaySummary> {
        let all = self.store.list_bookings()?;
        Ok(day_summary(date, &all))
    }

    /// Validate `request` against the current bookings and create it if clear.
    ///
    /// # Errors
    /// Malformed requests fail loudly: `NotASlot` for a time off the grid, and
    /// the [`NewBooking::validate`] errors for recurrence misuse. Store failures
    /// are propagated. Business-rule rejections are returned as
    /// [`BookingOutcome::Rejected`].
    pub fn book(&mut self, request: BookingRequest) -> Result<BookingOutcome> {
        if !is_canonical_slot(request.time) {
            return Err(EngineError::NotASlot(request.time.to_string()));
        }
        let phone = request.client.phone.clone();
        let new_booking = request.into_new_booking();
        new_booking.validate()?;

        let day = self.active_on(new_booking.date)?;

        if let Some(with) = find_overlap(new_booking.time, new_booking.call_type, &day) {
            debug!(
                date = %new_booking.date,
                time = %new_booking.time,
                conflicting = %with.id,
                "booking rejected: overlap"
            );
            return Ok(BookingOutcome::Rejected(Rejection::Overlap { with: with.clone() }));
        }

        if let Some(existing) = find_client_booking(&phone, new_booking.date, &day) {
            debug!(
                date = %new_booking.date,
                client = %phone,
                existing = %existing.id,
                "booking rejected: client already booked that day"
            );
            return Ok(BookingOutcome::Rejected(Rejection::ClientAlreadyBooked {
                existing: existing.clone(),
            }));
        }

        // Backends may answer the narrowed query from a separate index.
        let same_date = self
            .store
            .list_bookings_for_client_and_date(&phone, new_booking.date)?;
        if let Some(existing) = same_date
            .into_iter()
            .find(|b| b.time == new_booking.time && b.call_type == new_booking.call_type)
        {
            debug!(
                date = %new_booking.date,
                client = %phone,
                existing = %existing.id,
                "booking rejected: client slot taken"
            );
            return Ok(BookingOutcome::Rejected(Rejection::ClientSlotTaken { existing }));
        }

        let booking = self.store.create_booking(new_booking)?;
        info!(
            id = %booking.id,
            date = %booking.date,
            time = %booking.time,
            call_type = %booking.call_type,
            recurring = booking.recurring,
            "booking created"
        );
        Ok(BookingOutcome::Booked(booking))
    }

    /// Delete a booking. A weekly series is removed as a whole.
    pub fn cancel(&mut self, id: &BookingId) -> Result<()> {
        self.store.delete_booking(id)?;
        info!(id = %id, "booking deleted");
        Ok(())
    }
}
