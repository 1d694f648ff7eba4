//! The storage collaborator the engine is driven from.
//!
//! Storage is a plain document store: bookings are keyed by a generated id and
//! clients by phone number. The engine only needs list, insert and delete; it
//! never updates a record in place.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::booking::{Booking, BookingId, Client, NewBooking};
use crate::calendar::CalendarDate;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No booking with id '{0}'")]
    NotFound(BookingId),

    #[error("No client with phone '{0}'")]
    ClientNotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Booking records, as the engine sees them.
pub trait BookingStore {
    /// Full snapshot of every stored booking.
    fn list_bookings(&self) -> Result<Vec<Booking>, StoreError>;

    /// Bookings whose stored anchor `date` equals `date` for the client with `phone`.
    ///
    /// This is a raw field match; recurring series anchored on other dates are
    /// not included.
    fn list_bookings_for_client_and_date(
        &self,
        phone: &str,
        date: CalendarDate,
    ) -> Result<Vec<Booking>, StoreError> {
        Ok(self
            .list_bookings()?
            .into_iter()
            .filter(|b| b.client_phone == phone && b.date == date)
            .collect())
    }

    /// Persist `booking` and return it with its newly assigned id.
    fn create_booking(&mut self, booking: NewBooking) -> Result<Booking, StoreError>;

    /// Remove a booking. For a weekly series this removes every occurrence.
    fn delete_booking(&mut self, id: &BookingId) -> Result<(), StoreError>;
}

/// The coach's client list.
pub trait ClientStore {
    /// Every client, ordered by phone number.
    fn list_clients(&self) -> Result<Vec<Client>, StoreError>;

    /// Add `client`, replacing any existing client with the same phone.
    fn add_client(&mut self, client: Client) -> Result<(), StoreError>;

    fn remove_client(&mut self, phone: &str) -> Result<(), StoreError>;
}

/// The largest `N` among `b-N` booking ids, or 0 if there are none.
///
/// Stores that hand out `b-N` ids resume from here so a reloaded store never
/// reissues an id already in use.
pub fn highest_sequence_id(bookings: &[Booking]) -> u64 {
    bookings
        .iter()
        .filter_map(|b| b.id.as_str().strip_prefix("b-")?.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
}

/// In-process store. Ids are `b-1`, `b-2`, ... in creation order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    bookings: Vec<Booking>,
    clients: BTreeMap<String, Client>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with already-identified bookings.
    ///
    /// New ids continue after the highest numeric `b-N` id present.
    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        let next_id = highest_sequence_id(&bookings);
        Self {
            bookings,
            clients: BTreeMap::new(),
            next_id,
        }
    }
}

impl BookingStore for MemoryStore {
    fn list_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        Ok(self.bookings.clone())
    }

    fn create_booking(&mut self, booking: NewBooking) -> Result<Booking, StoreError> {
        self.next_id += 1;
        let stored = booking.with_id(BookingId(format!("b-{}", self.next_id)));
        self.bookings.push(stored.clone());
        Ok(stored)
    }

    fn delete_booking(&mut self, id: &BookingId) -> Result<(), StoreError> {
        let before = self.bookings.len();
        self.bookings.retain(|b| &b.id != id);
        if self.bookings.len() == before {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(())
    }
}

impl ClientStore for MemoryStore {
    fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        Ok(self.clients.values().cloned().collect())
    }

    fn add_client(&mut self, client: Client) -> Result<(), StoreError> {
        self.clients.insert(client.phone.clone(), client);
        Ok(())
    }

    fn remove_client(&mut self, phone: &str) -> Result<(), StoreError> {
        self.clients
            .remove(phone)
            .map(|_| ())
            .ok_or_else(|| StoreError::ClientNotFound(phone.to_string()))
    }
}
