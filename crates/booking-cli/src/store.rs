//! A JSON document file standing in for the booking/client document store.
//!
//! The whole document is read on open and rewritten on [`JsonFileStore::save`].
//! A missing file is an empty store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use booking_engine::{
    highest_sequence_id, Booking, BookingId, BookingStore, Client, ClientStore, NewBooking,
    StoreError,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    bookings: Vec<Booking>,
    #[serde(default)]
    clients: Vec<Client>,
    #[serde(default)]
    next_id: u64,
}

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    doc: Document,
}

impl JsonFileStore {
    pub fn open(path: &Path) -> Result<Self> {
        let mut doc: Document = if path.exists() {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read store: {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse store: {}", path.display()))?
        } else {
            debug!(path = %path.display(), "store file missing, starting empty");
            Document::default()
        };
        // Hand-edited or older documents may lack `next_id`.
        doc.next_id = doc.next_id.max(highest_sequence_id(&doc.bookings));
        Ok(Self {
            path: path.to_path_buf(),
            doc,
        })
    }

    /// Write the document back, via a sibling temp file so a crash never
    /// leaves a truncated store behind.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.doc)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .with_context(|| format!("Failed to write file: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace store: {}", self.path.display()))?;
        debug!(path = %self.path.display(), "store saved");
        Ok(())
    }

    pub fn find_client(&self, phone: &str) -> Option<&Client> {
        self.doc.clients.iter().find(|c| c.phone == phone)
    }

    pub fn find_booking(&self, id: &BookingId) -> Option<&Booking> {
        self.doc.bookings.iter().find(|b| &b.id == id)
    }
}

impl BookingStore for JsonFileStore {
    fn list_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        Ok(self.doc.bookings.clone())
    }

    fn create_booking(&mut self, booking: NewBooking) -> Result<Booking, StoreError> {
        self.doc.next_id += 1;
        let stored = booking.with_id(BookingId(format!("b-{}", self.doc.next_id)));
        self.doc.bookings.push(stored.clone());
        Ok(stored)
    }

    fn delete_booking(&mut self, id: &BookingId) -> Result<(), StoreError> {
        let before = self.doc.bookings.len();
        self.doc.bookings.retain(|b| &b.id != id);
        if self.doc.bookings.len() == before {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(())
    }
}

impl ClientStore for JsonFileStore {
    fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        let mut clients = self.doc.clients.clone();
        clients.sort_by(|a, b| a.phone.cmp(&b.phone));
        Ok(clients)
    }

    fn add_client(&mut self, client: Client) -> Result<(), StoreError> {
        match self.doc.clients.iter_mut().find(|c| c.phone == client.phone) {
            Some(existing) => existing.name = client.name,
            None => self.doc.clients.push(client),
        }
        Ok(())
    }

    fn remove_client(&mut self, phone: &str) -> Result<(), StoreError> {
        let before = self.doc.clients.len();
        self.doc.clients.retain(|c| c.phone != phone);
        if self.doc.clients.len() == before {
            return Err(StoreError::ClientNotFound(phone.to_string()));
        }
        Ok(())
    }
}
