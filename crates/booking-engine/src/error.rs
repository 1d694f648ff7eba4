//! Error types for booking-engine operations.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}': expected HH:MM (24h)")]
    InvalidTime(String),

    #[error("Invalid call type '{0}': expected 'onboarding' or 'follow-up'")]
    InvalidCallType(String),

    #[error("{0} is not a bookable slot")]
    NotASlot(String),

    #[error("Onboarding calls cannot recur")]
    RecurringOnboarding,

    #[error("End date is only allowed on recurring bookings")]
    EndDateWithoutRecurrence,

    #[error("End date {end} is before the first occurrence {start}")]
    EndBeforeStart { start: String, end: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
