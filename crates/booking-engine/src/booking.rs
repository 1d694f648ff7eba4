//! Booking records as stored by the collaborator document store.
//!
//! Field names on the wire follow the stored document schema
//! (`clientName`, `callType`, `endDate`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarDate, ClockTime};
use crate::error::{EngineError, Result};

/// The two kinds of call a coach can book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallType {
    /// One-time 40 minute call.
    Onboarding,
    /// 20 minute call, optionally repeating weekly.
    FollowUp,
}

impl CallType {
    /// Fixed length of a call of this type.
    pub fn duration_minutes(&self) -> u16 {
        match self {
            CallType::Onboarding => 40,
            CallType::FollowUp => 20,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallType::Onboarding => "onboarding",
            CallType::FollowUp => "follow-up",
        }
    }
}

impl FromStr for CallType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "onboarding" => Ok(CallType::Onboarding),
            "follow-up" => Ok(CallType::FollowUp),
            other => Err(EngineError::InvalidCallType(other.to_string())),
        }
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage-assigned booking identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub String);

impl BookingId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BookingId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A client on the coach's list. The phone number is the practical key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    pub phone: String,
}

/// A booking that has not been written to storage yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub client_name: String,
    pub client_phone: String,
    pub call_type: CallType,
    /// Sole occurrence, or the first occurrence of a weekly series.
    pub date: CalendarDate,
    pub time: ClockTime,
    #[serde(default)]
    pub recurring: bool,
    /// Last date (inclusive) a weekly series applies. `None` runs forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<CalendarDate>,
}

impl NewBooking {
    /// Check the record-level invariants before it is handed to storage.
    ///
    /// # Errors
    /// - `RecurringOnboarding` if an onboarding call is marked recurring.
    /// - `EndDateWithoutRecurrence` if a one-off booking carries an end date.
    /// - `EndBeforeStart` if the end date precedes the anchor date.
    pub fn validate(&self) -> Result<()> {
        if self.recurring && self.call_type == CallType::Onboarding {
            return Err(EngineError::RecurringOnboarding);
        }
        match self.end_date {
            Some(_) if !self.recurring => Err(EngineError::EndDateWithoutRecurrence),
            Some(end) if end < self.date => Err(EngineError::EndBeforeStart {
                start: self.date.to_string(),
                end: end.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Attach a storage-assigned id.
    pub fn with_id(self, id: BookingId) -> Booking {
        Booking {
            id,
            client_name: self.client_name,
            client_phone: self.client_phone,
            call_type: self.call_type,
            date: self.date,
            time: self.time,
            recurring: self.recurring,
            end_date: self.end_date,
        }
    }
}

/// A stored booking. Immutable once created; removed wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub client_name: String,
    pub client_phone: String,
    pub call_type: CallType,
    pub date: CalendarDate,
    pub time: ClockTime,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<CalendarDate>,
}

impl Booking {
    /// Whether this record describes a weekly series.
    ///
    /// Onboarding calls never recur, even if a stored record claims otherwise.
    pub fn is_weekly_series(&self) -> bool {
        self.recurring && self.call_type == CallType::FollowUp
    }
}
