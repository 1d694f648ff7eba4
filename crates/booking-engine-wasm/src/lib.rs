//! WASM bindings for booking-engine.
//!
//! Exposes series expansion, overlap checks and the slot grid to the browser
//! calendar via `wasm-bindgen`. Bookings cross the boundary as JSON strings in
//! the stored document shape (`clientName`, `callType`, `endDate`, ...), and
//! results come back as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p booking-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/pkg/ \
//!   target/wasm32-unknown-unknown/release/booking_engine_wasm.wasm
//! ```

use booking_engine::{Booking, CalendarDate, CallType, ClockTime};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: parse boundary inputs, failing loudly on malformed values
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<CalendarDate, String> {
    s.parse().map_err(|e: booking_engine::EngineError| e.to_string())
}

fn parse_time(s: &str) -> Result<ClockTime, String> {
    s.parse().map_err(|e: booking_engine::EngineError| e.to_string())
}

fn parse_call_type(s: &str) -> Result<CallType, String> {
    s.parse().map_err(|e: booking_engine::EngineError| e.to_string())
}

/// Convert a JSON array of stored booking documents into `Vec<Booking>`.
fn parse_bookings_json(json: &str) -> Result<Vec<Booking>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid bookings JSON: {}", e))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

// ---------------------------------------------------------------------------
// Plain-Rust implementations (testable off-wasm)
// ---------------------------------------------------------------------------

fn active_bookings_impl(date: &str, bookings_json: &str) -> Result<String, String> {
    let date = parse_date(date)?;
    let all = parse_bookings_json(bookings_json)?;
    to_json(&booking_engine::active_bookings(date, &all))
}

fn find_overlap_impl(time: &str, call_type: &str, bookings_json: &str) -> Result<String, String> {
    let time = parse_time(time)?;
    let call_type = parse_call_type(call_type)?;
    let day = parse_bookings_json(bookings_json)?;
    to_json(&booking_engine::find_overlap(time, call_type, &day))
}

fn overlaps_impl(time: &str, call_type: &str, bookings_json: &str) -> Result<bool, String> {
    let time = parse_time(time)?;
    let call_type = parse_call_type(call_type)?;
    let day = parse_bookings_json(bookings_json)?;
    Ok(booking_engine::overlaps(time, call_type, &day))
}

fn generate_time_slots_impl() -> Result<String, String> {
    to_json(&booking_engine::generate_time_slots())
}

fn day_grid_impl(date: &str, bookings_json: &str) -> Result<String, String> {
    let date = parse_date(date)?;
    let all = parse_bookings_json(bookings_json)?;
    to_json(&booking_engine::day_grid(date, &all))
}

fn day_summary_impl(date: &str, bookings_json: &str) -> Result<String, String> {
    let date = parse_date(date)?;
    let all = parse_bookings_json(bookings_json)?;
    to_json(&booking_engine::day_summary(date, &all))
}

fn free_slots_impl(date: &str, call_type: &str, bookings_json: &str) -> Result<String, String> {
    let date = parse_date(date)?;
    let call_type = parse_call_type(call_type)?;
    let all = parse_bookings_json(bookings_json)?;
    to_json(&booking_engine::free_slots(date, call_type, &all))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Bookings from `bookingsJson` that occupy a slot on `date` (`YYYY-MM-DD`).
///
/// Returns a JSON array of booking documents, in input order.
#[wasm_bindgen(js_name = "activeBookings")]
pub fn active_bookings(date: &str, bookings_json: &str) -> Result<String, JsValue> {
    active_bookings_impl(date, bookings_json).map_err(js_err)
}

/// Whether a `callType` call starting at `time` (`HH:MM`) overlaps any booking
/// in `bookingsJson`, which should already be narrowed to one day.
#[wasm_bindgen]
pub fn overlaps(time: &str, call_type: &str, bookings_json: &str) -> Result<bool, JsValue> {
    overlaps_impl(time, call_type, bookings_json).map_err(js_err)
}

/// Like [`overlaps`], but returns the first conflicting booking as JSON, or
/// `null` when the slot is clear.
#[wasm_bindgen(js_name = "findOverlap")]
pub fn find_overlap(time: &str, call_type: &str, bookings_json: &str) -> Result<String, JsValue> {
    find_overlap_impl(time, call_type, bookings_json).map_err(js_err)
}

/// The bookable start times for any day, as a JSON array of `HH:MM` strings.
#[wasm_bindgen(js_name = "generateTimeSlots")]
pub fn generate_time_slots() -> Result<String, JsValue> {
    generate_time_slots_impl().map_err(js_err)
}

/// The slot grid for `date`: a JSON array of `{time, booking}` rows where
/// `booking` is a booking document or `null`.
#[wasm_bindgen(js_name = "dayGrid")]
pub fn day_grid(date: &str, bookings_json: &str) -> Result<String, JsValue> {
    day_grid_impl(date, bookings_json).map_err(js_err)
}

/// Booking counts for `date`: `total`, `onboarding`, `followUp` and the
/// active `bookings` in start time order.
#[wasm_bindgen(js_name = "daySummary")]
pub fn day_summary(date: &str, bookings_json: &str) -> Result<String, JsValue> {
    day_summary_impl(date, bookings_json).map_err(js_err)
}

/// Slots on `date` that can take a new `callType` call, as a JSON array of
/// `HH:MM` strings.
#[wasm_bindgen(js_name = "freeSlots")]
pub fn free_slots(date: &str, call_type: &str, bookings_json: &str) -> Result<String, JsValue> {
    free_slots_impl(date, call_type, bookings_json).map_err(js_err)
}
