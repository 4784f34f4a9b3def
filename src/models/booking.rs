use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::snapshot::EntityId;

/// Booking request submitted from the booking form. Fields the form adds beyond
/// the known ones are kept in `extra` and echoed back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<EntityId>,
    #[serde(
        default,
        rename = "name_for_reservation",
        skip_serializing_if = "Option::is_none"
    )]
    pub guest_name: Option<String>,
    #[serde(default, rename = "num_people", skip_serializing_if = "Option::is_none")]
    pub party_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seating_time: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<FixedOffset>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub success: bool,
    pub id: String,
    #[serde(flatten)]
    pub booking: NewBooking,
}

impl BookingConfirmation {
    /// Successful confirmation for a booking that never reached a server.
    /// An `id` or `success` already present in the payload is echoed instead
    /// of the generated value.
    pub fn local(mut booking: NewBooking) -> Self {
        let success = match booking.extra.remove("success") {
            Some(Value::Bool(success)) => success,
            Some(other) => {
                booking.extra.insert("success".to_string(), other);
                true
            }
            None => true,
        };
        let id = match booking.extra.remove("id") {
            Some(Value::String(id)) => id,
            Some(other) => {
                booking.extra.insert("id".to_string(), other);
                next_booking_id()
            }
            None => next_booking_id(),
        };
        Self {
            success,
            id,
            booking,
        }
    }
}

static LAST_BOOKING_MILLIS: AtomicI64 = AtomicI64::new(0);

/// `booking-<epoch millis>`, strictly increasing within the process.
pub fn next_booking_id() -> String {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_BOOKING_MILLIS.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_BOOKING_MILLIS.compare_exchange_weak(
            last,
            next,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return format!("booking-{next}"),
            Err(actual) => last = actual,
        }
    }
}
