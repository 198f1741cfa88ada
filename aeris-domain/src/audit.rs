use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Final outcome of a booking attempt. The serialized strings are the wire
/// format shared by audit rows, published events, and HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingOutcome {
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "NOT_FOUND")]
    FlightNotFound,
    #[serde(rename = "INSUFFICIENT_SEATS")]
    InsufficientSeats,
    #[serde(rename = "CONFLICT")]
    ConflictExhausted,
}

impl BookingOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingOutcome::Confirmed => "CONFIRMED",
            BookingOutcome::FlightNotFound => "NOT_FOUND",
            BookingOutcome::InsufficientSeats => "INSUFFICIENT_SEATS",
            BookingOutcome::ConflictExhausted => "CONFLICT",
        }
    }
}

impl std::fmt::Display for BookingOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable log entry for one booking attempt, written regardless of
/// outcome.
///
/// `booked_before` is the booked count observed before the attempt (absent
/// when the flight was never found). `reservation_id` is populated only when
/// the attempt was confirmed and the reservation row was persisted; a
/// CONFIRMED record with `error_detail` set and no `reservation_id` marks a
/// seat increment whose reservation write failed and needs reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub flight_id: Uuid,
    pub contact_email: String,
    pub seats_requested: i32,
    pub booked_before: Option<i32>,
    pub outcome: BookingOutcome,
    pub error_detail: Option<String>,
    pub reservation_id: Option<Uuid>,
}
