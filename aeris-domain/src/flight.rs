use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled flight with a finite seat inventory.
///
/// `booked` and `version` form the compare-and-swap pair: every successful
/// seat allocation bumps `version` by exactly one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub origin_city: String,
    pub destination_city: String,
    pub price_amount: i32,
    pub price_currency: String,
    pub duration_minutes: i32,
    pub capacity: i32,
    pub booked: i32,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flight {
    pub fn available_seats(&self) -> i32 {
        self.capacity - self.booked
    }

    pub fn has_available_seats(&self, requested: i32) -> bool {
        self.available_seats() >= requested
    }
}

/// Payload for creating a flight. `booked` starts at 0, `version` at 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFlight {
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub origin_city: String,
    pub destination_city: String,
    pub price_amount: i32,
    pub price_currency: String,
    pub duration_minutes: i32,
    pub capacity: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightSort {
    Price,
    Departure,
}

/// Read-only search filter; all criteria optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightQuery {
    pub origin_city: Option<String>,
    pub destination_city: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub sort: Option<FlightSort>,
}

/// A search result row: flight details plus remaining seats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightOption {
    pub flight_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub origin_city: String,
    pub destination_city: String,
    pub price_amount: i32,
    pub price_currency: String,
    pub duration_minutes: i32,
    pub available_seats: i32,
}
