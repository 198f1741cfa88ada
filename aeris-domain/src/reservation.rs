use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Passenger identity captured with a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub family_name: String,
    pub given_name: String,
    pub contact_email: String,
}

impl Passenger {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

/// A confirmed seat reservation. Created exactly once per confirmed booking
/// attempt, immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub flight_id: Uuid,
    pub passenger: Passenger,
    pub seats: i32,
    pub created_at: DateTime<Utc>,
}
