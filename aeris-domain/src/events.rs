use uuid::Uuid;

use crate::audit::BookingOutcome;

/// Published after every booking attempt, success or failure. Downstream
/// consumers (cache invalidation, analytics) key on the flight id.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingAttemptedEvent {
    pub flight_id: Uuid,
    pub outcome: BookingOutcome,
    pub seats: i32,
    pub occurred_at: i64,
}
