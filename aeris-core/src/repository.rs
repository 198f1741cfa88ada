use async_trait::async_trait;
use std::error::Error;
use uuid::Uuid;

use aeris_domain::audit::AuditRecord;
use aeris_domain::events::BookingAttemptedEvent;
use aeris_domain::reservation::Passenger;

/// The scalar capacity state of one flight, read together with its version
/// stamp. The allocator decides availability from this triple alone; it
/// never loads the flight's reservations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightInventory {
    pub capacity: i32,
    pub booked: i32,
    pub version: i64,
}

impl FlightInventory {
    pub fn available(&self) -> i32 {
        self.capacity - self.booked
    }
}

/// Result of a version-checked write to a flight's booked count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionalWrite {
    /// The write was applied; `new_version` is the bumped version stamp.
    Applied { new_version: i64 },
    /// A concurrent writer changed the row since it was read.
    VersionMismatch,
    /// The flight does not exist.
    NotFound,
}

/// Versioned store for flight seat inventory.
///
/// `update_booked` must be atomic: it applies the new booked count only if
/// the row's current version still equals `expected_version`, and bumps the
/// version by exactly one when it does.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn read_flight(
        &self,
        flight_id: Uuid,
    ) -> Result<Option<FlightInventory>, Box<dyn Error + Send + Sync>>;

    async fn update_booked(
        &self,
        flight_id: Uuid,
        expected_version: i64,
        new_booked: i32,
    ) -> Result<ConditionalWrite, Box<dyn Error + Send + Sync>>;
}

/// Durable storage for confirmed reservations.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn create_reservation(
        &self,
        flight_id: Uuid,
        passenger: &Passenger,
        seats: i32,
    ) -> Result<Uuid, Box<dyn Error + Send + Sync>>;
}

/// Append-only sink for booking-attempt audit records.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn append(&self, record: &AuditRecord) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// Outbound channel for post-attempt notifications. At-most-once from the
/// caller's perspective; delivery guarantees are the channel's concern.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(
        &self,
        event: &BookingAttemptedEvent,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}
