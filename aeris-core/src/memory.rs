use std::collections::HashMap;
use std::error::Error;
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use aeris_domain::audit::AuditRecord;
use aeris_domain::events::BookingAttemptedEvent;
use aeris_domain::reservation::{Passenger, Reservation};

use crate::repository::{
    AuditSink, ConditionalWrite, EventPublisher, FlightInventory, InventoryStore,
    ReservationStore,
};

/// In-memory versioned inventory store. Mirrors the durable store's
/// compare-and-swap semantics: a write applies only against the expected
/// version and bumps it by one.
pub struct MemoryInventoryStore {
    flights: RwLock<HashMap<Uuid, FlightInventory>>,
}

impl MemoryInventoryStore {
    pub fn new() -> Self {
        Self {
            flights: RwLock::new(HashMap::new()),
        }
    }

    /// Register a flight with `booked = 0`, returning its id.
    pub fn insert_flight(&self, capacity: i32) -> Uuid {
        self.insert_flight_with_booked(capacity, 0)
    }

    pub fn insert_flight_with_booked(&self, capacity: i32, booked: i32) -> Uuid {
        let id = Uuid::new_v4();
        self.flights.write().unwrap().insert(
            id,
            FlightInventory {
                capacity,
                booked,
                version: 0,
            },
        );
        id
    }

    pub fn booked(&self, flight_id: Uuid) -> Option<i32> {
        self.flights
            .read()
            .unwrap()
            .get(&flight_id)
            .map(|inv| inv.booked)
    }
}

impl Default for MemoryInventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryStore for MemoryInventoryStore {
    async fn read_flight(
        &self,
        flight_id: Uuid,
    ) -> Result<Option<FlightInventory>, Box<dyn Error + Send + Sync>> {
        Ok(self.flights.read().unwrap().get(&flight_id).copied())
    }

    async fn update_booked(
        &self,
        flight_id: Uuid,
        expected_version: i64,
        new_booked: i32,
    ) -> Result<ConditionalWrite, Box<dyn Error + Send + Sync>> {
        let mut flights = self.flights.write().unwrap();
        match flights.get_mut(&flight_id) {
            Some(inv) if inv.version == expected_version => {
                inv.booked = new_booked;
                inv.version += 1;
                Ok(ConditionalWrite::Applied {
                    new_version: inv.version,
                })
            }
            Some(_) => Ok(ConditionalWrite::VersionMismatch),
            None => Ok(ConditionalWrite::NotFound),
        }
    }
}

/// In-memory reservation store recording every created reservation.
pub struct MemoryReservationStore {
    reservations: Mutex<Vec<Reservation>>,
}

impl MemoryReservationStore {
    pub fn new() -> Self {
        Self {
            reservations: Mutex::new(Vec::new()),
        }
    }

    pub fn reservations(&self) -> Vec<Reservation> {
        self.reservations.lock().unwrap().clone()
    }
}

impl Default for MemoryReservationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationStore for MemoryReservationStore {
    async fn create_reservation(
        &self,
        flight_id: Uuid,
        passenger: &Passenger,
        seats: i32,
    ) -> Result<Uuid, Box<dyn Error + Send + Sync>> {
        let reservation = Reservation {
            id: Uuid::new_v4(),
            flight_id,
            passenger: passenger.clone(),
            seats,
            created_at: Utc::now(),
        };
        let id = reservation.id;
        self.reservations.lock().unwrap().push(reservation);
        Ok(id)
    }
}

/// In-memory append-only audit sink.
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for MemoryAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn append(&self, record: &AuditRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// In-memory event channel capturing published notifications.
pub struct MemoryEventLog {
    events: Mutex<Vec<BookingAttemptedEvent>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<BookingAttemptedEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Default for MemoryEventLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for MemoryEventLog {
    async fn publish(
        &self,
        event: &BookingAttemptedEvent,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}
