use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use aeris_domain::audit::{AuditRecord, BookingOutcome};
use aeris_domain::events::BookingAttemptedEvent;
use aeris_domain::reservation::Passenger;

use crate::allocator::{AllocationOutcome, SeatAllocator};
use crate::audit::AuditRecorder;
use crate::repository::{AuditSink, EventPublisher, InventoryStore, ReservationStore};

/// A well-formed booking request handed to the core by the caller.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub flight_id: Uuid,
    pub passenger: Passenger,
    pub seats: i32,
}

#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    pub reservation_id: Uuid,
    pub seats: i32,
    pub booked_total: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("flight {0} not found")]
    FlightNotFound(Uuid),

    #[error("insufficient seats: requested {requested}, available {available}")]
    InsufficientSeats { requested: i32, available: i32 },

    #[error("seat allocation conflict not resolved after {attempts} attempts")]
    ConflictExhausted { attempts: u32 },

    #[error("reservation write failed after seats were committed: {0}")]
    ReservationPersist(String),

    #[error("inventory store failure: {0}")]
    Store(String),
}

/// Orchestrates one booking attempt: allocate seats, persist the reservation
/// on success, then append exactly one audit record and publish exactly one
/// event regardless of outcome.
pub struct BookingService {
    allocator: SeatAllocator,
    reservations: Arc<dyn ReservationStore>,
    audit: AuditRecorder,
    events: Arc<dyn EventPublisher>,
}

impl BookingService {
    pub fn new(
        inventory: Arc<dyn InventoryStore>,
        reservations: Arc<dyn ReservationStore>,
        audit_sink: Arc<dyn AuditSink>,
        events: Arc<dyn EventPublisher>,
        max_allocation_attempts: u32,
    ) -> Self {
        Self {
            allocator: SeatAllocator::new(inventory, max_allocation_attempts),
            reservations,
            audit: AuditRecorder::new(audit_sink),
            events,
        }
    }

    pub async fn book(
        &self,
        request: BookingRequest,
    ) -> Result<BookingConfirmation, BookingError> {
        let allocation = self
            .allocator
            .allocate(request.flight_id, request.seats)
            .await
            // The attempt never reached an outcome; nothing to audit.
            .map_err(|e| BookingError::Store(e.to_string()))?;

        let (outcome, booked_before) = match allocation {
            AllocationOutcome::Confirmed { booked_before, .. } => {
                (BookingOutcome::Confirmed, Some(booked_before))
            }
            AllocationOutcome::FlightNotFound => (BookingOutcome::FlightNotFound, None),
            AllocationOutcome::InsufficientSeats { booked_before, .. } => {
                (BookingOutcome::InsufficientSeats, Some(booked_before))
            }
            AllocationOutcome::ConflictExhausted { booked_before, .. } => {
                (BookingOutcome::ConflictExhausted, Some(booked_before))
            }
        };

        let result = match allocation {
            AllocationOutcome::Confirmed { booked_after, .. } => {
                match self
                    .reservations
                    .create_reservation(request.flight_id, &request.passenger, request.seats)
                    .await
                {
                    Ok(reservation_id) => Ok(BookingConfirmation {
                        reservation_id,
                        seats: request.seats,
                        booked_total: booked_after,
                    }),
                    // Seats are already committed; surfaced distinctly so
                    // operators can tell infrastructure inconsistency apart
                    // from a business rejection.
                    Err(e) => Err(BookingError::ReservationPersist(e.to_string())),
                }
            }
            AllocationOutcome::FlightNotFound => {
                Err(BookingError::FlightNotFound(request.flight_id))
            }
            AllocationOutcome::InsufficientSeats {
                requested,
                available,
                ..
            } => Err(BookingError::InsufficientSeats {
                requested,
                available,
            }),
            AllocationOutcome::ConflictExhausted { attempts, .. } => {
                Err(BookingError::ConflictExhausted { attempts })
            }
        };

        let (error_detail, reservation_id) = match &result {
            Ok(confirmation) => (None, Some(confirmation.reservation_id)),
            Err(e) => (Some(e.to_string()), None),
        };

        self.audit
            .record(AuditRecord {
                id: Uuid::new_v4(),
                recorded_at: Utc::now(),
                flight_id: request.flight_id,
                contact_email: request.passenger.contact_email.clone(),
                seats_requested: request.seats,
                booked_before,
                outcome,
                error_detail,
                reservation_id,
            })
            .await;

        let event = BookingAttemptedEvent {
            flight_id: request.flight_id,
            outcome,
            seats: request.seats,
            occurred_at: Utc::now().timestamp(),
        };
        if let Err(e) = self.events.publish(&event).await {
            tracing::warn!(
                flight_id = %request.flight_id,
                outcome = %outcome,
                "failed to publish booking attempt event: {}",
                e
            );
        }

        result
    }
}
