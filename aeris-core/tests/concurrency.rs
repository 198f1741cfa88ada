//! Concurrent booking scenarios against the in-memory versioned store.
//!
//! Correctness here comes entirely from the store's conditional write; the
//! tasks share no mutex and are released together through a barrier to
//! maximize interleaving.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Barrier;
use uuid::Uuid;

use aeris_core::booking::{BookingError, BookingRequest, BookingService};
use aeris_core::memory::{
    MemoryAuditSink, MemoryEventLog, MemoryInventoryStore, MemoryReservationStore,
};
use aeris_domain::audit::BookingOutcome;
use aeris_domain::reservation::Passenger;

struct Harness {
    inventory: Arc<MemoryInventoryStore>,
    reservations: Arc<MemoryReservationStore>,
    audit: Arc<MemoryAuditSink>,
    events: Arc<MemoryEventLog>,
    service: Arc<BookingService>,
}

fn harness(max_attempts: u32) -> Harness {
    let inventory = Arc::new(MemoryInventoryStore::new());
    let reservations = Arc::new(MemoryReservationStore::new());
    let audit = Arc::new(MemoryAuditSink::new());
    let events = Arc::new(MemoryEventLog::new());
    let service = Arc::new(BookingService::new(
        inventory.clone(),
        reservations.clone(),
        audit.clone(),
        events.clone(),
        max_attempts,
    ));
    Harness {
        inventory,
        reservations,
        audit,
        events,
        service,
    }
}

fn request(flight_id: Uuid, i: usize, seats: i32) -> BookingRequest {
    BookingRequest {
        flight_id,
        passenger: Passenger {
            family_name: "Test".to_string(),
            given_name: format!("User{}", i),
            contact_email: format!("user{}@email.com", i),
        },
        seats,
    }
}

async fn run_concurrent(
    h: &Harness,
    flight_id: Uuid,
    callers: usize,
    seats: i32,
) -> Vec<Result<i32, BookingError>> {
    let barrier = Arc::new(Barrier::new(callers));
    let mut handles = Vec::with_capacity(callers);

    for i in 0..callers {
        let service = h.service.clone();
        let barrier = barrier.clone();
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            service
                .book(request(flight_id, i, seats))
                .await
                .map(|c| c.seats)
        }));
    }

    let mut results = Vec::with_capacity(callers);
    for handle in handles {
        results.push(handle.await.expect("booking task panicked"));
    }
    results
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn five_callers_for_three_seats_on_a_ten_seat_flight() {
    // Capacity 10, five simultaneous 3-seat requests: exactly three can win
    // (booked = 9, one seat left), the other two see insufficient capacity.
    let h = harness(10);
    let flight_id = h.inventory.insert_flight(10);

    let results = run_concurrent(&h, flight_id, 5, 3).await;

    let confirmed = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|r| {
            matches!(
                r,
                Err(BookingError::InsufficientSeats {
                    requested: 3,
                    available,
                }) if *available < 3
            )
        })
        .count();

    assert_eq!(confirmed, 3);
    assert_eq!(rejected, 2);
    assert_eq!(h.inventory.booked(flight_id), Some(9));
    assert_eq!(h.reservations.reservations().len(), 3);
    assert_eq!(h.audit.records().len(), 5);
    assert_eq!(h.events.events().len(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn booked_never_exceeds_capacity_and_equals_confirmed_sum() {
    let h = harness(20);
    let flight_id = h.inventory.insert_flight(12);

    let results = run_concurrent(&h, flight_id, 8, 2).await;

    let confirmed_seats: i32 = results.iter().filter_map(|r| r.as_ref().ok()).sum();
    let booked = h.inventory.booked(flight_id).unwrap();

    assert!(booked <= 12);
    assert_eq!(booked, confirmed_seats);
    // floor(12 / 2) = 6 winners, deterministically.
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn single_seat_stampede_fills_the_flight_exactly() {
    let h = harness(30);
    let flight_id = h.inventory.insert_flight(4);

    let results = run_concurrent(&h, flight_id, 10, 1).await;

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 4);
    assert_eq!(h.inventory.booked(flight_id), Some(4));
    assert_eq!(h.reservations.reservations().len(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn audit_outcomes_match_returned_outcomes_one_for_one() {
    let h = harness(10);
    let flight_id = h.inventory.insert_flight(10);

    let results = run_concurrent(&h, flight_id, 5, 3).await;

    let mut returned: HashMap<&'static str, usize> = HashMap::new();
    for result in &results {
        let key = match result {
            Ok(_) => BookingOutcome::Confirmed.as_str(),
            Err(BookingError::InsufficientSeats { .. }) => {
                BookingOutcome::InsufficientSeats.as_str()
            }
            Err(BookingError::FlightNotFound(_)) => BookingOutcome::FlightNotFound.as_str(),
            Err(BookingError::ConflictExhausted { .. }) => {
                BookingOutcome::ConflictExhausted.as_str()
            }
            Err(other) => panic!("unexpected error: {}", other),
        };
        *returned.entry(key).or_default() += 1;
    }

    let mut audited: HashMap<&'static str, usize> = HashMap::new();
    for record in h.audit.records() {
        *audited.entry(record.outcome.as_str()).or_default() += 1;
    }

    assert_eq!(returned, audited);

    // Confirmed audit records carry a reservation id; rejections do not.
    for record in h.audit.records() {
        match record.outcome {
            BookingOutcome::Confirmed => assert!(record.reservation_id.is_some()),
            _ => assert!(record.reservation_id.is_none()),
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_attempts_on_independent_flights_do_not_interfere() {
    let h = harness(10);
    let flight_a = h.inventory.insert_flight(6);
    let flight_b = h.inventory.insert_flight(6);

    let (results_a, results_b) = tokio::join!(
        run_concurrent(&h, flight_a, 4, 2),
        run_concurrent(&h, flight_b, 4, 2),
    );

    assert_eq!(results_a.iter().filter(|r| r.is_ok()).count(), 3);
    assert_eq!(results_b.iter().filter(|r| r.is_ok()).count(), 3);
    assert_eq!(h.inventory.booked(flight_a), Some(6));
    assert_eq!(h.inventory.booked(flight_b), Some(6));
    assert_eq!(h.audit.records().len(), 8);
}
