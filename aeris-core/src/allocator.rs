use std::sync::Arc;

use uuid::Uuid;

use crate::repository::{ConditionalWrite, InventoryStore};

/// Outcome of one allocation attempt. `booked_before` is the booked count
/// observed on the last read, kept for the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationOutcome {
    Confirmed {
        booked_before: i32,
        booked_after: i32,
        version: i64,
    },
    FlightNotFound,
    InsufficientSeats {
        requested: i32,
        available: i32,
        booked_before: i32,
    },
    ConflictExhausted {
        attempts: u32,
        booked_before: i32,
    },
}

/// Reserves seats against a flight's finite capacity using optimistic
/// concurrency: read the versioned row, validate availability, then commit
/// through a conditional write. A version conflict means a concurrent writer
/// won the race; the loop re-reads and re-validates from fresh state, up to
/// `max_attempts` times. No lock is ever held across the read/write pair.
pub struct SeatAllocator {
    inventory: Arc<dyn InventoryStore>,
    max_attempts: u32,
}

impl SeatAllocator {
    pub fn new(inventory: Arc<dyn InventoryStore>, max_attempts: u32) -> Self {
        Self {
            inventory,
            max_attempts: max_attempts.max(1),
        }
    }

    pub async fn allocate(
        &self,
        flight_id: Uuid,
        requested: i32,
    ) -> Result<AllocationOutcome, Box<dyn std::error::Error + Send + Sync>> {
        let mut last_booked = 0;

        for attempt in 1..=self.max_attempts {
            let inventory = match self.inventory.read_flight(flight_id).await? {
                Some(inv) => inv,
                None => return Ok(AllocationOutcome::FlightNotFound),
            };
            last_booked = inventory.booked;

            // Business rejection, not a race: retrying cannot create seats.
            let available = inventory.available();
            if available < requested {
                return Ok(AllocationOutcome::InsufficientSeats {
                    requested,
                    available,
                    booked_before: inventory.booked,
                });
            }

            let new_booked = inventory.booked + requested;
            match self
                .inventory
                .update_booked(flight_id, inventory.version, new_booked)
                .await?
            {
                ConditionalWrite::Applied { new_version } => {
                    return Ok(AllocationOutcome::Confirmed {
                        booked_before: inventory.booked,
                        booked_after: new_booked,
                        version: new_version,
                    });
                }
                ConditionalWrite::VersionMismatch => {
                    tracing::debug!(
                        %flight_id,
                        attempt,
                        max_attempts = self.max_attempts,
                        "seat allocation lost version race, retrying"
                    );
                }
                // Row vanished between read and write; treat as not found.
                ConditionalWrite::NotFound => return Ok(AllocationOutcome::FlightNotFound),
            }
        }

        Ok(AllocationOutcome::ConflictExhausted {
            attempts: self.max_attempts,
            booked_before: last_booked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryInventoryStore;
    use crate::repository::FlightInventory;
    use async_trait::async_trait;
    use std::error::Error;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn unknown_flight_is_not_found_without_retry() {
        let store = Arc::new(MemoryInventoryStore::new());
        let allocator = SeatAllocator::new(store, 3);

        let outcome = allocator.allocate(Uuid::new_v4(), 1).await.unwrap();
        assert_eq!(outcome, AllocationOutcome::FlightNotFound);
    }

    #[tokio::test]
    async fn exact_remaining_seats_succeed() {
        let store = Arc::new(MemoryInventoryStore::new());
        let flight_id = store.insert_flight_with_booked(10, 7);
        let allocator = SeatAllocator::new(store.clone(), 3);

        let outcome = allocator.allocate(flight_id, 3).await.unwrap();
        assert_eq!(
            outcome,
            AllocationOutcome::Confirmed {
                booked_before: 7,
                booked_after: 10,
                version: 1,
            }
        );
        assert_eq!(store.booked(flight_id), Some(10));
    }

    #[tokio::test]
    async fn one_seat_over_remaining_is_rejected() {
        let store = Arc::new(MemoryInventoryStore::new());
        let flight_id = store.insert_flight_with_booked(10, 7);
        let allocator = SeatAllocator::new(store.clone(), 3);

        let outcome = allocator.allocate(flight_id, 4).await.unwrap();
        assert_eq!(
            outcome,
            AllocationOutcome::InsufficientSeats {
                requested: 4,
                available: 3,
                booked_before: 7,
            }
        );
        // Rejection leaves the counter untouched.
        assert_eq!(store.booked(flight_id), Some(7));
    }

    #[tokio::test]
    async fn nearly_full_flight_rejects_two_seat_request() {
        let store = Arc::new(MemoryInventoryStore::new());
        let flight_id = store.insert_flight_with_booked(180, 179);
        let allocator = SeatAllocator::new(store, 3);

        let outcome = allocator.allocate(flight_id, 2).await.unwrap();
        assert_eq!(
            outcome,
            AllocationOutcome::InsufficientSeats {
                requested: 2,
                available: 1,
                booked_before: 179,
            }
        );
    }

    #[tokio::test]
    async fn rejection_is_idempotent_without_state_change() {
        let store = Arc::new(MemoryInventoryStore::new());
        let flight_id = store.insert_flight_with_booked(10, 9);
        let allocator = SeatAllocator::new(store, 5);

        let first = allocator.allocate(flight_id, 2).await.unwrap();
        let second = allocator.allocate(flight_id, 2).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn version_bumps_by_one_per_successful_write() {
        let store = Arc::new(MemoryInventoryStore::new());
        let flight_id = store.insert_flight(100);
        let allocator = SeatAllocator::new(store.clone(), 3);

        for expected_version in 1..=3 {
            let outcome = allocator.allocate(flight_id, 5).await.unwrap();
            match outcome {
                AllocationOutcome::Confirmed { version, .. } => {
                    assert_eq!(version, expected_version);
                }
                other => panic!("expected Confirmed, got {:?}", other),
            }
        }
        assert_eq!(store.booked(flight_id), Some(15));
    }

    /// Store whose writes always lose the version race.
    struct ContendedStore {
        attempts: AtomicU32,
    }

    #[async_trait]
    impl InventoryStore for ContendedStore {
        async fn read_flight(
            &self,
            _flight_id: Uuid,
        ) -> Result<Option<FlightInventory>, Box<dyn Error + Send + Sync>> {
            Ok(Some(FlightInventory {
                capacity: 100,
                booked: 20,
                version: 7,
            }))
        }

        async fn update_booked(
            &self,
            _flight_id: Uuid,
            _expected_version: i64,
            _new_booked: i32,
        ) -> Result<ConditionalWrite, Box<dyn Error + Send + Sync>> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Ok(ConditionalWrite::VersionMismatch)
        }
    }

    #[tokio::test]
    async fn persistent_contention_exhausts_the_retry_budget() {
        let store = Arc::new(ContendedStore {
            attempts: AtomicU32::new(0),
        });
        let allocator = SeatAllocator::new(store.clone(), 4);

        let outcome = allocator.allocate(Uuid::new_v4(), 1).await.unwrap();
        assert_eq!(
            outcome,
            AllocationOutcome::ConflictExhausted {
                attempts: 4,
                booked_before: 20,
            }
        );
        assert_eq!(store.attempts.load(Ordering::SeqCst), 4);
    }
}
