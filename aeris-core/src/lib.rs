pub mod allocator;
pub mod audit;
pub mod booking;
pub mod memory;
pub mod repository;

pub use allocator::{AllocationOutcome, SeatAllocator};
pub use audit::AuditRecorder;
pub use booking::{BookingConfirmation, BookingError, BookingRequest, BookingService};
pub use repository::{
    AuditSink, ConditionalWrite, EventPublisher, FlightInventory, InventoryStore,
    ReservationStore,
};
