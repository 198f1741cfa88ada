pub mod audit;
pub mod events;
pub mod flight;
pub mod reservation;

pub use audit::{AuditRecord, BookingOutcome};
pub use events::BookingAttemptedEvent;
pub use flight::{Flight, FlightOption, FlightQuery, FlightSort, NewFlight};
pub use reservation::{Passenger, Reservation};
