pub mod coordinator;
pub mod error;
pub mod ledger;
pub mod pricing;
pub mod seat_map;
pub mod store;
pub mod validator;

pub use coordinator::{ReservationCoordinator, ReservationRequest};
pub use error::BookingError;
pub use ledger::BookingLedger;
pub use seat_map::SeatMap;
pub use store::PgStore;
