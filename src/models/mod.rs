pub mod booking;
pub mod seat;
pub mod show;
pub mod theatre;

pub use booking::{Booking, PriceBreakdown};
pub use seat::{SeatHold, SeatSelection, SeatState, Tier};
pub use show::Show;
pub use theatre::Theatre;
