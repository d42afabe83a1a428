use thiserror::Error;
use uuid::Uuid;

use crate::models::Tier;

/// Every expected outcome of the reservation flow. All variants are
/// returned to the caller as values; the API layer owns presentation.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("seat {seat} is out of range for the {tier} tier")]
    InvalidSeat { tier: Tier, seat: u32 },

    #[error("{requested} seats requested in the {tier} tier, limit is {cap}")]
    TierCapExceeded {
        tier: Tier,
        requested: usize,
        cap: usize,
    },

    #[error("no seats selected")]
    EmptyRequest,

    #[error("seat {seat} in the {tier} tier is already taken")]
    SeatAlreadyTaken { tier: Tier, seat: u32 },

    #[error("could not commit the reservation, too many concurrent updates")]
    Contention,

    #[error("booking {0} already exists")]
    DuplicateBooking(Uuid),

    #[error("not found")]
    NotFound,

    #[error("booking is already cancelled")]
    AlreadyCancelled,

    #[error("booking belongs to another user")]
    Forbidden,

    #[error("the show has already started, cancellation is closed")]
    CancellationWindowClosed,

    #[error("storage unavailable")]
    StorageUnavailable(#[from] sqlx::Error),
}

impl BookingError {
    /// Stable machine-readable code, one per taxonomy entry.
    pub fn code(&self) -> &'static str {
        match self {
            BookingError::InvalidSeat { .. } => "invalid_seat",
            BookingError::TierCapExceeded { .. } => "tier_cap_exceeded",
            BookingError::EmptyRequest => "empty_request",
            BookingError::SeatAlreadyTaken { .. } => "seat_already_taken",
            BookingError::Contention => "contention",
            BookingError::DuplicateBooking(_) => "duplicate_booking",
            BookingError::NotFound => "not_found",
            BookingError::AlreadyCancelled => "already_cancelled",
            BookingError::Forbidden => "forbidden",
            BookingError::CancellationWindowClosed => "cancellation_window_closed",
            BookingError::StorageUnavailable(_) => "storage_unavailable",
        }
    }
}
