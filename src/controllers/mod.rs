pub mod bookings;
pub mod shows;

use axum::{http::StatusCode, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::booking::BookingError;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(shows::routes())
        .merge(bookings::routes())
}

/* ---------- error mapping ---------- */

// One stable code and status per taxonomy entry; the core itself does
// no presentation.
pub(crate) fn error_response(err: BookingError) -> (StatusCode, Json<Value>) {
    let status = match &err {
        BookingError::InvalidSeat { .. }
        | BookingError::TierCapExceeded { .. }
        | BookingError::EmptyRequest => StatusCode::BAD_REQUEST,
        BookingError::SeatAlreadyTaken { .. }
        | BookingError::Contention
        | BookingError::DuplicateBooking(_)
        | BookingError::AlreadyCancelled
        | BookingError::CancellationWindowClosed => StatusCode::CONFLICT,
        BookingError::NotFound => StatusCode::NOT_FOUND,
        BookingError::Forbidden => StatusCode::FORBIDDEN,
        BookingError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if let BookingError::StorageUnavailable(e) = &err {
        tracing::error!("storage error: {:?}", e);
    }

    (status, Json(json!({ "error": err.code(), "message": err.to_string() })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tier;

    #[test]
    fn taxonomy_maps_to_stable_codes_and_statuses() {
        let cases = [
            (
                BookingError::InvalidSeat {
                    tier: Tier::Lower,
                    seat: 0,
                },
                StatusCode::BAD_REQUEST,
                "invalid_seat",
            ),
            (BookingError::EmptyRequest, StatusCode::BAD_REQUEST, "empty_request"),
            (
                BookingError::SeatAlreadyTaken {
                    tier: Tier::Lower,
                    seat: 3,
                },
                StatusCode::CONFLICT,
                "seat_already_taken",
            ),
            (BookingError::Contention, StatusCode::CONFLICT, "contention"),
            (BookingError::NotFound, StatusCode::NOT_FOUND, "not_found"),
            (BookingError::Forbidden, StatusCode::FORBIDDEN, "forbidden"),
            (
                BookingError::CancellationWindowClosed,
                StatusCode::CONFLICT,
                "cancellation_window_closed",
            ),
        ];

        for (err, status, code) in cases {
            let expected_code = err.code();
            assert_eq!(expected_code, code);
            let (got_status, body) = error_response(err);
            assert_eq!(got_status, status);
            assert_eq!(body.0["error"], code);
        }
    }
}
