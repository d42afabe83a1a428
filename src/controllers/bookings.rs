use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::booking::ReservationRequest;
use crate::middleware::AuthUser;
use crate::AppState;

use super::error_response;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", post(create_booking).get(list_bookings))
        .route("/bookings/{booking_id}", get(get_booking))
        .route("/bookings/cancel", patch(cancel_booking))
}

// POST /api/bookings
async fn create_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<ReservationRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let booking = state
        .coordinator
        .create_booking(&user, &request)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /api/bookings
async fn list_bookings(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let bookings = state
        .coordinator
        .bookings_for(&user)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::OK, Json(bookings)))
}

// GET /api/bookings/{booking_id}
async fn get_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let booking = state
        .coordinator
        .booking_for(&user, booking_id)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::OK, Json(booking)))
}

// PATCH /api/bookings/cancel
#[derive(Debug, Deserialize)]
struct CancelBookingRequest {
    booking_id: Uuid,
}

async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<CancelBookingRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let booking = state
        .coordinator
        .cancel_booking(&user, request.booking_id)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::OK, Json(booking)))
}
