use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::booking::SeatMap;
use crate::models::Tier;
use crate::AppState;

use super::error_response;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/shows/{show_id}/seats", get(get_show_seats))
}

#[derive(Debug, Serialize)]
struct TierAvailability {
    tier: Tier,
    capacity: u32,
    price: i64,
    occupied: Vec<u32>,
}

#[derive(Debug, Serialize)]
struct ShowSeatsResponse {
    show_id: i64,
    theatre_id: i64,
    starts_at: DateTime<Utc>,
    tiers: Vec<TierAvailability>,
}

// GET /api/shows/{show_id}/seats - public availability view
async fn get_show_seats(
    State(state): State<Arc<AppState>>,
    Path(show_id): Path<i64>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let show = state.catalog.show(show_id).await.map_err(error_response)?;
    let theatre = state
        .catalog
        .theatre(show.theatre_id)
        .await
        .map_err(error_response)?;

    let map = SeatMap::new(show.seat_state, &theatre);
    let tiers = Tier::ALL
        .iter()
        .map(|&tier| TierAvailability {
            tier,
            capacity: map.capacity(tier),
            price: theatre.price(tier),
            occupied: map.occupied(tier),
        })
        .collect();

    Ok((
        StatusCode::OK,
        Json(ShowSeatsResponse {
            show_id: show.id,
            theatre_id: show.theatre_id,
            starts_at: show.starts_at,
            tiers,
        }),
    ))
}
