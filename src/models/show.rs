use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::seat::SeatState;

/// A scheduled screening of a movie in a theatre.
///
/// `version` is the optimistic-concurrency counter for the seat state
/// document; every successful seat mutation bumps it by one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    pub id: i64,
    pub movie_id: i64,
    pub theatre_id: i64,
    pub starts_at: DateTime<Utc>,
    pub seat_state: SeatState,
    pub version: i64,
}

impl Show {
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now
    }
}
