use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::seat::{SeatSelection, Tier};

/// Per-tier subtotals of a booking, integral currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub balcony: i64,
    pub middle: i64,
    pub lower: i64,
}

impl PriceBreakdown {
    pub fn tier(&self, tier: Tier) -> i64 {
        match tier {
            Tier::Balcony => self.balcony,
            Tier::Middle => self.middle,
            Tier::Lower => self.lower,
        }
    }

    pub fn total(&self) -> i64 {
        self.balcony + self.middle + self.lower
    }
}

/// Durable record of a confirmed reservation. Never deleted once
/// committed; cancellation only flips the flag and frees the seats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub show_id: i64,
    pub user_id: i64,
    pub user_email: String,
    pub seats: SeatSelection,
    pub subtotals: PriceBreakdown,
    pub total: i64,
    pub created_at: DateTime<Utc>,
    pub cancelled: bool,
}

impl Booking {
    pub fn new(
        id: Uuid,
        show_id: i64,
        user_id: i64,
        user_email: String,
        seats: SeatSelection,
        subtotals: PriceBreakdown,
    ) -> Self {
        Booking {
            id,
            show_id,
            user_id,
            user_email,
            seats,
            total: subtotals.total(),
            subtotals,
            created_at: Utc::now(),
            cancelled: false,
        }
    }
}
