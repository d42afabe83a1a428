use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::seat::Tier;

/// Theatre with its three seating tiers. Capacities and prices are
/// admin-managed catalog data, read-only from the booking core.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Theatre {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub balcony_seats: i32,
    pub balcony_seat_price: i64,
    pub middle_seats: i32,
    pub middle_seat_price: i64,
    pub lower_seats: i32,
    pub lower_seat_price: i64,
}

impl Theatre {
    pub fn capacity(&self, tier: Tier) -> u32 {
        let seats = match tier {
            Tier::Balcony => self.balcony_seats,
            Tier::Middle => self.middle_seats,
            Tier::Lower => self.lower_seats,
        };
        seats.max(0) as u32
    }

    /// Per-seat price in integral currency units.
    pub fn price(&self, tier: Tier) -> i64 {
        match tier {
            Tier::Balcony => self.balcony_seat_price,
            Tier::Middle => self.middle_seat_price,
            Tier::Lower => self.lower_seat_price,
        }
    }
}
