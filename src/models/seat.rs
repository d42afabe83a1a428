use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Seating class of a theatre. Every theatre has all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Balcony,
    Middle,
    Lower,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Balcony, Tier::Middle, Tier::Lower];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Balcony => "balcony",
            Tier::Middle => "middle",
            Tier::Lower => "lower",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Tier::Balcony => 0,
            Tier::Middle => 1,
            Tier::Lower => 2,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who holds an occupied seat. Absent seat numbers are free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatHold {
    pub booking_id: Uuid,
    pub user_email: String,
}

/// Live occupancy document for one show, stored as JSONB on the shows row.
/// Seat numbers are 1-based; only occupied seats appear in the maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatState {
    #[serde(default)]
    pub balcony: BTreeMap<u32, SeatHold>,
    #[serde(default)]
    pub middle: BTreeMap<u32, SeatHold>,
    #[serde(default)]
    pub lower: BTreeMap<u32, SeatHold>,
}

impl SeatState {
    pub fn tier(&self, tier: Tier) -> &BTreeMap<u32, SeatHold> {
        match tier {
            Tier::Balcony => &self.balcony,
            Tier::Middle => &self.middle,
            Tier::Lower => &self.lower,
        }
    }

    pub fn tier_mut(&mut self, tier: Tier) -> &mut BTreeMap<u32, SeatHold> {
        match tier {
            Tier::Balcony => &mut self.balcony,
            Tier::Middle => &mut self.middle,
            Tier::Lower => &mut self.lower,
        }
    }

    pub fn occupied_count(&self) -> usize {
        Tier::ALL.iter().map(|t| self.tier(*t).len()).sum()
    }
}

/// Requested (or confirmed) seat numbers per tier. Doubles as the wire
/// format for booking requests and the persisted receipt on a booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSelection {
    #[serde(default)]
    pub balcony: Vec<u32>,
    #[serde(default)]
    pub middle: Vec<u32>,
    #[serde(default)]
    pub lower: Vec<u32>,
}

impl SeatSelection {
    pub fn tier(&self, tier: Tier) -> &[u32] {
        match tier {
            Tier::Balcony => &self.balcony,
            Tier::Middle => &self.middle,
            Tier::Lower => &self.lower,
        }
    }

    pub fn tiers(&self) -> [(Tier, &[u32]); 3] {
        [
            (Tier::Balcony, self.balcony.as_slice()),
            (Tier::Middle, self.middle.as_slice()),
            (Tier::Lower, self.lower.as_slice()),
        ]
    }

    pub fn total_seats(&self) -> usize {
        self.balcony.len() + self.middle.len() + self.lower.len()
    }

    /// Ascending seat numbers, duplicates dropped. Receipts stay deterministic.
    pub fn normalized(&self) -> SeatSelection {
        fn norm(seats: &[u32]) -> Vec<u32> {
            let mut v = seats.to_vec();
            v.sort_unstable();
            v.dedup();
            v
        }
        SeatSelection {
            balcony: norm(&self.balcony),
            middle: norm(&self.middle),
            lower: norm(&self.lower),
        }
    }
}
