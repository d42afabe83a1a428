use crate::models::{SeatHold, SeatState, Theatre, Tier};

use super::error::BookingError;

/// Occupancy view of one show: the seat state snapshot plus the
/// theatre's tier capacities. Mutations happen on this in-memory copy;
/// the coordinator persists the document back with a version check.
#[derive(Debug, Clone)]
pub struct SeatMap {
    state: SeatState,
    capacities: [u32; 3],
}

impl SeatMap {
    pub fn new(state: SeatState, theatre: &Theatre) -> Self {
        SeatMap {
            state,
            capacities: [
                theatre.capacity(Tier::Balcony),
                theatre.capacity(Tier::Middle),
                theatre.capacity(Tier::Lower),
            ],
        }
    }

    pub fn capacity(&self, tier: Tier) -> u32 {
        self.capacities[tier.index()]
    }

    /// Seat numbers are 1-based; 0 and anything past the tier capacity
    /// fail with InvalidSeat.
    pub fn is_free(&self, tier: Tier, seat: u32) -> Result<bool, BookingError> {
        if seat == 0 || seat > self.capacity(tier) {
            return Err(BookingError::InvalidSeat { tier, seat });
        }
        Ok(!self.state.tier(tier).contains_key(&seat))
    }

    /// Assigns `hold` to every seat in the batch, or fails without
    /// touching anything if any seat is out of range or taken.
    pub fn occupy(&mut self, tier: Tier, seats: &[u32], hold: &SeatHold) -> Result<(), BookingError> {
        for &seat in seats {
            if !self.is_free(tier, seat)? {
                return Err(BookingError::SeatAlreadyTaken { tier, seat });
            }
        }
        for &seat in seats {
            self.state.tier_mut(tier).insert(seat, hold.clone());
        }
        Ok(())
    }

    /// Frees the given seats. Releasing a seat that is already free is
    /// a no-op.
    pub fn release(&mut self, tier: Tier, seats: &[u32]) {
        let occupancy = self.state.tier_mut(tier);
        for seat in seats {
            occupancy.remove(seat);
        }
    }

    /// Occupied seat numbers in ascending order.
    pub fn occupied(&self, tier: Tier) -> Vec<u32> {
        self.state.tier(tier).keys().copied().collect()
    }

    pub fn state(&self) -> &SeatState {
        &self.state
    }
}
