use crate::models::SeatSelection;

use super::error::BookingError;
use super::seat_map::SeatMap;

/// Default per-tier limit on seats in one request, matching the
/// original "maximum 5 seats per section" rule.
pub const DEFAULT_TIER_SEAT_CAP: usize = 5;

/// Decides whether a seat request is satisfiable against a seat map
/// snapshot. Pure: no side effects, the map is not touched.
///
/// On success returns the normalized selection (per tier: deduplicated,
/// ascending) that the coordinator commits and the receipt records.
pub fn validate(
    requested: &SeatSelection,
    map: &SeatMap,
    tier_cap: usize,
) -> Result<SeatSelection, BookingError> {
    let normalized = requested.normalized();

    if normalized.total_seats() == 0 {
        return Err(BookingError::EmptyRequest);
    }

    for (tier, seats) in normalized.tiers() {
        if seats.len() > tier_cap {
            return Err(BookingError::TierCapExceeded {
                tier,
                requested: seats.len(),
                cap: tier_cap,
            });
        }
        for &seat in seats {
            if !map.is_free(tier, seat)? {
                return Err(BookingError::SeatAlreadyTaken { tier, seat });
            }
        }
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SeatHold, SeatState, Theatre, Tier};
    use uuid::Uuid;

    fn theatre() -> Theatre {
        Theatre {
            id: 1,
            name: "Galaxy".into(),
            location: "Downtown".into(),
            balcony_seats: 8,
            balcony_seat_price: 300,
            middle_seats: 8,
            middle_seat_price: 200,
            lower_seats: 10,
            lower_seat_price: 100,
        }
    }

    fn map_with_taken(lower: &[u32]) -> SeatMap {
        let mut map = SeatMap::new(SeatState::default(), &theatre());
        let hold = SeatHold {
            booking_id: Uuid::new_v4(),
            user_email: "x@y.z".into(),
        };
        map.occupy(Tier::Lower, lower, &hold).unwrap();
        map
    }

    fn lower(seats: &[u32]) -> SeatSelection {
        SeatSelection {
            lower: seats.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_request_is_rejected() {
        let map = map_with_taken(&[]);
        let err = validate(&SeatSelection::default(), &map, DEFAULT_TIER_SEAT_CAP).unwrap_err();
        assert!(matches!(err, BookingError::EmptyRequest));
    }

    #[test]
    fn seat_out_of_range_is_invalid() {
        let map = map_with_taken(&[]);
        assert!(matches!(
            validate(&lower(&[0]), &map, DEFAULT_TIER_SEAT_CAP),
            Err(BookingError::InvalidSeat { seat: 0, .. })
        ));
        assert!(matches!(
            validate(&lower(&[11]), &map, DEFAULT_TIER_SEAT_CAP),
            Err(BookingError::InvalidSeat { seat: 11, .. })
        ));
    }

    #[test]
    fn six_seats_in_one_tier_exceeds_cap() {
        let map = map_with_taken(&[]);
        let err = validate(&lower(&[1, 2, 3, 4, 5, 6]), &map, DEFAULT_TIER_SEAT_CAP).unwrap_err();
        assert!(matches!(
            err,
            BookingError::TierCapExceeded {
                tier: Tier::Lower,
                requested: 6,
                cap: 5
            }
        ));
    }

    #[test]
    fn duplicates_collapse_before_the_cap_applies() {
        let map = map_with_taken(&[]);
        let sel = validate(&lower(&[5, 1, 5, 3, 1, 3]), &map, DEFAULT_TIER_SEAT_CAP).unwrap();
        assert_eq!(sel.lower, vec![1, 3, 5]);
    }

    #[test]
    fn overlapping_taken_seat_is_rejected() {
        let map = map_with_taken(&[1, 2, 3]);
        let err = validate(&lower(&[3, 4]), &map, DEFAULT_TIER_SEAT_CAP).unwrap_err();
        assert!(matches!(
            err,
            BookingError::SeatAlreadyTaken {
                tier: Tier::Lower,
                seat: 3
            }
        ));
    }

    #[test]
    fn disjoint_request_passes_and_is_sorted() {
        let map = map_with_taken(&[1, 2, 3]);
        let sel = validate(&lower(&[5, 4]), &map, DEFAULT_TIER_SEAT_CAP).unwrap();
        assert_eq!(sel.lower, vec![4, 5]);
        assert!(sel.balcony.is_empty());
        assert!(sel.middle.is_empty());
    }

    #[test]
    fn cap_applies_per_tier_not_in_total() {
        let map = map_with_taken(&[]);
        let req = SeatSelection {
            balcony: vec![1, 2, 3, 4, 5],
            middle: vec![1, 2, 3, 4, 5],
            lower: vec![1, 2, 3, 4, 5],
        };
        assert!(validate(&req, &map, DEFAULT_TIER_SEAT_CAP).is_ok());
    }
}
