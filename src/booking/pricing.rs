use crate::models::{PriceBreakdown, SeatSelection, Theatre};

/// Prices a normalized selection against the theatre's tier prices.
/// All amounts are integral currency units, no rounding involved:
/// subtotal = seat count x tier price, total = sum of subtotals.
pub fn price_selection(selection: &SeatSelection, theatre: &Theatre) -> PriceBreakdown {
    let mut breakdown = PriceBreakdown::default();
    for (tier, seats) in selection.tiers() {
        let subtotal = seats.len() as i64 * theatre.price(tier);
        match tier {
            crate::models::Tier::Balcony => breakdown.balcony = subtotal,
            crate::models::Tier::Middle => breakdown.middle = subtotal,
            crate::models::Tier::Lower => breakdown.lower = subtotal,
        }
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tier;
    use proptest::prelude::*;

    fn theatre(balcony: i64, middle: i64, lower: i64) -> Theatre {
        Theatre {
            id: 1,
            name: "Galaxy".into(),
            location: "Downtown".into(),
            balcony_seats: 50,
            balcony_seat_price: balcony,
            middle_seats: 50,
            middle_seat_price: middle,
            lower_seats: 50,
            lower_seat_price: lower,
        }
    }

    #[test]
    fn two_lower_seats_at_100_cost_200() {
        let sel = SeatSelection {
            lower: vec![4, 5],
            ..Default::default()
        };
        let breakdown = price_selection(&sel, &theatre(300, 200, 100));
        assert_eq!(breakdown.lower, 200);
        assert_eq!(breakdown.total(), 200);
    }

    #[test]
    fn empty_selection_costs_nothing() {
        let breakdown = price_selection(&SeatSelection::default(), &theatre(300, 200, 100));
        assert_eq!(breakdown.total(), 0);
    }

    proptest! {
        #[test]
        fn total_is_sum_of_count_times_price(
            balcony in proptest::collection::vec(1u32..=50, 0..5),
            middle in proptest::collection::vec(1u32..=50, 0..5),
            lower in proptest::collection::vec(1u32..=50, 0..5),
            pb in 1i64..1000,
            pm in 1i64..1000,
            pl in 1i64..1000,
        ) {
            let theatre = theatre(pb, pm, pl);
            let sel = SeatSelection { balcony, middle, lower };
            let breakdown = price_selection(&sel, &theatre);

            let expected: i64 = sel
                .tiers()
                .iter()
                .map(|(tier, seats)| seats.len() as i64 * theatre.price(*tier))
                .sum();
            prop_assert_eq!(breakdown.total(), expected);
            prop_assert_eq!(
                breakdown.tier(Tier::Balcony) + breakdown.tier(Tier::Middle) + breakdown.tier(Tier::Lower),
                breakdown.total()
            );
        }
    }
}
