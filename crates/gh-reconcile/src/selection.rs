use gh_decimal::Decimal;
use gh_ladder::Ladder;

/// Step 3 — buy-side execution selection.
///
/// Scans the ladder in reverse (lowest sell-price rung first, i.e. the
/// farthest SHORT rung up toward the farthest LONG rung). Every crossed,
/// active BUY whose price the ask has reached is a candidate; a
/// candidate only executes if doing so would not overshoot its own
/// `position_limit`. Returned indices are in ladder order (ascending).
pub fn select_buys(ladder: &Ladder, ask: Decimal, position: i64, shares_per_interval: i64) -> Vec<usize> {
    let mut new_position = position;
    let mut indices = Vec::new();

    for i in (0..ladder.intervals.len()).rev() {
        let interval = &ladder.intervals[i];
        if ask >= interval.buy.price && interval.buy.active && interval.buy.crossed {
            if new_position < interval.position_limit {
                indices.insert(0, i);
                new_position += shares_per_interval;
            }
        }
    }

    indices
}

/// Step 4 — sell-side execution selection (only called when Step 3
/// found nothing). Scans forward (highest sell-price rung first).
/// Returned indices are in ladder order (ascending).
pub fn select_sells(ladder: &Ladder, bid: Decimal, position: i64, shares_per_interval: i64) -> Vec<usize> {
    let mut new_position = position;
    let mut indices = Vec::new();

    for (i, interval) in ladder.intervals.iter().enumerate() {
        if bid <= interval.sell.price && interval.sell.active && interval.sell.crossed {
            if new_position > interval.position_limit {
                indices.push(i);
                new_position -= shares_per_interval;
            }
        }
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use gh_decimal::decimal;
    use gh_ladder::build_ladder;

    #[test]
    fn selects_innermost_long_buy_when_ask_reaches_it() {
        let ladder = build_ladder(decimal!("10"), 100, 500, decimal!("0.05"), decimal!("0.03"));
        // Innermost LONG rung (smallest step) has the lowest BUY price among LONGs: 10.02.
        let buys = select_buys(&ladder, decimal!("10.02"), 0, 100);
        assert_eq!(buys.len(), 1);
        let idx = buys[0];
        assert_eq!(ladder.intervals[idx].buy.price, decimal!("10.02"));
    }

    #[test]
    fn no_buy_selected_when_ask_never_reaches_any_price() {
        let ladder = build_ladder(decimal!("10"), 100, 500, decimal!("0.05"), decimal!("0.03"));
        let buys = select_buys(&ladder, decimal!("9.00"), 0, 100);
        assert!(buys.is_empty());
    }

    #[test]
    fn selects_innermost_short_sell_when_bid_reaches_it() {
        let ladder = build_ladder(decimal!("10"), 100, 500, decimal!("0.05"), decimal!("0.03"));
        let sells = select_sells(&ladder, decimal!("9.98"), 0, 100);
        assert_eq!(sells.len(), 1);
        let idx = sells[0];
        assert_eq!(ladder.intervals[idx].sell.price, decimal!("9.98"));
    }
}
