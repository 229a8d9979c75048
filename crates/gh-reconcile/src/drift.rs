use gh_decimal::Decimal;
use gh_ladder::Ladder;

fn shift_all_prices(ladder: &mut Ladder, delta: Decimal) {
    for interval in ladder.intervals.iter_mut() {
        interval.buy.price = interval.buy.price + delta;
        interval.sell.price = interval.sell.price + delta;
    }
}

/// Step 7 (non-static ladder only) — drift correction after a BUY
/// execution.
///
/// `buys` is the (already-flipped) list of indices executed this tick,
/// in ladder order. If the rung just past the deepest one fired is
/// still an active BUY, the market has trailed past the whole band:
/// flip that neighbor to an armed SELL, flip the shallowest fired rung
/// back to an armed BUY, and shift every price up by one step so the
/// band re-centers on the new trend.
pub fn correct_bad_buy(ladder: &mut Ladder, buys: &[usize], space_between_intervals: Decimal) {
    let Some(&lowest_fired) = buys.last() else {
        return;
    };
    if lowest_fired >= ladder.intervals.len() - 1 {
        return;
    }

    let neighbor = lowest_fired + 1;
    if !ladder.intervals[neighbor].buy.active {
        return;
    }

    ladder.intervals[neighbor].buy.active = false;
    ladder.intervals[neighbor].buy.crossed = false;
    ladder.intervals[neighbor].sell.active = true;
    ladder.intervals[neighbor].sell.crossed = false;

    let top_fired = buys[0];
    ladder.intervals[top_fired].buy.active = true;
    ladder.intervals[top_fired].buy.crossed = false;
    ladder.intervals[top_fired].sell.active = false;
    ladder.intervals[top_fired].sell.crossed = false;

    shift_all_prices(ladder, space_between_intervals);
}

/// Step 7 (non-static ladder only) — mirror of [`correct_bad_buy`] for
/// SELL executions: examines the rung just before the shallowest one
/// fired, and shifts every price down by one step.
pub fn correct_bad_sell(ladder: &mut Ladder, sells: &[usize], space_between_intervals: Decimal) {
    let Some(&highest_fired) = sells.first() else {
        return;
    };
    if highest_fired == 0 {
        return;
    }

    let neighbor = highest_fired - 1;
    if !ladder.intervals[neighbor].sell.active {
        return;
    }

    ladder.intervals[neighbor].sell.active = false;
    ladder.intervals[neighbor].sell.crossed = false;
    ladder.intervals[neighbor].buy.active = true;
    ladder.intervals[neighbor].buy.crossed = false;

    let bottom_fired = *sells.last().unwrap();
    ladder.intervals[bottom_fired].sell.active = true;
    ladder.intervals[bottom_fired].sell.crossed = false;
    ladder.intervals[bottom_fired].buy.active = false;
    ladder.intervals[bottom_fired].buy.crossed = false;

    shift_all_prices(ladder, -space_between_intervals);
}

#[cfg(test)]
mod tests {
    use super::*;
    use gh_decimal::decimal;
    use gh_ladder::build_ladder;

    #[test]
    fn correct_bad_buy_shifts_all_prices_up_when_neighbor_still_armed() {
        let mut ladder = build_ladder(decimal!("10"), 100, 500, decimal!("0.05"), decimal!("0.03"));
        let before = ladder.intervals[0].sell.price;
        // Fire the deepest-but-one long rung (index 4); index 5 (neighbor, deeper) still has an active BUY.
        crate::flip::flip_buys(&mut ladder, &[4]);
        correct_bad_buy(&mut ladder, &[4], decimal!("0.05"));

        assert_eq!(ladder.intervals[0].sell.price, before + decimal!("0.05"));
        // Neighbor (index 5) flipped to armed SELL.
        assert!(ladder.intervals[5].sell.active);
        assert!(!ladder.intervals[5].buy.active);
        // Fired rung (index 4) flipped back to armed BUY.
        assert!(ladder.intervals[4].buy.active);
        assert!(!ladder.intervals[4].sell.active);
    }

    #[test]
    fn correct_bad_buy_is_no_op_when_neighbor_not_active() {
        let mut ladder = build_ladder(decimal!("10"), 100, 500, decimal!("0.05"), decimal!("0.03"));
        let before = ladder.intervals[0].sell.price;
        // Fire the innermost long (index 5) — no neighbor beyond it in the LONG block
        // that still has an active BUY (index 6 is a SHORT rung, BUY inactive there).
        crate::flip::flip_buys(&mut ladder, &[5]);
        correct_bad_buy(&mut ladder, &[5], decimal!("0.05"));
        assert_eq!(ladder.intervals[0].sell.price, before);
    }

    #[test]
    fn correct_bad_buy_is_no_op_at_bottom_of_ladder() {
        let mut ladder = build_ladder(decimal!("10"), 100, 500, decimal!("0.05"), decimal!("0.03"));
        let last = ladder.intervals.len() - 1;
        let before = ladder.intervals[0].sell.price;
        crate::flip::flip_buys(&mut ladder, &[last]);
        correct_bad_buy(&mut ladder, &[last], decimal!("0.05"));
        assert_eq!(ladder.intervals[0].sell.price, before);
    }
}
