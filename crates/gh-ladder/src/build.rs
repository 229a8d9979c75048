use gh_decimal::Decimal;

use crate::types::{HalfOrder, Interval, IntervalKind, Ladder};

/// Build the interval ladder for one security.
///
/// `target_position` is divided by `shares_per_interval` (truncating,
/// integer division) to get the nominal rung count `N`; the ladder then
/// carries `N + 1` rungs on each side, the extra rung acting as a guard
/// beyond the nominal target so a runaway trend never leaves the ladder
/// with nowhere further to go.
///
/// Long rungs (`position_limit > 0`) sit above `initial_price`, armed to
/// buy: their `BUY` half-order starts active and crossed, since the
/// market is already "through" it at construction time. Short rungs
/// mirror this below `initial_price` with their `SELL` half-order armed.
///
/// The result is ordered by strictly decreasing `position_limit`: the
/// farthest long rung first, the farthest short rung last.
pub fn build_ladder(
    initial_price: Decimal,
    shares_per_interval: i64,
    target_position: i64,
    space_between_intervals: Decimal,
    interval_profit: Decimal,
) -> Ladder {
    let rung_count = target_position / shares_per_interval;

    let mut intervals = Vec::with_capacity(2 * (rung_count as usize + 1));

    // Long rungs, farthest first: i = rung_count+1 down to 1.
    for i in (1..=rung_count + 1).rev() {
        let sell_price = initial_price + space_between_intervals.mul_i64(i);
        let buy_price = sell_price - interval_profit;
        intervals.push(Interval {
            kind: IntervalKind::Long,
            position_limit: shares_per_interval * i,
            buy: HalfOrder::armed(buy_price),
            sell: HalfOrder::dormant(sell_price),
        });
    }

    // Short rungs, nearest first: i = 1 up to rung_count+1.
    for i in 1..=rung_count + 1 {
        let buy_price = initial_price - space_between_intervals.mul_i64(i);
        let sell_price = buy_price + interval_profit;
        intervals.push(Interval {
            kind: IntervalKind::Short,
            position_limit: -shares_per_interval * i,
            buy: HalfOrder::dormant(buy_price),
            sell: HalfOrder::armed(sell_price),
        });
    }

    Ladder { intervals }
}
