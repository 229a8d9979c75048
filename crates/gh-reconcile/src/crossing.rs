use gh_decimal::Decimal;
use gh_ladder::Ladder;

/// Step 1 — wide-spread guard: true when the quote is unusable for
/// crossing detection this tick (spread too wide for the ladder's own
/// step size, or either side is non-positive).
pub fn is_wide_spread(ask: Decimal, bid: Decimal, space_between_intervals: Decimal) -> bool {
    if !ask.is_positive() || !bid.is_positive() {
        return true;
    }
    (ask - bid) >= space_between_intervals
}

/// Step 2 — crossing detection. Arms every half-order the market has
/// traded through since it last activated. A half-order must be armed
/// (`crossed`) before it is eligible to fire in Step 3/4; this forces
/// the market to trade *through* a level at least once, so a single
/// quote landing exactly on it can't round-trip.
///
/// Re-run after Step 8 against the same snapshot: a half-order flipped
/// on during execution may already be crossed by it.
pub fn check_crossings(ladder: &mut Ladder, ask: Decimal, bid: Decimal) {
    for interval in ladder.intervals.iter_mut() {
        if interval.buy.active && !interval.buy.crossed && ask < interval.buy.price {
            interval.buy.crossed = true;
        }
        if interval.sell.active && !interval.sell.crossed && bid > interval.sell.price {
            interval.sell.crossed = true;
        }
    }
}
