use gh_ladder::Ladder;

/// Step 6 — flip every executed BUY half-order off and arm its mirror
/// SELL, uncrossed.
pub fn flip_buys(ladder: &mut Ladder, indices: &[usize]) {
    for &i in indices {
        let interval = &mut ladder.intervals[i];
        interval.buy.active = false;
        interval.buy.crossed = false;
        interval.sell.active = true;
        interval.sell.crossed = false;
    }
}

/// Step 6 — mirror of [`flip_buys`] for executed SELLs.
pub fn flip_sells(ladder: &mut Ladder, indices: &[usize]) {
    for &i in indices {
        let interval = &mut ladder.intervals[i];
        interval.sell.active = false;
        interval.sell.crossed = false;
        interval.buy.active = true;
        interval.buy.crossed = false;
    }
}
