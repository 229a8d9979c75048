use gh_ladder::Ladder;

/// Step 5 (static ladder only) — for every rung beyond the deepest BUY
/// fired this tick that still has an active BUY, fire it too. A static
/// ladder never leaves an armed same-side level behind.
pub fn add_skipped_buys(ladder: &Ladder, indices: &mut Vec<usize>) {
    let Some(&bottom_fired) = indices.last() else {
        return;
    };

    for i in (bottom_fired + 1..ladder.intervals.len()).rev() {
        if ladder.intervals[i].buy.active {
            indices.push(i);
        }
    }
}

/// Step 5 (static ladder only) — mirror of [`add_skipped_buys`] for the
/// sell side: fire every still-active SELL above the shallowest one
/// fired this tick.
pub fn add_skipped_sells(ladder: &Ladder, indices: &mut Vec<usize>) {
    let Some(&top_fired) = indices.first() else {
        return;
    };

    for i in 0..top_fired {
        if ladder.intervals[i].sell.active {
            indices.insert(0, i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gh_decimal::decimal;
    use gh_ladder::build_ladder;

    #[test]
    fn skipped_buys_below_fired_index_are_appended() {
        let ladder = build_ladder(decimal!("10"), 100, 500, decimal!("0.05"), decimal!("0.03"));
        // Fire only the outermost long (index 0); every long below it
        // (indices 1..=5) is still an active BUY and should be swept in.
        let mut indices = vec![0usize];
        add_skipped_buys(&ladder, &mut indices);
        assert_eq!(indices.len(), 6);
        assert!(indices.contains(&5));
    }

    #[test]
    fn no_op_on_empty_indices() {
        let ladder = build_ladder(decimal!("10"), 100, 500, decimal!("0.05"), decimal!("0.03"));
        let mut indices = Vec::new();
        add_skipped_buys(&ladder, &mut indices);
        assert!(indices.is_empty());
    }
}
