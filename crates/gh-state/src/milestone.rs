use gh_decimal::{decimal, Decimal};

/// The fixed set of exit-PnL profit percentages the engine watches for.
/// Descending order matters: PnL update walks this list high-to-low so
/// the highest newly-reached threshold latches first (see §4.5 in the
/// accounting notes carried by `gh-pnl`).
pub const MILESTONE_THRESHOLDS: [&str; 8] = [
    "2.0", "1.75", "1.5", "1.25", "1.0", "0.75", "0.5", "0.25",
];

/// One profit-milestone watermark: the first time `exitPnLAsPercentage`
/// reaches `threshold`, `reached` latches true and `max_loss_when_reached`
/// freezes at whatever `maxMovingLossAsPercentage` was at that instant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Milestone {
    pub threshold: Decimal,
    pub reached: bool,
    pub max_loss_when_reached: Decimal,
}

impl Milestone {
    fn unreached(threshold: Decimal) -> Self {
        Milestone {
            threshold,
            reached: false,
            max_loss_when_reached: Decimal::ZERO,
        }
    }
}

/// Build the fresh, all-unreached milestone ladder for a new `StockState`.
pub fn fresh_milestones() -> Vec<Milestone> {
    MILESTONE_THRESHOLDS
        .iter()
        .map(|s| Milestone::unreached(decimal!(s)))
        .collect()
}
