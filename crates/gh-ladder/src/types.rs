use gh_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One side of an interval: a price that is either dormant, armed
/// ("active"), or armed-and-crossed by the last quote seen.
///
/// `crossed` is only ever `true` while `active` is also `true` — it
/// means "the market has moved through this price and the next
/// matching quote should execute it", not "this half-order has fired".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfOrder {
    pub price: Decimal,
    pub active: bool,
    pub crossed: bool,
    /// Last BUY fill price for this half-order, if it has ever bought.
    pub bought_at_price: Option<Decimal>,
    /// Last SELL fill price for this half-order, if it has ever sold.
    pub sold_at_price: Option<Decimal>,
}

impl HalfOrder {
    /// A dormant half-order at `price`: not armed, never crossed, never
    /// filled. Used for the side of an interval that starts out inactive.
    pub fn dormant(price: Decimal) -> Self {
        HalfOrder {
            price,
            active: false,
            crossed: false,
            bought_at_price: None,
            sold_at_price: None,
        }
    }

    /// An armed-and-crossed half-order at `price`. The ladder's innermost
    /// intervals start this way: the first quote seen is expected to
    /// execute them immediately.
    pub fn armed(price: Decimal) -> Self {
        HalfOrder {
            price,
            active: true,
            crossed: true,
            bought_at_price: None,
            sold_at_price: None,
        }
    }
}

/// Which side of the initial price an interval sits on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalKind {
    /// Above the initial price: holds a long position, armed to buy in.
    Long,
    /// Below the initial price: holds a short position, armed to sell in.
    Short,
}

/// One rung of the ladder: a buy price, a sell price exactly
/// `intervalProfit` above it, and the net position the ladder should
/// hold once this rung (and everything nearer the center) has filled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub kind: IntervalKind,
    /// Signed target position this rung represents: positive for `Long`,
    /// negative for `Short`. Strictly decreasing from the first interval
    /// in the ladder to the last.
    pub position_limit: i64,
    pub buy: HalfOrder,
    pub sell: HalfOrder,
}

/// The full grid of intervals for one security, ordered by strictly
/// decreasing `position_limit` — index 0 is the farthest `Long` rung
/// (highest prices), the last index is the farthest `Short` rung
/// (lowest prices).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ladder {
    pub intervals: Vec<Interval>,
}

impl Ladder {
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}
