use gh_decimal::Decimal;
use gh_ladder::Ladder;
use serde::{Deserialize, Serialize};

use crate::milestone::Milestone;

/// A single quote.
///
/// Constructors enforce `ask >= bid > 0`; the reconciliation engine
/// additionally tolerates `ask < bid` at the wide-spread guard (§4.3
/// Step 1), so this invariant is checked here, not re-derived there.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ask: Decimal,
    pub bid: Decimal,
    pub timestamp: String,
}

impl Snapshot {
    pub fn new(ask: Decimal, bid: Decimal, timestamp: impl Into<String>) -> Self {
        Snapshot {
            ask,
            bid,
            timestamp: timestamp.into(),
        }
    }
}

/// The recognized-key configuration bag a `StockState` is built from.
///
/// Unknown keys in the source mapping this was parsed from are ignored,
/// not rejected — see `gh-config` for the mapping layer that produces
/// one of these from JSON/YAML. Every field here is a key the factory
/// recognizes; `None` means "not supplied", which is only acceptable
/// for fields with a sensible default ([`PartialStockState::initial_price`],
/// [`PartialStockState::num_contracts`]).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialStockState {
    pub brokerage_trading_cost_per_share: Option<Decimal>,
    pub shares_per_interval: Option<i64>,
    pub target_position: Option<i64>,
    pub space_between_intervals: Option<Decimal>,
    pub interval_profit: Option<Decimal>,
    pub num_contracts: Option<i64>,
    /// Derived from the first snapshot if absent.
    pub initial_price: Option<Decimal>,
    pub profit_threshold: Option<Decimal>,
    pub loss_threshold: Option<Decimal>,
    pub is_static_intervals: Option<bool>,
}

/// One security's full simulation state: configuration fixed at
/// construction, plus the running fields the reconciliation engine
/// mutates on every quote.
///
/// Owned by exactly one driver task from construction to completion
/// (see `gh-driver`); the ladder and every half-order inside it are
/// mutated only by that task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockState {
    // --- Config, fixed at construction ---
    pub brokerage_id: String,
    pub date: String,
    pub ticker: String,
    pub shares_per_interval: i64,
    pub target_position: i64,
    pub space_between_intervals: Decimal,
    pub interval_profit: Decimal,
    pub brokerage_trading_cost_per_share: Decimal,
    pub initial_price: Decimal,
    pub is_static_intervals: bool,
    pub profit_threshold: Decimal,
    pub loss_threshold: Decimal,
    pub num_contracts: Option<i64>,

    // --- Running ---
    pub position: i64,
    pub intervals: Ladder,
    pub last_ask: Option<Decimal>,
    pub last_bid: Option<Decimal>,
    /// Cumulative signed cash flow, net of commissions.
    pub net_position_value: Decimal,
    /// Only meaningful once the engine has driven `position` back to
    /// zero and finalized it; `None` until then.
    pub realized_pnl_as_percentage: Option<Decimal>,
    pub exit_pnl_as_percentage: Decimal,
    pub max_moving_profit_as_percentage: Decimal,
    pub max_moving_loss_as_percentage: Decimal,
    pub milestones: Vec<Milestone>,
}
