use gh_decimal::Decimal;
use gh_state::{Snapshot, StockState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SourceError;
use crate::source::SnapshotSource;

/// Deterministic one-tick-per-call random walk, modeled on
/// `original_source`'s `GetRandomPrice`/`RestartRandomPrice`
/// (`price_simulator.cpp`): each call moves the midpoint up or down by
/// `tick` with even odds, then reports `(mid, mid - spread)` as
/// `(ask, bid)`.
///
/// Unlike the C++ original (seeded from `random_device`, i.e. not
/// reproducible), this source takes an explicit `u64` seed so the
/// same seed always produces the same walk — required for the
/// "deterministic" debug source spec.md §6 calls for. Never a
/// production quote source; used only for local exercising of the
/// reconciliation engine outside of real market data.
pub struct RandomWalkSource {
    rng: StdRng,
    initial_price: Decimal,
    mid: Decimal,
    tick: Decimal,
    spread: Decimal,
}

impl RandomWalkSource {
    /// `seed` makes the walk reproducible; `initial_price` is the
    /// starting midpoint, `tick` the per-step move size, `spread` the
    /// constant ask/bid gap reported each tick (must stay below the
    /// security's `spaceBetweenIntervals` or the wide-spread guard
    /// will skip every tick).
    pub fn new(seed: u64, initial_price: Decimal, tick: Decimal, spread: Decimal) -> Self {
        RandomWalkSource {
            rng: StdRng::seed_from_u64(seed),
            initial_price,
            mid: initial_price,
            tick,
            spread,
        }
    }

    /// Convenience constructor matching the original's one-cent tick
    /// and a one-cent ask/bid spread.
    pub fn with_defaults(seed: u64, initial_price: Decimal) -> Self {
        Self::new(
            seed,
            initial_price,
            gh_decimal::decimal!("0.01"),
            gh_decimal::decimal!("0.01"),
        )
    }
}

impl SnapshotSource for RandomWalkSource {
    fn next(&mut self, _state: &StockState) -> Result<Snapshot, SourceError> {
        let tick_down = self.rng.random_bool(0.5);
        self.mid = if tick_down {
            self.mid - self.tick
        } else {
            self.mid + self.tick
        };

        let ask = self.mid;
        let bid = self.mid - self.spread;
        Ok(Snapshot::new(ask, bid, String::new()))
    }

    /// A random walk never runs out of prices to generate.
    fn is_exhausted(&self, _state: &StockState) -> bool {
        false
    }

    /// Mirrors `RestartRandomPrice`: rewind the walk back to its
    /// starting point so a subsequent run starts fresh.
    fn release(&mut self, _state: &StockState) {
        self.mid = self.initial_price;
    }
}
