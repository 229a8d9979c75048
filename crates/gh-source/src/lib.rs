//! The snapshot source boundary: everything the reconciliation engine
//! needs from a quote producer, and the two debug/offline
//! implementations this simulator ships with — historical replay from
//! a preloaded file, and a deterministic random walk. A live brokerage
//! feed is out of scope; only the trait is specified for it.

mod env_mode;
mod error;
mod historical;
mod random_walk;
mod source;

pub use env_mode::{mode_from_env, EnvModeError, Mode};
pub use error::SourceError;
pub use historical::{HistoricalFileError, HistoricalSource};
pub use random_walk::RandomWalkSource;
pub use source::SnapshotSource;
