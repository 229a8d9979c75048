use std::fmt;

/// Fatal at `StockState` construction time: a required key was missing
/// from the `PartialStockState` mapping, or a present value failed a
/// sanity check. The owning task aborts; a batch run continues with
/// its other tasks (see `gh-batch`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    MissingRequiredKey { key: &'static str },
    InvalidValue { key: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingRequiredKey { key } => {
                write!(f, "missing required config key: {key}")
            }
            ConfigError::InvalidValue { key, reason } => {
                write!(f, "invalid value for config key {key}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
