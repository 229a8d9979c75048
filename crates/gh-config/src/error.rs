use std::fmt;
use std::path::PathBuf;

/// Configuration errors (§7 "fatal at construction"): the owning task
/// aborts with this as its diagnostic, a batch run continues its
/// other tasks.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseJson {
        path: PathBuf,
        source: serde_json::Error,
    },
    ParseYaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    /// A recognized key in `PartialStockState` failed validation once
    /// the factory tried to build a `StockState` from it.
    State(gh_state::ConfigError),
    /// `HISTORICAL_PROFIT_THRESHOLD` was set but could not be parsed
    /// as a decimal. Diverges deliberately from the C++ original's
    /// silent fallback to the default — spec.md §7 calls an
    /// unparseable threshold env var fatal — see DESIGN.md.
    InvalidEnvVar { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config file {}: {source}", path.display())
            }
            ConfigError::ParseJson { path, source } => {
                write!(f, "failed to parse JSON config {}: {source}", path.display())
            }
            ConfigError::ParseYaml { path, source } => {
                write!(f, "failed to parse YAML config {}: {source}", path.display())
            }
            ConfigError::State(e) => write!(f, "{e}"),
            ConfigError::InvalidEnvVar { var, value } => {
                write!(f, "{var}={value:?} is not a valid decimal")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::ParseJson { source, .. } => Some(source),
            ConfigError::ParseYaml { source, .. } => Some(source),
            ConfigError::State(e) => Some(e),
            ConfigError::InvalidEnvVar { .. } => None,
        }
    }
}

impl From<gh_state::ConfigError> for ConfigError {
    fn from(e: gh_state::ConfigError) -> Self {
        ConfigError::State(e)
    }
}
