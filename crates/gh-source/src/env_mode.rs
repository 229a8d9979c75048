use std::fmt;

/// Which snapshot source the process should wire up, selected by the
/// `RANDOM_SNAPSHOT` / `HISTORICAL_SNAPSHOT` environment variables
/// (§6). `Live` is out of scope for this crate — no source here
/// implements it — but is a valid mode to select and reject at the
/// caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Random,
    Historical,
    Live,
}

/// Both `RANDOM_SNAPSHOT` and `HISTORICAL_SNAPSHOT` were truthy at
/// once. Exactly one (or neither, meaning live) is allowed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EnvModeError;

impl fmt::Display for EnvModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RANDOM_SNAPSHOT and HISTORICAL_SNAPSHOT cannot both be set"
        )
    }
}

impl std::error::Error for EnvModeError {}

/// A variable is "truthy" if it is set to anything other than empty,
/// `"0"`, or `"false"` (case-insensitive) — present-but-disabled is a
/// common way to toggle these in a shared `.env` file without
/// deleting the line.
fn is_truthy(var: &str) -> bool {
    match std::env::var(var) {
        Ok(v) => {
            let v = v.trim().to_ascii_lowercase();
            !v.is_empty() && v != "0" && v != "false"
        }
        Err(_) => false,
    }
}

/// Resolve [`Mode`] from the environment. Neither variable set means
/// `Live`; both set is an error (§7 "configuration errors").
pub fn mode_from_env() -> Result<Mode, EnvModeError> {
    let random = is_truthy("RANDOM_SNAPSHOT");
    let historical = is_truthy("HISTORICAL_SNAPSHOT");

    match (random, historical) {
        (true, true) => Err(EnvModeError),
        (true, false) => Ok(Mode::Random),
        (false, true) => Ok(Mode::Historical),
        (false, false) => Ok(Mode::Live),
    }
}
