//! Command handler modules for `gh`.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod random;
pub mod run;

/// Initialize `tracing-subscriber` with an env-filter reading
/// `RUST_LOG` (default `info`), matching the teacher's daemon-side
/// logging setup.
pub fn init_tracing() {
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
