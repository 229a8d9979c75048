use gh_decimal::Decimal;

use crate::error::ConfigError;

const HISTORICAL_PROFIT_THRESHOLD_VAR: &str = "HISTORICAL_PROFIT_THRESHOLD";
const PRINT_PNL_VALUES_VAR: &str = "PRINT_PNL_VALUES";

/// The default historical profit threshold (§6), used when
/// `HISTORICAL_PROFIT_THRESHOLD` is unset.
pub fn default_historical_profit_threshold() -> Decimal {
    Decimal::parse_str("0.01").expect("0.01 is a valid decimal literal")
}

/// `HISTORICAL_PROFIT_THRESHOLD` (§6): overrides the historical exit
/// threshold. Unset ⇒ the default. Set but unparseable ⇒
/// [`ConfigError::InvalidEnvVar`] — spec.md §7 names an unparseable
/// threshold env var as a fatal configuration error, which is why this
/// does not fall back to the default the way the C++ original's
/// `GetHistoricalProfitThreshold` silently does; see DESIGN.md.
pub fn historical_profit_threshold_from_env() -> Result<Decimal, ConfigError> {
    match std::env::var(HISTORICAL_PROFIT_THRESHOLD_VAR) {
        Err(_) => Ok(default_historical_profit_threshold()),
        Ok(value) => {
            Decimal::parse_str(value.trim()).map_err(|_| ConfigError::InvalidEnvVar {
                var: HISTORICAL_PROFIT_THRESHOLD_VAR,
                value,
            })
        }
    }
}

/// `PRINT_PNL_VALUES` (§6): toggles per-security result printing.
/// Same truthy semantics as `gh-source::mode_from_env`'s
/// `RANDOM_SNAPSHOT`/`HISTORICAL_SNAPSHOT` handling — not shared code
/// across the crate boundary since it's a three-line predicate.
pub fn print_pnl_values_enabled() -> bool {
    match std::env::var(PRINT_PNL_VALUES_VAR) {
        Ok(v) => {
            let v = v.trim().to_ascii_lowercase();
            !v.is_empty() && v != "0" && v != "false"
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gh_decimal::decimal;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear() {
        std::env::remove_var(HISTORICAL_PROFIT_THRESHOLD_VAR);
        std::env::remove_var(PRINT_PNL_VALUES_VAR);
    }

    #[test]
    fn unset_threshold_uses_default() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear();
        assert_eq!(
            historical_profit_threshold_from_env().unwrap(),
            decimal!("0.01")
        );
    }

    #[test]
    fn valid_threshold_overrides_default() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear();
        std::env::set_var(HISTORICAL_PROFIT_THRESHOLD_VAR, "0.03");
        let result = historical_profit_threshold_from_env().unwrap();
        clear();
        assert_eq!(result, decimal!("0.03"));
    }

    #[test]
    fn unparseable_threshold_is_a_fatal_config_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear();
        std::env::set_var(HISTORICAL_PROFIT_THRESHOLD_VAR, "not-a-number");
        let err = historical_profit_threshold_from_env().unwrap_err();
        clear();
        assert!(matches!(
            err,
            ConfigError::InvalidEnvVar {
                var: HISTORICAL_PROFIT_THRESHOLD_VAR,
                ..
            }
        ));
    }

    #[test]
    fn print_pnl_values_defaults_to_disabled() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear();
        assert!(!print_pnl_values_enabled());
    }

    #[test]
    fn print_pnl_values_recognizes_truthy_and_falsy() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear();
        std::env::set_var(PRINT_PNL_VALUES_VAR, "1");
        assert!(print_pnl_values_enabled());
        std::env::set_var(PRINT_PNL_VALUES_VAR, "false");
        assert!(!print_pnl_values_enabled());
        clear();
    }
}
