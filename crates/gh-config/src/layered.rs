use std::fs;
use std::path::Path;

use gh_state::PartialStockState;
use serde_json::Value;

use crate::error::ConfigError;

/// Load a single `PartialStockState` from a JSON file. Unknown keys in
/// the document are ignored (§6) — `PartialStockState` has no
/// `deny_unknown_fields`, so `serde_json` drops them silently.
pub fn load_json(path: impl AsRef<Path>) -> Result<PartialStockState, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::ParseJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and deep-merge a sequence of YAML layers into one
/// `PartialStockState`, later files overriding earlier ones key by
/// key. Modeled on `mqk-config::load_layered_yaml`'s merge pattern,
/// minus its canonicalization/hashing step — that exists there to give
/// `mqk-audit` a tamper-evident config fingerprint, which this crate
/// has no use for (see `gh-audit`'s trading log, which omits the same
/// hash chain for the same reason).
pub fn load_layered_yaml(paths: &[impl AsRef<Path>]) -> Result<PartialStockState, ConfigError> {
    let mut merged = Value::Object(Default::default());

    for path in paths {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let yaml_value: serde_yaml::Value =
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::ParseYaml {
                path: path.to_path_buf(),
                source,
            })?;
        let json_value = serde_json::to_value(yaml_value).map_err(|source| ConfigError::ParseJson {
            path: path.to_path_buf(),
            source,
        })?;
        deep_merge(&mut merged, json_value);
    }

    serde_json::from_value(merged).map_err(|source| ConfigError::ParseJson {
        path: paths
            .last()
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or_default(),
        source,
    })
}

/// Objects merge recursively; any other value (including arrays) is
/// replaced wholesale by the later layer.
fn deep_merge(dst: &mut Value, src: Value) {
    match (dst, src) {
        (Value::Object(dst_map), Value::Object(src_map)) => {
            for (k, v) in src_map {
                match dst_map.get_mut(&k) {
                    Some(existing) => deep_merge(existing, v),
                    None => {
                        dst_map.insert(k, v);
                    }
                }
            }
        }
        (dst_slot, src_val) => {
            *dst_slot = src_val;
        }
    }
}
