//! Harness configuration and the fixture loader.
//!
//! Configuration is read from `apismoke.toml` in the current directory, or
//! from the path given by the `APISMOKE_CONFIG` environment variable. A
//! missing file falls back to built-in defaults; a present but malformed
//! file is an error.
//!
//! ```toml
//! base_url = "https://reqres.in"
//! fixtures = "test_data.json"
//! report = "test_results.csv"
//! error_log = "log.txt"
//! timeout = "30s"
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::*;

use crate::{Error, Result};

/// Environment variable name for specifying the config file path.
const APISMOKE_CONFIG_ENV: &str = "APISMOKE_CONFIG";

/// Harness configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Root URL of the service under test.
    pub base_url: String,
    /// Path to the fixture document.
    pub fixtures: PathBuf,
    /// Path to the CSV report. Truncated at the start of every run.
    pub report: PathBuf,
    /// Path to the error log. Appended to, never truncated.
    pub error_log: PathBuf,
    /// Per-request timeout.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            base_url: "https://reqres.in".into(),
            fixtures: "test_data.json".into(),
            report: "test_results.csv".into(),
            error_log: "log.txt".into(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl HarnessConfig {
    /// Load harness configuration.
    ///
    /// Loading order:
    /// 1. If `APISMOKE_CONFIG` env var is set, load from that path
    /// 2. Otherwise, load from `apismoke.toml` in the current directory
    pub fn load() -> Result<HarnessConfig> {
        match std::env::var(APISMOKE_CONFIG_ENV) {
            Ok(path) => {
                let path = Path::new(&path);
                if !path.exists() {
                    return Err(Error::ConfigLoad(format!(
                        "config file specified by {APISMOKE_CONFIG_ENV} not found: {path:?}"
                    )));
                }
                debug!("loading config from {APISMOKE_CONFIG_ENV}={path:?}");
                HarnessConfig::load_from(path)
            }
            Err(_) => HarnessConfig::load_from(Path::new("apismoke.toml")),
        }
    }

    fn load_from(path: &Path) -> Result<HarnessConfig> {
        let Ok(buf) = std::fs::read_to_string(path) else {
            return Ok(HarnessConfig::default());
        };

        let cfg: HarnessConfig = toml::from_str(&buf).map_err(|e| {
            Error::ConfigLoad(format!(
                "failed to deserialize {} into apismoke::HarnessConfig: {e}",
                path.display()
            ))
        })?;

        debug!("configuration loaded: {cfg:#?}");

        Ok(cfg)
    }
}

/// Named test inputs consumed by the checks. Loaded once per run from a JSON
/// object and read-only thereafter.
#[derive(Debug, Clone)]
pub struct FixtureSet {
    data: serde_json::Map<String, Value>,
}

impl FixtureSet {
    /// Load the fixture document. Individual values are not validated here;
    /// a missing key is only discovered when a check looks it up.
    pub fn load(path: &Path) -> Result<FixtureSet> {
        let buf = std::fs::read_to_string(path)
            .map_err(|e| Error::FixtureLoad(format!("{}: {e}", path.display())))?;
        let value: Value = serde_json::from_str(&buf)
            .map_err(|e| Error::FixtureLoad(format!("{}: {e}", path.display())))?;
        let Value::Object(data) = value else {
            return Err(Error::FixtureLoad(format!(
                "{}: expected a top-level JSON object",
                path.display()
            )));
        };
        Ok(FixtureSet { data })
    }

    pub fn get(&self, key: &str) -> Result<&Value> {
        self.data
            .get(key)
            .ok_or_else(|| Error::FixtureKey(key.to_string()))
    }

    #[cfg(test)]
    pub(crate) fn from_value(value: Value) -> FixtureSet {
        let Value::Object(data) = value else {
            panic!("fixture value must be a JSON object");
        };
        FixtureSet { data }
    }
}
