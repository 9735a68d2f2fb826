use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::dataset::{CacheSettings, FileStore, HttpSource};
use crate::error::ConfigError;
use crate::rules::tables::RuleTables;

pub const DEFAULT_COUNTRIES_URL: &str =
    "https://restcountries.com/v3.1/all?fields=name,capital,population,languages,currencies,flag,subregion,area,borders";
pub const DEFAULT_FALLBACK_PATH: &str = "data/countries_fallback.json";

const DEFAULT_CACHE_TTL_SECS: u64 = 6 * 60 * 60;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 12;
const DEFAULT_FALLBACK_REFRESH_DAYS: u64 = 7;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Upstream
    pub countries_url: String,
    pub fetch_timeout: Duration,

    // Cache
    pub cache_ttl: Duration,
    pub fallback_path: PathBuf,
    pub fallback_refresh: Duration,

    // Rules
    pub rule_tables_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            countries_url: DEFAULT_COUNTRIES_URL.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            fallback_path: PathBuf::from(DEFAULT_FALLBACK_PATH),
            fallback_refresh: days(DEFAULT_FALLBACK_REFRESH_DAYS),
            rule_tables_path: None,
        }
    }
}

impl Config {
    /// Load configuration from `ATLASQUIZ_*` environment variables.
    /// Unset or blank variables take their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let number = |key: &'static str, default: u64| -> Result<u64, ConfigError> {
            match var(key) {
                None => Ok(default),
                Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber { key, value }),
            }
        };

        Ok(Config {
            countries_url: var("ATLASQUIZ_COUNTRIES_URL").unwrap_or_else(|| DEFAULT_COUNTRIES_URL.to_string()),
            fetch_timeout: Duration::from_secs(number("ATLASQUIZ_FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS)?),
            cache_ttl: Duration::from_secs(number("ATLASQUIZ_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?),
            fallback_path: var("ATLASQUIZ_FALLBACK_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FALLBACK_PATH)),
            fallback_refresh: days(number("ATLASQUIZ_FALLBACK_REFRESH_DAYS", DEFAULT_FALLBACK_REFRESH_DAYS)?),
            rule_tables_path: var("ATLASQUIZ_RULE_TABLES").map(PathBuf::from),
        })
    }

    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings { ttl: self.cache_ttl, fallback_refresh: self.fallback_refresh }
    }

    pub fn http_source(&self) -> HttpSource {
        HttpSource::new(&self.countries_url, self.fetch_timeout)
    }

    pub fn file_store(&self) -> FileStore {
        FileStore::new(&self.fallback_path)
    }

    /// Rule tables from `ATLASQUIZ_RULE_TABLES`, or the built-in set.
    pub fn rule_tables(&self) -> Result<RuleTables, ConfigError> {
        match &self.rule_tables_path {
            Some(path) => RuleTables::load(path),
            None => Ok(RuleTables::builtin().clone()),
        }
    }
}

fn days(n: u64) -> Duration {
    Duration::from_secs(n.saturating_mul(24 * 60 * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.cache_ttl, Duration::from_secs(21_600));
        assert_eq!(config.fallback_refresh, Duration::from_secs(7 * 86_400));
        assert!(config.countries_url.starts_with("https://restcountries.com/v3.1/all"));
    }

    #[test]
    fn overrides_are_applied() {
        let config = config(&[
            ("ATLASQUIZ_COUNTRIES_URL", "http://localhost:8080/all"),
            ("ATLASQUIZ_CACHE_TTL_SECS", "60"),
            ("ATLASQUIZ_FETCH_TIMEOUT_SECS", " 3 "),
            ("ATLASQUIZ_FALLBACK_PATH", "/tmp/countries.json"),
            ("ATLASQUIZ_FALLBACK_REFRESH_DAYS", "0"),
            ("ATLASQUIZ_RULE_TABLES", "rules.json"),
        ])
        .unwrap();

        assert_eq!(config.countries_url, "http://localhost:8080/all");
        assert_eq!(config.cache_settings(), CacheSettings { ttl: Duration::from_secs(60), fallback_refresh: Duration::ZERO });
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert_eq!(config.file_store().path(), std::path::Path::new("/tmp/countries.json"));
        assert_eq!(config.rule_tables_path, Some(PathBuf::from("rules.json")));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config(&[("ATLASQUIZ_CACHE_TTL_SECS", "  "), ("ATLASQUIZ_RULE_TABLES", "")]).unwrap();
        assert_eq!(config.cache_ttl, Duration::from_secs(21_600));
        assert_eq!(config.rule_tables_path, None);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = config(&[("ATLASQUIZ_CACHE_TTL_SECS", "six hours")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { key: "ATLASQUIZ_CACHE_TTL_SECS", .. }));

        assert!(config(&[("ATLASQUIZ_FALLBACK_REFRESH_DAYS", "-1")]).is_err());
    }

    #[test]
    fn rule_tables_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(&path, r#"{"controlled_defaults": {"peso": "MXN"}}"#).unwrap();

        let config = Config { rule_tables_path: Some(path), ..Config::default() };
        let tables = config.rule_tables().unwrap();
        assert_eq!(tables.default_code_for("peso"), Some("MXN"));
        assert_eq!(tables.default_code_for("dollar"), None);

        let missing = Config { rule_tables_path: Some(dir.path().join("nope.json")), ..Config::default() };
        assert!(matches!(missing.rule_tables(), Err(ConfigError::Io { .. })));

        assert_eq!(Config::default().rule_tables().unwrap().default_code_for("dollar"), Some("USD"));
    }
}
