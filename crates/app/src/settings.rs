//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` and from `BUDGET__*` environment variables
//! (e.g. `BUDGET__RATE__TIMEOUT_SECS=10`).
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::rate::DEFAULT_RATE_URL;

const DEFAULT_SETTINGS_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    /// Log level for the `budget` and `engine` targets.
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Default for Database {
    fn default() -> Self {
        Database::Sqlite("budget.db".to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Rate {
    /// Endpoint returning the official REF→LOCAL rate.
    pub url: String,
    pub timeout_secs: u64,
    /// When set, this rate is used and nothing is fetched.
    pub fixed: Option<f64>,
}

impl Default for Rate {
    fn default() -> Self {
        Self {
            url: DEFAULT_RATE_URL.to_string(),
            timeout_secs: 5,
            fixed: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub database: Database,
    pub rate: Rate,
}

impl Settings {
    pub fn new(path: Option<&str>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path.unwrap_or(DEFAULT_SETTINGS_PATH)).required(false))
            .add_source(Environment::with_prefix("BUDGET").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults_when_empty() {
        let settings = from_toml("");

        assert_eq!(settings.app.level, "warn");
        assert_eq!(settings.database, Database::Sqlite("budget.db".to_string()));
        assert_eq!(settings.rate.url, DEFAULT_RATE_URL);
        assert_eq!(settings.rate.timeout_secs, 5);
        assert_eq!(settings.rate.fixed, None);
    }

    #[test]
    fn reads_every_section() {
        let settings = from_toml(
            r#"
            database = "memory"

            [app]
            level = "debug"

            [rate]
            url = "http://localhost:8080/rate"
            timeout_secs = 2
            fixed = 3.25
            "#,
        );

        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.database, Database::Memory);
        assert_eq!(settings.rate.url, "http://localhost:8080/rate");
        assert_eq!(settings.rate.timeout_secs, 2);
        assert_eq!(settings.rate.fixed, Some(3.25));
    }

    #[test]
    fn sqlite_path() {
        let settings = from_toml("[database]\nsqlite = \"/tmp/ledger.db\"");

        assert_eq!(
            settings.database,
            Database::Sqlite("/tmp/ledger.db".to_string())
        );
    }
}
