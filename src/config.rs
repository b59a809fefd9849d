use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable holding the PostgreSQL connection URL
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable holding the default input file
pub const INPUT_PATH_ENV: &str = "TRADE_INPUT_PATH";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
}

/// Settings for one processing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// PostgreSQL connection URL (passed to the driver unchecked)
    pub database_url: String,

    /// Input file; stdin when absent
    #[serde(default)]
    pub input_path: Option<PathBuf>,
}

impl ProcessorConfig {
    pub fn new(database_url: impl Into<String>) -> Result<Self, ConfigError> {
        let database_url = database_url.into();
        if database_url.trim().is_empty() {
            return Err(ConfigError::Missing(DATABASE_URL_ENV));
        }

        Ok(Self {
            database_url,
            input_path: None,
        })
    }

    pub fn with_input_path(mut self, input_path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(input_path.into());
        self
    }

    /// Load settings from the process environment
    ///
    /// Explicit values (e.g. from command line flags) take precedence over
    /// the environment. Call `dotenvy::dotenv()` first to pick up a `.env`
    /// file.
    pub fn from_env(
        database_url: Option<String>,
        input_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok(), database_url, input_path)
    }

    fn resolve<F>(
        lookup: F,
        database_url: Option<String>,
        input_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = database_url
            .or_else(|| lookup(DATABASE_URL_ENV))
            .ok_or(ConfigError::Missing(DATABASE_URL_ENV))?;
        let config = Self::new(database_url)?;

        let input_path = input_path.or_else(|| {
            lookup(INPUT_PATH_ENV)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from)
        });

        Ok(match input_path {
            Some(path) => config.with_input_path(path),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_from_environment() {
        let lookup = lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/trades"),
            ("TRADE_INPUT_PATH", "/data/trades.csv"),
        ]);
        let config = ProcessorConfig::resolve(lookup, None, None).unwrap();

        assert_eq!(config.database_url, "postgres://localhost/trades");
        assert_eq!(config.input_path, Some(PathBuf::from("/data/trades.csv")));
    }

    #[test]
    fn test_input_path_optional() {
        let lookup = lookup_from(&[("DATABASE_URL", "postgres://db")]);
        let config = ProcessorConfig::resolve(lookup, None, None).unwrap();
        assert_eq!(config.input_path, None);
    }

    #[test]
    fn test_explicit_values_override_environment() {
        let lookup = lookup_from(&[
            ("DATABASE_URL", "postgres://env/trades"),
            ("TRADE_INPUT_PATH", "/env/trades.csv"),
        ]);
        let config = ProcessorConfig::resolve(
            lookup,
            Some("postgres://cli/trades".to_string()),
            Some(PathBuf::from("/cli/trades.csv")),
        )
        .unwrap();

        assert_eq!(config.database_url, "postgres://cli/trades");
        assert_eq!(config.input_path, Some(PathBuf::from("/cli/trades.csv")));
    }

    #[test]
    fn test_explicit_url_without_environment() {
        let config =
            ProcessorConfig::resolve(lookup_from(&[]), Some("postgres://cli".to_string()), None)
                .unwrap();
        assert_eq!(config.database_url, "postgres://cli");
        assert_eq!(config.input_path, None);
    }

    #[test]
    fn test_missing_database_url() {
        let result = ProcessorConfig::resolve(lookup_from(&[]), None, None);
        assert_eq!(result, Err(ConfigError::Missing("DATABASE_URL")));

        let result = ProcessorConfig::resolve(lookup_from(&[("DATABASE_URL", "  ")]), None, None);
        assert_eq!(result, Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_connection_string_is_opaque() {
        let config = ProcessorConfig::new("not a url at all").unwrap();
        assert_eq!(config.database_url, "not a url at all");
    }
}
