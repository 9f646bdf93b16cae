//! Runtime configuration
//!
//! Defaults overridden by `ENERGYSAVER_*` environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::db;

pub const DB_PATH_VAR: &str = "ENERGYSAVER_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "ENERGYSAVER_LOG_LEVEL";
pub const ENV_VAR: &str = "ENERGYSAVER_ENV";

/// Default number of predictions returned by history queries
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;
/// Default number of chat messages returned by history queries
pub const DEFAULT_CHAT_HISTORY_LIMIT: u32 = 50;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: tracing::Level,
    pub environment: Environment,
    pub history_limit: u32,
    pub chat_history_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: db::default_db_path(),
            log_level: tracing::Level::INFO,
            environment: Environment::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            chat_history_limit: DEFAULT_CHAT_HISTORY_LIMIT,
        }
    }
}

impl AppConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using an arbitrary variable lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(DB_PATH_VAR) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(level) = get(LOG_LEVEL_VAR) {
            config.log_level = tracing::Level::from_str(level.trim()).map_err(|_| {
                ConfigError::InvalidValue {
                    var: LOG_LEVEL_VAR,
                    value: level.clone(),
                }
            })?;
        }

        if let Some(env) = get(ENV_VAR) {
            config.environment = env.parse().map_err(|_| ConfigError::InvalidValue {
                var: ENV_VAR,
                value: env.clone(),
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.log_level, tracing::Level::INFO);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.chat_history_limit, 50);
        assert!(config.db_path.ends_with("energysaver/energysaver.db"));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (DB_PATH_VAR, "/tmp/energy.db"),
            (LOG_LEVEL_VAR, "debug"),
            (ENV_VAR, "Production"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/energy.db"));
        assert_eq!(config.log_level, tracing::Level::DEBUG);
        assert!(config.environment.is_production());
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup(&[(LOG_LEVEL_VAR, " ")])).unwrap();
        assert_eq!(config.log_level, tracing::Level::INFO);
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup(&[(LOG_LEVEL_VAR, "loud")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: LOG_LEVEL_VAR,
                value: "loud".to_string()
            }
        );

        assert!(AppConfig::from_lookup(lookup(&[(ENV_VAR, "staging")])).is_err());
    }
}
