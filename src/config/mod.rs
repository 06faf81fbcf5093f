//! Configuration loading for the read-model engine.
//!
//! Loads layered `.env` files and environment variables prefixed with
//! `RENTMARKET_`, producing a typed [`AppConfig`].

use std::{collections::BTreeMap, env, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application configuration derived from `RENTMARKET_*` environment
/// variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AppConfig {
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
    /// Maximum number of values the backing store accepts in a single
    /// membership query. 30 matches the observed store ceiling; adjust when
    /// targeting a store with a different limit.
    #[serde(default = "default_membership_query_limit")]
    pub membership_query_limit: usize,
    /// Rows kept in the recent-payments dashboard view.
    #[serde(default = "default_recent_payments_limit")]
    pub recent_payments_limit: usize,
    /// Rows kept in the recent-applications dashboard view.
    #[serde(default = "default_recent_applications_limit")]
    pub recent_applications_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            membership_query_limit: default_membership_query_limit(),
            recent_payments_limit: default_recent_payments_limit(),
            recent_applications_limit: default_recent_applications_limit(),
        }
    }
}

impl AppConfig {
    /// Validates the configuration, returning an error when a bound is
    /// violated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.membership_query_limit == 0 {
            return Err(ConfigError::InvalidMembershipQueryLimit {
                value: self.membership_query_limit,
            });
        }

        if self.recent_payments_limit == 0 {
            return Err(ConfigError::InvalidViewLimit {
                field: "recent_payments_limit",
                value: self.recent_payments_limit,
            });
        }

        if self.recent_applications_limit == 0 {
            return Err(ConfigError::InvalidViewLimit {
                field: "recent_applications_limit",
                value: self.recent_applications_limit,
            });
        }

        Ok(())
    }
}

fn default_profile() -> String {
    "local".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_membership_query_limit() -> usize {
    30 // observed store ceiling for `in` queries
}

fn default_recent_payments_limit() -> usize {
    5
}

fn default_recent_applications_limit() -> usize {
    3
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
    #[error("membership query limit must be at least 1, got {value}")]
    InvalidMembershipQueryLimit { value: usize },
    #[error("{field} must be at least 1, got {value}")]
    InvalidViewLimit { field: &'static str, value: usize },
}

/// Loads configuration using layered `.env` files and `RENTMARKET_*` env
/// vars.
pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new loader rooted at the current working directory.
    pub fn new() -> Self {
        Self {
            base_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Creates a loader rooted at the provided directory (useful for tests).
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Loads configuration, later layers overriding earlier ones and the
    /// process environment winning over files.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let (mut layered, profile_hint) = self.collect_layered_env()?;

        // Overlay process environment last so it wins.
        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix("RENTMARKET_") {
                layered.insert(stripped.to_string(), value);
            }
        }

        let profile = layered
            .remove("PROFILE")
            .filter(|v| !v.is_empty())
            .unwrap_or(profile_hint);
        let log_level = layered
            .remove("LOG_LEVEL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_log_level);
        let log_format = layered
            .remove("LOG_FORMAT")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_log_format);
        let membership_query_limit = layered
            .remove("MEMBERSHIP_QUERY_LIMIT")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_membership_query_limit);
        let recent_payments_limit = layered
            .remove("RECENT_PAYMENTS_LIMIT")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_recent_payments_limit);
        let recent_applications_limit = layered
            .remove("RECENT_APPLICATIONS_LIMIT")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_recent_applications_limit);

        let config = AppConfig {
            profile,
            log_level,
            log_format,
            membership_query_limit,
            recent_payments_limit,
            recent_applications_limit,
        };

        config.validate()?;
        Ok(config)
    }

    fn collect_layered_env(&self) -> Result<(BTreeMap<String, String>, String), ConfigError> {
        let mut values = BTreeMap::new();

        self.merge_dotenv(self.base_dir.join(".env"), &mut values)?;
        self.merge_dotenv(self.base_dir.join(".env.local"), &mut values)?;

        let profile = env::var("RENTMARKET_PROFILE")
            .ok()
            .or_else(|| values.get("PROFILE").cloned())
            .unwrap_or_else(default_profile);

        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}", &profile)),
            &mut values,
        )?;
        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}.local", &profile)),
            &mut values,
        )?;

        Ok((values, profile))
    }

    fn merge_dotenv(
        &self,
        path: PathBuf,
        values: &mut BTreeMap<String, String>,
    ) -> Result<(), ConfigError> {
        match dotenvy::from_path_iter(&path) {
            Ok(iter) => {
                for item in iter {
                    let (key, value) = item.map_err(|source| ConfigError::EnvFile {
                        path: path.clone(),
                        source,
                    })?;
                    if let Some(stripped) = key.strip_prefix("RENTMARKET_") {
                        values.insert(stripped.to_string(), value);
                    }
                }
                Ok(())
            }
            Err(dotenvy::Error::Io(ref io_err))
                if io_err.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(())
            }
            Err(err) => Err(ConfigError::EnvFile { path, source: err }),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.membership_query_limit, 30);
        assert_eq!(config.recent_payments_limit, 5);
    }

    #[test]
    fn zero_membership_limit_is_rejected() {
        let config = AppConfig {
            membership_query_limit: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMembershipQueryLimit { value: 0 })
        ));
    }

    #[test]
    fn zero_view_limit_is_rejected() {
        let config = AppConfig {
            recent_payments_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
