//! Board runtime configuration.
//!
//! # Responsibility
//! - Hold tunables shared by the board, storage and seed source.
//! - Apply `KANBAN_*` environment overrides on top of defaults.
//!
//! # Invariants
//! - Defaults are usable without any environment.
//! - A malformed override is an error, never silently ignored.

use crate::repo::task_storage::DEFAULT_STORAGE_KEY;
use crate::seed::DEFAULT_SEED_URL;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const ENV_STORAGE_KEY: &str = "KANBAN_STORAGE_KEY";
pub const ENV_SEED_URL: &str = "KANBAN_SEED_URL";
pub const ENV_SEED_TIMEOUT_MS: &str = "KANBAN_SEED_TIMEOUT_MS";
pub const ENV_LOADING_DELAY_MS: &str = "KANBAN_LOADING_DELAY_MS";

const DEFAULT_SEED_TIMEOUT: Duration = Duration::from_secs(10);
pub(crate) const DEFAULT_LOADING_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Slot key holding the serialized task sequence.
    pub storage_key: String,
    /// Endpoint queried when the slot is empty.
    pub seed_url: String,
    pub seed_timeout: Duration,
    /// Minimum time the loading state stays visible during initialization.
    pub loading_delay: Duration,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_url: DEFAULT_SEED_URL.to_string(),
            seed_timeout: DEFAULT_SEED_TIMEOUT,
            loading_delay: DEFAULT_LOADING_DELAY,
        }
    }
}

impl BoardConfig {
    /// Defaults overridden by process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by `lookup`, which maps variable names to values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(key) = non_empty(lookup(ENV_STORAGE_KEY)) {
            config.storage_key = key;
        }
        if let Some(url) = non_empty(lookup(ENV_SEED_URL)) {
            config.seed_url = url;
        }
        if let Some(raw) = non_empty(lookup(ENV_SEED_TIMEOUT_MS)) {
            config.seed_timeout = parse_millis(ENV_SEED_TIMEOUT_MS, &raw)?;
        }
        if let Some(raw) = non_empty(lookup(ENV_LOADING_DELAY_MS)) {
            config.loading_delay = parse_millis(ENV_LOADING_DELAY_MS, &raw)?;
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidDuration { name: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDuration { name, value } => write!(
                f,
                "`{name}` must be a non-negative integer of milliseconds, got `{value}`"
            ),
        }
    }
}

impl Error for ConfigError {}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_millis(name: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    raw.parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidDuration {
            name,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::{BoardConfig, ConfigError, ENV_LOADING_DELAY_MS, ENV_SEED_URL};
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let config = BoardConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.storage_key, "kanban-tasks-jsl");
        assert_eq!(config.loading_delay, Duration::from_millis(300));
    }

    #[test]
    fn overrides_replace_defaults_and_blank_values_are_ignored() {
        let config = BoardConfig::from_lookup(lookup(&[
            (ENV_SEED_URL, "http://localhost:9000/tasks"),
            (ENV_LOADING_DELAY_MS, "0"),
            ("KANBAN_STORAGE_KEY", "  "),
        ]))
        .unwrap();

        assert_eq!(config.seed_url, "http://localhost:9000/tasks");
        assert_eq!(config.loading_delay, Duration::ZERO);
        assert_eq!(config.storage_key, "kanban-tasks-jsl");
    }

    #[test]
    fn malformed_duration_is_rejected() {
        let err = BoardConfig::from_lookup(lookup(&[(ENV_LOADING_DELAY_MS, "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDuration {
                name: ENV_LOADING_DELAY_MS,
                value: "soon".to_string()
            }
        );
    }
}
