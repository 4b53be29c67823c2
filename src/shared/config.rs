//! Runtime configuration
//!
//! Values come from the process environment (after `.env` is loaded by the
//! binary) and may be overridden by command-line flags.

use crate::shared::errors::{AppError, AppResult};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://shikimori.one";
pub const DEFAULT_USER_AGENT: &str = "anime-scroll/0.1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

const ENV_BASE_URL: &str = "ANIME_SCROLL_BASE_URL";
const ENV_USER_AGENT: &str = "ANIME_SCROLL_USER_AGENT";
const ENV_TIMEOUT_SECS: &str = "ANIME_SCROLL_TIMEOUT_SECS";
const ENV_VIEWPORT_WIDTH: &str = "ANIME_SCROLL_VIEWPORT_WIDTH";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Viewport width in CSS pixels, drives the grid column count
    pub viewport_width: u32,
    /// Ignore visibility events while a fetch is in flight
    pub guard_in_flight: bool,
    /// Stop observing the sentinel once a page comes back empty
    pub stop_on_empty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            guard_in_flight: false,
            stop_on_empty: false,
        }
    }
}

impl AppConfig {
    /// Build configuration from the process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = non_empty(lookup(ENV_BASE_URL)) {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(user_agent) = non_empty(lookup(ENV_USER_AGENT)) {
            config.user_agent = user_agent;
        }
        if let Some(raw) = non_empty(lookup(ENV_TIMEOUT_SECS)) {
            let secs: u64 = raw.trim().parse().map_err(|e| {
                AppError::ValidationError(format!("{} must be a number: {}", ENV_TIMEOUT_SECS, e))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = non_empty(lookup(ENV_VIEWPORT_WIDTH)) {
            config.viewport_width = raw.trim().parse().map_err(|e| {
                AppError::ValidationError(format!(
                    "{} must be a number: {}",
                    ENV_VIEWPORT_WIDTH, e
                ))
            })?;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_is_empty() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_url, "https://shikimori.one");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "http://localhost:8080/"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_VIEWPORT_WIDTH, "700"),
            (ENV_USER_AGENT, "test-agent"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.viewport_width, 700);
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn test_invalid_number_is_validation_error() {
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[(ENV_BASE_URL, "  ")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
