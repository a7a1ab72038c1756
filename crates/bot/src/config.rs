//! Bot configuration loaded from the environment.

use std::time::Duration;

use crate::error::{BotError, Result};

pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const API_URL_ENV: &str = "GITHUB_API_URL";
pub const WAIT_ENV: &str = "WAIT_SECONDS_BEFORE_RESOLVING_LABELS";
pub const CACHE_TTL_ENV: &str = "LABEL_CACHE_TTL_SECS";
pub const TARGET_REPO_ENV: &str = "LABELS_TARGET_REPO";

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_WAIT_SECS: u64 = 2;
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
const DEFAULT_TARGET_REPO: &str = "node";

/// Settings for talking to GitHub and labelling pull requests.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// API token sent with every request
    pub token: String,
    /// REST API base URL, without a trailing slash
    pub api_url: String,
    /// Delay before labelling a freshly opened pull request
    pub wait_before_resolving: Duration,
    /// How long the list of existing repository labels is reused
    pub label_cache_ttl: Duration,
    /// Only repositories with this name get subsystem labels
    pub target_repo: String,
}

impl BotConfig {
    /// Configuration with the given token and default settings.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            wait_before_resolving: Duration::from_secs(DEFAULT_WAIT_SECS),
            label_cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            target_repo: DEFAULT_TARGET_REPO.to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads:
    /// - `GITHUB_TOKEN` - required
    /// - `GITHUB_API_URL` - defaults to `https://api.github.com`
    /// - `WAIT_SECONDS_BEFORE_RESOLVING_LABELS` - defaults to 2
    /// - `LABEL_CACHE_TTL_SECS` - defaults to 3600
    /// - `LABELS_TARGET_REPO` - defaults to `node`
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(BotError::MissingToken)?;

        let mut config = Self::new(token);

        if let Some(url) = non_empty_var(API_URL_ENV) {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = seconds_var(WAIT_ENV)? {
            config.wait_before_resolving = secs;
        }
        if let Some(secs) = seconds_var(CACHE_TTL_ENV)? {
            config.label_cache_ttl = secs;
        }
        if let Some(repo) = non_empty_var(TARGET_REPO_ENV) {
            config.target_repo = repo;
        }

        Ok(config)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn seconds_var(name: &'static str) -> Result<Option<Duration>> {
    let Some(value) = non_empty_var(name) else {
        return Ok(None);
    };

    value
        .trim()
        .parse::<u64>()
        .map(|secs| Some(Duration::from_secs(secs)))
        .map_err(|_| BotError::InvalidConfig { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: callers run serially via #[serial] to avoid env var races
        unsafe {
            for name in [TOKEN_ENV, API_URL_ENV, WAIT_ENV, CACHE_TTL_ENV, TARGET_REPO_ENV] {
                std::env::remove_var(name);
            }
        }
    }

    #[test]
    #[serial]
    fn test_defaults_with_token_only() {
        clear_env();
        // SAFETY: This test runs serially via #[serial] to avoid env var races
        unsafe {
            std::env::set_var(TOKEN_ENV, "ghp_test");
        }

        let config = BotConfig::from_env().unwrap();
        assert_eq!(config.token, "ghp_test");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.wait_before_resolving, Duration::from_secs(2));
        assert_eq!(config.label_cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.target_repo, "node");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_token() {
        clear_env();
        assert!(matches!(BotConfig::from_env(), Err(BotError::MissingToken)));
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        // SAFETY: This test runs serially via #[serial] to avoid env var races
        unsafe {
            std::env::set_var(TOKEN_ENV, "ghp_test");
            std::env::set_var(API_URL_ENV, "http://localhost:8080/");
            std::env::set_var(WAIT_ENV, "0");
            std::env::set_var(CACHE_TTL_ENV, "60");
            std::env::set_var(TARGET_REPO_ENV, "node-fork");
        }

        let config = BotConfig::from_env().unwrap();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.wait_before_resolving, Duration::ZERO);
        assert_eq!(config.label_cache_ttl, Duration::from_secs(60));
        assert_eq!(config.target_repo, "node-fork");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_wait() {
        clear_env();
        // SAFETY: This test runs serially via #[serial] to avoid env var races
        unsafe {
            std::env::set_var(TOKEN_ENV, "ghp_test");
            std::env::set_var(WAIT_ENV, "soon");
        }

        let err = BotConfig::from_env().unwrap_err();
        assert!(matches!(
            err,
            BotError::InvalidConfig { name: WAIT_ENV, ref value } if value == "soon"
        ));
        clear_env();
    }
}
