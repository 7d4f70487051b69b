// src/config.rs
//! Runtime configuration, resolved from env vars with sane defaults.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_ID: &str = "user123";
pub const DEFAULT_PORTFOLIO_REFRESH_SECS: u64 = 300;
pub const DEFAULT_REDDIT_REFRESH_SECS: u64 = 900;
pub const DEFAULT_BOOKMARK_PATH: &str = "newsBookmarks.json";

pub const ENV_BASE_URL: &str = "NEWS_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "NEWS_API_TIMEOUT_SECS";
pub const ENV_USER_ID: &str = "NEWS_USER_ID";
pub const ENV_BOOKMARK_PATH: &str = "NEWS_BOOKMARK_PATH";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_id: String,
    pub portfolio_refresh: Duration,
    pub reddit_refresh: Duration,
    pub bookmark_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_id: DEFAULT_USER_ID.to_string(),
            portfolio_refresh: Duration::from_secs(DEFAULT_PORTFOLIO_REFRESH_SECS),
            reddit_refresh: Duration::from_secs(DEFAULT_REDDIT_REFRESH_SECS),
            bookmark_path: DEFAULT_BOOKMARK_PATH.to_string(),
        }
    }
}

impl AppConfig {
    /// Resolve from the environment (after an optional `.env` load by the
    /// caller). Missing or malformed values fall back to defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = std::env::var(ENV_BASE_URL) {
            let v = v.trim().trim_end_matches('/').to_string();
            if !v.is_empty() {
                cfg.base_url = v;
            }
        }
        if let Some(secs) = parse_secs_env(std::env::var(ENV_TIMEOUT_SECS).ok()) {
            cfg.timeout = Duration::from_secs(secs);
        }
        if let Ok(v) = std::env::var(ENV_USER_ID) {
            if !v.trim().is_empty() {
                cfg.user_id = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var(ENV_BOOKMARK_PATH) {
            if !v.trim().is_empty() {
                cfg.bookmark_path = v.trim().to_string();
            }
        }
        cfg
    }
}

// parse optional seconds env and clamp to <1..=120>
fn parse_secs_env(raw: Option<String>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .map(|v| v.clamp(1, 120))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.base_url, "http://localhost:8000");
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert_eq!(cfg.user_id, "user123");
    }

    #[serial_test::serial]
    #[test]
    fn env_overrides_and_clamps() {
        std::env::set_var(ENV_BASE_URL, "https://api.example.com/");
        std::env::set_var(ENV_TIMEOUT_SECS, "999");
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.base_url, "https://api.example.com");
        assert_eq!(cfg.timeout, Duration::from_secs(120));
        std::env::remove_var(ENV_BASE_URL);
        std::env::remove_var(ENV_TIMEOUT_SECS);
    }
}
