use std::time::Duration;

use crate::errors::{FeedError, FeedResult};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.71 Safari/537.36";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct Config {
    /// Extra substrings that disqualify an inline `<img>` URL
    pub ignore_image_if_contains: Vec<String>,
    pub http_timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_image_if_contains: Vec::new(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> FeedResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_vars(
            std::env::var("FEEDIMAGE_IGNORE").ok().as_deref(),
            std::env::var("FEEDIMAGE_HTTP_TIMEOUT_SECS").ok().as_deref(),
            std::env::var("FEEDIMAGE_USER_AGENT").ok().as_deref(),
        )
    }

    fn from_vars(
        ignore: Option<&str>,
        timeout_secs: Option<&str>,
        user_agent: Option<&str>,
    ) -> FeedResult<Self> {
        let ignore_image_if_contains = ignore
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let http_timeout = match timeout_secs {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    FeedError::Config(format!("FEEDIMAGE_HTTP_TIMEOUT_SECS is not a number: {}", raw))
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let user_agent = user_agent
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or(DEFAULT_USER_AGENT)
            .to_string();

        Ok(Self {
            ignore_image_if_contains,
            http_timeout,
            user_agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_vars(None, None, None).unwrap();

        assert!(config.ignore_image_if_contains.is_empty());
        assert_eq!(config.http_timeout, Duration::from_secs(120));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_ignore_list_is_split_and_trimmed() {
        let config = Config::from_vars(Some(" pixel.gif, ,/tracker/ "), None, None).unwrap();

        assert_eq!(
            config.ignore_image_if_contains,
            vec!["pixel.gif".to_string(), "/tracker/".to_string()]
        );
    }

    #[test]
    fn test_invalid_timeout_is_config_error() {
        let result = Config::from_vars(None, Some("soon"), None);
        assert!(matches!(result, Err(FeedError::Config(_))));
    }

    #[test]
    fn test_blank_user_agent_falls_back() {
        let config = Config::from_vars(None, Some("5"), Some("  ")).unwrap();

        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }
}
