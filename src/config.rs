use url::Url;

use crate::error::{Result, StatsError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Classic per-user statistics CGI endpoint.
pub const DEFAULT_BASE_URL: &str = "http://setiathome2.ssl.berkeley.edu/fcgi-bin/fcgi";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            StatsError::Configuration(format!("invalid base URL '{}': {}", base_url, e))
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(StatsError::Configuration(format!(
                "unsupported URL scheme '{}'",
                base_url.scheme()
            )));
        }

        Ok(Self {
            base_url,
            ..Self::default()
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            user_agent: format!("seti-stats/{}", VERSION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_stats_endpoint() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert!(config.user_agent.starts_with("seti-stats/"));
        assert!(config.user_agent.ends_with(VERSION));
    }

    #[test]
    fn custom_base_url_keeps_user_agent() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:8080/stats").unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/stats");
        assert_eq!(config.user_agent, ClientConfig::default().user_agent);
    }

    #[test]
    fn rejects_unparseable_and_non_http_urls() {
        assert!(matches!(
            ClientConfig::with_base_url("not a url"),
            Err(StatsError::Configuration(_))
        ));
        assert!(matches!(
            ClientConfig::with_base_url("ftp://example.com/stats"),
            Err(StatsError::Configuration(_))
        ));
    }
}
