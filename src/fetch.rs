use std::time::Instant;

use tracing::info;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Result, StatsError};

/// Target address and the URL derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRequest {
    email: String,
    url: Url,
}

impl StatsRequest {
    pub fn new(email: &str, config: &ClientConfig) -> Result<Self> {
        let email = email.trim();
        if email.is_empty() {
            return Err(StatsError::Configuration(
                "an email address is required".to_string(),
            ));
        }

        let mut url = config.base_url.clone();
        url.query_pairs_mut()
            .append_pair("cmd", "user_xml")
            .append_pair("email", email);

        Ok(Self {
            email: email.to_string(),
            url,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Performs the single GET a lookup needs and returns the body text.
pub trait Transport {
    fn get(&self, url: &Url) -> Result<String>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<String> {
        let start_time = Instant::now();
        info!(action = "start", component = "http_fetch", url = %url, "Requesting user statistics");

        let response = self.client.get(url.as_str()).send()?.error_for_status()?;
        let status = response.status();
        let body = response.text()?;

        info!(
            action = "complete",
            component = "http_fetch",
            status = status.as_u16(),
            body_bytes = body.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Fetched user statistics"
        );
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_encodes_address() {
        let config = ClientConfig::with_base_url("http://stats.example.com/fcgi").unwrap();
        let request = StatsRequest::new("john.doe+seti@example.com", &config).unwrap();

        assert_eq!(request.email(), "john.doe+seti@example.com");
        assert_eq!(
            request.url().as_str(),
            "http://stats.example.com/fcgi?cmd=user_xml&email=john.doe%2Bseti%40example.com"
        );
    }

    #[test]
    fn request_trims_surrounding_whitespace() {
        let request = StatsRequest::new("  jd@example.com\n", &ClientConfig::default()).unwrap();
        assert_eq!(request.email(), "jd@example.com");
        assert!(request.url().as_str().ends_with("email=jd%40example.com"));
    }

    #[test]
    fn empty_address_is_a_configuration_error() {
        for email in ["", "   ", "\t\n"] {
            assert!(matches!(
                StatsRequest::new(email, &ClientConfig::default()),
                Err(StatsError::Configuration(_))
            ));
        }
    }
}
