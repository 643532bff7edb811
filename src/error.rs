use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("No account found for {email}")]
    InvalidAccount { email: String },
}

impl From<reqwest::Error> for StatsError {
    fn from(err: reqwest::Error) -> Self {
        StatsError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
