use thiserror::Error;

pub type Result<T> = std::result::Result<T, WikiError>;

#[derive(Debug, Error)]
pub enum WikiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl WikiError {
    /// Network failures and server-side statuses are worth another attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            WikiError::Network(_) => true,
            WikiError::Api { status, .. } => *status == 429 || *status >= 500,
            WikiError::Parse(_) => false,
        }
    }
}

impl From<reqwest::Error> for WikiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WikiError::Parse(err.to_string())
        } else {
            WikiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for WikiError {
    fn from(err: serde_json::Error) -> Self {
        WikiError::Parse(err.to_string())
    }
}
