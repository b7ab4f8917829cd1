use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, YouTubeError>;

/// Error reasons the Data API uses when the project's allowance is spent.
pub const QUOTA_REASONS: &[&str] = &["quotaExceeded", "dailyLimitExceeded", "rateLimitExceeded"];

#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Quota exceeded ({reason})")]
    QuotaExceeded { reason: String },

    #[error("API error (status {status}, reason {reason}): {message}")]
    Api {
        status: u16,
        reason: String,
        message: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl YouTubeError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, YouTubeError::QuotaExceeded { .. })
    }

    /// Worth retrying: network failures and 5xx. Quota is never transient.
    pub fn is_transient(&self) -> bool {
        match self {
            YouTubeError::Network(_) => true,
            YouTubeError::Api { status, .. } => *status >= 500,
            YouTubeError::QuotaExceeded { .. } | YouTubeError::Parse(_) => false,
        }
    }

    /// Classify a non-success response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => {
                let reason = envelope
                    .error
                    .errors
                    .first()
                    .and_then(|e| e.reason.clone())
                    .unwrap_or_default();
                if QUOTA_REASONS.contains(&reason.as_str()) {
                    YouTubeError::QuotaExceeded { reason }
                } else {
                    YouTubeError::Api {
                        status,
                        reason,
                        message: envelope.error.message.unwrap_or_else(|| body.to_string()),
                    }
                }
            }
            Err(_) => match QUOTA_REASONS.iter().find(|r| body.contains(*r)) {
                Some(reason) => YouTubeError::QuotaExceeded {
                    reason: reason.to_string(),
                },
                None => YouTubeError::Api {
                    status,
                    reason: String::new(),
                    message: body.to_string(),
                },
            },
        }
    }
}

impl From<reqwest::Error> for YouTubeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            YouTubeError::Parse(err.to_string())
        } else {
            YouTubeError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for YouTubeError {
    fn from(err: serde_json::Error) -> Self {
        YouTubeError::Parse(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    reason: Option<String>,
}
