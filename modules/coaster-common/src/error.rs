use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoasterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{key} environment variable is required")]
    MissingEnv { key: String },

    #[error("{key} has an invalid value {value:?}: {reason}")]
    InvalidEnv {
        key: String,
        value: String,
        reason: String,
    },
}
