use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    HttpRequestError(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to read stored reviews: {0}")]
    StorageUnreadable(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid rating '{0}': expected an integer between 1 and 5")]
    InvalidRating(String),

    #[error("Unknown movie id: {0}")]
    UnknownMovie(String),

    #[error("Other error: {0}")]
    Other(String),
}
