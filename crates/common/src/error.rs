use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Insufficient data: need {required} candles, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Data provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Alert sink unavailable: {0}")]
    SinkUnavailable(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
