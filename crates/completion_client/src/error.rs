use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Provider error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Could not decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Provider response did not contain any completion text")]
    MissingContent,

    #[error("{0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
