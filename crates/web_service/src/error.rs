use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use completion_client::ProviderError;
use excerpt_core::TemplateError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("Security check failed.")]
    InvalidNonce,

    #[error("Post {0} not found.")]
    PostNotFound(u64),

    #[error("Provider error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Provider request failed: {0}")]
    Transport(String),

    #[error("Could not extract excerpt from the provider response.")]
    BadProviderResponse,

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Config(message) => AppError::Configuration(message),
            ProviderError::Upstream { status, message } => AppError::Upstream { status, message },
            ProviderError::Transport(err) => AppError::Transport(err.to_string()),
            ProviderError::Decode(_) | ProviderError::MissingContent => {
                AppError::BadProviderResponse
            }
        }
    }
}

impl From<TemplateError> for AppError {
    fn from(err: TemplateError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

#[derive(Serialize)]
struct JsonError {
    success: bool,
    error: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Configuration(_) => StatusCode::BAD_REQUEST,
            AppError::PermissionDenied(_) | AppError::InvalidNonce => StatusCode::FORBIDDEN,
            AppError::PostNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream { .. }
            | AppError::Transport(_)
            | AppError::BadProviderResponse => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_)
            | AppError::StorageError(_)
            | AppError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(JsonError {
            success: false,
            error: self.to_string(),
        })
    }
}
