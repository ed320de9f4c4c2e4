use thiserror::Error;

/// Application-level errors (command line)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] icalfx_service::error::ServiceError),

    #[error(transparent)]
    RfcError(#[from] icalfx_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] icalfx_core::error::CoreError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
