//! Server-level errors
//!
//! Startup and shutdown failures; request-level errors live in
//! [`crate::utils::AppError`].

use thiserror::Error;

/// 服务器错误
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Result type for server lifecycle operations
pub type Result<T> = std::result::Result<T, ServerError>;
