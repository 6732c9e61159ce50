use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors raised by channel delivery and configuration.
///
/// The encoder itself has no error path: malformed input degrades to the
/// empty document, which callers must check before delivering anywhere.
#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    ValidationError(String),
    IoError(String),
    ClipboardError(String),
    UploadError(String),
    ConfigError(String),
    Unsupported(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
            AppError::ClipboardError(msg) => write!(f, "Clipboard error: {}", msg),
            AppError::UploadError(msg) => write!(f, "Upload error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::Unsupported(msg) => write!(f, "Unsupported channel: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::UploadError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
