//! Error types for checklist
//!
//! Exit codes:
//! - 0: Success (including "not found" no-ops and the help listing)
//! - 2: User error (bad args, bad config)
//! - 4: Operation failed (I/O, malformed data file, lock contention)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the checklist CLI
pub mod exit_codes {
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for checklist operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Operation failures (exit code 4)
    #[error("Invalid data in {path}: {message}")]
    InvalidData { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("No item ids left to assign (counter is at {0})")]
    IdsExhausted(u64),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) | Error::InvalidConfig(_) => exit_codes::USER_ERROR,

            Error::InvalidData { .. }
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::LockFailed(_)
            | Error::IdsExhausted(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for JSON error output, when the variant carries any.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::InvalidData { path, message } => Some(serde_json::json!({
                "path": path.display().to_string(),
                "message": message,
            })),
            Error::LockFailed(path) => Some(serde_json::json!({
                "path": path.display().to_string(),
            })),
            Error::InvalidArgument(message) | Error::InvalidConfig(message) => {
                Some(serde_json::json!({ "message": message }))
            }
            _ => None,
        }
    }
}

/// Result type alias for checklist operations
pub type Result<T> = std::result::Result<T, Error>;
