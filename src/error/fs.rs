//! File system errors

use std::path::Path;

use super::FpackError;

/// Creates a file not found error
pub fn not_found(path: &Path) -> FpackError {
    FpackError::FileNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a file read error
pub fn read_failed(path: &Path, reason: impl ToString) -> FpackError {
    FpackError::FileReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a file write error
pub fn write_failed(path: &Path, reason: impl ToString) -> FpackError {
    FpackError::FileWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> FpackError {
    FpackError::IoError {
        message: message.into(),
        source: None,
    }
}
