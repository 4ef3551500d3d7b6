//! Configuration and spec file errors

use super::FpackError;

/// Creates an invalid configuration error
pub fn invalid(message: impl Into<String>) -> FpackError {
    FpackError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates a configuration parse error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> FpackError {
    FpackError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a configuration read error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> FpackError {
    FpackError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid coordinate error
pub fn invalid_coordinate(input: impl Into<String>, reason: impl Into<String>) -> FpackError {
    FpackError::InvalidCoordinate {
        input: input.into(),
        reason: reason.into(),
    }
}
