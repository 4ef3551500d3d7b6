//! Feature-pack layout errors

use super::FpackError;

/// Creates a version conflict error for a feature-pack slot
pub fn version_conflict(
    ga: impl ToString,
    registered: impl ToString,
    requested: impl ToString,
) -> FpackError {
    FpackError::FeaturePackVersionConflict {
        ga: ga.to_string(),
        registered: registered.to_string(),
        requested: requested.to_string(),
    }
}

/// Creates a spec parse error
pub fn spec_parse_failed(path: impl Into<String>, reason: impl ToString) -> FpackError {
    FpackError::SpecParseFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Creates a spec validation error
pub fn spec_invalid(owner: impl ToString, message: impl Into<String>) -> FpackError {
    FpackError::SpecInvalid {
        owner: owner.to_string(),
        message: message.into(),
    }
}

/// Creates an artifact not found error
pub fn artifact_not_found(coordinate: impl ToString, path: impl Into<String>) -> FpackError {
    FpackError::ArtifactNotFound {
        coordinate: coordinate.to_string(),
        path: path.into(),
    }
}

/// Creates an archive unpack error
pub fn unpack_failed(path: impl Into<String>, reason: impl ToString) -> FpackError {
    FpackError::ArchiveUnpackFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}
