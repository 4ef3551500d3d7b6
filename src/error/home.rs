//! Installation home errors

use super::FpackError;

pub fn already_installed(ga: impl ToString) -> FpackError {
    FpackError::FeaturePackAlreadyInstalled { ga: ga.to_string() }
}

pub fn unknown_feature_pack(ga: impl ToString) -> FpackError {
    FpackError::UnknownFeaturePack { ga: ga.to_string() }
}

pub fn not_usable(path: impl Into<String>) -> FpackError {
    FpackError::HomeDirNotUsable { path: path.into() }
}

pub fn not_provisioned(path: impl Into<String>) -> FpackError {
    FpackError::NotProvisioned { path: path.into() }
}
