//! Package resolution errors

use super::FpackError;

/// Creates a package not found error
pub fn not_found(feature_pack: impl ToString, package: impl Into<String>) -> FpackError {
    FpackError::PackageNotFound {
        feature_pack: feature_pack.to_string(),
        package: package.into(),
    }
}

/// Creates an error for a required local dependency that is excluded
pub fn unsatisfied(
    feature_pack: impl ToString,
    package: impl Into<String>,
    dependency: impl Into<String>,
) -> FpackError {
    FpackError::UnsatisfiedPackageDependency {
        feature_pack: feature_pack.to_string(),
        package: package.into(),
        dependency: dependency.into(),
    }
}

/// Creates an error for a required external dependency that is excluded
pub fn unsatisfied_external(
    feature_pack: impl ToString,
    package: impl Into<String>,
    target: impl ToString,
    dependency: impl Into<String>,
) -> FpackError {
    FpackError::UnsatisfiedExternalPackageDependency {
        feature_pack: feature_pack.to_string(),
        package: package.into(),
        target: target.to_string(),
        dependency: dependency.into(),
    }
}

/// Creates an error for a parameterized package resolved without a parameter resolver
pub fn parameter_resolver_not_provided(
    feature_pack: impl ToString,
    package: impl Into<String>,
) -> FpackError {
    FpackError::PackageParameterResolverNotProvided {
        feature_pack: feature_pack.to_string(),
        package: package.into(),
    }
}
