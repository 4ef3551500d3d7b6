//! Configuration lineup errors

use super::FpackError;

pub fn unknown_spot(spot: impl Into<String>) -> FpackError {
    FpackError::UnknownConfigSpot { spot: spot.into() }
}

pub fn duplicate_id(spot: impl Into<String>, id: impl Into<String>) -> FpackError {
    FpackError::DuplicateConfigId {
        spot: spot.into(),
        id: id.into(),
    }
}

pub fn unresolved_reference(
    owner: impl ToString,
    spot: impl Into<String>,
    id: impl Into<String>,
) -> FpackError {
    FpackError::UnresolvedConfigReference {
        owner: owner.to_string(),
        spot: spot.into(),
        id: id.into(),
    }
}

pub fn missing_parameter(owner: impl ToString, param: impl Into<String>) -> FpackError {
    FpackError::MissingConfigParameter {
        owner: owner.to_string(),
        param: param.into(),
    }
}

pub fn unexpected_parameter(owner: impl ToString, param: impl Into<String>) -> FpackError {
    FpackError::UnexpectedConfigParameter {
        owner: owner.to_string(),
        param: param.into(),
    }
}

pub fn reference_cycle(chain: impl Into<String>) -> FpackError {
    FpackError::ConfigReferenceCycle {
        chain: chain.into(),
    }
}
