//! Feature-pack and artifact identity
//!
//! A [`Coordinate`] is written `group:artifact[:extension[:classifier]]:version`.
//! The extension defaults to `jar` and the classifier to the empty string.
//! The (group, artifact) pair, [`Ga`], names a feature-pack slot independent
//! of version: a layout holds at most one version per slot.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{FpackError, Result, config as config_error};

/// Extension assumed when a coordinate does not name one
pub const DEFAULT_EXTENSION: &str = "jar";

/// Group and artifact of a coordinate, the key of a feature-pack slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ga {
    pub group: String,
    pub artifact: String,
}

impl Ga {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    /// Parse `group:artifact`
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.trim().split(':').collect();
        if parts.len() != 2 {
            return Err(config_error::invalid_coordinate(
                input,
                "expected group:artifact",
            ));
        }
        check_segments(input, &parts)?;
        Ok(Self::new(parts[0], parts[1]))
    }
}

impl fmt::Display for Ga {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

impl FromStr for Ga {
    type Err = FpackError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Full identity of a feature pack or artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub extension: String,
    pub classifier: String,
    pub version: String,
}

impl Coordinate {
    /// Create a coordinate with the default extension and no classifier
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            classifier: String::new(),
            version: version.into(),
        }
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = classifier.into();
        self
    }

    /// Same artifact, different version
    #[must_use]
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..self.clone()
        }
    }

    /// The feature-pack slot this coordinate occupies
    pub fn ga(&self) -> Ga {
        Ga::new(&self.group, &self.artifact)
    }

    /// Parse `group:artifact[:extension[:classifier]]:version`
    ///
    /// # Errors
    ///
    /// Returns [`FpackError::InvalidCoordinate`] for a wrong number of
    /// segments or an empty segment.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let parts: Vec<&str> = trimmed.split(':').collect();
        check_segments(input, &parts)?;

        match parts.as_slice() {
            [group, artifact, version] => Ok(Self::new(*group, *artifact, *version)),
            [group, artifact, extension, version] => {
                Ok(Self::new(*group, *artifact, *version).with_extension(*extension))
            }
            [group, artifact, extension, classifier, version] => Ok(Self::new(
                *group, *artifact, *version,
            )
            .with_extension(*extension)
            .with_classifier(*classifier)),
            _ => Err(config_error::invalid_coordinate(
                input,
                "expected 3 to 5 ':'-separated segments",
            )),
        }
    }
}

fn check_segments(input: &str, parts: &[&str]) -> Result<()> {
    if parts.iter().any(|part| part.trim().is_empty()) {
        return Err(config_error::invalid_coordinate(
            input,
            "segments must not be empty",
        ));
    }
    Ok(())
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)?;
        if !self.classifier.is_empty() {
            write!(f, ":{}:{}", self.extension, self.classifier)?;
        } else if self.extension != DEFAULT_EXTENSION {
            write!(f, ":{}", self.extension)?;
        }
        write!(f, ":{}", self.version)
    }
}

impl FromStr for Coordinate {
    type Err = FpackError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.group
            .cmp(&other.group)
            .then_with(|| self.artifact.cmp(&other.artifact))
            .then_with(|| self.classifier.cmp(&other.classifier))
            .then_with(|| self.extension.cmp(&other.extension))
            .then_with(|| self.version.cmp(&other.version))
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                <$ty>::parse(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

string_serde!(Coordinate);
string_serde!(Ga);
