//! Schema and fragment types for configuration lineups

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, config as config_error, lineup as lineup_error};

/// Position of a spot in the schema tree, root first
///
/// The last element is the spot itself, the one before it its parent spot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaPath(Vec<String>);

impl SchemaPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn spot(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn parent_spot(&self) -> Option<&str> {
        let len = self.0.len();
        if len < 2 {
            None
        } else {
            Some(&self.0[len - 2])
        }
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Identity of one fragment: its spot plus the value of its id parameter
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigId {
    pub spot: String,
    pub id: String,
}

impl ConfigId {
    pub fn new(spot: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            spot: spot.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.spot, self.id)
    }
}

/// A parameter whose value is the id of a fragment at another spot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRef {
    pub param: String,
    pub spot: String,

    /// Whether the parameter may be left out
    #[serde(default)]
    pub nillable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDescription {
    pub name: String,

    #[serde(default)]
    pub required: bool,
}

/// Schema entry for one spot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FeatureConfigDescription {
    pub path: SchemaPath,

    /// Parameter holding the fragment's id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Parameter holding the id of an explicit parent fragment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_ref: Option<String>,

    /// Whether the spot may occur more than once under one parent
    #[serde(default)]
    pub multiple: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParamDescription>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<ConfigRef>,
}

impl FeatureConfigDescription {
    pub fn new(path: SchemaPath) -> Self {
        Self {
            path,
            id: None,
            parent_ref: None,
            multiple: false,
            parameters: Vec::new(),
            references: Vec::new(),
        }
    }

    pub fn spot(&self) -> &str {
        self.path.spot().unwrap_or_default()
    }

    /// Declared parameters plus the id, parent and reference parameters
    pub fn accepts(&self, param: &str) -> bool {
        self.parameters.iter().any(|p| p.name == param)
            || self.id.as_deref() == Some(param)
            || self.parent_ref.as_deref() == Some(param)
            || self.references.iter().any(|r| r.param == param)
    }
}

/// One configuration fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureConfig {
    pub spot: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl FeatureConfig {
    pub fn new(spot: impl Into<String>) -> Self {
        Self {
            spot: spot.into(),
            params: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// A validated set of spot descriptions
#[derive(Debug, Clone)]
pub struct Schema {
    descriptions: BTreeMap<String, FeatureConfigDescription>,
}

impl Schema {
    /// Index descriptions by spot and check that every spot they mention
    /// exists
    pub fn new(descriptions: Vec<FeatureConfigDescription>) -> Result<Self> {
        let mut by_spot = BTreeMap::new();
        for description in descriptions {
            let Some(spot) = description.path.spot().map(str::to_string) else {
                return Err(config_error::invalid("schema path cannot be empty"));
            };
            if by_spot.contains_key(&spot) {
                return Err(config_error::invalid(format!(
                    "spot '{spot}' is described more than once"
                )));
            }
            by_spot.insert(spot, description);
        }

        let schema = Self {
            descriptions: by_spot,
        };
        for description in schema.descriptions.values() {
            schema.check(description)?;
        }
        for spot in schema.descriptions.keys() {
            schema.check_ancestry(spot)?;
        }
        Ok(schema)
    }

    /// Walk the parent chain of `spot` up to a root spot
    fn check_ancestry(&self, spot: &str) -> Result<()> {
        let mut seen = BTreeSet::new();
        let mut current = Some(spot);
        while let Some(spot) = current {
            if !seen.insert(spot) {
                return Err(config_error::invalid(format!(
                    "spot '{spot}' is its own ancestor"
                )));
            }
            current = self
                .get(spot)
                .and_then(|description| description.path.parent_spot());
        }
        Ok(())
    }

    fn check(&self, description: &FeatureConfigDescription) -> Result<()> {
        let mut names = BTreeSet::new();
        for param in &description.parameters {
            if !names.insert(param.name.as_str()) {
                return Err(config_error::invalid(format!(
                    "parameter '{}' of spot '{}' is declared more than once",
                    param.name,
                    description.spot()
                )));
            }
        }

        if let Some(parent) = description.path.parent_spot() {
            let parent_description = self.require(parent)?;
            if description.parent_ref.is_some() && parent_description.id.is_none() {
                return Err(config_error::invalid(format!(
                    "spot '{}' refers to its parent by id but '{parent}' has no id",
                    description.spot()
                )));
            }
        } else if description.parent_ref.is_some() {
            return Err(config_error::invalid(format!(
                "root spot '{}' cannot refer to a parent",
                description.spot()
            )));
        }

        for reference in &description.references {
            if self.require(&reference.spot)?.id.is_none() {
                return Err(config_error::invalid(format!(
                    "spot '{}' references '{}', which has no id",
                    description.spot(),
                    reference.spot
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, spot: &str) -> Option<&FeatureConfigDescription> {
        self.descriptions.get(spot)
    }

    /// # Errors
    ///
    /// Fails with [`crate::error::FpackError::UnknownConfigSpot`].
    pub fn require(&self, spot: &str) -> Result<&FeatureConfigDescription> {
        self.get(spot)
            .ok_or_else(|| lineup_error::unknown_spot(spot))
    }
}
