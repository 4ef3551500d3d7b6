//! Configuration lineup
//!
//! Orders configuration fragments so that every fragment comes after its
//! parent and after every fragment it references.
//!
//! ## Algorithm
//!
//! 1. Every fragment whose spot declares an id parameter is registered
//!    under its [`ConfigId`].
//! 2. Every fragment is linked to its parent: the fragment named by its
//!    parent-reference parameter when one is given, otherwise a default
//!    parent. A spot that occurs once shares one default parent instance
//!    (the first fragment given for that spot, or a synthesized one); a spot
//!    that occurs multiple times gets a fresh synthesized instance per child.
//!    Synthesized parents carry no parameters and get their own parents the
//!    same way.
//! 3. Fragments are lined up depth first in input order, parent and
//!    references before the fragment itself.
//!
//! Unlike package resolution, reaching a fragment that is still being lined
//! up is an error ([`crate::error::FpackError::ConfigReferenceCycle`]): no
//! order can satisfy a reference cycle.

pub mod schema;

use std::collections::HashMap;

use crate::error::{Result, lineup as lineup_error};

pub use schema::{
    ConfigId, ConfigRef, FeatureConfig, FeatureConfigDescription, ParamDescription, Schema,
    SchemaPath,
};

/// Where a lined-up fragment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Position in the input
    Input(usize),
    /// Default parent created by the lineup
    Synthesized,
}

/// One entry of a lineup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinedUp {
    pub config: FeatureConfig,
    pub origin: Origin,
}

impl LinedUp {
    /// Short name used in messages and listings
    pub fn label(&self, schema: &Schema) -> String {
        match schema.get(&self.config.spot) {
            Some(description) => label(description, &self.config, self.origin),
            None => self.config.spot.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

#[derive(Debug)]
struct Node {
    config: FeatureConfig,
    origin: Origin,
    parent: Option<usize>,
    references: Vec<usize>,
}

/// Order `configs` against `schema`
///
/// # Errors
///
/// Fails on unknown spots, missing or unexpected parameters, duplicate ids,
/// unresolvable references and reference cycles.
pub fn lineup(schema: &Schema, configs: &[FeatureConfig]) -> Result<Vec<LinedUp>> {
    let mut lineup = Lineup::new(schema);
    lineup.register(configs)?;
    lineup.link(configs.len())?;
    lineup.run(configs.len())
}

struct Lineup<'s> {
    schema: &'s Schema,
    nodes: Vec<Node>,
    registry: HashMap<ConfigId, usize>,
    shared_parents: HashMap<String, usize>,
    visits: Vec<Option<Visit>>,
    path: Vec<usize>,
    output: Vec<usize>,
}

impl<'s> Lineup<'s> {
    fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            nodes: Vec::new(),
            registry: HashMap::new(),
            shared_parents: HashMap::new(),
            visits: Vec::new(),
            path: Vec::new(),
            output: Vec::new(),
        }
    }

    fn register(&mut self, configs: &[FeatureConfig]) -> Result<()> {
        for (index, config) in configs.iter().enumerate() {
            let description = self.schema.require(&config.spot)?;
            let owner = label(description, config, Origin::Input(index));

            for name in config.params.keys() {
                if !description.accepts(name) {
                    return Err(lineup_error::unexpected_parameter(&owner, name));
                }
            }
            for param in description.parameters.iter().filter(|p| p.required) {
                if config.param(&param.name).is_none() {
                    return Err(lineup_error::missing_parameter(&owner, &param.name));
                }
            }

            if let Some(id_param) = &description.id {
                let id = config
                    .param(id_param)
                    .ok_or_else(|| lineup_error::missing_parameter(&owner, id_param))?;
                let key = ConfigId::new(&config.spot, id);
                if self.registry.contains_key(&key) {
                    return Err(lineup_error::duplicate_id(&config.spot, id));
                }
                self.registry.insert(key, index);
            }

            self.nodes.push(Node {
                config: config.clone(),
                origin: Origin::Input(index),
                parent: None,
                references: Vec::new(),
            });
        }
        Ok(())
    }

    fn link(&mut self, inputs: usize) -> Result<()> {
        for index in 0..inputs {
            let parent = self.parent_of(index)?;
            let references = self.references_of(index)?;
            let node = &mut self.nodes[index];
            node.parent = parent;
            node.references = references;
        }
        Ok(())
    }

    fn parent_of(&mut self, index: usize) -> Result<Option<usize>> {
        let schema = self.schema;
        let node = &self.nodes[index];
        let description = schema.require(&node.config.spot)?;
        let Some(parent_spot) = description.path.parent_spot() else {
            return Ok(None);
        };

        let explicit = description
            .parent_ref
            .as_deref()
            .and_then(|param| node.config.param(param));
        if let Some(id) = explicit {
            let key = ConfigId::new(parent_spot, id);
            return match self.registry.get(&key) {
                Some(&parent) => Ok(Some(parent)),
                None => Err(lineup_error::unresolved_reference(
                    label(description, &node.config, node.origin),
                    parent_spot,
                    id,
                )),
            };
        }

        if schema.require(parent_spot)?.multiple {
            self.synthesize(parent_spot).map(Some)
        } else {
            self.shared_parent(parent_spot).map(Some)
        }
    }

    fn shared_parent(&mut self, spot: &str) -> Result<usize> {
        if let Some(&index) = self.shared_parents.get(spot) {
            return Ok(index);
        }

        let given = self
            .nodes
            .iter()
            .position(|node| matches!(node.origin, Origin::Input(_)) && node.config.spot == spot);
        let index = match given {
            Some(index) => index,
            None => self.synthesize(spot)?,
        };
        self.shared_parents.insert(spot.to_string(), index);
        Ok(index)
    }

    fn synthesize(&mut self, spot: &str) -> Result<usize> {
        let index = self.nodes.len();
        self.nodes.push(Node {
            config: FeatureConfig::new(spot),
            origin: Origin::Synthesized,
            parent: None,
            references: Vec::new(),
        });
        let parent = self.parent_of(index)?;
        self.nodes[index].parent = parent;
        Ok(index)
    }

    fn references_of(&self, index: usize) -> Result<Vec<usize>> {
        let node = &self.nodes[index];
        let description = self.schema.require(&node.config.spot)?;

        let mut references = Vec::new();
        for reference in &description.references {
            let Some(id) = node.config.param(&reference.param) else {
                if reference.nillable {
                    continue;
                }
                return Err(lineup_error::missing_parameter(
                    label(description, &node.config, node.origin),
                    &reference.param,
                ));
            };
            let key = ConfigId::new(&reference.spot, id);
            match self.registry.get(&key) {
                Some(&target) => references.push(target),
                None => {
                    return Err(lineup_error::unresolved_reference(
                        label(description, &node.config, node.origin),
                        &reference.spot,
                        id,
                    ));
                }
            }
        }
        Ok(references)
    }

    fn run(mut self, inputs: usize) -> Result<Vec<LinedUp>> {
        self.visits = vec![None; self.nodes.len()];
        for index in 0..inputs {
            self.line_up(index)?;
        }

        Ok(self
            .output
            .iter()
            .map(|&index| LinedUp {
                config: self.nodes[index].config.clone(),
                origin: self.nodes[index].origin,
            })
            .collect())
    }

    fn line_up(&mut self, index: usize) -> Result<()> {
        match self.visits[index] {
            Some(Visit::Done) => return Ok(()),
            Some(Visit::InProgress) => return Err(self.cycle(index)),
            None => {}
        }

        self.visits[index] = Some(Visit::InProgress);
        self.path.push(index);

        if let Some(parent) = self.nodes[index].parent {
            self.line_up(parent)?;
        }
        let references = self.nodes[index].references.clone();
        for target in references {
            self.line_up(target)?;
        }

        self.path.pop();
        self.visits[index] = Some(Visit::Done);
        self.output.push(index);
        Ok(())
    }

    fn cycle(&self, index: usize) -> crate::error::FpackError {
        let start = self
            .path
            .iter()
            .position(|&n| n == index)
            .unwrap_or_default();
        let chain: Vec<String> = self.path[start..]
            .iter()
            .chain(std::iter::once(&index))
            .map(|&n| self.node_label(n))
            .collect();
        lineup_error::reference_cycle(chain.join(" -> "))
    }

    fn node_label(&self, index: usize) -> String {
        let node = &self.nodes[index];
        match self.schema.get(&node.config.spot) {
            Some(description) => label(description, &node.config, node.origin),
            None => node.config.spot.clone(),
        }
    }
}

/// `spot=id` for fragments with an id, the spot and input position otherwise
fn label(description: &FeatureConfigDescription, config: &FeatureConfig, origin: Origin) -> String {
    if let Some(id) = description.id.as_deref().and_then(|param| config.param(param)) {
        return ConfigId::new(&config.spot, id).to_string();
    }
    match origin {
        Origin::Input(index) => format!("{}#{}", config.spot, index),
        Origin::Synthesized => format!("{} (default)", config.spot),
    }
}
