//! Differences between an installation and its provisioned state

use std::collections::BTreeMap;

/// How an installation deviates from a fresh provisioning of its records
///
/// Paths are relative to the installation root and `/`-separated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffReport {
    /// Present in the installation only
    pub added: Vec<String>,

    /// Expected but missing from the installation
    pub removed: Vec<String>,

    /// Present in both with different content
    pub modified: Vec<String>,
}

impl DiffReport {
    /// Compare expected file hashes against the actual ones
    pub fn compare(expected: &BTreeMap<String, String>, actual: &BTreeMap<String, String>) -> Self {
        let mut report = Self::default();

        for (path, hash) in expected {
            match actual.get(path) {
                None => report.removed.push(path.clone()),
                Some(actual_hash) if actual_hash != hash => report.modified.push(path.clone()),
                Some(_) => {}
            }
        }

        report.added = actual
            .keys()
            .filter(|path| !expected.contains_key(*path))
            .cloned()
            .collect();

        report
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}
