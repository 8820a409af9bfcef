//! The set of targets a frontend reports as supported.

use std::collections::HashSet;

use crate::core::triple::TargetTriple;

/// Ordered, duplicate-free set of target triples.
///
/// Built fresh from discovery on every run and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetUniverse {
    triples: Vec<TargetTriple>,
    names: HashSet<String>,
}

impl TargetUniverse {
    /// Build a universe, keeping the first occurrence of each triple.
    pub fn new(triples: impl IntoIterator<Item = TargetTriple>) -> Self {
        let mut universe = TargetUniverse::default();

        for triple in triples {
            let name = triple.to_string();
            if universe.names.insert(name) {
                universe.triples.push(triple);
            } else {
                tracing::debug!("ignoring duplicate target `{}`", triple);
            }
        }

        universe
    }

    /// Whether `name` is a supported target identifier.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Look up the triple for an identifier.
    pub fn get(&self, name: &str) -> Option<&TargetTriple> {
        if !self.contains(name) {
            return None;
        }
        self.triples.iter().find(|t| t.to_string() == name)
    }

    /// Iterate in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &TargetTriple> {
        self.triples.iter()
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Identifiers in discovery order.
    pub fn names(&self) -> Vec<String> {
        self.triples.iter().map(|t| t.to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a TargetUniverse {
    type Item = &'a TargetTriple;
    type IntoIter = std::slice::Iter<'a, TargetTriple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
