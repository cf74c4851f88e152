//! Reference resolution over the definition graph.
//!
//! ## Overview
//!
//! Definitions reference each other by name, forming an inclusion graph.
//! Turning that graph into the two-tier form DFIR-ORC understands takes three
//! steps, each in its own module:
//! 1. Classification - is a definition a selector, an orchestrator or mixed?
//! 2. Splitting - break a mixed definition into a selector and an orchestrator
//! 3. Flattening - inline orchestrator chains until only selector leaves remain
//!
//! The `graph` module offers read-only views of the same graph (inclusion
//! tree, reachable set) for reporting.
//!
//! All three steps are pure transforms over a [`DefinitionSet`]; logging of
//! diagnostics happens where they are detected, and callers decide what to do
//! with the returned values.

use std::collections::HashMap;

use log::info;

use crate::definition::Definition;

pub mod classify;
pub mod flatten;
pub mod graph;
pub mod split;

pub use classify::{classify, Class};
pub use flatten::{flatten, Flattened};
pub use graph::{inclusion_tree, reachable, InclusionNode, NodeStatus};
pub use split::split;

/// Ordered collection of definitions with lookup by name.
///
/// Lookup is by exact name. When two definitions share a name, the first one
/// inserted wins and the later one is shadowed.
#[derive(Debug, Clone, Default)]
pub struct DefinitionSet {
    definitions: Vec<Definition>,
    index: HashMap<String, usize>,
}

impl DefinitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, keeping insertion order.
    pub fn insert(&mut self, definition: Definition) {
        if let Some(&existing) = self.index.get(&definition.name) {
            info!(
                "Definition {} at {} is shadowed by {}",
                definition.name,
                definition.path.display(),
                self.definitions[existing].path.display()
            );
        } else {
            self.index
                .insert(definition.name.clone(), self.definitions.len());
        }
        self.definitions.push(definition);
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.index.get(name).map(|&i| &self.definitions[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Replace the definition at the same position as `definition.name`,
    /// or insert it if absent.
    pub fn replace(&mut self, definition: Definition) {
        match self.index.get(&definition.name) {
            Some(&i) => self.definitions[i] = definition,
            None => self.insert(definition),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn into_vec(self) -> Vec<Definition> {
        self.definitions
    }
}

impl FromIterator<Definition> for DefinitionSet {
    fn from_iter<I: IntoIterator<Item = Definition>>(iter: I) -> Self {
        let mut set = DefinitionSet::new();
        for definition in iter {
            set.insert(definition);
        }
        set
    }
}

impl Extend<Definition> for DefinitionSet {
    fn extend<I: IntoIterator<Item = Definition>>(&mut self, iter: I) {
        for definition in iter {
            self.insert(definition);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        let set: DefinitionSet = vec![
            Definition::new("A", "kape/A.tkape"),
            Definition::new("B", "kape/B.tkape"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
        assert!(set.contains("A"));
        assert_eq!(set.get("B").unwrap().path.to_str(), Some("kape/B.tkape"));
        assert!(set.get("C").is_none());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let mut set = DefinitionSet::new();
        set.insert(Definition::new("A", "kape/one/A.tkape"));
        set.insert(Definition::new("A", "kape/two/A.tkape"));

        assert_eq!(set.len(), 2);
        assert_eq!(
            set.get("A").unwrap().path.to_str(),
            Some("kape/one/A.tkape")
        );
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut set: DefinitionSet = vec![
            Definition::new("A", "A.tkape"),
            Definition::new("B", "B.tkape"),
        ]
        .into_iter()
        .collect();

        let mut replacement = Definition::new("A", "A.tkape");
        replacement.description = "changed".to_string();
        set.replace(replacement);
        set.replace(Definition::new("C", "C.tkape"));

        let names: Vec<&str> = set.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(set.get("A").unwrap().description, "changed");
    }
}
