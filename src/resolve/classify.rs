//! Classification of definitions by the kind of their references.

use std::fmt;

use serde::Serialize;

use crate::definition::Definition;

/// Derived class of a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Class {
    /// Every reference names a filesystem target (or there are none).
    Selector,
    /// Every reference names another definition.
    Orchestrator,
    /// Both kinds are present; must be split before flattening.
    Mixed,
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Class::Selector => "selector",
            Class::Orchestrator => "orchestrator",
            Class::Mixed => "mixed",
        };
        f.write_str(label)
    }
}

/// Classify a definition. A definition with no references is a selector.
pub fn classify(definition: &Definition) -> Class {
    let definition_refs = definition
        .references
        .iter()
        .filter(|r| r.target.is_definition())
        .count();

    if definition_refs == 0 {
        Class::Selector
    } else if definition_refs == definition.references.len() {
        Class::Orchestrator
    } else {
        Class::Mixed
    }
}
