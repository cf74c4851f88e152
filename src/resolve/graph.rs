//! Read-only views of the inclusion graph.
//!
//! Unlike [`flatten`](super::flatten), these walks never fail: unresolved
//! references and cycles become marked nodes, which is what the `tree` and
//! `ls` commands need to describe a broken definition set.

use std::collections::HashSet;

use super::{Class, DefinitionSet};
use crate::definition::Definition;

/// How a node in the inclusion tree was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Resolved,
    /// No definition with this name was scanned.
    Unresolved,
    /// The name is already being expanded higher up this branch.
    Cycle,
    /// Children exist but were not expanded because of the depth limit.
    Truncated,
}

/// A node of the inclusion tree rooted at some definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionNode {
    pub name: String,
    pub class: Option<Class>,
    pub status: NodeStatus,
    /// Number of filesystem references held directly by this definition.
    pub files: usize,
    pub children: Vec<InclusionNode>,
}

/// Build the inclusion tree below `root`, expanding at most `max_depth`
/// levels of definition references.
pub fn inclusion_tree(all: &DefinitionSet, root: &Definition, max_depth: usize) -> InclusionNode {
    let mut chain = Vec::new();
    build(all, root, max_depth, &mut chain)
}

fn build(
    all: &DefinitionSet,
    definition: &Definition,
    remaining: usize,
    chain: &mut Vec<String>,
) -> InclusionNode {
    let files = definition
        .references
        .iter()
        .filter(|r| !r.target.is_definition())
        .count();
    let mut node = InclusionNode {
        name: definition.name.clone(),
        class: Some(definition.class()),
        status: NodeStatus::Resolved,
        files,
        children: Vec::new(),
    };

    let has_children = definition.referenced_names().next().is_some();
    if remaining == 0 {
        if has_children {
            node.status = NodeStatus::Truncated;
        }
        return node;
    }

    chain.push(definition.name.clone());
    for name in definition.referenced_names() {
        let child = match all.get(name) {
            _ if chain.iter().any(|n| n == name) => leaf(name, NodeStatus::Cycle),
            Some(child) => build(all, child, remaining - 1, chain),
            None => leaf(name, NodeStatus::Unresolved),
        };
        node.children.push(child);
    }
    chain.pop();
    node
}

fn leaf(name: &str, status: NodeStatus) -> InclusionNode {
    InclusionNode {
        name: name.to_string(),
        class: None,
        status,
        files: 0,
        children: Vec::new(),
    }
}

/// Names of every definition transitively referenced from `root`, excluding
/// `root` itself unless it is part of a cycle.
pub fn reachable(all: &DefinitionSet, root: &Definition) -> HashSet<String> {
    let mut seen = HashSet::new();
    let mut stack: Vec<&str> = root.referenced_names().collect();
    while let Some(name) = stack.pop() {
        if !seen.insert(name.to_string()) {
            continue;
        }
        if let Some(child) = all.get(name) {
            stack.extend(child.referenced_names());
        }
    }
    seen.retain(|name| all.contains(name));
    seen
}
