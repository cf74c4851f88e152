//! Flattening of orchestrator chains.
//!
//! Flattening rewrites a definition so that its reference list holds only
//! filesystem targets: every definition reference is replaced by the
//! (recursively flattened) references of the definition it names. The result
//! is a self-contained selector, which is what a single GetThis invocation can
//! execute.
//!
//! Traversal keeps the chain of definitions currently being expanded. Meeting
//! a name already on that chain is a cycle and aborts the flatten of this
//! target with [`Error::CycleDetected`]. The same definition may still be
//! reached through two different branches; its references are then inlined
//! twice, as the source definitions ask for.

use log::{error, warn};

use super::{Class, DefinitionSet};
use crate::definition::{Definition, Reference};
use crate::error::{Error, Result};

/// Result of a successful flatten.
#[derive(Debug)]
pub struct Flattened {
    /// The rewritten definition. Name, path and metadata are unchanged.
    pub definition: Definition,
    /// References dropped along the way, one diagnostic each.
    pub diagnostics: Vec<Error>,
}

/// Flatten `target` against the definitions in `all`.
///
/// Filesystem references of `target` keep their relative order and come
/// first, followed by the inlined references in the order of the slots they
/// replace. References that do not resolve, or that resolve to a mixed
/// definition, are dropped and reported.
pub fn flatten(all: &DefinitionSet, target: &Definition) -> Result<Flattened> {
    let mut diagnostics = Vec::new();
    let mut chain = vec![target.name.clone()];
    let references = expand(all, target, &mut chain, &mut diagnostics)?;

    let mut definition = target.clone();
    definition.references = references;
    Ok(Flattened {
        definition,
        diagnostics,
    })
}

fn expand(
    all: &DefinitionSet,
    definition: &Definition,
    chain: &mut Vec<String>,
    diagnostics: &mut Vec<Error>,
) -> Result<Vec<Reference>> {
    let mut kept = Vec::new();
    let mut inlined = Vec::new();

    for reference in &definition.references {
        let Some(name) = reference.target.definition_name() else {
            kept.push(reference.clone());
            continue;
        };

        let Some(child) = all.get(name) else {
            let err = Error::UnresolvedReference {
                reference: reference.target_display(),
                definition: definition.name.clone(),
            };
            warn!("{}. Skipping...", err);
            diagnostics.push(err);
            continue;
        };

        if child.class() == Class::Mixed {
            let err = Error::UnexpectedMixedReference {
                reference: reference.target_display(),
                definition: definition.name.clone(),
            };
            error!("{}", err);
            diagnostics.push(err);
            continue;
        }

        if chain.iter().any(|visited| visited == &child.name) {
            let mut cycle = chain.clone();
            cycle.push(child.name.clone());
            return Err(Error::CycleDetected {
                cycle: cycle.join(" -> "),
            });
        }

        chain.push(child.name.clone());
        let expanded = expand(all, child, chain, diagnostics);
        chain.pop();
        inlined.extend(expanded?);
    }

    kept.extend(inlined);
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::classify;

    fn selector(name: &str, files: &[&str]) -> Definition {
        files.iter().fold(
            Definition::new(name, format!("kape/{}.tkape", name)),
            |def, file| def.with_reference(Reference::filesystem(file, Some(r"C:\"), Some(file))),
        )
    }

    fn orchestrator(name: &str, children: &[&str]) -> Definition {
        children.iter().fold(
            Definition::new(name, format!("kape/{}.tkape", name)),
            |def, child| def.with_reference(Reference::definition(child, child)),
        )
    }

    fn names(def: &Definition) -> Vec<&str> {
        def.references.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_flatten_selector_is_unchanged() {
        let logs = selector("Logs", &["a.log", "b.log"]);
        let all: DefinitionSet = vec![logs.clone()].into_iter().collect();

        let result = flatten(&all, &logs).unwrap();
        assert_eq!(result.definition, logs);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_flatten_inlines_nested_orchestrators() {
        let all: DefinitionSet = vec![
            selector("Logs", &["a.log"]),
            selector("Hives", &["SAM", "SYSTEM"]),
            orchestrator("Registry", &["Hives"]),
            orchestrator("Triage", &["Logs", "Registry"]),
        ]
        .into_iter()
        .collect();

        let triage = all.get("Triage").unwrap().clone();
        let result = flatten(&all, &triage).unwrap();

        assert_eq!(names(&result.definition), vec!["a.log", "SAM", "SYSTEM"]);
        assert_eq!(classify(&result.definition), Class::Selector);
        assert_eq!(result.definition.name, "Triage");
    }

    #[test]
    fn test_flatten_keeps_filesystem_refs_first() {
        let all: DefinitionSet = vec![selector("Logs", &["a.log"])].into_iter().collect();
        let mixed = Definition::new("Mixed", "Mixed.tkape")
            .with_reference(Reference::definition("Logs", "Logs"))
            .with_reference(Reference::filesystem("MFT", Some(r"C:\"), Some("$MFT")));

        let result = flatten(&all, &mixed).unwrap();
        assert_eq!(names(&result.definition), vec!["MFT", "a.log"]);
    }

    #[test]
    fn test_flatten_drops_unresolved_and_logs() {
        testing_logger::setup();
        let all: DefinitionSet = vec![selector("Logs", &["a.log"])].into_iter().collect();
        let triage = orchestrator("Triage", &["Logs", "Missing"]);

        let result = flatten(&all, &triage).unwrap();

        assert_eq!(names(&result.definition), vec!["a.log"]);
        assert_eq!(result.diagnostics.len(), 1);
        assert!(matches!(
            &result.diagnostics[0],
            Error::UnresolvedReference { reference, definition }
                if reference == "Missing.tkape" && definition == "Triage"
        ));
        testing_logger::validate(|captured_logs| {
            assert_eq!(captured_logs.len(), 1);
            assert_eq!(captured_logs[0].level, log::Level::Warn);
            assert!(captured_logs[0].body.contains("Missing.tkape"));
        });
    }

    #[test]
    fn test_flatten_skips_mixed_children() {
        let mixed = Definition::new("Browsers", "Browsers.tkape")
            .with_reference(Reference::definition("Logs", "Logs"))
            .with_reference(Reference::filesystem("IE", Some(r"C:\IE\"), None));
        let all: DefinitionSet = vec![selector("Logs", &["a.log"]), mixed]
            .into_iter()
            .collect();
        let triage = orchestrator("Triage", &["Browsers", "Logs"]);

        let result = flatten(&all, &triage).unwrap();
        assert_eq!(names(&result.definition), vec!["a.log"]);
        assert!(matches!(
            result.diagnostics[0],
            Error::UnexpectedMixedReference { .. }
        ));
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let all: DefinitionSet = vec![
            selector("Logs", &["a.log"]),
            orchestrator("Triage", &["Logs", "Logs"]),
        ]
        .into_iter()
        .collect();

        let once = flatten(&all, all.get("Triage").unwrap()).unwrap().definition;
        let twice = flatten(&all, &once).unwrap().definition;
        assert_eq!(once.references, twice.references);
        assert_eq!(names(&twice), vec!["a.log", "a.log"]);
    }

    #[test]
    fn test_flatten_detects_cycle() {
        let all: DefinitionSet = vec![
            orchestrator("A", &["B"]),
            orchestrator("B", &["C"]),
            orchestrator("C", &["A"]),
        ]
        .into_iter()
        .collect();

        let err = flatten(&all, all.get("A").unwrap()).unwrap_err();
        match err {
            Error::CycleDetected { cycle } => assert_eq!(cycle, "A -> B -> C -> A"),
            other => panic!("expected cycle, got {other}"),
        }
    }

    #[test]
    fn test_flatten_detects_self_reference() {
        let all: DefinitionSet = vec![orchestrator("Loop", &["Loop"])].into_iter().collect();
        let err = flatten(&all, all.get("Loop").unwrap()).unwrap_err();
        assert!(err.to_string().contains("Loop -> Loop"));
    }

    #[test]
    fn test_flatten_allows_diamonds() {
        let all: DefinitionSet = vec![
            selector("Leaf", &["x"]),
            orchestrator("Left", &["Leaf"]),
            orchestrator("Right", &["Leaf"]),
            orchestrator("Top", &["Left", "Right"]),
        ]
        .into_iter()
        .collect();

        let result = flatten(&all, all.get("Top").unwrap()).unwrap();
        assert_eq!(names(&result.definition), vec!["x", "x"]);
    }
}
