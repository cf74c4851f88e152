//! Phase 2: Resolution
//!
//! This phase turns the scanned definition graph into the two-tier form the
//! emitters expect: one orchestrator (the master) whose references all name
//! self-contained selectors.
//!
//! ## Process
//!
//! 1.  **Classify the master**: A pure orchestrator is used as is
//!     (`Strategy::Compound`). Anything else is split and its selector part
//!     joins the scanned set (`Strategy::Simple`).
//!
//! 2.  **Split mixed definitions**: Every remaining mixed definition is split
//!     in place, so flattening never meets a mixed child.
//!
//! 3.  **Flatten**: Every non-selector definition is flattened against a
//!     snapshot of the set. A definition caught in a cycle is dropped.
//!
//! 4.  **Select exports**: By default only the definitions the master
//!     references directly are kept. Each of them already holds its whole
//!     subtree after flattening.

use std::collections::HashSet;

use log::{error, info, warn};

use super::{Discovery, Resolution, Strategy};
use crate::definition::Definition;
use crate::error::{Error, Result};
use crate::resolve::{flatten, split, Class, DefinitionSet};

/// Executes Phase 2 of the pipeline.
pub fn execute(discovery: Discovery, keep_unused: bool) -> Result<Resolution> {
    let Discovery {
        master,
        mut definitions,
        mut diagnostics,
    } = discovery;

    let (strategy, master) = resolve_master(master, &mut definitions);
    let definitions = split_mixed(definitions);
    let flattened = flatten_all(&definitions, &mut diagnostics)?;
    let exports = select_exports(&master, flattened, keep_unused, &mut diagnostics);

    info!(
        "Resolved {} with the {:?} strategy: {} selector(s) to export",
        master.name,
        strategy,
        exports.len()
    );

    Ok(Resolution {
        strategy,
        master,
        exports,
        diagnostics,
    })
}

/// Bring the master into orchestrator form.
fn resolve_master(master: Definition, definitions: &mut DefinitionSet) -> (Strategy, Definition) {
    match master.class() {
        Class::Orchestrator => (Strategy::Compound, master),
        class => {
            info!("Master {} is a {}, splitting it", master.name, class);
            let (orchestrator, selector) = split(&master);
            definitions.replace(selector);
            (Strategy::Simple, orchestrator)
        }
    }
}

/// Split every mixed definition, keeping each selector part right after its
/// orchestrator part.
fn split_mixed(definitions: DefinitionSet) -> DefinitionSet {
    let mut result = DefinitionSet::new();
    for definition in definitions.into_vec() {
        if definition.class() == Class::Mixed {
            info!("Splitting mixed definition {}", definition.name);
            let (orchestrator, selector) = split(&definition);
            result.insert(orchestrator);
            result.insert(selector);
        } else {
            result.insert(definition);
        }
    }
    result
}

/// Flatten every orchestrator. The returned set only holds selectors.
fn flatten_all(definitions: &DefinitionSet, diagnostics: &mut Vec<Error>) -> Result<DefinitionSet> {
    let mut result = DefinitionSet::new();
    for definition in definitions.iter() {
        if definition.class() == Class::Selector {
            result.insert(definition.clone());
            continue;
        }
        match flatten(definitions, definition) {
            Ok(flattened) => {
                diagnostics.extend(flattened.diagnostics);
                result.insert(flattened.definition);
            }
            Err(err @ Error::CycleDetected { .. }) => {
                error!("{}. Dropping {}", err, definition.name);
                diagnostics.push(err);
            }
            Err(err) => return Err(err),
        }
    }
    Ok(result)
}

/// Pick the flattened definitions to export.
///
/// Master references that match nothing are reported either way, so that the
/// job list of the orchestration can later be restricted to what exists.
fn select_exports(
    master: &Definition,
    flattened: DefinitionSet,
    keep_unused: bool,
    diagnostics: &mut Vec<Error>,
) -> Vec<Definition> {
    for reference in &master.references {
        if let Some(name) = reference.target.definition_name() {
            if !flattened.contains(name) {
                let err = Error::UnresolvedReference {
                    reference: reference.target_display(),
                    definition: master.name.clone(),
                };
                warn!("{}. Skipping...", err);
                diagnostics.push(err);
            }
        }
    }

    if keep_unused {
        return flattened.into_vec();
    }

    let mut seen = HashSet::new();
    let mut exports = Vec::new();
    for name in master.referenced_names() {
        if !seen.insert(name) {
            continue;
        }
        if let Some(definition) = flattened.get(name) {
            exports.push(definition.clone());
        }
    }
    let skipped = flattened.len() - exports.len();
    if skipped > 0 {
        info!("Skipping {} definition(s) unused by {}", skipped, master.name);
    }
    exports
}
