//! Splitting a mixed definition into a selector and an orchestrator.

use std::path::PathBuf;

use crate::defaults::{DEFINITION_SUFFIX, SELECTOR_NAME_SUFFIX};
use crate::definition::{strip_definition_suffix, Definition, Reference};

/// Split `definition` into `(orchestrator, selector)`.
///
/// The selector part is named `<name>_getthis`, lives next to the original as
/// `<name>_getthis.tkape` and receives every filesystem reference in order.
/// The orchestrator part keeps the original name and path, every definition
/// reference in order, and one reference to the selector part appended last.
///
/// Intended for mixed definitions. On a pure selector the orchestrator ends up
/// with the single synthesized reference, which is how a selector master is
/// wrapped into a launchable orchestration.
pub fn split(definition: &Definition) -> (Definition, Definition) {
    let selector_name = format!("{}{}", definition.name, SELECTOR_NAME_SUFFIX);
    let mut orchestrator = definition.derive(&definition.name, definition.path.clone());
    let mut selector = definition.derive(&selector_name, selector_path(&definition.path));

    let (definition_refs, filesystem_refs): (Vec<Reference>, Vec<Reference>) = definition
        .references
        .iter()
        .cloned()
        .partition(|r| r.target.is_definition());

    selector.references = filesystem_refs;
    orchestrator.references = definition_refs;
    orchestrator
        .references
        .push(Reference::definition(&selector_name, &selector_name));

    (orchestrator, selector)
}

/// `dir/Name.tkape` -> `dir/Name_getthis.tkape`
fn selector_path(path: &std::path::Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = strip_definition_suffix(&file_name).unwrap_or(&file_name);
    path.with_file_name(format!(
        "{}{}{}",
        stem, SELECTOR_NAME_SUFFIX, DEFINITION_SUFFIX
    ))
}
