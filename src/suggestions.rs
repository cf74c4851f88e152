//! # Error Suggestions
//!
//! Errors surfaced by the CLI say what went wrong and how to fix it. Each
//! helper here builds an `anyhow::Error` whose message ends with `hint:`
//! lines.
//!
//! ```rust,ignore
//! if !args.master.is_file() {
//!     return Err(suggestions::master_not_found(&args.master));
//! }
//! ```

use std::path::Path;

/// The master definition does not exist or is not a file.
pub fn master_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Master definition not found: {path}\n\n\
         hint: Use --master to point at the compound target driving the conversion\n\
         hint: Set the KAPE2ORC_MASTER environment variable\n\
         hint: Run 'kape2orc ls' to see the definitions that were found",
        path = path.display()
    )
}

/// The master exists but could not be parsed.
pub fn master_unreadable(path: &Path, error: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Master definition could not be loaded: {path}\n\
         error: {error}\n\n\
         hint: Check that the file is valid YAML with a 'Targets' list",
        path = path.display()
    )
}

/// The source directory does not exist.
pub fn source_dir_missing(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "KAPE source directory not found: {path}\n\n\
         hint: Use --kape to point at the directory holding the .tkape files\n\
         hint: Set the KAPE2ORC_SOURCE environment variable",
        path = path.display()
    )
}

/// Writing the output tree failed.
pub fn write_failed(error: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Failed to write the generated configurations\n\
         error: {error}\n\n\
         hint: Use --orc to choose a writable output directory\n\
         hint: Use --dry-run to check the conversion without writing"
    )
}

/// A `--pattern` value is not a valid glob.
pub fn invalid_glob(pattern: &str, error: &glob::PatternError) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid glob pattern: {pattern}\n\
         error: {error}\n\n\
         hint: Patterns match definition names and paths relative to --kape\n\
         hint: Use * within a path segment, ** across segments"
    )
}

/// No scanned definition carries `name`. Suggests a close match.
pub fn definition_not_found(name: &str, candidates: &[&str]) -> anyhow::Error {
    let did_you_mean = find_similar(name, candidates)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Definition not found: {name}{did_you_mean}\n\n\
         hint: Names are file names without the .tkape extension\n\
         hint: Run 'kape2orc ls' to list the scanned definitions"
    )
}

/// Closest candidate within an edit distance of 2, ignoring ASCII case.
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let input = input.to_ascii_lowercase();
    candidates
        .iter()
        .map(|&candidate| {
            (
                candidate,
                edit_distance(&input, &candidate.to_ascii_lowercase()),
            )
        })
        .filter(|&(_, distance)| distance <= 2 && distance < input.len())
        .min_by_key(|&(_, distance)| distance)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein distance, computed one row at a time.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
