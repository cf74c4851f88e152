//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays the inclusion
//! graph below the master definition (or any named definition).
//!
//! ## Functionality
//!
//! - **Inclusion Tree**: Every definition reference becomes a child node
//! - **Depth Control**: `--depth` limits how many levels are expanded
//! - **Broken Graphs**: Unresolved references and cycles are marked in place
//!   instead of failing the command
//!
//! This command is a safe, read-only operation.

use std::borrow::Cow;
use std::io;

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};

use kape2orc::output::{OutputConfig, Tone};
use kape2orc::resolve::{inclusion_tree, InclusionNode, NodeStatus};
use kape2orc::suggestions;

use super::SourceArgs;

/// Display the inclusion tree
#[derive(Args, Debug)]
pub struct TreeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Definition to start from instead of the master.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Maximum depth to display.
    ///
    /// Use 0 to show only the root, 1 to show its direct references, etc.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let (master, definitions) = args.source.load()?;

    let root = match &args.name {
        None => &master,
        Some(name) if *name == master.name => &master,
        Some(name) => match definitions.get(name) {
            Some(def) => def,
            None => {
                let candidates: Vec<&str> = definitions.iter().map(|d| d.name.as_str()).collect();
                return Err(suggestions::definition_not_found(name, &candidates));
            }
        },
    };

    println!(
        "{} Inclusion tree for: {}",
        out.icon("🌳", "[TREE]"),
        root.path.display()
    );

    let tree = inclusion_tree(&definitions, root, args.depth.unwrap_or(usize::MAX));
    print_tree(&build_tree_node(&out, &tree))
        .map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;

    Ok(())
}

/// Build a display node from an inclusion node
fn build_tree_node(out: &OutputConfig, node: &InclusionNode) -> TreeNode {
    let label = match node.status {
        NodeStatus::Unresolved => format!(
            "{} {}",
            node.name,
            out.paint("(unresolved)", Tone::Failure)
        ),
        NodeStatus::Cycle => format!("{} {}", node.name, out.paint("(cycle)", Tone::Failure)),
        status => {
            let mut label = node.name.clone();
            if let Some(class) = node.class {
                label.push_str(&format!(" [{}]", out.class_label(class)));
            }
            if node.files > 0 {
                label.push_str(&format!(" {} file target(s)", node.files));
            }
            if status == NodeStatus::Truncated {
                label.push_str(&format!(" {}", out.paint("...", Tone::Muted)));
            }
            label
        }
    };

    TreeNode {
        label,
        children: node
            .children
            .iter()
            .map(|child| build_tree_node(out, child))
            .collect(),
    }
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &ptree::Style) -> io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kape2orc::resolve::Class;
    use std::fs;
    use tempfile::TempDir;

    fn node(name: &str, status: NodeStatus, children: Vec<InclusionNode>) -> InclusionNode {
        InclusionNode {
            name: name.to_string(),
            class: (status == NodeStatus::Resolved || status == NodeStatus::Truncated)
                .then_some(Class::Orchestrator),
            status,
            files: 0,
            children,
        }
    }

    #[test]
    fn test_labels_mark_broken_references() {
        let out = OutputConfig::without_color();
        let tree = node(
            "Master",
            NodeStatus::Resolved,
            vec![
                node("Missing", NodeStatus::Unresolved, vec![]),
                node("Master", NodeStatus::Cycle, vec![]),
                node("Deep", NodeStatus::Truncated, vec![]),
            ],
        );

        let display = build_tree_node(&out, &tree);

        assert_eq!(display.label, "Master [orchestrator]");
        assert_eq!(display.children[0].label, "Missing (unresolved)");
        assert_eq!(display.children[1].label, "Master (cycle)");
        assert_eq!(display.children[2].label, "Deep [orchestrator] ...");
    }

    #[test]
    fn test_execute_unknown_root_suggests_name() {
        let temp = TempDir::new().unwrap();
        let kape = temp.path().join("kape");
        fs::create_dir_all(&kape).unwrap();
        fs::write(kape.join("Master.tkape"), "Targets: []\n").unwrap();
        fs::write(
            kape.join("EventLogs.tkape"),
            "Targets:\n  - Name: Logs\n    Path: C:\\Logs\\\n",
        )
        .unwrap();

        let args = TreeArgs {
            source: SourceArgs {
                kape: kape.clone(),
                master: kape.join("Master.tkape"),
            },
            name: Some("EventLog".to_string()),
            depth: None,
        };
        let err = execute(args, "never").unwrap_err();
        assert!(err.to_string().contains("Did you mean 'EventLogs'?"));
    }
}
