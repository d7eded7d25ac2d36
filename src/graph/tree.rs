//! Indented tree rendering
//!
//! Produces the familiar `tree` command layout:
//!
//! ```text
//! Root
//! ├─ A
//! │  └─ C
//! └─ B
//!    └─ C
//! ```

use std::collections::HashSet;

use super::types::DependencyGraph;

const BRANCH: &str = "├─ ";
const LAST_BRANCH: &str = "└─ ";
const PIPE: &str = "│  ";
const SPACE: &str = "   ";
const CYCLE_MARKER: &str = " (cycle)";

/// Renders a dependency graph as tree lines
///
/// Shared dependencies are expanded again under every parent that
/// references them. Only a package that is an ancestor of itself on the
/// current path is cut short and marked as a cycle.
pub struct TreeRenderer;

/// A package whose children are being rendered
struct TreeFrame<'a> {
    package: &'a str,
    children: &'a [String],
    next: usize,
    /// Prefix carried by the children of this package
    indent: String,
}

impl TreeRenderer {
    /// Render the tree from `root`, or from the graph's root when `None`
    pub fn render(graph: &DependencyGraph, root: Option<&str>) -> Vec<String> {
        let root = root.unwrap_or_else(|| graph.root());
        let mut lines = vec![root.to_string()];

        let mut ancestors: HashSet<&str> = HashSet::new();
        ancestors.insert(root);
        let mut stack = vec![TreeFrame {
            package: root,
            children: graph.dependencies(root),
            next: 0,
            indent: String::new(),
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(child) = frame.children.get(frame.next) else {
                if let Some(done) = stack.pop() {
                    ancestors.remove(done.package);
                }
                continue;
            };
            frame.next += 1;
            let is_last = frame.next == frame.children.len();
            let connector = if is_last { LAST_BRANCH } else { BRANCH };

            if ancestors.contains(child.as_str()) {
                lines.push(format!("{}{connector}{child}{CYCLE_MARKER}", frame.indent));
                continue;
            }

            lines.push(format!("{}{connector}{child}", frame.indent));
            let indent = format!("{}{}", frame.indent, if is_last { SPACE } else { PIPE });

            ancestors.insert(child.as_str());
            stack.push(TreeFrame {
                package: child.as_str(),
                children: graph.dependencies(child),
                next: 0,
                indent,
            });
        }

        lines
    }
}
