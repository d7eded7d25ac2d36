//! Dependency-first install ordering

use std::collections::HashSet;

use super::types::DependencyGraph;

/// Postorder traversal of a built graph
///
/// A package is emitted only after every dependency reachable from it has
/// been emitted, so installing packages in the returned order never
/// installs a package before its dependencies. Edges closing a cycle are
/// ignored: the package they point to is already being visited.
pub struct InstallOrder;

impl InstallOrder {
    /// Compute the install order starting at the graph's root
    pub fn compute(graph: &DependencyGraph) -> Vec<String> {
        Self::compute_from(graph, graph.root())
    }

    /// Compute the install order of the subgraph reachable from `root`
    pub fn compute_from(graph: &DependencyGraph, root: &str) -> Vec<String> {
        let mut order = Vec::new();
        if !graph.contains(root) {
            return order;
        }

        // Visiting or emitted
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack: Vec<(&str, usize)> = vec![(root, 0)];
        seen.insert(root);

        while let Some(top) = stack.last_mut() {
            let package = top.0;
            if let Some(dep) = graph.dependencies(package).get(top.1) {
                top.1 += 1;
                if graph.contains(dep) && seen.insert(dep.as_str()) {
                    stack.push((dep.as_str(), 0));
                }
            } else {
                order.push(package.to_string());
                stack.pop();
            }
        }

        order
    }
}
