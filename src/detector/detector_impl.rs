use petgraph::algo::tarjan_scc;

use crate::graph::DependencyGraph;

/// Detector grouping mutually dependent packages
///
/// Uses Tarjan's Strongly Connected Components algorithm on the resolved
/// graph. Every component with more than one package, or with a package
/// depending on itself, is a group of packages that cannot be installed in
/// a strict dependency-first order.
pub struct CycleDetector {
    groups: Vec<CycleGroup>,
}

/// Packages forming one strongly connected component
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CycleGroup {
    packages: Vec<String>,
}

impl CycleGroup {
    pub fn new(mut packages: Vec<String>) -> Self {
        packages.sort();
        Self { packages }
    }

    /// Packages in the group, sorted by name
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn contains(&self, package: &str) -> bool {
        self.packages.iter().any(|p| p == package)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleDetector {
    /// Create a new cycle detector
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Detect all cycle groups in the dependency graph
    ///
    /// Results of a previous detection are replaced.
    pub fn detect_cycles(&mut self, graph: &DependencyGraph) {
        let pg = graph.to_petgraph();

        let mut groups: Vec<CycleGroup> = tarjan_scc(&pg)
            .into_iter()
            .filter(|scc| scc.len() > 1 || pg.contains_edge(scc[0], scc[0]))
            .map(|scc| CycleGroup::new(scc.into_iter().map(|idx| pg[idx].clone()).collect()))
            .collect();

        // Sort for output that does not depend on SCC discovery order
        groups.sort_by(|a, b| a.packages.cmp(&b.packages));
        self.groups = groups;
    }

    /// Get all detected groups
    pub fn groups(&self) -> &[CycleGroup] {
        &self.groups
    }

    /// Check if any cycles were detected
    pub fn has_cycles(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Get the number of detected groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Check if `package` belongs to any group
    pub fn contains(&self, package: &str) -> bool {
        self.groups.iter().any(|g| g.contains(package))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(root: &str, edges: Vec<(&str, Vec<&str>)>) -> DependencyGraph {
        let mut graph = DependencyGraph::new(root);
        for (package, deps) in edges {
            graph.add_package(package);
            for dep in deps {
                graph.add_dependency(package, dep);
            }
        }
        graph
    }

    #[test]
    fn test_no_cycles_in_linear_graph() {
        let g = graph("A", vec![("A", vec!["B"]), ("B", vec!["C"]), ("C", vec![])]);

        let mut detector = CycleDetector::new();
        detector.detect_cycles(&g);

        assert!(!detector.has_cycles());
        assert_eq!(detector.group_count(), 0);
    }

    #[test]
    fn test_simple_two_node_cycle() {
        let g = graph("Root", vec![("Root", vec!["A"]), ("A", vec!["Root"])]);

        let mut detector = CycleDetector::new();
        detector.detect_cycles(&g);

        assert_eq!(detector.group_count(), 1);
        assert_eq!(detector.groups()[0].packages(), ["A", "Root"]);
        assert!(detector.contains("Root"));
    }

    #[test]
    fn test_self_dependency_forms_a_group() {
        let g = graph("Root", vec![("Root", vec!["Root", "A"]), ("A", vec![])]);

        let mut detector = CycleDetector::new();
        detector.detect_cycles(&g);

        assert_eq!(detector.group_count(), 1);
        assert_eq!(detector.groups()[0].packages(), ["Root"]);
        assert!(!detector.contains("A"));
    }

    #[test]
    fn test_separate_cycles_are_separate_groups() {
        let g = graph(
            "Root",
            vec![
                ("Root", vec!["X", "M"]),
                ("X", vec!["Y"]),
                ("Y", vec!["X"]),
                ("M", vec!["N"]),
                ("N", vec!["O"]),
                ("O", vec!["M"]),
            ],
        );

        let mut detector = CycleDetector::new();
        detector.detect_cycles(&g);

        assert_eq!(detector.group_count(), 2);
        assert_eq!(detector.groups()[0].packages(), ["M", "N", "O"]);
        assert_eq!(detector.groups()[1].packages(), ["X", "Y"]);
        assert!(!detector.contains("Root"));
    }
}
