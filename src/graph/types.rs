//! Core graph types
//!
//! This module contains the fundamental data structures produced by a graph
//! build and consumed by every renderer.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

/// Resolved dependency graph
///
/// Maps each visited package to the ordered list of its direct dependencies.
/// Packages keep the order in which they were first visited, and every
/// dependency list keeps the order the provider returned it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    root: String,
    packages: Vec<String>,
    dependencies: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl DependencyGraph {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Package the graph was resolved from
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Insert a package with no dependencies, returning `false` if it was
    /// already present
    pub fn add_package(&mut self, package: &str) -> bool {
        if self.index.contains_key(package) {
            return false;
        }
        self.index.insert(package.to_string(), self.packages.len());
        self.packages.push(package.to_string());
        self.dependencies.push(Vec::new());
        true
    }

    /// Append `dependency` to the dependency list of `package`, inserting
    /// `package` first if needed
    pub fn add_dependency(&mut self, package: &str, dependency: &str) {
        self.add_package(package);
        let idx = self.index[package];
        self.dependencies[idx].push(dependency.to_string());
    }

    pub fn contains(&self, package: &str) -> bool {
        self.index.contains_key(package)
    }

    /// Direct dependencies of `package`, empty for unknown packages
    pub fn dependencies(&self, package: &str) -> &[String] {
        self.index
            .get(package)
            .map(|&idx| self.dependencies[idx].as_slice())
            .unwrap_or(&[])
    }

    /// Packages in insertion order
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(String::as_str)
    }

    /// `(package, dependencies)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.packages
            .iter()
            .zip(&self.dependencies)
            .map(|(package, deps)| (package.as_str(), deps.as_slice()))
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Number of recorded edges, counting repeated entries
    pub fn edge_count(&self) -> usize {
        self.dependencies.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Project the graph onto a petgraph `DiGraph` for algorithmic analysis
    ///
    /// Node indices follow package insertion order. Dependencies that are
    /// not packages of the graph are skipped.
    pub fn to_petgraph(&self) -> DiGraph<String, ()> {
        let mut graph = DiGraph::with_capacity(self.packages.len(), self.edge_count());
        let nodes: Vec<NodeIndex> = self
            .packages
            .iter()
            .map(|package| graph.add_node(package.clone()))
            .collect();

        for (from, deps) in self.dependencies.iter().enumerate() {
            for dep in deps {
                if let Some(&to) = self.index.get(dep) {
                    graph.update_edge(nodes[from], nodes[to], ());
                }
            }
        }

        graph
    }
}

/// A back-edge path found while building the graph
///
/// The path starts and ends with the package that was reached again while
/// still being expanded, e.g. `[A, B, A]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PackageCycle {
    path: Vec<String>,
}

impl PackageCycle {
    pub fn new(path: Vec<String>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn contains(&self, package: &str) -> bool {
        self.path.iter().any(|p| p == package)
    }
}

impl std::fmt::Display for PackageCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.join(" → "))
    }
}

/// A package whose dependencies could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderFailure {
    pub package: String,
    pub message: String,
}
