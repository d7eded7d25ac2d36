use std::collections::HashSet;

use super::types::{DependencyGraph, PackageCycle, ProviderFailure};
use crate::dependency_filter::PackageFilter;
use crate::progress::ProgressReporter;
use crate::provider::DependencyProvider;

/// Builder resolving the transitive dependency graph of one root package
///
/// The builder walks the graph depth-first, asking its provider for the
/// direct dependencies of every package it reaches. Packages matching the
/// filter are dropped along with their subtrees, back edges to a package
/// still being expanded are recorded as cycles, and provider failures turn
/// the affected package into a leaf.
pub struct DependencyGraphBuilder<P> {
    provider: P,
    root: String,
    filter: PackageFilter,
    graph: DependencyGraph,
    cycles: Vec<PackageCycle>,
    failures: Vec<ProviderFailure>,
    visited: HashSet<String>,
    on_path: HashSet<String>,
    stack: Vec<Frame>,
}

/// A package being expanded, with the position of the next dependency to
/// visit
struct Frame {
    package: String,
    dependencies: Vec<String>,
    next: usize,
}

impl<P: DependencyProvider> DependencyGraphBuilder<P> {
    /// Create a new builder
    ///
    /// # Arguments
    /// * `provider` - Source of direct dependencies
    /// * `root` - Package to resolve
    /// * `filter` - Substring excluding matching packages, ignoring case
    pub fn new(provider: P, root: impl Into<String>, filter: Option<&str>) -> Self {
        let root = root.into();
        Self {
            provider,
            graph: DependencyGraph::new(root.clone()),
            root,
            filter: PackageFilter::new(filter),
            cycles: Vec::new(),
            failures: Vec::new(),
            visited: HashSet::new(),
            on_path: HashSet::new(),
            stack: Vec::new(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Cycles recorded by the last build, in discovery order
    pub fn cycles(&self) -> &[PackageCycle] {
        &self.cycles
    }

    /// Packages whose dependencies could not be fetched during the last build
    pub fn failures(&self) -> &[ProviderFailure] {
        &self.failures
    }

    /// Resolve the graph from scratch
    ///
    /// All state from a previous build is discarded first, so repeated calls
    /// against a provider with stable answers yield identical results.
    pub fn build(&mut self, progress: Option<&ProgressReporter>) -> &DependencyGraph {
        self.graph = DependencyGraph::new(self.root.clone());
        self.cycles.clear();
        self.failures.clear();
        self.visited.clear();
        self.on_path.clear();
        self.stack.clear();

        if self.filter.should_skip(&self.root) {
            return &self.graph;
        }

        let root = self.root.clone();
        self.enter(&root, progress);

        while let Some(frame) = self.stack.last_mut() {
            let Some(dep) = frame.dependencies.get(frame.next).cloned() else {
                if let Some(done) = self.stack.pop() {
                    self.on_path.remove(&done.package);
                }
                continue;
            };
            frame.next += 1;
            let parent = frame.package.clone();

            if self.filter.should_skip(&dep) {
                continue;
            }

            self.graph.add_dependency(&parent, &dep);

            if self.on_path.contains(&dep) {
                self.record_cycle(&dep);
                continue;
            }

            if self.visited.contains(&dep) {
                continue;
            }

            self.enter(&dep, progress);
        }

        &self.graph
    }

    /// Mark `package` as visited and push it with its fetched dependencies
    fn enter(&mut self, package: &str, progress: Option<&ProgressReporter>) {
        self.visited.insert(package.to_string());
        self.on_path.insert(package.to_string());
        self.graph.add_package(package);

        if let Some(p) = progress {
            p.resolving_package(package);
        }

        let dependencies = match self.provider.direct_dependencies(package) {
            Ok(deps) => deps,
            Err(e) => {
                self.failures.push(ProviderFailure {
                    package: package.to_string(),
                    message: e.full_message(),
                });
                Vec::new()
            }
        };

        if let Some(p) = progress {
            p.package_resolved();
        }

        self.stack.push(Frame {
            package: package.to_string(),
            dependencies,
            next: 0,
        });
    }

    /// Record the path from the earlier occurrence of `package` on the stack
    /// back to itself
    fn record_cycle(&mut self, package: &str) {
        if let Some(start) = self.stack.iter().position(|f| f.package == package) {
            let mut path: Vec<String> = self.stack[start..]
                .iter()
                .map(|f| f.package.clone())
                .collect();
            path.push(package.to_string());
            self.cycles.push(PackageCycle::new(path));
        }
    }
}
