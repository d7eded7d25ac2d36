//! Graph building scenarios exercised through the public library API

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use dep_wheel::detector::CycleDetector;
use dep_wheel::error::DepGraphError;
use dep_wheel::graph::{DependencyGraph, DependencyGraphBuilder, InstallOrder, unique_edges};
use dep_wheel::provider::{DependencyProvider, OfflineProvider};
use pretty_assertions::assert_eq;

fn offline(entries: Vec<(&str, Vec<&str>)>) -> OfflineProvider {
    OfflineProvider::from_entries(entries)
}

/// Provider that fails for selected packages and logs every request
struct FlakyProvider {
    inner: OfflineProvider,
    failing: HashSet<&'static str>,
    requests: Rc<RefCell<Vec<String>>>,
}

impl DependencyProvider for FlakyProvider {
    fn direct_dependencies(&self, package: &str) -> Result<Vec<String>, DepGraphError> {
        self.requests.borrow_mut().push(package.to_string());
        if self.failing.contains(package) {
            return Err(DepGraphError::RegistryUnavailable {
                url: "https://example.invalid/v3/index.json".to_string(),
                message: "connection reset".to_string(),
            });
        }
        self.inner.direct_dependencies(package)
    }
}

fn position(order: &[String], package: &str) -> usize {
    order
        .iter()
        .position(|p| p == package)
        .unwrap_or_else(|| panic!("{package} missing from {order:?}"))
}

#[test]
fn test_diamond_graph() {
    let mut builder = DependencyGraphBuilder::new(
        offline(vec![
            ("Root", vec!["A", "B"]),
            ("A", vec!["C"]),
            ("B", vec!["C"]),
            ("C", vec![]),
        ]),
        "Root",
        None,
    );
    let graph = builder.build(None).clone();

    assert_eq!(graph.package_count(), 4);
    assert_eq!(graph.edge_count(), 4);
    assert!(builder.cycles().is_empty());
    assert!(builder.failures().is_empty());

    let order = InstallOrder::compute(&graph);
    assert_eq!(order.len(), 4);
    assert!(position(&order, "C") < position(&order, "A"));
    assert!(position(&order, "C") < position(&order, "B"));
    assert!(position(&order, "A") < position(&order, "Root"));
    assert!(position(&order, "B") < position(&order, "Root"));
}

#[test]
fn test_two_package_cycle() {
    let mut builder = DependencyGraphBuilder::new(
        offline(vec![("Root", vec!["A"]), ("A", vec!["Root"])]),
        "Root",
        None,
    );
    let graph = builder.build(None).clone();

    let packages: Vec<&str> = graph.packages().collect();
    assert_eq!(packages, vec!["Root", "A"]);

    assert_eq!(builder.cycles().len(), 1);
    assert!(builder.cycles()[0].contains("Root"));

    let edges = unique_edges(&graph);
    assert_eq!(edges.iter().filter(|e| **e == ("Root", "A")).count(), 1);
    assert_eq!(edges.iter().filter(|e| **e == ("A", "Root")).count(), 1);

    let mut detector = CycleDetector::new();
    detector.detect_cycles(&graph);
    assert_eq!(detector.groups()[0].packages(), ["A", "Root"]);
}

#[test]
fn test_filter_removes_matching_packages() {
    let mut builder = DependencyGraphBuilder::new(
        offline(vec![
            ("Root", vec!["LibTest", "LibCore"]),
            ("LibTest", vec!["Deep"]),
            ("LibCore", vec![]),
            ("Deep", vec![]),
        ]),
        "Root",
        Some("test"),
    );
    let graph = builder.build(None);

    assert!(!graph.contains("LibTest"));
    assert!(!graph.contains("Deep"));
    assert_eq!(graph.dependencies("Root"), ["LibCore"]);
}

#[test]
fn test_failed_fetch_becomes_leaf() {
    let provider = FlakyProvider {
        inner: offline(vec![("Root", vec!["X", "Y"]), ("Y", vec![])]),
        failing: HashSet::from(["X"]),
        requests: Rc::default(),
    };
    let mut builder = DependencyGraphBuilder::new(provider, "Root", None);
    let graph = builder.build(None);

    assert!(graph.contains("X"));
    assert!(graph.dependencies("X").is_empty());
    assert!(graph.contains("Y"));

    assert_eq!(builder.failures().len(), 1);
    assert_eq!(builder.failures()[0].package, "X");
    assert!(builder.failures()[0].message.contains("connection reset"));
}

#[test]
fn test_failed_root_gives_single_package() {
    let mut builder = DependencyGraphBuilder::new(offline(vec![]), "Missing", None);
    let graph = builder.build(None);

    let packages: Vec<&str> = graph.packages().collect();
    assert_eq!(packages, vec!["Missing"]);
    assert_eq!(builder.failures().len(), 1);
}

#[test]
fn test_each_package_is_fetched_once() {
    let requests = Rc::new(RefCell::new(Vec::new()));
    let provider = FlakyProvider {
        inner: offline(vec![
            ("Root", vec!["A", "B"]),
            ("A", vec!["C"]),
            ("B", vec!["C"]),
            ("C", vec!["A"]),
        ]),
        failing: HashSet::new(),
        requests: Rc::clone(&requests),
    };
    let mut builder = DependencyGraphBuilder::new(provider, "Root", None);
    builder.build(None);

    assert_eq!(*requests.borrow(), vec!["Root", "A", "C", "B"]);
    assert_eq!(builder.cycles().len(), 1);
    assert_eq!(builder.cycles()[0].path(), ["A", "C", "A"]);
}

#[test]
fn test_build_is_idempotent() {
    let mut builder = DependencyGraphBuilder::new(
        offline(vec![
            ("Root", vec!["A", "B"]),
            ("A", vec!["B", "Root"]),
            ("B", vec!["B"]),
        ]),
        "Root",
        Some("zzz"),
    );

    let first: DependencyGraph = builder.build(None).clone();
    let first_cycles = builder.cycles().to_vec();
    let second: DependencyGraph = builder.build(None).clone();

    assert_eq!(first, second);
    assert_eq!(first_cycles, builder.cycles());
}

fn layered_repository() -> OfflineProvider {
    offline(vec![
        ("Root", vec!["Web", "Data", "TestKit"]),
        ("Web", vec!["Http", "Json", "Web.Tests"]),
        ("Data", vec!["Json", "Sql", "Root"]),
        ("Http", vec!["Json", "Web"]),
        ("Json", vec![]),
        ("Sql", vec!["Json", "Sql"]),
        ("TestKit", vec!["Json"]),
        ("Web.Tests", vec!["Web"]),
    ])
}

#[test]
fn test_no_entry_matches_the_filter() {
    let mut builder = DependencyGraphBuilder::new(layered_repository(), "Root", Some("TEST"));
    let graph = builder.build(None);

    for (package, deps) in graph.iter() {
        assert!(!package.to_lowercase().contains("test"), "{package}");
        for dep in deps {
            assert!(!dep.to_lowercase().contains("test"), "{package} -> {dep}");
        }
    }
}

#[test]
fn test_install_order_respects_non_cycle_edges() {
    let mut builder = DependencyGraphBuilder::new(layered_repository(), "Root", None);
    let graph = builder.build(None).clone();
    let order = InstallOrder::compute(&graph);

    let mut detector = CycleDetector::new();
    detector.detect_cycles(&graph);

    for (from, to) in unique_edges(&graph) {
        // Edges inside a strongly connected group cannot all be satisfied
        let same_group = detector
            .groups()
            .iter()
            .any(|g| g.contains(from) && g.contains(to));
        if same_group {
            continue;
        }
        assert!(
            position(&order, to) < position(&order, from),
            "{to} should come before {from} in {order:?}"
        );
    }
}

#[test]
fn test_every_self_reachable_package_is_in_a_cycle_record() {
    let mut builder = DependencyGraphBuilder::new(layered_repository(), "Root", None);
    let graph = builder.build(None).clone();

    let mut detector = CycleDetector::new();
    detector.detect_cycles(&graph);

    for group in detector.groups() {
        for package in group.packages() {
            assert!(
                builder.cycles().iter().any(|c| c.contains(package)),
                "{package} is on a cycle but no record mentions it: {:?}",
                builder.cycles()
            );
        }
    }
}

#[test]
fn test_edge_list_has_each_edge_once() {
    let mut builder = DependencyGraphBuilder::new(layered_repository(), "Root", None);
    let graph = builder.build(None);

    let edges = unique_edges(graph);
    let distinct: HashSet<_> = edges.iter().collect();
    assert_eq!(edges.len(), distinct.len());

    for (package, deps) in graph.iter() {
        for dep in deps {
            assert!(edges.contains(&(package, dep.as_str())));
        }
    }
}
