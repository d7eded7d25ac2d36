//! # Cycle Group Detection Module
//!
//! The graph builder records the back-edge paths it runs into while
//! traversing, which depend on traversal order. This module complements
//! those records with an order-independent view: which packages are
//! mutually dependent.
//!
//! ## Algorithm
//!
//! We use Tarjan's Strongly Connected Components (SCC) algorithm from
//! `petgraph`, with O(V + E) time complexity where V is the number of
//! packages and E the number of dependency edges.
//!
//! ## Example
//!
//! ```
//! use dep_wheel::detector::CycleDetector;
//! use dep_wheel::graph::DependencyGraph;
//!
//! let mut graph = DependencyGraph::new("App");
//! graph.add_dependency("App", "Core");
//! graph.add_dependency("Core", "App");
//!
//! let mut detector = CycleDetector::new();
//! detector.detect_cycles(&graph);
//!
//! assert!(detector.has_cycles());
//! assert_eq!(detector.groups()[0].packages(), ["App", "Core"]);
//! ```

mod detector_impl;

pub use detector_impl::*;
