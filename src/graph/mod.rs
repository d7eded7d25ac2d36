//! # Graph Construction and Rendering Module
//!
//! This module resolves the transitive dependencies of a root package and
//! turns the result into the different views the tool prints or writes.
//!
//! ## Components
//!
//! ### Graph Building
//! - **DependencyGraphBuilder**: Depth-first resolution against a
//!   [`DependencyProvider`](crate::provider::DependencyProvider), with
//!   filtering, cycle records and per-package failure recovery
//! - **DependencyGraph**: Insertion-ordered adjacency map of the result
//!
//! ### Views
//! - **InstallOrder**: Dependencies-first package order
//! - **TreeRenderer**: Indented ASCII tree
//! - **GraphTextExporter**: Mermaid edge list or Graphviz DOT
//! - **LayoutExporter**: Layered SVG diagram
//!
//! ## Example
//!
//! ```
//! use dep_wheel::graph::{DependencyGraphBuilder, GraphTextExporter, InstallOrder};
//! use dep_wheel::provider::OfflineProvider;
//!
//! # fn main() -> miette::Result<()> {
//! let provider = OfflineProvider::from_entries([
//!     ("App", vec!["Core", "Logging"]),
//!     ("Core", vec!["Logging"]),
//!     ("Logging", vec![]),
//! ]);
//!
//! let mut builder = DependencyGraphBuilder::new(provider, "App", None);
//! let graph = builder.build(None);
//!
//! assert_eq!(InstallOrder::compute(graph), ["Logging", "Core", "App"]);
//!
//! let edges = GraphTextExporter::new(false).to_edge_list(graph)?;
//! assert!(edges.contains("App --> Core"));
//! # Ok(())
//! # }
//! ```

mod builder;
mod install_order;
mod layout;
mod renderer;
mod tree;
mod types;

pub use builder::DependencyGraphBuilder;
pub use install_order::InstallOrder;
pub use layout::{Layout, LayoutExporter, NodePosition};
pub use renderer::{GraphTextExporter, unique_edges};
pub use tree::TreeRenderer;
pub use types::{DependencyGraph, PackageCycle, ProviderFailure};
