//! # Dep Wheel - Visualize Package Dependency Graphs
//!
//! Dep Wheel resolves the transitive dependencies of a package, either from
//! a local JSON repository file or from a NuGet v3 feed, and presents the
//! result in several forms: a textual graph listing, recorded dependency
//! cycles, a dependencies-first install order, an ASCII tree, a Mermaid or
//! Graphviz edge list and a layered SVG diagram.
//!
//! ## Main Components
//!
//! - **Provider**: Sources of direct dependencies (offline file, NuGet)
//! - **Graph**: Builds the dependency graph and renders its views
//! - **Detector**: Groups mutually dependent packages (Tarjan's SCC)
//! - **Reports**: Generates human-readable and machine-readable reports
//!
//! ## Usage
//!
//! ### Example: Resolving an Offline Repository
//!
//! ```no_run
//! use std::path::Path;
//!
//! use dep_wheel::detector::CycleDetector;
//! use dep_wheel::graph::{DependencyGraphBuilder, InstallOrder};
//! use dep_wheel::provider::OfflineProvider;
//! use dep_wheel::reports::{HumanReportGenerator, ReportGenerator, Resolution};
//! use miette::IntoDiagnostic;
//!
//! # fn main() -> miette::Result<()> {
//! // Step 1: Load the repository file
//! let provider = OfflineProvider::from_file(Path::new("repo.json"))?;
//!
//! // Step 2: Resolve the graph, skipping every package containing "test"
//! let mut builder = DependencyGraphBuilder::new(provider, "App", Some("test"));
//! builder.build(None);
//!
//! // Step 3: Analyze it
//! let mut detector = CycleDetector::new();
//! detector.detect_cycles(builder.graph());
//! let install_order = InstallOrder::compute(builder.graph());
//!
//! // Step 4: Generate a report
//! let resolution = Resolution {
//!     graph: builder.graph(),
//!     cycles: builder.cycles(),
//!     groups: detector.groups(),
//!     install_order: &install_order,
//!     failures: builder.failures(),
//! };
//! let report = HumanReportGenerator::new(None)
//!     .generate_report(&resolution)
//!     .into_diagnostic()?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```
//!
//! ### Example: Visualizing the Dependency Graph
//!
//! ```
//! use dep_wheel::graph::{DependencyGraphBuilder, LayoutExporter, TreeRenderer};
//! use dep_wheel::provider::OfflineProvider;
//!
//! # fn main() -> miette::Result<()> {
//! let provider = OfflineProvider::from_entries([
//!     ("App", vec!["Core", "Http"]),
//!     ("Http", vec!["Core"]),
//!     ("Core", vec![]),
//! ]);
//! let mut builder = DependencyGraphBuilder::new(provider, "App", None);
//! let graph = builder.build(None);
//!
//! for line in TreeRenderer::render(graph, None) {
//!     println!("{line}");
//! }
//!
//! let mut svg = Vec::new();
//! LayoutExporter::new(true).render(graph, &[], &mut svg)?;
//! assert!(String::from_utf8_lossy(&svg).contains("<circle"));
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod dependency_filter;
mod progress;
mod utils;

// Public modules
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod detector;
pub mod error;
pub mod executors;
pub mod graph;
pub mod provider;
pub mod reports;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    execute_command(Cli::parse())
}
