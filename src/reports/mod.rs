//! Report generation modules for different output formats
//!
//! This module contains report generators for various output formats:
//! - human: Human-readable console output
//! - json: JSON format for programmatic use

pub mod human;
pub mod json;

use crate::detector::CycleGroup;
use crate::error::DepGraphError;
use crate::graph::{DependencyGraph, PackageCycle, ProviderFailure};

/// Everything a finished resolution produced
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub graph: &'a DependencyGraph,
    /// Back-edge paths recorded while building
    pub cycles: &'a [PackageCycle],
    /// Mutually dependent package groups
    pub groups: &'a [CycleGroup],
    pub install_order: &'a [String],
    pub failures: &'a [ProviderFailure],
}

/// Common trait for all report generators
pub trait ReportGenerator {
    /// Generate a report from the results of one resolution
    fn generate_report(&self, resolution: &Resolution<'_>) -> Result<String, DepGraphError>;
}

// Re-export for convenience
pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;
