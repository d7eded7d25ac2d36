//! JSON format report generation

use serde_json::json;

use super::{ReportGenerator, Resolution};
use crate::error::DepGraphError;

pub struct JsonReportGenerator;

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReportGenerator {
    fn generate_report(&self, resolution: &Resolution<'_>) -> Result<String, DepGraphError> {
        let graph = resolution.graph;

        // Keep packages in resolution order instead of a sorted object
        let packages: Vec<_> = graph
            .iter()
            .map(|(package, deps)| {
                json!({
                    "package": package,
                    "dependencies": deps,
                })
            })
            .collect();

        let report = json!({
            "root": graph.root(),
            "packages": packages,
            "has_cycles": !resolution.cycles.is_empty(),
            "cycle_count": resolution.cycles.len(),
            "cycles": resolution.cycles,
            "cycle_groups": resolution.groups,
            "install_order": resolution.install_order,
            "failures": resolution.failures,
            "statistics": {
                "packages": graph.package_count(),
                "edges": graph.edge_count(),
            },
        });

        serde_json::to_string_pretty(&report).map_err(DepGraphError::Json)
    }
}
