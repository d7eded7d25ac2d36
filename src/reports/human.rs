//! Human-readable console report generation

use std::fmt::Write;

use console::style;

use super::{ReportGenerator, Resolution};
use crate::error::DepGraphError;
use crate::utils::string::pluralize;

pub struct HumanReportGenerator {
    max_cycles: Option<usize>,
}

impl HumanReportGenerator {
    pub fn new(max_cycles: Option<usize>) -> Self {
        Self { max_cycles }
    }

    fn write_graph(&self, output: &mut String, resolution: &Resolution<'_>) -> std::fmt::Result {
        let graph = resolution.graph;

        if graph.is_empty() {
            writeln!(
                output,
                "\n{} Nothing to resolve: {} is excluded by the filter",
                style("ℹ").blue(),
                style(graph.root()).bold()
            )?;
            return Ok(());
        }

        writeln!(
            output,
            "\n{} Dependency graph of {}:",
            style("📦").blue(),
            style(graph.root()).green().bold()
        )?;
        for (package, deps) in graph.iter() {
            if deps.is_empty() {
                writeln!(
                    output,
                    "  {} → {}",
                    style(package).bold(),
                    style("(leaf)").dim()
                )?;
            } else {
                writeln!(output, "  {} → {}", style(package).bold(), deps.join(", "))?;
            }
        }
        Ok(())
    }

    fn write_cycles(&self, output: &mut String, resolution: &Resolution<'_>) -> std::fmt::Result {
        let cycles = resolution.cycles;

        if cycles.is_empty() {
            writeln!(
                output,
                "\n{} No dependency cycles detected!",
                style("✅").green().bold()
            )?;
            return Ok(());
        }

        writeln!(
            output,
            "\n{} Found {} dependency {}:",
            style("⚠️").yellow().bold(),
            style(cycles.len()).red().bold(),
            pluralize("cycle", cycles.len())
        )?;

        let limit = self.max_cycles.unwrap_or(cycles.len());
        for (i, cycle) in cycles.iter().take(limit).enumerate() {
            writeln!(output, "  {}. {}", i + 1, style(cycle).yellow())?;
        }

        if limit < cycles.len() {
            writeln!(
                output,
                "  {} Showing {} of {} cycles. Use --max-cycles to see more.",
                style("ℹ️").blue(),
                style(limit).yellow(),
                style(cycles.len()).yellow()
            )?;
        }

        if !resolution.groups.is_empty() {
            writeln!(
                output,
                "\n{} Mutually dependent {}:",
                style("🔗").cyan(),
                pluralize("group", resolution.groups.len())
            )?;
            for group in resolution.groups {
                writeln!(
                    output,
                    "  {} {}",
                    style("•").dim(),
                    style(group.packages().join(", ")).bold()
                )?;
            }
        }
        Ok(())
    }

    fn write_install_order(
        &self,
        output: &mut String,
        resolution: &Resolution<'_>,
    ) -> std::fmt::Result {
        if resolution.install_order.is_empty() {
            return Ok(());
        }

        writeln!(output, "\n{} Install order:", style("🛠").cyan())?;
        for (i, package) in resolution.install_order.iter().enumerate() {
            writeln!(output, "  {:>3}. {}", i + 1, package)?;
        }
        Ok(())
    }

    fn write_failures(&self, output: &mut String, resolution: &Resolution<'_>) -> std::fmt::Result {
        if resolution.failures.is_empty() {
            return Ok(());
        }

        writeln!(
            output,
            "\n{} Unresolved {} ({}), kept without dependencies:",
            style("⚠").yellow().bold(),
            pluralize("package", resolution.failures.len()),
            resolution.failures.len()
        )?;
        for failure in resolution.failures {
            writeln!(
                output,
                "  {} {}: {}",
                style("⚠").yellow(),
                style(&failure.package).bold(),
                style(&failure.message).yellow()
            )?;
        }
        Ok(())
    }
}

impl ReportGenerator for HumanReportGenerator {
    fn generate_report(&self, resolution: &Resolution<'_>) -> Result<String, DepGraphError> {
        let mut output = String::new();

        self.write_graph(&mut output, resolution)?;
        self.write_cycles(&mut output, resolution)?;

        let packages = resolution.graph.package_count();
        let edges = resolution.graph.edge_count();
        writeln!(
            output,
            "\n{} Statistics: {} {}, {} {}",
            style("📊").cyan(),
            style(packages).yellow().bold(),
            pluralize("package", packages),
            style(edges).yellow().bold(),
            pluralize("edge", edges)
        )?;

        self.write_install_order(&mut output, resolution)?;
        self.write_failures(&mut output, resolution)?;

        Ok(output)
    }
}
