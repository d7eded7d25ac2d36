use std::collections::{HashMap, HashSet};
use std::io::Write;

use miette::Result;

use super::types::DependencyGraph;
use crate::detector::CycleGroup;
use crate::error::DepGraphError;

// Blue-Orange Accessible Palette - Soothing colors with excellent contrast
pub(crate) mod colors {
    pub const NORMAL_NODE_FILL: &str = "#E3F2FD"; // Light blue
    pub const NORMAL_NODE_STROKE: &str = "#1976D2"; // Medium blue
    pub const CYCLE_NODE_FILL: &str = "#FFF3E0"; // Light orange
    pub const CYCLE_NODE_STROKE: &str = "#F57C00"; // Vibrant orange
    pub const NORMAL_EDGE: &str = "#64B5F6"; // Soft blue
    pub const CYCLE_EDGE: &str = "#FF6500"; // Deep orange
    pub const LABEL: &str = "#263238"; // Blue-grey text
}

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(DepGraphError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(DepGraphError::from)
    };
}

/// Every distinct `(parent, child)` edge, in first-encounter order
///
/// Packages are walked in insertion order and each dependency list in its
/// stored order.
pub fn unique_edges(graph: &DependencyGraph) -> Vec<(&str, &str)> {
    let mut seen = HashSet::new();
    graph
        .iter()
        .flat_map(|(package, deps)| deps.iter().map(move |dep| (package, dep.as_str())))
        .filter(|edge| seen.insert(*edge))
        .collect()
}

/// Exports dependency graphs as graph-description text
pub struct GraphTextExporter {
    highlight_cycles: bool,
}

impl GraphTextExporter {
    pub fn new(highlight_cycles: bool) -> Self {
        Self { highlight_cycles }
    }

    /// Edge list in Mermaid flowchart syntax
    ///
    /// A `graph TD` header followed by one `A --> B` line per distinct edge.
    /// Each package gets its own node id, so names that sanitize alike
    /// (`Foo.Bar`, `Foo-Bar`) stay separate nodes.
    pub fn render_mermaid(&self, graph: &DependencyGraph, output: &mut dyn Write) -> Result<()> {
        writeln_out!(output, "graph TD")?;

        let mut ids = MermaidIds::default();
        for (from, to) in unique_edges(graph) {
            let from = ids.node(from);
            let to = ids.node(to);
            writeln_out!(output, "    {from} --> {to}")?;
        }

        Ok(())
    }

    /// [`render_mermaid`](Self::render_mermaid) into a `String`
    pub fn to_edge_list(&self, graph: &DependencyGraph) -> Result<String> {
        let mut output = Vec::new();
        self.render_mermaid(graph, &mut output)?;
        String::from_utf8(output).map_err(|e| {
            DepGraphError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)).into()
        })
    }

    /// Graphviz digraph with the same edge set as the Mermaid output
    pub fn render_dot(
        &self,
        graph: &DependencyGraph,
        groups: &[CycleGroup],
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, "digraph dependencies {{")?;
        writeln_out!(output, "    rankdir=TB;")?;
        writeln_out!(output, "    node [shape=ellipse, style=filled];")?;
        writeln_out!(output)?;

        let in_cycle = |package: &str| groups.iter().any(|g| g.contains(package));

        for package in graph.packages() {
            let (fill_color, stroke_color) = if self.highlight_cycles && in_cycle(package) {
                (colors::CYCLE_NODE_FILL, colors::CYCLE_NODE_STROKE)
            } else {
                (colors::NORMAL_NODE_FILL, colors::NORMAL_NODE_STROKE)
            };

            writeln_out!(
                output,
                r#"    "{}" [fillcolor="{}", color="{}", penwidth=2];"#,
                escape_dot(package),
                fill_color,
                stroke_color
            )?;
        }

        writeln_out!(output)?;

        for (from, to) in unique_edges(graph) {
            // Both ends in one group means the edge lies on a cycle
            let edge_in_cycle = self.highlight_cycles
                && groups.iter().any(|g| g.contains(from) && g.contains(to));

            if edge_in_cycle {
                writeln_out!(
                    output,
                    r#"    "{}" -> "{}" [color="{}", penwidth=3];"#,
                    escape_dot(from),
                    escape_dot(to),
                    colors::CYCLE_EDGE
                )?;
            } else {
                writeln_out!(
                    output,
                    r#"    "{}" -> "{}" [color="{}"];"#,
                    escape_dot(from),
                    escape_dot(to),
                    colors::NORMAL_EDGE
                )?;
            }
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }
}

// Words the flowchart parser reads as syntax instead of node ids
const MERMAID_KEYWORDS: &[&str] = &[
    "end",
    "graph",
    "flowchart",
    "subgraph",
    "direction",
    "style",
    "class",
    "classdef",
    "click",
    "linkstyle",
    "default",
];

/// Node ids handed out during one Mermaid render
#[derive(Default)]
struct MermaidIds<'a> {
    ids: HashMap<&'a str, String>,
    taken: HashSet<String>,
}

impl<'a> MermaidIds<'a> {
    fn id(&mut self, name: &'a str) -> String {
        if let Some(id) = self.ids.get(name) {
            return id.clone();
        }

        let base = mermaid_id(name);
        let reserved = !base.chars().any(|c| c.is_ascii_alphanumeric())
            || MERMAID_KEYWORDS.contains(&base.to_ascii_lowercase().as_str());
        let base = if reserved { format!("pkg_{base}") } else { base };

        let mut id = base.clone();
        let mut suffix = 1;
        while self.taken.contains(&id) {
            suffix += 1;
            id = format!("{base}_{suffix}");
        }

        self.taken.insert(id.clone());
        self.ids.insert(name, id.clone());
        id
    }

    /// The node id, plus a quoted label whenever the id differs from the name
    fn node(&mut self, name: &'a str) -> String {
        let id = self.id(name);
        if id == name {
            id
        } else {
            format!("{id}[\"{}\"]", name.replace('"', "#quot;"))
        }
    }
}

fn mermaid_id(name: &str) -> String {
    // Replace non-alphanumeric characters with underscores for valid Mermaid IDs
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn escape_dot(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}
