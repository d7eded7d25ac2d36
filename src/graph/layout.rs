//! Layered SVG diagrams
//!
//! Packages are placed on horizontal rows by their breadth-first distance
//! from the root, then drawn as labelled circles joined by arrows.

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use miette::Result;

use super::renderer::{colors, unique_edges};
use super::types::DependencyGraph;
use crate::constants::layout::{FONT_SIZE, HORIZONTAL_PITCH, MARGIN, NODE_RADIUS, VERTICAL_PITCH};
use crate::detector::CycleGroup;
use crate::error::DepGraphError;

/// Position of one package on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePosition {
    /// Hop distance from the root
    pub level: usize,
    pub x: f64,
    pub y: f64,
}

/// Coordinates for every package reachable from the root
#[derive(Debug, Clone, Default)]
pub struct Layout {
    rows: Vec<Vec<String>>,
    positions: HashMap<String, NodePosition>,
}

impl Layout {
    /// Packages of each level, in first-visited order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn position(&self, package: &str) -> Option<NodePosition> {
        self.positions.get(package).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Canvas size that fits every node plus the margin
    pub fn dimensions(&self) -> (f64, f64) {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let width = 2.0 * MARGIN + columns.saturating_sub(1) as f64 * HORIZONTAL_PITCH;
        let height = 2.0 * MARGIN + self.rows.len().saturating_sub(1) as f64 * VERTICAL_PITCH;
        (width, height)
    }
}

/// Exports dependency graphs as SVG node/edge diagrams
pub struct LayoutExporter {
    highlight_cycles: bool,
}

impl LayoutExporter {
    pub fn new(highlight_cycles: bool) -> Self {
        Self { highlight_cycles }
    }

    /// Assign levels and coordinates by breadth-first search from the root
    ///
    /// The first discovery of a package fixes its level. Packages that are
    /// not reachable from the root get no position.
    pub fn compute_layout(graph: &DependencyGraph) -> Layout {
        let mut layout = Layout::default();
        let root = graph.root();
        if !graph.contains(root) {
            return layout;
        }

        let mut levels: HashMap<&str, usize> = HashMap::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        levels.insert(root, 0);
        queue.push_back(root);

        while let Some(package) = queue.pop_front() {
            let level = levels[package];
            if layout.rows.len() <= level {
                layout.rows.push(Vec::new());
            }
            let column = layout.rows[level].len();
            layout.rows[level].push(package.to_string());
            layout.positions.insert(
                package.to_string(),
                NodePosition {
                    level,
                    x: MARGIN + column as f64 * HORIZONTAL_PITCH,
                    y: MARGIN + level as f64 * VERTICAL_PITCH,
                },
            );

            for dep in graph.dependencies(package) {
                if graph.contains(dep) && !levels.contains_key(dep.as_str()) {
                    levels.insert(dep.as_str(), level + 1);
                    queue.push_back(dep.as_str());
                }
            }
        }

        layout
    }

    /// Write the diagram to `path`
    pub fn export(
        &self,
        graph: &DependencyGraph,
        groups: &[CycleGroup],
        path: &Path,
    ) -> Result<(), DepGraphError> {
        let render_error = |source| DepGraphError::RenderError {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(render_error)?;
        let mut writer = BufWriter::new(file);
        self.write_svg(graph, groups, &mut writer)
            .and_then(|()| writer.flush())
            .map_err(render_error)
    }

    /// Write the diagram to any writer
    pub fn render(
        &self,
        graph: &DependencyGraph,
        groups: &[CycleGroup],
        output: &mut dyn Write,
    ) -> Result<()> {
        self.write_svg(graph, groups, output)
            .map_err(DepGraphError::from)?;
        Ok(())
    }

    fn write_svg(
        &self,
        graph: &DependencyGraph,
        groups: &[CycleGroup],
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let layout = Self::compute_layout(graph);
        let (width, height) = layout.dimensions();
        let in_cycle = |package: &str| {
            self.highlight_cycles && groups.iter().any(|g| g.contains(package))
        };

        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
        )?;
        writeln!(out, "  <defs>")?;
        for (id, color) in [("arrow", colors::NORMAL_EDGE), ("arrow-cycle", colors::CYCLE_EDGE)] {
            writeln!(
                out,
                r#"    <marker id="{id}" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="8" markerHeight="8" orient="auto"><path d="M 0 0 L 10 5 L 0 10 z" fill="{color}"/></marker>"#
            )?;
        }
        writeln!(out, "  </defs>")?;
        writeln!(out, r#"  <rect width="100%" height="100%" fill="white"/>"#)?;

        for (from, to) in unique_edges(graph) {
            let Some(start) = layout.position(from) else {
                continue;
            };

            let (color, marker) = if in_cycle(from) && in_cycle(to) {
                (colors::CYCLE_EDGE, "arrow-cycle")
            } else {
                (colors::NORMAL_EDGE, "arrow")
            };

            if from == to {
                // Self dependency: a loop over the top of the circle
                let dx = NODE_RADIUS * 0.7;
                writeln!(
                    out,
                    r#"  <path d="M {:.1} {:.1} C {:.1} {:.1} {:.1} {:.1} {:.1} {:.1}" fill="none" stroke="{color}" stroke-width="1.5" marker-end="url(#{marker})"/>"#,
                    start.x - dx,
                    start.y - dx,
                    start.x - 2.0 * NODE_RADIUS,
                    start.y - 2.5 * NODE_RADIUS,
                    start.x + 2.0 * NODE_RADIUS,
                    start.y - 2.5 * NODE_RADIUS,
                    start.x + dx,
                    start.y - dx
                )?;
                continue;
            }

            let ((x1, y1), (x2, y2)) = edge_anchors(start, layout.position(to));
            writeln!(
                out,
                r#"  <line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{color}" stroke-width="1.5" marker-end="url(#{marker})"/>"#
            )?;
        }

        for row in layout.rows() {
            for package in row {
                let Some(pos) = layout.position(package) else {
                    continue;
                };
                let (fill, stroke) = if in_cycle(package) {
                    (colors::CYCLE_NODE_FILL, colors::CYCLE_NODE_STROKE)
                } else {
                    (colors::NORMAL_NODE_FILL, colors::NORMAL_NODE_STROKE)
                };

                writeln!(
                    out,
                    r#"  <circle cx="{:.1}" cy="{:.1}" r="{NODE_RADIUS:.1}" fill="{fill}" stroke="{stroke}" stroke-width="2"/>"#,
                    pos.x, pos.y
                )?;
                writeln!(
                    out,
                    r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" dominant-baseline="middle" font-family="sans-serif" font-size="{FONT_SIZE}" fill="{}">{}</text>"#,
                    pos.x,
                    pos.y,
                    colors::LABEL,
                    escape_xml(package)
                )?;
            }
        }

        writeln!(out, "</svg>")?;
        Ok(())
    }
}

/// Arrow endpoints on the facing sides of the two circles
///
/// Downward edges run bottom to top, edges back up to an earlier level run
/// top to bottom and edges within one row join the sides. A target without
/// a position gets a point half a pitch right of the source, one row down.
fn edge_anchors(start: NodePosition, end: Option<NodePosition>) -> ((f64, f64), (f64, f64)) {
    let Some(end) = end else {
        return (
            (start.x, start.y + NODE_RADIUS),
            (
                start.x + HORIZONTAL_PITCH / 2.0,
                start.y + VERTICAL_PITCH - NODE_RADIUS,
            ),
        );
    };

    match end.level.cmp(&start.level) {
        Ordering::Greater => (
            (start.x, start.y + NODE_RADIUS),
            (end.x, end.y - NODE_RADIUS),
        ),
        Ordering::Less => (
            (start.x, start.y - NODE_RADIUS),
            (end.x, end.y + NODE_RADIUS),
        ),
        Ordering::Equal if end.x >= start.x => (
            (start.x + NODE_RADIUS, start.y),
            (end.x - NODE_RADIUS, end.y),
        ),
        Ordering::Equal => (
            (start.x - NODE_RADIUS, start.y),
            (end.x + NODE_RADIUS, end.y),
        ),
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(root: &str, edges: Vec<(&str, Vec<&str>)>) -> DependencyGraph {
        let mut graph = DependencyGraph::new(root);
        for (package, deps) in edges {
            graph.add_package(package);
            for dep in deps {
                graph.add_dependency(package, dep);
            }
        }
        graph
    }

    #[test]
    fn test_levels_follow_shortest_distance() {
        let g = graph(
            "Root",
            vec![
                ("Root", vec!["A", "B"]),
                ("A", vec!["C"]),
                ("C", vec!["B"]),
                ("B", vec![]),
            ],
        );

        let layout = LayoutExporter::compute_layout(&g);
        assert_eq!(layout.rows(), [vec!["Root"], vec!["A", "B"], vec!["C"]]);
        assert_eq!(layout.position("B").map(|p| p.level), Some(1));
        assert_eq!(layout.position("C").map(|p| p.level), Some(2));
    }

    #[test]
    fn test_coordinates_use_fixed_pitch() {
        let g = graph("Root", vec![("Root", vec!["A", "B"]), ("A", vec![]), ("B", vec![])]);

        let layout = LayoutExporter::compute_layout(&g);
        let root = layout.position("Root").unwrap();
        let a = layout.position("A").unwrap();
        let b = layout.position("B").unwrap();

        assert_eq!((root.x, root.y), (MARGIN, MARGIN));
        assert_eq!((a.x, a.y), (MARGIN, MARGIN + VERTICAL_PITCH));
        assert_eq!(b.x - a.x, HORIZONTAL_PITCH);
        assert_eq!(
            layout.dimensions(),
            (2.0 * MARGIN + HORIZONTAL_PITCH, 2.0 * MARGIN + VERTICAL_PITCH)
        );
    }

    #[test]
    fn test_unreachable_package_is_omitted() {
        let g = graph("Root", vec![("Root", vec![]), ("Island", vec![])]);

        let layout = LayoutExporter::compute_layout(&g);
        assert_eq!(layout.len(), 1);
        assert!(layout.position("Island").is_none());
    }

    #[test]
    fn test_missing_root_gives_empty_layout() {
        let g = DependencyGraph::new("Root");
        let layout = LayoutExporter::compute_layout(&g);
        assert!(layout.is_empty());
        assert_eq!(layout.dimensions(), (2.0 * MARGIN, 2.0 * MARGIN));
    }

    #[test]
    fn test_dangling_edge_uses_fallback_point() {
        let g = graph("Root", vec![("Root", vec!["Ghost"])]);
        let mut output = Vec::new();
        LayoutExporter::new(false).render(&g, &[], &mut output).unwrap();

        let svg = String::from_utf8(output).unwrap();
        let expected = format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}""#,
            MARGIN,
            MARGIN + NODE_RADIUS,
            MARGIN + HORIZONTAL_PITCH / 2.0,
            MARGIN + VERTICAL_PITCH - NODE_RADIUS
        );
        assert!(svg.contains(&expected), "missing fallback edge in:\n{svg}");
        assert_eq!(svg.matches("<circle").count(), 1);
    }

    fn at(level: usize, column: usize) -> NodePosition {
        NodePosition {
            level,
            x: MARGIN + column as f64 * HORIZONTAL_PITCH,
            y: MARGIN + level as f64 * VERTICAL_PITCH,
        }
    }

    #[test]
    fn test_edge_anchors_face_each_other() {
        let parent = at(0, 0);
        let child = at(1, 1);

        // Down: parent bottom to child top
        assert_eq!(
            edge_anchors(parent, Some(child)),
            ((parent.x, parent.y + NODE_RADIUS), (child.x, child.y - NODE_RADIUS))
        );
        // Back up: child top to parent bottom
        assert_eq!(
            edge_anchors(child, Some(parent)),
            ((child.x, child.y - NODE_RADIUS), (parent.x, parent.y + NODE_RADIUS))
        );
    }

    #[test]
    fn test_edge_anchors_within_a_row_use_the_sides() {
        let left = at(1, 0);
        let right = at(1, 1);

        assert_eq!(
            edge_anchors(left, Some(right)),
            ((left.x + NODE_RADIUS, left.y), (right.x - NODE_RADIUS, right.y))
        );
        assert_eq!(
            edge_anchors(right, Some(left)),
            ((right.x - NODE_RADIUS, right.y), (left.x + NODE_RADIUS, left.y))
        );
    }

    #[test]
    fn test_back_edge_is_drawn_upwards() {
        let g = graph("App", vec![("App", vec!["Http"]), ("Http", vec!["App"])]);
        let mut output = Vec::new();
        LayoutExporter::new(true).render(&g, &[], &mut output).unwrap();

        let svg = String::from_utf8(output).unwrap();
        let back = format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}""#,
            MARGIN,
            MARGIN + VERTICAL_PITCH - NODE_RADIUS,
            MARGIN,
            MARGIN + NODE_RADIUS
        );
        assert!(svg.contains(&back), "missing upward edge in:\n{svg}");
    }

    #[test]
    fn test_self_dependency_is_a_loop() {
        let g = graph("Root", vec![("Root", vec!["Root"])]);
        let mut output = Vec::new();
        LayoutExporter::new(false).render(&g, &[], &mut output).unwrap();

        let svg = String::from_utf8(output).unwrap();
        assert_eq!(svg.matches(r#"fill="none""#).count(), 1);
        assert!(!svg.contains("<line"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("A<B>&\"C\""), "A&lt;B&gt;&amp;&quot;C&quot;");
    }
}
