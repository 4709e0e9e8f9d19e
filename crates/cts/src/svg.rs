//! SVG rendering of clock trees.
//!
//! Output sink only: the renderer consumes a read-only tree handle and
//! produces a UTF-8 string. Nothing here feeds back into synthesis.

use crate::analysis::SkewAnalysis;
use crate::tree::ClockTree;

use std::fmt::Write;

const SINK_COLOR: &str = "#4CAF50";
const INTERNAL_COLOR: &str = "#2196F3";
const ROOT_COLOR: &str = "#F44336";
const WIRE_COLOR: &str = "#666666";
const TEXT_COLOR: &str = "#333333";

struct Mapping {
    margin: f64,
    scale: f64,
    min_x: i32,
    min_y: i32,
}

impl Mapping {
    fn project(&self, x: i32, y: i32) -> (f64, f64) {
        (
            self.margin + f64::from(x - self.min_x) * self.scale,
            self.margin + f64::from(y - self.min_y) * self.scale,
        )
    }
}

fn fit(tree: &ClockTree, width: u32, height: u32, margin: u32) -> Mapping {
    let mut min_x = i32::MAX;
    let mut max_x = i32::MIN;
    let mut min_y = i32::MAX;
    let mut max_y = i32::MIN;
    for node in tree.nodes() {
        min_x = min_x.min(node.position.x);
        max_x = max_x.max(node.position.x);
        min_y = min_y.min(node.position.y);
        max_y = max_y.max(node.position.y);
    }
    let range_x = (max_x - min_x).max(1);
    let range_y = (max_y - min_y).max(1);

    let scale_x = f64::from(width - 2 * margin) / f64::from(range_x);
    let scale_y = f64::from(height - 2 * margin) / f64::from(range_y);
    Mapping {
        margin: f64::from(margin),
        scale: scale_x.min(scale_y),
        min_x,
        min_y,
    }
}

/// Renders the embedded tree with its skew report as an SVG document.
pub fn clock_tree_svg(
    tree: &ClockTree,
    analysis: &SkewAnalysis,
    width: u32,
    height: u32,
) -> String {
    let map = fit(tree, width, height, 50);
    let mut svg = String::new();

    let _ = writeln!(
        svg,
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">",
        width, height
    );
    let _ = writeln!(svg, "<rect width=\"100%\" height=\"100%\" fill=\"white\"/>");

    // Wires first so the nodes draw on top of them.
    for node in tree.nodes() {
        if let Some(parent) = node.parent {
            let (x1, y1) = map.project(tree[parent].position.x, tree[parent].position.y);
            let (x2, y2) = map.project(node.position.x, node.position.y);
            let _ = writeln!(
                svg,
                "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" \
                 stroke=\"{}\" stroke-width=\"1.5\"/>",
                x1, y1, x2, y2, WIRE_COLOR
            );
        }
    }

    let root_id = tree.root_id().to_usize();
    for (index, node) in tree.nodes().iter().enumerate() {
        let (color, radius) = if index == root_id {
            (ROOT_COLOR, 8)
        } else if node.is_leaf() {
            (SINK_COLOR, 6)
        } else {
            (INTERNAL_COLOR, 4)
        };
        let (x, y) = map.project(node.position.x, node.position.y);
        let _ = writeln!(
            svg,
            "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{}\" fill=\"{}\" \
             stroke=\"black\" stroke-width=\"1\"/>",
            x, y, radius, color
        );
        if node.is_leaf() {
            let _ = writeln!(
                svg,
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" fill=\"{}\">{}</text>",
                x + 8.0,
                y + 4.0,
                TEXT_COLOR,
                node.name
            );
        }
    }

    // Summary box.
    let lines = [
        format!("model: {}", analysis.delay_model),
        format!("sinks: {}", analysis.sink_delays.len()),
        format!("max delay: {:.3}", analysis.max_delay),
        format!("min delay: {:.3}", analysis.min_delay),
        format!("skew: {:.3}", analysis.skew),
        format!("wirelength: {}", analysis.total_wirelength),
    ];
    for (i, line) in lines.iter().enumerate() {
        let _ = writeln!(
            svg,
            "<text x=\"10\" y=\"{}\" font-size=\"12\" fill=\"{}\">{}</text>",
            16 + 14 * i,
            TEXT_COLOR,
            line
        );
    }

    svg.push_str("</svg>\n");
    svg
}
