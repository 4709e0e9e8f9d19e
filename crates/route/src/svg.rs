//! SVG rendering of routing trees.
//!
//! Output sinks only: the renderers consume read-only tree handles and
//! produce UTF-8 strings. 3D trees are projected onto the x/layer
//! plane, which is the view that makes via stacks visible.

use crate::tree::{NodeId, NodeKind, RoutingTree};
use ortho_geom::{Box3, Point, Point3, Rect};

use std::fmt::Write;

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

    fn fit(points: impl Iterator<Item = (i32, i32)>, width: u32, height: u32, margin: u32) -> Self {
        let mut min_x = i32::MAX;
        let mut max_x = i32::MIN;
        let mut min_y = i32::MAX;
        let mut max_y = i32::MIN;
        for (x, y) in points {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
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
}

fn node_style(kind: NodeKind, name: &str) -> (&'static str, u32, String) {
    let suffix = name.split('_').nth(1).unwrap_or("");
    match kind {
        NodeKind::Source => ("red", 8, "S".to_string()),
        NodeKind::Steiner => ("blue", 6, format!("S{}", suffix)),
        NodeKind::Terminal => ("green", 6, format!("T{}", suffix)),
    }
}

fn header(svg: &mut String, width: u32, height: u32) {
    let _ = writeln!(
        svg,
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">",
        width, height
    );
    let _ = writeln!(svg, "<rect width=\"100%\" height=\"100%\" fill=\"white\"/>");
    let _ = writeln!(svg, "<defs>");
    let _ = writeln!(
        svg,
        "<marker id=\"arrowhead\" markerWidth=\"10\" markerHeight=\"7\" \
         refX=\"9\" refY=\"3.5\" orient=\"auto\">"
    );
    let _ = writeln!(svg, "<polygon points=\"0 0, 10 3.5, 0 7\" fill=\"black\"/>");
    let _ = writeln!(svg, "</marker>");
    let _ = writeln!(svg, "</defs>");
}

fn draw_edges<P, F>(
    svg: &mut String,
    tree: &RoutingTree<P>,
    node_id: NodeId,
    map: &Mapping,
    project: &F,
) where
    P: crate::RoutePoint,
    F: Fn(&P) -> (i32, i32),
{
    let node = &tree[node_id];
    for &child in &node.children {
        let (x, y) = project(&node.position);
        let (cx, cy) = project(&tree[child].position);
        let (x1, y1) = map.project(x, y);
        let (x2, y2) = map.project(cx, cy);
        let _ = writeln!(
            svg,
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" \
             stroke=\"black\" stroke-width=\"2\" marker-end=\"url(#arrowhead)\"/>",
            x1, y1, x2, y2
        );
        draw_edges(svg, tree, child, map, project);
    }
}

fn draw_nodes<P, F>(svg: &mut String, tree: &RoutingTree<P>, map: &Mapping, project: &F)
where
    P: crate::RoutePoint,
    F: Fn(&P) -> (i32, i32),
{
    for node in tree.iter() {
        let (color, radius, label) = node_style(node.kind, &node.name);
        let (px, py) = project(&node.position);
        let (x, y) = map.project(px, py);
        let _ = writeln!(
            svg,
            "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{}\" fill=\"{}\" \
             stroke=\"black\" stroke-width=\"1\"/>",
            x, y, radius, color
        );
        let _ = writeln!(
            svg,
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\">{}</text>",
            x + f64::from(radius) + 2.0,
            y + 4.0,
            label
        );
    }
}

fn draw_legend(svg: &mut String, height: u32) {
    let entries = [("red", "source"), ("green", "terminal"), ("blue", "steiner")];
    for (i, (color, label)) in entries.iter().enumerate() {
        let y = f64::from(height) - 16.0 - 18.0 * i as f64;
        let _ = writeln!(
            svg,
            "<circle cx=\"16\" cy=\"{:.1}\" r=\"5\" fill=\"{}\" stroke=\"black\"/>",
            y, color
        );
        let _ = writeln!(
            svg,
            "<text x=\"26\" y=\"{:.1}\" font-size=\"11\">{}</text>",
            y + 4.0,
            label
        );
    }
}

fn draw_stats<P: crate::RoutePoint>(svg: &mut String, tree: &RoutingTree<P>) {
    let lines = [
        format!("nodes: {}", tree.len()),
        format!("terminals: {}", tree.terminals().len()),
        format!("steiners: {}", tree.steiner_nodes().len()),
        format!("wirelength: {}", tree.wirelength()),
    ];
    for (i, line) in lines.iter().enumerate() {
        let _ = writeln!(
            svg,
            "<text x=\"10\" y=\"{}\" font-size=\"12\" fill=\"#333333\">{}</text>",
            16 + 14 * i,
            line
        );
    }
}

/// Renders a 2D routing tree with optional keep-outs.
pub fn routing_tree_svg(
    tree: &RoutingTree<Point<i32, i32>>,
    keepouts: Option<&[Rect<i32>]>,
    width: u32,
    height: u32,
) -> String {
    let project = |p: &Point<i32, i32>| (p.x, p.y);
    let map = Mapping::fit(tree.iter().map(|n| project(&n.position)), width, height, 50);

    let mut svg = String::new();
    header(&mut svg, width, height);
    draw_edges(&mut svg, tree, tree.source_id(), &map, &project);
    if let Some(keepouts) = keepouts {
        for keepout in keepouts {
            let (x1, y1) = map.project(keepout.x.lb, keepout.y.lb);
            let (x2, y2) = map.project(keepout.x.ub, keepout.y.ub);
            let _ = writeln!(
                svg,
                "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" \
                 fill=\"orange\" stroke=\"black\" stroke-width=\"1\" opacity=\"0.6\"/>",
                x1,
                y1,
                x2 - x1,
                y2 - y1
            );
        }
    }
    draw_nodes(&mut svg, tree, &map, &project);
    draw_legend(&mut svg, height);
    draw_stats(&mut svg, tree);
    svg.push_str("</svg>\n");
    svg
}

/// Renders a 3D routing tree projected onto the x/layer plane, the
/// layer axis stretched by `scale_z`.
pub fn routing_tree3d_svg(
    tree: &RoutingTree<Point3<i32>>,
    keepouts: Option<&[Box3<i32>]>,
    scale_z: i32,
    width: u32,
    height: u32,
) -> String {
    let project = move |p: &Point3<i32>| (p.x.x, p.y * scale_z);
    let map = Mapping::fit(tree.iter().map(|n| project(&n.position)), width, height, 50);

    let mut svg = String::new();
    header(&mut svg, width, height);
    draw_edges(&mut svg, tree, tree.source_id(), &map, &project);
    if let Some(keepouts) = keepouts {
        for keepout in keepouts {
            let (x1, y1) = map.project(keepout.x.x.lb, keepout.y.lb * scale_z);
            let (x2, y2) = map.project(keepout.x.x.ub, keepout.y.ub * scale_z);
            let _ = writeln!(
                svg,
                "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" \
                 fill=\"orange\" stroke=\"black\" stroke-width=\"1\" opacity=\"0.6\"/>",
                x1,
                y1,
                x2 - x1,
                y2 - y1
            );
        }
    }
    draw_nodes(&mut svg, tree, &map, &project);
    draw_legend(&mut svg, height);
    draw_stats(&mut svg, tree);
    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::GlobalRouter;
    use ortho_geom::{interval, point, rect};

    #[test]
    fn renders_a_small_net() {
        let mut router = GlobalRouter::new(
            point(0, 0),
            vec![point(10, 0), point(5, 8), point(12, 9)],
            None,
        );
        router.route_with_steiners();

        let keepouts = vec![rect(interval(2, 3), interval(2, 3))];
        let svg = routing_tree_svg(router.tree(), Some(&keepouts), 800, 600);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        // One circle per node plus the three legend swatches.
        assert_eq!(svg.matches("<circle").count(), router.tree().len() + 3);
        assert!(svg.contains("orange"));
        assert!(svg.contains("wirelength:"));
    }

    #[test]
    fn renders_a_layered_net() {
        let mut router = GlobalRouter::new(
            point(point(0, 0), 0),
            vec![point(point(10, 0), 1), point(point(5, 8), 2)],
            None,
        );
        router.route_with_steiners();

        let svg = routing_tree3d_svg(router.tree(), None, 100, 800, 600);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<line"));
    }
}
