use crate::tree::{ClockTree, NodeId, TreeNode};
use ortho_geom::Point;

use std::fmt;

/// Skew report for an embedded clock tree.
#[derive(Clone, Debug, PartialEq)]
pub struct SkewAnalysis {
    /// Largest source-to-sink delay.
    pub max_delay: f64,
    /// Smallest source-to-sink delay.
    pub min_delay: f64,
    /// `max_delay - min_delay`.
    pub skew: f64,
    /// Delay of every sink, in tree traversal order.
    pub sink_delays: Vec<f64>,
    /// Sum of all wire lengths in the tree.
    pub total_wirelength: i32,
    /// Name of the delay model that produced the tree.
    pub delay_model: String,
}

/// Collects sink delays and the total wirelength of `tree`.
///
/// `delay_model` is recorded verbatim in the report; builders pass
/// their model's name (see
/// [`DmeAlgorithm::analyze_skew`](crate::DmeAlgorithm::analyze_skew)).
pub fn analyze_skew(tree: &ClockTree, delay_model: &str) -> SkewAnalysis {
    let mut sink_delays = Vec::new();
    collect_sink_delays(tree, tree.root_id(), &mut sink_delays);
    debug_assert!(!sink_delays.is_empty());

    let mut max_delay = f64::MIN;
    let mut min_delay = f64::MAX;
    for &d in &sink_delays {
        max_delay = max_delay.max(d);
        min_delay = min_delay.min(d);
    }

    SkewAnalysis {
        max_delay,
        min_delay,
        skew: max_delay - min_delay,
        sink_delays,
        total_wirelength: tree.nodes().iter().map(|n| n.wire_length).sum(),
        delay_model: delay_model.to_string(),
    }
}

fn collect_sink_delays(tree: &ClockTree, id: NodeId, out: &mut Vec<f64>) {
    let node = &tree[id];
    if node.is_leaf() {
        out.push(node.delay);
    }
    if let Some(left) = node.left {
        collect_sink_delays(tree, left, out);
    }
    if let Some(right) = node.right {
        collect_sink_delays(tree, right, out);
    }
}

/// Role of a node in the clock tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeRole {
    Sink,
    Internal,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::Sink => write!(f, "sink"),
            NodeRole::Internal => write!(f, "internal"),
        }
    }
}

/// Per-node record in a [`TreeStatistics`] report.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeInfo {
    pub name: String,
    pub position: Point<i32, i32>,
    pub role: NodeRole,
    pub delay: f64,
    pub capacitance: f64,
}

/// Per-wire record in a [`TreeStatistics`] report.
#[derive(Clone, Debug, PartialEq)]
pub struct WireInfo {
    pub from_node: String,
    pub to_node: String,
    pub length: i32,
    pub from_position: Point<i32, i32>,
    pub to_position: Point<i32, i32>,
}

/// Structural summary of a clock tree.
#[derive(Clone, Debug, Default)]
pub struct TreeStatistics {
    pub nodes: Vec<NodeInfo>,
    pub wires: Vec<WireInfo>,
    pub sinks: Vec<String>,
    pub total_nodes: usize,
    pub total_sinks: usize,
    pub total_wires: usize,
}

/// Gathers per-node and per-wire records by a pre-order traversal.
pub fn tree_statistics(tree: &ClockTree) -> TreeStatistics {
    let mut stats = TreeStatistics::default();
    visit(tree, tree.root_id(), None, &mut stats);
    stats.total_nodes = stats.nodes.len();
    stats.total_sinks = stats.sinks.len();
    stats.total_wires = stats.wires.len();
    stats
}

fn visit(tree: &ClockTree, id: NodeId, parent: Option<&TreeNode>, stats: &mut TreeStatistics) {
    let node = &tree[id];
    let role = if node.is_leaf() {
        NodeRole::Sink
    } else {
        NodeRole::Internal
    };
    stats.nodes.push(NodeInfo {
        name: node.name.clone(),
        position: node.position,
        role,
        delay: node.delay,
        capacitance: node.capacitance,
    });
    if node.is_leaf() {
        stats.sinks.push(node.name.clone());
    }
    if let Some(parent) = parent {
        stats.wires.push(WireInfo {
            from_node: parent.name.clone(),
            to_node: node.name.clone(),
            length: node.wire_length,
            from_position: parent.position,
            to_position: node.position,
        });
    }
    if let Some(left) = node.left {
        visit(tree, left, Some(node), stats);
    }
    if let Some(right) = node.right {
        visit(tree, right, Some(node), stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::LinearDelay;
    use crate::dme::DmeAlgorithm;
    use crate::tree::Sink;
    use ortho_geom::point;

    #[test]
    fn statistics_of_a_small_tree() {
        let sinks = vec![
            Sink::new("s1", point(10, 20)),
            Sink::new("s2", point(30, 40)),
        ];
        let dme = DmeAlgorithm::new(sinks, LinearDelay::default()).unwrap();
        let tree = dme.build();
        let stats = tree_statistics(&tree);

        assert_eq!(stats.total_nodes, 3);
        assert_eq!(stats.total_sinks, 2);
        assert_eq!(stats.total_wires, 2);
        assert_eq!(stats.nodes.len(), 3);
        assert_eq!(stats.wires.len(), 2);

        let mut found_s1 = false;
        let mut found_s2 = false;
        let mut found_root = false;
        for node in &stats.nodes {
            match node.name.as_str() {
                "s1" => {
                    found_s1 = true;
                    assert_eq!(node.role, NodeRole::Sink);
                    assert_eq!(node.position, point(10, 20));
                }
                "s2" => {
                    found_s2 = true;
                    assert_eq!(node.role, NodeRole::Sink);
                    assert_eq!(node.position, point(30, 40));
                }
                "n0" => {
                    found_root = true;
                    assert_eq!(node.role, NodeRole::Internal);
                }
                other => panic!("unexpected node {}", other),
            }
        }
        assert!(found_s1 && found_s2 && found_root);

        for wire in &stats.wires {
            assert_eq!(wire.from_node, "n0");
            assert!(wire.to_node == "s1" || wire.to_node == "s2");
            assert!(wire.length >= 0);
        }
    }

    #[test]
    fn statistics_of_a_single_node() {
        let dme = DmeAlgorithm::new(
            vec![Sink::new("root", point(0, 0))],
            LinearDelay::default(),
        )
        .unwrap();
        let tree = dme.build();
        let stats = tree_statistics(&tree);

        assert_eq!(stats.total_nodes, 1);
        assert_eq!(stats.total_sinks, 1);
        assert_eq!(stats.total_wires, 0);
        assert_eq!(stats.sinks, vec!["root".to_string()]);
    }

    #[test]
    fn total_wirelength_matches_wire_records() {
        let sinks = vec![
            Sink::new("s1", point(0, 0)),
            Sink::new("s2", point(40, 10)),
            Sink::new("s3", point(15, 35)),
            Sink::new("s4", point(60, 60)),
        ];
        let dme = DmeAlgorithm::new(sinks, LinearDelay::new(0.5, 0.2)).unwrap();
        let tree = dme.build();

        let analysis = dme.analyze_skew(&tree);
        let stats = tree_statistics(&tree);
        let wire_sum: i32 = stats.wires.iter().map(|w| w.length).sum();
        assert_eq!(analysis.total_wirelength, wire_sum);
        assert_eq!(analysis.sink_delays.len(), 4);
        assert_eq!(analysis.delay_model, "linear");
    }

    #[test]
    fn role_display() {
        assert_eq!(format!("{}", NodeRole::Sink), "sink");
        assert_eq!(format!("{}", NodeRole::Internal), "internal");
    }
}
