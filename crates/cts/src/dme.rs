use crate::analysis::{analyze_skew, SkewAnalysis};
use crate::delay::DelayModel;
use crate::tree::{ClockTree, NodeId, Sink, TreeNode};
use ortho_geom::{ManhattanArc, MergingSegment, MinDist, Point};

use std::fmt;

/// Errors reported by the clock-tree builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CtsError {
    /// The sink set was empty; there is nothing to synthesize.
    EmptySinkSet,
}

impl fmt::Display for CtsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CtsError::EmptySinkSet => write!(f, "no sinks provided"),
        }
    }
}

impl std::error::Error for CtsError {}

/// Deferred Merge Embedding.
///
/// Synthesizes a zero-skew clock tree over a set of sinks in four
/// passes:
///
/// 1. a balanced merging topology, bipartitioning the sinks at the
///    median along alternating axes;
/// 2. bottom-up merging segments: each internal node gets the Manhattan
///    arc of positions that balance its two subtrees, with downstream
///    capacitance accumulated on the way up;
/// 3. top-down embedding: the root picks the upper corner of its
///    segment, every other node the point of its segment nearest to its
///    parent;
/// 4. delay propagation from the root through the embedded wires.
#[derive(Debug)]
pub struct DmeAlgorithm<M> {
    sinks: Vec<Sink>,
    model: M,
}

impl<M: DelayModel> DmeAlgorithm<M> {
    /// Fails with [`CtsError::EmptySinkSet`] when `sinks` is empty.
    pub fn new(sinks: Vec<Sink>, model: M) -> Result<Self, CtsError> {
        if sinks.is_empty() {
            return Err(CtsError::EmptySinkSet);
        }
        Ok(DmeAlgorithm { sinks, model })
    }

    /// The delay model driving the synthesis.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Runs all four passes and returns the embedded tree.
    pub fn build(&self) -> ClockTree {
        let mut nodes: Vec<TreeNode> = Vec::with_capacity(2 * self.sinks.len());
        for sink in &self.sinks {
            let mut node = TreeNode::new(sink.name.clone(), sink.position);
            node.capacitance = sink.capacitance;
            nodes.push(node);
        }
        let leaf_ids: Vec<NodeId> = (0..nodes.len() as u32).map(NodeId).collect();

        // The first bipartition is a horizontal cut (sorted by y).
        let mut counter = 0u32;
        let root = build_topology(&mut nodes, leaf_ids, false, &mut counter);

        let mut segments: Vec<Option<MergingSegment<i32>>> = Vec::new();
        compute_segment(&self.model, &mut nodes, &mut segments, root);

        embed_node(&mut nodes, &segments, root, None);
        compute_delays(&self.model, &mut nodes, root, 0.0);

        dme_log!(
            "dme: {} sinks embedded into {} nodes",
            self.sinks.len(),
            nodes.len()
        );
        ClockTree::new(nodes, root)
    }

    /// Skew report for a tree built by this instance.
    pub fn analyze_skew(&self, tree: &ClockTree) -> SkewAnalysis {
        analyze_skew(tree, self.model.name())
    }
}

/// Recursively bipartition `group` at the median, alternating the sort
/// axis, and create one internal node per split. Returns the subtree
/// root.
fn build_topology(
    nodes: &mut Vec<TreeNode>,
    group: Vec<NodeId>,
    vertical: bool,
    counter: &mut u32,
) -> NodeId {
    if group.len() == 1 {
        return group[0];
    }

    let mut sorted = group;
    if vertical {
        sorted.sort_by_key(|id| nodes[id.to_usize()].position.x);
    } else {
        sorted.sort_by_key(|id| nodes[id.to_usize()].position.y);
    }

    let mid = sorted.len() / 2;
    let right_group = sorted.split_off(mid);
    let left_group = sorted;

    let left = build_topology(nodes, left_group, !vertical, counter);
    let right = build_topology(nodes, right_group, !vertical, counter);

    // Fresh internal node; its position is provisional until embedding.
    let name = format!("n{}", *counter);
    *counter += 1;
    let parent = NodeId(nodes.len() as u32);
    let mut node = TreeNode::new(name, nodes[left.to_usize()].position);
    node.left = Some(left);
    node.right = Some(right);
    nodes.push(node);

    nodes[left.to_usize()].parent = Some(parent);
    nodes[right.to_usize()].parent = Some(parent);
    parent
}

/// Bottom-up merging-segment computation. Also sets per-branch wire
/// lengths, elongation flags, tap delays and downstream capacitances.
fn compute_segment<M: DelayModel>(
    model: &M,
    nodes: &mut Vec<TreeNode>,
    segments: &mut Vec<Option<MergingSegment<i32>>>,
    id: NodeId,
) -> MergingSegment<i32> {
    if segments.len() < nodes.len() {
        segments.resize(nodes.len(), None);
    }

    let node = &nodes[id.to_usize()];
    if node.is_leaf() {
        let segment = ManhattanArc::from_point(&node.position).to_region();
        segments[id.to_usize()] = Some(segment);
        return segment;
    }

    let left = node.left.expect("internal node has a left child");
    let right = node.right.expect("internal node has a right child");

    let left_segment = compute_segment(model, nodes, segments, left);
    let right_segment = compute_segment(model, nodes, segments, right);

    let distance = left_segment.min_dist_with(&right_segment);
    let tapping = {
        let (l, r) = (&nodes[left.to_usize()], &nodes[right.to_usize()]);
        model.tapping_point(l, r, distance)
    };

    nodes[left.to_usize()].wire_length = tapping.wire_left;
    nodes[right.to_usize()].wire_length = tapping.wire_right;
    if tapping.elongate_left {
        nodes[left.to_usize()].need_elongation = true;
    }
    if tapping.elongate_right {
        nodes[right.to_usize()].need_elongation = true;
    }

    let segment = left_segment.merge_with(&right_segment, tapping.extend_left);
    let wire_cap = model.wire_capacitance(distance);
    let child_cap = nodes[left.to_usize()].capacitance + nodes[right.to_usize()].capacitance;
    {
        let node = &mut nodes[id.to_usize()];
        node.delay = tapping.delay_at_tap;
        node.capacitance = child_cap + wire_cap;
    }
    segments[id.to_usize()] = Some(segment);
    segment
}

/// Top-down embedding: pin every node to a point of its merging
/// segment and record the realized wire length to its parent.
fn embed_node(
    nodes: &mut Vec<TreeNode>,
    segments: &[Option<MergingSegment<i32>>],
    id: NodeId,
    parent_position: Option<Point<i32, i32>>,
) {
    let segment = segments[id.to_usize()]
        .as_ref()
        .expect("merging segment computed for every node");

    let position = match parent_position {
        // Any corner of the root segment is valid; the upper corner is
        // the convention.
        None => segment.upper_corner(),
        Some(parent) => {
            let position = segment.nearest_point_to(&parent);
            nodes[id.to_usize()].wire_length = position.min_dist_with(&parent);
            position
        }
    };
    nodes[id.to_usize()].position = position;

    let (left, right) = (nodes[id.to_usize()].left, nodes[id.to_usize()].right);
    if let Some(left) = left {
        embed_node(nodes, segments, left, Some(position));
    }
    if let Some(right) = right {
        embed_node(nodes, segments, right, Some(position));
    }
}

/// Final pass: accumulated delays from the root through the embedded
/// wire lengths.
fn compute_delays<M: DelayModel>(model: &M, nodes: &mut Vec<TreeNode>, id: NodeId, parent_delay: f64) {
    let delay = if nodes[id.to_usize()].parent.is_some() {
        let node = &nodes[id.to_usize()];
        parent_delay + model.wire_delay(node.wire_length, node.capacitance)
    } else {
        0.0
    };
    nodes[id.to_usize()].delay = delay;

    let (left, right) = (nodes[id.to_usize()].left, nodes[id.to_usize()].right);
    if let Some(left) = left {
        compute_delays(model, nodes, left, delay);
    }
    if let Some(right) = right {
        compute_delays(model, nodes, right, delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::{ElmoreDelay, LinearDelay};
    use ortho_geom::point;

    fn count_leaves(tree: &ClockTree) -> usize {
        tree.nodes().iter().filter(|n| n.is_leaf()).count()
    }

    #[test]
    fn empty_sink_set_is_an_error() {
        let err = DmeAlgorithm::new(Vec::new(), LinearDelay::default()).unwrap_err();
        assert_eq!(err, CtsError::EmptySinkSet);
        assert_eq!(format!("{}", err), "no sinks provided");
    }

    #[test]
    fn single_sink_becomes_the_root() {
        let sinks = vec![Sink::with_capacitance("s1", point(10, 20), 1.5)];
        let dme = DmeAlgorithm::new(sinks, LinearDelay::default()).unwrap();
        let tree = dme.build();

        let root = tree.root();
        assert_eq!(root.name, "s1");
        assert_eq!(root.position, point(10, 20));
        assert!(root.is_leaf());
        assert_eq!(root.delay, 0.0);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn two_sinks_merge_with_zero_skew() {
        let sinks = vec![
            Sink::new("s1", point(0, 0)),
            Sink::new("s2", point(10, 0)),
        ];
        let dme = DmeAlgorithm::new(sinks, LinearDelay::new(1.0, 1.0)).unwrap();
        let tree = dme.build();

        let root = tree.root();
        assert!(!root.is_leaf());
        let left = &tree[root.left.unwrap()];
        let right = &tree[root.right.unwrap()];
        assert!(left.is_leaf());
        assert!(right.is_leaf());

        // The root sits on its merging segment: equidistant to both.
        assert_eq!(
            root.position.min_dist_with(&left.position),
            root.position.min_dist_with(&right.position)
        );

        let analysis = dme.analyze_skew(&tree);
        assert!(analysis.skew.abs() < 1e-3);
        assert!(analysis.total_wirelength >= 10);
    }

    #[test]
    fn multiple_sinks() {
        let sinks = vec![
            Sink::new("s1", point(10, 20)),
            Sink::new("s2", point(30, 40)),
            Sink::new("s3", point(50, 10)),
        ];
        let dme = DmeAlgorithm::new(sinks, LinearDelay::default()).unwrap();
        let tree = dme.build();
        assert!(!tree.root().is_leaf());
        assert_eq!(count_leaves(&tree), 3);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn skew_analysis_of_three_sinks() {
        let sinks = vec![
            Sink::new("s1", point(0, 0)),
            Sink::new("s2", point(10, 10)),
            Sink::new("s3", point(20, 0)),
        ];
        let dme = DmeAlgorithm::new(sinks, LinearDelay::new(1.0, 1.0)).unwrap();
        let tree = dme.build();
        let analysis = dme.analyze_skew(&tree);

        assert!(analysis.max_delay >= analysis.min_delay);
        assert!(analysis.skew >= 0.0);
        assert_eq!(analysis.sink_delays.len(), 3);
        assert!(analysis.total_wirelength > 0);
        assert_eq!(analysis.delay_model, "linear");
        assert!(analysis.skew < 1e-3);
    }

    #[test]
    fn five_sink_seed_scenario() {
        let sinks = vec![
            Sink::new("s1", point(10, 20)),
            Sink::new("s2", point(30, 40)),
            Sink::new("s3", point(50, 10)),
            Sink::new("s4", point(70, 30)),
            Sink::new("s5", point(90, 50)),
        ];
        let dme = DmeAlgorithm::new(sinks, LinearDelay::new(0.5, 0.2)).unwrap();
        let tree = dme.build();
        let analysis = dme.analyze_skew(&tree);

        // 5 sinks + 4 internal merge nodes.
        assert_eq!(tree.len(), 9);
        assert!(analysis.total_wirelength > 0);
        // The tapping clamp rounds by at most one delay unit.
        assert!(analysis.skew <= 0.5 + 1e-9);
    }

    #[test]
    fn grid_of_sinks_balances_exactly() {
        let mut sinks = Vec::new();
        for i in 0..10 {
            for j in 0..10 {
                sinks.push(Sink::new(
                    format!("s{}_{}", i, j),
                    point(i * 100, j * 100),
                ));
            }
        }
        let dme = DmeAlgorithm::new(sinks, LinearDelay::new(0.5, 0.2)).unwrap();
        let tree = dme.build();
        let analysis = dme.analyze_skew(&tree);

        assert_eq!(tree.len(), 2 * 100 - 1);
        assert_eq!(analysis.sink_delays.len(), 100);
        assert!(analysis.skew <= 1.0);
        assert!(analysis.total_wirelength > 0);
    }

    #[test]
    fn sinks_along_a_line() {
        let sinks: Vec<Sink> = (0..50)
            .map(|i| Sink::new(format!("s{}", i), point(i * 100, 500)))
            .collect();
        let dme = DmeAlgorithm::new(sinks, LinearDelay::default()).unwrap();
        let tree = dme.build();
        let analysis = dme.analyze_skew(&tree);

        assert_eq!(tree.len(), 2 * 50 - 1);
        assert_eq!(count_leaves(&tree), 50);
        // Zero skew up to rounding, unless a tap had to clamp (in which
        // case the branch is marked for detour elongation instead).
        let clamped = tree.nodes().iter().any(|n| n.need_elongation);
        assert!(analysis.skew <= 1.0 || clamped);
    }

    fn scattered_sinks(count: usize, cap_step: f64) -> Vec<Sink> {
        let mut hgen_x = ortho_extra::VdCorput::new(3, 7);
        let mut hgen_y = ortho_extra::VdCorput::new(2, 11);
        (0..count)
            .map(|i| {
                Sink::with_capacitance(
                    format!("s{}", i),
                    point(hgen_x.pop() as i32, hgen_y.pop() as i32),
                    0.5 + (i % 8) as f64 * cap_step,
                )
            })
            .collect()
    }

    #[test]
    fn many_scattered_sinks() {
        let dme = DmeAlgorithm::new(scattered_sinks(256, 0.5), LinearDelay::default()).unwrap();
        let tree = dme.build();
        let analysis = dme.analyze_skew(&tree);

        assert_eq!(tree.len(), 2 * 256 - 1);
        assert_eq!(count_leaves(&tree), 256);
        let clamped = tree.nodes().iter().any(|n| n.need_elongation);
        assert!(analysis.skew <= 1.0 || clamped);
        assert!(analysis.total_wirelength > 0);
    }

    #[test]
    fn clustered_sinks_under_elmore() {
        // Uneven loads over a small area stress the RC tapping solve.
        let mut hgen_x = ortho_extra::VdCorput::new(3, 4);
        let mut hgen_y = ortho_extra::VdCorput::new(2, 6);
        let sinks: Vec<Sink> = (0..100)
            .map(|i| {
                Sink::with_capacitance(
                    format!("s{}", i),
                    point(hgen_x.pop() as i32, hgen_y.pop() as i32),
                    0.5 + (i % 8) as f64 * 0.2,
                )
            })
            .collect();
        let dme = DmeAlgorithm::new(sinks, ElmoreDelay::new(0.1, 0.2)).unwrap();
        let tree = dme.build();
        let analysis = dme.analyze_skew(&tree);

        assert_eq!(tree.len(), 2 * 100 - 1);
        assert!(analysis.skew >= 0.0);
        assert!(analysis.skew < analysis.max_delay.max(1.0));
        assert_eq!(analysis.delay_model, "elmore");
    }

    #[test]
    fn linear_and_elmore_reports() {
        let sinks = vec![
            Sink::new("s1", point(10, 20)),
            Sink::new("s2", point(30, 40)),
            Sink::new("s3", point(50, 10)),
        ];
        let linear = DmeAlgorithm::new(sinks.clone(), LinearDelay::new(0.5, 0.2)).unwrap();
        let elmore = DmeAlgorithm::new(sinks, ElmoreDelay::new(0.1, 0.2)).unwrap();

        let a1 = linear.analyze_skew(&linear.build());
        let a2 = elmore.analyze_skew(&elmore.build());

        assert!(a1.skew <= 1.0);
        assert!(a2.skew <= 1.0);
        assert!(a1.total_wirelength > 0);
        assert!(a2.total_wirelength > 0);
        assert_ne!(a1.delay_model, a2.delay_model);
    }

    #[test]
    fn coincident_sinks_are_legal() {
        let sinks = vec![
            Sink::new("s1", point(10, 10)),
            Sink::new("s2", point(10, 10)),
            Sink::new("s3", point(10, 10)),
        ];
        let dme = DmeAlgorithm::new(sinks, LinearDelay::default()).unwrap();
        let tree = dme.build();
        let analysis = dme.analyze_skew(&tree);
        assert_eq!(analysis.skew, 0.0);
        assert_eq!(analysis.total_wirelength, 0);
    }

    #[test]
    fn distant_sinks() {
        let sinks = vec![
            Sink::new("s1", point(0, 0)),
            Sink::new("s2", point(1000, 1000)),
        ];
        let dme = DmeAlgorithm::new(sinks, LinearDelay::default()).unwrap();
        let tree = dme.build();
        let analysis = dme.analyze_skew(&tree);
        assert!(analysis.total_wirelength >= 2000);
        assert!(analysis.skew < 1e-3);
    }

    #[test]
    fn internal_nodes_lie_on_balanced_positions() {
        let sinks: Vec<Sink> = (0..8)
            .map(|i| Sink::with_capacitance(format!("s{}", i), point(i * 10, i * 5), 1.0 + f64::from(i) * 0.1))
            .collect();
        let dme = DmeAlgorithm::new(sinks, LinearDelay::default()).unwrap();
        let tree = dme.build();
        let analysis = dme.analyze_skew(&tree);

        assert_eq!(tree.len(), 15);
        assert_eq!(count_leaves(&tree), 8);
        assert!(analysis.skew <= 1.0);

        // Total wirelength equals the sum of every non-root wire.
        let sum: i32 = tree
            .nodes()
            .iter()
            .filter(|n| n.parent.is_some())
            .map(|n| n.wire_length)
            .sum();
        assert_eq!(analysis.total_wirelength, sum);
    }
}
