use crate::point::RoutePoint;
use ortho_geom::{Blocks, Contains, MinDist, NearestTo};

use std::collections::HashMap;
use std::fmt;

/// Role of a node in the routing tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The root of the net.
    Source,
    /// An auxiliary branch point inserted to shorten wires.
    Steiner,
    /// A pin that must be connected.
    Terminal,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Source => write!(f, "Source"),
            NodeKind::Steiner => write!(f, "Steiner"),
            NodeKind::Terminal => write!(f, "Terminal"),
        }
    }
}

/// Handle to a node of a [`RoutingTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
}

/// One node of the routing tree.
///
/// Nodes are owned by the tree's arena; `children` and `parent` are
/// handles into it, the parent handle being non-owning.
#[derive(Clone, Debug, PartialEq)]
pub struct RoutingNode<P> {
    pub name: String,
    pub kind: NodeKind,
    pub position: P,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    /// Wire length from the source along the tree, recorded at
    /// insertion time.
    pub path_length: i32,
}

impl<P> RoutingNode<P> {
    fn new(name: String, kind: NodeKind, position: P) -> Self {
        RoutingNode {
            name,
            kind,
            position,
            children: Vec::new(),
            parent: None,
            path_length: 0,
        }
    }
}

/// Errors reported by the routing-tree operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteError {
    /// A node name did not resolve.
    NodeNotFound(String),
    /// A parent name did not resolve.
    ParentNotFound(String),
    /// Branch insertion asked for an edge that is not parent-to-child.
    NotAChild { parent: String, child: String },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::NodeNotFound(name) => write!(f, "node {} not found", name),
            RouteError::ParentNotFound(name) => write!(f, "parent node {} not found", name),
            RouteError::NotAChild { parent, child } => {
                write!(f, "{} is not a direct child of {}", child, parent)
            }
        }
    }
}

impl std::error::Error for RouteError {}

/// Candidate insertion site produced by the edge search: the edge
/// `parent -> child` to split, or an existing node when `parent` is
/// `None`.
struct Candidate {
    parent: Option<NodeId>,
    nearest: NodeId,
    min_distance: i32,
}

/// A Steiner routing tree over a fixed source.
///
/// The tree owns every node; nodes stay addressable by name. All
/// mutation goes through the owning tree handle, so a failed insertion
/// never leaves a partially linked node behind.
pub struct RoutingTree<P: RoutePoint> {
    nodes: Vec<RoutingNode<P>>,
    index: HashMap<String, NodeId>,
    next_steiner: u32,
    next_terminal: u32,
}

impl<P: RoutePoint> RoutingTree<P> {
    /// A tree containing only the source node, named `source`.
    pub fn new(source_position: P) -> Self {
        let source = RoutingNode::new("source".to_string(), NodeKind::Source, source_position);
        let mut index = HashMap::new();
        index.insert("source".to_string(), NodeId(0));
        RoutingTree {
            nodes: vec![source],
            index,
            next_steiner: 1,
            next_terminal: 1,
        }
    }

    #[inline]
    pub fn source_id(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn source(&self) -> &RoutingNode<P> {
        &self.nodes[0]
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Resolve a node name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &RoutingNode<P> {
        &self.nodes[id.to_usize()]
    }

    /// Iterate over the live nodes in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &RoutingNode<P>> + '_ {
        self.index.values().map(move |id| &self.nodes[id.to_usize()])
    }

    /// All terminal nodes, in unspecified order.
    pub fn terminals(&self) -> Vec<&RoutingNode<P>> {
        self.iter().filter(|n| n.kind == NodeKind::Terminal).collect()
    }

    /// All Steiner nodes, in unspecified order.
    pub fn steiner_nodes(&self) -> Vec<&RoutingNode<P>> {
        self.iter().filter(|n| n.kind == NodeKind::Steiner).collect()
    }

    fn fresh_name(&mut self, kind: NodeKind) -> String {
        match kind {
            NodeKind::Steiner => {
                let id = self.next_steiner;
                self.next_steiner += 1;
                format!("steiner_{}", id)
            }
            NodeKind::Terminal => {
                let id = self.next_terminal;
                self.next_terminal += 1;
                format!("terminal_{}", id)
            }
            NodeKind::Source => "source".to_string(),
        }
    }

    fn push_node(&mut self, name: String, kind: NodeKind, position: P) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(RoutingNode::new(name.clone(), kind, position));
        self.index.insert(name, id);
        id
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.to_usize()].parent = Some(parent);
        self.nodes[parent.to_usize()].children.push(child);
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let children = &mut self.nodes[parent.to_usize()].children;
        if let Some(pos) = children.iter().position(|&c| c == child) {
            children.remove(pos);
            self.nodes[child.to_usize()].parent = None;
        }
    }

    /// Insert a Steiner node under `parent` (the source when `None`).
    pub fn insert_steiner_node(
        &mut self,
        position: P,
        parent: Option<&str>,
    ) -> Result<String, RouteError> {
        let parent_id = match parent {
            None => self.source_id(),
            Some(name) => self
                .find(name)
                .ok_or_else(|| RouteError::ParentNotFound(name.to_string()))?,
        };
        let name = self.fresh_name(NodeKind::Steiner);
        let id = self.push_node(name.clone(), NodeKind::Steiner, position);
        self.add_child(parent_id, id);
        Ok(name)
    }

    /// Insert a terminal under `parent`, or under the nearest existing
    /// node when `parent` is `None`.
    pub fn insert_terminal_node(
        &mut self,
        position: P,
        parent: Option<&str>,
    ) -> Result<String, RouteError> {
        let parent_id = match parent {
            None => self.find_nearest_node(&position),
            Some(name) => self
                .find(name)
                .ok_or_else(|| RouteError::ParentNotFound(name.to_string()))?,
        };
        let name = self.fresh_name(NodeKind::Terminal);
        let id = self.push_node(name.clone(), NodeKind::Terminal, position);
        self.add_child(parent_id, id);
        Ok(name)
    }

    /// Splice a new node into the existing edge
    /// `branch_start -> branch_end`.
    pub fn insert_node_on_branch(
        &mut self,
        kind: NodeKind,
        position: P,
        branch_start: &str,
        branch_end: &str,
    ) -> Result<String, RouteError> {
        let start = self
            .find(branch_start)
            .ok_or_else(|| RouteError::NodeNotFound(branch_start.to_string()))?;
        let end = self
            .find(branch_end)
            .ok_or_else(|| RouteError::NodeNotFound(branch_end.to_string()))?;
        if !self.nodes[start.to_usize()].children.contains(&end) {
            return Err(RouteError::NotAChild {
                parent: branch_start.to_string(),
                child: branch_end.to_string(),
            });
        }

        debug_assert!(kind != NodeKind::Source);
        let name = self.fresh_name(kind);
        let id = self.push_node(name.clone(), kind, position);
        self.remove_child(start, end);
        self.add_child(start, id);
        self.add_child(id, end);
        Ok(name)
    }

    /// Terminal insertion with Steiner splitting and optional keep-outs.
    pub fn insert_terminal_with_steiner(&mut self, position: P, keepouts: Option<&[P::Keepout]>) {
        self.insert_terminal_impl(position, None, keepouts);
    }

    /// Terminal insertion with Steiner splitting, a wire-length budget
    /// and optional keep-outs.
    ///
    /// Candidates whose source path would exceed `allowed_wirelength`
    /// or whose connection would cross a keep-out are skipped. When
    /// every edge candidate is rejected the terminal still joins the
    /// tree at the default candidate, which degenerates to the source;
    /// callers that must treat this as a failure can inspect the
    /// terminal's wire afterwards.
    pub fn insert_terminal_with_constraints(
        &mut self,
        position: P,
        allowed_wirelength: i32,
        keepouts: Option<&[P::Keepout]>,
    ) {
        self.insert_terminal_impl(position, Some(allowed_wirelength), keepouts);
    }

    fn insert_terminal_impl(
        &mut self,
        position: P,
        allowed_wirelength: Option<i32>,
        keepouts: Option<&[P::Keepout]>,
    ) {
        let candidate =
            self.find_nearest_insertion(&position, allowed_wirelength, keepouts);

        let name = self.fresh_name(NodeKind::Terminal);
        let terminal = self.push_node(name, NodeKind::Terminal, position.clone());

        match candidate.parent {
            None => {
                let nearest = candidate.nearest;
                self.add_child(nearest, terminal);
                self.nodes[terminal.to_usize()].path_length = self.nodes[nearest.to_usize()]
                    .path_length
                    + self.nodes[nearest.to_usize()].position.dist(&position);
            }
            Some(parent) => {
                let nearest = candidate.nearest;
                let split_point = self.nodes[parent.to_usize()]
                    .position
                    .hull_to(&self.nodes[nearest.to_usize()].position)
                    .nearest_to(&position);

                let steiner_name = self.fresh_name(NodeKind::Steiner);
                route_log!(
                    "routing: splitting {} -> {} with {}",
                    self.nodes[parent.to_usize()].name,
                    self.nodes[nearest.to_usize()].name,
                    steiner_name
                );
                let steiner = self.push_node(steiner_name, NodeKind::Steiner, split_point.clone());

                self.remove_child(parent, nearest);
                self.add_child(parent, steiner);
                self.nodes[steiner.to_usize()].path_length = self.nodes[parent.to_usize()]
                    .path_length
                    + self.nodes[parent.to_usize()].position.dist(&split_point);
                self.add_child(steiner, nearest);
                self.add_child(steiner, terminal);
                self.nodes[terminal.to_usize()].path_length =
                    self.nodes[steiner.to_usize()].path_length + split_point.dist(&position);
            }
        }
    }

    /// Nearest live node to `position`.
    fn find_nearest_node(&self, position: &P) -> NodeId {
        let mut nearest = self.source_id();
        let mut min_dist = self.source().position.dist(position);
        for (&id, node) in self.index.values().map(|id| (id, &self.nodes[id.to_usize()])) {
            let d = node.position.dist(position);
            if d < min_dist {
                min_dist = d;
                nearest = id;
            }
        }
        nearest
    }

    /// Search every tree edge for the insertion site closest to
    /// `position`, honouring the budget and keep-outs. Edges whose
    /// subtree is over budget are pruned entirely.
    fn find_nearest_insertion(
        &self,
        position: &P,
        allowed_wirelength: Option<i32>,
        keepouts: Option<&[P::Keepout]>,
    ) -> Candidate {
        let mut candidate = Candidate {
            parent: None,
            nearest: self.source_id(),
            min_distance: self.source().position.dist(position),
        };
        self.search_edges(
            self.source_id(),
            position,
            allowed_wirelength,
            keepouts,
            &mut candidate,
        );
        candidate
    }

    fn search_edges(
        &self,
        node_id: NodeId,
        position: &P,
        allowed_wirelength: Option<i32>,
        keepouts: Option<&[P::Keepout]>,
        candidate: &mut Candidate,
    ) {
        let node = &self.nodes[node_id.to_usize()];
        for &child_id in &node.children {
            let child = &self.nodes[child_id.to_usize()];
            let wire_region = node.position.hull_to(&child.position);
            let distance = wire_region.min_dist_with(position);
            let nearest_pt = wire_region.nearest_to(position);

            if let Some(allowed) = allowed_wirelength {
                let path_length =
                    node.path_length + node.position.dist(&nearest_pt) + distance;
                if path_length > allowed {
                    continue;
                }
            }

            if distance < candidate.min_distance {
                let mut blocked = false;
                if let Some(keepouts) = keepouts {
                    let tail = nearest_pt.hull_to(position);
                    let upper = nearest_pt.hull_to(&node.position);
                    let lower = nearest_pt.hull_to(&child.position);
                    for keepout in keepouts {
                        if keepout.contains(&nearest_pt)
                            || keepout.blocks(&tail)
                            || keepout.blocks(&upper)
                            || keepout.blocks(&lower)
                        {
                            blocked = true;
                        }
                    }
                }
                if !blocked {
                    candidate.min_distance = distance;
                    if nearest_pt == node.position {
                        candidate.nearest = node_id;
                        candidate.parent = None;
                    } else if nearest_pt == child.position {
                        candidate.nearest = child_id;
                        candidate.parent = None;
                    } else {
                        candidate.parent = Some(node_id);
                        candidate.nearest = child_id;
                    }
                }
            }
            self.search_edges(child_id, position, allowed_wirelength, keepouts, candidate);
        }
    }

    /// Total geometric wire length of the tree.
    pub fn wirelength(&self) -> i32 {
        self.edge_lengths(self.source_id())
    }

    fn edge_lengths(&self, node_id: NodeId) -> i32 {
        let node = &self.nodes[node_id.to_usize()];
        let mut total = 0;
        for &child in &node.children {
            total += node.position.dist(&self.nodes[child.to_usize()].position);
            total += self.edge_lengths(child);
        }
        total
    }

    /// The chain of nodes from the source down to `name`.
    pub fn find_path_to_source(&self, name: &str) -> Result<Vec<&RoutingNode<P>>, RouteError> {
        let mut current = self
            .find(name)
            .ok_or_else(|| RouteError::NodeNotFound(name.to_string()))?;
        let mut path = vec![&self.nodes[current.to_usize()]];
        while let Some(parent) = self.nodes[current.to_usize()].parent {
            path.push(&self.nodes[parent.to_usize()]);
            current = parent;
        }
        path.reverse();
        Ok(path)
    }

    /// Remove every Steiner node with exactly one child, reparenting
    /// the child; repeated application is unnecessary because chains
    /// collapse in one pass.
    pub fn optimize_steiner_points(&mut self) {
        let redundant: Vec<NodeId> = self
            .index
            .values()
            .copied()
            .filter(|id| {
                let node = &self.nodes[id.to_usize()];
                node.kind == NodeKind::Steiner
                    && node.children.len() == 1
                    && node.parent.is_some()
            })
            .collect();

        for id in redundant {
            let node = &self.nodes[id.to_usize()];
            let parent = node.parent.expect("redundant steiner has a parent");
            let child = node.children[0];

            self.remove_child(parent, id);
            self.add_child(parent, child);

            let name = self.nodes[id.to_usize()].name.clone();
            self.index.remove(&name);
            self.nodes[id.to_usize()].children.clear();
            route_log!("routing: collapsed {}", name);
        }
    }
}

impl<P: RoutePoint + fmt::Display> RoutingTree<P> {
    /// Indented dump of the tree topology, for debugging.
    pub fn structure(&self) -> String {
        let mut out = String::new();
        self.write_structure(self.source_id(), 0, &mut out);
        out
    }

    fn write_structure(&self, node_id: NodeId, level: usize, out: &mut String) {
        let node = &self.nodes[node_id.to_usize()];
        out.push_str(&" ".repeat(level * 2));
        out.push_str(&format!(
            "{}Node({}, ({}))\n",
            node.kind, node.name, node.position
        ));
        for &child in &node.children {
            self.write_structure(child, level + 1, out);
        }
    }
}

impl<P: RoutePoint> core::ops::Index<NodeId> for RoutingTree<P> {
    type Output = RoutingNode<P>;
    #[inline]
    fn index(&self, id: NodeId) -> &RoutingNode<P> {
        &self.nodes[id.to_usize()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ortho_geom::{point, point3, Point, Point3};

    #[test]
    fn add_and_remove_children() {
        let mut tree: RoutingTree<Point<i32, i32>> = RoutingTree::new(point(0, 0));
        let s1 = tree.insert_steiner_node(point(1, 1), None).unwrap();
        let s2 = tree.insert_steiner_node(point(2, 2), None).unwrap();
        let s1_id = tree.find(&s1).unwrap();
        let s2_id = tree.find(&s2).unwrap();

        assert_eq!(tree.source().children.len(), 2);
        assert_eq!(tree[s1_id].parent, Some(tree.source_id()));

        tree.remove_child(tree.source_id(), s1_id);
        assert_eq!(tree.source().children, vec![s2_id]);
        assert_eq!(tree[s1_id].parent, None);

        // Removing a node that is not a child is a no-op.
        tree.remove_child(s2_id, s1_id);
        assert_eq!(tree[s2_id].children.len(), 0);
    }

    #[test]
    fn invalid_parents_are_errors() {
        let mut tree: RoutingTree<Point<i32, i32>> = RoutingTree::new(point(0, 0));
        assert_eq!(
            tree.insert_steiner_node(point(0, 0), Some("nope")),
            Err(RouteError::ParentNotFound("nope".to_string()))
        );
        assert_eq!(
            tree.insert_terminal_node(point(0, 0), Some("nope")),
            Err(RouteError::ParentNotFound("nope".to_string()))
        );
        // A failed insertion allocates nothing.
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn insert_on_branch() {
        let mut tree: RoutingTree<Point<i32, i32>> = RoutingTree::new(point(0, 0));
        let s1 = tree.insert_steiner_node(point(2, 0), None).unwrap();
        let s2 = tree.insert_steiner_node(point(6, 0), Some(&s1)).unwrap();
        let s1_id = tree.find(&s1).unwrap();

        assert_eq!(tree[s1_id].children.len(), 1);

        let mid = tree
            .insert_node_on_branch(NodeKind::Steiner, point(4, 0), &s1, &s2)
            .unwrap();
        let mid_id = tree.find(&mid).unwrap();
        let s2_id = tree.find(&s2).unwrap();

        assert_eq!(tree[s1_id].children, vec![mid_id]);
        assert_eq!(tree[mid_id].children, vec![s2_id]);
        assert_eq!(tree[s2_id].parent, Some(mid_id));
    }

    #[test]
    fn insert_on_branch_errors() {
        let mut tree: RoutingTree<Point<i32, i32>> = RoutingTree::new(point(0, 0));
        let s1 = tree.insert_steiner_node(point(2, 0), None).unwrap();
        let s2 = tree.insert_steiner_node(point(6, 0), Some(&s1)).unwrap();
        let s3 = tree.insert_steiner_node(point(9, 0), None).unwrap();

        assert_eq!(
            tree.insert_node_on_branch(NodeKind::Steiner, point(4, 0), "missing", &s2),
            Err(RouteError::NodeNotFound("missing".to_string()))
        );
        assert_eq!(
            tree.insert_node_on_branch(NodeKind::Steiner, point(4, 0), &s1, "missing"),
            Err(RouteError::NodeNotFound("missing".to_string()))
        );
        // s3 hangs off the source, not off s1.
        assert_eq!(
            tree.insert_node_on_branch(NodeKind::Steiner, point(4, 0), &s1, &s3),
            Err(RouteError::NotAChild { parent: s1, child: s3 })
        );
    }

    #[test]
    fn path_to_source() {
        let mut tree: RoutingTree<Point<i32, i32>> = RoutingTree::new(point(0, 0));
        let s1 = tree.insert_steiner_node(point(1, 0), None).unwrap();
        let s2 = tree.insert_steiner_node(point(2, 0), Some(&s1)).unwrap();
        let t1 = tree.insert_terminal_node(point(3, 0), Some(&s2)).unwrap();

        let path = tree.find_path_to_source(&t1).unwrap();
        let names: Vec<&str> = path.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["source", s1.as_str(), s2.as_str(), t1.as_str()]);

        let path = tree.find_path_to_source("source").unwrap();
        assert_eq!(path.len(), 1);

        assert_eq!(
            tree.find_path_to_source("missing"),
            Err(RouteError::NodeNotFound("missing".to_string()))
        );
    }

    #[test]
    fn terminal_splits_a_wire() {
        let mut tree: RoutingTree<Point<i32, i32>> = RoutingTree::new(point(0, 0));
        tree.insert_terminal_node(point(10, 0), None).unwrap();
        // (5, 4) projects onto the wire from (0,0) to (10,0) at (5,0).
        tree.insert_terminal_with_steiner(point(5, 4), None);

        assert_eq!(tree.steiner_nodes().len(), 1);
        assert_eq!(tree.terminals().len(), 2);
        let steiner = tree.steiner_nodes()[0];
        assert_eq!(steiner.position, point(5, 0));
        assert_eq!(steiner.children.len(), 2);
        assert_eq!(tree.wirelength(), 10 + 4);
    }

    #[test]
    fn optimize_collapses_single_child_steiners() {
        let mut tree: RoutingTree<Point<i32, i32>> = RoutingTree::new(point(0, 0));
        let s1 = tree.insert_steiner_node(point(2, 0), None).unwrap();
        let s2 = tree.insert_steiner_node(point(5, 0), Some(&s1)).unwrap();
        let t1 = tree.insert_terminal_node(point(9, 0), Some(&s2)).unwrap();
        assert_eq!(tree.len(), 4);

        let before = tree.wirelength();
        tree.optimize_steiner_points();

        assert_eq!(tree.len(), 2);
        assert!(tree.find(&s1).is_none());
        assert!(tree.find(&s2).is_none());
        let path = tree.find_path_to_source(&t1).unwrap();
        assert_eq!(path.len(), 2);
        // Collinear chain: collapsing changes nothing geometrically.
        assert_eq!(tree.wirelength(), before);
    }

    #[test]
    fn optimize_preserves_terminals_and_reachability() {
        let mut tree: RoutingTree<Point<i32, i32>> = RoutingTree::new(point(0, 0));
        for pt in [point(10, 3), point(10, -3), point(20, 0)] {
            tree.insert_terminal_with_steiner(pt, None);
        }
        let terminals_before: Vec<String> =
            tree.terminals().iter().map(|t| t.name.clone()).collect();

        tree.optimize_steiner_points();

        let mut terminals_after: Vec<String> =
            tree.terminals().iter().map(|t| t.name.clone()).collect();
        for name in &terminals_before {
            assert!(terminals_after.contains(name));
            let path = tree.find_path_to_source(name).unwrap();
            assert_eq!(path[0].name, "source");
        }
        terminals_after.retain(|n| terminals_before.contains(n));
        assert_eq!(terminals_after.len(), terminals_before.len());
    }

    #[test]
    fn three_dimensional_nodes() {
        let mut tree: RoutingTree<Point3<i32>> = RoutingTree::new(point3(0, 0, 0));
        let t = tree.insert_terminal_node(point3(5, 5, 1), None).unwrap();
        let id = tree.find(&t).unwrap();
        assert_eq!(tree[id].kind, NodeKind::Terminal);
        assert_eq!(tree.wirelength(), 11);
    }

    #[test]
    fn structure_dump() {
        let mut tree: RoutingTree<Point<i32, i32>> = RoutingTree::new(point(0, 0));
        tree.insert_terminal_node(point(3, 4), None).unwrap();
        let dump = tree.structure();
        assert!(dump.starts_with("SourceNode(source, ((0, 0)))"));
        assert!(dump.contains("  TerminalNode(terminal_1, ((3, 4)))"));
    }
}
