use ortho_geom::Point;

/// A clock sink: a terminal that must receive the clock signal.
#[derive(Clone, Debug, PartialEq)]
pub struct Sink {
    pub name: String,
    pub position: Point<i32, i32>,
    /// Load capacitance presented by the sink.
    pub capacitance: f64,
}

impl Sink {
    /// A sink with the default load capacitance of 1.0.
    pub fn new(name: impl Into<String>, position: Point<i32, i32>) -> Self {
        Sink { name: name.into(), position, capacitance: 1.0 }
    }

    pub fn with_capacitance(
        name: impl Into<String>,
        position: Point<i32, i32>,
        capacitance: f64,
    ) -> Self {
        Sink { name: name.into(), position, capacitance }
    }
}

/// Handle to a node of a [`ClockTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
}

/// One node of the clock tree: a sink leaf or an internal merge point.
///
/// Nodes live in the tree's arena; `left`, `right` and `parent` are
/// handles into it, the parent handle being a non-owning back
/// reference.
#[derive(Clone, Debug)]
pub struct TreeNode {
    pub name: String,
    pub position: Point<i32, i32>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
    /// Length of the wire connecting this node to its parent.
    pub wire_length: i32,
    /// Accumulated delay from the clock source.
    pub delay: f64,
    /// Total downstream capacitance seen from this node.
    pub capacitance: f64,
    /// Set when skew balancing had to clamp the tapping point and this
    /// branch's wire needs detour elongation to realize the target.
    pub need_elongation: bool,
}

impl TreeNode {
    pub(crate) fn new(name: String, position: Point<i32, i32>) -> Self {
        TreeNode {
            name,
            position,
            left: None,
            right: None,
            parent: None,
            wire_length: 0,
            delay: 0.0,
            capacitance: 0.0,
            need_elongation: false,
        }
    }

    /// A node without children is a sink.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// An embedded clock tree. Owns all of its nodes.
#[derive(Clone, Debug)]
pub struct ClockTree {
    nodes: Vec<TreeNode>,
    root: NodeId,
}

impl ClockTree {
    pub(crate) fn new(nodes: Vec<TreeNode>, root: NodeId) -> Self {
        ClockTree { nodes, root }
    }

    #[inline]
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn root(&self) -> &TreeNode {
        &self.nodes[self.root.to_usize()]
    }

    /// Number of nodes (sinks plus internal merge points).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in arena order.
    #[inline]
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }
}

impl core::ops::Index<NodeId> for ClockTree {
    type Output = TreeNode;
    #[inline]
    fn index(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.to_usize()]
    }
}
