use crate::point::RoutePoint;
use crate::tree::RoutingTree;
use ortho_geom::Measure;

/// Routes one net: a fixed source and a set of terminals, optionally
/// dodging keep-out regions.
///
/// Terminals are inserted in order of increasing distance from the
/// source; among equidistant terminals the one with the larger
/// enclosing-region measure goes first, so wider detours are resolved
/// before they are hemmed in by other wires.
pub struct GlobalRouter<P: RoutePoint> {
    source: P,
    terminals: Vec<P>,
    tree: RoutingTree<P>,
    /// Distance from the source to the farthest terminal; the budget
    /// base for [`route_with_constraints`](Self::route_with_constraints).
    worst_wirelength: i32,
    keepouts: Option<Vec<P::Keepout>>,
}

impl<P: RoutePoint> GlobalRouter<P> {
    pub fn new(source: P, mut terminals: Vec<P>, keepouts: Option<Vec<P::Keepout>>) -> Self {
        terminals.sort_by(|a, b| {
            let dist_a = source.dist(a);
            let dist_b = source.dist(b);
            dist_a.cmp(&dist_b).then_with(|| {
                let area_a = source.hull_to(a).measure();
                let area_b = source.hull_to(b).measure();
                area_b.cmp(&area_a)
            })
        });
        let worst_wirelength = terminals.last().map_or(0, |t| source.dist(t));
        let tree = RoutingTree::new(source.clone());
        GlobalRouter {
            source,
            terminals,
            tree,
            worst_wirelength,
            keepouts,
        }
    }

    /// Distance from the source to the farthest terminal.
    pub fn worst_wirelength(&self) -> i32 {
        self.worst_wirelength
    }

    /// Connect every terminal directly to its nearest existing node; no
    /// Steiner points are created.
    pub fn route_simple(&mut self) {
        for terminal in &self.terminals {
            // A terminal insertion under an existing parent can't fail.
            let _ = self.tree.insert_terminal_node(terminal.clone(), None);
        }
    }

    /// Connect every terminal to the closest point of the existing
    /// tree, splitting wires with Steiner nodes where profitable.
    pub fn route_with_steiners(&mut self) {
        for terminal in &self.terminals {
            self.tree
                .insert_terminal_with_steiner(terminal.clone(), self.keepouts.as_deref());
        }
    }

    /// Like [`route_with_steiners`](Self::route_with_steiners), but
    /// every source-to-terminal path is kept within
    /// `alpha · worst_wirelength`.
    pub fn route_with_constraints(&mut self, alpha: f64) {
        let allowed = (f64::from(self.worst_wirelength) * alpha).round() as i32;
        route_log!("routing: wirelength budget {}", allowed);
        for terminal in &self.terminals {
            self.tree.insert_terminal_with_constraints(
                terminal.clone(),
                allowed,
                self.keepouts.as_deref(),
            );
        }
    }

    /// The routing tree built so far.
    pub fn tree(&self) -> &RoutingTree<P> {
        &self.tree
    }

    /// Mutable access, for post-passes such as
    /// [`optimize_steiner_points`](RoutingTree::optimize_steiner_points).
    pub fn tree_mut(&mut self) -> &mut RoutingTree<P> {
        &mut self.tree
    }

    /// The terminals in insertion order.
    pub fn terminals(&self) -> &[P] {
        &self.terminals
    }

    /// The source position.
    pub fn source(&self) -> &P {
        &self.source
    }
}
