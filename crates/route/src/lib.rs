#![deny(bare_trait_objects)]

//! Incremental global routing over the rectilinear grid.
//!
//! This crate is reexported in [ortho](https://docs.rs/ortho/).
//!
//! A [`RoutingTree`] grows from a fixed source by inserting terminals
//! one at a time: each insertion searches the existing tree for the
//! closest point on any wire, optionally splitting that wire with a
//! Steiner node. Insertion can be constrained by a wire-length budget
//! and by keep-out regions that paths must not cross.
//!
//! [`GlobalRouter`] drives the whole net: it orders the terminals by
//! distance from the source and exposes the three routing modes
//! (nearest-node only, Steiner insertion, Steiner insertion under a
//! budget).
//!
//! ```
//! use ortho_route::GlobalRouter;
//! use ortho_geom::point;
//!
//! let terminals = vec![point(10, 0), point(0, 10), point(10, 10)];
//! let mut router = GlobalRouter::new(point(0, 0), terminals, None);
//! router.route_with_steiners();
//! assert_eq!(router.tree().terminals().len(), 3);
//! ```
//!
//! The point type is generic: anything satisfying [`RoutePoint`]
//! routes, which covers plain 2D points and layered 3D points with
//! their box-shaped keep-outs.

pub use ortho_geom as geom;

// Verbose tracing for the routing passes, enabled by setting the
// ORTHO_ROUTE_LOG environment variable.
macro_rules! route_log {
    ($($arg:tt)*) => {
        if std::env::var_os("ORTHO_ROUTE_LOG").is_some() {
            eprintln!($($arg)*);
        }
    };
}

mod point;
mod router;
mod tree;

pub mod svg;

#[doc(inline)]
pub use crate::point::RoutePoint;
#[doc(inline)]
pub use crate::router::GlobalRouter;
#[doc(inline)]
pub use crate::tree::{NodeId, NodeKind, RouteError, RoutingNode, RoutingTree};
