//! Rectilinear (Manhattan) physical-design geometry.
//!
//! Everything is integer and grid-aligned; every distance is L1. The
//! crates re-exported here split the library the way the problems
//! split:
//!
//! - [`geom`]: intervals, recursive points, rectangles, segments and
//!   Manhattan arcs; the primitive algebra everything else consumes.
//! - [`poly`]: rectilinear polygons, monotone-chain construction,
//!   hulls and convex/rectangular decomposition.
//! - [`cts`]: zero-skew clock-tree synthesis by deferred-merge
//!   embedding.
//! - [`route`]: incremental Steiner-tree global routing with budgets
//!   and keep-outs.
//!
//! ```
//! use ortho::geom::{interval, point};
//! use ortho::geom::ops::Contains;
//!
//! let chip = point(interval(0, 8000), interval(0, 6000));
//! assert!(chip.contains(&point(7000, 5000)));
//! ```

pub use ortho_geom as geom;
pub use ortho_poly as poly;
pub use ortho_cts as cts;
pub use ortho_route as route;

#[cfg(feature = "extra")]
pub use ortho_extra as extra;

#[doc(inline)]
pub use crate::geom::{point, vector2, Interval, ManhattanArc, Point, Rect, Vector2};
#[doc(inline)]
pub use crate::cts::{DmeAlgorithm, Sink};
#[doc(inline)]
pub use crate::route::GlobalRouter;
