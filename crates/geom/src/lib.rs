#![deny(bare_trait_objects)]

//! Integer rectilinear geometric primitives.
//!
//! This crate is reexported in [ortho](https://docs.rs/ortho/).
//!
//! # Overview
//!
//! This crate implements the value types that the rest of the ortho
//! crates are built on:
//!
//! - closed integer intervals,
//! - 2D vectors (on top of euclid),
//! - points whose coordinates may themselves be intervals or points,
//! - rectangles, axis-aligned segments and 3D points derived from them,
//! - Manhattan arcs (45°-rotated loci used by clock-tree merging).
//!
//! All coordinates are integers and all distances are L1 (Manhattan).
//! Containment and overlap are closed on boundaries.
//!
//! # Composition
//!
//! There is a single point type, [`Point`], parametrized independently
//! over each coordinate. Nesting does the work that a taxonomy of shape
//! classes would otherwise do:
//!
//! ```
//! use ortho_geom::{point, Interval, Point};
//!
//! // A plain point.
//! let p: Point<i32> = point(3, 4);
//! // A rectangle is a point of intervals.
//! let r = Point::new(Interval::new(0, 10), Interval::new(0, 5));
//! // A 3D point is a point whose x coordinate is a point.
//! let q = Point::new(point(3, 4), 7);
//!
//! use ortho_geom::ops::Contains;
//! assert!(r.contains(&p));
//! assert_eq!(q.y, 7);
//! ```
//!
//! Every binary operation (overlap, containment, intersection, hull,
//! minimum distance, ...) is defined per coordinate by the traits in
//! [`ops`] and promoted pointwise, so the same generic code answers
//! "do these rectangles overlap?" and "do these integers overlap?".

// Reexport dependencies.
pub use euclid;
pub use num_traits;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod ops;
mod interval;
mod point;
mod rect;
mod arc;

#[doc(inline)]
pub use crate::interval::{interval, Interval};
#[doc(inline)]
pub use crate::point::{point, vector2, Point, Vector2};
#[doc(inline)]
pub use crate::rect::{point3, rect, Box3, HSegment, Point3, Rect, VSegment};
#[doc(inline)]
pub use crate::arc::{ManhattanArc, MergingSegment};
pub use crate::ops::*;

mod scalar {
    use core::fmt::{Debug, Display};
    use core::ops::{AddAssign, SubAssign};

    pub(crate) use num_traits::{PrimInt, Signed};

    /// An integer coordinate scalar.
    ///
    /// All of the geometry in this crate is grid-aligned, so the scalar
    /// abstraction is over signed machine integers rather than floats.
    pub trait Coord:
        PrimInt
        + Signed
        + AddAssign
        + SubAssign
        + Display
        + Debug
        + Default
        + 'static
    {
        /// Shorthand for `1 + 1`, used by midpoint computations.
        #[inline]
        fn two() -> Self {
            Self::one() + Self::one()
        }
    }

    impl Coord for i32 {}
    impl Coord for i64 {}
    impl Coord for isize {}
}

pub use scalar::Coord;
