#![deny(bare_trait_objects)]

//! Polygon machinery for rectilinear layouts.
//!
//! This crate is reexported in [ortho](https://docs.rs/ortho/).
//!
//! Two polygon representations live here:
//!
//! - [`Polygon`]: a general polygon, one stored vertex per corner.
//! - Rectilinear polygons in the *half-vertex* form used throughout the
//!   physical-design algorithms: the vertex stream stores one point per
//!   corner pair, and the axis-aligned corner between two consecutive
//!   stored points `(x0, y0)`, `(x1, y1)` is implied at `(x1, y0)`.
//!   A stream of `n` stored points therefore describes a rectilinear
//!   polygon with `2n` geometric vertices.
//!
//! On top of the representations: monotone-chain construction from
//! arbitrary point sets, point-in-polygon tests, orientation and
//! monotonicity predicates, monotone/convex hull extraction
//! ([`hull`]), and recursive decomposition into convex, orthogonally
//! convex or rectangular pieces ([`cut`]). The hull and cut passes
//! share the index-based circular list in [`ring`], which keeps vertex
//! handles stable while cuts append new vertices.

pub use ortho_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod cut;
pub mod hull;
pub mod ring;

mod polygon;
mod rpolygon;
mod util;

#[doc(inline)]
pub use crate::polygon::{
    create_mono_polygon, create_xmono_polygon, create_ymono_polygon, point_in_polygon,
    polygon_is_clockwise, Polygon,
};
#[doc(inline)]
pub use crate::rpolygon::{
    create_mono_rpolygon, create_test_rpolygon, create_xmono_rpolygon, create_ymono_rpolygon,
    point_in_rpolygon, rpolygon_is_anticlockwise, rpolygon_is_clockwise, rpolygon_is_convex,
    rpolygon_is_monotone, rpolygon_is_xmonotone, rpolygon_is_ymonotone, RPolygon,
};
#[doc(inline)]
pub use crate::ring::Ring;
