#![deny(bare_trait_objects)]

//! Various optional utilities for the ortho crates.
//!
//! Currently the integer low-discrepancy generators that the test
//! suites use to produce deterministic, well-spread point sets.

pub use ortho_geom as geom;

mod ilds;

#[doc(inline)]
pub use crate::ilds::{vdc, Halton, VdCorput};
