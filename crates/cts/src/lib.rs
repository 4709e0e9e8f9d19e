#![deny(bare_trait_objects)]

//! Zero-skew clock-tree synthesis.
//!
//! This crate is reexported in [ortho](https://docs.rs/ortho/).
//!
//! The construction is the classical Deferred Merge Embedding (DME)
//! algorithm: a balanced merging topology over the sinks, a bottom-up
//! pass computing each node's *merging segment* (the Manhattan arc of
//! positions giving zero skew to its subtree), a top-down pass pinning
//! every node to a point of its segment, and a final delay propagation.
//!
//! ```
//! use ortho_cts::{DmeAlgorithm, LinearDelay, Sink};
//! use ortho_geom::point;
//!
//! let sinks = vec![
//!     Sink::new("s1", point(10, 20)),
//!     Sink::new("s2", point(30, 40)),
//!     Sink::new("s3", point(50, 10)),
//! ];
//! let dme = DmeAlgorithm::new(sinks, LinearDelay::new(0.5, 0.2)).unwrap();
//! let tree = dme.build();
//! let analysis = dme.analyze_skew(&tree);
//! assert!(analysis.skew.abs() < 1e-9);
//! ```
//!
//! Delay estimation is pluggable through [`DelayModel`]; the crate
//! ships the linear model and the Elmore RC model.

pub use ortho_geom as geom;

// Verbose tracing for the synthesis passes, enabled by setting the
// ORTHO_CTS_LOG environment variable.
macro_rules! dme_log {
    ($($arg:tt)*) => {
        if std::env::var_os("ORTHO_CTS_LOG").is_some() {
            eprintln!($($arg)*);
        }
    };
}

mod analysis;
mod delay;
mod dme;
mod tree;

pub mod svg;

#[doc(inline)]
pub use crate::analysis::{
    analyze_skew, tree_statistics, NodeInfo, NodeRole, SkewAnalysis, TreeStatistics, WireInfo,
};
#[doc(inline)]
pub use crate::delay::{DelayModel, ElmoreDelay, LinearDelay, Tapping};
#[doc(inline)]
pub use crate::dme::{CtsError, DmeAlgorithm};
#[doc(inline)]
pub use crate::tree::{ClockTree, NodeId, Sink, TreeNode};
