#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Fundamental physical constants as dimensioned quantities.
pub mod constants;
/// Dimensions, scales, units and dimension-checked quantities.
pub mod units;
/// Numeric payloads (scalars and dense arrays).
pub mod math;
/// Computation graph nodes and reverse-mode differentiation.
pub mod autodiff;
/// Free functions over nodes, quantities and plain numbers.
pub mod functions;
/// Error types shared across modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;

pub use autodiff::{differentiate, variable, Differentiator, Gradients, Node, NodeId, Operation};
pub use errors::{Error, Result};
pub use math::{Scalar, Value};
pub use units::{Dimension, Quantity, Scale, Unit};
