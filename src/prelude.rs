//! Convenience re-exports for building dimensioned expressions.

pub use crate::autodiff::{
    differentiate, topological_order, variable, Differentiator, Gradients, Node, NodeId,
    Operation,
};
pub use crate::constants::*;
pub use crate::errors::Error;
pub use crate::functions::{sum_nodes, Operand};
pub use crate::math::{Array, Scalar, Value};
pub use crate::units::definitions::*;
pub use crate::units::dimension::{
    ACCELERATION, ANGLE, AREA, DIMENSIONLESS, ENERGY, FORCE, FREQUENCY, LENGTH, MASS, POWER,
    PRESSURE, TIME, VELOCITY, VOLUME,
};
pub use crate::units::{BaseDimension, Dimension, Exponent, Quantity, Scale, Unit};
