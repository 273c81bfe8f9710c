//! Dimensional analysis: dimensions, scales, units and quantities.

pub mod definitions;
pub mod dimension;
pub mod quantity;
pub mod scale;
pub mod unit;

pub use dimension::{BaseDimension, Dimension, Exponent};
pub use quantity::Quantity;
pub use scale::Scale;
pub use unit::Unit;
