//! Shared error types used across submodules.

use thiserror::Error;

use crate::units::Dimension;

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Raised when two operands must share a dimension but do not.
    #[error("dimension mismatch in {op}: `{lhs}` vs `{rhs}`")]
    DimensionMismatch {
        /// Operation that rejected the operands.
        op: &'static str,
        /// Dimension of the left operand.
        lhs: Dimension,
        /// Dimension of the right operand.
        rhs: Dimension,
    },
    /// Raised when an operand is of a kind the operation does not accept.
    #[error("unsupported operand for {op}: {operand}")]
    UnsupportedOperand {
        /// Operation that rejected the operand.
        op: &'static str,
        /// Kind of the offending operand.
        operand: &'static str,
    },
    /// Raised when a function receives an input outside its domain, either by
    /// value (`asin(2)`) or by dimension (`sin(1 m)`).
    #[error("domain error in {function}: {reason}")]
    Domain {
        /// Function that rejected the input.
        function: &'static str,
        /// Human-readable reason.
        reason: String,
    },
    /// Raised by operations that have no backward rule.
    #[error("operation `{op}` is not differentiable")]
    NotDifferentiable {
        /// Operation tag.
        op: &'static str,
    },
    /// Raised when two arrays are combined element-wise with different shapes.
    #[error("shape mismatch in {op}: {lhs:?} vs {rhs:?}")]
    ShapeMismatch {
        /// Operation that rejected the operands.
        op: &'static str,
        /// Shape (rows, columns) of the left operand.
        lhs: (usize, usize),
        /// Shape (rows, columns) of the right operand.
        rhs: (usize, usize),
    },
    /// Raised when a dimension is raised to a power that is not a small rational,
    /// or when an exponent overflows.
    #[error("exponent {0} cannot be applied to a dimension")]
    InvalidExponent(f64),
    /// Raised when a scale factor is not positive and finite.
    #[error("invalid scale factor {0}")]
    InvalidScale(f64),
}

impl Error {
    pub(crate) fn domain(function: &'static str, reason: impl Into<String>) -> Self {
        Self::Domain {
            function,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::dimension::{LENGTH, TIME};

    #[test]
    fn mismatch_message_names_both_dimensions() {
        let err = Error::DimensionMismatch {
            op: "add",
            lhs: LENGTH,
            rhs: TIME,
        };
        assert_eq!(err.to_string(), "dimension mismatch in add: `m` vs `s`");
    }
}
