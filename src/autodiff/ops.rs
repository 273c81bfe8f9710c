//! Graph-building methods and operator overloads for [`Node`].
//!
//! Operators return `Result<Node>` because the forward value is computed
//! eagerly and may fail on a dimension or domain check:
//!
//! ```
//! use dimdiff::prelude::*;
//!
//! # fn main() -> dimdiff::Result<()> {
//! let x = variable("x", Quantity::new(2.0, METRE));
//! let y = (&x * &x)? + 1.0;
//! assert!(y.is_err());
//! let area = (&x * &x)?;
//! assert_eq!(area.name(), "(x*x)");
//! # Ok(())
//! # }
//! ```

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::errors::Result;
use crate::math::Scalar;
use crate::units::Quantity;

use super::node::Node;
use super::operation::Operation;

impl Node {
    fn unary(&self, op: Operation) -> Result<Self> {
        Self::apply(op, vec![self.clone()], None)
    }

    fn binary(&self, op: Operation, rhs: &Self) -> Result<Self> {
        Self::apply(op, vec![self.clone(), rhs.clone()], None)
    }

    fn with_constant(&self, op: Operation, constant: impl Into<Quantity>) -> Result<Self> {
        Self::apply(op, vec![self.clone()], Some(constant.into()))
    }

    /// `self + rhs`, in `self`'s unit.
    pub fn try_add(&self, rhs: &Self) -> Result<Self> {
        self.binary(Operation::Add, rhs)
    }

    /// `self + c`.
    pub fn add_const(&self, c: impl Into<Quantity>) -> Result<Self> {
        self.with_constant(Operation::AddConst, c)
    }

    /// `c + self`, in the constant's unit.
    pub fn radd_const(&self, c: impl Into<Quantity>) -> Result<Self> {
        self.with_constant(Operation::RAddConst, c)
    }

    /// `self - rhs`.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self> {
        self.binary(Operation::Sub, rhs)
    }

    /// `self - c`.
    pub fn sub_const(&self, c: impl Into<Quantity>) -> Result<Self> {
        self.with_constant(Operation::SubConst, c)
    }

    /// `c - self`.
    pub fn rsub_const(&self, c: impl Into<Quantity>) -> Result<Self> {
        self.with_constant(Operation::RSubConst, c)
    }

    /// `self * rhs`.
    pub fn try_mul(&self, rhs: &Self) -> Result<Self> {
        self.binary(Operation::Mul, rhs)
    }

    /// `self * c`.
    pub fn mul_const(&self, c: impl Into<Quantity>) -> Result<Self> {
        self.with_constant(Operation::MulConst, c)
    }

    /// `self / rhs`.
    pub fn try_div(&self, rhs: &Self) -> Result<Self> {
        self.binary(Operation::Div, rhs)
    }

    /// `self / c`.
    pub fn div_const(&self, c: impl Into<Quantity>) -> Result<Self> {
        self.with_constant(Operation::DivConst, c)
    }

    /// `c / self`.
    pub fn rdiv_const(&self, c: impl Into<Quantity>) -> Result<Self> {
        self.with_constant(Operation::RDivConst, c)
    }

    /// `self ^ exponent` for a dimensionless exponent node.
    ///
    /// The gradient with respect to the exponent is `self^exponent * ln(self)`.
    /// It is NaN when the base is not positive or carries a dimension, while
    /// the gradient with respect to the base stays finite. Use
    /// [`Node::pow_const`] for fixed exponents.
    pub fn pow(&self, exponent: &Self) -> Result<Self> {
        self.binary(Operation::Pow, exponent)
    }

    /// `self ^ c` for a dimensionless constant exponent.
    pub fn pow_const(&self, c: impl Into<Quantity>) -> Result<Self> {
        self.with_constant(Operation::PowConst, c)
    }

    /// `self ^ p`.
    pub fn powf(&self, p: Scalar) -> Result<Self> {
        self.pow_const(p)
    }

    /// `self ^ n`.
    pub fn powi(&self, n: i32) -> Result<Self> {
        self.pow_const(Scalar::from(n))
    }

    /// `c ^ self` for a positive dimensionless constant base.
    pub fn rpow_const(&self, c: impl Into<Quantity>) -> Result<Self> {
        self.with_constant(Operation::RPowConst, c)
    }

    /// Square root.
    pub fn sqrt(&self) -> Result<Self> {
        self.pow_const(0.5)
    }

    /// Matrix product `self @ rhs`.
    pub fn matmul(&self, rhs: &Self) -> Result<Self> {
        self.binary(Operation::MatMul, rhs)
    }

    /// Matrix product `self @ c`.
    pub fn matmul_const(&self, c: impl Into<Quantity>) -> Result<Self> {
        self.with_constant(Operation::MatMulConst, c)
    }

    /// Matrix product `c @ self`.
    pub fn rmatmul_const(&self, c: impl Into<Quantity>) -> Result<Self> {
        self.with_constant(Operation::RMatMulConst, c)
    }
}

macro_rules! unary_methods {
    ($($(#[$doc:meta])* $method:ident => $op:ident;)*) => {
        impl Node {
            $(
                $(#[$doc])*
                pub fn $method(&self) -> Result<Self> {
                    self.unary(Operation::$op)
                }
            )*
        }
    };
}

unary_methods! {
    /// Negation.
    negate => Neg;
    /// Absolute value.
    abs => Abs;
    /// Reciprocal.
    recip => Recip;
    /// Exponential of a dimensionless node.
    exp => Exp;
    /// Natural logarithm of a positive dimensionless node.
    ln => Log;
    /// Sine of an angle.
    sin => Sin;
    /// Cosine of an angle.
    cos => Cos;
    /// Tangent of an angle.
    tan => Tan;
    /// Hyperbolic sine.
    sinh => Sinh;
    /// Hyperbolic cosine.
    cosh => Cosh;
    /// Hyperbolic tangent.
    tanh => Tanh;
    /// Arcsine, in radians.
    asin => Asin;
    /// Arccosine, in radians.
    acos => Acos;
    /// Arctangent, in radians.
    atan => Atan;
    /// Inverse hyperbolic sine.
    asinh => Asinh;
    /// Inverse hyperbolic cosine.
    acosh => Acosh;
    /// Inverse hyperbolic tangent.
    atanh => Atanh;
    /// Floor.
    floor => Floor;
    /// Ceiling.
    ceil => Ceil;
    /// Nearest integer.
    round => Round;
    /// Integer part.
    trunc => Trunc;
    /// Zeros with the shape and unit of `self`.
    zeros_like => ZerosLike;
    /// Ones with the shape and unit of `self`.
    ones_like => OnesLike;
}

macro_rules! comparison_methods {
    ($($(#[$doc:meta])* $method:ident, $with_const:ident => $op:ident;)*) => {
        impl Node {
            $(
                $(#[$doc])*
                pub fn $method(&self, rhs: &Self) -> Result<Self> {
                    self.binary(Operation::$op, rhs)
                }

                $(#[$doc])*
                pub fn $with_const(&self, c: impl Into<Quantity>) -> Result<Self> {
                    self.with_constant(Operation::$op, c)
                }
            )*
        }
    };
}

comparison_methods! {
    /// Dimensionless `1`/`0` mask of `self < rhs`; not differentiable.
    less, less_const => Less;
    /// Dimensionless `1`/`0` mask of `self <= rhs`; not differentiable.
    less_equal, less_equal_const => LessEqual;
    /// Dimensionless `1`/`0` mask of `self > rhs`; not differentiable.
    greater, greater_const => Greater;
    /// Dimensionless `1`/`0` mask of `self >= rhs`; not differentiable.
    greater_equal, greater_equal_const => GreaterEqual;
    /// Dimensionless `1`/`0` mask of `self == rhs`; not differentiable.
    equal, equal_const => Equal;
}

macro_rules! impl_node_binary_op {
    ($trait:ident, $method:ident, $nodes:ident, $with_const:ident, $const_first:ident) => {
        impl $trait<&Node> for &Node {
            type Output = Result<Node>;

            fn $method(self, rhs: &Node) -> Result<Node> {
                self.$nodes(rhs)
            }
        }

        impl $trait<Node> for &Node {
            type Output = Result<Node>;

            fn $method(self, rhs: Node) -> Result<Node> {
                self.$nodes(&rhs)
            }
        }

        impl $trait<&Node> for Node {
            type Output = Result<Node>;

            fn $method(self, rhs: &Node) -> Result<Node> {
                self.$nodes(rhs)
            }
        }

        impl $trait<Node> for Node {
            type Output = Result<Node>;

            fn $method(self, rhs: Node) -> Result<Node> {
                self.$nodes(&rhs)
            }
        }

        impl $trait<Scalar> for &Node {
            type Output = Result<Node>;

            fn $method(self, rhs: Scalar) -> Result<Node> {
                self.$with_const(rhs)
            }
        }

        impl $trait<Scalar> for Node {
            type Output = Result<Node>;

            fn $method(self, rhs: Scalar) -> Result<Node> {
                self.$with_const(rhs)
            }
        }

        impl $trait<&Quantity> for &Node {
            type Output = Result<Node>;

            fn $method(self, rhs: &Quantity) -> Result<Node> {
                self.$with_const(rhs.clone())
            }
        }

        impl $trait<Quantity> for &Node {
            type Output = Result<Node>;

            fn $method(self, rhs: Quantity) -> Result<Node> {
                self.$with_const(rhs)
            }
        }

        impl $trait<&Quantity> for Node {
            type Output = Result<Node>;

            fn $method(self, rhs: &Quantity) -> Result<Node> {
                self.$with_const(rhs.clone())
            }
        }

        impl $trait<Quantity> for Node {
            type Output = Result<Node>;

            fn $method(self, rhs: Quantity) -> Result<Node> {
                self.$with_const(rhs)
            }
        }

        impl $trait<&Node> for Scalar {
            type Output = Result<Node>;

            fn $method(self, rhs: &Node) -> Result<Node> {
                rhs.$const_first(self)
            }
        }

        impl $trait<Node> for Scalar {
            type Output = Result<Node>;

            fn $method(self, rhs: Node) -> Result<Node> {
                rhs.$const_first(self)
            }
        }

        impl $trait<&Node> for &Quantity {
            type Output = Result<Node>;

            fn $method(self, rhs: &Node) -> Result<Node> {
                rhs.$const_first(self.clone())
            }
        }

        impl $trait<&Node> for Quantity {
            type Output = Result<Node>;

            fn $method(self, rhs: &Node) -> Result<Node> {
                rhs.$const_first(self)
            }
        }
    };
}

impl_node_binary_op!(Add, add, try_add, add_const, radd_const);
impl_node_binary_op!(Sub, sub, try_sub, sub_const, rsub_const);
impl_node_binary_op!(Mul, mul, try_mul, mul_const, mul_const);
impl_node_binary_op!(Div, div, try_div, div_const, rdiv_const);

impl Neg for &Node {
    type Output = Result<Node>;

    fn neg(self) -> Result<Node> {
        self.negate()
    }
}

impl Neg for Node {
    type Output = Result<Node>;

    fn neg(self) -> Result<Node> {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::autodiff::node::variable;
    use crate::errors::Error;
    use crate::units::definitions::{METRE, MILLIMETRE, RADIAN, SECOND};

    #[test]
    fn sums_keep_left_unit_and_label() {
        let a = variable("a", Quantity::new(2.0, METRE));
        let b = variable("b", Quantity::new(1.0, MILLIMETRE));
        let c = (&a + &b).unwrap();
        assert_eq!(c.name(), "(a+b)");
        assert_eq!(c.unit(), &METRE);
        assert_relative_eq!(c.scalar().unwrap(), 2.001, epsilon = 1e-12);

        let d = (Quantity::new(1.0, MILLIMETRE) + &a).unwrap();
        assert_eq!(d.operation(), Operation::RAddConst);
        assert_eq!(d.unit(), &MILLIMETRE);
        assert_relative_eq!(d.scalar().unwrap(), 2001.0, epsilon = 1e-9);
    }

    #[test]
    fn constants_select_by_constant_operations() {
        let a = variable("a", Quantity::dimensionless(3.0));
        let b = (2.0 - &a).unwrap();
        assert_eq!(b.operation(), Operation::RSubConst);
        assert_eq!(b.scalar(), Some(-1.0));
        assert_eq!(b.name(), "(2-a)");
        let c = (6.0 / &a).unwrap();
        assert_eq!(c.operation(), Operation::RDivConst);
        assert_eq!(c.scalar(), Some(2.0));
        let d = (&a * 2.0).unwrap();
        assert_eq!(d.operation(), Operation::MulConst);
        assert_eq!(d.constant().and_then(Quantity::scalar), Some(2.0));
        assert_eq!(a.powi(2).unwrap().scalar(), Some(9.0));
    }

    #[test]
    fn dimension_errors_surface_at_construction() {
        let x = variable("x", Quantity::new(1.0, METRE));
        let t = variable("t", Quantity::new(1.0, SECOND));
        assert!(matches!(&x + &t, Err(Error::DimensionMismatch { op: "add", .. })));
        assert!(matches!(x.sin(), Err(Error::Domain { function: "sin", .. })));
        let theta = variable("theta", Quantity::new(0.0, RADIAN));
        assert_eq!(theta.cos().unwrap().scalar(), Some(1.0));
        assert!(variable("u", Quantity::dimensionless(2.0)).asin().is_err());
    }

    #[test]
    fn comparisons_yield_masks() {
        let x = variable("x", Quantity::new(1.0, METRE));
        let y = variable("y", Quantity::new(500.0, MILLIMETRE));
        let gt = x.greater(&y).unwrap();
        assert_eq!(gt.scalar(), Some(1.0));
        assert_eq!(gt.name(), "(x>y)");
        assert_eq!(x.less_const(Quantity::new(1.0, METRE)).unwrap().scalar(), Some(0.0));
        assert_eq!(x.equal(&x).unwrap().scalar(), Some(1.0));
    }

    #[test]
    fn negation_and_rounding() {
        let x = variable("x", Quantity::new(-2.5, METRE));
        let n = (-&x).unwrap();
        assert_eq!(n.scalar(), Some(2.5));
        assert_eq!(n.name(), "-x");
        assert_eq!(x.abs().unwrap().scalar(), Some(2.5));
        assert_eq!(x.trunc().unwrap().scalar(), Some(-2.0));
        assert_eq!(x.zeros_like().unwrap().unit(), &METRE);
    }
}
