//! Free functions that accept graph nodes, quantities or plain numbers.
//!
//! When any operand is a [`Node`] the result is a new node in the same graph;
//! otherwise the function evaluates directly on [`Quantity`] values.

use crate::autodiff::Node;
use crate::errors::{Error, Result};
use crate::math::Scalar;
use crate::units::Quantity;

/// Argument or result of a mixed-operand function.
#[derive(Debug, Clone)]
pub enum Operand {
    /// A graph node.
    Node(Node),
    /// A plain (constant) quantity.
    Quantity(Quantity),
}

impl Operand {
    /// Current value: the node's forward value or the quantity itself.
    #[must_use]
    pub fn value(&self) -> &Quantity {
        match self {
            Self::Node(node) => node.value(),
            Self::Quantity(q) => q,
        }
    }

    /// The node, if this operand is one.
    #[must_use]
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            Self::Quantity(_) => None,
        }
    }

    /// Converts into a node, if this operand is one.
    #[must_use]
    pub fn into_node(self) -> Option<Node> {
        match self {
            Self::Node(node) => Some(node),
            Self::Quantity(_) => None,
        }
    }

    /// Converts into a quantity, taking the forward value of a node.
    #[must_use]
    pub fn into_quantity(self) -> Quantity {
        match self {
            Self::Node(node) => node.value().clone(),
            Self::Quantity(q) => q,
        }
    }
}

impl From<Node> for Operand {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<&Node> for Operand {
    fn from(node: &Node) -> Self {
        Self::Node(node.clone())
    }
}

impl From<Quantity> for Operand {
    fn from(q: Quantity) -> Self {
        Self::Quantity(q)
    }
}

impl From<&Quantity> for Operand {
    fn from(q: &Quantity) -> Self {
        Self::Quantity(q.clone())
    }
}

impl From<Scalar> for Operand {
    fn from(x: Scalar) -> Self {
        Self::Quantity(Quantity::dimensionless(x))
    }
}

fn binary(
    x: Operand,
    y: Operand,
    nodes: impl FnOnce(&Node, &Node) -> Result<Node>,
    node_const: impl FnOnce(&Node, Quantity) -> Result<Node>,
    const_node: impl FnOnce(&Node, Quantity) -> Result<Node>,
    quantities: impl FnOnce(&Quantity, &Quantity) -> Result<Quantity>,
) -> Result<Operand> {
    match (x, y) {
        (Operand::Node(x), Operand::Node(y)) => nodes(&x, &y).map(Operand::Node),
        (Operand::Node(x), Operand::Quantity(c)) => node_const(&x, c).map(Operand::Node),
        (Operand::Quantity(c), Operand::Node(y)) => const_node(&y, c).map(Operand::Node),
        (Operand::Quantity(x), Operand::Quantity(y)) => quantities(&x, &y).map(Operand::Quantity),
    }
}

fn unary(
    x: Operand,
    node: impl FnOnce(&Node) -> Result<Node>,
    quantity: impl FnOnce(&Quantity) -> Result<Quantity>,
) -> Result<Operand> {
    match x {
        Operand::Node(x) => node(&x).map(Operand::Node),
        Operand::Quantity(x) => quantity(&x).map(Operand::Quantity),
    }
}

/// `x + y`, in the unit of `x`.
pub fn add(x: impl Into<Operand>, y: impl Into<Operand>) -> Result<Operand> {
    binary(
        x.into(),
        y.into(),
        Node::try_add,
        |x, c| x.add_const(c),
        |y, c| y.radd_const(c),
        Quantity::try_add,
    )
}

/// `x - y`, in the unit of `x`.
pub fn sub(x: impl Into<Operand>, y: impl Into<Operand>) -> Result<Operand> {
    binary(
        x.into(),
        y.into(),
        Node::try_sub,
        |x, c| x.sub_const(c),
        |y, c| y.rsub_const(c),
        Quantity::try_sub,
    )
}

/// `x * y`.
pub fn mul(x: impl Into<Operand>, y: impl Into<Operand>) -> Result<Operand> {
    binary(
        x.into(),
        y.into(),
        Node::try_mul,
        |x, c| x.mul_const(c),
        |y, c| y.mul_const(c),
        Quantity::try_mul,
    )
}

/// `x / y`.
pub fn div(x: impl Into<Operand>, y: impl Into<Operand>) -> Result<Operand> {
    binary(
        x.into(),
        y.into(),
        Node::try_div,
        |x, c| x.div_const(c),
        |y, c| y.rdiv_const(c),
        Quantity::try_div,
    )
}

/// `x ^ y` for a dimensionless exponent.
pub fn pow(x: impl Into<Operand>, y: impl Into<Operand>) -> Result<Operand> {
    binary(
        x.into(),
        y.into(),
        Node::pow,
        |x, c| x.pow_const(c),
        |y, c| y.rpow_const(c),
        Quantity::pow,
    )
}

/// Matrix product `x @ y`.
pub fn matmul(x: impl Into<Operand>, y: impl Into<Operand>) -> Result<Operand> {
    binary(
        x.into(),
        y.into(),
        Node::matmul,
        |x, c| x.matmul_const(c),
        |y, c| y.rmatmul_const(c),
        Quantity::matmul,
    )
}

macro_rules! unary_functions {
    ($($(#[$doc:meta])* $name:ident => $node:ident, $quantity:expr;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(x: impl Into<Operand>) -> Result<Operand> {
                unary(x.into(), Node::$node, $quantity)
            }
        )*
    };
}

unary_functions! {
    /// `-x`.
    neg => negate, |q: &Quantity| Ok(-q);
    /// `|x|`.
    abs => abs, |q: &Quantity| Ok(q.abs());
    /// `1 / x`.
    recip => recip, |q: &Quantity| Ok(q.recip());
    /// Exponential of a dimensionless operand.
    exp => exp, Quantity::exp;
    /// Natural logarithm of a positive dimensionless operand.
    log => ln, Quantity::ln;
    /// Sine of an angle.
    sin => sin, Quantity::sin;
    /// Cosine of an angle.
    cos => cos, Quantity::cos;
    /// Tangent of an angle.
    tan => tan, Quantity::tan;
    /// Hyperbolic sine.
    sinh => sinh, Quantity::sinh;
    /// Hyperbolic cosine.
    cosh => cosh, Quantity::cosh;
    /// Hyperbolic tangent.
    tanh => tanh, Quantity::tanh;
    /// Arcsine, in radians.
    asin => asin, Quantity::asin;
    /// Arccosine, in radians.
    acos => acos, Quantity::acos;
    /// Arctangent, in radians.
    atan => atan, Quantity::atan;
    /// Inverse hyperbolic sine.
    asinh => asinh, Quantity::asinh;
    /// Inverse hyperbolic cosine.
    acosh => acosh, Quantity::acosh;
    /// Inverse hyperbolic tangent.
    atanh => atanh, Quantity::atanh;
    /// Floor.
    floor => floor, |q: &Quantity| Ok(q.floor());
    /// Ceiling.
    ceil => ceil, |q: &Quantity| Ok(q.ceil());
    /// Nearest integer.
    round => round, |q: &Quantity| Ok(q.round());
    /// Integer part.
    trunc => trunc, |q: &Quantity| Ok(q.trunc());
    /// Zeros with the shape and unit of `x`.
    zeros_like => zeros_like, |q: &Quantity| Ok(q.zeros_like());
    /// Ones with the shape and unit of `x`.
    ones_like => ones_like, |q: &Quantity| Ok(q.ones_like());
}

macro_rules! comparison_functions {
    ($($(#[$doc:meta])* $name:ident => $nodes:ident, $with_const:ident, $flipped:ident, $pred:expr;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(x: impl Into<Operand>, y: impl Into<Operand>) -> Result<Operand> {
                binary(
                    x.into(),
                    y.into(),
                    Node::$nodes,
                    |x, c| x.$with_const(c),
                    |y, c| y.$flipped(c),
                    |x, y| x.compare_with(y, stringify!($name), $pred),
                )
            }
        )*
    };
}

comparison_functions! {
    /// Dimensionless `1`/`0` mask of `x < y`.
    lt => less, less_const, greater_const, |a, b| a < b;
    /// Dimensionless `1`/`0` mask of `x <= y`.
    le => less_equal, less_equal_const, greater_equal_const, |a, b| a <= b;
    /// Dimensionless `1`/`0` mask of `x > y`.
    gt => greater, greater_const, less_const, |a, b| a > b;
    /// Dimensionless `1`/`0` mask of `x >= y`.
    ge => greater_equal, greater_equal_const, less_equal_const, |a, b| a >= b;
    /// Dimensionless `1`/`0` mask of `x == y`.
    eq => equal, equal_const, equal_const, |a, b| a == b;
}

/// Sums a list of nodes left to right, so the result is in the first node's unit.
pub fn sum_nodes(nodes: &[Node]) -> Result<Node> {
    let (first, rest) = nodes.split_first().ok_or(Error::UnsupportedOperand {
        op: "sum",
        operand: "empty node list",
    })?;
    rest.iter().try_fold(first.clone(), |total, node| total.try_add(node))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::autodiff::{differentiate, variable, Operation};
    use crate::units::definitions::{METRE, MILLIMETRE, RADIAN, SECOND};

    #[test]
    fn quantities_evaluate_directly() {
        let out = add(Quantity::new(1.0, MILLIMETRE), Quantity::new(1.0, METRE)).unwrap();
        assert!(out.as_node().is_none());
        assert_relative_eq!(out.value().scalar().unwrap(), 1001.0, epsilon = 1e-9);
        assert_eq!(out.value().unit(), &MILLIMETRE);
        assert!(matches!(
            asin(2.0),
            Err(Error::Domain { function: "asin", .. })
        ));
        assert!(sin(Quantity::new(1.0, METRE)).is_err());
        assert!(add(Quantity::new(1.0, METRE), Quantity::new(1.0, SECOND)).is_err());
    }

    #[test]
    fn nodes_build_graph_nodes() {
        let x = variable("x", Quantity::new(0.5, RADIAN));
        let y = sin(&x).unwrap().into_node().unwrap();
        assert_eq!(y.name(), "sin(x)");
        let z = mul(2.0, &y).unwrap().into_node().unwrap();
        assert_eq!(z.operation(), Operation::MulConst);
        let grads = differentiate(&z, [&x]).unwrap();
        assert_relative_eq!(grads[&x].scalar().unwrap(), 2.0 * 0.5_f64.cos(), epsilon = 1e-12);
    }

    #[test]
    fn reversed_constants_keep_operand_order() {
        let x = variable("x", Quantity::dimensionless(4.0));
        let d = div(2.0, &x).unwrap();
        assert_eq!(d.value().scalar(), Some(0.5));
        let s = sub(10.0, &x).unwrap();
        assert_eq!(s.value().scalar(), Some(6.0));
        let p = pow(2.0, &x).unwrap();
        assert_eq!(p.value().scalar(), Some(16.0));
        let lt_mask = lt(3.0, &x).unwrap();
        assert_eq!(lt_mask.value().scalar(), Some(1.0));
        assert_eq!(
            lt_mask.as_node().map(Node::operation),
            Some(Operation::Greater)
        );
        assert_eq!(ge(3.0, 4.0).unwrap().value().scalar(), Some(0.0));
    }

    #[test]
    fn sum_of_node_list() {
        let a = variable("a", Quantity::new(1.0, METRE));
        let b = variable("b", Quantity::new(250.0, MILLIMETRE));
        let c = variable("c", Quantity::new(2.0, METRE));
        let total = sum_nodes(&[a.clone(), b.clone(), c]).unwrap();
        assert_eq!(total.name(), "((a+b)+c)");
        assert_relative_eq!(total.scalar().unwrap(), 3.25, epsilon = 1e-12);
        let grads = differentiate(&total, [&a, &b]).unwrap();
        assert_relative_eq!(grads[&a].scalar().unwrap(), 1.0);
        assert_relative_eq!(grads[&b].scalar().unwrap(), 1e-3, epsilon = 1e-15);
        assert!(sum_nodes(&[]).is_err());
    }
}
