//! Operation tags and their forward/backward rules.
//!
//! Every rule is expressed with ordinary [`Quantity`] arithmetic, so each
//! gradient carries the unit `unit(output) / unit(input)` without any
//! bookkeeping beyond what the unit algebra already does.

use crate::errors::{Error, Result};
use crate::math::Scalar;
use crate::units::Quantity;

/// Stateless tag describing how a node was computed from its inputs.
///
/// By-constant variants (`*Const`) take one node input and a constant operand
/// stored on the node; the constant never receives a gradient. `R*` variants
/// put the constant on the left, e.g. `RSubConst` computes `c - x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Leaf holding a user-supplied value.
    Variable,
    /// `x + y`.
    Add,
    /// `x - y`.
    Sub,
    /// `x * y`.
    Mul,
    /// `x / y`.
    Div,
    /// `x ^ y` with a dimensionless exponent node.
    Pow,
    /// Matrix product of two array nodes.
    MatMul,
    /// `x + c`.
    AddConst,
    /// `c + x`.
    RAddConst,
    /// `x - c`.
    SubConst,
    /// `c - x`.
    RSubConst,
    /// `x * c`.
    MulConst,
    /// `x / c`.
    DivConst,
    /// `c / x`.
    RDivConst,
    /// `x ^ c`.
    PowConst,
    /// `c ^ x`.
    RPowConst,
    /// `x @ c`.
    MatMulConst,
    /// `c @ x`.
    RMatMulConst,
    /// `-x`.
    Neg,
    /// `|x|`.
    Abs,
    /// `1 / x`.
    Recip,
    /// `e^x`.
    Exp,
    /// Natural logarithm.
    Log,
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Hyperbolic sine.
    Sinh,
    /// Hyperbolic cosine.
    Cosh,
    /// Hyperbolic tangent.
    Tanh,
    /// Arcsine.
    Asin,
    /// Arccosine.
    Acos,
    /// Arctangent.
    Atan,
    /// Inverse hyperbolic sine.
    Asinh,
    /// Inverse hyperbolic cosine.
    Acosh,
    /// Inverse hyperbolic tangent.
    Atanh,
    /// Floor; zero gradient.
    Floor,
    /// Ceiling; zero gradient.
    Ceil,
    /// Rounding; zero gradient.
    Round,
    /// Truncation; zero gradient.
    Trunc,
    /// Zeros with the shape and unit of `x`; zero gradient.
    ZerosLike,
    /// Ones with the shape and unit of `x`; zero gradient.
    OnesLike,
    /// `x < y` as a dimensionless 1/0 mask.
    Less,
    /// `x <= y`.
    LessEqual,
    /// `x > y`.
    Greater,
    /// `x >= y`.
    GreaterEqual,
    /// `x == y`.
    Equal,
}

/// `+1`, `-1` or `0`, so that `|x|` has a zero subgradient at the origin.
fn sign(x: Scalar) -> Scalar {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl Operation {
    /// Short tag used in error messages and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Variable => "variable",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Pow => "pow",
            Self::MatMul => "matmul",
            Self::AddConst => "add_const",
            Self::RAddConst => "radd_const",
            Self::SubConst => "sub_const",
            Self::RSubConst => "rsub_const",
            Self::MulConst => "mul_const",
            Self::DivConst => "div_const",
            Self::RDivConst => "rdiv_const",
            Self::PowConst => "pow_const",
            Self::RPowConst => "rpow_const",
            Self::MatMulConst => "matmul_const",
            Self::RMatMulConst => "rmatmul_const",
            Self::Neg => "neg",
            Self::Abs => "abs",
            Self::Recip => "recip",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Asinh => "asinh",
            Self::Acosh => "acosh",
            Self::Atanh => "atanh",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Round => "round",
            Self::Trunc => "trunc",
            Self::ZerosLike => "zeros_like",
            Self::OnesLike => "ones_like",
            Self::Less => "lt",
            Self::LessEqual => "le",
            Self::Greater => "gt",
            Self::GreaterEqual => "ge",
            Self::Equal => "eq",
        }
    }

    /// True for the comparison tags, which have no backward rule.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Less | Self::LessEqual | Self::Greater | Self::GreaterEqual | Self::Equal
        )
    }

    /// True for operations with a backward rule.
    #[must_use]
    pub const fn is_differentiable(self) -> bool {
        !self.is_comparison()
    }

    /// True when the operation reads a constant operand.
    #[must_use]
    pub const fn takes_constant(self) -> bool {
        matches!(
            self,
            Self::AddConst
                | Self::RAddConst
                | Self::SubConst
                | Self::RSubConst
                | Self::MulConst
                | Self::DivConst
                | Self::RDivConst
                | Self::PowConst
                | Self::RPowConst
                | Self::MatMulConst
                | Self::RMatMulConst
        ) || self.is_comparison()
    }

    const fn takes_two_nodes(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Pow | Self::MatMul
        ) || self.is_comparison()
    }

    const fn takes_one_node(self) -> bool {
        !matches!(self, Self::Variable) && !self.takes_two_nodes() && !self.takes_constant()
    }

    fn malformed(self) -> Error {
        Error::UnsupportedOperand {
            op: self.name(),
            operand: "malformed operand list",
        }
    }

    /// Splits the operand list into `x` and the second operand (node or constant).
    fn operands<'a>(
        self,
        inputs: &[&'a Quantity],
        constant: Option<&'a Quantity>,
    ) -> Result<(&'a Quantity, Result<&'a Quantity>)> {
        let well_formed = match (inputs, constant.is_some()) {
            ([_, _], false) => self.takes_two_nodes(),
            ([_], true) => self.takes_constant(),
            ([_], false) => self.takes_one_node(),
            _ => false,
        };
        let (true, Some(x)) = (well_formed, inputs.first().copied()) else {
            return Err(self.malformed());
        };
        let y = inputs
            .get(1)
            .copied()
            .or(constant)
            .ok_or_else(|| self.malformed());
        Ok((x, y))
    }

    /// Computes the node value from its input values.
    pub fn forward(self, inputs: &[&Quantity], constant: Option<&Quantity>) -> Result<Quantity> {
        let (x, y) = self.operands(inputs, constant)?;
        match self {
            Self::Variable => Err(self.malformed()),
            Self::Add | Self::AddConst => x.try_add(y?),
            Self::RAddConst => y?.try_add(x),
            Self::Sub | Self::SubConst => x.try_sub(y?),
            Self::RSubConst => y?.try_sub(x),
            Self::Mul | Self::MulConst => x.try_mul(y?),
            Self::Div | Self::DivConst => x.try_div(y?),
            Self::RDivConst => y?.try_div(x),
            Self::Pow | Self::PowConst => x.pow(y?),
            Self::RPowConst => y?.pow(x),
            Self::MatMul | Self::MatMulConst => x.matmul(y?),
            Self::RMatMulConst => y?.matmul(x),
            Self::Neg => Ok(-x),
            Self::Abs => Ok(x.abs()),
            Self::Recip => Ok(x.recip()),
            Self::Exp => x.exp(),
            Self::Log => x.ln(),
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Sinh => x.sinh(),
            Self::Cosh => x.cosh(),
            Self::Tanh => x.tanh(),
            Self::Asin => x.asin(),
            Self::Acos => x.acos(),
            Self::Atan => x.atan(),
            Self::Asinh => x.asinh(),
            Self::Acosh => x.acosh(),
            Self::Atanh => x.atanh(),
            Self::Floor => Ok(x.floor()),
            Self::Ceil => Ok(x.ceil()),
            Self::Round => Ok(x.round()),
            Self::Trunc => Ok(x.trunc()),
            Self::ZerosLike => Ok(x.zeros_like()),
            Self::OnesLike => Ok(x.ones_like()),
            Self::Less => x.compare_with(y?, self.name(), |a, b| a < b),
            Self::LessEqual => x.compare_with(y?, self.name(), |a, b| a <= b),
            Self::Greater => x.compare_with(y?, self.name(), |a, b| a > b),
            Self::GreaterEqual => x.compare_with(y?, self.name(), |a, b| a >= b),
            Self::Equal => x.compare_with(y?, self.name(), |a, b| a == b),
        }
    }

    /// Expression label built from the input labels, e.g. `(a+b)` or `sin(a)`.
    #[must_use]
    pub fn label(self, inputs: &[&str], constant: Option<&Quantity>) -> String {
        let x = inputs.first().copied().unwrap_or_default();
        let y = inputs
            .get(1)
            .map(|s| (*s).to_string())
            .or_else(|| constant.map(ToString::to_string))
            .unwrap_or_default();
        match self {
            Self::Variable => x.to_string(),
            Self::Add | Self::AddConst => format!("({x}+{y})"),
            Self::RAddConst => format!("({y}+{x})"),
            Self::Sub | Self::SubConst => format!("({x}-{y})"),
            Self::RSubConst => format!("({y}-{x})"),
            Self::Mul | Self::MulConst => format!("({x}*{y})"),
            Self::Div | Self::DivConst => format!("({x}/{y})"),
            Self::RDivConst => format!("({y}/{x})"),
            Self::Pow | Self::PowConst => format!("({x}^{y})"),
            Self::RPowConst => format!("({y}^{x})"),
            Self::MatMul | Self::MatMulConst => format!("MatMul({x},{y})"),
            Self::RMatMulConst => format!("MatMul({y},{x})"),
            Self::Neg => format!("-{x}"),
            Self::ZerosLike => format!("ZerosLike({x})"),
            Self::OnesLike => format!("OnesLike({x})"),
            Self::Less => format!("({x}<{y})"),
            Self::LessEqual => format!("({x}<={y})"),
            Self::Greater => format!("({x}>{y})"),
            Self::GreaterEqual => format!("({x}>={y})"),
            Self::Equal => format!("({x}=={y})"),
            _ => format!("{}({x})", self.name()),
        }
    }

    /// Vector-Jacobian product: the contribution of `grad`, the gradient at
    /// the node, to each node input. `value` is the node's forward value.
    ///
    /// Contributions to operands that were broadcast in the forward pass are
    /// summed back to the operand's shape. Comparisons return
    /// [`Error::NotDifferentiable`].
    pub fn backward(
        self,
        inputs: &[&Quantity],
        constant: Option<&Quantity>,
        value: &Quantity,
        grad: &Quantity,
    ) -> Result<Vec<Quantity>> {
        if self == Self::Variable {
            return Ok(Vec::new());
        }
        let (x, y) = self.operands(inputs, constant)?;
        let g = grad;
        let grads = match self {
            Self::Variable => Vec::new(),
            Self::Less | Self::LessEqual | Self::Greater | Self::GreaterEqual | Self::Equal => {
                return Err(Error::NotDifferentiable { op: self.name() })
            }
            Self::Add => {
                let y = y?;
                vec![g.clone().reduce_like(x), g.clone().reduce_like(y)]
            }
            Self::Sub => {
                let y = y?;
                vec![g.clone().reduce_like(x), (-g).reduce_like(y)]
            }
            Self::AddConst | Self::RAddConst | Self::SubConst => vec![g.clone().reduce_like(x)],
            Self::RSubConst => vec![(-g).reduce_like(x)],
            Self::Mul => {
                let y = y?;
                vec![
                    g.try_mul(y)?.reduce_like(x),
                    g.try_mul(x)?.reduce_like(y),
                ]
            }
            Self::MulConst => vec![g.try_mul(y?)?.reduce_like(x)],
            Self::Div => {
                let y = y?;
                let over_y = g.try_div(y)?;
                let dy = -over_y.try_mul(value)?;
                vec![over_y.reduce_like(x), dy.reduce_like(y)]
            }
            Self::DivConst => vec![g.try_div(y?)?.reduce_like(x)],
            Self::RDivConst => vec![(-g.try_mul(value)?.try_div(x)?).reduce_like(x)],
            Self::Pow => {
                let y = y?;
                vec![
                    power_rule(g, x, y)?.reduce_like(x),
                    exponent_rule(g, x, value)?.reduce_like(y),
                ]
            }
            Self::PowConst => vec![power_rule(g, x, y?)?.reduce_like(x)],
            Self::RPowConst => vec![exponent_rule(g, y?, value)?.reduce_like(x)],
            Self::MatMul => {
                let y = y?;
                vec![g.matmul(&y.transpose())?, x.transpose().matmul(g)?]
            }
            Self::MatMulConst => vec![g.matmul(&y?.transpose())?],
            Self::RMatMulConst => vec![y?.transpose().matmul(g)?],
            Self::Neg => vec![-g],
            Self::Abs => vec![g.try_mul(&Quantity::dimensionless(x.value().map(sign)))?],
            Self::Recip => vec![-g.try_mul(value)?.try_mul(value)?],
            Self::Exp => vec![g.try_mul(value)?],
            Self::Log => vec![g.try_div(x)?],
            Self::Sin => vec![g.try_mul(&x.cos()?)?],
            Self::Cos => vec![-g.try_mul(&x.sin()?)?],
            Self::Tan => vec![g.try_mul(&(1.0 + &value.powi(2)?)?)?],
            Self::Sinh => vec![g.try_mul(&x.cosh()?)?],
            Self::Cosh => vec![g.try_mul(&x.sinh()?)?],
            Self::Tanh => vec![g.try_mul(&(1.0 - &value.powi(2)?)?)?],
            Self::Asin => vec![g.try_div(&(1.0 - &x.powi(2)?)?.sqrt()?)?],
            Self::Acos => vec![-g.try_div(&(1.0 - &x.powi(2)?)?.sqrt()?)?],
            Self::Atan => vec![g.try_div(&(1.0 + &x.powi(2)?)?)?],
            Self::Asinh => vec![g.try_div(&(&x.powi(2)? + 1.0)?.sqrt()?)?],
            Self::Acosh => vec![g.try_div(&(&x.powi(2)? - 1.0)?.sqrt()?)?],
            Self::Atanh => vec![g.try_div(&(1.0 - &x.powi(2)?)?)?],
            Self::Floor
            | Self::Ceil
            | Self::Round
            | Self::Trunc
            | Self::ZerosLike
            | Self::OnesLike => vec![g.zeros_like()],
        };
        Ok(grads)
    }
}

/// `g * p * x^(p - 1)`.
fn power_rule(g: &Quantity, base: &Quantity, power: &Quantity) -> Result<Quantity> {
    let lowered = (power - 1.0)?;
    g.try_mul(power)?.try_mul(&base.pow(&lowered)?)
}

/// `g * b^p * ln(b)`.
///
/// The logarithm is taken element-wise without a domain check: a
/// non-positive base yields NaN (or -inf at zero) for this contribution only,
/// and a dimensioned base, whose logarithm has no unit, yields NaN.
fn exponent_rule(g: &Quantity, base: &Quantity, value: &Quantity) -> Result<Quantity> {
    let ln = if base.dimension().is_dimensionless() {
        base.si_value().map(Scalar::ln)
    } else {
        base.value().full_like(Scalar::NAN)
    };
    g.try_mul(value)?.try_mul(&Quantity::dimensionless(ln))
}
