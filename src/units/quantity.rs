//! Dimension-checked numeric quantities.
//!
//! Every operation returns a new [`Quantity`]. Addition, subtraction and
//! remainder require compatible dimensions and rescale the right operand into
//! the left operand's unit, so `1 mm + 1 m` is `1001 mm`. Multiplication and
//! division compose units. Fallible operator impls return [`Result`].

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use crate::errors::{Error, Result};
use crate::math::{Scalar, Value};

use super::definitions::{RADIAN, SCALAR};
use super::dimension::{Dimension, Exponent};
use super::unit::Unit;

/// A numeric value (scalar or array) tagged with a [`Unit`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Quantity {
    value: Value,
    unit: Unit,
}

impl Quantity {
    /// Creates a quantity.
    #[must_use]
    pub fn new(value: impl Into<Value>, unit: Unit) -> Self {
        Self {
            value: value.into(),
            unit,
        }
    }

    /// Const constructor for scalar quantities.
    #[must_use]
    pub const fn from_scalar(value: Scalar, unit: Unit) -> Self {
        Self {
            value: Value::Scalar(value),
            unit,
        }
    }

    /// A plain, dimensionless quantity.
    #[must_use]
    pub fn dimensionless(value: impl Into<Value>) -> Self {
        Self::new(value, SCALAR)
    }

    /// Numeric payload, expressed in [`Quantity::unit`].
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Unit of the payload.
    #[must_use]
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Shorthand for `self.unit().dimension()`.
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Scalar payload, if the value is a scalar.
    #[must_use]
    pub fn scalar(&self) -> Option<Scalar> {
        self.value.as_scalar()
    }

    /// Splits into value and unit.
    #[must_use]
    pub fn into_parts(self) -> (Value, Unit) {
        (self.value, self.unit)
    }

    /// Payload multiplied by the unit's scale factor (value in SI base units).
    #[must_use]
    pub fn si_value(&self) -> Value {
        self.value.scaled(self.unit.scale().factor())
    }

    /// Converts to `target`, which must have a compatible dimension.
    pub fn to(&self, target: &Unit) -> Result<Self> {
        let factor = self.unit.conversion_to(target)?;
        Ok(Self::new(self.value.scaled(factor), target.clone()))
    }

    /// Same unit, every element replaced by `fill`.
    #[must_use]
    pub fn full_like(&self, fill: Scalar) -> Self {
        Self::new(self.value.full_like(fill), self.unit.clone())
    }

    /// Zero with the shape and unit of `self`.
    #[must_use]
    pub fn zeros_like(&self) -> Self {
        self.full_like(0.0)
    }

    /// One with the shape and unit of `self`.
    #[must_use]
    pub fn ones_like(&self) -> Self {
        self.full_like(1.0)
    }

    fn with_value(&self, value: Value) -> Self {
        Self::new(value, self.unit.clone())
    }

    /// Value of `other` expressed in `self`'s unit, after a dimension check.
    fn aligned(&self, other: &Self, op: &'static str) -> Result<Value> {
        if !self.unit.is_compatible(&other.unit) {
            return Err(Error::DimensionMismatch {
                op,
                lhs: self.dimension(),
                rhs: other.dimension(),
            });
        }
        let factor = other.unit.scale().conversion_to(&self.unit.scale());
        Ok(other.value.scaled(factor))
    }

    // Binary arithmetic.

    /// Sum in the left operand's unit.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        let rhs = self.aligned(other, "add")?;
        Ok(self.with_value(self.value.zip_with(&rhs, "add", |a, b| a + b)?))
    }

    /// Difference in the left operand's unit.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        let rhs = self.aligned(other, "sub")?;
        Ok(self.with_value(self.value.zip_with(&rhs, "sub", |a, b| a - b)?))
    }

    /// Element-wise product; units multiply.
    pub fn try_mul(&self, other: &Self) -> Result<Self> {
        let value = self.value.zip_with(&other.value, "mul", |a, b| a * b)?;
        Ok(Self::new(value, self.unit.try_multiply(&other.unit)?))
    }

    /// Element-wise quotient; units divide.
    pub fn try_div(&self, other: &Self) -> Result<Self> {
        let value = self.value.zip_with(&other.value, "div", |a, b| a / b)?;
        Ok(Self::new(value, self.unit.try_divide(&other.unit)?))
    }

    /// Floored quotient (`//`); the unit is the quotient unit.
    pub fn floor_div(&self, other: &Self) -> Result<Self> {
        let value = self
            .value
            .zip_with(&other.value, "floor_div", |a, b| (a / b).floor())?;
        Ok(Self::new(value, self.unit.try_divide(&other.unit)?))
    }

    /// Floored remainder (`%`), sign of the divisor.
    ///
    /// Two dimensioned operands must be compatible and the result keeps the
    /// left unit. A plain number on either side acts as a bare number and
    /// the result takes the other operand's unit, so `7 m % 3` is `1 m` and
    /// `7 % 3 m` is `1 m`.
    pub fn try_rem(&self, other: &Self) -> Result<Self> {
        let floored = |a: Scalar, b: Scalar| a - b * (a / b).floor();
        if other.unit.is_plain() {
            return Ok(self.with_value(self.value.zip_with(&other.value, "rem", floored)?));
        }
        if self.unit.is_plain() {
            return Ok(other.with_value(self.value.zip_with(&other.value, "rem", floored)?));
        }
        let rhs = self.aligned(other, "rem")?;
        Ok(self.with_value(self.value.zip_with(&rhs, "rem", floored)?))
    }

    /// Matrix product; units multiply.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        let value = self.value.matmul(&other.value)?;
        Ok(Self::new(value, self.unit.try_multiply(&other.unit)?))
    }

    /// Transposed payload, same unit.
    #[must_use]
    pub fn transpose(&self) -> Self {
        self.with_value(self.value.transpose())
    }

    /// Integer power. Fails only if a dimension exponent overflows.
    pub fn powi(&self, n: i32) -> Result<Self> {
        let unit = self.unit.try_powi(n)?;
        Ok(Self::new(self.value.map(|x| x.powi(n)), unit))
    }

    /// Real power. Dimensioned bases need a small rational exponent.
    pub fn powf(&self, p: Scalar) -> Result<Self> {
        let unit = self.unit.powf(p)?;
        Ok(Self::new(self.value.map(|x| x.powf(p)), unit))
    }

    /// Power with a quantity exponent, which must be dimensionless.
    ///
    /// Array exponents are only accepted for dimensionless bases, where the
    /// unit does not depend on the exponent.
    pub fn pow(&self, exponent: &Self) -> Result<Self> {
        if !exponent.dimension().is_dimensionless() {
            return Err(Error::domain(
                "pow",
                format!("exponent must be dimensionless, got `{}`", exponent.dimension()),
            ));
        }
        let power = exponent.si_value();
        match power {
            Value::Scalar(p) => self.powf(p),
            Value::Array(_) if self.dimension().is_scalar() => {
                let base = self.si_value();
                let value = base.zip_with(&power, "pow", Scalar::powf)?;
                Ok(Self::dimensionless(value))
            }
            Value::Array(_) => Err(Error::UnsupportedOperand {
                op: "pow",
                operand: "array exponent on a dimensioned base",
            }),
        }
    }

    /// Exact rational power.
    pub fn pow_exact(&self, p: Exponent) -> Result<Self> {
        let x = p.to_f64();
        Ok(Self::new(self.value.map(|v| v.powf(x)), self.unit.pow(p)?))
    }

    /// Square root.
    pub fn sqrt(&self) -> Result<Self> {
        self.pow_exact(Exponent::ratio(1, 2))
    }

    // Unary arithmetic.

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        self.with_value(self.value.map(Scalar::abs))
    }

    /// Largest integer not greater than the value, in the same unit.
    #[must_use]
    pub fn floor(&self) -> Self {
        self.with_value(self.value.map(Scalar::floor))
    }

    /// Smallest integer not less than the value, in the same unit.
    #[must_use]
    pub fn ceil(&self) -> Self {
        self.with_value(self.value.map(Scalar::ceil))
    }

    /// Nearest integer, halves away from zero.
    #[must_use]
    pub fn round(&self) -> Self {
        self.with_value(self.value.map(Scalar::round))
    }

    /// Integer part.
    #[must_use]
    pub fn trunc(&self) -> Self {
        self.with_value(self.value.map(Scalar::trunc))
    }

    /// Reciprocal; the unit is inverted.
    #[must_use]
    pub fn recip(&self) -> Self {
        Self::new(self.value.map(Scalar::recip), self.unit.recip())
    }

    // Transcendental functions.

    fn require_plain(&self, function: &'static str) -> Result<Value> {
        let dim = self.dimension();
        if !dim.is_scalar() {
            return Err(Error::domain(
                function,
                format!("expected a dimensionless argument, got `{dim}`"),
            ));
        }
        Ok(self.si_value())
    }

    fn require_dimensionless(&self, function: &'static str) -> Result<Value> {
        let dim = self.dimension();
        if !dim.is_dimensionless() {
            return Err(Error::domain(
                function,
                format!("expected a dimensionless argument, got `{dim}`"),
            ));
        }
        Ok(self.si_value())
    }

    fn require_angle(&self, function: &'static str) -> Result<Value> {
        let dim = self.dimension();
        let angle = dim.angle_exponent();
        if !dim.is_dimensionless() || !(angle.is_zero() || angle == Exponent::ONE) {
            return Err(Error::domain(
                function,
                format!("expected an angle, got `{dim}`"),
            ));
        }
        Ok(self.si_value())
    }

    fn check_range(
        value: &Value,
        function: &'static str,
        expected: &str,
        ok: impl Fn(Scalar) -> bool,
    ) -> Result<()> {
        if value.all(ok) {
            Ok(())
        } else {
            Err(Error::domain(
                function,
                format!("argument {value} outside {expected}"),
            ))
        }
    }

    /// Natural exponential of a dimensionless quantity.
    pub fn exp(&self) -> Result<Self> {
        let x = self.require_dimensionless("exp")?;
        Ok(Self::dimensionless(x.map(Scalar::exp)))
    }

    /// Natural logarithm of a positive dimensionless quantity.
    pub fn ln(&self) -> Result<Self> {
        let x = self.require_dimensionless("log")?;
        Self::check_range(&x, "log", "(0, inf)", |v| v > 0.0)?;
        Ok(Self::dimensionless(x.map(Scalar::ln)))
    }

    /// Sine of an angle.
    pub fn sin(&self) -> Result<Self> {
        let x = self.require_angle("sin")?;
        Ok(Self::dimensionless(x.map(Scalar::sin)))
    }

    /// Cosine of an angle.
    pub fn cos(&self) -> Result<Self> {
        let x = self.require_angle("cos")?;
        Ok(Self::dimensionless(x.map(Scalar::cos)))
    }

    /// Tangent of an angle.
    pub fn tan(&self) -> Result<Self> {
        let x = self.require_angle("tan")?;
        Ok(Self::dimensionless(x.map(Scalar::tan)))
    }

    /// Hyperbolic sine.
    pub fn sinh(&self) -> Result<Self> {
        let x = self.require_angle("sinh")?;
        Ok(Self::dimensionless(x.map(Scalar::sinh)))
    }

    /// Hyperbolic cosine.
    pub fn cosh(&self) -> Result<Self> {
        let x = self.require_angle("cosh")?;
        Ok(Self::dimensionless(x.map(Scalar::cosh)))
    }

    /// Hyperbolic tangent.
    pub fn tanh(&self) -> Result<Self> {
        let x = self.require_angle("tanh")?;
        Ok(Self::dimensionless(x.map(Scalar::tanh)))
    }

    /// Arcsine in radians; requires `|x| <= 1`.
    pub fn asin(&self) -> Result<Self> {
        let x = self.require_plain("asin")?;
        Self::check_range(&x, "asin", "[-1, 1]", |v| v.abs() <= 1.0)?;
        Ok(Self::new(x.map(Scalar::asin), RADIAN))
    }

    /// Arccosine in radians; requires `|x| <= 1`.
    pub fn acos(&self) -> Result<Self> {
        let x = self.require_plain("acos")?;
        Self::check_range(&x, "acos", "[-1, 1]", |v| v.abs() <= 1.0)?;
        Ok(Self::new(x.map(Scalar::acos), RADIAN))
    }

    /// Arctangent in radians.
    pub fn atan(&self) -> Result<Self> {
        let x = self.require_plain("atan")?;
        Ok(Self::new(x.map(Scalar::atan), RADIAN))
    }

    /// Inverse hyperbolic sine.
    pub fn asinh(&self) -> Result<Self> {
        let x = self.require_plain("asinh")?;
        Ok(Self::dimensionless(x.map(Scalar::asinh)))
    }

    /// Inverse hyperbolic cosine; requires `x >= 1`.
    pub fn acosh(&self) -> Result<Self> {
        let x = self.require_plain("acosh")?;
        Self::check_range(&x, "acosh", "[1, inf)", |v| v >= 1.0)?;
        Ok(Self::dimensionless(x.map(Scalar::acosh)))
    }

    /// Inverse hyperbolic tangent; requires `|x| < 1`.
    pub fn atanh(&self) -> Result<Self> {
        let x = self.require_plain("atanh")?;
        Self::check_range(&x, "atanh", "(-1, 1)", |v| v.abs() < 1.0)?;
        Ok(Self::dimensionless(x.map(Scalar::atanh)))
    }

    // Comparisons.

    /// Orders two scalar quantities, rescaling `other` into `self`'s unit.
    ///
    /// Fails with [`Error::DimensionMismatch`] across incompatible dimensions
    /// and with [`Error::UnsupportedOperand`] for arrays. `Ok(None)` means at
    /// least one side is NaN.
    pub fn try_cmp(&self, other: &Self) -> Result<Option<Ordering>> {
        let rhs = self.aligned(other, "compare")?;
        match (&self.value, &rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(a.partial_cmp(b)),
            _ => Err(Error::UnsupportedOperand {
                op: "compare",
                operand: "array",
            }),
        }
    }

    /// Checked equality: element-wise after rescaling, error on dimension mismatch.
    pub fn try_eq(&self, other: &Self) -> Result<bool> {
        let rhs = self.aligned(other, "eq")?;
        Ok(self.value == rhs)
    }

    /// Element-wise comparison mask: dimensionless `1.0` where `pred` holds,
    /// `0.0` elsewhere. Arrays are compared element by element.
    pub fn compare_with(
        &self,
        other: &Self,
        op: &'static str,
        pred: impl Fn(Scalar, Scalar) -> bool,
    ) -> Result<Self> {
        let rhs = self.aligned(other, op)?;
        let mask = self
            .value
            .zip_with(&rhs, op, |a, b| if pred(a, b) { 1.0 } else { 0.0 })?;
        Ok(Self::dimensionless(mask))
    }

    /// Sums a gradient that was broadcast against a scalar `target` back to a scalar.
    #[must_use]
    pub(crate) fn reduce_like(self, target: &Self) -> Self {
        Self {
            value: self.value.reduce_like(&target.value),
            unit: self.unit,
        }
    }

    /// Checked `<`.
    pub fn try_lt(&self, other: &Self) -> Result<bool> {
        Ok(self.try_cmp(other)? == Some(Ordering::Less))
    }

    /// Checked `<=`.
    pub fn try_le(&self, other: &Self) -> Result<bool> {
        Ok(matches!(
            self.try_cmp(other)?,
            Some(Ordering::Less | Ordering::Equal)
        ))
    }

    /// Checked `>`.
    pub fn try_gt(&self, other: &Self) -> Result<bool> {
        Ok(self.try_cmp(other)? == Some(Ordering::Greater))
    }

    /// Checked `>=`.
    pub fn try_ge(&self, other: &Self) -> Result<bool> {
        Ok(matches!(
            self.try_cmp(other)?,
            Some(Ordering::Greater | Ordering::Equal)
        ))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::dimensionless(0.0)
    }
}

impl From<Scalar> for Quantity {
    fn from(value: Scalar) -> Self {
        Self::dimensionless(value)
    }
}

impl From<Value> for Quantity {
    fn from(value: Value) -> Self {
        Self::dimensionless(value)
    }
}

/// Never fails: incompatible dimensions compare unequal.
impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.try_eq(other).unwrap_or(false)
    }
}

/// Never fails: incompatible dimensions and arrays are unordered.
impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok().flatten()
    }
}

macro_rules! impl_fallible_binary_op {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl $trait<&Quantity> for &Quantity {
            type Output = Result<Quantity>;

            fn $method(self, rhs: &Quantity) -> Result<Quantity> {
                self.$checked(rhs)
            }
        }

        impl $trait<Quantity> for &Quantity {
            type Output = Result<Quantity>;

            fn $method(self, rhs: Quantity) -> Result<Quantity> {
                self.$checked(&rhs)
            }
        }

        impl $trait<&Quantity> for Quantity {
            type Output = Result<Quantity>;

            fn $method(self, rhs: &Quantity) -> Result<Quantity> {
                self.$checked(rhs)
            }
        }

        impl $trait<Quantity> for Quantity {
            type Output = Result<Quantity>;

            fn $method(self, rhs: Quantity) -> Result<Quantity> {
                self.$checked(&rhs)
            }
        }

        impl $trait<Scalar> for &Quantity {
            type Output = Result<Quantity>;

            fn $method(self, rhs: Scalar) -> Result<Quantity> {
                self.$checked(&Quantity::dimensionless(rhs))
            }
        }

        impl $trait<Scalar> for Quantity {
            type Output = Result<Quantity>;

            fn $method(self, rhs: Scalar) -> Result<Quantity> {
                self.$checked(&Quantity::dimensionless(rhs))
            }
        }

        impl $trait<&Quantity> for Scalar {
            type Output = Result<Quantity>;

            fn $method(self, rhs: &Quantity) -> Result<Quantity> {
                Quantity::dimensionless(self).$checked(rhs)
            }
        }

        impl $trait<Quantity> for Scalar {
            type Output = Result<Quantity>;

            fn $method(self, rhs: Quantity) -> Result<Quantity> {
                Quantity::dimensionless(self).$checked(&rhs)
            }
        }
    };
}

impl_fallible_binary_op!(Add, add, try_add);
impl_fallible_binary_op!(Sub, sub, try_sub);
impl_fallible_binary_op!(Mul, mul, try_mul);
impl_fallible_binary_op!(Div, div, try_div);
impl_fallible_binary_op!(Rem, rem, try_rem);

impl Neg for &Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        self.with_value(self.value.map(|x| -x))
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        -&self
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.unit.symbol();
        if symbol.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {symbol}", self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::units::definitions::{
        KILOMETRE, METRE, METRE_PER_SECOND, MILLIMETRE, NEWTON, SECOND, SQUARE_METRE,
    };
    use crate::units::dimension::{DIMENSIONLESS, LENGTH, TIME};

    fn m(x: Scalar) -> Quantity {
        Quantity::new(x, METRE)
    }

    fn s(x: Scalar) -> Quantity {
        Quantity::new(x, SECOND)
    }

    #[test]
    fn addition_keeps_left_unit_and_rescales() {
        let sum = (Quantity::new(1.0, MILLIMETRE) + m(1.0)).unwrap();
        assert_eq!(sum.unit(), &MILLIMETRE);
        assert_relative_eq!(sum.scalar().unwrap(), 1001.0, epsilon = 1e-9);

        let sum = (m(2.0) + Quantity::new(1.0, MILLIMETRE)).unwrap();
        assert_eq!(sum.unit(), &METRE);
        assert_relative_eq!(sum.scalar().unwrap(), 2.001, epsilon = 1e-12);
    }

    #[test]
    fn add_then_sub_round_trips() {
        let a = m(3.25);
        let b = Quantity::new(750.0, MILLIMETRE);
        let back = ((&a + &b).unwrap() - &b).unwrap();
        assert_eq!(back.unit(), a.unit());
        assert_relative_eq!(back.scalar().unwrap(), 3.25, epsilon = 1e-12);
    }

    #[test]
    fn mismatched_addition_is_rejected() {
        let err = (m(1.0) + s(1.0)).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                op: "add",
                lhs: LENGTH,
                rhs: TIME
            }
        );
        assert!((m(1.0) - 2.0).is_err());
        assert_eq!((Quantity::dimensionless(1.0) + 2.0).unwrap().scalar(), Some(3.0));
    }

    #[test]
    fn products_compose_dimensions() {
        let a = m(10.0);
        let b = s(2.0);
        let v = (&a / &b).unwrap();
        assert_eq!(v.unit(), &METRE_PER_SECOND);
        assert_eq!(v.scalar(), Some(5.0));
        assert_eq!((&a * &b).unwrap().dimension(), LENGTH * TIME);
        assert_eq!((&a / &a).unwrap().dimension(), DIMENSIONLESS);
        let inv = (12.0 / &a).unwrap();
        assert_eq!(inv.unit(), &METRE.recip());
        assert_eq!(inv.scalar(), Some(1.2));
    }

    #[test]
    fn powers_and_roots() {
        let sq = m(3.0).powi(2).unwrap();
        assert_eq!(sq.unit(), &SQUARE_METRE);
        let root = sq.powf(0.5).unwrap();
        assert_eq!(root.unit(), &METRE);
        assert_relative_eq!(root.scalar().unwrap(), 3.0);
        assert_eq!(sq.sqrt().unwrap().unit(), &METRE);
        let err = m(2.0).pow(&s(2.0)).unwrap_err();
        assert!(matches!(err, Error::Domain { function: "pow", .. }));
    }

    #[test]
    fn conversion_round_trips() {
        let a = Quantity::new(3.4459, METRE);
        let mm = a.to(&MILLIMETRE).unwrap();
        assert_relative_eq!(mm.scalar().unwrap(), 3445.9, epsilon = 1e-9);
        assert_eq!(mm.floor().scalar(), Some(3445.0));
        assert_eq!(mm.ceil().scalar(), Some(3446.0));
        let back = mm.to(&METRE).unwrap();
        assert_relative_eq!(back.scalar().unwrap(), 3.4459, epsilon = 1e-12);
        assert!(a.to(&SECOND).is_err());
        assert_relative_eq!(
            Quantity::new(2.0, KILOMETRE).si_value().as_scalar().unwrap(),
            2000.0
        );
    }

    #[test]
    fn floor_div_and_rem() {
        let q = m(7.0).floor_div(&s(2.0)).unwrap();
        assert_eq!(q.scalar(), Some(3.0));
        assert_eq!(q.unit(), &METRE_PER_SECOND);
        let r = (m(-7.0) % m(2.0)).unwrap();
        assert_eq!(r.scalar(), Some(1.0));
        assert!((m(7.0) % s(2.0)).is_err());
    }

    #[test]
    fn rem_treats_plain_numbers_as_bare() {
        let r = (&m(7.0) % 3.0).unwrap();
        assert_eq!(r.scalar(), Some(1.0));
        assert_eq!(r.unit(), &METRE);
        let r = (7.0 % m(3.0)).unwrap();
        assert_eq!(r.scalar(), Some(1.0));
        assert_eq!(r.unit(), &METRE);
        let r = (Quantity::new(-7.0, MILLIMETRE) % Quantity::dimensionless(3.0)).unwrap();
        assert_eq!(r.scalar(), Some(2.0));
        assert_eq!(r.unit(), &MILLIMETRE);
        assert_eq!((7.5 % Quantity::dimensionless(2.0)).unwrap().scalar(), Some(1.5));
    }

    #[test]
    fn exponent_overflow_surfaces_as_error() {
        let huge = m(1.0).powf(1e9).unwrap();
        assert!(matches!(huge.powi(3), Err(Error::InvalidExponent(_))));
        assert!(matches!(
            &huge * &huge.powi(2).unwrap(),
            Err(Error::InvalidExponent(_))
        ));
    }

    #[test]
    fn trigonometry_checks_dimension_and_domain() {
        let angle = Quantity::new(0.0, RADIAN);
        assert_eq!(angle.sin().unwrap().scalar(), Some(0.0));
        assert_eq!(angle.cos().unwrap().scalar(), Some(1.0));
        assert_eq!(angle.exp().unwrap().scalar(), Some(1.0));
        assert!(matches!(m(1.0).sin(), Err(Error::Domain { function: "sin", .. })));
        assert!(matches!(
            Quantity::dimensionless(2.0).asin(),
            Err(Error::Domain { function: "asin", .. })
        ));
        assert!(Quantity::dimensionless(0.5).atanh().is_ok());
        assert!(Quantity::dimensionless(1.0).atanh().is_err());
        assert!(Quantity::dimensionless(0.5).acosh().is_err());
        assert!(Quantity::dimensionless(-1.0).ln().is_err());
        assert!(m(1.0).exp().is_err());

        let theta = Quantity::dimensionless(1.0).asin().unwrap();
        assert_eq!(theta.unit(), &RADIAN);
        assert_relative_eq!(theta.scalar().unwrap(), std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn comparison_policy() {
        assert!(m(1.0).try_lt(&m(2.0)).unwrap());
        assert!(Quantity::new(999.0, MILLIMETRE).try_lt(&m(1.0)).unwrap());
        assert!(matches!(
            m(1.0).try_lt(&s(2.0)),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(m(1.0).try_eq(&s(1.0)).is_err());
        assert_ne!(m(1.0), s(1.0));
        assert_eq!(m(1.0).partial_cmp(&s(1.0)), None);
        assert!(m(1.0) < m(1.5));
        assert_eq!(m(2.0), m(2.0));
    }

    #[test]
    fn arrays_carry_units() {
        let d = Quantity::new(Value::vector(&[0.0, 1.0, 2.0]), METRE);
        let sq = d.powi(2).unwrap();
        assert_eq!(sq.value(), &Value::vector(&[0.0, 1.0, 4.0]));
        let f = Quantity::new(Value::vector(&[1.0, 2.0, 3.0]), NEWTON);
        let w = (&f * &d).unwrap();
        assert_eq!(w.to_string(), "[0, 2, 6] m^2 s^-2 kg");
        assert!(d.try_cmp(&d).is_err());
        let mask = d
            .compare_with(&Quantity::new(1500.0, MILLIMETRE), "lt", |a, b| a < b)
            .unwrap();
        assert_eq!(mask.value(), &Value::vector(&[1.0, 1.0, 0.0]));
        assert!(mask.dimension().is_scalar());
    }

    #[test]
    fn display_uses_unit_symbol() {
        assert_eq!(m(2.0).to_string(), "2 m");
        assert_eq!(Quantity::dimensionless(2.5).to_string(), "2.5");
        assert_eq!((-m(2.0)).to_string(), "-2 m");
    }
}
