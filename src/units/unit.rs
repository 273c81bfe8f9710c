//! Units: a dimension, a scale and an optional display symbol.

use std::borrow::Cow;
use std::fmt;
use std::ops::{Div, Mul};

use crate::errors::{Error, Result};
use crate::math::Scalar;

use super::dimension::{Dimension, Exponent, DIMENSIONLESS};
use super::scale::Scale;

/// A unit of measurement.
///
/// Two units are interchangeable for arithmetic when their dimensions are
/// compatible; the scale only changes how raw values are interpreted and the
/// symbol is purely cosmetic. Equality therefore ignores the symbol.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Unit {
    dimension: Dimension,
    scale: Scale,
    symbol: Option<Cow<'static, str>>,
}

impl Unit {
    /// Unscaled unit of `dimension` with a derived symbol.
    #[must_use]
    pub const fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            scale: Scale::UNIT,
            symbol: None,
        }
    }

    /// Scaled unit of `dimension` with a derived symbol.
    #[must_use]
    pub const fn with_scale(dimension: Dimension, scale: Scale) -> Self {
        Self {
            dimension,
            scale,
            symbol: None,
        }
    }

    /// Unit with an explicit display symbol, usable in `const` tables.
    #[must_use]
    pub const fn named(dimension: Dimension, scale: Scale, symbol: &'static str) -> Self {
        Self {
            dimension,
            scale,
            symbol: Some(Cow::Borrowed(symbol)),
        }
    }

    /// The dimensionless, unscaled unit.
    #[must_use]
    pub const fn dimensionless() -> Self {
        Self::new(DIMENSIONLESS)
    }

    /// Replaces the display symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<Cow<'static, str>>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Physical dimension.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Scale relative to the SI base unit.
    #[must_use]
    pub const fn scale(&self) -> Scale {
        self.scale
    }

    /// Display symbol, derived from the dimension when none was given.
    #[must_use]
    pub fn symbol(&self) -> Cow<'_, str> {
        if let Some(symbol) = &self.symbol {
            return Cow::Borrowed(symbol.as_ref());
        }
        let base = if self.dimension.is_scalar() {
            String::new()
        } else {
            self.dimension.to_string()
        };
        if self.scale.is_unit() {
            Cow::Owned(base)
        } else {
            Cow::Owned(format!("[{}]{base}", self.scale))
        }
    }

    /// True when values in the two units may be added, compared or converted.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.dimension.is_compatible(&other.dimension)
    }

    /// Factor converting a value in `self` into a value in `target`.
    pub fn conversion_to(&self, target: &Self) -> Result<Scalar> {
        if !self.is_compatible(target) {
            return Err(Error::DimensionMismatch {
                op: "convert",
                lhs: self.dimension,
                rhs: target.dimension,
            });
        }
        Ok(self.scale.conversion_to(&target.scale))
    }

    /// True for the unscaled unit of plain numbers.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.dimension.is_scalar() && self.scale.is_unit()
    }

    /// Product unit. Multiplying by a plain number keeps the other unit's symbol.
    ///
    /// Panics if a dimension exponent overflows; see [`Unit::try_multiply`].
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        if other.is_plain() {
            return self.clone();
        }
        if self.is_plain() {
            return other.clone();
        }
        Self::with_scale(
            self.dimension.multiply(&other.dimension),
            self.scale * other.scale,
        )
    }

    /// Product unit, [`Error::InvalidExponent`] if an exponent overflows.
    pub fn try_multiply(&self, other: &Self) -> Result<Self> {
        if other.is_plain() {
            return Ok(self.clone());
        }
        if self.is_plain() {
            return Ok(other.clone());
        }
        Ok(Self::with_scale(
            self.dimension.try_multiply(&other.dimension)?,
            self.scale * other.scale,
        ))
    }

    /// Quotient unit. Panics if a dimension exponent overflows.
    #[must_use]
    pub fn divide(&self, other: &Self) -> Self {
        if other.is_plain() {
            return self.clone();
        }
        Self::with_scale(
            self.dimension.divide(&other.dimension),
            self.scale / other.scale,
        )
    }

    /// Quotient unit, [`Error::InvalidExponent`] if an exponent overflows.
    pub fn try_divide(&self, other: &Self) -> Result<Self> {
        if other.is_plain() {
            return Ok(self.clone());
        }
        Ok(Self::with_scale(
            self.dimension.try_divide(&other.dimension)?,
            self.scale / other.scale,
        ))
    }

    /// Integer power. Panics if a dimension exponent overflows.
    #[must_use]
    pub fn powi(&self, n: i32) -> Self {
        if n == 1 {
            return self.clone();
        }
        Self::with_scale(self.dimension.powi(n), self.scale.powi(n))
    }

    /// Integer power, [`Error::InvalidExponent`] if an exponent overflows.
    pub fn try_powi(&self, n: i32) -> Result<Self> {
        if n == 1 {
            return Ok(self.clone());
        }
        Ok(Self::with_scale(self.dimension.try_powi(n)?, self.scale.powi(n)))
    }

    /// Rational power. Fails for exponents that are not small rationals.
    pub fn powf(&self, p: Scalar) -> Result<Self> {
        if p == 1.0 {
            return Ok(self.clone());
        }
        Ok(Self::with_scale(self.dimension.powf(p)?, self.scale.powf(p)))
    }

    /// Exact rational power, [`Error::InvalidExponent`] if an exponent overflows.
    pub fn pow(&self, p: Exponent) -> Result<Self> {
        Ok(Self::with_scale(self.dimension.try_pow(p)?, self.scale.powf(p.to_f64())))
    }

    /// Reciprocal unit.
    #[must_use]
    pub fn recip(&self) -> Self {
        if self.is_plain() {
            return self.clone();
        }
        Self::with_scale(self.dimension.recip(), self.scale.recip())
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self::dimensionless()
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension && self.scale == other.scale
    }
}

impl Mul for &Unit {
    type Output = Unit;

    fn mul(self, rhs: Self) -> Unit {
        self.multiply(rhs)
    }
}

impl Mul for Unit {
    type Output = Unit;

    fn mul(self, rhs: Self) -> Unit {
        self.multiply(&rhs)
    }
}

impl Div for &Unit {
    type Output = Unit;

    fn div(self, rhs: Self) -> Unit {
        self.divide(rhs)
    }
}

impl Div for Unit {
    type Output = Unit;

    fn div(self, rhs: Self) -> Unit {
        self.divide(&rhs)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::definitions::{KILOMETRE, METRE, MILLIMETRE, NEWTON, SECOND};
    use crate::units::dimension::{AREA, FORCE, LENGTH, VELOCITY};

    #[test]
    fn algebra_composes_dimension_and_scale_independently() {
        let speed = &METRE / &SECOND;
        assert_eq!(speed.dimension(), VELOCITY);
        assert!(speed.scale().is_unit());

        let mm2 = MILLIMETRE.powi(2);
        assert_eq!(mm2.dimension(), AREA);
        assert_eq!(mm2.scale(), Scale::MICRO);
        assert_eq!(mm2.to_string(), "[u]m^2");
    }

    #[test]
    fn equality_ignores_symbol() {
        let plain = Unit::new(FORCE);
        assert_eq!(plain, NEWTON);
        assert_eq!(plain.to_string(), "m s^-2 kg");
        assert_eq!(NEWTON.to_string(), "N");
        assert_ne!(MILLIMETRE, METRE);
    }

    #[test]
    fn derived_symbol_for_composite_units() {
        let u = Unit::new(AREA / crate::units::dimension::TIME);
        assert_eq!(u.symbol(), "m^2 s^-1");
        assert_eq!(Unit::dimensionless().symbol(), "");
        assert_eq!(Unit::new(LENGTH).with_symbol("metre").to_string(), "metre");
    }

    #[test]
    fn conversion_requires_compatible_dimension() {
        let f = KILOMETRE.conversion_to(&MILLIMETRE).unwrap();
        assert!((f - 1e6).abs() < 1e-6);
        assert!(matches!(
            METRE.conversion_to(&SECOND),
            Err(Error::DimensionMismatch { op: "convert", .. })
        ));
    }

    #[test]
    fn fractional_power_of_area_is_length() {
        let side = MILLIMETRE.powi(2).powf(0.5).unwrap();
        assert_eq!(side, MILLIMETRE);
        assert!(METRE.powf(std::f64::consts::E).is_err());
    }

    #[test]
    fn checked_algebra_reports_exponent_overflow() {
        let huge = METRE.powf(1e9).unwrap();
        assert!(matches!(huge.try_powi(3), Err(Error::InvalidExponent(_))));
        assert!(matches!(
            huge.try_multiply(&huge.try_powi(2).unwrap()),
            Err(Error::InvalidExponent(_))
        ));
        assert_eq!(METRE.try_divide(&SECOND).unwrap(), &METRE / &SECOND);
        assert_eq!(KILOMETRE.try_multiply(&Unit::dimensionless()).unwrap(), KILOMETRE);
    }
}
