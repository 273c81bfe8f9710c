//! Multiplicative scales (SI prefixes) attached to units.

use std::fmt;
use std::ops::{Div, Mul};

use crate::errors::{Error, Result};
use crate::math::Scalar;

/// Relative tolerance used when comparing scale factors.
const RELATIVE_TOLERANCE: Scalar = 1e-12;

/// SI prefix symbols and their factors, largest first.
pub const PREFIXES: [(&str, Scalar); 20] = [
    ("Y", 1e24),
    ("Z", 1e21),
    ("E", 1e18),
    ("P", 1e15),
    ("T", 1e12),
    ("G", 1e9),
    ("M", 1e6),
    ("k", 1e3),
    ("h", 1e2),
    ("da", 1e1),
    ("d", 1e-1),
    ("c", 1e-2),
    ("m", 1e-3),
    ("u", 1e-6),
    ("n", 1e-9),
    ("p", 1e-12),
    ("f", 1e-15),
    ("a", 1e-18),
    ("z", 1e-21),
    ("y", 1e-24),
];

fn approx_equal(a: Scalar, b: Scalar) -> bool {
    (a - b).abs() <= RELATIVE_TOLERANCE * a.abs().max(b.abs())
}

/// A positive multiplier applied to the SI base value of a unit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct Scale {
    factor: Scalar,
}

impl Scale {
    /// The identity scale.
    pub const UNIT: Self = Self::from_factor(1.0);
    /// `1e24`.
    pub const YOTTA: Self = Self::from_factor(1e24);
    /// `1e21`.
    pub const ZETTA: Self = Self::from_factor(1e21);
    /// `1e18`.
    pub const EXA: Self = Self::from_factor(1e18);
    /// `1e15`.
    pub const PETA: Self = Self::from_factor(1e15);
    /// `1e12`.
    pub const TERA: Self = Self::from_factor(1e12);
    /// `1e9`.
    pub const GIGA: Self = Self::from_factor(1e9);
    /// `1e6`.
    pub const MEGA: Self = Self::from_factor(1e6);
    /// `1e3`.
    pub const KILO: Self = Self::from_factor(1e3);
    /// `1e2`.
    pub const HECTO: Self = Self::from_factor(1e2);
    /// `1e1`.
    pub const DECA: Self = Self::from_factor(1e1);
    /// `1e-1`.
    pub const DECI: Self = Self::from_factor(1e-1);
    /// `1e-2`.
    pub const CENTI: Self = Self::from_factor(1e-2);
    /// `1e-3`.
    pub const MILLI: Self = Self::from_factor(1e-3);
    /// `1e-6`.
    pub const MICRO: Self = Self::from_factor(1e-6);
    /// `1e-9`.
    pub const NANO: Self = Self::from_factor(1e-9);
    /// `1e-12`.
    pub const PICO: Self = Self::from_factor(1e-12);
    /// `1e-15`.
    pub const FEMTO: Self = Self::from_factor(1e-15);
    /// `1e-18`.
    pub const ATTO: Self = Self::from_factor(1e-18);
    /// `1e-21`.
    pub const ZEPTO: Self = Self::from_factor(1e-21);
    /// `1e-24`.
    pub const YOCTO: Self = Self::from_factor(1e-24);

    /// Creates a scale, rejecting non-positive or non-finite factors.
    pub fn new(factor: Scalar) -> Result<Self> {
        if factor.is_finite() && factor > 0.0 {
            Ok(Self { factor })
        } else {
            Err(Error::InvalidScale(factor))
        }
    }

    /// Const constructor for tables of known-good factors.
    pub(crate) const fn from_factor(factor: Scalar) -> Self {
        Self { factor }
    }

    /// Looks up a scale by its SI prefix symbol (`"k"`, `"m"`, `"da"`, ...).
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        PREFIXES
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, factor)| Self::from_factor(*factor))
    }

    /// Multiplier relative to the SI base unit.
    #[must_use]
    pub const fn factor(&self) -> Scalar {
        self.factor
    }

    /// True for the identity scale.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        *self == Self::UNIT
    }

    /// Canonical SI prefix symbol, if the factor matches one.
    #[must_use]
    pub fn symbol(&self) -> Option<&'static str> {
        PREFIXES
            .iter()
            .find(|(_, factor)| approx_equal(*factor, self.factor))
            .map(|(symbol, _)| *symbol)
    }

    /// Raises the factor to an integer power.
    #[must_use]
    pub fn powi(&self, n: i32) -> Self {
        Self::from_factor(self.factor.powi(n))
    }

    /// Raises the factor to a real power.
    #[must_use]
    pub fn powf(&self, p: Scalar) -> Self {
        Self::from_factor(self.factor.powf(p))
    }

    /// Reciprocal scale.
    #[must_use]
    pub fn recip(&self) -> Self {
        Self::from_factor(self.factor.recip())
    }

    /// Factor that converts a value expressed in `self` into one expressed in `target`.
    #[must_use]
    pub fn conversion_to(&self, target: &Self) -> Scalar {
        if self == target {
            1.0
        } else {
            self.factor / target.factor
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::UNIT
    }
}

impl PartialEq for Scale {
    fn eq(&self, other: &Self) -> bool {
        approx_equal(self.factor, other.factor)
    }
}

impl Mul for Scale {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_factor(self.factor * rhs.factor)
    }
}

impl Div for Scale {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::from_factor(self.factor / rhs.factor)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => f.write_str(symbol),
            None => write!(f, "x{}", self.factor),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn composition_multiplies_factors() {
        let s = Scale::KILO * Scale::MILLI;
        assert!(s.is_unit());
        assert_eq!(Scale::MILLI * Scale::MILLI, Scale::MICRO);
        assert_eq!(Scale::MEGA / Scale::KILO, Scale::KILO);
        assert_eq!(Scale::CENTI.powi(2).symbol(), None);
        assert_relative_eq!(Scale::CENTI.powi(2).factor(), 1e-4);
    }

    #[test]
    fn symbol_lookup_tolerates_rounding() {
        assert_eq!((Scale::MILLI * Scale::MILLI).symbol(), Some("u"));
        assert_eq!(Scale::from_symbol("da"), Some(Scale::DECA));
        assert_eq!(Scale::UNIT.symbol(), None);
        assert_eq!(Scale::new(0.3048).unwrap().to_string(), "x0.3048");
    }

    #[test]
    fn invalid_factors_are_rejected() {
        assert!(matches!(Scale::new(0.0), Err(Error::InvalidScale(_))));
        assert!(Scale::new(-1.0).is_err());
        assert!(Scale::new(f64::NAN).is_err());
    }

    #[test]
    fn conversion_factor_between_scales() {
        assert_relative_eq!(Scale::UNIT.conversion_to(&Scale::MILLI), 1000.0);
        assert_relative_eq!(Scale::MILLI.conversion_to(&Scale::UNIT), 1e-3);
    }
}
