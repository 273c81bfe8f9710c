//! Physical dimensions as exponent vectors over the SI base dimensions.
//!
//! A [`Dimension`] stores one rational [`Exponent`] per base dimension plus an
//! `angle` tag. Angles are dimensionless in SI, so the tag never blocks
//! addition, but it lets trigonometric functions tell radians from plain
//! numbers.

use std::fmt;
use std::ops::{Div, Mul};

use crate::errors::{Error, Result};

/// Largest denominator accepted when converting a float exponent.
const MAX_DENOMINATOR: i32 = 12;

/// A normalized rational exponent `num / den` with `den > 0`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Exponent {
    num: i32,
    den: i32,
}

const fn gcd(mut a: i32, mut b: i32) -> i32 {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Exponent {
    /// The zero exponent.
    pub const ZERO: Self = Self::int(0);
    /// The unit exponent.
    pub const ONE: Self = Self::int(1);

    /// Integer exponent.
    #[must_use]
    pub const fn int(n: i32) -> Self {
        Self { num: n, den: 1 }
    }

    /// Rational exponent `num / den`, normalized. Panics if `den == 0`.
    #[must_use]
    pub const fn ratio(num: i32, den: i32) -> Self {
        assert!(den != 0, "zero denominator");
        let sign = if den < 0 { -1 } else { 1 };
        let g = gcd(num, den);
        let g = if g == 0 { 1 } else { g };
        Self {
            num: sign * num / g,
            den: sign * den / g,
        }
    }

    /// Converts a float exponent into the nearest small rational.
    pub fn from_f64(x: f64) -> Result<Self> {
        if !x.is_finite() {
            return Err(Error::InvalidExponent(x));
        }
        for den in 1..=MAX_DENOMINATOR {
            let scaled = x * f64::from(den);
            let num = scaled.round();
            if (scaled - num).abs() < 1e-9 && num.abs() < f64::from(i32::MAX) {
                return Ok(Self::ratio(num as i32, den));
            }
        }
        Err(Error::InvalidExponent(x))
    }

    /// Numerator.
    #[must_use]
    pub const fn numer(self) -> i32 {
        self.num
    }

    /// Denominator (always positive).
    #[must_use]
    pub const fn denom(self) -> i32 {
        self.den
    }

    /// True for the zero exponent.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.num == 0
    }

    /// Floating-point value of the exponent.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Normalized `num / den`, or `None` if an intermediate overflows `i32`.
    const fn checked_ratio(num: i32, den: i32) -> Option<Self> {
        if den == 0 || num == i32::MIN || den == i32::MIN {
            return None;
        }
        Some(Self::ratio(num, den))
    }

    const fn checked_plus(self, other: Self) -> Option<Self> {
        let (Some(a), Some(b), Some(den)) = (
            self.num.checked_mul(other.den),
            other.num.checked_mul(self.den),
            self.den.checked_mul(other.den),
        ) else {
            return None;
        };
        match a.checked_add(b) {
            Some(num) => Self::checked_ratio(num, den),
            None => None,
        }
    }

    const fn checked_times(self, other: Self) -> Option<Self> {
        match (self.num.checked_mul(other.num), self.den.checked_mul(other.den)) {
            (Some(num), Some(den)) => Self::checked_ratio(num, den),
            _ => None,
        }
    }

    /// Sum for `const` tables; overflow is a compile-time error there.
    const fn plus(self, other: Self) -> Self {
        match self.checked_plus(other) {
            Some(e) => e,
            None => panic!("dimension exponent overflow"),
        }
    }

    /// Sum, or [`Error::InvalidExponent`] on overflow.
    fn try_plus(self, other: Self) -> Result<Self> {
        self.checked_plus(other)
            .ok_or_else(|| Error::InvalidExponent(self.to_f64() + other.to_f64()))
    }

    #[must_use]
    const fn negated(self) -> Self {
        Self {
            num: -self.num,
            den: self.den,
        }
    }

    /// Product for `const` tables; overflow is a compile-time error there.
    const fn times(self, other: Self) -> Self {
        match self.checked_times(other) {
            Some(e) => e,
            None => panic!("dimension exponent overflow"),
        }
    }

    /// Product, or [`Error::InvalidExponent`] on overflow.
    fn try_times(self, other: Self) -> Result<Self> {
        self.checked_times(other)
            .ok_or_else(|| Error::InvalidExponent(self.to_f64() * other.to_f64()))
    }
}

impl fmt::Display for Exponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "({}/{})", self.num, self.den)
        }
    }
}

/// The seven SI base dimensions, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseDimension {
    /// Length (metre).
    Length,
    /// Time (second).
    Time,
    /// Mass (kilogram).
    Mass,
    /// Thermodynamic temperature (kelvin).
    Temperature,
    /// Electric current (ampere).
    Current,
    /// Amount of substance (mole).
    Substance,
    /// Luminous intensity (candela).
    LuminousIntensity,
}

impl BaseDimension {
    /// All base dimensions in storage order.
    pub const ALL: [Self; 7] = [
        Self::Length,
        Self::Time,
        Self::Mass,
        Self::Temperature,
        Self::Current,
        Self::Substance,
        Self::LuminousIntensity,
    ];

    /// SI symbol of the base unit.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Length => "m",
            Self::Time => "s",
            Self::Mass => "kg",
            Self::Temperature => "K",
            Self::Current => "A",
            Self::Substance => "mol",
            Self::LuminousIntensity => "cd",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Exponent vector over the SI base dimensions plus an angle tag.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimension {
    exponents: [Exponent; 7],
    angle: Exponent,
}

impl Dimension {
    /// Builds a dimension from integer exponents in the order
    /// length, time, mass, temperature, current, substance, luminous intensity.
    #[must_use]
    pub const fn new(
        length: i32,
        time: i32,
        mass: i32,
        temperature: i32,
        current: i32,
        substance: i32,
        luminous_intensity: i32,
    ) -> Self {
        Self {
            exponents: [
                Exponent::int(length),
                Exponent::int(time),
                Exponent::int(mass),
                Exponent::int(temperature),
                Exponent::int(current),
                Exponent::int(substance),
                Exponent::int(luminous_intensity),
            ],
            angle: Exponent::ZERO,
        }
    }

    /// Builds a dimension from rational exponents.
    #[must_use]
    pub const fn from_exponents(exponents: [Exponent; 7], angle: Exponent) -> Self {
        Self { exponents, angle }
    }

    /// Exponent of a single base dimension.
    #[must_use]
    pub const fn exponent(&self, base: BaseDimension) -> Exponent {
        self.exponents[base.index()]
    }

    /// All base exponents in storage order.
    #[must_use]
    pub const fn exponents(&self) -> [Exponent; 7] {
        self.exponents
    }

    /// Exponent of the angle tag.
    #[must_use]
    pub const fn angle_exponent(&self) -> Exponent {
        self.angle
    }

    /// True when every base exponent is zero. Angles count as dimensionless.
    #[must_use]
    pub const fn is_dimensionless(&self) -> bool {
        let mut i = 0;
        while i < 7 {
            if !self.exponents[i].is_zero() {
                return false;
            }
            i += 1;
        }
        true
    }

    /// True for plain numbers: no base exponents and no angle tag.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        self.is_dimensionless() && self.angle.is_zero()
    }

    /// True for the radian dimension.
    #[must_use]
    pub fn is_angle(&self) -> bool {
        self.is_dimensionless() && self.angle == Exponent::ONE
    }

    /// True when values of the two dimensions may be added or compared.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.exponents == other.exponents
    }

    /// Componentwise sum of exponents.
    ///
    /// Intended for building `const` dimensions; panics if an exponent
    /// overflows. Runtime arithmetic goes through [`Dimension::try_multiply`].
    #[must_use]
    pub const fn multiply(&self, other: &Self) -> Self {
        let mut exponents = self.exponents;
        let mut i = 0;
        while i < 7 {
            exponents[i] = exponents[i].plus(other.exponents[i]);
            i += 1;
        }
        Self {
            exponents,
            angle: self.angle.plus(other.angle),
        }
    }

    /// Componentwise difference of exponents; panics on overflow.
    #[must_use]
    pub const fn divide(&self, other: &Self) -> Self {
        self.multiply(&other.recip())
    }

    /// Multiplies every exponent by an integer power; panics on overflow.
    #[must_use]
    pub const fn powi(&self, n: i32) -> Self {
        self.pow(Exponent::int(n))
    }

    /// Multiplies every exponent by a rational power; panics on overflow.
    #[must_use]
    pub const fn pow(&self, power: Exponent) -> Self {
        let mut exponents = self.exponents;
        let mut i = 0;
        while i < 7 {
            exponents[i] = exponents[i].times(power);
            i += 1;
        }
        Self {
            exponents,
            angle: self.angle.times(power),
        }
    }

    /// Componentwise sum of exponents, [`Error::InvalidExponent`] on overflow.
    pub fn try_multiply(&self, other: &Self) -> Result<Self> {
        let mut exponents = self.exponents;
        for (e, rhs) in exponents.iter_mut().zip(other.exponents) {
            *e = e.try_plus(rhs)?;
        }
        Ok(Self {
            exponents,
            angle: self.angle.try_plus(other.angle)?,
        })
    }

    /// Componentwise difference of exponents, [`Error::InvalidExponent`] on overflow.
    pub fn try_divide(&self, other: &Self) -> Result<Self> {
        self.try_multiply(&other.recip())
    }

    /// Rational power, [`Error::InvalidExponent`] on overflow.
    pub fn try_pow(&self, power: Exponent) -> Result<Self> {
        let mut exponents = self.exponents;
        for e in &mut exponents {
            *e = e.try_times(power)?;
        }
        Ok(Self {
            exponents,
            angle: self.angle.try_times(power)?,
        })
    }

    /// Integer power, [`Error::InvalidExponent`] on overflow.
    pub fn try_powi(&self, n: i32) -> Result<Self> {
        self.try_pow(Exponent::int(n))
    }

    /// Multiplies every exponent by a float power, which must be a small rational.
    pub fn powf(&self, power: f64) -> Result<Self> {
        if self.is_scalar() {
            return Ok(*self);
        }
        self.try_pow(Exponent::from_f64(power)?)
    }

    /// The reciprocal dimension.
    #[must_use]
    pub const fn recip(&self) -> Self {
        Self {
            exponents: [
                self.exponents[0].negated(),
                self.exponents[1].negated(),
                self.exponents[2].negated(),
                self.exponents[3].negated(),
                self.exponents[4].negated(),
                self.exponents[5].negated(),
                self.exponents[6].negated(),
            ],
            angle: self.angle.negated(),
        }
    }

    /// Same dimension with the angle tag cleared.
    #[must_use]
    pub const fn without_angle(&self) -> Self {
        Self {
            exponents: self.exponents,
            angle: Exponent::ZERO,
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        DIMENSIONLESS
    }
}

impl Mul for Dimension {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Div for Dimension {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self.divide(&rhs)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut term = |f: &mut fmt::Formatter<'_>, symbol: &str, e: Exponent| {
            if e.is_zero() {
                return Ok(());
            }
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            if e == Exponent::ONE {
                f.write_str(symbol)
            } else {
                write!(f, "{symbol}^{e}")
            }
        };
        for base in BaseDimension::ALL {
            term(f, base.symbol(), self.exponent(base))?;
        }
        term(f, "rad", self.angle)?;
        if first {
            f.write_str("1")?;
        }
        Ok(())
    }
}

/// Plain numbers.
pub const DIMENSIONLESS: Dimension = Dimension::new(0, 0, 0, 0, 0, 0, 0);
/// Length.
pub const LENGTH: Dimension = Dimension::new(1, 0, 0, 0, 0, 0, 0);
/// Time.
pub const TIME: Dimension = Dimension::new(0, 1, 0, 0, 0, 0, 0);
/// Mass.
pub const MASS: Dimension = Dimension::new(0, 0, 1, 0, 0, 0, 0);
/// Thermodynamic temperature.
pub const TEMPERATURE: Dimension = Dimension::new(0, 0, 0, 1, 0, 0, 0);
/// Electric current.
pub const CURRENT: Dimension = Dimension::new(0, 0, 0, 0, 1, 0, 0);
/// Amount of substance.
pub const SUBSTANCE: Dimension = Dimension::new(0, 0, 0, 0, 0, 1, 0);
/// Luminous intensity.
pub const LUMINOUS_INTENSITY: Dimension = Dimension::new(0, 0, 0, 0, 0, 0, 1);
/// Plane angle (radian).
pub const ANGLE: Dimension = Dimension::from_exponents(DIMENSIONLESS.exponents, Exponent::ONE);

/// Velocity.
pub const VELOCITY: Dimension = LENGTH.divide(&TIME);
/// Acceleration.
pub const ACCELERATION: Dimension = VELOCITY.divide(&TIME);
/// Linear momentum.
pub const MOMENTUM: Dimension = MASS.multiply(&VELOCITY);
/// Impulse.
pub const IMPULSE: Dimension = MOMENTUM.multiply(&TIME);
/// Angular momentum.
pub const ANGULAR_MOMENTUM: Dimension = MOMENTUM.multiply(&LENGTH);
/// Angular velocity.
pub const ANGULAR_VELOCITY: Dimension = ANGLE.divide(&TIME);
/// Angular acceleration.
pub const ANGULAR_ACCELERATION: Dimension = ANGULAR_VELOCITY.divide(&TIME);
/// Frequency.
pub const FREQUENCY: Dimension = TIME.recip();
/// Area.
pub const AREA: Dimension = LENGTH.powi(2);
/// Volume.
pub const VOLUME: Dimension = LENGTH.powi(3);
/// Mass density.
pub const DENSITY: Dimension = MASS.divide(&VOLUME);
/// Force.
pub const FORCE: Dimension = MASS.multiply(&ACCELERATION);
/// Energy.
pub const ENERGY: Dimension = FORCE.multiply(&LENGTH);
/// Power.
pub const POWER: Dimension = ENERGY.divide(&TIME);
/// Pressure.
pub const PRESSURE: Dimension = FORCE.divide(&AREA);
/// Torque.
pub const TORQUE: Dimension = FORCE.multiply(&LENGTH);
/// Action.
pub const ACTION: Dimension = ENERGY.multiply(&TIME);
/// Electric charge.
pub const CHARGE: Dimension = CURRENT.multiply(&TIME);
/// Electric potential.
pub const VOLTAGE: Dimension = POWER.divide(&CURRENT);
/// Capacitance.
pub const CAPACITANCE: Dimension = CHARGE.divide(&VOLTAGE);
/// Electric resistance.
pub const RESISTANCE: Dimension = VOLTAGE.divide(&CURRENT);
/// Electric conductance.
pub const CONDUCTANCE: Dimension = CURRENT.divide(&VOLTAGE);
/// Magnetic flux.
pub const MAGNETIC_FLUX: Dimension = VOLTAGE.multiply(&TIME);
/// Magnetic flux density.
pub const MAGNETIC_FLUX_DENSITY: Dimension = MAGNETIC_FLUX.divide(&AREA);
/// Inductance.
pub const INDUCTANCE: Dimension = MAGNETIC_FLUX.divide(&CURRENT);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_dimensions_match_si() {
        assert_eq!(FORCE, Dimension::new(1, -2, 1, 0, 0, 0, 0));
        assert_eq!(VOLTAGE, Dimension::new(2, -3, 1, 0, -1, 0, 0));
        assert_eq!(CAPACITANCE, Dimension::new(-2, 4, -1, 0, 2, 0, 0));
        assert_eq!(PRESSURE, Dimension::new(-1, -2, 1, 0, 0, 0, 0));
    }

    #[test]
    fn multiply_and_divide_are_exponent_wise() {
        let d = VELOCITY * MASS;
        assert_eq!(d, MOMENTUM);
        assert_eq!(d / MASS, VELOCITY);
        assert_eq!(LENGTH / LENGTH, DIMENSIONLESS);
    }

    #[test]
    fn fractional_powers_stay_exact() {
        let root = AREA.powf(0.5).unwrap();
        assert_eq!(root, LENGTH);
        let cube_root = VOLUME.pow(Exponent::ratio(1, 3));
        assert_eq!(cube_root, LENGTH);
        let half = LENGTH.powf(0.5).unwrap();
        assert_eq!(half.exponent(BaseDimension::Length), Exponent::ratio(1, 2));
        assert_eq!(half.to_string(), "m^(1/2)");
    }

    #[test]
    fn irrational_power_is_rejected() {
        assert!(matches!(
            LENGTH.powf(std::f64::consts::PI),
            Err(Error::InvalidExponent(_))
        ));
        assert_eq!(DIMENSIONLESS.powf(std::f64::consts::PI).unwrap(), DIMENSIONLESS);
    }

    #[test]
    fn angle_is_dimensionless_but_tagged() {
        assert!(ANGLE.is_dimensionless());
        assert!(ANGLE.is_angle());
        assert!(!ANGLE.is_scalar());
        assert!(ANGLE.is_compatible(&DIMENSIONLESS));
        assert_ne!(ANGLE, DIMENSIONLESS);
        assert_eq!(ANGULAR_VELOCITY.to_string(), "s^-1 rad");
    }

    #[test]
    fn display_lists_nonzero_exponents() {
        assert_eq!(DIMENSIONLESS.to_string(), "1");
        assert_eq!((AREA / TIME).to_string(), "m^2 s^-1");
        assert_eq!(FORCE.to_string(), "m s^-2 kg");
    }

    #[test]
    fn exponent_normalizes() {
        assert_eq!(Exponent::ratio(2, 4), Exponent::ratio(1, 2));
        assert_eq!(Exponent::ratio(3, -6), Exponent::ratio(-1, 2));
        assert_eq!(Exponent::from_f64(-1.5).unwrap(), Exponent::ratio(-3, 2));
    }

    #[test]
    fn exponent_overflow_is_an_error() {
        let huge = LENGTH.try_powi(1_000_000_000).unwrap();
        assert!(matches!(huge.try_powi(3), Err(Error::InvalidExponent(_))));
        assert!(matches!(huge.try_multiply(&huge.try_powi(2).unwrap()), Err(Error::InvalidExponent(_))));
        assert!(matches!(
            LENGTH.try_pow(Exponent::ratio(1, 1_000_000)).unwrap().try_pow(Exponent::ratio(1, 1_000_000)),
            Err(Error::InvalidExponent(_))
        ));
        assert_eq!(huge.try_divide(&huge).unwrap(), DIMENSIONLESS);
        assert_eq!(VELOCITY.try_multiply(&TIME).unwrap(), LENGTH);
    }
}
