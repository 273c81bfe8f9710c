//! Physical constants as dimensioned quantities.
//!
//! ## Accuracy
//!
//! Constants marked "exact" have zero uncertainty by SI definition (2019 revision).
//! Measured constants are given with CODATA 2018 precision.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>
//! - Tiesinga, E., Mohr, P. J., Newell, D. B., & Taylor, B. N. (2021). CODATA Recommended Values of the Fundamental Physical Constants: 2018.

use std::f64::consts::PI;

use crate::errors::Result;
use crate::units::definitions::{
    COULOMB, HERTZ, METRE, METRE_PER_SECOND, METRE_PER_SECOND_SQUARED, OHM, RADIAN,
};
use crate::units::dimension::{
    ACTION, CAPACITANCE, ENERGY, INDUCTANCE, LENGTH, MASS, SUBSTANCE, TEMPERATURE, TIME,
};
use crate::units::{Quantity, Unit};

/// Vacuum permittivity ε₀ in F/m.
pub const VACUUM_PERMITTIVITY: Quantity =
    Quantity::from_scalar(8.854_187_812_8e-12, Unit::new(CAPACITANCE.divide(&LENGTH)));
/// Vacuum permeability μ₀ in H/m.
pub const VACUUM_PERMEABILITY: Quantity =
    Quantity::from_scalar(1.256_637_062_12e-6, Unit::new(INDUCTANCE.divide(&LENGTH)));
/// Speed of light in vacuum. Exact.
pub const SPEED_OF_LIGHT: Quantity = Quantity::from_scalar(299_792_458.0, METRE_PER_SECOND);
/// Characteristic impedance of free space, √(μ₀/ε₀).
pub const FREE_SPACE_IMPEDANCE: Quantity = Quantity::from_scalar(376.730_313_668, OHM);
/// Elementary charge. Exact.
pub const ELEMENTARY_CHARGE: Quantity = Quantity::from_scalar(1.602_176_634e-19, COULOMB);
/// Boltzmann constant in J/K. Exact.
pub const BOLTZMANN_CONSTANT: Quantity =
    Quantity::from_scalar(1.380_649e-23, Unit::new(ENERGY.divide(&TEMPERATURE)));
/// Planck constant in J s. Exact.
pub const PLANCK_CONSTANT: Quantity = Quantity::from_scalar(6.626_070_15e-34, Unit::new(ACTION));
/// Avogadro constant in 1/mol. Exact.
pub const AVOGADRO_CONSTANT: Quantity =
    Quantity::from_scalar(6.022_140_76e23, Unit::new(SUBSTANCE.recip()));
/// Newtonian constant of gravitation in m^3 kg^-1 s^-2.
pub const GRAVITATIONAL_CONSTANT: Quantity = Quantity::from_scalar(
    6.674_30e-11,
    Unit::new(LENGTH.powi(3).divide(&MASS).divide(&TIME.powi(2))),
);
/// Standard acceleration of gravity. Exact by convention.
pub const STANDARD_GRAVITY: Quantity = Quantity::from_scalar(9.806_65, METRE_PER_SECOND_SQUARED);

/// Angular frequency `2πf` in rad/s for a frequency in any frequency unit.
pub fn angular_frequency(frequency: &Quantity) -> Result<Quantity> {
    let hz = frequency.to(&HERTZ)?;
    hz.try_mul(&Quantity::new(2.0 * PI, RADIAN))
}

/// Free-space wavelength in metres for a frequency in any frequency unit.
pub fn wavelength_from_frequency(frequency: &Quantity) -> Result<Quantity> {
    let hz = frequency.to(&HERTZ)?;
    SPEED_OF_LIGHT.try_div(&hz)?.to(&METRE)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::units::definitions::{GIGAHERTZ, SECOND};
    use crate::units::dimension::{ANGULAR_VELOCITY, RESISTANCE};

    #[test]
    fn wavelength_matches_reference() {
        let lambda = wavelength_from_frequency(&Quantity::new(1.0, GIGAHERTZ)).unwrap();
        assert_eq!(lambda.unit(), &METRE);
        assert_relative_eq!(lambda.scalar().unwrap(), 0.299_792_458, max_relative = 1.0e-9);
        assert!(wavelength_from_frequency(&Quantity::new(1.0, SECOND)).is_err());
    }

    #[test]
    fn angular_frequency_is_in_radians_per_second() {
        let omega = angular_frequency(&Quantity::new(50.0, HERTZ)).unwrap();
        assert_eq!(omega.dimension(), ANGULAR_VELOCITY);
        assert_relative_eq!(omega.scalar().unwrap(), 100.0 * PI, max_relative = 1.0e-12);
    }

    #[test]
    fn free_space_impedance_is_consistent() {
        let ratio = VACUUM_PERMEABILITY.try_div(&VACUUM_PERMITTIVITY).unwrap();
        let z0 = ratio.sqrt().unwrap();
        assert_eq!(z0.dimension(), RESISTANCE);
        assert_relative_eq!(
            z0.scalar().unwrap(),
            FREE_SPACE_IMPEDANCE.scalar().unwrap(),
            max_relative = 1.0e-9
        );
        let c = VACUUM_PERMEABILITY
            .try_mul(&VACUUM_PERMITTIVITY)
            .unwrap()
            .sqrt()
            .unwrap()
            .recip();
        assert_eq!(c.dimension(), SPEED_OF_LIGHT.dimension());
        assert_relative_eq!(c.scalar().unwrap(), 299_792_458.0, max_relative = 1.0e-9);
    }
}
