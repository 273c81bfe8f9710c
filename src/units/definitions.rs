//! Named units.
//!
//! SI base units, the SI derived units with special names, and the scaled
//! multiples most often needed by geometry and mechanics code.

use super::dimension::{
    ACCELERATION, ANGLE, AREA, CAPACITANCE, CHARGE, CONDUCTANCE, CURRENT, DIMENSIONLESS, ENERGY,
    FORCE, FREQUENCY, INDUCTANCE, LENGTH, LUMINOUS_INTENSITY, MAGNETIC_FLUX,
    MAGNETIC_FLUX_DENSITY, MASS, POWER, PRESSURE, RESISTANCE, SUBSTANCE, TEMPERATURE, TIME,
    VELOCITY, VOLTAGE, VOLUME,
};
use super::scale::Scale;
use super::unit::Unit;

/// Plain numbers.
pub const SCALAR: Unit = Unit::new(DIMENSIONLESS);

// SI base units.

/// Metre.
pub const METRE: Unit = Unit::named(LENGTH, Scale::UNIT, "m");
/// Second.
pub const SECOND: Unit = Unit::named(TIME, Scale::UNIT, "s");
/// Kilogram.
pub const KILOGRAM: Unit = Unit::named(MASS, Scale::UNIT, "kg");
/// Kelvin.
pub const KELVIN: Unit = Unit::named(TEMPERATURE, Scale::UNIT, "K");
/// Ampere.
pub const AMPERE: Unit = Unit::named(CURRENT, Scale::UNIT, "A");
/// Mole.
pub const MOLE: Unit = Unit::named(SUBSTANCE, Scale::UNIT, "mol");
/// Candela.
pub const CANDELA: Unit = Unit::named(LUMINOUS_INTENSITY, Scale::UNIT, "cd");

// SI derived units with special names.

/// Radian.
pub const RADIAN: Unit = Unit::named(ANGLE, Scale::UNIT, "rad");
/// Steradian (square radian).
pub const STERADIAN: Unit = Unit::named(ANGLE.powi(2), Scale::UNIT, "sr");
/// Hertz.
pub const HERTZ: Unit = Unit::named(FREQUENCY, Scale::UNIT, "Hz");
/// Newton.
pub const NEWTON: Unit = Unit::named(FORCE, Scale::UNIT, "N");
/// Pascal.
pub const PASCAL: Unit = Unit::named(PRESSURE, Scale::UNIT, "Pa");
/// Joule.
pub const JOULE: Unit = Unit::named(ENERGY, Scale::UNIT, "J");
/// Watt.
pub const WATT: Unit = Unit::named(POWER, Scale::UNIT, "W");
/// Coulomb.
pub const COULOMB: Unit = Unit::named(CHARGE, Scale::UNIT, "C");
/// Volt.
pub const VOLT: Unit = Unit::named(VOLTAGE, Scale::UNIT, "V");
/// Farad.
pub const FARAD: Unit = Unit::named(CAPACITANCE, Scale::UNIT, "F");
/// Ohm.
pub const OHM: Unit = Unit::named(RESISTANCE, Scale::UNIT, "Ohm");
/// Siemens.
pub const SIEMENS: Unit = Unit::named(CONDUCTANCE, Scale::UNIT, "S");
/// Weber.
pub const WEBER: Unit = Unit::named(MAGNETIC_FLUX, Scale::UNIT, "Wb");
/// Tesla.
pub const TESLA: Unit = Unit::named(MAGNETIC_FLUX_DENSITY, Scale::UNIT, "T");
/// Henry.
pub const HENRY: Unit = Unit::named(INDUCTANCE, Scale::UNIT, "H");

// Length.

/// Kilometre.
pub const KILOMETRE: Unit = Unit::named(LENGTH, Scale::KILO, "km");
/// Hectometre.
pub const HECTOMETRE: Unit = Unit::named(LENGTH, Scale::HECTO, "hm");
/// Decametre.
pub const DECAMETRE: Unit = Unit::named(LENGTH, Scale::DECA, "dam");
/// Decimetre.
pub const DECIMETRE: Unit = Unit::named(LENGTH, Scale::DECI, "dm");
/// Centimetre.
pub const CENTIMETRE: Unit = Unit::named(LENGTH, Scale::CENTI, "cm");
/// Millimetre.
pub const MILLIMETRE: Unit = Unit::named(LENGTH, Scale::MILLI, "mm");
/// Micrometre.
pub const MICROMETRE: Unit = Unit::named(LENGTH, Scale::MICRO, "um");
/// Nanometre.
pub const NANOMETRE: Unit = Unit::named(LENGTH, Scale::NANO, "nm");
/// Picometre.
pub const PICOMETRE: Unit = Unit::named(LENGTH, Scale::PICO, "pm");
/// International inch.
pub const INCH: Unit = Unit::named(LENGTH, Scale::from_factor(0.0254), "in");
/// International foot.
pub const FOOT: Unit = Unit::named(LENGTH, Scale::from_factor(0.3048), "ft");
/// International yard.
pub const YARD: Unit = Unit::named(LENGTH, Scale::from_factor(0.9144), "yd");
/// International mile.
pub const MILE: Unit = Unit::named(LENGTH, Scale::from_factor(1609.344), "mi");
/// Nautical mile.
pub const NAUTICAL_MILE: Unit = Unit::named(LENGTH, Scale::from_factor(1852.0), "nmi");

// Time.

/// Millisecond.
pub const MILLISECOND: Unit = Unit::named(TIME, Scale::MILLI, "ms");
/// Microsecond.
pub const MICROSECOND: Unit = Unit::named(TIME, Scale::MICRO, "us");
/// Nanosecond.
pub const NANOSECOND: Unit = Unit::named(TIME, Scale::NANO, "ns");
/// Picosecond.
pub const PICOSECOND: Unit = Unit::named(TIME, Scale::PICO, "ps");
/// Minute.
pub const MINUTE: Unit = Unit::named(TIME, Scale::from_factor(60.0), "min");
/// Hour.
pub const HOUR: Unit = Unit::named(TIME, Scale::from_factor(3600.0), "h");
/// Day.
pub const DAY: Unit = Unit::named(TIME, Scale::from_factor(86_400.0), "d");

// Mass.

/// Gram.
pub const GRAM: Unit = Unit::named(MASS, Scale::MILLI, "g");
/// Milligram.
pub const MILLIGRAM: Unit = Unit::named(MASS, Scale::MICRO, "mg");
/// Tonne.
pub const TONNE: Unit = Unit::named(MASS, Scale::KILO, "t");

// Area and volume.

/// Square metre.
pub const SQUARE_METRE: Unit = Unit::named(AREA, Scale::UNIT, "m^2");
/// Cubic metre.
pub const CUBIC_METRE: Unit = Unit::named(VOLUME, Scale::UNIT, "m^3");
/// Litre.
pub const LITRE: Unit = Unit::named(VOLUME, Scale::MILLI, "L");
/// Millilitre.
pub const MILLILITRE: Unit = Unit::named(VOLUME, Scale::MICRO, "mL");

// Kinematics.

/// Metre per second.
pub const METRE_PER_SECOND: Unit = Unit::named(VELOCITY, Scale::UNIT, "m/s");
/// Metre per second squared.
pub const METRE_PER_SECOND_SQUARED: Unit = Unit::named(ACCELERATION, Scale::UNIT, "m/s^2");
/// Kilometre per hour.
pub const KILOMETRE_PER_HOUR: Unit = Unit::named(VELOCITY, Scale::from_factor(1e3 / 3600.0), "km/h");

// Scaled derived units.

/// Kilohertz.
pub const KILOHERTZ: Unit = Unit::named(FREQUENCY, Scale::KILO, "kHz");
/// Megahertz.
pub const MEGAHERTZ: Unit = Unit::named(FREQUENCY, Scale::MEGA, "MHz");
/// Gigahertz.
pub const GIGAHERTZ: Unit = Unit::named(FREQUENCY, Scale::GIGA, "GHz");
/// Kilonewton.
pub const KILONEWTON: Unit = Unit::named(FORCE, Scale::KILO, "kN");
/// Kilopascal.
pub const KILOPASCAL: Unit = Unit::named(PRESSURE, Scale::KILO, "kPa");
/// Kilojoule.
pub const KILOJOULE: Unit = Unit::named(ENERGY, Scale::KILO, "kJ");
/// Kilowatt.
pub const KILOWATT: Unit = Unit::named(POWER, Scale::KILO, "kW");
/// Milliampere.
pub const MILLIAMPERE: Unit = Unit::named(CURRENT, Scale::MILLI, "mA");
/// Millivolt.
pub const MILLIVOLT: Unit = Unit::named(VOLTAGE, Scale::MILLI, "mV");
/// Kilovolt.
pub const KILOVOLT: Unit = Unit::named(VOLTAGE, Scale::KILO, "kV");
/// Kilohm.
pub const KILOHM: Unit = Unit::named(RESISTANCE, Scale::KILO, "kOhm");
/// Microfarad.
pub const MICROFARAD: Unit = Unit::named(CAPACITANCE, Scale::MICRO, "uF");
/// Nanofarad.
pub const NANOFARAD: Unit = Unit::named(CAPACITANCE, Scale::NANO, "nF");
/// Picofarad.
pub const PICOFARAD: Unit = Unit::named(CAPACITANCE, Scale::PICO, "pF");

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn derived_units_compose_from_base_units() {
        assert_eq!(&(&KILOGRAM * &METRE) / &SECOND.powi(2), NEWTON);
        assert_eq!(&NEWTON * &METRE, JOULE);
        assert_eq!(&JOULE / &SECOND, WATT);
        assert_eq!(&WATT / &AMPERE, VOLT);
        assert_eq!(&COULOMB / &VOLT, FARAD);
        assert_eq!(&VOLT / &AMPERE, OHM);
        assert_eq!(SECOND.recip(), HERTZ);
    }

    #[test]
    fn scaled_units_carry_factors() {
        assert_relative_eq!(MILE.scale().factor() / FOOT.scale().factor(), 5280.0, epsilon = 1e-9);
        assert_eq!(&KILOMETRE / &HOUR, KILOMETRE_PER_HOUR);
        assert_eq!(DECIMETRE.powi(3), LITRE);
        assert_eq!(GRAM.scale(), Scale::MILLI);
    }

    #[test]
    fn radian_is_tagged_angle() {
        assert!(RADIAN.dimension().is_angle());
        assert!(RADIAN.is_compatible(&SCALAR));
        assert_ne!(RADIAN, SCALAR);
    }
}
