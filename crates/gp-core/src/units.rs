// gp-core/src/units.rs

use uom::si::f64::{
    MassDensity as UomMassDensity, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

/// Pressure in the correlation convention: `P[Pa] / 1e5`.
///
/// Computed from the raw SI value rather than through uom's unit tables so the
/// result is exactly `p / PA_PER_BAR`.
#[inline]
pub fn to_bar_gauge(p: Pressure) -> f64 {
    p.value / constants::PA_PER_BAR
}

/// Temperature in degrees Celsius: `T[K] - 273.15`.
#[inline]
pub fn to_celsius(t: Temperature) -> f64 {
    t.value - constants::KELVIN_AT_ZERO_CELSIUS
}

pub mod constants {
    /// Universal gas constant [J/(mol·K)] (CODATA 2018, exact).
    pub const R_UNIVERSAL: f64 = 8.314_462_618;

    /// Pascals per bar.
    pub const PA_PER_BAR: f64 = 1e5;

    /// 0 °C in kelvin.
    pub const KELVIN_AT_ZERO_CELSIUS: f64 = 273.15;

    /// Grams per kilogram, for g/mol -> kg/mol.
    pub const G_PER_KG: f64 = 1000.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _t = k(300.0);
        let _rho = kg_per_m3(0.65);
        let _a = mps(430.0);
    }

    #[test]
    fn correlation_conversions() {
        assert_eq!(to_bar_gauge(pa(5e5)), 5.0);
        assert_eq!(to_bar_gauge(pa(1.0)), 1e-5);
        assert_eq!(to_celsius(k(300.0)), 300.0 - 273.15);
        assert_eq!(to_celsius(k(0.0)), -273.15);
    }
}
