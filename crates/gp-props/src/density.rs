//! Density models.
//!
//! The speed-of-sound relation needs the density at the model's current state.
//! A [`DensityModel`] supplies it from the same (P, T) point, together with the
//! molar mass and the compressibility factor already known to the model.

use crate::error::{PropsError, PropsResult};
use gp_core::units::constants::{G_PER_KG, R_UNIVERSAL};
use gp_core::units::{Density, Pressure, Temperature, kg_per_m3};

/// Density at a given state.
pub trait DensityModel: Send + Sync {
    /// Model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Density [kg/m³].
    ///
    /// # Arguments
    /// * `p` - Pressure
    /// * `t` - Temperature
    /// * `molar_mass` - Molar mass [g/mol]
    /// * `z` - Compressibility factor at (p, t)
    fn density(&self, p: Pressure, t: Temperature, molar_mass: f64, z: f64)
    -> PropsResult<Density>;
}

/// Real-gas law: ρ = P·M / (Z·R·T).
#[derive(Debug, Clone, Copy, Default)]
pub struct RealGasDensity;

impl DensityModel for RealGasDensity {
    fn name(&self) -> &str {
        "real-gas-law"
    }

    fn density(
        &self,
        p: Pressure,
        t: Temperature,
        molar_mass: f64,
        z: f64,
    ) -> PropsResult<Density> {
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(PropsError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        if !z.is_finite() || z <= 0.0 {
            return Err(PropsError::NonPhysical {
                what: "compressibility factor must be positive and finite",
            });
        }

        let molar_mass_kg = molar_mass / G_PER_KG;
        let rho = p.value * molar_mass_kg / (z * R_UNIVERSAL * t.value);
        if !rho.is_finite() || rho <= 0.0 {
            return Err(PropsError::NonPhysical {
                what: "density must be positive and finite",
            });
        }
        Ok(kg_per_m3(rho))
    }
}

/// Constant density, independent of state.
///
/// Useful when density comes from an outside source that already tracks the
/// same state point.
#[derive(Debug, Clone, Copy)]
pub struct FixedDensity {
    rho: Density,
}

impl FixedDensity {
    pub fn new(rho: Density) -> PropsResult<Self> {
        if !rho.value.is_finite() || rho.value <= 0.0 {
            return Err(PropsError::NonPhysical {
                what: "density must be positive and finite",
            });
        }
        Ok(Self { rho })
    }
}

impl DensityModel for FixedDensity {
    fn name(&self) -> &str {
        "fixed"
    }

    fn density(
        &self,
        _p: Pressure,
        _t: Temperature,
        _molar_mass: f64,
        _z: f64,
    ) -> PropsResult<Density> {
        Ok(self.rho)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp_core::units::{k, pa};
    use gp_core::{Tolerances, nearly_equal};

    #[test]
    fn methane_at_standard_conditions() {
        // Ideal methane at 1 atm, 0 °C: ~0.716 kg/m³
        let rho = RealGasDensity
            .density(pa(101_325.0), k(273.15), 16.043, 1.0)
            .unwrap();
        assert!(rho.value > 0.70 && rho.value < 0.73, "rho = {}", rho.value);
    }

    #[test]
    fn density_scales_inversely_with_z() {
        let ideal = RealGasDensity
            .density(pa(7e6), k(288.15), 16.0, 1.0)
            .unwrap();
        let real = RealGasDensity
            .density(pa(7e6), k(288.15), 16.0, 0.8)
            .unwrap();
        let tol = Tolerances::default();
        assert!(nearly_equal(real.value, ideal.value / 0.8, tol));
    }

    #[test]
    fn rejects_degenerate_inputs() {
        assert!(RealGasDensity.density(pa(1.0), k(0.0), 16.0, 1.0).is_err());
        assert!(RealGasDensity.density(pa(1e5), k(300.0), 16.0, 0.0).is_err());
        assert!(RealGasDensity.density(pa(-1e5), k(300.0), 16.0, 1.0).is_err());
        assert!(
            RealGasDensity
                .density(pa(1e5), k(300.0), 16.0, f64::NAN)
                .is_err()
        );
    }

    #[test]
    fn fixed_density_ignores_state() {
        let model = FixedDensity::new(kg_per_m3(55.0)).unwrap();
        let rho = model.density(pa(1.0), k(0.0), 0.0, 0.0).unwrap();
        assert_eq!(rho.value, 55.0);
        assert!(FixedDensity::new(kg_per_m3(0.0)).is_err());
        assert!(FixedDensity::new(kg_per_m3(f64::INFINITY)).is_err());
    }
}
