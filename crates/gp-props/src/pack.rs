//! Snapshot of every derived property at one state.

use crate::state::SpecHeatCapacity;
use gp_core::units::{Density, Pressure, Temperature, Velocity};

/// All derived properties of a model, read at a single state.
///
/// Components that need several properties at the same point (e.g. a pipe
/// segment wanting density and wave speed) can take the pack instead of holding
/// on to the model.
#[derive(Clone, Debug, PartialEq)]
pub struct GasPropertyPack {
    /// Pressure [Pa]
    pub p: Pressure,

    /// Temperature [K]
    pub t: Temperature,

    /// Molar mass [g/mol]
    pub molar_mass: f64,

    /// Compressibility factor (dimensionless)
    pub z: f64,

    /// ∂Z/∂p [1/Pa]
    pub dz_dp: f64,

    /// ∂Z/∂T [1/K]
    pub dz_dt: f64,

    /// Specific heat capacity at constant pressure [J/(kg·K)]
    pub cp: SpecHeatCapacity,

    /// Density [kg/m³]
    pub rho: Density,

    /// Speed of sound [m/s]
    pub a: Velocity,
}

impl GasPropertyPack {
    /// Return a summary string of all contained properties (for debugging).
    pub fn summary(&self) -> String {
        format!(
            "Pack(P={:.0}Pa,T={:.2}K,M={:.3}g/mol,Z={:.5},dZ/dp={:.3e}/Pa,dZ/dT={:.3e}/K,cp={:.1}J/kg·K,ρ={:.3}kg/m³,a={:.1}m/s)",
            self.p.value,
            self.t.value,
            self.molar_mass,
            self.z,
            self.dz_dp,
            self.dz_dt,
            self.cp,
            self.rho.value,
            self.a.value
        )
    }
}
