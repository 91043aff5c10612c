//! Independent state variables of a gas property model.

use gp_core::units::{Pressure, Temperature, k, pa, to_bar_gauge, to_celsius};

/// Specific heat capacity [J/(kg·K)].
pub type SpecHeatCapacity = f64;

/// Pressure, temperature and molar mass at which derived properties are evaluated.
///
/// No validation happens here: the model's initial state (1 Pa, 0 K) is itself
/// outside the range where every derived property exists. Degenerate states are
/// reported when a property that cannot be evaluated there is read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasState {
    pub p: Pressure,
    pub t: Temperature,
    /// Molar mass [g/mol]
    pub molar_mass: f64,
}

impl GasState {
    /// Default pressure [Pa].
    pub const DEFAULT_PRESSURE_PA: f64 = 1.0;
    /// Default temperature [K].
    pub const DEFAULT_TEMPERATURE_K: f64 = 0.0;
    /// Default molar mass [g/mol] (methane, rounded).
    pub const DEFAULT_MOLAR_MASS: f64 = 16.0;

    pub fn new(p: Pressure, t: Temperature, molar_mass: f64) -> Self {
        Self { p, t, molar_mass }
    }

    /// Inputs in the correlation's convention: (bar-gauge, °C).
    pub fn correlation_inputs(&self) -> (f64, f64) {
        (to_bar_gauge(self.p), to_celsius(self.t))
    }
}

impl Default for GasState {
    fn default() -> Self {
        Self {
            p: pa(Self::DEFAULT_PRESSURE_PA),
            t: k(Self::DEFAULT_TEMPERATURE_K),
            molar_mass: Self::DEFAULT_MOLAR_MASS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state() {
        let state = GasState::default();
        assert_eq!(state.p.value, 1.0);
        assert_eq!(state.t.value, 0.0);
        assert_eq!(state.molar_mass, 16.0);
        assert_eq!(state.correlation_inputs(), (1e-5, -273.15));
    }

    #[test]
    fn correlation_inputs_convert_units() {
        let state = GasState::new(pa(5e5), k(300.0), 17.4);
        let (p_barg, t_c) = state.correlation_inputs();
        assert_eq!(p_barg, 5.0);
        assert!((t_c - 26.85).abs() < 1e-12);
    }
}
