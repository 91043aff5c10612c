//! Specific heat models.

use crate::error::{PropsError, PropsResult};
use crate::state::SpecHeatCapacity;
use gp_core::units::{Pressure, Temperature};

/// Specific heat at constant pressure at a given state.
pub trait HeatCapacityModel: Send + Sync {
    /// Model name (for debugging/logging).
    fn name(&self) -> &str;

    /// c_p [J/(kg·K)] at (p, t).
    fn cp(&self, p: Pressure, t: Temperature) -> PropsResult<SpecHeatCapacity>;
}

/// State-independent c_p.
///
/// The default value is a representative figure for natural gas and stands in
/// until a c_p correlation is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantHeatCapacity {
    cp: SpecHeatCapacity,
}

impl ConstantHeatCapacity {
    /// Default c_p [J/(kg·K)].
    pub const NATURAL_GAS: SpecHeatCapacity = 2314.0;

    pub fn new(cp: SpecHeatCapacity) -> PropsResult<Self> {
        if !cp.is_finite() || cp <= 0.0 {
            return Err(PropsError::NonPhysical {
                what: "cp must be positive and finite",
            });
        }
        Ok(Self { cp })
    }

    pub fn value(&self) -> SpecHeatCapacity {
        self.cp
    }
}

impl Default for ConstantHeatCapacity {
    fn default() -> Self {
        Self {
            cp: Self::NATURAL_GAS,
        }
    }
}

impl HeatCapacityModel for ConstantHeatCapacity {
    fn name(&self) -> &str {
        "constant"
    }

    fn cp(&self, _p: Pressure, _t: Temperature) -> PropsResult<SpecHeatCapacity> {
        Ok(self.cp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp_core::units::{k, pa};

    #[test]
    fn default_is_natural_gas_placeholder() {
        let model = ConstantHeatCapacity::default();
        assert_eq!(model.cp(pa(1.0), k(0.0)), Ok(2314.0));
        assert_eq!(model.value(), ConstantHeatCapacity::NATURAL_GAS);
    }

    #[test]
    fn rejects_non_physical_cp() {
        assert!(ConstantHeatCapacity::new(0.0).is_err());
        assert!(ConstantHeatCapacity::new(-100.0).is_err());
        assert!(ConstantHeatCapacity::new(f64::NAN).is_err());
        assert_eq!(ConstantHeatCapacity::new(2200.0).unwrap().value(), 2200.0);
    }
}
