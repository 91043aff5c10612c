//! YAML configuration for property models.
//!
//! ```yaml
//! pressure_pa: 7.0e6
//! temperature_k: 288.15
//! molar_mass_g_mol: 17.4
//! specific_heat_j_kg_k: 2314.0
//! density:
//!   model: fixed
//!   kg_per_m3: 58.0
//! ```
//!
//! Every field is optional; omitted fields take the model defaults.

use crate::error::{PropsError, PropsResult};
use crate::heat_capacity::ConstantHeatCapacity;
use crate::state::GasState;
use gp_core::{CoreError, ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};

/// Initial state and collaborator settings for a [`PropertyModel`](crate::PropertyModel).
///
/// The compressibility correlation is not configurable here; it is injected in code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GasModelConfig {
    #[serde(default = "default_pressure_pa")]
    pub pressure_pa: f64,
    #[serde(default = "default_temperature_k")]
    pub temperature_k: f64,
    #[serde(default = "default_molar_mass")]
    pub molar_mass_g_mol: f64,
    #[serde(default = "default_specific_heat")]
    pub specific_heat_j_kg_k: f64,
    #[serde(default)]
    pub density: DensityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum DensityConfig {
    /// ρ = P·M / (Z·R·T)
    #[default]
    RealGasLaw,
    Fixed {
        kg_per_m3: f64,
    },
}

fn default_pressure_pa() -> f64 {
    GasState::DEFAULT_PRESSURE_PA
}

fn default_temperature_k() -> f64 {
    GasState::DEFAULT_TEMPERATURE_K
}

fn default_molar_mass() -> f64 {
    GasState::DEFAULT_MOLAR_MASS
}

fn default_specific_heat() -> f64 {
    ConstantHeatCapacity::NATURAL_GAS
}

impl Default for GasModelConfig {
    fn default() -> Self {
        Self {
            pressure_pa: default_pressure_pa(),
            temperature_k: default_temperature_k(),
            molar_mass_g_mol: default_molar_mass(),
            specific_heat_j_kg_k: default_specific_heat(),
            density: DensityConfig::default(),
        }
    }
}

impl GasModelConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> PropsResult<Self> {
        let config: GasModelConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> PropsResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values no model could be built from.
    ///
    /// Pressure and temperature only need to be finite, matching what the
    /// model's setters accept. Every failure is reported as [`PropsError::Config`].
    pub fn validate(&self) -> PropsResult<()> {
        self.check_values().map_err(|e| PropsError::Config {
            message: e.to_string(),
        })
    }

    fn check_values(&self) -> Result<(), CoreError> {
        ensure_finite(self.pressure_pa, "pressure_pa")?;
        ensure_finite(self.temperature_k, "temperature_k")?;
        ensure_positive(self.molar_mass_g_mol, "molar_mass_g_mol")?;
        ensure_positive(self.specific_heat_j_kg_k, "specific_heat_j_kg_k")?;
        if let DensityConfig::Fixed { kg_per_m3 } = self.density {
            ensure_positive(kg_per_m3, "density.kg_per_m3")?;
        }
        Ok(())
    }
}
