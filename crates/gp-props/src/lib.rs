//! gp-props: cached gas properties for pipeline network models.
//!
//! Provides:
//! - Lazy, memoized derived values with coarse invalidation (`cache`)
//! - Compressibility-factor correlation interface (`CompressibilityCorrelation`)
//! - Pluggable density and specific heat models
//! - `PropertyModel`: Z, ∂Z/∂p, ∂Z/∂T, c_p, ρ and real-gas speed of sound
//!
//! # Architecture
//!
//! `PropertyModel` owns the independent variables (pressure, temperature, molar
//! mass) and a `DerivedCache`. Writing any independent variable clears the whole
//! cache; reading a derived property computes it once and stores it. Every
//! collaborator is an `Arc<dyn Trait>` so expensive providers, such as an
//! interpolated Z table, can be shared between models.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use gp_core::units::{k, pa};
//! use gp_props::{Derivative, FnCorrelation, PropertyModel};
//!
//! let corr = FnCorrelation::new("linear", |p_barg, _t_c, d| match d {
//!     Derivative::None => Ok(1.0 - 0.002 * p_barg),
//!     Derivative::Pressure => Ok(-0.002),
//!     Derivative::Temperature => Ok(0.0),
//! });
//!
//! let mut gas = PropertyModel::with_correlation(Arc::new(corr));
//! gas.set_state(pa(50e5), k(288.15));
//!
//! let z = gas.z().unwrap();
//! let a = gas.speed_of_sound().unwrap();
//! println!("Z = {z:.4}, a = {:.1} m/s", a.value);
//! ```

pub mod cache;
pub mod config;
pub mod correlation;
pub mod density;
pub mod error;
pub mod heat_capacity;
pub mod model;
pub mod pack;
pub mod state;

// Re-exports for ergonomics
pub use cache::{Cached, DerivedCache, DerivedProperty};
pub use config::{DensityConfig, GasModelConfig};
pub use correlation::{CompressibilityCorrelation, Derivative, FnCorrelation, IdealGasCorrelation};
pub use density::{DensityModel, FixedDensity, RealGasDensity};
pub use error::{PropsError, PropsResult};
pub use heat_capacity::{ConstantHeatCapacity, HeatCapacityModel};
pub use model::{PropertyModel, PropertyModelBuilder, SoundSpeedInputs, real_gas_speed_of_sound};
pub use pack::GasPropertyPack;
pub use state::{GasState, SpecHeatCapacity};
