//! Gas property model: state, memoized derived properties, speed of sound.

use crate::cache::{Cached, DerivedCache, DerivedProperty};
use crate::config::{DensityConfig, GasModelConfig};
use crate::correlation::{CompressibilityCorrelation, Derivative, IdealGasCorrelation};
use crate::density::{DensityModel, FixedDensity, RealGasDensity};
use crate::error::{PropsError, PropsResult};
use crate::heat_capacity::{ConstantHeatCapacity, HeatCapacityModel};
use crate::pack::GasPropertyPack;
use crate::state::{GasState, SpecHeatCapacity};
use gp_core::units::constants::{G_PER_KG, PA_PER_BAR, R_UNIVERSAL};
use gp_core::units::{Density, Pressure, Temperature, Velocity, k, kg_per_m3, mps, pa};
use std::fmt;
use std::sync::Arc;

/// Thermodynamic and acoustic properties of a natural-gas-like fluid.
///
/// Holds the independent variables (pressure, temperature, molar mass) and
/// computes derived properties on demand. Every derived property is computed
/// at most once per state: the first read stores the value, later reads return
/// it unchanged, and any setter call clears all stored values.
///
/// Collaborators are shared handles, so one correlation (typically an expensive
/// interpolation table) can serve many models.
///
/// # Example
///
/// ```
/// use gp_core::units::{k, pa};
/// use gp_props::PropertyModel;
///
/// let mut gas = PropertyModel::new();
/// gas.set_state(pa(5e5), k(300.0));
/// let a = gas.speed_of_sound().unwrap();
/// assert!(a.value > 400.0 && a.value < 500.0);
/// ```
pub struct PropertyModel {
    state: GasState,
    correlation: Arc<dyn CompressibilityCorrelation>,
    density_model: Arc<dyn DensityModel>,
    heat_capacity: Arc<dyn HeatCapacityModel>,
    cache: DerivedCache,
}

impl Default for PropertyModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PropertyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyModel")
            .field("state", &self.state)
            .field("correlation", &self.correlation.name())
            .field("density_model", &self.density_model.name())
            .field("heat_capacity", &self.heat_capacity.name())
            .field("cached", &self.cache.cached_count())
            .finish()
    }
}

impl PropertyModel {
    /// Model at 1 Pa, 0 K, 16 g/mol with the ideal-gas correlation, real-gas
    /// density law and constant c_p.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Model with the default state and an injected correlation.
    pub fn with_correlation(correlation: Arc<dyn CompressibilityCorrelation>) -> Self {
        Self::builder().correlation(correlation).build()
    }

    pub fn builder() -> PropertyModelBuilder {
        PropertyModelBuilder::new()
    }

    /// Build from configuration, using the default ideal-gas correlation.
    pub fn from_config(config: &GasModelConfig) -> PropsResult<Self> {
        Ok(PropertyModelBuilder::from_config(config)?.build())
    }

    // --- independent variables -------------------------------------------------

    pub fn pressure(&self) -> Pressure {
        self.state.p
    }

    pub fn temperature(&self) -> Temperature {
        self.state.t
    }

    /// Molar mass [g/mol].
    pub fn molar_mass(&self) -> f64 {
        self.state.molar_mass
    }

    pub fn state(&self) -> GasState {
        self.state
    }

    /// Set pressure and invalidate every derived property, even if unchanged.
    pub fn set_pressure(&mut self, p: Pressure) {
        self.state.p = p;
        self.invalidate("pressure");
    }

    /// Set temperature and invalidate every derived property, even if unchanged.
    pub fn set_temperature(&mut self, t: Temperature) {
        self.state.t = t;
        self.invalidate("temperature");
    }

    /// Set pressure and temperature together (one invalidation).
    pub fn set_state(&mut self, p: Pressure, t: Temperature) {
        self.state.p = p;
        self.state.t = t;
        self.invalidate("state");
    }

    /// Set molar mass [g/mol] and invalidate every derived property.
    ///
    /// Density and speed of sound depend on molar mass, so this invalidates
    /// just like the pressure and temperature setters.
    pub fn set_molar_mass(&mut self, molar_mass: f64) {
        self.state.molar_mass = molar_mass;
        self.invalidate("molar_mass");
    }

    fn invalidate(&mut self, changed: &'static str) {
        let evicted = self.cache.invalidate_all();
        tracing::trace!(changed, evicted, "state changed");
    }

    // --- collaborators and cache inspection ------------------------------------

    pub fn correlation(&self) -> &Arc<dyn CompressibilityCorrelation> {
        &self.correlation
    }

    pub fn density_model(&self) -> &Arc<dyn DensityModel> {
        &self.density_model
    }

    pub fn heat_capacity_model(&self) -> &Arc<dyn HeatCapacityModel> {
        &self.heat_capacity
    }

    /// Whether `prop` currently holds a stored value.
    pub fn is_cached(&self, prop: DerivedProperty) -> bool {
        self.cache.is_cached(prop)
    }

    pub fn cache(&self) -> &DerivedCache {
        &self.cache
    }

    // --- derived properties ----------------------------------------------------

    /// Compressibility factor Z (dimensionless).
    pub fn z(&self) -> PropsResult<f64> {
        read_cached(&self.cache.z, DerivedProperty::Z, || {
            self.lookup(Derivative::None)
        })
    }

    /// ∂Z/∂p [1/Pa].
    ///
    /// The correlation differentiates with respect to bar, so the raw value is
    /// divided by 1e5.
    pub fn dz_dp(&self) -> PropsResult<f64> {
        read_cached(&self.cache.dz_dp, DerivedProperty::DzDp, || {
            Ok(self.lookup(Derivative::Pressure)? / PA_PER_BAR)
        })
    }

    /// ∂Z/∂T [1/K].
    ///
    /// A kelvin step equals a Celsius step, so the raw value is returned as is.
    pub fn dz_dt(&self) -> PropsResult<f64> {
        read_cached(&self.cache.dz_dt, DerivedProperty::DzDt, || {
            self.lookup(Derivative::Temperature)
        })
    }

    /// Specific heat at constant pressure [J/(kg·K)].
    pub fn cp(&self) -> PropsResult<SpecHeatCapacity> {
        read_cached(&self.cache.c_p, DerivedProperty::SpecificHeat, || {
            self.heat_capacity.cp(self.state.p, self.state.t)
        })
    }

    /// Density [kg/m³] from the density model at the current Z.
    pub fn rho(&self) -> PropsResult<Density> {
        read_cached(&self.cache.rho, DerivedProperty::Density, || {
            let z = self.z()?;
            self.density_model
                .density(self.state.p, self.state.t, self.state.molar_mass, z)
        })
    }

    /// Speed of sound [m/s] of the real gas.
    ///
    /// ```text
    /// v_w = sqrt( Z·R·T/M / (1 − (P/Z)·∂Z/∂p − P/(ρ·c_p·T)·(1 + (T/Z)·∂Z/∂T)²) )
    /// ```
    ///
    /// Fails with [`PropsError::Domain`] when the expression degenerates (zero Z,
    /// zero denominator, non-positive square-root argument) or when the density
    /// model rejects the state as non-physical.
    pub fn speed_of_sound(&self) -> PropsResult<Velocity> {
        read_cached(&self.cache.v_w, DerivedProperty::SpeedOfSound, || {
            let z = self.z()?;
            if !z.is_finite() || z == 0.0 {
                return Err(domain_error(format!("compressibility factor Z = {z}")));
            }
            let inputs = SoundSpeedInputs {
                p: self.state.p.value,
                t: self.state.t.value,
                molar_mass: self.state.molar_mass,
                z,
                dz_dp: self.dz_dp()?,
                dz_dt: self.dz_dt()?,
                rho: self.rho().map_err(|e| match e {
                    PropsError::NonPhysical { what } => {
                        domain_error(format!("density undefined: {what}"))
                    }
                    other => other,
                })?
                .value,
                cp: self.cp()?,
            };
            real_gas_speed_of_sound(&inputs).map(mps)
        })
    }

    /// Read every derived property into a single snapshot.
    pub fn property_pack(&self) -> PropsResult<GasPropertyPack> {
        Ok(GasPropertyPack {
            p: self.state.p,
            t: self.state.t,
            molar_mass: self.state.molar_mass,
            z: self.z()?,
            dz_dp: self.dz_dp()?,
            dz_dt: self.dz_dt()?,
            cp: self.cp()?,
            rho: self.rho()?,
            a: self.speed_of_sound()?,
        })
    }

    fn lookup(&self, derivative: Derivative) -> PropsResult<f64> {
        let (p_barg, t_c) = self.state.correlation_inputs();
        let value = self.correlation.lookup(p_barg, t_c, derivative)?;
        tracing::debug!(
            correlation = self.correlation.name(),
            %derivative,
            p_barg,
            t_c,
            value,
            "correlation lookup"
        );
        Ok(value)
    }
}

fn read_cached<T, F>(slot: &Cached<T>, prop: DerivedProperty, compute: F) -> PropsResult<T>
where
    T: Copy + fmt::Debug,
    F: FnOnce() -> PropsResult<T>,
{
    if let Some(value) = slot.get() {
        tracing::trace!(property = %prop, "cache hit");
        return Ok(*value);
    }
    let value = *slot.get_or_try_compute(compute)?;
    tracing::debug!(property = %prop, ?value, "computed derived property");
    Ok(value)
}

fn domain_error(detail: String) -> PropsError {
    tracing::warn!(%detail, "speed of sound undefined at current state");
    PropsError::Domain {
        what: "speed of sound",
        detail,
    }
}

/// Raw SI inputs to the real-gas speed-of-sound relation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundSpeedInputs {
    /// Pressure [Pa]
    pub p: f64,
    /// Temperature [K]
    pub t: f64,
    /// Molar mass [g/mol]
    pub molar_mass: f64,
    /// Compressibility factor
    pub z: f64,
    /// ∂Z/∂p [1/Pa]
    pub dz_dp: f64,
    /// ∂Z/∂T [1/K]
    pub dz_dt: f64,
    /// Density [kg/m³]
    pub rho: f64,
    /// Specific heat at constant pressure [J/(kg·K)]
    pub cp: f64,
}

/// Speed of sound [m/s] of a real gas described by Z and its derivatives.
///
/// Generalizes the ideal-gas `sqrt(γ·R·T/M)`: with Z = 1, zero derivatives and
/// ρ = P·M/(R·T) the denominator reduces to `1 − R/(M·c_p) = 1/γ`.
pub fn real_gas_speed_of_sound(inputs: &SoundSpeedInputs) -> PropsResult<f64> {
    let SoundSpeedInputs {
        p,
        t,
        molar_mass,
        z,
        dz_dp,
        dz_dt,
        rho,
        cp,
    } = *inputs;

    if !z.is_finite() || z == 0.0 {
        return Err(domain_error(format!("compressibility factor Z = {z}")));
    }
    let molar_mass_kg = molar_mass / G_PER_KG;
    if !molar_mass_kg.is_finite() || molar_mass_kg <= 0.0 {
        return Err(domain_error(format!("molar mass M = {molar_mass} g/mol")));
    }

    let numerator = z * R_UNIVERSAL * t / molar_mass_kg;
    let thermal = 1.0 + t / z * dz_dt;
    let denominator = 1.0 - p / z * dz_dp - p / (rho * cp * t) * thermal * thermal;
    if !denominator.is_finite() || denominator == 0.0 {
        return Err(domain_error(format!("denominator = {denominator}")));
    }

    let arg = numerator / denominator;
    if !arg.is_finite() || arg <= 0.0 {
        return Err(domain_error(format!("square-root argument = {arg}")));
    }
    Ok(arg.sqrt())
}

/// Builder for [`PropertyModel`].
///
/// Unset collaborators fall back to [`IdealGasCorrelation`], [`RealGasDensity`]
/// and [`ConstantHeatCapacity::default`].
#[derive(Default)]
pub struct PropertyModelBuilder {
    state: GasState,
    correlation: Option<Arc<dyn CompressibilityCorrelation>>,
    density_model: Option<Arc<dyn DensityModel>>,
    heat_capacity: Option<Arc<dyn HeatCapacityModel>>,
}

impl PropertyModelBuilder {
    /// Create a builder with the default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preloaded from configuration. Validates the configuration.
    pub fn from_config(config: &GasModelConfig) -> PropsResult<Self> {
        config.validate()?;
        let density_model: Arc<dyn DensityModel> = match config.density {
            DensityConfig::RealGasLaw => Arc::new(RealGasDensity),
            DensityConfig::Fixed { kg_per_m3: rho } => {
                Arc::new(FixedDensity::new(kg_per_m3(rho))?)
            }
        };
        let heat_capacity = ConstantHeatCapacity::new(config.specific_heat_j_kg_k)?;

        Ok(Self::new()
            .pressure(pa(config.pressure_pa))
            .temperature(k(config.temperature_k))
            .molar_mass(config.molar_mass_g_mol)
            .density_model(density_model)
            .heat_capacity(Arc::new(heat_capacity)))
    }

    pub fn pressure(mut self, p: Pressure) -> Self {
        self.state.p = p;
        self
    }

    pub fn temperature(mut self, t: Temperature) -> Self {
        self.state.t = t;
        self
    }

    /// Molar mass [g/mol].
    pub fn molar_mass(mut self, molar_mass: f64) -> Self {
        self.state.molar_mass = molar_mass;
        self
    }

    pub fn correlation(mut self, correlation: Arc<dyn CompressibilityCorrelation>) -> Self {
        self.correlation = Some(correlation);
        self
    }

    pub fn density_model(mut self, density_model: Arc<dyn DensityModel>) -> Self {
        self.density_model = Some(density_model);
        self
    }

    pub fn heat_capacity(mut self, heat_capacity: Arc<dyn HeatCapacityModel>) -> Self {
        self.heat_capacity = Some(heat_capacity);
        self
    }

    pub fn build(self) -> PropertyModel {
        PropertyModel {
            state: self.state,
            correlation: self
                .correlation
                .unwrap_or_else(|| Arc::new(IdealGasCorrelation)),
            density_model: self
                .density_model
                .unwrap_or_else(|| Arc::new(RealGasDensity)),
            heat_capacity: self
                .heat_capacity
                .unwrap_or_else(|| Arc::new(ConstantHeatCapacity::default())),
            cache: DerivedCache::new(),
        }
    }
}
