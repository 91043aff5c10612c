//! Compressibility-factor correlation providers.
//!
//! The property model never evaluates Z itself. It asks a
//! [`CompressibilityCorrelation`] for Z or one of its partial derivatives at a
//! state given in the correlation's own input convention: pressure in bar-gauge
//! (`P[Pa] / 1e5`) and temperature in degrees Celsius. Interpolation tables and
//! fitted correlations live behind this trait.

use crate::error::PropsResult;
use std::fmt;

/// Which quantity a correlation lookup returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Derivative {
    /// Z itself.
    None,
    /// ∂Z/∂p, per bar.
    Pressure,
    /// ∂Z/∂T, per °C (equal to per K).
    Temperature,
}

impl fmt::Display for Derivative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "Z"),
            Self::Pressure => write!(f, "dZ/dp"),
            Self::Temperature => write!(f, "dZ/dT"),
        }
    }
}

/// Lookup of the compressibility factor and its partial derivatives.
///
/// Implementations must be thread-safe (Send + Sync) since one provider is
/// typically shared by many models.
pub trait CompressibilityCorrelation: Send + Sync {
    /// Provider name (for debugging/logging).
    fn name(&self) -> &str;

    /// Evaluate Z or one of its partial derivatives.
    ///
    /// # Arguments
    /// * `p_barg` - Pressure in bar-gauge
    /// * `t_c` - Temperature in °C
    /// * `derivative` - Selects Z, ∂Z/∂p (per bar) or ∂Z/∂T (per °C)
    fn lookup(&self, p_barg: f64, t_c: f64, derivative: Derivative) -> PropsResult<f64>;
}

/// Ideal gas: Z = 1 everywhere, both derivatives zero.
///
/// Used when no real correlation is injected.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdealGasCorrelation;

impl CompressibilityCorrelation for IdealGasCorrelation {
    fn name(&self) -> &str {
        "ideal-gas"
    }

    fn lookup(&self, _p_barg: f64, _t_c: f64, derivative: Derivative) -> PropsResult<f64> {
        Ok(match derivative {
            Derivative::None => 1.0,
            Derivative::Pressure | Derivative::Temperature => 0.0,
        })
    }
}

/// Adapter turning a closure into a correlation provider.
///
/// Handy for fitted expressions and for wiring an external table's lookup
/// function without a dedicated type.
pub struct FnCorrelation<F> {
    name: String,
    lookup: F,
}

impl<F> FnCorrelation<F>
where
    F: Fn(f64, f64, Derivative) -> PropsResult<f64> + Send + Sync,
{
    pub fn new(name: impl Into<String>, lookup: F) -> Self {
        Self {
            name: name.into(),
            lookup,
        }
    }
}

impl<F> fmt::Debug for FnCorrelation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCorrelation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F> CompressibilityCorrelation for FnCorrelation<F>
where
    F: Fn(f64, f64, Derivative) -> PropsResult<f64> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, p_barg: f64, t_c: f64, derivative: Derivative) -> PropsResult<f64> {
        (self.lookup)(p_barg, t_c, derivative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PropsError;

    #[test]
    fn ideal_gas_is_unity() {
        let corr = IdealGasCorrelation;
        assert_eq!(corr.lookup(70.0, 15.0, Derivative::None), Ok(1.0));
        assert_eq!(corr.lookup(70.0, 15.0, Derivative::Pressure), Ok(0.0));
        assert_eq!(corr.lookup(70.0, 15.0, Derivative::Temperature), Ok(0.0));
        assert_eq!(corr.name(), "ideal-gas");
    }

    #[test]
    fn fn_correlation_forwards_arguments() {
        // Linear in pressure: Z = 1 - 0.002 * p_barg
        let corr = FnCorrelation::new("linear", |p, _t, d| match d {
            Derivative::None => Ok(1.0 - 0.002 * p),
            Derivative::Pressure => Ok(-0.002),
            Derivative::Temperature => Ok(0.0),
        });

        assert_eq!(corr.name(), "linear");
        assert_eq!(corr.lookup(50.0, 10.0, Derivative::None), Ok(0.9));
        assert_eq!(corr.lookup(50.0, 10.0, Derivative::Pressure), Ok(-0.002));
        assert!(format!("{corr:?}").contains("linear"));
    }

    #[test]
    fn fn_correlation_propagates_errors() {
        let corr = FnCorrelation::new("bounded", |p, _t, _d| {
            if p > 100.0 {
                Err(PropsError::OutOfRange { what: "pressure" })
            } else {
                Ok(1.0)
            }
        });
        assert_eq!(
            corr.lookup(150.0, 0.0, Derivative::None),
            Err(PropsError::OutOfRange { what: "pressure" })
        );
    }

    #[test]
    fn derivative_display() {
        assert_eq!(Derivative::None.to_string(), "Z");
        assert_eq!(Derivative::Pressure.to_string(), "dZ/dp");
        assert_eq!(Derivative::Temperature.to_string(), "dZ/dT");
    }
}
