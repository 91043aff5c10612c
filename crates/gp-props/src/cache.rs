//! Lazy, memoized derived values with coarse invalidation.
//!
//! A [`Cached`] slot computes its value on the first read and serves the stored
//! value until it is invalidated. [`DerivedCache`] groups one slot per
//! [`DerivedProperty`]; any change to an independent variable clears all of them
//! at once through [`DerivedCache::invalidate_all`]. There is no per-property
//! dependency tracking.
//!
//! Slots are backed by [`OnceLock`], so reads only need `&self` and a model
//! holding a `DerivedCache` stays `Send + Sync`. Two threads racing on the first
//! read of an empty slot may both run the computation, but only one result is
//! stored and both callers get that stored value back. Invalidation needs
//! `&mut self` and therefore never overlaps a read.

use gp_core::units::{Density, Velocity};
use std::fmt;
use std::sync::OnceLock;

/// A single lazily computed, memoized value.
#[derive(Debug, Clone)]
pub struct Cached<T> {
    slot: OnceLock<T>,
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Cached<T> {
    /// Create an empty slot.
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Stored value, if any. Never computes.
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    pub fn is_cached(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Return the stored value, or run `compute` once and store its result.
    ///
    /// Errors from `compute` are returned unchanged and leave the slot empty, so
    /// the next read runs `compute` again.
    pub fn get_or_try_compute<E, F>(&self, compute: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.slot.get() {
            return Ok(value);
        }
        let value = compute()?;
        // If another reader stored first, its value wins and ours is dropped.
        Ok(self.slot.get_or_init(|| value))
    }

    /// Drop the stored value, returning it.
    pub fn invalidate(&mut self) -> Option<T> {
        self.slot.take()
    }
}

/// Derived properties memoized by a property model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivedProperty {
    /// Compressibility factor Z.
    Z,
    /// ∂Z/∂p [1/Pa].
    DzDp,
    /// ∂Z/∂T [1/K].
    DzDt,
    /// Specific heat at constant pressure [J/(kg·K)].
    SpecificHeat,
    /// Density [kg/m³].
    Density,
    /// Speed of sound [m/s].
    SpeedOfSound,
}

impl DerivedProperty {
    pub const ALL: [DerivedProperty; 6] = [
        DerivedProperty::Z,
        DerivedProperty::DzDp,
        DerivedProperty::DzDt,
        DerivedProperty::SpecificHeat,
        DerivedProperty::Density,
        DerivedProperty::SpeedOfSound,
    ];

    /// Stable key used in logs and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Z => "z",
            Self::DzDp => "dz_dp",
            Self::DzDt => "dz_dt",
            Self::SpecificHeat => "c_p",
            Self::Density => "rho",
            Self::SpeedOfSound => "v_w",
        }
    }
}

impl fmt::Display for DerivedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One slot per [`DerivedProperty`], known at compile time.
#[derive(Debug, Clone, Default)]
pub struct DerivedCache {
    pub z: Cached<f64>,
    pub dz_dp: Cached<f64>,
    pub dz_dt: Cached<f64>,
    pub c_p: Cached<f64>,
    pub rho: Cached<Density>,
    pub v_w: Cached<Velocity>,
}

impl DerivedCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cached(&self, prop: DerivedProperty) -> bool {
        match prop {
            DerivedProperty::Z => self.z.is_cached(),
            DerivedProperty::DzDp => self.dz_dp.is_cached(),
            DerivedProperty::DzDt => self.dz_dt.is_cached(),
            DerivedProperty::SpecificHeat => self.c_p.is_cached(),
            DerivedProperty::Density => self.rho.is_cached(),
            DerivedProperty::SpeedOfSound => self.v_w.is_cached(),
        }
    }

    /// Number of slots currently holding a value.
    pub fn cached_count(&self) -> usize {
        DerivedProperty::ALL
            .iter()
            .filter(|&&prop| self.is_cached(prop))
            .count()
    }

    /// Clear every slot. Returns how many values were evicted.
    pub fn invalidate_all(&mut self) -> usize {
        let evicted = [
            self.z.invalidate().is_some(),
            self.dz_dp.invalidate().is_some(),
            self.dz_dt.invalidate().is_some(),
            self.c_p.invalidate().is_some(),
            self.rho.invalidate().is_some(),
            self.v_w.invalidate().is_some(),
        ]
        .into_iter()
        .filter(|&was_cached| was_cached)
        .count();

        if evicted > 0 {
            tracing::debug!(evicted, "invalidated derived property cache");
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp_core::units::{kg_per_m3, mps};
    use std::cell::Cell;

    #[test]
    fn computes_once_between_invalidations() {
        let calls = Cell::new(0);
        let slot: Cached<f64> = Cached::new();

        let compute = || {
            calls.set(calls.get() + 1);
            Ok::<_, ()>(0.1 + 0.2)
        };

        let first = *slot.get_or_try_compute(compute).unwrap();
        let second = *slot.get_or_try_compute(compute).unwrap();

        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn errors_are_not_cached() {
        let calls = Cell::new(0);
        let slot: Cached<f64> = Cached::new();

        let failing = slot.get_or_try_compute(|| {
            calls.set(calls.get() + 1);
            Err("lookup failed")
        });
        assert_eq!(failing, Err("lookup failed"));
        assert!(!slot.is_cached());

        let value = slot.get_or_try_compute(|| {
            calls.set(calls.get() + 1);
            Ok::<_, &str>(0.93)
        });
        assert_eq!(value, Ok(&0.93));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn invalidate_forces_recompute() {
        let mut slot: Cached<u32> = Cached::new();
        assert_eq!(slot.get_or_try_compute(|| Ok::<_, ()>(1)), Ok(&1));
        assert_eq!(slot.invalidate(), Some(1));
        assert_eq!(slot.get(), None);
        assert_eq!(slot.get_or_try_compute(|| Ok::<_, ()>(2)), Ok(&2));
    }

    #[test]
    fn invalidate_all_clears_every_slot() {
        let mut cache = DerivedCache::new();
        assert_eq!(cache.cached_count(), 0);

        cache.z.get_or_try_compute(|| Ok::<_, ()>(0.9)).unwrap();
        cache.c_p.get_or_try_compute(|| Ok::<_, ()>(2314.0)).unwrap();
        cache.rho.get_or_try_compute(|| Ok::<_, ()>(kg_per_m3(40.0))).unwrap();
        cache.v_w.get_or_try_compute(|| Ok::<_, ()>(mps(400.0))).unwrap();

        assert!(cache.is_cached(DerivedProperty::Z));
        assert!(!cache.is_cached(DerivedProperty::DzDp));
        assert_eq!(cache.cached_count(), 4);

        assert_eq!(cache.invalidate_all(), 4);
        assert_eq!(cache.cached_count(), 0);
        assert_eq!(cache.invalidate_all(), 0);
    }

    #[test]
    fn property_names_are_unique() {
        let mut names: Vec<_> = DerivedProperty::ALL.iter().map(|p| p.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), DerivedProperty::ALL.len());
        assert_eq!(DerivedProperty::SpeedOfSound.to_string(), "v_w");
    }

    #[test]
    fn concurrent_first_reads_agree() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let slot: Cached<usize> = Cached::new();
        let calls = AtomicUsize::new(0);

        let (slot_ref, calls_ref) = (&slot, &calls);
        let seen: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(move || {
                        *slot_ref
                            .get_or_try_compute(|| {
                                Ok::<_, ()>(calls_ref.fetch_add(1, Ordering::SeqCst))
                            })
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let stored = *slot.get().unwrap();
        assert!(seen.iter().all(|&v| v == stored));
        assert!(calls.load(Ordering::SeqCst) >= 1);
    }
}
