use crate::rrt::state::RealVectorState;
use num_traits::Float;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use thiserror::Error;

/// Errors raised when building a sampling distribution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplingError {
    #[error("range for dimension {dimension} is not finite")]
    NonFiniteRange { dimension: usize },
    #[error("range for dimension {dimension} is empty (low must be less than high)")]
    EmptyRange { dimension: usize },
}

/// A distribution from which configurations are drawn.
pub trait SamplingDistribution<F: Float, const N: usize> {
    /// Draws one configuration.
    fn sample(&mut self) -> RealVectorState<F, N>;
}

/// Checks that every `(low, high)` pair is finite and non-empty.
pub fn validate_ranges<F: Float, const N: usize>(
    ranges: &[(F, F); N],
) -> Result<(), SamplingError> {
    for (dimension, &(low, high)) in ranges.iter().enumerate() {
        if !low.is_finite() || !high.is_finite() {
            return Err(SamplingError::NonFiniteRange { dimension });
        }
        if low >= high {
            return Err(SamplingError::EmptyRange { dimension });
        }
    }
    Ok(())
}

/// Maps a unit draw `u` in `[0, 1)` onto `[low, high)`.
pub(crate) fn lerp_unit<F: Float>(low: F, high: F, u: f64) -> F {
    let u = F::from(u).unwrap_or_else(F::zero);
    low + (high - low) * u
}

/// Draws a configuration uniformly from an axis-aligned box using the given generator.
pub(crate) fn sample_box<F: Float, const N: usize>(
    ranges: &[(F, F); N],
    rng: &mut dyn RngCore,
) -> RealVectorState<F, N> {
    let mut values = [F::zero(); N];
    for (value, &(low, high)) in values.iter_mut().zip(ranges.iter()) {
        *value = lerp_unit(low, high, rng.gen::<f64>());
    }
    RealVectorState::new(values)
}

/// Uniform distribution over an axis-aligned box.
pub struct UniformDistribution<F: Float, const N: usize> {
    ranges: [(F, F); N],
    rng: StdRng,
}

impl<F: Float, const N: usize> UniformDistribution<F, N> {
    /// Constructs a uniform distribution seeded from system entropy.
    ///
    /// Parameters:
    /// - `ranges`: The `(low, high)` range of each dimension.
    pub fn new(ranges: [(F, F); N]) -> Result<Self, SamplingError> {
        validate_ranges(&ranges)?;
        Ok(Self {
            ranges,
            rng: StdRng::from_entropy(),
        })
    }

    /// Constructs a uniform distribution whose draws are fully determined by `seed`.
    pub fn with_seed(ranges: [(F, F); N], seed: u64) -> Result<Self, SamplingError> {
        validate_ranges(&ranges)?;
        Ok(Self {
            ranges,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub(crate) fn from_parts(ranges: [(F, F); N], rng: StdRng) -> Self {
        Self { ranges, rng }
    }

    pub fn ranges(&self) -> &[(F, F); N] {
        &self.ranges
    }
}

impl<F: Float, const N: usize> SamplingDistribution<F, N> for UniformDistribution<F, N> {
    fn sample(&mut self) -> RealVectorState<F, N> {
        sample_box(&self.ranges, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_ranges() {
        assert_eq!(
            UniformDistribution::new([(0.0, 1.0), (2.0, 2.0)]).err(),
            Some(SamplingError::EmptyRange { dimension: 1 })
        );
        assert_eq!(
            UniformDistribution::new([(f64::NEG_INFINITY, 1.0)]).err(),
            Some(SamplingError::NonFiniteRange { dimension: 0 })
        );
    }

    #[test]
    fn test_samples_stay_in_range() {
        let mut distribution =
            UniformDistribution::with_seed([(-1.0f32, 1.0), (10.0, 20.0)], 7).unwrap();
        for _ in 0..1000 {
            let s = distribution.sample();
            assert!(s[0] >= -1.0 && s[0] <= 1.0);
            assert!(s[1] >= 10.0 && s[1] <= 20.0);
        }
    }

    #[test]
    fn test_seeded_distributions_agree() {
        let mut a = UniformDistribution::with_seed([(0.0, 5.0); 3], 42).unwrap();
        let mut b = UniformDistribution::with_seed([(0.0, 5.0); 3], 42).unwrap();
        for _ in 0..50 {
            assert_eq!(a.sample(), b.sample());
        }
    }
}
