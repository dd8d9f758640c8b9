use crate::rrt::sampling::{validate_ranges, SamplingDistribution, SamplingError, UniformDistribution};
use crate::rrt::state::RealVectorState;
use num_traits::Float;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpaceError {
    #[error("invalid state space bounds: {0}")]
    InvalidBounds(#[from] SamplingError),
}

/// The configuration space the planner searches.
///
/// Owns the distance metric used by the nearest neighbors index and the uniform sampler the
/// planner allocates on its first solve.
pub trait StateSpace<F: Float, const N: usize> {
    /// Distance between two configurations. Must be non-negative.
    fn distance(&self, a: &RealVectorState<F, N>, b: &RealVectorState<F, N>) -> F;

    /// Whether `state` lies within the bounds of the space.
    fn satisfies_bounds(&self, state: &RealVectorState<F, N>) -> bool;

    /// Whether `distance` is the Euclidean metric over the raw coordinates.
    fn is_euclidean(&self) -> bool {
        false
    }

    /// Allocates a uniform sampler over the space.
    fn alloc_sampler(&self, seed: Option<u64>) -> Box<dyn SamplingDistribution<F, N>>;
}

/// Euclidean space bounded by an axis-aligned box.
#[derive(Debug, Clone)]
pub struct RealVectorStateSpace<F: Float, const N: usize> {
    bounds: [(F, F); N],
}

impl<F: Float, const N: usize> RealVectorStateSpace<F, N> {
    /// Parameters:
    /// - `bounds`: The `(low, high)` bounds of each dimension.
    pub fn new(bounds: [(F, F); N]) -> Result<Self, SpaceError> {
        validate_ranges(&bounds)?;
        Ok(Self { bounds })
    }

    pub fn bounds(&self) -> &[(F, F); N] {
        &self.bounds
    }
}

impl<F: Float + 'static, const N: usize> StateSpace<F, N> for RealVectorStateSpace<F, N> {
    fn distance(&self, a: &RealVectorState<F, N>, b: &RealVectorState<F, N>) -> F {
        a.euclidean_distance(b)
    }

    fn satisfies_bounds(&self, state: &RealVectorState<F, N>) -> bool {
        self.bounds
            .iter()
            .enumerate()
            .all(|(i, &(low, high))| state[i] >= low && state[i] <= high)
    }

    fn is_euclidean(&self) -> bool {
        true
    }

    fn alloc_sampler(&self, seed: Option<u64>) -> Box<dyn SamplingDistribution<F, N>> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        // Bounds were validated when the space was constructed.
        Box::new(UniformDistribution::from_parts(self.bounds, rng))
    }
}
