use crate::obstacles::AnalyticObstacle;
use crate::rrt::state::RealVectorState;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// An axis-aligned box, boundary included.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StaticRectangularObstacle<F: Float, const N: usize> {
    min_corner: RealVectorState<F, N>,
    max_corner: RealVectorState<F, N>,
}

impl<F: Float, const N: usize> StaticRectangularObstacle<F, N> {
    /// Builds the box spanned by two opposite corners, in any order.
    pub fn new(a: RealVectorState<F, N>, b: RealVectorState<F, N>) -> Self {
        let mut min_corner = a;
        let mut max_corner = b;
        for i in 0..N {
            min_corner[i] = a[i].min(b[i]);
            max_corner[i] = a[i].max(b[i]);
        }
        Self {
            min_corner,
            max_corner,
        }
    }

    pub fn min_corner(&self) -> &RealVectorState<F, N> {
        &self.min_corner
    }

    pub fn max_corner(&self) -> &RealVectorState<F, N> {
        &self.max_corner
    }
}

impl<F: Float, const N: usize> AnalyticObstacle<F, N> for StaticRectangularObstacle<F, N> {
    fn contains(&self, state: &RealVectorState<F, N>) -> bool {
        (0..N).all(|i| state[i] >= self.min_corner[i] && state[i] <= self.max_corner[i])
    }

    /// Slab test: clip the segment parameter range `[0, 1]` against each axis in turn.
    fn intersects_edge(&self, start: &RealVectorState<F, N>, end: &RealVectorState<F, N>) -> bool {
        let mut enter = F::zero();
        let mut exit = F::one();

        for i in 0..N {
            let delta = end[i] - start[i];
            let (low, high) = (self.min_corner[i], self.max_corner[i]);

            if delta == F::zero() {
                if start[i] < low || start[i] > high {
                    return false;
                }
                continue;
            }

            let a = (low - start[i]) / delta;
            let b = (high - start[i]) / delta;
            enter = enter.max(a.min(b));
            exit = exit.min(a.max(b));
            if enter > exit {
                return false;
            }
        }
        true
    }
}
