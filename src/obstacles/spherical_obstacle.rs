use crate::obstacles::AnalyticObstacle;
use crate::rrt::state::RealVectorState;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// A ball of fixed center and radius. The boundary itself is free space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticSphericalObstacle<F: Float, const N: usize> {
    center: RealVectorState<F, N>,
    radius: F,
}

impl<F: Float, const N: usize> StaticSphericalObstacle<F, N> {
    pub fn new(center: RealVectorState<F, N>, radius: F) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> &RealVectorState<F, N> {
        &self.center
    }

    pub fn radius(&self) -> F {
        self.radius
    }

    /// The point of the segment `[start, end]` closest to the center.
    fn closest_point_on_segment(
        &self,
        start: &RealVectorState<F, N>,
        end: &RealVectorState<F, N>,
    ) -> RealVectorState<F, N> {
        let direction = end - start;
        let length_squared = direction.dot(&direction);
        if length_squared == F::zero() {
            return *start;
        }
        let t = (&self.center - start).dot(&direction) / length_squared;
        let t = t.max(F::zero()).min(F::one());
        start + &(direction * t)
    }
}

impl<F: Float, const N: usize> AnalyticObstacle<F, N> for StaticSphericalObstacle<F, N> {
    fn contains(&self, state: &RealVectorState<F, N>) -> bool {
        self.center.euclidean_distance_squared(state) < self.radius * self.radius
    }

    fn intersects_edge(&self, start: &RealVectorState<F, N>, end: &RealVectorState<F, N>) -> bool {
        let closest = self.closest_point_on_segment(start, end);
        self.contains(&closest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere() -> StaticSphericalObstacle<f64, 2> {
        StaticSphericalObstacle::new(RealVectorState::new([0.0, 0.0]), 1.0)
    }

    #[test]
    fn test_contains() {
        assert!(sphere().contains(&RealVectorState::new([0.5, 0.5])));
        assert!(!sphere().contains(&RealVectorState::new([1.0, 0.0])));
    }

    #[test]
    fn test_edge_through_center() {
        assert!(sphere().intersects_edge(
            &RealVectorState::new([-2.0, 0.0]),
            &RealVectorState::new([2.0, 0.0])
        ));
    }

    #[test]
    fn test_edge_passing_by() {
        assert!(!sphere().intersects_edge(
            &RealVectorState::new([-2.0, 1.5]),
            &RealVectorState::new([2.0, 1.5])
        ));
        // The infinite line would cross the sphere but the segment stops short.
        assert!(!sphere().intersects_edge(
            &RealVectorState::new([2.0, 0.0]),
            &RealVectorState::new([3.0, 0.0])
        ));
    }

    #[test]
    fn test_degenerate_edge() {
        let p = RealVectorState::new([0.2, 0.0]);
        assert!(sphere().intersects_edge(&p, &p));
    }
}
