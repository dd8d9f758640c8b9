use crate::rrt::state::RealVectorState;
use crate::rrt::validity_checker::ValidityChecker;
use num_traits::Float;

/// An obstacle with closed-form containment and segment intersection tests.
pub trait AnalyticObstacle<F: Float, const N: usize> {
    fn contains(&self, state: &RealVectorState<F, N>) -> bool;
    fn intersects_edge(&self, start: &RealVectorState<F, N>, end: &RealVectorState<F, N>) -> bool;
}

impl<F: Float, const N: usize> AnalyticObstacle<F, N> for Box<dyn AnalyticObstacle<F, N>> {
    fn contains(&self, state: &RealVectorState<F, N>) -> bool {
        (**self).contains(state)
    }

    fn intersects_edge(&self, start: &RealVectorState<F, N>, end: &RealVectorState<F, N>) -> bool {
        (**self).intersects_edge(start, end)
    }
}

/// Collision checking against a fixed set of analytic obstacles.
///
/// Use `Box<dyn AnalyticObstacle<F, N>>` as `O` to mix obstacle shapes.
pub struct AnalyticValidityChecker<F: Float, const N: usize, O: AnalyticObstacle<F, N>> {
    obstacles: Vec<O>,
    _phantom: std::marker::PhantomData<F>,
}

impl<F: Float, const N: usize, O: AnalyticObstacle<F, N>> AnalyticValidityChecker<F, N, O> {
    pub fn new(obstacles: Vec<O>) -> Self {
        Self {
            obstacles,
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn add_obstacle(&mut self, obstacle: O) {
        self.obstacles.push(obstacle);
    }

    pub fn obstacles(&self) -> &[O] {
        &self.obstacles
    }
}

impl<F: Float, const N: usize, O: AnalyticObstacle<F, N>> ValidityChecker<F, N>
    for AnalyticValidityChecker<F, N, O>
{
    fn is_state_valid(&self, state: &RealVectorState<F, N>) -> bool {
        !self.obstacles.iter().any(|o| o.contains(state))
    }

    fn is_edge_valid(&self, start: &RealVectorState<F, N>, end: &RealVectorState<F, N>) -> bool {
        !self.obstacles.iter().any(|o| o.intersects_edge(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacles::{StaticRectangularObstacle, StaticSphericalObstacle};

    #[test]
    fn test_mixed_obstacles() {
        let obstacles: Vec<Box<dyn AnalyticObstacle<f64, 2>>> = vec![
            Box::new(StaticSphericalObstacle::new(RealVectorState::new([5.0, 5.0]), 1.0)),
            Box::new(StaticRectangularObstacle::new(
                RealVectorState::new([0.0, 8.0]),
                RealVectorState::new([2.0, 9.0]),
            )),
        ];
        let checker = AnalyticValidityChecker::new(obstacles);

        assert!(!checker.is_state_valid(&RealVectorState::new([5.5, 5.0])));
        assert!(!checker.is_state_valid(&RealVectorState::new([1.0, 8.5])));
        assert!(checker.is_state_valid(&RealVectorState::new([3.0, 3.0])));

        assert!(!checker.is_edge_valid(
            &RealVectorState::new([0.0, 5.0]),
            &RealVectorState::new([10.0, 5.0])
        ));
        assert!(!checker.is_edge_valid(
            &RealVectorState::new([1.0, 7.0]),
            &RealVectorState::new([1.0, 10.0])
        ));
        assert!(checker.is_edge_valid(
            &RealVectorState::new([0.0, 0.0]),
            &RealVectorState::new([10.0, 0.0])
        ));
    }
}
