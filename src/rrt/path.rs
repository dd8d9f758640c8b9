use crate::rrt::space::StateSpace;
use crate::rrt::state::RealVectorState;
use crate::rrt::validity_checker::ValidityChecker;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// A path made of straight edges between consecutive states.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathGeometric<F: Float, const N: usize> {
    states: Vec<RealVectorState<F, N>>,
}

impl<F: Float, const N: usize> PathGeometric<F, N> {
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    pub fn from_states(states: Vec<RealVectorState<F, N>>) -> Self {
        Self { states }
    }

    pub fn append(&mut self, state: RealVectorState<F, N>) {
        self.states.push(state);
    }

    pub fn states(&self) -> &[RealVectorState<F, N>] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn first(&self) -> Option<&RealVectorState<F, N>> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&RealVectorState<F, N>> {
        self.states.last()
    }

    /// Sum of the edge lengths under the space's distance function.
    pub fn length(&self, space: &dyn StateSpace<F, N>) -> F {
        self.states
            .windows(2)
            .fold(F::zero(), |acc, edge| acc + space.distance(&edge[0], &edge[1]))
    }

    /// Checks every state and every edge of the path.
    pub fn check(&self, validity_checker: &dyn ValidityChecker<F, N>) -> bool {
        self.states.iter().all(|s| validity_checker.is_state_valid(s))
            && self
                .states
                .windows(2)
                .all(|edge| validity_checker.is_edge_valid(&edge[0], &edge[1]))
    }
}

impl<F: Float, const N: usize> Default for PathGeometric<F, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rrt::space::RealVectorStateSpace;
    use crate::rrt::validity_checker::EdgeValidityFn;

    #[test]
    fn test_length() {
        let space = RealVectorStateSpace::new([(0.0, 10.0), (0.0, 10.0)]).unwrap();
        let mut path = PathGeometric::new();
        assert_eq!(path.length(&space), 0.0);
        path.append(RealVectorState::new([0.0, 0.0]));
        path.append(RealVectorState::new([3.0, 4.0]));
        path.append(RealVectorState::new([3.0, 10.0]));
        assert_eq!(path.length(&space), 11.0);
        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), Some(&RealVectorState::new([0.0, 0.0])));
    }

    #[test]
    fn test_check() {
        type S = RealVectorState<f64, 1>;
        let forward_only = EdgeValidityFn::new(|a: &S, b: &S| b[0] > a[0]);
        let good = PathGeometric::from_states(vec![S::new([0.0]), S::new([1.0]), S::new([2.0])]);
        let bad = PathGeometric::from_states(vec![S::new([0.0]), S::new([2.0]), S::new([1.0])]);
        assert!(good.check(&forward_only));
        assert!(!bad.check(&forward_only));
    }
}
