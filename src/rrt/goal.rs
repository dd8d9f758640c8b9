use crate::rrt::state::RealVectorState;
use num_traits::Float;
use rand::{Rng, RngCore};

/// The goal of a planning problem.
pub trait Goal<F: Float, const N: usize> {
    /// Tests a configuration against the goal.
    ///
    /// Returns whether the goal is satisfied and the distance from `state` to the goal. The
    /// distance is what the planner minimizes when it has to fall back to an approximate
    /// solution.
    fn is_satisfied(&self, state: &RealVectorState<F, N>) -> (bool, F);

    /// Exposes the goal as a region the planner can sample from, if it is one.
    fn as_sampleable(&self) -> Option<&dyn GoalSampleableRegion<F, N>> {
        None
    }
}

/// A goal region from which configurations can be drawn directly.
pub trait GoalSampleableRegion<F: Float, const N: usize>: Goal<F, N> {
    /// Whether a sample can currently be produced.
    fn can_sample(&self) -> bool;

    /// Draws a configuration from the goal region.
    fn sample_goal(&self, rng: &mut dyn RngCore) -> RealVectorState<F, N>;
}

/// A single goal state with a tolerance.
#[derive(Debug, Clone)]
pub struct GoalState<F: Float, const N: usize> {
    state: RealVectorState<F, N>,
    tolerance: F,
}

impl<F: Float, const N: usize> GoalState<F, N> {
    /// Parameters:
    /// - `state`: The goal state.
    /// - `tolerance`: A state is at the goal if its distance to `state` is at most `tolerance`.
    pub fn new(state: RealVectorState<F, N>, tolerance: F) -> Self {
        Self { state, tolerance }
    }

    pub fn state(&self) -> &RealVectorState<F, N> {
        &self.state
    }

    pub fn tolerance(&self) -> F {
        self.tolerance
    }
}

impl<F: Float, const N: usize> Goal<F, N> for GoalState<F, N> {
    fn is_satisfied(&self, state: &RealVectorState<F, N>) -> (bool, F) {
        let distance = state.euclidean_distance(&self.state);
        (distance <= self.tolerance, distance)
    }

    fn as_sampleable(&self) -> Option<&dyn GoalSampleableRegion<F, N>> {
        Some(self)
    }
}

impl<F: Float, const N: usize> GoalSampleableRegion<F, N> for GoalState<F, N> {
    fn can_sample(&self) -> bool {
        true
    }

    fn sample_goal(&self, _rng: &mut dyn RngCore) -> RealVectorState<F, N> {
        self.state
    }
}

/// Several goal states sharing one tolerance. Reaching any of them satisfies the goal.
#[derive(Debug, Clone)]
pub struct GoalStates<F: Float, const N: usize> {
    states: Vec<RealVectorState<F, N>>,
    tolerance: F,
}

impl<F: Float, const N: usize> GoalStates<F, N> {
    pub fn new(states: Vec<RealVectorState<F, N>>, tolerance: F) -> Self {
        Self { states, tolerance }
    }

    pub fn add_state(&mut self, state: RealVectorState<F, N>) {
        self.states.push(state);
    }

    pub fn states(&self) -> &[RealVectorState<F, N>] {
        &self.states
    }
}

impl<F: Float, const N: usize> Goal<F, N> for GoalStates<F, N> {
    fn is_satisfied(&self, state: &RealVectorState<F, N>) -> (bool, F) {
        let distance = self
            .states
            .iter()
            .map(|goal| goal.euclidean_distance(state))
            .fold(F::infinity(), F::min);
        (distance <= self.tolerance, distance)
    }

    fn as_sampleable(&self) -> Option<&dyn GoalSampleableRegion<F, N>> {
        Some(self)
    }
}

impl<F: Float, const N: usize> GoalSampleableRegion<F, N> for GoalStates<F, N> {
    fn can_sample(&self) -> bool {
        !self.states.is_empty()
    }

    fn sample_goal(&self, rng: &mut dyn RngCore) -> RealVectorState<F, N> {
        // Callers check `can_sample` first; an empty set has nothing sensible to return.
        if self.states.is_empty() {
            return RealVectorState::zeros();
        }
        self.states[rng.gen_range(0..self.states.len())]
    }
}

/// A goal defined by an arbitrary distance function. Not sampleable.
pub struct GoalPredicate<F: Float, const N: usize> {
    distance: Box<dyn Fn(&RealVectorState<F, N>) -> F>,
    threshold: F,
}

impl<F: Float, const N: usize> GoalPredicate<F, N> {
    /// Parameters:
    /// - `distance`: Distance from a state to the goal.
    /// - `threshold`: The goal is satisfied when the distance is at most `threshold`.
    pub fn new(distance: impl Fn(&RealVectorState<F, N>) -> F + 'static, threshold: F) -> Self {
        Self {
            distance: Box::new(distance),
            threshold,
        }
    }
}

impl<F: Float, const N: usize> Goal<F, N> for GoalPredicate<F, N> {
    fn is_satisfied(&self, state: &RealVectorState<F, N>) -> (bool, F) {
        let distance = (self.distance)(state);
        (distance <= self.threshold, distance)
    }
}
