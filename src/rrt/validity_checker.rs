use crate::rrt::state::RealVectorState;
use num_traits::Float;
use std::marker::PhantomData;

/// Decides which configurations and edges are collision-free.
pub trait ValidityChecker<F: Float, const N: usize> {
    /// Checks if a single configuration is valid. Start states are filtered with this.
    fn is_state_valid(&self, state: &RealVectorState<F, N>) -> bool;

    /// Checks if the straight edge from `a` to `b` is valid. This is the oracle the planner
    /// consults before adding a motion to the tree.
    fn is_edge_valid(&self, a: &RealVectorState<F, N>, b: &RealVectorState<F, N>) -> bool;
}

/// Accepts every state and edge.
#[derive(Default)]
pub struct AlwaysValid<F: Float, const N: usize> {
    _phantom: PhantomData<F>,
}

impl<F: Float, const N: usize> AlwaysValid<F, N> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<F: Float, const N: usize> ValidityChecker<F, N> for AlwaysValid<F, N> {
    fn is_state_valid(&self, _state: &RealVectorState<F, N>) -> bool {
        true
    }

    fn is_edge_valid(&self, _a: &RealVectorState<F, N>, _b: &RealVectorState<F, N>) -> bool {
        true
    }
}

/// Conjunction of several checkers: a state or edge is valid only if every checker agrees.
/// An empty union accepts everything.
#[derive(Default)]
pub struct UnionValidityChecker<F: Float, const N: usize> {
    checkers: Vec<Box<dyn ValidityChecker<F, N>>>,
}

impl<F: Float, const N: usize> UnionValidityChecker<F, N> {
    pub fn new() -> Self {
        Self {
            checkers: Vec::new(),
        }
    }

    pub fn add_checker(&mut self, checker: Box<dyn ValidityChecker<F, N>>) {
        self.checkers.push(checker);
    }

    /// Builder form of [`UnionValidityChecker::add_checker`].
    pub fn with_checker(mut self, checker: Box<dyn ValidityChecker<F, N>>) -> Self {
        self.add_checker(checker);
        self
    }

    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}

impl<F: Float, const N: usize> ValidityChecker<F, N> for UnionValidityChecker<F, N> {
    fn is_state_valid(&self, state: &RealVectorState<F, N>) -> bool {
        self.checkers.iter().all(|c| c.is_state_valid(state))
    }

    fn is_edge_valid(&self, a: &RealVectorState<F, N>, b: &RealVectorState<F, N>) -> bool {
        self.checkers.iter().all(|c| c.is_edge_valid(a, b))
    }
}

/// Adapts a closure into an edge oracle. Every individual state is considered valid.
pub struct EdgeValidityFn<F: Float, const N: usize, E>
where
    E: Fn(&RealVectorState<F, N>, &RealVectorState<F, N>) -> bool,
{
    edge: E,
    _phantom: PhantomData<F>,
}

impl<F: Float, const N: usize, E> EdgeValidityFn<F, N, E>
where
    E: Fn(&RealVectorState<F, N>, &RealVectorState<F, N>) -> bool,
{
    pub fn new(edge: E) -> Self {
        Self {
            edge,
            _phantom: PhantomData,
        }
    }
}

impl<F: Float, const N: usize, E> ValidityChecker<F, N> for EdgeValidityFn<F, N, E>
where
    E: Fn(&RealVectorState<F, N>, &RealVectorState<F, N>) -> bool,
{
    fn is_state_valid(&self, _state: &RealVectorState<F, N>) -> bool {
        true
    }

    fn is_edge_valid(&self, a: &RealVectorState<F, N>, b: &RealVectorState<F, N>) -> bool {
        (self.edge)(a, b)
    }
}
