use crate::rrt::goal::Goal;
use crate::rrt::path::PathGeometric;
use crate::rrt::space::StateSpace;
use crate::rrt::state::RealVectorState;
use crate::rrt::validity_checker::ValidityChecker;
use num_traits::Float;
use serde::Serialize;
use std::cmp::Ordering;

/// A solution path registered by a planner.
#[derive(Clone, Debug, Serialize)]
pub struct PlannerSolution<F: Float, const N: usize> {
    pub path: PathGeometric<F, N>,
    /// True if the path does not reach the goal.
    pub approximate: bool,
    /// Distance from the end of the path to the goal.
    pub difference: F,
    pub planner_name: String,
    /// Length of `path` under the state space's distance function.
    pub length: F,
}

impl<F: Float, const N: usize> PlannerSolution<F, N> {
    // Exact before approximate, then closer to the goal, then shorter.
    fn ranking(&self, other: &Self) -> Ordering {
        self.approximate
            .cmp(&other.approximate)
            .then_with(|| {
                self.difference
                    .partial_cmp(&other.difference)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| {
                self.length
                    .partial_cmp(&other.length)
                    .unwrap_or(Ordering::Equal)
            })
    }
}

/// Start states, goal and registered solutions of one planning query.
pub struct ProblemDefinition<F: Float, const N: usize> {
    start_states: Vec<RealVectorState<F, N>>,
    goal: Box<dyn Goal<F, N>>,
    solutions: Vec<PlannerSolution<F, N>>,
}

impl<F: Float, const N: usize> ProblemDefinition<F, N> {
    pub fn new(goal: Box<dyn Goal<F, N>>) -> Self {
        Self {
            start_states: Vec::new(),
            goal,
            solutions: Vec::new(),
        }
    }

    /// Convenience constructor for a single start state.
    pub fn with_start(start: RealVectorState<F, N>, goal: Box<dyn Goal<F, N>>) -> Self {
        let mut problem = Self::new(goal);
        problem.add_start_state(start);
        problem
    }

    pub fn add_start_state(&mut self, state: RealVectorState<F, N>) {
        self.start_states.push(state);
    }

    pub fn start_states(&self) -> &[RealVectorState<F, N>] {
        &self.start_states
    }

    pub fn goal(&self) -> &dyn Goal<F, N> {
        self.goal.as_ref()
    }

    pub fn set_goal(&mut self, goal: Box<dyn Goal<F, N>>) {
        self.goal = goal;
    }

    /// Registers a solution, keeping the list ordered best first.
    pub fn add_solution_path(&mut self, solution: PlannerSolution<F, N>) {
        let position = self
            .solutions
            .iter()
            .position(|existing| solution.ranking(existing) == Ordering::Less)
            .unwrap_or(self.solutions.len());
        self.solutions.insert(position, solution);
    }

    /// The best registered solution.
    pub fn solution(&self) -> Option<&PlannerSolution<F, N>> {
        self.solutions.first()
    }

    /// The path of the best registered solution.
    pub fn solution_path(&self) -> Option<&PathGeometric<F, N>> {
        self.solution().map(|s| &s.path)
    }

    pub fn solutions(&self) -> &[PlannerSolution<F, N>] {
        &self.solutions
    }

    pub fn has_solution(&self) -> bool {
        !self.solutions.is_empty()
    }

    pub fn has_exact_solution(&self) -> bool {
        self.solutions.iter().any(|s| !s.approximate)
    }

    /// True if solutions exist but none of them is exact.
    pub fn has_approximate_solution(&self) -> bool {
        self.has_solution() && !self.has_exact_solution()
    }

    pub fn clear_solution_paths(&mut self) {
        self.solutions.clear();
    }
}

/// Hands out the start states of a problem to a planner, each at most once.
#[derive(Debug, Default, Clone)]
pub struct PlannerInputStates {
    next_start: usize,
}

impl PlannerInputStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next usable start state, or None once every start has been consumed.
    /// Starts outside the space bounds or rejected by the validity checker are skipped.
    pub fn next_start<F: Float, const N: usize>(
        &mut self,
        problem: &ProblemDefinition<F, N>,
        space: &dyn StateSpace<F, N>,
        validity_checker: &dyn ValidityChecker<F, N>,
    ) -> Option<RealVectorState<F, N>> {
        while let Some(start) = problem.start_states().get(self.next_start) {
            let index = self.next_start;
            self.next_start += 1;
            if !space.satisfies_bounds(start) {
                tracing::warn!(index, "Skipping start state outside the state space bounds");
                continue;
            }
            if !validity_checker.is_state_valid(start) {
                tracing::warn!(index, "Skipping invalid start state");
                continue;
            }
            return Some(*start);
        }
        None
    }

    /// Makes every start state available again.
    pub fn restart(&mut self) {
        self.next_start = 0;
    }
}
