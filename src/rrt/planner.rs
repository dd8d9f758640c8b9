use crate::rrt::config::ConfigError;
use crate::rrt::planner_data::PlannerData;
use crate::rrt::problem::ProblemDefinition;
use crate::rrt::termination::TerminationCondition;
use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that prevent a planner from running at all.
///
/// Running out of budget without a solution, or having no valid start state, are reported
/// through [`PlannerStatus`] instead.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("invalid planner configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("the nearest neighbors backend only supports Euclidean distance, but the state space is not Euclidean")]
    IncompatibleNearestNeighbors,
}

/// Outcome of a call to [`Planner::solve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlannerStatus {
    /// No start state was available; nothing was sampled.
    InvalidStart,
    /// The termination condition fired before any motion could be added to the tree.
    Timeout,
    /// No motion reached the goal; the one closest to it was reported.
    ApproximateSolution,
    ExactSolution,
}

impl PlannerStatus {
    /// Whether a solution path was registered.
    pub fn solved(&self) -> bool {
        matches!(
            self,
            PlannerStatus::ApproximateSolution | PlannerStatus::ExactSolution
        )
    }

    pub fn approximate(&self) -> bool {
        matches!(self, PlannerStatus::ApproximateSolution)
    }
}

impl fmt::Display for PlannerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlannerStatus::InvalidStart => "Invalid start",
            PlannerStatus::Timeout => "Timeout",
            PlannerStatus::ApproximateSolution => "Approximate solution",
            PlannerStatus::ExactSolution => "Exact solution",
        };
        write!(f, "{}", s)
    }
}

/// Capabilities a planner advertises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerSpecs {
    /// Reports the closest motion when the goal is not reached.
    pub approximate_solutions: bool,
    /// Edges are only checked in the direction they were grown.
    pub directed: bool,
    pub multithreaded: bool,
}

/// A sampling-based motion planner.
pub trait Planner<F: Float, const N: usize> {
    fn name(&self) -> &str;

    fn specs(&self) -> PlannerSpecs;

    /// Validates the configuration and prepares internal data structures. `solve` calls this
    /// itself if it has not been called yet.
    fn setup(&mut self) -> Result<(), PlannerError>;

    /// Discards all planning progress so the next `solve` starts from scratch.
    fn clear(&mut self);

    /// Plans until a solution is found or `termination` fires.
    fn solve(
        &mut self,
        termination: &mut dyn TerminationCondition,
    ) -> Result<PlannerStatus, PlannerError>;

    /// Describes the current search tree.
    fn planner_data(&self) -> PlannerData<F, N>;

    fn problem_definition(&self) -> &ProblemDefinition<F, N>;

    fn problem_definition_mut(&mut self) -> &mut ProblemDefinition<F, N>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_flags() {
        assert!(!PlannerStatus::InvalidStart.solved());
        assert!(!PlannerStatus::Timeout.solved());
        assert!(PlannerStatus::ApproximateSolution.solved());
        assert!(PlannerStatus::ApproximateSolution.approximate());
        assert!(PlannerStatus::ExactSolution.solved());
        assert!(!PlannerStatus::ExactSolution.approximate());
        assert_eq!(PlannerStatus::Timeout.to_string(), "Timeout");
    }
}
