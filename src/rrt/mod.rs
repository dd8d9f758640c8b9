pub mod config;
pub mod goal;
pub mod neighbors;
pub mod path;
pub mod planner;
pub mod planner_data;
pub mod problem;
pub mod rtp;
pub mod sampling;
pub mod space;
pub mod state;
pub mod termination;
pub mod tree;
pub mod validity_checker;

pub use config::{ConfigError, RtpConfig};
pub use goal::{Goal, GoalPredicate, GoalSampleableRegion, GoalState, GoalStates};
pub use neighbors::{DistanceFunction, KdTreeNearestNeighbors, LinearNearestNeighbors, NearestNeighbors};
pub use path::PathGeometric;
pub use planner::{Planner, PlannerError, PlannerSpecs, PlannerStatus};
pub use planner_data::PlannerData;
pub use problem::{PlannerInputStates, PlannerSolution, ProblemDefinition};
pub use rtp::{SolveStats, RTP};
pub use sampling::{SamplingDistribution, SamplingError, UniformDistribution};
pub use space::{RealVectorStateSpace, SpaceError, StateSpace};
pub use state::RealVectorState;
pub use termination::{
    AnyTermination, CancellationTermination, CancellationToken, FnTermination,
    MaxIterationsTermination, TerminationCondition, TimedTermination,
};
pub use tree::{Motion, MotionTree};
pub use validity_checker::{AlwaysValid, EdgeValidityFn, UnionValidityChecker, ValidityChecker};
