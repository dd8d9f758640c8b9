use crate::rrt::config::RtpConfig;
use crate::rrt::neighbors::NearestNeighbors;
use crate::rrt::path::PathGeometric;
use crate::rrt::planner::{Planner, PlannerError, PlannerSpecs, PlannerStatus};
use crate::rrt::planner_data::PlannerData;
use crate::rrt::problem::{PlannerInputStates, PlannerSolution, ProblemDefinition};
use crate::rrt::sampling::SamplingDistribution;
use crate::rrt::space::StateSpace;
use crate::rrt::state::RealVectorState;
use crate::rrt::termination::{MaxIterationsTermination, TerminationCondition};
use crate::rrt::tree::{Motion, MotionTree};
use crate::rrt::validity_checker::ValidityChecker;
use num_traits::Float;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::rc::Rc;

/// Counters collected during one call to `solve`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SolveStats {
    pub iterations: usize,
    /// Samples drawn from the goal region instead of the whole space.
    pub goal_samples: usize,
    /// Samples discarded because the edge from their nearest motion was invalid.
    pub rejected_edges: usize,
    pub motions_added: usize,
}

/// Loop state threaded through one call to `solve`: the exact solution, if any, and the motion
/// closest to the goal seen so far.
#[derive(Clone, Debug)]
pub(crate) struct SolveProgress<F: Float> {
    exact: Option<usize>,
    approximate: Option<usize>,
    difference: F,
    stats: SolveStats,
}

impl<F: Float> SolveProgress<F> {
    pub(crate) fn new() -> Self {
        Self {
            exact: None,
            approximate: None,
            difference: F::infinity(),
            stats: SolveStats::default(),
        }
    }

    /// Records the goal test of a newly added motion. Returns true when the motion is an exact
    /// solution and the search should stop.
    pub(crate) fn record(&mut self, motion: usize, satisfied: bool, distance: F) -> bool {
        if satisfied {
            self.exact = Some(motion);
            self.difference = distance;
            return true;
        }
        if distance < self.difference {
            self.approximate = Some(motion);
            self.difference = distance;
        }
        false
    }

    /// Distance to the goal of the best motion recorded so far (infinite if none).
    pub(crate) fn best_difference(&self) -> F {
        self.difference
    }

    /// The motion to report, whether it is approximate, and its distance to the goal.
    pub(crate) fn solution(&self) -> Option<(usize, bool, F)> {
        match (self.exact, self.approximate) {
            (Some(exact), _) => Some((exact, false, self.difference)),
            (None, Some(approximate)) => Some((approximate, true, self.difference)),
            (None, None) => None,
        }
    }
}

/// Random Tree Planner (RTP).
///
/// Grows a tree from the start states by connecting uniformly (or goal-biased) sampled states
/// straight to their nearest motion, without truncating the edge to a maximum length. Stops at
/// the first motion that satisfies the goal; if the termination condition fires first, the
/// motion closest to the goal is reported as an approximate solution.
///
/// Template Parameters:
/// - `F`: The floating-point type.
/// - `N`: The dimension of the space.
/// - `NN`: The nearest neighbors data structure.
pub struct RTP<F: Float + 'static, const N: usize, NN: NearestNeighbors<F, N>> {
    config: RtpConfig,
    space: Rc<dyn StateSpace<F, N>>,
    validity_checker: Box<dyn ValidityChecker<F, N>>,
    problem: ProblemDefinition<F, N>,
    input_states: PlannerInputStates,
    /// Allocated from the state space on the first solve unless one was provided.
    sampler: Option<Box<dyn SamplingDistribution<F, N>>>,
    tree: MotionTree<F, N, NN>,
    /// Index of the motion reported by the last successful solve.
    last_goal_motion: Option<usize>,
    /// Drives the goal bias draws and goal region sampling.
    rng: StdRng,
    is_setup: bool,
    last_stats: SolveStats,
}

impl<F: Float + 'static, const N: usize, NN: NearestNeighbors<F, N>> RTP<F, N, NN> {
    /// Constructs a new RTP planner.
    ///
    /// Parameters:
    /// - `space`: The state space to plan in.
    /// - `validity_checker`: Checks if the edges or start states are valid.
    /// - `problem`: The start states and goal.
    /// - `config`: The planner parameters, validated by `setup`.
    pub fn new(
        space: impl StateSpace<F, N> + 'static,
        validity_checker: Box<dyn ValidityChecker<F, N>>,
        problem: ProblemDefinition<F, N>,
        config: RtpConfig,
    ) -> Self {
        let rng = Self::make_rng(config.seed);
        Self {
            config,
            space: Rc::new(space),
            validity_checker,
            problem,
            input_states: PlannerInputStates::new(),
            sampler: None,
            tree: MotionTree::new(),
            last_goal_motion: None,
            rng,
            is_setup: false,
            last_stats: SolveStats::default(),
        }
    }

    fn make_rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Replaces the sampler the planner would otherwise allocate from the state space.
    /// `clear` discards it again.
    pub fn set_sampler(&mut self, sampler: Box<dyn SamplingDistribution<F, N>>) {
        self.sampler = Some(sampler);
    }

    pub fn config(&self) -> &RtpConfig {
        &self.config
    }

    pub fn goal_bias(&self) -> f64 {
        self.config.goal_bias
    }

    pub fn tree(&self) -> &MotionTree<F, N, NN> {
        &self.tree
    }

    pub fn last_goal_motion(&self) -> Option<usize> {
        self.last_goal_motion
    }

    /// Counters of the most recent solve.
    pub fn last_stats(&self) -> SolveStats {
        self.last_stats
    }

    /// Runs at most `iterations` iterations.
    pub fn run_iterations(&mut self, iterations: usize) -> Result<PlannerStatus, PlannerError> {
        let mut termination = MaxIterationsTermination::new(iterations);
        self.solve(&mut termination)
    }

    /// Draws the next state to extend towards. With probability `goal_bias` the state comes
    /// from the goal region, if the goal can be sampled.
    fn sample(
        &mut self,
        sampler: &mut dyn SamplingDistribution<F, N>,
        stats: &mut SolveStats,
    ) -> RealVectorState<F, N> {
        if let Some(region) = self.problem.goal().as_sampleable() {
            if self.rng.gen::<f64>() < self.config.goal_bias && region.can_sample() {
                stats.goal_samples += 1;
                return region.sample_goal(&mut self.rng);
            }
        }
        sampler.sample()
    }

    /// Expands the tree by one iteration.
    ///
    /// 1. Sample a state (goal biased).
    /// 2. Find the nearest motion in the tree.
    /// 3. Check the edge from the nearest motion to the sample.
    /// 4. If it is valid, add the sample as a child of the nearest motion.
    ///
    /// Returns the index of the new motion, if one was added.
    fn extend(
        &mut self,
        sampler: &mut dyn SamplingDistribution<F, N>,
        stats: &mut SolveStats,
    ) -> Option<usize> {
        let sample = self.sample(sampler, stats);

        let nearest = self.tree.nearest(&sample)?;
        let nearest_state = self.tree.motion(nearest).state();

        if !self.validity_checker.is_edge_valid(nearest_state, &sample) {
            stats.rejected_edges += 1;
            return None;
        }

        stats.motions_added += 1;
        Some(self.tree.add(Motion::with_parent(sample, nearest)))
    }

    /// Builds the path to `motion` and registers it with the problem definition.
    fn register_solution(&mut self, motion: usize, approximate: bool, difference: F) {
        self.last_goal_motion = Some(motion);

        let path = PathGeometric::from_states(self.tree.path_to(motion));
        let length = path.length(self.space.as_ref());
        tracing::debug!(
            "{}: Registering {} solution with {} states",
            self.config.name,
            if approximate { "approximate" } else { "exact" },
            path.len()
        );
        self.problem.add_solution_path(PlannerSolution {
            path,
            approximate,
            difference,
            planner_name: self.config.name.clone(),
            length,
        });
    }
}

impl<F: Float + 'static, const N: usize, NN: NearestNeighbors<F, N>> Planner<F, N>
    for RTP<F, N, NN>
{
    fn name(&self) -> &str {
        &self.config.name
    }

    fn specs(&self) -> PlannerSpecs {
        PlannerSpecs {
            approximate_solutions: true,
            directed: true,
            multithreaded: false,
        }
    }

    fn setup(&mut self) -> Result<(), PlannerError> {
        self.config.validate()?;
        if NN::requires_euclidean() && !self.space.is_euclidean() {
            return Err(PlannerError::IncompatibleNearestNeighbors);
        }

        let space = Rc::clone(&self.space);
        self.tree.set_distance_function(Box::new(
            move |a: &RealVectorState<F, N>, b: &RealVectorState<F, N>| space.distance(a, b),
        ));
        self.is_setup = true;
        Ok(())
    }

    fn clear(&mut self) {
        self.sampler = None;
        self.tree.clear();
        self.last_goal_motion = None;
        self.input_states.restart();
        self.rng = Self::make_rng(self.config.seed);
        self.last_stats = SolveStats::default();
    }

    fn solve(
        &mut self,
        termination: &mut dyn TerminationCondition,
    ) -> Result<PlannerStatus, PlannerError> {
        if !self.is_setup {
            self.setup()?;
        }

        while let Some(start) = self.input_states.next_start(
            &self.problem,
            self.space.as_ref(),
            self.validity_checker.as_ref(),
        ) {
            self.tree.add(Motion::root(start));
        }

        if self.tree.is_empty() {
            tracing::error!("{}: There are no valid initial states!", self.config.name);
            return Ok(PlannerStatus::InvalidStart);
        }

        let mut sampler = match self.sampler.take() {
            Some(sampler) => sampler,
            None => self.space.alloc_sampler(Some(self.rng.gen())),
        };

        tracing::info!(
            "{}: Starting planning with {} states already in datastructure",
            self.config.name,
            self.tree.len()
        );

        let mut progress = SolveProgress::new();
        while !termination.evaluate() {
            progress.stats.iterations += 1;
            let Some(motion) = self.extend(sampler.as_mut(), &mut progress.stats) else {
                continue;
            };

            let (satisfied, distance) = self
                .problem
                .goal()
                .is_satisfied(self.tree.motion(motion).state());
            if progress.record(motion, satisfied, distance) {
                break;
            }
        }
        self.sampler = Some(sampler);

        let status = match progress.solution() {
            Some((motion, approximate, difference)) => {
                self.register_solution(motion, approximate, difference);
                if approximate {
                    PlannerStatus::ApproximateSolution
                } else {
                    PlannerStatus::ExactSolution
                }
            }
            None => PlannerStatus::Timeout,
        };
        self.last_stats = progress.stats;

        tracing::info!(
            "{}: Created {} states ({} iterations): {}",
            self.config.name,
            self.tree.len(),
            progress.stats.iterations,
            status
        );
        Ok(status)
    }

    fn planner_data(&self) -> PlannerData<F, N> {
        let mut data = PlannerData::new();

        // Vertex indices match motion indices.
        for motion in self.tree.motions() {
            match motion.parent() {
                None => {
                    data.add_start_vertex(motion.state());
                }
                Some(parent) => {
                    let index = data.add_vertex(motion.state());
                    data.add_edge(parent, index);
                }
            }
        }
        if let Some(goal) = self.last_goal_motion {
            data.tag_goal_vertex(goal);
        }

        data.set_property("iterations", self.last_stats.iterations);
        data.set_property("goal samples", self.last_stats.goal_samples);
        data.set_property("rejected edges", self.last_stats.rejected_edges);
        data.set_property("motions added", self.last_stats.motions_added);
        data
    }

    fn problem_definition(&self) -> &ProblemDefinition<F, N> {
        &self.problem
    }

    fn problem_definition_mut(&mut self) -> &mut ProblemDefinition<F, N> {
        &mut self.problem
    }
}
