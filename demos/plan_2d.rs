//! # Random Tree Planner (RTP) Example in 2 Dimensions
//!
//! ## Usage
//! Run the program with:
//! ```bash
//! cargo run --example plan_2d -- --seed 7 --max-iterations 5000
//! ```

use clap::Parser;
use json::object;
use std::fs;
use std::time::Duration;

use rtp_planner::obstacles::{
    AnalyticObstacle, AnalyticValidityChecker, StaticRectangularObstacle, StaticSphericalObstacle,
};
use rtp_planner::rrt::{
    AnyTermination, GoalState, KdTreeNearestNeighbors, MaxIterationsTermination, Planner,
    ProblemDefinition, RealVectorState, RealVectorStateSpace, RtpConfig, TimedTermination, RTP,
};

const MIN_X: f64 = 0.0;
const MAX_X: f64 = 30.0;
const MIN_Y: f64 = 0.0;
const MAX_Y: f64 = 30.0;

#[derive(Parser, Debug)]
#[command(version, about = "Plan a path through a 2D world with RTP", long_about = None)]
struct CliArgs {
    /// JSON file with the planner configuration (`name`, `goal_bias`, `seed`)
    #[arg(short, long)]
    config: Option<String>,

    /// Seed for the planner, overrides the configuration file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Probability of sampling the goal, overrides the configuration file
    #[arg(short, long)]
    goal_bias: Option<f64>,

    /// Maximum number of iterations
    #[arg(short, long, default_value_t = 10_000)]
    max_iterations: usize,

    /// Wall clock budget in milliseconds
    #[arg(short, long, default_value_t = 1_000)]
    time_limit_ms: u64,

    /// Print the solution path
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: CliArgs = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => RtpConfig::from_json(&fs::read_to_string(path)?)?,
        None => RtpConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(goal_bias) = args.goal_bias {
        config = config.with_goal_bias(goal_bias);
    }

    // Define the obstacles
    let obstacles: Vec<Box<dyn AnalyticObstacle<f64, 2>>> = vec![
        Box::new(StaticSphericalObstacle::new(RealVectorState::new([20.0, 20.0]), 2.5)),
        Box::new(StaticSphericalObstacle::new(RealVectorState::new([10.0, 21.0]), 5.0)),
        Box::new(StaticRectangularObstacle::new(
            RealVectorState::new([5.0, 10.0]),
            RealVectorState::new([25.0, 13.0]),
        )),
        Box::new(StaticRectangularObstacle::new(
            RealVectorState::new([14.0, 0.0]),
            RealVectorState::new([16.0, 6.0]),
        )),
    ];
    let validity_checker = AnalyticValidityChecker::new(obstacles);

    // Define the start and goal points.
    let start = RealVectorState::new([28.0, 28.0]);
    let goal = RealVectorState::new([2.0, 2.0]);
    let goal_tolerance = 0.5;

    let space = RealVectorStateSpace::new([(MIN_X, MAX_X), (MIN_Y, MAX_Y)])?;
    let problem = ProblemDefinition::with_start(start, Box::new(GoalState::new(goal, goal_tolerance)));

    let mut planner = RTP::<f64, 2, KdTreeNearestNeighbors<f64, 2>>::new(
        space,
        Box::new(validity_checker),
        problem,
        config,
    );

    let mut termination = AnyTermination::new()
        .or(MaxIterationsTermination::new(args.max_iterations))
        .or(TimedTermination::new(Duration::from_millis(args.time_limit_ms)));
    let status = planner.solve(&mut termination)?;

    let data = planner.planner_data();
    let stats = planner.last_stats();
    let mut summary = object! {
        planner: planner.name(),
        status: status.to_string(),
        iterations: stats.iterations,
        goal_samples: stats.goal_samples,
        rejected_edges: stats.rejected_edges,
        vertices: data.num_vertices(),
        edges: data.num_edges(),
    };

    if let Some(solution) = planner.problem_definition().solution() {
        summary["approximate"] = solution.approximate.into();
        summary["difference"] = solution.difference.into();
        summary["length"] = solution.length.into();
        summary["path_states"] = solution.path.len().into();

        if args.verbose {
            for state in solution.path.states() {
                println!("{:8.3} {:8.3}", state[0], state[1]);
            }
        }
    }

    println!("{}", summary.pretty(2));
    Ok(())
}
