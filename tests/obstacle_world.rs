use rtp_planner::obstacles::{
    AnalyticObstacle, AnalyticValidityChecker, StaticRectangularObstacle, StaticSphericalObstacle,
};
use rtp_planner::rrt::{
    GoalState, KdTreeNearestNeighbors, Planner, PlannerStatus, ProblemDefinition, RealVectorState,
    RealVectorStateSpace, RtpConfig, ValidityChecker, RTP,
};

type S = RealVectorState<f64, 2>;
type World = AnalyticValidityChecker<f64, 2, Box<dyn AnalyticObstacle<f64, 2>>>;

/// A wall with a gap above it and a disc near the goal.
fn world() -> World {
    AnalyticValidityChecker::new(vec![
        Box::new(StaticRectangularObstacle::new(
            S::new([4.0, 0.0]),
            S::new([6.0, 8.0]),
        )) as Box<dyn AnalyticObstacle<f64, 2>>,
        Box::new(StaticSphericalObstacle::new(S::new([8.0, 5.0]), 1.0)),
    ])
}

fn planner(seed: u64) -> RTP<f64, 2, KdTreeNearestNeighbors<f64, 2>> {
    let space = RealVectorStateSpace::new([(0.0, 10.0), (0.0, 10.0)]).unwrap();
    let goal = GoalState::new(S::new([9.0, 1.0]), 0.5);
    let problem = ProblemDefinition::with_start(S::new([1.0, 1.0]), Box::new(goal));
    RTP::new(
        space,
        Box::new(world()),
        problem,
        RtpConfig::default().with_seed(seed),
    )
}

#[test]
fn test_plans_around_the_wall() {
    let mut planner = planner(21);
    let status = planner.run_iterations(20_000).unwrap();
    assert_eq!(status, PlannerStatus::ExactSolution);

    let checker = world();
    let path = planner.problem_definition().solution_path().unwrap();
    assert_eq!(path.first(), Some(&S::new([1.0, 1.0])));
    assert!(path.last().unwrap().euclidean_distance(&S::new([9.0, 1.0])) <= 0.5);
    assert!(path.check(&checker));
    // The only way past the wall is over it.
    assert!(path.states().iter().any(|s| s[1] > 8.0));
}

#[test]
fn test_every_tree_edge_is_collision_free() {
    let mut planner = planner(3);
    planner.run_iterations(500).unwrap();

    let checker = world();
    let tree = planner.tree();
    assert!(tree.len() > 1);
    for motion in tree.motions() {
        assert!(checker.is_state_valid(motion.state()));
        if let Some(parent) = motion.parent() {
            assert!(checker.is_edge_valid(tree.motion(parent).state(), motion.state()));
        }
    }
}

#[test]
fn test_start_inside_obstacle_is_rejected() {
    let space = RealVectorStateSpace::new([(0.0, 10.0), (0.0, 10.0)]).unwrap();
    let goal = GoalState::new(S::new([9.0, 1.0]), 0.5);
    let mut problem = ProblemDefinition::with_start(S::new([5.0, 4.0]), Box::new(goal));
    problem.add_start_state(S::new([1.0, 1.0]));
    let mut planner = RTP::<f64, 2, KdTreeNearestNeighbors<f64, 2>>::new(
        space,
        Box::new(world()),
        problem,
        RtpConfig::default().with_seed(9),
    );

    planner.run_iterations(10).unwrap();
    assert_eq!(planner.tree().roots(), vec![0]);
    assert_eq!(planner.tree().motion(0).state(), &S::new([1.0, 1.0]));
}
