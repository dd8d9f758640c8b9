//! Random Tree Planner (RTP): a sampling-based tree planner over real vector spaces.
//!
//! The planner grows a tree from one or more start states by connecting goal-biased random
//! samples to their nearest tree node whenever the straight edge between them is valid. It stops
//! at the first node that satisfies the goal, or reports the node closest to the goal as an
//! approximate solution once its termination condition fires.

pub mod obstacles;
pub mod rrt;
