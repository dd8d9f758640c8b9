use crate::rrt::state::RealVectorState;
use num_traits::Float;
use serde::Serialize;
use std::collections::BTreeMap;

/// A snapshot of a planner's search tree: vertices, directed edges and the vertices marked as
/// starts or goals.
///
/// Every tree node is its own vertex, even when two nodes hold the same state.
#[derive(Clone, Debug, Serialize)]
pub struct PlannerData<F: Float, const N: usize> {
    vertices: Vec<RealVectorState<F, N>>,
    edges: Vec<(usize, usize)>,
    start_vertices: Vec<usize>,
    goal_vertices: Vec<usize>,
    properties: BTreeMap<String, String>,
}

impl<F: Float, const N: usize> PlannerData<F, N> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            start_vertices: Vec::new(),
            goal_vertices: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, state: &RealVectorState<F, N>) -> usize {
        self.vertices.push(*state);
        self.vertices.len() - 1
    }

    pub fn add_start_vertex(&mut self, state: &RealVectorState<F, N>) -> usize {
        let index = self.add_vertex(state);
        self.start_vertices.push(index);
        index
    }

    /// Marks an existing vertex as reaching the goal.
    pub fn tag_goal_vertex(&mut self, index: usize) {
        debug_assert!(index < self.vertices.len());
        if !self.goal_vertices.contains(&index) {
            self.goal_vertices.push(index);
        }
    }

    /// Adds a directed edge between two existing vertices.
    pub fn add_edge(&mut self, from: usize, to: usize) {
        debug_assert!(from < self.vertices.len() && to < self.vertices.len());
        self.edges.push((from, to));
    }

    pub fn set_property(&mut self, name: &str, value: impl ToString) {
        self.properties.insert(name.to_string(), value.to_string());
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn vertex(&self, index: usize) -> &RealVectorState<F, N> {
        &self.vertices[index]
    }

    pub fn vertices(&self) -> &[RealVectorState<F, N>] {
        &self.vertices
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn start_vertices(&self) -> &[usize] {
        &self.start_vertices
    }

    pub fn goal_vertices(&self) -> &[usize] {
        &self.goal_vertices
    }

    pub fn is_start_vertex(&self, index: usize) -> bool {
        self.start_vertices.contains(&index)
    }

    pub fn is_goal_vertex(&self, index: usize) -> bool {
        self.goal_vertices.contains(&index)
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
}

impl<F: Float, const N: usize> Default for PlannerData<F, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_states_keep_their_own_vertices() {
        let mut data = PlannerData::<f64, 2>::new();
        let a = RealVectorState::new([0.0, 0.0]);
        let b = RealVectorState::new([1.0, 0.0]);
        assert_eq!(data.add_start_vertex(&a), 0);
        assert_eq!(data.add_start_vertex(&a), 1);
        let child = data.add_vertex(&b);
        let twin = data.add_vertex(&b);
        data.add_edge(0, child);
        data.add_edge(child, twin);
        data.tag_goal_vertex(twin);
        data.tag_goal_vertex(twin);

        assert_eq!(data.num_vertices(), 4);
        assert_eq!(data.start_vertices(), &[0, 1]);
        assert_eq!(data.edges(), &[(0, 2), (2, 3)]);
        assert!(data.edges().iter().all(|(from, to)| from != to));
        assert_eq!(data.goal_vertices(), &[3]);
        assert!(data.is_goal_vertex(3));
        assert!(!data.is_goal_vertex(2));
        assert_eq!(data.vertex(3), &b);
    }

    #[test]
    fn test_properties() {
        let mut data = PlannerData::<f32, 1>::new();
        data.set_property("iterations", 12);
        assert_eq!(data.property("iterations"), Some("12"));
        assert_eq!(data.property("missing"), None);
    }
}
