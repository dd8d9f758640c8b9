use crate::rrt::state::RealVectorState;
use kiddo::float::{distance::SquaredEuclidean, kdtree::Axis, kdtree::KdTree};
use num_traits::Float;
use std::collections::HashSet;

/// A distance function over configurations.
pub type DistanceFunction<F, const N: usize> =
    Box<dyn Fn(&RealVectorState<F, N>, &RealVectorState<F, N>) -> F>;

/// A nearest neighbor index over RealVectorStates.
/// Stores each state together with a usize item (the index of the motion it belongs to).
pub trait NearestNeighbors<F: Float, const N: usize> {
    /// Constructs a new, empty index.
    fn new() -> Self;

    /// Whether the index can only answer queries under the Euclidean metric.
    fn requires_euclidean() -> bool {
        false
    }

    /// Sets the distance function used to rank neighbors.
    fn set_distance_function(&mut self, distance: DistanceFunction<F, N>);

    /// Adds a state to the index.
    ///
    /// Parameters:
    /// - `state`: The RealVectorState to add.
    /// - `item`: The item stored with the state.
    fn add(&mut self, state: RealVectorState<F, N>, item: usize);

    /// Gets the item whose state is nearest to `state`, or None if the index is empty.
    fn nearest_one(&self, state: &RealVectorState<F, N>) -> Option<usize>;

    /// Lists every item in insertion order.
    fn list(&self) -> Vec<usize>;

    /// Number of stored states.
    fn size(&self) -> usize;

    /// Removes every state from the index.
    fn clear(&mut self);
}

/// Brute-force index: scans every stored state with the configured distance function.
/// Ties go to the earliest inserted item.
pub struct LinearNearestNeighbors<F: Float, const N: usize> {
    states: Vec<(RealVectorState<F, N>, usize)>,
    distance: Option<DistanceFunction<F, N>>,
}

impl<F: Float, const N: usize> LinearNearestNeighbors<F, N> {
    fn distance(&self, a: &RealVectorState<F, N>, b: &RealVectorState<F, N>) -> F {
        match &self.distance {
            Some(distance) => distance(a, b),
            None => a.euclidean_distance(b),
        }
    }
}

impl<F: Float, const N: usize> NearestNeighbors<F, N> for LinearNearestNeighbors<F, N> {
    fn new() -> Self {
        Self {
            states: Vec::new(),
            distance: None,
        }
    }

    fn set_distance_function(&mut self, distance: DistanceFunction<F, N>) {
        self.distance = Some(distance);
    }

    fn add(&mut self, state: RealVectorState<F, N>, item: usize) {
        self.states.push((state, item));
    }

    fn nearest_one(&self, state: &RealVectorState<F, N>) -> Option<usize> {
        let mut best: Option<(F, usize)> = None;
        for (candidate, item) in &self.states {
            let d = self.distance(state, candidate);
            match best {
                Some((best_distance, _)) if !(d < best_distance) => {}
                _ => best = Some((d, *item)),
            }
        }
        best.map(|(_, item)| item)
    }

    fn list(&self) -> Vec<usize> {
        self.states.iter().map(|(_, item)| *item).collect()
    }

    fn size(&self) -> usize {
        self.states.len()
    }

    fn clear(&mut self) {
        self.states.clear();
    }
}

/// Kd-tree index backed by kiddo. Ranks neighbors by Euclidean distance over the raw
/// coordinates, so it ignores any distance function it is given.
///
/// Only the first item added at a given point enters the kd-tree (a kiddo leaf holds at most
/// 32 items at one point). Later items at the same point are still listed and counted.
pub struct KdTreeNearestNeighbors<F: Float + Axis, const N: usize> {
    kdtree: KdTree<F, usize, N, 32, u32>,
    /// Bit patterns of the points already in the kd-tree.
    points: HashSet<Vec<u64>>,
    items: Vec<usize>,
}

impl<F: Float + Axis, const N: usize> KdTreeNearestNeighbors<F, N> {
    fn point_key(state: &RealVectorState<F, N>) -> Vec<u64> {
        state
            .values()
            .iter()
            // Adding zero folds -0.0 into 0.0.
            .map(|v| (v.to_f64().unwrap_or(f64::NAN) + 0.0).to_bits())
            .collect()
    }
}

impl<F: Float + Axis, const N: usize> NearestNeighbors<F, N> for KdTreeNearestNeighbors<F, N> {
    fn new() -> Self {
        Self {
            kdtree: KdTree::new(),
            points: HashSet::new(),
            items: Vec::new(),
        }
    }

    fn requires_euclidean() -> bool {
        true
    }

    fn set_distance_function(&mut self, _distance: DistanceFunction<F, N>) {}

    fn add(&mut self, state: RealVectorState<F, N>, item: usize) {
        if self.points.insert(Self::point_key(&state)) {
            self.kdtree.add(state.values(), item);
        }
        self.items.push(item);
    }

    fn nearest_one(&self, state: &RealVectorState<F, N>) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        let neighbor = self.kdtree.nearest_one::<SquaredEuclidean>(state.values());
        Some(neighbor.item)
    }

    fn list(&self) -> Vec<usize> {
        self.items.clone()
    }

    fn size(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.kdtree = KdTree::new();
        self.points.clear();
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<RealVectorState<f64, 2>> {
        vec![
            RealVectorState::new([0.0, 0.0]),
            RealVectorState::new([5.0, 5.0]),
            RealVectorState::new([9.0, 1.0]),
            RealVectorState::new([2.0, 8.0]),
        ]
    }

    fn check_backend<NN: NearestNeighbors<f64, 2>>() {
        let mut nn = NN::new();
        assert_eq!(nn.nearest_one(&RealVectorState::new([1.0, 1.0])), None);
        for (i, p) in points().into_iter().enumerate() {
            nn.add(p, i);
        }
        assert_eq!(nn.size(), 4);
        assert_eq!(nn.list(), vec![0, 1, 2, 3]);
        assert_eq!(nn.nearest_one(&RealVectorState::new([1.0, 1.0])), Some(0));
        assert_eq!(nn.nearest_one(&RealVectorState::new([8.0, 0.0])), Some(2));
        assert_eq!(nn.nearest_one(&RealVectorState::new([2.5, 9.0])), Some(3));
        nn.clear();
        assert_eq!(nn.size(), 0);
        assert!(nn.list().is_empty());
        assert_eq!(nn.nearest_one(&RealVectorState::new([1.0, 1.0])), None);
    }

    #[test]
    fn test_linear_backend() {
        check_backend::<LinearNearestNeighbors<f64, 2>>();
    }

    #[test]
    fn test_kdtree_backend() {
        check_backend::<KdTreeNearestNeighbors<f64, 2>>();
        assert!(KdTreeNearestNeighbors::<f64, 2>::requires_euclidean());
    }

    #[test]
    fn test_kdtree_accepts_many_items_at_one_point() {
        let mut nn = KdTreeNearestNeighbors::<f64, 2>::new();
        nn.add(RealVectorState::new([1.0, 1.0]), 0);
        for item in 1..=40 {
            nn.add(RealVectorState::new([9.0, 9.0]), item);
        }
        nn.add(RealVectorState::new([-0.0, 5.0]), 41);
        nn.add(RealVectorState::new([0.0, 5.0]), 42);

        assert_eq!(nn.size(), 43);
        assert_eq!(nn.list(), (0..43).collect::<Vec<_>>());
        // The first item at a repeated point answers for all of them.
        assert_eq!(nn.nearest_one(&RealVectorState::new([9.0, 9.0])), Some(1));
        assert_eq!(nn.nearest_one(&RealVectorState::new([8.0, 9.5])), Some(1));
        assert_eq!(nn.nearest_one(&RealVectorState::new([0.0, 5.0])), Some(41));
        assert_eq!(nn.nearest_one(&RealVectorState::new([1.0, 0.0])), Some(0));

        nn.clear();
        for item in 0..40 {
            nn.add(RealVectorState::new([9.0, 9.0]), item);
        }
        assert_eq!(nn.nearest_one(&RealVectorState::new([0.0, 0.0])), Some(0));
    }

    #[test]
    fn test_linear_uses_distance_function() {
        let mut nn = LinearNearestNeighbors::<f64, 2>::new();
        // Only the first coordinate counts.
        nn.set_distance_function(Box::new(
            |a: &RealVectorState<f64, 2>, b: &RealVectorState<f64, 2>| (a[0] - b[0]).abs(),
        ));
        nn.add(RealVectorState::new([0.0, 100.0]), 0);
        nn.add(RealVectorState::new([3.0, 0.0]), 1);
        assert_eq!(nn.nearest_one(&RealVectorState::new([1.0, 0.0])), Some(0));
    }

    #[test]
    fn test_linear_ties_go_to_first_inserted() {
        let mut nn = LinearNearestNeighbors::<f64, 1>::new();
        nn.add(RealVectorState::new([-1.0]), 7);
        nn.add(RealVectorState::new([1.0]), 3);
        assert_eq!(nn.nearest_one(&RealVectorState::new([0.0])), Some(7));
    }
}
