use crate::rrt::neighbors::{DistanceFunction, NearestNeighbors};
use crate::rrt::state::RealVectorState;
use num_traits::Float;

/// A node of the search tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Motion<F: Float, const N: usize> {
    /// The configuration reached by this motion.
    state: RealVectorState<F, N>,
    /// The index of the parent motion (None if the motion is a root).
    parent: Option<usize>,
}

impl<F: Float, const N: usize> Motion<F, N> {
    pub fn root(state: RealVectorState<F, N>) -> Self {
        Self {
            state,
            parent: None,
        }
    }

    pub fn with_parent(state: RealVectorState<F, N>, parent: usize) -> Self {
        Self {
            state,
            parent: Some(parent),
        }
    }

    pub fn state(&self) -> &RealVectorState<F, N> {
        &self.state
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Owns every motion of a search tree (possibly a forest, one tree per start) and keeps a
/// nearest neighbors index over their states in step with it.
///
/// Motions are only ever appended, and parents are indices of motions added earlier, so
/// following parents from any motion reaches a root in at most `len()` steps.
pub struct MotionTree<F: Float, const N: usize, NN: NearestNeighbors<F, N>> {
    motions: Vec<Motion<F, N>>,
    nearest_neighbors: NN,
}

impl<F: Float, const N: usize, NN: NearestNeighbors<F, N>> MotionTree<F, N, NN> {
    pub fn new() -> Self {
        Self {
            motions: Vec::new(),
            nearest_neighbors: NN::new(),
        }
    }

    pub fn set_distance_function(&mut self, distance: DistanceFunction<F, N>) {
        self.nearest_neighbors.set_distance_function(distance);
    }

    /// Adds a motion and returns its index.
    pub fn add(&mut self, motion: Motion<F, N>) -> usize {
        debug_assert!(motion.parent.map_or(true, |p| p < self.motions.len()));
        let index = self.motions.len();
        self.nearest_neighbors.add(motion.state, index);
        self.motions.push(motion);
        index
    }

    /// Index of the motion nearest to `state`, or None if the tree is empty.
    pub fn nearest(&self, state: &RealVectorState<F, N>) -> Option<usize> {
        self.nearest_neighbors.nearest_one(state)
    }

    pub fn motion(&self, index: usize) -> &Motion<F, N> {
        &self.motions[index]
    }

    pub fn motions(&self) -> &[Motion<F, N>] {
        &self.motions
    }

    pub fn len(&self) -> usize {
        self.motions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motions.is_empty()
    }

    /// Indices of the motions without a parent.
    pub fn roots(&self) -> Vec<usize> {
        self.motions
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_root())
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of edges between the motion and its root.
    pub fn depth(&self, index: usize) -> usize {
        let mut depth = 0;
        let mut current = index;
        while let Some(parent) = self.motions[current].parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// States from the root of the motion's tree down to the motion itself.
    pub fn path_to(&self, index: usize) -> Vec<RealVectorState<F, N>> {
        let mut path = Vec::with_capacity(self.depth(index) + 1);
        let mut current = Some(index);

        // Backtrack up the tree by following the parent indices.
        while let Some(i) = current {
            let motion = &self.motions[i];
            path.push(motion.state);
            current = motion.parent;
        }

        path.reverse();
        path
    }

    /// Drops every motion.
    pub fn clear(&mut self) {
        self.motions.clear();
        self.nearest_neighbors.clear();
    }
}

impl<F: Float, const N: usize, NN: NearestNeighbors<F, N>> Default for MotionTree<F, N, NN> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rrt::neighbors::LinearNearestNeighbors;

    type Tree = MotionTree<f64, 1, LinearNearestNeighbors<f64, 1>>;
    type S = RealVectorState<f64, 1>;

    fn forest() -> Tree {
        // 0 -> 1 -> 2, 0 -> 3, and a second root 4 -> 5
        let mut tree = Tree::new();
        tree.add(Motion::root(S::new([0.0])));
        tree.add(Motion::with_parent(S::new([1.0]), 0));
        tree.add(Motion::with_parent(S::new([2.0]), 1));
        tree.add(Motion::with_parent(S::new([-1.0]), 0));
        tree.add(Motion::root(S::new([10.0])));
        tree.add(Motion::with_parent(S::new([11.0]), 4));
        tree
    }

    #[test]
    fn test_path_to_runs_root_first() {
        let tree = forest();
        assert_eq!(
            tree.path_to(2),
            vec![S::new([0.0]), S::new([1.0]), S::new([2.0])]
        );
        assert_eq!(tree.path_to(5), vec![S::new([10.0]), S::new([11.0])]);
        assert_eq!(tree.path_to(4), vec![S::new([10.0])]);
        assert_eq!(tree.depth(2), 2);
        assert_eq!(tree.depth(0), 0);
    }

    #[test]
    fn test_roots_and_nearest() {
        let tree = forest();
        assert_eq!(tree.roots(), vec![0, 4]);
        assert_eq!(tree.nearest(&S::new([9.0])), Some(4));
        assert_eq!(tree.nearest(&S::new([1.8])), Some(2));
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn test_clear() {
        let mut tree = forest();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.nearest(&S::new([0.0])), None);
    }
}
