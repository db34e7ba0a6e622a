//! Forest representation (collection of trees) with single-row prediction.

use super::Tree;

/// Forest of decision trees.
///
/// Stores trees together with their output-group assignments so that
/// multi-class models accumulate each tree into the right score slot.
/// Base scores are kept in margin space, one per group.
#[derive(Debug, Clone)]
pub struct Forest {
    trees: Vec<Tree>,
    tree_groups: Vec<u32>,
    n_groups: u32,
    base_score: Vec<f32>,
}

impl Forest {
    /// Create an empty forest with the given number of output groups.
    pub fn new(n_groups: u32) -> Self {
        Self {
            trees: Vec::new(),
            tree_groups: Vec::new(),
            n_groups,
            base_score: vec![0.0; n_groups as usize],
        }
    }

    /// Set the per-group base score (margin space).
    pub fn with_base_score(mut self, base_score: Vec<f32>) -> Self {
        debug_assert_eq!(base_score.len(), self.n_groups as usize);
        self.base_score = base_score;
        self
    }

    /// Add a tree to the forest.
    pub fn push_tree(&mut self, tree: Tree, group: u32) {
        debug_assert!(group < self.n_groups, "group out of range");
        self.trees.push(tree);
        self.tree_groups.push(group);
    }

    /// Number of trees.
    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Number of output groups.
    #[inline]
    pub fn n_groups(&self) -> u32 {
        self.n_groups
    }

    /// Per-group base scores (margin space).
    #[inline]
    pub fn base_score(&self) -> &[f32] {
        &self.base_score
    }

    /// Iterate over trees with their group assignments.
    pub fn trees_with_groups(&self) -> impl Iterator<Item = (&Tree, u32)> {
        self.trees
            .iter()
            .zip(self.tree_groups.iter())
            .map(|(t, &g)| (t, g))
    }

    /// Predict raw margins for a single dense row.
    ///
    /// Starts from the base scores and adds each tree's leaf value into the
    /// tree's group slot. `missing` is the sentinel treated as a missing
    /// value during traversal (NaN is always missing).
    pub fn predict_row(&self, features: &[f32], missing: f32) -> Vec<f32> {
        let mut output = self.base_score.clone();
        for (tree, group) in self.trees_with_groups() {
            let leaf = tree.traverse_to_leaf(features, missing);
            output[group as usize] += tree.leaf_value(leaf);
        }
        output
    }
}
