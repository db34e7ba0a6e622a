//! Conversion from XGBoost JSON types to the native model.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::model::{Booster, ModelMeta, OutputTransform};
use crate::repr::{CategoryBitset, Forest, NodeId, Tree};

use super::json::{GradientBooster, Tree as XgbTree, XgbModel};

/// Error loading or converting an XGBoost model.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse model JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported booster type '{0}' (only gbtree models are supported)")]
    UnsupportedBooster(&'static str),
    #[error("tree {0} has no nodes")]
    EmptyTree(usize),
    #[error("tree {tree} declares {num_nodes} nodes but its node arrays are shorter")]
    TruncatedTree { tree: usize, num_nodes: usize },
    #[error(
        "invalid node index in tree {tree}: node {node} references child {child} \
         but tree has {num_nodes} nodes"
    )]
    InvalidNodeIndex {
        tree: usize,
        node: usize,
        child: i32,
        num_nodes: usize,
    },
    #[error("tree {tree} is assigned to group {group} but the model has {n_groups} groups")]
    GroupOutOfRange { tree: usize, group: i32, n_groups: u32 },
}

/// Load an XGBoost JSON model file into a [`Booster`].
pub fn load_model(path: impl AsRef<Path>) -> Result<Booster, LoadError> {
    let file = File::open(path)?;
    let model = XgbModel::from_reader(BufReader::new(file))?;
    model.to_booster()
}

/// Convert base_score from probability space to margin space.
///
/// XGBoost stores base_score in probability/original space in JSON, but
/// margin accumulation needs it in margin space. This replicates XGBoost's
/// `ProbToMargin` logic.
fn prob_to_margin(base_score: f32, objective: &str) -> f32 {
    match objective {
        "binary:logistic" | "reg:logistic" => {
            // Clamp to keep the logit finite.
            let p = base_score.clamp(1e-7, 1.0 - 1e-7);
            (p / (1.0 - p)).ln()
        }
        "reg:gamma" | "reg:tweedie" => base_score.max(1e-7).ln(),
        _ => base_score,
    }
}

impl XgbModel {
    /// Convert to a native [`Booster`].
    ///
    /// Only gbtree models convert; dart and gblinear report
    /// [`LoadError::UnsupportedBooster`].
    pub fn to_booster(&self) -> Result<Booster, LoadError> {
        let model_trees = match &self.learner.gradient_booster {
            GradientBooster::Gbtree { model } => model,
            GradientBooster::Gblinear { .. } => {
                return Err(LoadError::UnsupportedBooster("gblinear"));
            }
            GradientBooster::Dart { .. } => {
                return Err(LoadError::UnsupportedBooster("dart"));
            }
        };

        let n_class = self.learner.learner_model_param.n_class;
        let n_groups = if n_class <= 1 { 1 } else { n_class as u32 };

        let objective = self.learner.objective.name.as_str();
        let raw_base_score = self.learner.learner_model_param.base_score;
        let margin_base_score = prob_to_margin(raw_base_score, objective);

        let mut forest =
            Forest::new(n_groups).with_base_score(vec![margin_base_score; n_groups as usize]);

        for (tree_idx, xgb_tree) in model_trees.trees.iter().enumerate() {
            let group = model_trees.tree_info.get(tree_idx).copied().unwrap_or(0);
            if group < 0 || group as u32 >= n_groups {
                return Err(LoadError::GroupOutOfRange {
                    tree: tree_idx,
                    group,
                    n_groups,
                });
            }
            let tree = convert_tree(xgb_tree, tree_idx)?;
            forest.push_tree(tree, group as u32);
        }

        let feature_names = if self.learner.feature_names.is_empty() {
            None
        } else {
            Some(self.learner.feature_names.clone())
        };

        let meta = ModelMeta {
            n_features: self.learner.learner_model_param.n_features.max(0) as usize,
            n_groups: n_groups as usize,
            feature_names,
            objective: objective.to_string(),
        };
        let transform = OutputTransform::for_objective(objective);

        Ok(Booster::from_parts(forest, meta, transform))
    }
}

/// Convert a single XGBoost tree.
fn convert_tree(xgb_tree: &XgbTree, tree_idx: usize) -> Result<Tree, LoadError> {
    let num_nodes = xgb_tree.tree_param.num_nodes.max(0) as usize;
    if num_nodes == 0 {
        return Err(LoadError::EmptyTree(tree_idx));
    }
    if xgb_tree.left_children.len() < num_nodes
        || xgb_tree.right_children.len() < num_nodes
        || xgb_tree.split_indices.len() < num_nodes
        || xgb_tree.split_conditions.len() < num_nodes
        || xgb_tree.default_left.len() < num_nodes
        || xgb_tree.base_weights.len() < num_nodes
    {
        return Err(LoadError::TruncatedTree {
            tree: tree_idx,
            num_nodes,
        });
    }

    let categories = build_categorical_map(xgb_tree);

    let mut split_index = Vec::with_capacity(num_nodes);
    let mut split_condition = Vec::with_capacity(num_nodes);
    let mut default_left = Vec::with_capacity(num_nodes);
    let mut leaf_value = Vec::with_capacity(num_nodes);

    for node_idx in 0..num_nodes {
        let left = xgb_tree.left_children[node_idx];
        let right = xgb_tree.right_children[node_idx];

        // A node is a leaf when its left child is -1 (XGBoost convention);
        // base_weights carries the leaf value.
        if left != -1 {
            for child in [left, right] {
                if child < 0 || child as usize >= num_nodes {
                    return Err(LoadError::InvalidNodeIndex {
                        tree: tree_idx,
                        node: node_idx,
                        child,
                        num_nodes,
                    });
                }
            }
        }

        split_index.push(xgb_tree.split_indices[node_idx].max(0) as u32);
        split_condition.push(xgb_tree.split_conditions[node_idx]);
        default_left.push(xgb_tree.default_left[node_idx] != 0);
        leaf_value.push(xgb_tree.base_weights[node_idx]);
    }

    Ok(Tree::from_parts(
        split_index,
        split_condition,
        xgb_tree.left_children[..num_nodes].to_vec(),
        xgb_tree.right_children[..num_nodes].to_vec(),
        default_left,
        leaf_value,
        categories,
    ))
}

/// Build the per-node category bitsets.
///
/// XGBoost JSON stores categorical splits in parallel arrays:
/// `categories_nodes` lists the node indices, `categories_segments` and
/// `categories_sizes` delimit each node's slice of `categories`, which
/// holds raw category values (not packed words).
fn build_categorical_map(xgb_tree: &XgbTree) -> HashMap<NodeId, CategoryBitset> {
    let mut map = HashMap::new();
    for i in 0..xgb_tree.categories_nodes.len() {
        let node_idx = xgb_tree.categories_nodes[i] as NodeId;
        let start = xgb_tree.categories_segments.get(i).copied().unwrap_or(0) as usize;
        let size = xgb_tree.categories_sizes.get(i).copied().unwrap_or(0) as usize;
        let values: Vec<u32> = xgb_tree
            .categories
            .get(start..start + size)
            .unwrap_or(&[])
            .iter()
            .map(|&c| c.max(0) as u32)
            .collect();
        map.insert(node_idx, CategoryBitset::from_categories(&values));
    }
    map
}
