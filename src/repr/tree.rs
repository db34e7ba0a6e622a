//! Single-tree storage and traversal.
//!
//! Trees are stored as parallel per-node arrays in the order the model file
//! lists them (BFS for XGBoost). A node is a leaf when its left child is
//! [`NO_CHILD`]; leaves carry their value in `leaf_value`, splits carry a
//! feature index, a threshold (numeric) or a category bitset (categorical),
//! and a default direction for missing values.

use std::collections::HashMap;

use super::NodeId;

/// Child index marking a leaf node.
pub const NO_CHILD: i32 = -1;

/// Split kind of an internal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitType {
    /// Go left iff `value < threshold`; equality goes right.
    Numeric,
    /// Go right iff the category is in the node's bitset.
    Categorical,
}

/// Packed set of category values that route to the right child.
///
/// Bit `c` of the packed words is set when category `c` goes right.
/// Categories beyond the stored words are treated as not-in-set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBitset(Box<[u32]>);

impl CategoryBitset {
    /// Build a bitset from raw category values.
    pub fn from_categories(categories: &[u32]) -> Self {
        let n_words = categories
            .iter()
            .map(|&c| c as usize / 32 + 1)
            .max()
            .unwrap_or(0);
        let mut words = vec![0u32; n_words];
        for &c in categories {
            words[c as usize / 32] |= 1 << (c % 32);
        }
        Self(words.into_boxed_slice())
    }

    /// Whether the given category routes right.
    #[inline]
    pub fn contains(&self, category: u32) -> bool {
        self.0
            .get(category as usize / 32)
            .is_some_and(|w| w & (1 << (category % 32)) != 0)
    }
}

/// Convert a float feature value to a category id.
///
/// Matches XGBoost: values are truncated toward zero, and negative values
/// map to an id that no bitset contains.
#[inline]
pub fn float_to_category(value: f32) -> u32 {
    if value < 0.0 {
        u32::MAX
    } else {
        value as u32
    }
}

/// Immutable decision tree.
#[derive(Debug, Clone)]
pub struct Tree {
    split_index: Vec<u32>,
    split_condition: Vec<f32>,
    left_child: Vec<i32>,
    right_child: Vec<i32>,
    default_left: Vec<bool>,
    leaf_value: Vec<f32>,
    categories: HashMap<NodeId, CategoryBitset>,
}

impl Tree {
    /// Assemble a tree from per-node arrays.
    ///
    /// All arrays must have the same length; callers (the model converter)
    /// are responsible for validating child indices beforehand.
    pub fn from_parts(
        split_index: Vec<u32>,
        split_condition: Vec<f32>,
        left_child: Vec<i32>,
        right_child: Vec<i32>,
        default_left: Vec<bool>,
        leaf_value: Vec<f32>,
        categories: HashMap<NodeId, CategoryBitset>,
    ) -> Self {
        let n = split_index.len();
        debug_assert_eq!(split_condition.len(), n);
        debug_assert_eq!(left_child.len(), n);
        debug_assert_eq!(right_child.len(), n);
        debug_assert_eq!(default_left.len(), n);
        debug_assert_eq!(leaf_value.len(), n);
        Self {
            split_index,
            split_condition,
            left_child,
            right_child,
            default_left,
            leaf_value,
            categories,
        }
    }

    /// Single-leaf tree, useful for tests and stump models.
    pub fn leaf(value: f32) -> Self {
        Self::from_parts(
            vec![0],
            vec![0.0],
            vec![NO_CHILD],
            vec![NO_CHILD],
            vec![true],
            vec![value],
            HashMap::new(),
        )
    }

    /// Number of nodes.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.split_index.len()
    }

    /// Check if a node is a leaf.
    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.left_child[node as usize] == NO_CHILD
    }

    /// Feature index of a split node.
    #[inline]
    pub fn split_index(&self, node: NodeId) -> u32 {
        self.split_index[node as usize]
    }

    /// Threshold of a numeric split node.
    #[inline]
    pub fn split_threshold(&self, node: NodeId) -> f32 {
        self.split_condition[node as usize]
    }

    /// Left child of a split node.
    #[inline]
    pub fn left_child(&self, node: NodeId) -> NodeId {
        self.left_child[node as usize] as NodeId
    }

    /// Right child of a split node.
    #[inline]
    pub fn right_child(&self, node: NodeId) -> NodeId {
        self.right_child[node as usize] as NodeId
    }

    /// Default direction for missing values at a split node.
    #[inline]
    pub fn default_left(&self, node: NodeId) -> bool {
        self.default_left[node as usize]
    }

    /// Split kind of a node.
    #[inline]
    pub fn split_type(&self, node: NodeId) -> SplitType {
        if self.categories.contains_key(&node) {
            SplitType::Categorical
        } else {
            SplitType::Numeric
        }
    }

    /// Value stored at a leaf node.
    #[inline]
    pub fn leaf_value(&self, node: NodeId) -> f32 {
        self.leaf_value[node as usize]
    }

    /// Whether the given category routes right at a categorical split node.
    #[inline]
    pub fn category_goes_right(&self, node: NodeId, category: u32) -> bool {
        self.categories
            .get(&node)
            .is_some_and(|set| set.contains(category))
    }

    /// Traverse from the root to a leaf for one dense row.
    ///
    /// A feature value is treated as missing when it is NaN or equals the
    /// `missing` sentinel; missing values follow the node's default
    /// direction. Rows shorter than the tree's feature indices read as
    /// missing.
    pub fn traverse_to_leaf(&self, features: &[f32], missing: f32) -> NodeId {
        let mut node = 0u32;

        while !self.is_leaf(node) {
            let feat_idx = self.split_index(node) as usize;
            let fvalue = features.get(feat_idx).copied().unwrap_or(f32::NAN);

            node = if fvalue.is_nan() || fvalue == missing {
                if self.default_left(node) {
                    self.left_child(node)
                } else {
                    self.right_child(node)
                }
            } else {
                match self.split_type(node) {
                    SplitType::Numeric => {
                        if fvalue < self.split_threshold(node) {
                            self.left_child(node)
                        } else {
                            self.right_child(node)
                        }
                    }
                    SplitType::Categorical => {
                        let category = float_to_category(fvalue);
                        if self.category_goes_right(node, category) {
                            self.right_child(node)
                        } else {
                            self.left_child(node)
                        }
                    }
                }
            };
        }

        node
    }
}
