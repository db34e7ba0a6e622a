//! In-memory model representation: trees and forests.

mod forest;
mod tree;

/// Node index within a tree.
pub type NodeId = u32;

pub use forest::Forest;
pub use tree::{float_to_category, CategoryBitset, SplitType, Tree, NO_CHILD};
