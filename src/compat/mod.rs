//! Model-format compatibility layers.

pub mod xgboost;

pub use xgboost::XgbModel;
