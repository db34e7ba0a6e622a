//! Adapter error type.

use std::path::PathBuf;

use crate::compat::xgboost::LoadError;

/// Errors surfaced by [`BoosterAdapter`](super::BoosterAdapter).
///
/// Every condition that aborted the process in the system this adapter
/// replaces is reported as a typed error here; the caller decides whether
/// to terminate.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("model is already built; build() can only be called once per adapter")]
    AlreadyBuilt,
    #[error("model path is empty")]
    EmptyPath,
    #[error("model file {0} does not exist")]
    FileNotFound(PathBuf),
    #[error("model load failed: {0}")]
    Load(#[from] LoadError),
    #[error("no model has been built; call build() before eval()")]
    NotBuilt,
    #[error("expected exactly one score but the model produced {n_scores}")]
    ScoreShape { n_scores: usize },
}
