//! rowboost: single-row scoring for gradient-boosted tree models.
//!
//! A small adapter that loads a pretrained XGBoost model from disk and
//! scores one feature row at a time. Callers describe rows as name-keyed
//! maps; the adapter lays them out in the model's feature order,
//! substitutes a missing-value sentinel for absent features, and returns
//! the model's scores.
//!
//! # Key Types
//!
//! - [`BoosterAdapter`] - build-once / eval-many adapter with typed errors
//! - [`FeatureSchema`] - ordered feature names plus the missing sentinel
//! - [`Booster`] - a loaded model (forest, metadata, output transform)
//! - [`ErrorPolicy`] - strict failures or legacy log-and-continue
//!
//! # Example
//!
//! ```no_run
//! use rowboost::BoosterAdapter;
//! use std::collections::HashMap;
//!
//! # fn main() -> Result<(), rowboost::AdapterError> {
//! let mut adapter = BoosterAdapter::new();
//! adapter.build(
//!     "$MODEL_DIR/model.json",
//!     vec!["coord:x".to_string(), "coord:y".to_string()],
//!     -999.0,
//! )?;
//!
//! let query = HashMap::from([("coord:x".to_string(), 5.0f32)]);
//! let score: f64 = adapter.eval_one(&query)?;
//! # let _ = score;
//! # Ok(())
//! # }
//! ```

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod adapter;
pub mod compat;
pub mod model;
pub mod repr;
pub mod testing;

// High-level adapter types
pub use adapter::{AdapterError, BoosterAdapter, ErrorPolicy, FeatureSchema, Score};

// Model types
pub use model::{Booster, ModelMeta, OutputTransform};
