//! XGBoost JSON model format support.
//!
//! [`json`] holds the serde foreign types for the file format and
//! [`convert`] turns a parsed model into a native [`Booster`].
//!
//! [`Booster`]: crate::model::Booster

mod convert;
mod json;

pub use convert::{load_model, LoadError};
pub use json::*;
