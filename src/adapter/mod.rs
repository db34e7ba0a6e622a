//! Single-row scoring adapter over a loaded boosting model.
//!
//! [`BoosterAdapter`] owns at most one loaded model together with a fixed
//! [`FeatureSchema`]. `build` loads a model file once; `eval` maps a
//! name-keyed feature query onto a dense row in schema order, runs a
//! single-sample prediction, and returns the scores in the caller's
//! numeric width.
//!
//! Failure handling has two modes. [`ErrorPolicy::Strict`] (the default)
//! turns every failure into a typed [`AdapterError`].
//! [`ErrorPolicy::Lenient`] preserves the log-and-continue behavior of the
//! system this adapter replaces: a failed model load is logged and reported
//! as success (leaving the adapter unbuilt), and a multi-score model
//! queried for a single score logs an error and returns the first score.

mod error;
mod path;
mod schema;

pub use error::AdapterError;
pub use schema::FeatureSchema;

use std::collections::HashMap;

use tracing::{error, info, warn};

use crate::compat::xgboost;
use crate::model::Booster;

/// How the adapter reacts to recoverable failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Every failure is a typed error.
    #[default]
    Strict,
    /// Log-and-continue compatibility mode for failed loads and score-shape
    /// mismatches. Structural misuse (double build, eval before build,
    /// bad paths) stays typed even here.
    Lenient,
}

/// Numeric width for returned scores.
///
/// The engine accumulates in `f32`; results widen or pass through with
/// ordinary numeric conversion.
pub trait Score: Copy {
    fn from_raw(raw: f32) -> Self;
}

impl Score for f32 {
    #[inline]
    fn from_raw(raw: f32) -> Self {
        raw
    }
}

impl Score for f64 {
    #[inline]
    fn from_raw(raw: f32) -> Self {
        raw as f64
    }
}

/// Single-row scoring adapter holding one loaded model and its schema.
#[derive(Debug, Default)]
pub struct BoosterAdapter {
    booster: Option<Booster>,
    schema: FeatureSchema,
    policy: ErrorPolicy,
}

impl BoosterAdapter {
    /// Create an adapter with no loaded model, a missing value of zero,
    /// and the strict error policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an adapter with the given error policy.
    pub fn with_policy(policy: ErrorPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// The active error policy.
    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Whether a model has been loaded.
    pub fn is_built(&self) -> bool {
        self.booster.is_some()
    }

    /// The loaded model, if any.
    pub fn booster(&self) -> Option<&Booster> {
        self.booster.as_ref()
    }

    /// The feature schema fixed at build time.
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Ordered feature names fixed at build time.
    pub fn feature_names(&self) -> &[String] {
        self.schema.names()
    }

    /// The missing-value sentinel fixed at build time.
    pub fn missing_value(&self) -> f32 {
        self.schema.missing_value()
    }

    /// Load a model file and fix the feature schema.
    ///
    /// `path` may contain `$VAR` / `${VAR}` environment references. `names`
    /// is the ordered feature list the model was trained with, and
    /// `missing` is the sentinel substituted for features absent from a
    /// query (and treated as missing during traversal).
    ///
    /// An adapter loads at most one model: a second call fails with
    /// [`AdapterError::AlreadyBuilt`] and leaves the loaded model in place.
    pub fn build(
        &mut self,
        path: &str,
        names: Vec<String>,
        missing: f32,
    ) -> Result<(), AdapterError> {
        if self.booster.is_some() {
            warn!("model is already built; ignoring build request");
            return Err(AdapterError::AlreadyBuilt);
        }

        let resolved = path::resolve(path)?;
        info!(path = %resolved.display(), "loading model");

        let booster = match xgboost::load_model(&resolved) {
            Ok(booster) => booster,
            Err(err) => match self.policy {
                ErrorPolicy::Strict => return Err(err.into()),
                ErrorPolicy::Lenient => {
                    error!(
                        path = %resolved.display(),
                        error = %err,
                        "model load failed; continuing without a model"
                    );
                    return Ok(());
                }
            },
        };

        if booster.meta().n_features > names.len() {
            warn!(
                model_features = booster.meta().n_features,
                schema_features = names.len(),
                "model declares more features than the schema provides; \
                 missing slots will follow default directions"
            );
        }

        self.schema = FeatureSchema::new(names, missing);
        self.booster = Some(booster);
        Ok(())
    }

    /// Score one feature query, returning all model outputs.
    ///
    /// The result length is the model's output count: 1 for regression and
    /// binary models, K for a K-class model. Schema features absent from
    /// the query receive the missing sentinel; query keys outside the
    /// schema are ignored.
    pub fn eval<T: Score>(&self, query: &HashMap<String, f32>) -> Result<Vec<T>, AdapterError> {
        let booster = self.booster.as_ref().ok_or(AdapterError::NotBuilt)?;
        let row = self.schema.dense_row(query);
        let scores = booster.predict_row(&row, self.schema.missing_value());
        Ok(scores.into_iter().map(T::from_raw).collect())
    }

    /// Score one feature query expecting exactly one output.
    ///
    /// Fails with [`AdapterError::ScoreShape`] when the model produces a
    /// different number of scores; in lenient mode the first score is
    /// returned after logging instead.
    pub fn eval_one<T: Score>(&self, query: &HashMap<String, f32>) -> Result<T, AdapterError> {
        let scores: Vec<T> = self.eval(query)?;
        if scores.len() == 1 {
            return Ok(scores[0]);
        }
        match self.policy {
            ErrorPolicy::Strict => Err(AdapterError::ScoreShape {
                n_scores: scores.len(),
            }),
            ErrorPolicy::Lenient => {
                error!(
                    n_scores = scores.len(),
                    "expected exactly one score; returning the first"
                );
                scores
                    .first()
                    .copied()
                    .ok_or(AdapterError::ScoreShape { n_scores: 0 })
            }
        }
    }
}
