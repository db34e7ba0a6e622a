//! Loaded model: forest plus metadata and output transform.
//!
//! [`Booster`] is what the adapter holds once a model file has been loaded
//! and converted. It owns the forest, knows how many scores one prediction
//! produces, and applies the objective's output transform.

mod transform;

pub use transform::OutputTransform;

use ndarray::{Array2, ArrayView2};

use crate::repr::Forest;

/// Introspection metadata carried alongside the forest.
#[derive(Debug, Clone, Default)]
pub struct ModelMeta {
    /// Number of features the model was trained with.
    pub n_features: usize,
    /// Number of output groups (scores per prediction).
    pub n_groups: usize,
    /// Feature names stored in the model file, if any.
    pub feature_names: Option<Vec<String>>,
    /// Objective name as recorded in the model file.
    pub objective: String,
}

/// A loaded gradient-boosted tree model ready for prediction.
#[derive(Debug, Clone)]
pub struct Booster {
    forest: Forest,
    meta: ModelMeta,
    transform: OutputTransform,
}

impl Booster {
    /// Assemble a booster from its parts.
    pub fn from_parts(forest: Forest, meta: ModelMeta, transform: OutputTransform) -> Self {
        Self {
            forest,
            meta,
            transform,
        }
    }

    /// The underlying forest.
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Model metadata.
    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    /// Output transform applied after margin accumulation.
    pub fn transform(&self) -> OutputTransform {
        self.transform
    }

    /// Number of scores one prediction produces.
    #[inline]
    pub fn n_scores(&self) -> usize {
        self.forest.n_groups() as usize
    }

    /// Predict transformed scores for a single dense row.
    ///
    /// `missing` is the sentinel treated as a missing value during
    /// traversal, in addition to NaN. The result has [`n_scores`] elements.
    ///
    /// [`n_scores`]: Self::n_scores
    pub fn predict_row(&self, features: &[f32], missing: f32) -> Vec<f32> {
        let mut scores = self.forest.predict_row(features, missing);
        self.transform.apply(&mut scores);
        scores
    }

    /// Predict transformed scores for a row-major batch.
    ///
    /// Rows are scored independently, one at a time. Returns an array of
    /// shape `[n_rows, n_scores]`.
    pub fn predict(&self, features: ArrayView2<f32>, missing: f32) -> Array2<f32> {
        let n_rows = features.nrows();
        let n_scores = self.n_scores();
        let mut output = Array2::<f32>::zeros((n_rows, n_scores));
        let mut row_buf = vec![0.0f32; features.ncols()];
        for (row, mut out) in features.outer_iter().zip(output.outer_iter_mut()) {
            for (b, v) in row_buf.iter_mut().zip(row.iter()) {
                *b = *v;
            }
            let scores = self.predict_row(&row_buf, missing);
            for (o, s) in out.iter_mut().zip(scores.iter()) {
                *o = *s;
            }
        }
        output
    }
}
