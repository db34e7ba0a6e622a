//! Feature schema: ordered names plus the missing-value sentinel.

use std::collections::HashMap;

/// Ordered feature names and the sentinel substituted for absent features.
///
/// Fixed when the adapter is built; queries are name-keyed maps that are
/// laid out into a dense row in schema order.
#[derive(Debug, Clone, Default)]
pub struct FeatureSchema {
    names: Vec<String>,
    missing: f32,
}

impl FeatureSchema {
    /// Create a schema from ordered names and a missing-value sentinel.
    pub fn new(names: Vec<String>, missing: f32) -> Self {
        Self { names, missing }
    }

    /// Number of features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.names.len()
    }

    /// Ordered feature names.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The missing-value sentinel.
    #[inline]
    pub fn missing_value(&self) -> f32 {
        self.missing
    }

    /// Lay out a name-keyed query as a dense row in schema order.
    ///
    /// Schema names absent from the query receive the missing sentinel;
    /// query keys outside the schema are ignored.
    pub fn dense_row(&self, query: &HashMap<String, f32>) -> Vec<f32> {
        self.names
            .iter()
            .map(|name| query.get(name).copied().unwrap_or(self.missing))
            .collect()
    }
}
