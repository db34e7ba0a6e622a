//! Shared fixtures for integration tests.
//!
//! Models are handcrafted XGBoost JSON documents small enough to predict
//! by hand, written to disk with `tempfile` so the adapter exercises the
//! real file-loading path.

#![allow(dead_code)]

use std::fs::File;
use std::path::PathBuf;

use serde_json::{json, Value};
use tempfile::TempDir;

#[allow(unused_imports)]
pub use rowboost::testing::{
    assert_slices_approx_eq, assert_slices_approx_eq_f64, DEFAULT_TOLERANCE, DEFAULT_TOLERANCE_F64,
};

/// Regression model over `["coord:x", "coord:y"]`, base score 0.5.
///
/// Tree 0 splits on `coord:x` at 1.0 (missing goes left): leaves -1.0 / 2.0.
/// Tree 1 splits on `coord:y` at 0.0 (missing goes right): leaves 0.25 / 0.75.
pub fn regression_model_json() -> Value {
    json!({
        "version": [2, 0, 0],
        "learner": {
            "feature_names": ["coord:x", "coord:y"],
            "objective": {"name": "reg:squarederror"},
            "learner_model_param": {
                "base_score": "5E-1",
                "num_class": "0",
                "num_feature": "2"
            },
            "gradient_booster": {
                "name": "gbtree",
                "model": {
                    "tree_info": [0, 0],
                    "trees": [
                        {
                            "tree_param": {"num_nodes": "3", "num_feature": "2"},
                            "base_weights": [0.0, -1.0, 2.0],
                            "left_children": [1, -1, -1],
                            "right_children": [2, -1, -1],
                            "split_indices": [0, 0, 0],
                            "split_conditions": [1.0, 0.0, 0.0],
                            "default_left": [1, 0, 0]
                        },
                        {
                            "tree_param": {"num_nodes": "3", "num_feature": "2"},
                            "base_weights": [0.0, 0.25, 0.75],
                            "left_children": [1, -1, -1],
                            "right_children": [2, -1, -1],
                            "split_indices": [1, 0, 0],
                            "split_conditions": [0.0, 0.0, 0.0],
                            "default_left": [0, 0, 0]
                        }
                    ]
                }
            }
        }
    })
}

/// Same structure as [`regression_model_json`] with a logistic objective.
/// Base score 0.5 is margin 0, so scores are `sigmoid(leaf sums)`.
pub fn binary_model_json() -> Value {
    let mut value = regression_model_json();
    value["learner"]["objective"]["name"] = json!("binary:logistic");
    value
}

/// Three-class softprob model over one feature: one constant leaf per
/// class with margins 0.5, 0.25, -0.25.
pub fn multiclass_model_json() -> Value {
    let leaf = |weight: f64| {
        json!({
            "tree_param": {"num_nodes": "1", "num_feature": "1"},
            "base_weights": [weight],
            "left_children": [-1],
            "right_children": [-1],
            "split_indices": [0],
            "split_conditions": [0.0],
            "default_left": [0]
        })
    };
    json!({
        "version": [2, 0, 0],
        "learner": {
            "objective": {"name": "multi:softprob"},
            "learner_model_param": {
                "base_score": "0",
                "num_class": "3",
                "num_feature": "1"
            },
            "gradient_booster": {
                "name": "gbtree",
                "model": {
                    "tree_info": [0, 1, 2],
                    "trees": [leaf(0.5), leaf(0.25), leaf(-0.25)]
                }
            }
        }
    })
}

/// Write a model document into `dir` and return its path.
pub fn write_model(dir: &TempDir, value: &Value) -> PathBuf {
    let path = dir.path().join("model.json");
    let file = File::create(&path).expect("create model file");
    serde_json::to_writer(file, value).expect("write model file");
    path
}

/// Feature names matching the regression/binary fixtures.
pub fn coord_names() -> Vec<String> {
    vec!["coord:x".to_string(), "coord:y".to_string()]
}
