//! Assertion helpers shared by unit and integration tests.

/// Default tolerance for floating point comparisons.
pub const DEFAULT_TOLERANCE: f32 = 1e-5;

/// Default tolerance for f64 comparisons against expected values.
pub const DEFAULT_TOLERANCE_F64: f64 = 1e-5;

/// Assert that two f32 slices are element-wise equal within `tolerance`.
///
/// # Panics
///
/// Panics with the differing index and values on mismatch.
pub fn assert_slices_approx_eq(actual: &[f32], expected: &[f32], tolerance: f32, context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: length mismatch - got {}, expected {}",
        actual.len(),
        expected.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        assert!(
            diff <= tolerance,
            "{context}: index {i} differs - got {a}, expected {e} (diff {diff}, tol {tolerance})"
        );
    }
}

/// f64 variant of [`assert_slices_approx_eq`].
pub fn assert_slices_approx_eq_f64(actual: &[f64], expected: &[f64], tolerance: f64, context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: length mismatch - got {}, expected {}",
        actual.len(),
        expected.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        assert!(
            diff <= tolerance,
            "{context}: index {i} differs - got {a}, expected {e} (diff {diff}, tol {tolerance})"
        );
    }
}
