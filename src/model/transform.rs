//! Output transformation applied to raw margins at prediction time.

/// How raw margins are converted to final scores.
///
/// Derived from the model's objective name at load time so that prediction
/// does not need the training configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputTransform {
    /// No transformation; score = margin. Regression and raw-margin
    /// objectives.
    #[default]
    Identity,
    /// Logistic sigmoid, `1 / (1 + exp(-margin))`. Binary classification.
    Sigmoid,
    /// Softmax across the score vector. Multi-class probabilities.
    Softmax,
}

impl OutputTransform {
    /// Transform selected by XGBoost objective name.
    ///
    /// `multi:softmax` intentionally maps to `Identity`: the prediction call
    /// being mirrored returns margins for it, not an argmax.
    pub fn for_objective(objective: &str) -> Self {
        match objective {
            "binary:logistic" | "reg:logistic" => Self::Sigmoid,
            "multi:softprob" => Self::Softmax,
            _ => Self::Identity,
        }
    }

    /// Apply the transformation in place to one row of scores.
    pub fn apply(&self, scores: &mut [f32]) {
        match self {
            Self::Identity => {}
            Self::Sigmoid => {
                for s in scores.iter_mut() {
                    *s = sigmoid(*s);
                }
            }
            Self::Softmax => softmax_inplace(scores),
        }
    }
}

/// Numerically stable sigmoid; input clamped to avoid overflow in `exp`.
#[inline]
fn sigmoid(x: f32) -> f32 {
    let x = x.clamp(-500.0, 500.0);
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Numerically stable softmax; subtracts the row max before exponentiating.
#[inline]
fn softmax_inplace(row: &mut [f32]) {
    if row.is_empty() {
        return;
    }
    let max = row.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0f32;
    for x in row.iter_mut() {
        *x = (*x - max).exp();
        sum += *x;
    }
    if sum > 0.0 {
        for x in row.iter_mut() {
            *x /= sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn objective_name_selects_transform() {
        assert_eq!(
            OutputTransform::for_objective("binary:logistic"),
            OutputTransform::Sigmoid
        );
        assert_eq!(
            OutputTransform::for_objective("reg:logistic"),
            OutputTransform::Sigmoid
        );
        assert_eq!(
            OutputTransform::for_objective("multi:softprob"),
            OutputTransform::Softmax
        );
        assert_eq!(
            OutputTransform::for_objective("reg:squarederror"),
            OutputTransform::Identity
        );
        assert_eq!(
            OutputTransform::for_objective("binary:logitraw"),
            OutputTransform::Identity
        );
        assert_eq!(
            OutputTransform::for_objective("multi:softmax"),
            OutputTransform::Identity
        );
    }

    #[test]
    fn identity_is_noop() {
        let mut scores = vec![1.0, -2.0, 3.5];
        let original = scores.clone();
        OutputTransform::Identity.apply(&mut scores);
        assert_eq!(scores, original);
    }

    #[test]
    fn sigmoid_zero_is_half_and_bounded() {
        let mut scores = vec![0.0, -40.0, 40.0];
        OutputTransform::Sigmoid.apply(&mut scores);
        assert_abs_diff_eq!(scores[0], 0.5, epsilon = 1e-6);
        assert!(scores[1] > 0.0 && scores[1] < 1e-6);
        assert!(scores[2] < 1.0 && scores[2] > 1.0 - 1e-6);
    }

    #[test]
    fn sigmoid_extreme_inputs_stay_finite() {
        let mut scores = vec![f32::NEG_INFINITY, f32::INFINITY, -1e6, 1e6];
        OutputTransform::Sigmoid.apply(&mut scores);
        for s in scores {
            assert!(s.is_finite());
            assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn softmax_sums_to_one_and_preserves_order() {
        let mut scores = vec![1.0, 3.0, 2.0];
        OutputTransform::Softmax.apply(&mut scores);
        let sum: f32 = scores.iter().sum();
        assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-6);
        assert!(scores[1] > scores[2]);
        assert!(scores[2] > scores[0]);
    }

    #[test]
    fn softmax_large_margins_stable() {
        let mut scores = vec![400.0, 500.0];
        OutputTransform::Softmax.apply(&mut scores);
        let sum: f32 = scores.iter().sum();
        assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-6);
        assert!(scores[1] > scores[0]);
    }
}
