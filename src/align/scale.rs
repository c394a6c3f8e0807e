use super::matrix::ScoreMatrix;
use super::transform::ScoreTransform;

/// Largest exponent kept below the `f64` overflow point (`ln(f64::MAX)` is
/// about 709.78).
const MAX_EXPONENT: f64 = 709.0;

/// Maps every score through `exp(scale * (s - 1))`, pulling weak matches
/// toward zero while a perfect match stays at 1.0.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialScaler {
    scale: f64,
}

impl ExponentialScaler {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    #[inline]
    pub fn scale_value(&self, score: f64) -> f64 {
        (self.scale * (score - 1.0)).min(MAX_EXPONENT).exp()
    }
}

impl ScoreTransform for ExponentialScaler {
    fn stage_name(&self) -> &'static str {
        "exponential_scaling"
    }

    fn apply(&self, mut matrix: ScoreMatrix) -> (ScoreMatrix, usize) {
        let rows = matrix.rows();
        for value in matrix.values_mut() {
            *value = self.scale_value(*value);
        }
        (matrix, rows)
    }
}
