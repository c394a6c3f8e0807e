use super::error::AlignError;
use super::matrix::ScoreMatrix;

/// Divide every row by its maximum so each segment's best page scores 1.0.
pub fn normalize_rows(mut matrix: ScoreMatrix) -> Result<ScoreMatrix, AlignError> {
    for i in 0..matrix.rows() {
        let row = matrix.row_mut(i);
        let row_max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !row_max.is_finite() || row_max <= 0.0 {
            return Err(AlignError::invalid_input(format!(
                "row {i} has maximum score {row_max}; cannot normalize"
            )));
        }
        for value in row.iter_mut() {
            *value /= row_max;
        }
    }
    Ok(matrix)
}
