use super::matrix::ScoreMatrix;
use super::transform::ScoreTransform;

/// Uniformly scales rows whose runner-up page scores below `threshold`.
///
/// A low second-best score means the best page stands alone; amplifying the
/// whole row gives that segment more weight against accumulated jump
/// penalties in the solver.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceBooster {
    threshold: f64,
    weight: f64,
}

impl ConfidenceBooster {
    pub fn new(threshold: f64, weight: f64) -> Self {
        Self { threshold, weight }
    }

    /// Whether a row with this runner-up score gets boosted.
    pub fn triggers(&self, top2: f64) -> bool {
        top2 < self.threshold
    }
}

impl ScoreTransform for ConfidenceBooster {
    fn stage_name(&self) -> &'static str {
        "confidence_boost"
    }

    fn apply(&self, mut matrix: ScoreMatrix) -> (ScoreMatrix, usize) {
        let mut boosted = 0;
        for i in 0..matrix.rows() {
            let row = matrix.row_mut(i);
            let (_, top2) = top_two(row);
            if self.triggers(top2) {
                row.iter_mut().for_each(|value| *value *= self.weight);
                boosted += 1;
            }
        }
        (matrix, boosted)
    }
}

/// Largest and second-largest values of a row. A single-column row reports
/// its only value for both.
fn top_two(row: &[f64]) -> (f64, f64) {
    let mut top1 = f64::NEG_INFINITY;
    let mut top2 = f64::NEG_INFINITY;
    for &value in row {
        if value > top1 {
            top2 = top1;
            top1 = value;
        } else if value > top2 {
            top2 = value;
        }
    }
    if row.len() == 1 {
        top2 = top1;
    }
    (top1, top2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-12)
    }

    #[test]
    fn top_two_handles_duplicates_and_single_column() {
        assert_eq!(top_two(&[0.3, 1.0, 0.7]), (1.0, 0.7));
        assert_eq!(top_two(&[1.0, 1.0, 0.2]), (1.0, 1.0));
        assert_eq!(top_two(&[1.0]), (1.0, 1.0));
    }

    #[test]
    fn runner_up_above_threshold_is_left_alone() {
        let booster = ConfidenceBooster::new(0.95, 1.5);
        let matrix = ScoreMatrix::from_rows(vec![vec![1.0, 0.96, 0.2]]).unwrap();
        let (out, boosted) = booster.apply(matrix);
        assert_eq!(boosted, 0);
        assert_eq!(out.row(0), &[1.0, 0.96, 0.2]);
    }

    #[test]
    fn runner_up_below_threshold_scales_whole_row() {
        let booster = ConfidenceBooster::new(0.95, 1.5);
        let matrix =
            ScoreMatrix::from_rows(vec![vec![1.0, 0.94, 0.1], vec![0.97, 1.0, 0.5]]).unwrap();
        let (out, boosted) = booster.apply(matrix);
        assert_eq!(boosted, 1);
        assert!(approx_eq(out.row(0), &[1.5, 1.41, 0.15]));
        assert_eq!(out.row(1), &[0.97, 1.0, 0.5]);
    }

    #[test]
    fn single_page_rows_never_trigger() {
        let booster = ConfidenceBooster::new(1.0, 3.0);
        let matrix = ScoreMatrix::from_rows(vec![vec![1.0], vec![1.0]]).unwrap();
        let (_, boosted) = booster.apply(matrix);
        assert_eq!(boosted, 0);
    }
}
