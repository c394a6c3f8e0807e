use serde::Serialize;

use super::matrix::ScoreMatrix;

/// A toggleable rewrite of the normalized score matrix that runs before the
/// solver. Stages never see penalties or the DP table.
pub trait ScoreTransform: Send + Sync {
    /// Name used in logs and in the stage report.
    fn stage_name(&self) -> &'static str;

    /// Rewrite the matrix, returning it with the number of rows changed.
    fn apply(&self, matrix: ScoreMatrix) -> (ScoreMatrix, usize);
}

/// What one optional stage did during an alignment run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub stage: &'static str,
    pub rows_affected: usize,
}
