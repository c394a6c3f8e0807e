//! Transcript-to-slide alignment engine.
//!
//! Turns an `N × M` segment/page similarity matrix into one page per segment:
//! rows are normalized, optionally boosted and exponentially scaled, then a
//! jump-penalized DP picks the globally best page path.

use serde::{Deserialize, Serialize};

pub mod assemble;
pub mod boost;
pub mod error;
pub mod matrix;
pub mod normalize;
pub mod scale;
pub mod solver;
pub mod transform;

pub use assemble::MatchRecord;
pub use boost::ConfidenceBooster;
pub use error::AlignError;
pub use matrix::ScoreMatrix;
pub use scale::ExponentialScaler;
pub use solver::{JumpPenalty, Solution};
pub use transform::{ScoreTransform, StageReport};

/// Tuning for the alignment pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Cost per page skipped on a forward jump, per page moved on a backward one
    pub jump_penalty: f64,

    /// Multiplier on `jump_penalty` for backward moves
    pub backward_weight: f64,

    /// Boost rows whose runner-up page is weak
    pub use_confidence_boost: bool,

    /// Runner-up score below which a row is boosted
    pub confidence_threshold: f64,

    /// Factor applied to every entry of a boosted row
    pub confidence_weight: f64,

    /// Apply `exp(scale * (s - 1))` before solving
    pub use_exponential_scaling: bool,

    /// Scale factor for exponential scaling
    pub exponential_scale: f64,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            jump_penalty: 0.1,
            backward_weight: 2.0,
            use_confidence_boost: false,
            confidence_threshold: 0.95,
            confidence_weight: 1.5,
            use_exponential_scaling: false,
            exponential_scale: 3.0,
        }
    }
}

impl AlignmentConfig {
    pub fn validate(&self) -> Result<(), AlignError> {
        if !self.jump_penalty.is_finite() || self.jump_penalty < 0.0 {
            return Err(AlignError::invalid_config(format!(
                "jump_penalty must be a finite value >= 0, got {}",
                self.jump_penalty
            )));
        }
        if !self.backward_weight.is_finite() || self.backward_weight < 0.0 {
            return Err(AlignError::invalid_config(format!(
                "backward_weight must be a finite value >= 0, got {}",
                self.backward_weight
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(AlignError::invalid_config(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if self.use_confidence_boost
            && (!self.confidence_weight.is_finite() || self.confidence_weight < 0.0)
        {
            return Err(AlignError::invalid_config(format!(
                "confidence_weight must be a finite value >= 0, got {}",
                self.confidence_weight
            )));
        }
        if self.use_exponential_scaling
            && (!self.exponential_scale.is_finite() || self.exponential_scale <= 0.0)
        {
            return Err(AlignError::invalid_config(format!(
                "exponential_scale must be > 0 when scaling is enabled, got {}",
                self.exponential_scale
            )));
        }
        Ok(())
    }

    pub fn jump_penalty(&self) -> JumpPenalty {
        JumpPenalty::new(self.jump_penalty, self.backward_weight)
    }

    /// Optional stages enabled by this config, in pipeline order.
    pub fn stages(&self) -> Vec<Box<dyn ScoreTransform>> {
        let mut stages: Vec<Box<dyn ScoreTransform>> = Vec::new();
        if self.use_confidence_boost {
            stages.push(Box::new(ConfidenceBooster::new(
                self.confidence_threshold,
                self.confidence_weight,
            )));
        }
        if self.use_exponential_scaling {
            stages.push(Box::new(ExponentialScaler::new(self.exponential_scale)));
        }
        stages
    }
}

/// Result of one alignment run.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub records: Vec<MatchRecord>,
    /// Best accumulated DP value on the final segment.
    pub path_score: f64,
    pub stages: Vec<StageReport>,
    pub pages: usize,
}

impl Assignment {
    /// Zero-based page per segment.
    pub fn page_indices(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.matched_page - 1).collect()
    }

    pub fn confidences(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.confidence_score).collect()
    }

    pub fn segments(&self) -> usize {
        self.records.len()
    }
}

/// Align segments to pages.
///
/// Pure: the same matrix and config always give the same assignment.
pub fn align(raw: ScoreMatrix, config: &AlignmentConfig) -> Result<Assignment, AlignError> {
    config.validate()?;

    let (segments, pages) = (raw.rows(), raw.cols());
    tracing::debug!(segments, pages, "normalizing score matrix");
    let mut scores = normalize::normalize_rows(raw)?;

    let mut stages = Vec::new();
    for stage in config.stages() {
        let (next, rows_affected) = stage.apply(scores);
        scores = next;
        tracing::info!(
            stage = stage.stage_name(),
            "applied {} to {}/{} segments",
            stage.stage_name(),
            rows_affected,
            segments
        );
        stages.push(StageReport {
            stage: stage.stage_name(),
            rows_affected,
        });
    }

    let solution = solver::solve(&scores, &config.jump_penalty());
    let records = assemble::assemble_records(&solution.path, &scores);

    Ok(Assignment {
        records,
        path_score: solution.path_score,
        stages,
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worked_matrix() -> ScoreMatrix {
        ScoreMatrix::from_rows(vec![
            vec![0.9, 0.1, 0.0],
            vec![0.2, 0.9, 0.1],
            vec![0.05, 0.3, 0.9],
        ])
        .unwrap()
    }

    #[test]
    fn default_config_is_valid() {
        let config = AlignmentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.jump_penalty, 0.1);
        assert_eq!(config.backward_weight, 2.0);
        assert!(config.stages().is_empty());
    }

    #[test]
    fn worked_scenario_walks_forward() {
        let assignment = align(worked_matrix(), &AlignmentConfig::default()).unwrap();
        let pages: Vec<usize> = assignment.records.iter().map(|r| r.matched_page).collect();
        assert_eq!(pages, vec![1, 2, 3]);
        assert_eq!(assignment.confidences(), vec![1.0, 1.0, 1.0]);
        assert!(assignment.stages.is_empty());
        assert_eq!(assignment.pages, 3);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let config = AlignmentConfig {
            use_confidence_boost: true,
            use_exponential_scaling: true,
            ..AlignmentConfig::default()
        };
        let first = align(worked_matrix(), &config).unwrap();
        let second = align(worked_matrix(), &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn single_page_gets_full_confidence() {
        let matrix = ScoreMatrix::from_rows(vec![vec![0.4], vec![0.7], vec![0.2]]).unwrap();
        let assignment = align(matrix, &AlignmentConfig::default()).unwrap();
        assert!(assignment.records.iter().all(|r| r.matched_page == 1));
        assert!(assignment.confidences().iter().all(|&c| c == 1.0));
    }

    #[test]
    fn single_segment_ignores_penalties() {
        let matrix = ScoreMatrix::from_rows(vec![vec![0.1, 0.2, 0.8, 0.3]]).unwrap();
        let config = AlignmentConfig {
            jump_penalty: 100.0,
            backward_weight: 100.0,
            ..AlignmentConfig::default()
        };
        let assignment = align(matrix, &config).unwrap();
        assert_eq!(assignment.page_indices(), vec![2]);
    }

    #[test]
    fn confidence_reflects_post_stage_matrix() {
        // Row 1's runner-up (0.5) is below threshold, so the row is boosted.
        let matrix = ScoreMatrix::from_rows(vec![vec![1.0, 0.99], vec![0.5, 1.0]]).unwrap();
        let config = AlignmentConfig {
            jump_penalty: 0.0,
            use_confidence_boost: true,
            confidence_threshold: 0.9,
            confidence_weight: 2.0,
            ..AlignmentConfig::default()
        };
        let assignment = align(matrix, &config).unwrap();
        assert_eq!(assignment.page_indices(), vec![0, 1]);
        assert_eq!(assignment.confidences(), vec![1.0, 2.0]);
        assert_eq!(
            assignment.stages,
            vec![StageReport {
                stage: "confidence_boost",
                rows_affected: 1
            }]
        );
    }

    #[test]
    fn stages_run_boost_then_scaling() {
        let config = AlignmentConfig {
            use_confidence_boost: true,
            use_exponential_scaling: true,
            ..AlignmentConfig::default()
        };
        let names: Vec<&str> = config.stages().iter().map(|s| s.stage_name()).collect();
        assert_eq!(names, vec!["confidence_boost", "exponential_scaling"]);
    }

    #[test]
    fn invalid_config_is_rejected_before_solving() {
        let bad = [
            AlignmentConfig {
                jump_penalty: -0.1,
                ..AlignmentConfig::default()
            },
            AlignmentConfig {
                backward_weight: -1.0,
                ..AlignmentConfig::default()
            },
            AlignmentConfig {
                confidence_threshold: 1.5,
                ..AlignmentConfig::default()
            },
            AlignmentConfig {
                use_exponential_scaling: true,
                exponential_scale: 0.0,
                ..AlignmentConfig::default()
            },
            AlignmentConfig {
                use_confidence_boost: true,
                confidence_weight: -2.0,
                ..AlignmentConfig::default()
            },
        ];
        for config in bad {
            let err = align(worked_matrix(), &config).unwrap_err();
            assert!(matches!(err, AlignError::InvalidConfig { .. }), "{config:?}");
        }
    }

    #[test]
    fn scaling_disabled_ignores_bad_scale() {
        let config = AlignmentConfig {
            exponential_scale: -1.0,
            ..AlignmentConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_row_fails_with_invalid_input() {
        let matrix = ScoreMatrix::from_rows(vec![vec![0.5, 0.5], vec![0.0, 0.0]]).unwrap();
        let err = align(matrix, &AlignmentConfig::default()).unwrap_err();
        assert!(matches!(err, AlignError::InvalidInput { .. }));
    }
}
