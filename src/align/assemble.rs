use serde::{Deserialize, Serialize};

use super::matrix::ScoreMatrix;

/// One segment's place in the final assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub segment_index: usize,
    /// 1-based page number.
    pub matched_page: usize,
    /// Post-stage score of the chosen page, not the accumulated DP value.
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Turn a zero-based page path into 1-based records with per-segment confidence.
pub fn assemble_records(path: &[usize], scores: &ScoreMatrix) -> Vec<MatchRecord> {
    path.iter()
        .enumerate()
        .map(|(i, &page)| MatchRecord {
            segment_index: i,
            matched_page: page + 1,
            confidence_score: scores.get(i, page),
            text: None,
        })
        .collect()
}

/// Attach segment texts to records positionally.
pub fn attach_texts(records: &mut [MatchRecord], texts: &[String]) {
    for (record, text) in records.iter_mut().zip(texts) {
        record.text = Some(text.clone());
    }
}
