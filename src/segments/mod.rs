use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::Path;

use crate::align::MatchRecord;
use crate::Result;

static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+\s+").expect("valid sentence break pattern"));

/// Split a transcript into sentences on runs of `.`, `!` or `?` followed by
/// whitespace. The terminating punctuation of a split is dropped; trailing
/// punctuation at the very end of the text is kept.
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read segment texts, one per non-blank line.
pub async fn load_segments(path: &Path) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read segments file {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// A run of consecutive segments assigned to the same page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSpan {
    /// 1-based page number
    pub page: usize,
    pub first_segment: usize,
    pub last_segment: usize,
    pub segment_count: usize,
    pub mean_confidence: f64,
}

/// Group an assignment into page runs, in segment order. A page revisited
/// after another page starts a new span.
pub fn page_spans(records: &[MatchRecord]) -> Vec<PageSpan> {
    let mut spans: Vec<PageSpan> = Vec::new();
    let mut confidence_sum = 0.0;

    for record in records {
        match spans.last_mut() {
            Some(span) if span.page == record.matched_page => {
                span.last_segment = record.segment_index;
                span.segment_count += 1;
                confidence_sum += record.confidence_score;
                span.mean_confidence = confidence_sum / span.segment_count as f64;
            }
            _ => {
                confidence_sum = record.confidence_score;
                spans.push(PageSpan {
                    page: record.matched_page,
                    first_segment: record.segment_index,
                    last_segment: record.segment_index,
                    segment_count: 1,
                    mean_confidence: record.confidence_score,
                });
            }
        }
    }

    spans
}
