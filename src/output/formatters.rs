use anyhow::{Context, Result};
use std::fmt::Write;

use super::AlignmentReport;

/// One line per segment, then page spans and a summary line
pub fn format_as_text(report: &AlignmentReport) -> String {
    let mut out = String::new();
    let width = report.matches.len().saturating_sub(1).to_string().len();

    for record in &report.matches {
        let _ = write!(
            out,
            "[{:>width$}] page {} ({:.3})",
            record.segment_index,
            record.matched_page,
            record.confidence_score,
        );
        if let Some(text) = &record.text {
            let _ = write!(out, "  {}", text);
        }
        out.push('\n');
    }

    if let Some(spans) = &report.page_spans {
        out.push_str("\nPage spans:\n");
        for span in spans {
            let _ = writeln!(
                out,
                "  page {}: segments {}-{} ({} segments, mean confidence {:.3})",
                span.page, span.first_segment, span.last_segment, span.segment_count, span.mean_confidence
            );
        }
    }

    let meta = &report.metadata;
    let _ = write!(
        out,
        "\n{} segments aligned to {} pages, path score {:.3}",
        meta.segments, meta.pages, meta.path_score
    );
    for stage in &meta.stages {
        let _ = write!(out, "; {} applied to {} segments", stage.stage, stage.rows_affected);
    }

    out
}

/// Pretty-printed JSON report
pub fn format_as_json(report: &AlignmentReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
}

/// `segment_index,matched_page,confidence_score,text` rows
pub fn format_as_csv(report: &AlignmentReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["segment_index", "matched_page", "confidence_score", "text"])?;

    for record in &report.matches {
        writer.write_record([
            record.segment_index.to_string(),
            record.matched_page.to_string(),
            record.confidence_score.to_string(),
            record.text.clone().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{AlignmentConfig, MatchRecord, StageReport};
    use crate::output::ReportMetadata;
    use crate::segments::page_spans;

    fn report(with_spans: bool) -> AlignmentReport {
        let matches = vec![
            MatchRecord {
                segment_index: 0,
                matched_page: 1,
                confidence_score: 1.0,
                text: Some("Welcome, everyone".to_string()),
            },
            MatchRecord {
                segment_index: 1,
                matched_page: 1,
                confidence_score: 0.5,
                text: Some("He said \"hi\"".to_string()),
            },
            MatchRecord {
                segment_index: 2,
                matched_page: 2,
                confidence_score: 0.875,
                text: None,
            },
        ];
        AlignmentReport {
            page_spans: with_spans.then(|| page_spans(&matches)),
            matches,
            metadata: ReportMetadata {
                segments: 3,
                pages: 2,
                path_score: 2.375,
                stages: vec![StageReport {
                    stage: "confidence_boost",
                    rows_affected: 1,
                }],
                config: AlignmentConfig::default(),
                completed_at: chrono::Utc::now(),
            },
        }
    }

    #[test]
    fn text_lists_segments_spans_and_summary() {
        let text = format_as_text(&report(true));
        assert!(text.contains("[0] page 1 (1.000)  Welcome, everyone"));
        assert!(text.contains("[2] page 2 (0.875)\n"));
        assert!(text.contains("page 1: segments 0-1 (2 segments, mean confidence 0.750)"));
        assert!(text.contains("3 segments aligned to 2 pages, path score 2.375"));
        assert!(text.contains("confidence_boost applied to 1 segments"));
    }

    #[test]
    fn text_without_spans_skips_section() {
        let text = format_as_text(&report(false));
        assert!(!text.contains("Page spans"));
    }

    #[test]
    fn json_has_matches_spans_and_metadata() {
        let json = format_as_json(&report(true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["matches"][1]["matched_page"], 1);
        assert_eq!(value["matches"][2]["confidence_score"], 0.875);
        assert!(value["matches"][2].get("text").is_none());
        assert_eq!(value["page_spans"][1]["page"], 2);
        assert_eq!(value["metadata"]["config"]["jump_penalty"], 0.1);
        assert_eq!(value["metadata"]["stages"][0]["stage"], "confidence_boost");
    }

    #[test]
    fn json_omits_spans_when_disabled() {
        let json = format_as_json(&report(false)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("page_spans").is_none());
    }

    #[test]
    fn csv_quotes_text_fields() {
        let csv = format_as_csv(&report(false)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "segment_index,matched_page,confidence_score,text");
        assert_eq!(lines[1], "0,1,1,\"Welcome, everyone\"");
        assert_eq!(lines[2], "1,1,0.5,\"He said \"\"hi\"\"\"");
        assert_eq!(lines[3], "2,2,0.875,");
    }
}
