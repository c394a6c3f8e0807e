use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use crate::align::{AlignmentConfig, Assignment, MatchRecord, StageReport};
use crate::cli::OutputFormat;
use crate::segments::{page_spans, PageSpan};

pub mod formatters;

pub use formatters::*;

/// Alignment result with metadata, ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct AlignmentReport {
    /// One record per segment, in segment order
    pub matches: Vec<MatchRecord>,

    /// Consecutive segments grouped by page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_spans: Option<Vec<PageSpan>>,

    pub metadata: ReportMetadata,
}

/// Metadata about the alignment run
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub segments: usize,
    pub pages: usize,
    pub path_score: f64,
    pub stages: Vec<StageReport>,
    pub config: AlignmentConfig,
    pub completed_at: DateTime<Utc>,
}

impl AlignmentReport {
    pub fn new(assignment: Assignment, config: &AlignmentConfig, include_spans: bool) -> Self {
        let page_spans = include_spans.then(|| page_spans(&assignment.records));
        let metadata = ReportMetadata {
            segments: assignment.segments(),
            pages: assignment.pages,
            path_score: assignment.path_score,
            stages: assignment.stages,
            config: config.clone(),
            completed_at: Utc::now(),
        };

        Self {
            matches: assignment.records,
            page_spans,
            metadata,
        }
    }
}

/// Render a report in the requested format
pub fn render(report: &AlignmentReport, format: &OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => format_as_text(report),
        OutputFormat::Json => format_as_json(report)?,
        OutputFormat::Csv => format_as_csv(report)?,
    })
}

/// Save an alignment report to file
pub async fn save_to_file(report: &AlignmentReport, path: &Path, format: &OutputFormat) -> Result<()> {
    let content = render(report, format)?;

    fs_err::write(path, content)?;
    Ok(())
}

/// Print an alignment report to console
pub fn print_to_console(report: &AlignmentReport, format: &OutputFormat) -> Result<()> {
    let content = render(report, format)?;

    println!("{}", content);
    Ok(())
}
