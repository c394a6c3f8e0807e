use anyhow::Context;
use async_trait::async_trait;
use std::path::Path;

use super::{extension, ScoreInput, ScoreSource};
use crate::Result;

/// Comma- or tab-separated score rows, one record per segment.
///
/// The delimiter follows the file extension: tab for `.tsv`, comma otherwise.
/// Lines starting with `#` are comments. Whether the first record is a
/// header row is set up front; it is never inferred from the content.
#[derive(Debug, Clone, Copy)]
pub struct DelimitedSource {
    has_headers: bool,
}

impl DelimitedSource {
    pub fn new(has_headers: bool) -> Self {
        Self { has_headers }
    }

    pub fn parse(&self, content: &str, delimiter: u8) -> Result<ScoreInput> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.has_headers)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        if self.has_headers {
            let headers = reader.headers().context("Failed to read header row")?;
            tracing::debug!("Score columns: {}", headers.iter().collect::<Vec<_>>().join(", "));
        }

        let mut scores = Vec::new();
        for result in reader.records() {
            let record = result.context("Failed to read score row")?;
            let line = record.position().map_or(0, |pos| pos.line());

            let row = record
                .iter()
                .map(|field| {
                    field
                        .parse::<f64>()
                        .map_err(|_| anyhow::anyhow!("Line {}: '{}' is not a number", line, field))
                })
                .collect::<Result<Vec<f64>>>()?;
            scores.push(row);
        }

        Ok(ScoreInput {
            scores,
            segments: None,
        })
    }
}

impl Default for DelimitedSource {
    fn default() -> Self {
        Self::new(true)
    }
}

fn delimiter_for(path: &Path) -> u8 {
    match extension(path).as_deref() {
        Some("tsv") => b'\t',
        _ => b',',
    }
}

#[async_trait]
impl ScoreSource for DelimitedSource {
    async fn load(&self, path: &Path) -> Result<ScoreInput> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        self.parse(&content, delimiter_for(path))
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn supports_path(&self, path: &Path) -> bool {
        matches!(extension(path).as_deref(), Some("csv") | Some("tsv"))
    }

    fn format_name(&self) -> &'static str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headerless() -> DelimitedSource {
        DelimitedSource::new(false)
    }

    #[test]
    fn parses_rows_and_skips_comments() {
        let input = headerless()
            .parse("# scores\n0.9, 0.1\n\n0.2,0.8\n", b',')
            .unwrap();
        assert_eq!(input.scores, vec![vec![0.9, 0.1], vec![0.2, 0.8]]);
    }

    #[test]
    fn skips_header_row() {
        let input = DelimitedSource::default()
            .parse("page_1,page_2\n1.0,0.5\n", b',')
            .unwrap();
        assert_eq!(input.scores, vec![vec![1.0, 0.5]]);
    }

    #[test]
    fn numeric_header_is_not_a_segment() {
        let input = DelimitedSource::default()
            .parse("1,2,3\n0.9,0.1,0.0\n", b',')
            .unwrap();
        assert_eq!(input.scores, vec![vec![0.9, 0.1, 0.0]]);
    }

    #[test]
    fn malformed_first_row_without_header_is_an_error() {
        let err = headerless().parse("0.9,O.2\n0.3,0.4\n", b',').unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Line 1"), "{message}");
        assert!(message.contains("O.2"), "{message}");
    }

    #[test]
    fn malformed_first_row_after_header_is_an_error() {
        let err = DelimitedSource::default()
            .parse("page_1,page_2\n0.9,O.2\n", b',')
            .unwrap_err();
        assert!(err.to_string().contains("Line 2"));
    }

    #[test]
    fn quoted_numbers_are_accepted() {
        let input = headerless()
            .parse("\"0.9\",\"0.1\"\n\"0.2\",\"0.8\"\n", b',')
            .unwrap();
        assert_eq!(input.scores, vec![vec![0.9, 0.1], vec![0.2, 0.8]]);
    }

    #[test]
    fn accepts_tab_separated_rows() {
        let input = headerless().parse("1.0\t0.25\n0.5\t1.0\n", b'\t').unwrap();
        assert_eq!(input.scores, vec![vec![1.0, 0.25], vec![0.5, 1.0]]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(headerless().parse("1.0,0.5\n0.3\n", b',').is_err());
    }

    #[test]
    fn reports_bad_value_with_line_number() {
        let err = headerless().parse("1.0,0.5\n0.3,abc\n", b',').unwrap_err();
        assert!(err.to_string().contains("Line 2"));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn delimiter_follows_extension() {
        assert_eq!(delimiter_for(Path::new("scores.tsv")), b'\t');
        assert_eq!(delimiter_for(Path::new("scores.CSV")), b',');
    }
}
