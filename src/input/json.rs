use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

use super::{extension, ScoreInput, ScoreSource};
use crate::Result;

/// Similarity dump as JSON: a bare `[[f64]]` array or
/// `{ "scores": [[f64]], "segments": ["..."] }`.
pub struct JsonSource;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonScores {
    Bare(Vec<Vec<f64>>),
    Document {
        scores: Vec<Vec<f64>>,
        #[serde(default)]
        segments: Option<Vec<String>>,
    },
}

impl JsonSource {
    pub fn parse(content: &str) -> Result<ScoreInput> {
        let parsed: JsonScores =
            serde_json::from_str(content).context("Failed to parse JSON score file")?;

        Ok(match parsed {
            JsonScores::Bare(scores) => ScoreInput {
                scores,
                segments: None,
            },
            JsonScores::Document { scores, segments } => ScoreInput { scores, segments },
        })
    }
}

#[async_trait]
impl ScoreSource for JsonSource {
    async fn load(&self, path: &Path) -> Result<ScoreInput> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content)
    }

    fn supports_path(&self, path: &Path) -> bool {
        extension(path).as_deref() == Some("json")
    }

    fn format_name(&self) -> &'static str {
        "json"
    }
}
