use async_trait::async_trait;
use std::path::Path;

pub mod delimited;
pub mod json;

use crate::align::ScoreMatrix;
use crate::Result;

/// Scores handed over by the upstream similarity service.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreInput {
    /// One row per segment, one column per page
    pub scores: Vec<Vec<f64>>,

    /// Segment texts, when the dump carries them
    pub segments: Option<Vec<String>>,
}

impl ScoreInput {
    /// Validate the rows into a matrix.
    pub fn matrix(&self) -> Result<ScoreMatrix> {
        Ok(ScoreMatrix::from_rows(self.scores.clone())?)
    }
}

/// Trait for reading score matrices from different file formats
#[async_trait]
pub trait ScoreSource: Send + Sync {
    /// Read the scores at `path`
    async fn load(&self, path: &Path) -> Result<ScoreInput>;

    /// Check if this source understands the given path
    fn supports_path(&self, path: &Path) -> bool;

    /// Get the name of this format
    fn format_name(&self) -> &'static str;
}

/// Registry for managing score sources
pub struct SourceRegistry {
    sources: Vec<Box<dyn ScoreSource>>,
}

impl SourceRegistry {
    /// Create a new registry with the built-in sources
    pub fn new() -> Self {
        Self::with_csv_headers(true)
    }

    /// Built-in sources, with CSV/TSV files read with or without a header row
    pub fn with_csv_headers(has_headers: bool) -> Self {
        let mut registry = Self {
            sources: Vec::new(),
        };

        registry.register(Box::new(json::JsonSource));
        registry.register(Box::new(delimited::DelimitedSource::new(has_headers)));

        registry
    }

    /// Register a new source
    pub fn register(&mut self, source: Box<dyn ScoreSource>) {
        self.sources.push(source);
    }

    /// Find a source that supports the given path
    pub fn find_source(&self, path: &Path) -> Option<&dyn ScoreSource> {
        self.sources
            .iter()
            .find(|source| source.supports_path(path))
            .map(|boxed| boxed.as_ref())
    }

    /// List all supported formats
    pub fn list_formats(&self) -> Vec<&'static str> {
        self.sources
            .iter()
            .map(|source| source.format_name())
            .collect()
    }

    /// Load scores using the appropriate source
    pub async fn load(&self, path: &Path) -> Result<ScoreInput> {
        crate::utils::check_file_accessible(path)?;

        let source = self.find_source(path).ok_or_else(|| {
            anyhow::anyhow!(
                "Unsupported score file {} (supported formats: {})",
                path.display(),
                self.list_formats().join(", ")
            )
        })?;

        tracing::debug!("Loading {} scores from {}", source.format_name(), path.display());
        source.load(path).await
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Lower-cased extension of a path, if any.
pub(crate) fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}
