//! Slide Aligner - assigns lecture transcript segments to slide pages
//!
//! This library provides the jump-penalized dynamic-programming alignment engine
//! plus the surrounding tooling: score-file loading, transcript sentence
//! splitting, page-span grouping and report formatting.

pub mod align;
pub mod cli;
pub mod config;
pub mod input;
pub mod output;
pub mod segments;
pub mod utils;

pub use align::{align, AlignError, AlignmentConfig, Assignment, MatchRecord, ScoreMatrix};
pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use input::{ScoreInput, ScoreSource, SourceRegistry};
pub use output::AlignmentReport;
pub use segments::{page_spans, split_sentences, PageSpan};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;
