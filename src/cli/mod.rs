use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::align::AlignmentConfig;

#[derive(Parser)]
#[command(
    name = "slidealign",
    about = "Slide Aligner - Assign lecture transcript segments to slide pages",
    version,
    long_about = "Aligns an ordered list of transcript segments to slide pages from a segment-by-page similarity matrix. Uses dynamic programming with forward and backward jump penalties so narration tracks the slides instead of flickering between them."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file (defaults to ./slidealign.yaml or the user config dir)
    #[arg(long = "config", global = true, value_name = "FILE", env = "SLIDEALIGN_CONFIG")]
    pub config_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align transcript segments to slide pages from a score matrix
    Align {
        /// Score matrix file (.json, .csv or .tsv), one row per segment
        #[arg(value_name = "SCORES")]
        scores: PathBuf,

        /// Segment texts, one per line (overrides texts in the score file)
        #[arg(short, long, value_name = "FILE")]
        segments: Option<PathBuf>,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Leave page spans out of the output
        #[arg(long)]
        no_spans: bool,

        /// Read CSV/TSV score files as data from the first line
        #[arg(long)]
        no_header: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Split a transcript into sentences, one per line
    Split {
        /// Transcript text file
        #[arg(value_name = "TRANSCRIPT")]
        transcript: PathBuf,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Write a JSON array instead of lines
        #[arg(long)]
        json: bool,
    },

    /// Show or initialize the configuration file
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },
}

/// Per-run overrides for the alignment settings
#[derive(Args, Debug, Clone, Default)]
pub struct TuningArgs {
    /// Cost per page skipped on a jump
    #[arg(long, value_name = "X")]
    pub jump_penalty: Option<f64>,

    /// Multiplier on the jump penalty for backward moves
    #[arg(long, value_name = "X")]
    pub backward_weight: Option<f64>,

    /// Boost segments whose second-best page scores low
    #[arg(long)]
    pub confidence_boost: bool,

    /// Second-best score below which a segment is boosted (0-1)
    #[arg(long, value_name = "X")]
    pub confidence_threshold: Option<f64>,

    /// Boost multiplier
    #[arg(long, value_name = "X")]
    pub confidence_weight: Option<f64>,

    /// Sharpen scores with exp(scale * (s - 1)) before aligning
    #[arg(long)]
    pub exponential_scaling: bool,

    /// Exponential scale factor
    #[arg(long, value_name = "X")]
    pub exponential_scale: Option<f64>,
}

impl TuningArgs {
    /// Layer command-line overrides onto the configured settings.
    pub fn apply(&self, mut config: AlignmentConfig) -> AlignmentConfig {
        if let Some(value) = self.jump_penalty {
            config.jump_penalty = value;
        }
        if let Some(value) = self.backward_weight {
            config.backward_weight = value;
        }
        if self.confidence_boost {
            config.use_confidence_boost = true;
        }
        if let Some(value) = self.confidence_threshold {
            config.confidence_threshold = value;
        }
        if let Some(value) = self.confidence_weight {
            config.confidence_weight = value;
        }
        if self.exponential_scaling {
            config.use_exponential_scaling = true;
        }
        if let Some(value) = self.exponential_scale {
            config.exponential_scale = value;
        }
        config
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable listing
    Text,
    /// JSON with matches, page spans and metadata
    Json,
    /// CSV, one row per segment
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
