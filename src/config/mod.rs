use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::align::AlignmentConfig;
use crate::cli::OutputFormat;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Alignment engine settings
    pub alignment: AlignmentConfig,

    /// Application settings
    pub app: AppConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default output format
    pub default_output_format: OutputFormat,

    /// Include page spans in text and JSON output
    pub include_page_spans: bool,

    /// CSV/TSV score files start with a header row
    pub csv_has_headers: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_output_format: OutputFormat::Text,
            include_page_spans: true,
            csv_has_headers: true,
        }
    }
}

impl Config {
    /// Load configuration from `explicit`, the working directory, or the user
    /// config directory. A missing file yields the defaults.
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file does not exist: {}", path.display());
                }
                path.to_path_buf()
            }
            None => match Self::config_path() {
                Ok(path) if path.exists() => path,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        tracing::debug!("Loading config from {}", config_path.display());
        let content = fs_err::read_to_string(&config_path)
            .context("Failed to read config file")?;

        let config = Self::parse(&content)?;
        Ok(config)
    }

    /// Like [`Config::load`], but an explicit path that does not exist yet
    /// yields the defaults so it can be written out.
    pub async fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) if !path.exists() => {
                tracing::debug!("{} not found, starting from defaults", path.display());
                Ok(Self::default())
            }
            _ => Self::load(explicit).await,
        }
    }

    /// Parse and validate YAML configuration
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`, or the default location
    pub async fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(&config_path, content)
            .context("Failed to write config file")?;

        Ok(config_path)
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("slidealign.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("slide-aligner").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        self.alignment
            .validate()
            .context("Invalid alignment settings in config file")?;
        Ok(())
    }

    /// Render the current configuration for display
    pub fn display(&self) -> String {
        let a = &self.alignment;
        let mut out = String::from("Current Configuration:\n");
        out.push_str(&format!("  Jump Penalty: {}\n", a.jump_penalty));
        out.push_str(&format!("  Backward Weight: {}\n", a.backward_weight));
        out.push_str(&format!(
            "  Confidence Boost: {} (threshold {}, weight {})\n",
            on_off(a.use_confidence_boost),
            a.confidence_threshold,
            a.confidence_weight
        ));
        out.push_str(&format!(
            "  Exponential Scaling: {} (scale {})\n",
            on_off(a.use_exponential_scaling),
            a.exponential_scale
        ));
        out.push_str(&format!("  Default Format: {}\n", self.app.default_output_format));
        out.push_str(&format!("  Page Spans: {}\n", on_off(self.app.include_page_spans)));
        out.push_str(&format!("  CSV Header Row: {}", on_off(self.app.csv_has_headers)));
        out
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
