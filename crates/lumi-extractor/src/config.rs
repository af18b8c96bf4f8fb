//! Configuration for the Extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Label variant used by the flow-chart renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowchartStyle {
    /// Short node labels (30 characters)
    #[default]
    Compact,
    /// Longer node labels (50 characters)
    Detailed,
}

impl FlowchartStyle {
    /// Maximum number of characters kept from a rule's text in a node label
    pub fn label_width(&self) -> usize {
        match self {
            FlowchartStyle::Compact => 30,
            FlowchartStyle::Detailed => 50,
        }
    }
}

/// Configuration for the Extractor
///
/// Built once at process start and treated as read-only afterwards; every
/// extraction run receives it explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Directory whose markdown files are scanned (non-recursive)
    #[serde(default = "default_workspace")]
    pub workspace: PathBuf,

    /// File extension of scanned documents, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Maximum sample records per rule kind in a report
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,

    /// Node label variant for the rendered flow chart
    #[serde(default)]
    pub flowchart_style: FlowchartStyle,
}

fn default_workspace() -> PathBuf {
    PathBuf::from(".")
}

fn default_extension() -> String {
    "md".to_string()
}

fn default_sample_limit() -> usize {
    10
}

impl ExtractorConfig {
    /// Configuration for the given workspace with default settings
    pub fn for_workspace(workspace: impl AsRef<Path>) -> Self {
        Self {
            workspace: workspace.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Use the given flow-chart style
    pub fn with_flowchart_style(mut self, style: FlowchartStyle) -> Self {
        self.flowchart_style = style;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.extension.is_empty() {
            return Err(ExtractorError::Config("extension must not be empty".to_string()));
        }
        if self.extension.starts_with('.') {
            return Err(ExtractorError::Config(
                "extension must not start with '.'".to_string(),
            ));
        }
        if self.sample_limit == 0 {
            return Err(ExtractorError::Config(
                "sample_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        let config: ExtractorConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            workspace: default_workspace(),
            extension: default_extension(),
            sample_limit: default_sample_limit(),
            flowchart_style: FlowchartStyle::Compact,
        }
    }
}
