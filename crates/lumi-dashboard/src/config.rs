//! Configuration file parsing for the dashboard.
//!
//! Loads the bind address, workspace location, status file, static asset
//! directory, extraction settings and the agent table from TOML.

use lumi_extractor::{ExtractorConfig, ExtractorError, FlowchartStyle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Dashboard configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Extraction settings rejected
    #[error("Invalid extraction settings: {0}")]
    Extractor(#[from] ExtractorError),

    /// A field has an unusable value
    #[error("Invalid configuration field {0}")]
    InvalidField(String),
}

/// Dashboard configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Bind address (e.g., "0.0.0.0")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (default: 3001)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Agent workspace holding the markdown documents
    #[serde(default = "default_workspace_dir")]
    pub workspace_dir: PathBuf,

    /// Status file; defaults to `<workspace>/lumi-dashboard/status.json`
    #[serde(default)]
    pub status_file: Option<PathBuf>,

    /// Static asset directory; defaults to `<workspace>/lumi-dashboard`
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// Sample records per kind in the flow-chart report
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,

    /// Label style of the rendered diagram
    #[serde(default)]
    pub flowchart_style: FlowchartStyle,

    /// Agents listed by the dashboard
    #[serde(default)]
    pub agents: Vec<AgentConfig>,
}

/// Agent entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Agent identifier (e.g., "main")
    pub id: String,

    /// Display name
    pub name: String,

    /// Whether the agent is reported online
    #[serde(default)]
    pub online: bool,

    /// Number of installed skills
    #[serde(default)]
    pub skills: u32,

    /// Editable files: public name to file name inside the workspace
    #[serde(default, skip_serializing)]
    pub files: BTreeMap<String, String>,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_bind_port() -> u16 {
    3001
}

fn default_workspace_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".openclaw")
        .join("workspace")
}

fn default_sample_limit() -> usize {
    10
}

impl DashboardConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: DashboardConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration used when no file is given
    ///
    /// Mirrors the stock deployment: the home workspace and three agents,
    /// of which only `main` exposes editable files.
    pub fn default_config() -> Self {
        let main_files = BTreeMap::from([
            ("Soul.md".to_string(), "SOUL.md".to_string()),
            ("MEMORY.md".to_string(), "MEMORY.md".to_string()),
        ]);

        DashboardConfig {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            workspace_dir: default_workspace_dir(),
            status_file: None,
            static_dir: None,
            sample_limit: default_sample_limit(),
            flowchart_style: FlowchartStyle::default(),
            agents: vec![
                AgentConfig {
                    id: "main".to_string(),
                    name: "main".to_string(),
                    online: true,
                    skills: 12,
                    files: main_files,
                },
                AgentConfig {
                    id: "sub-agent-1".to_string(),
                    name: "research".to_string(),
                    online: true,
                    skills: 8,
                    files: BTreeMap::new(),
                },
                AgentConfig {
                    id: "sub-agent-2".to_string(),
                    name: "coding".to_string(),
                    online: false,
                    skills: 5,
                    files: BTreeMap::new(),
                },
            ],
        }
    }

    /// Default configuration rooted at another workspace
    pub fn for_workspace<P: Into<PathBuf>>(workspace_dir: P) -> Self {
        Self {
            workspace_dir: workspace_dir.into(),
            ..Self::default_config()
        }
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::InvalidField("bind_address".to_string()));
        }

        let mut seen = std::collections::HashSet::new();
        for agent in &self.agents {
            if !seen.insert(agent.id.as_str()) {
                return Err(ConfigError::InvalidField(format!(
                    "agents: duplicate id {}",
                    agent.id
                )));
            }
            // Aliases must stay inside the workspace.
            if agent.files.values().any(|target| !is_plain_file_name(target)) {
                return Err(ConfigError::InvalidField(format!(
                    "agents.{}.files",
                    agent.id
                )));
            }
        }

        self.extractor_config().validate()?;
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Resolved status file path
    pub fn status_path(&self) -> PathBuf {
        self.status_file
            .clone()
            .unwrap_or_else(|| self.dashboard_dir().join("status.json"))
    }

    /// Resolved static asset directory
    pub fn static_path(&self) -> PathBuf {
        self.static_dir
            .clone()
            .unwrap_or_else(|| self.dashboard_dir())
    }

    /// Extraction settings for one request
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            sample_limit: self.sample_limit,
            flowchart_style: self.flowchart_style,
            ..ExtractorConfig::for_workspace(&self.workspace_dir)
        }
    }

    /// Look up an agent by id
    pub fn agent(&self, id: &str) -> Option<&AgentConfig> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    fn dashboard_dir(&self) -> PathBuf {
        self.workspace_dir.join("lumi-dashboard")
    }
}

fn is_plain_file_name(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty() && path.file_name().map(|f| f == path.as_os_str()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default_config();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 3001);
        assert_eq!(config.sample_limit, 10);
        assert_eq!(config.agents.len(), 3);
        assert_eq!(config.agents[0].id, "main");
        assert_eq!(config.agents[0].files["Soul.md"], "SOUL.md");
        assert!(config.agents[1].files.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_addr() {
        let config = DashboardConfig::default_config();
        assert_eq!(config.bind_addr(), "0.0.0.0:3001");
    }

    #[test]
    fn test_derived_paths() {
        let config = DashboardConfig::for_workspace("/srv/agent");
        assert_eq!(
            config.status_path(),
            PathBuf::from("/srv/agent/lumi-dashboard/status.json")
        );
        assert_eq!(config.static_path(), PathBuf::from("/srv/agent/lumi-dashboard"));
        assert_eq!(config.extractor_config().workspace, PathBuf::from("/srv/agent"));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "127.0.0.1"
            bind_port = 9000
            workspace_dir = "/srv/agent"
            status_file = "/run/lumi/status.json"
            sample_limit = 5
            flowchart_style = "detailed"

            [[agents]]
            id = "main"
            name = "main"
            online = true
            skills = 3

            [agents.files]
            "Soul.md" = "SOUL.md"
        "#;

        let config: DashboardConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.status_path(), PathBuf::from("/run/lumi/status.json"));
        assert_eq!(config.static_path(), PathBuf::from("/srv/agent/lumi-dashboard"));
        assert_eq!(config.flowchart_style, FlowchartStyle::Detailed);
        assert_eq!(config.extractor_config().sample_limit, 5);
        assert_eq!(config.agent("main").unwrap().files["Soul.md"], "SOUL.md");
        assert!(config.agent("ghost").is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: DashboardConfig = toml::from_str("").unwrap();
        assert_eq!(config.bind_port, 3001);
        assert!(config.agents.is_empty());
        assert!(config.workspace_dir.ends_with(".openclaw/workspace"));
    }

    #[test]
    fn test_rejects_alias_outside_workspace() {
        let mut config = DashboardConfig::default_config();
        config.agents[0]
            .files
            .insert("passwd".to_string(), "../../etc/passwd".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::InvalidField(_))));
    }

    #[test]
    fn test_rejects_duplicate_agents() {
        let mut config = DashboardConfig::default_config();
        config.agents[1].id = "main".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_sample_limit() {
        let mut config = DashboardConfig::default_config();
        config.sample_limit = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Extractor(_))));
    }

    #[test]
    fn test_from_file_missing() {
        let result = DashboardConfig::from_file("/no/such/lumi.toml");
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }
}
