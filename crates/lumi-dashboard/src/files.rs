//! Editable agent files.
//!
//! Clients never name workspace paths directly: an agent exposes a small
//! alias table (`Soul.md` → `SOUL.md`) and only those files can be read or
//! written.

use crate::config::DashboardConfig;
use std::path::PathBuf;
use thiserror::Error;

/// Agent file access error
#[derive(Debug, Error)]
pub enum FileError {
    /// No agent with this id
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    /// The agent does not expose this file
    #[error("Agent {agent} has no file named {file}")]
    UnknownFile {
        /// Agent id
        agent: String,
        /// Requested alias
        file: String,
    },

    /// Reading or writing failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Resolved path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
}

/// Resolve an agent file alias to its workspace path
pub fn resolve(config: &DashboardConfig, agent: &str, file: &str) -> Result<PathBuf, FileError> {
    let entry = config
        .agent(agent)
        .ok_or_else(|| FileError::UnknownAgent(agent.to_string()))?;

    let target = entry.files.get(file).ok_or_else(|| FileError::UnknownFile {
        agent: agent.to_string(),
        file: file.to_string(),
    })?;

    Ok(config.workspace_dir.join(target))
}

/// Read an agent file
pub fn read_agent_file(
    config: &DashboardConfig,
    agent: &str,
    file: &str,
) -> Result<String, FileError> {
    let path = resolve(config, agent, file)?;
    std::fs::read_to_string(&path).map_err(|source| FileError::Io { path, source })
}

/// Overwrite an agent file
pub fn save_agent_file(
    config: &DashboardConfig,
    agent: &str,
    file: &str,
    content: &str,
) -> Result<(), FileError> {
    let path = resolve(config, agent, file)?;
    std::fs::write(&path, content).map_err(|source| FileError::Io { path, source })
}
