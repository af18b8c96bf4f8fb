//! Workspace document scanning

use crate::types::{Document, DocumentError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Scans a directory for documents with a given extension
pub struct DocumentScanner {
    extension: String,
}

impl DocumentScanner {
    /// Create a scanner for files ending in `.{extension}`
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// List matching files directly inside `dir`, sorted by file name
    ///
    /// A missing or unreadable directory yields no documents.
    pub fn scan(&self, dir: &Path) -> Vec<PathBuf> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Cannot read workspace {}: {}", dir.display(), e);
                return Vec::new();
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && self.matches(path))
            .collect();

        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        paths
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }
}

impl Default for DocumentScanner {
    fn default() -> Self {
        Self::new("md")
    }
}

/// Read a document's full text
///
/// I/O and encoding failures are returned as a [`DocumentError`] record.
pub fn load_document(path: &Path) -> Result<Document, DocumentError> {
    let text = fs::read_to_string(path).map_err(|e| DocumentError {
        file: path.display().to_string(),
        error: e.to_string(),
    })?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(Document {
        name,
        path: path.to_path_buf(),
        text,
    })
}
