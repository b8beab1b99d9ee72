use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ConvertError;

/// One input document: the name its node is derived from, and its raw text.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub name: String,
    /// Where the text was read from, if it came from disk.
    pub path: Option<PathBuf>,
    pub text: String,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        SourceDocument {
            name: name.into(),
            path: None,
            text: text.into(),
        }
    }

    /// Read a document from disk. The document name is the file stem.
    ///
    /// Bytes that are not valid UTF-8 are replaced; the guide format drops
    /// everything outside ASCII anyway.
    pub fn from_path(path: &Path) -> Result<Self, ConvertError> {
        let bytes = std::fs::read(path).map_err(|e| ConvertError::io(path, e))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(SourceDocument {
            name,
            path: Some(path.to_path_buf()),
            text: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    /// Human-readable label: the file name if there is one, else the name.
    pub fn label(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone())
    }
}

/// Read every file directly inside `dir` whose extension matches
/// `extension` (case-insensitive, with or without the leading dot).
///
/// Documents are returned sorted by file name so the node order of the
/// output does not depend on the file system.
pub fn discover_sources(dir: &Path, extension: &str) -> Result<Vec<SourceDocument>, ConvertError> {
    if !dir.is_dir() {
        return Err(ConvertError::NotADirectory(dir.to_path_buf()));
    }

    let extension = extension.trim_start_matches('.');
    let entries = std::fs::read_dir(dir).map_err(|e| ConvertError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConvertError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches {
            paths.push(path);
        }
    }
    paths.sort();

    debug!(dir = %dir.display(), count = paths.len(), "discovered sources");

    if paths.is_empty() {
        warn!(dir = %dir.display(), extension, "no source documents found, the guide will be empty");
    }

    paths.iter().map(|p| SourceDocument::from_path(p)).collect()
}
