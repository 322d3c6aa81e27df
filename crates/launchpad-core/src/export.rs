//! Plain-text export of the selected plan.

use std::path::{Path, PathBuf};

/// File name every export is written under.
pub const EXPORT_FILENAME: &str = "marketing-plan.txt";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A downloadable plan: the fixed file name plus the plan text verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    contents: String,
}

impl ExportArtifact {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }

    pub fn filename(&self) -> &'static str {
        EXPORT_FILENAME
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Write the artifact into `dir` as UTF-8, creating `dir` if needed.
    /// Nothing is added to the plan text. Returns the written path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(self.filename());
        std::fs::write(&path, self.contents.as_bytes()).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), bytes = self.contents.len(), "plan exported");
        Ok(path)
    }
}
