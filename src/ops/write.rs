//! Destinations for generated toolchain files.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::toolchain::ToolchainDocument;
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::fs::{ensure_dir, write_string};

/// Filesystem failure, always tied to the path that caused it.
#[derive(Debug, Error)]
pub enum FilesystemError {
    #[error("failed to create directory: {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file: {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FilesystemError {
    /// The offending path.
    pub fn path(&self) -> &Path {
        match self {
            FilesystemError::CreateDir { path, .. } | FilesystemError::Write { path, .. } => path,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let source = match self {
            FilesystemError::CreateDir { source, .. } | FilesystemError::Write { source, .. } => {
                source
            }
        };

        Diagnostic::error(self.to_string())
            .with_context(source.to_string())
            .with_suggestion(suggestions::CHECK_OUTPUT_DIR)
    }
}

/// Receives rendered toolchain documents.
///
/// Implementations are shared across worker threads, one `write` call per
/// target, and must not rely on the order of calls.
pub trait ToolchainSink: Sync {
    /// Called once before any document is written.
    fn prepare(&self) -> Result<(), FilesystemError> {
        Ok(())
    }

    /// Store one document and return where it went.
    fn write(&self, document: &ToolchainDocument) -> Result<PathBuf, FilesystemError>;
}

/// Writes `<triple>.cmake` files into a directory.
#[derive(Debug, Clone)]
pub struct FsSink {
    dir: PathBuf,
}

impl FsSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FsSink { dir: dir.into() }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a document is written to.
    pub fn path_for(&self, document: &ToolchainDocument) -> PathBuf {
        self.dir.join(document.file_name())
    }
}

impl ToolchainSink for FsSink {
    fn prepare(&self) -> Result<(), FilesystemError> {
        ensure_dir(&self.dir).map_err(|source| FilesystemError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }

    fn write(&self, document: &ToolchainDocument) -> Result<PathBuf, FilesystemError> {
        let path = self.path_for(document);

        write_string(&path, document.as_str()).map_err(|source| FilesystemError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("wrote {}", path.display());
        Ok(path)
    }
}
