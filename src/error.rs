//! Error types for docx-anonymize

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Pipeline step that was running when a write failure occurred
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Unpacking entries into the working area
    Extract,
    /// Substituting text in allow-listed parts
    Transform,
    /// Building the output archive
    Repack,
    /// Moving the finished archive to its destination
    Persist,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Extract => "extract",
            Stage::Transform => "transform",
            Stage::Repack => "repack",
            Stage::Persist => "persist",
        };
        f.write_str(s)
    }
}

/// Errors returned by the archive rewriter
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("invalid package {}: {reason}", .path.display())]
    InvalidPackage { path: PathBuf, reason: String },

    #[error("invalid rewrite spec: {0}")]
    InvalidRewriteSpec(String),

    #[error("destination not writable {}: {source}", .path.display())]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write failure during {stage}: {source}")]
    PartialWriteFailure {
        stage: Stage,
        #[source]
        source: io::Error,
    },
}

impl RewriteError {
    pub(crate) fn invalid_package(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::InvalidPackage {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write_failure(stage: Stage, source: impl Into<io::Error>) -> Self {
        Self::PartialWriteFailure {
            stage,
            source: source.into(),
        }
    }

    pub(crate) fn zip_failure(stage: Stage, err: zip::result::ZipError) -> Self {
        Self::write_failure(stage, io::Error::other(err))
    }
}

/// Main error type for the resolver, bulk driver and CLI
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    #[error("Folder does not exist: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("No .docx files found in folder: {}", .0.display())]
    NoPackages(PathBuf),

    #[error("Missing required value: {0}")]
    MissingValue(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
