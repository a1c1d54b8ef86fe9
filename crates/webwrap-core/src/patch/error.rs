use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::retry::RetryError;

/// Error type for template patching.
#[derive(Debug, Error)]
pub enum PatchError {
    /// Target file could not be read
    #[error("failed to read {}: {source}", .file.display())]
    Read { file: PathBuf, source: io::Error },
    /// Patched content could not be written back
    #[error("failed to write {}: {source}", .file.display())]
    Write { file: PathBuf, source: io::Error },
    /// Destination directory for the relocated source could not be created
    #[error("failed to create directory {}: {source}", .dir.display())]
    CreateDir { dir: PathBuf, source: io::Error },
    /// A placeholder the template must contain was not found
    #[error("pattern {pattern} not found in {}", .file.display())]
    PatternNotFound { file: PathBuf, pattern: String },
    /// A placeholder pattern failed to compile
    #[error("invalid pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
    /// No activity source file anywhere under the Java root
    #[error("activity source {name} not found under {}", .java_root.display())]
    SourceNotFound { name: String, java_root: PathBuf },
    /// Old package tree could not be listed
    #[error("failed to list {}: {source}", .dir.display())]
    ReadDir { dir: PathBuf, source: io::Error },
    /// Old package tree could not be removed
    #[error(transparent)]
    Retry(#[from] RetryError),
}
