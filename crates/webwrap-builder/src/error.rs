use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use webwrap_core::ValidationError;
use webwrap_core::icon::IconError;
use webwrap_core::patch::PatchError;

/// Errors that can occur during the build process
#[derive(Debug, Error)]
pub enum BuildError {
    /// Request is missing a field or carries an invalid one
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),
    /// Template patching failed
    #[error("patching failed: {0}")]
    Patch(#[from] PatchError),
    /// Icon generation failed
    #[error("icon generation failed: {0}")]
    Icon(#[from] IconError),
    /// Build tool could not be started
    #[error("failed to start {program}: {source}")]
    Spawn { program: String, source: io::Error },
    /// Capturing or waiting on the build tool failed
    #[error("failed while running {task}: {source}")]
    Wait { task: String, source: io::Error },
    /// Build tool ran past the configured timeout and was killed
    #[error("{task} did not finish within {timeout:?}")]
    TimedOut { task: String, timeout: Duration },
    /// Build tool exited unsuccessfully
    #[error("{task} failed ({})", exit_description(.exit_code))]
    TaskFailed {
        task: String,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// Artifact exists but could not be read
    #[error("failed to read artifact {}: {source}", .path.display())]
    ArtifactRead { path: PathBuf, source: io::Error },
    /// Artifact could not be copied to the output directory
    #[error("failed to write artifact to {}: {source}", .path.display())]
    Export { path: PathBuf, source: io::Error },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
