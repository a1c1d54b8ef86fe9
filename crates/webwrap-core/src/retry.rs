//! Bounded retry for filesystem operations that can fail on locked files.

use std::fmt;
use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum RetryError {
    #[error("{operation} still failing after {attempts} attempts: {last_error}")]
    Exhausted {
        operation: String,
        attempts: u32,
        last_error: io::Error,
    },
}

/// Fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 5,
            delay: Duration::from_secs(1),
        }
    }
}

impl fmt::Display for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} attempts, {:?} apart", self.max_attempts, self.delay)
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        RetryPolicy {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Run `op` until it succeeds or the attempts run out.
    ///
    /// `op` receives the 1-based attempt number.
    pub fn run<T, F>(&self, operation: &str, mut op: F) -> Result<T, RetryError>
    where
        F: FnMut(u32) -> io::Result<T>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= attempts => {
                    return Err(RetryError::Exhausted {
                        operation: operation.to_string(),
                        attempts,
                        last_error: e,
                    });
                }
                Err(e) => {
                    warn!(operation, attempt, error = %e, "attempt failed, retrying");
                    thread::sleep(self.delay);
                    attempt += 1;
                }
            }
        }
    }
}

/// Remove a directory tree, retrying while files are locked.
///
/// A tree that is already gone counts as removed.
pub fn remove_dir_all(path: &Path, policy: &RetryPolicy) -> Result<(), RetryError> {
    let operation = format!("removing {}", path.display());
    policy.run(&operation, |attempt| match std::fs::remove_dir_all(path) {
        Ok(()) => {
            debug!(path = %path.display(), attempt, "removed directory tree");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    })
}

/// Remove a single file, retrying while it is locked. A missing file counts as removed.
pub fn remove_file(path: &Path, policy: &RetryPolicy) -> Result<(), RetryError> {
    let operation = format!("removing {}", path.display());
    policy.run(&operation, |_| match std::fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    })
}
