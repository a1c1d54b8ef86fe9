//! The build tool seam and its Gradle wrapper implementation.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::BuildError;

/// How often a running task is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured result of one build tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl TaskOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs one named task of an external build tool in a project directory.
pub trait BuildTool {
    fn run_task(&self, project_root: &Path, task: &str) -> Result<TaskOutput, BuildError>;
}

/// The Gradle wrapper shipped with the project, or `gradle` from `PATH` without one.
#[derive(Debug, Clone, Default)]
pub struct Gradle {
    /// Kill the task after this long; `None` waits indefinitely.
    ///
    /// On Unix the wrapper `exec`s the JVM, so killing the child stops Gradle.
    /// On Windows the whole process tree under `cmd /C` is terminated.
    pub timeout: Option<Duration>,
}

impl Gradle {
    pub fn new(timeout: Option<Duration>) -> Self {
        Gradle { timeout }
    }

    /// Platform-appropriate command line for `task`.
    pub fn command(project_root: &Path, task: &str) -> Command {
        let (program, mut args) = entry_point(project_root);
        args.push(task.to_string());
        let mut command = Command::new(program);
        command.args(args).current_dir(project_root);
        command
    }
}

/// Program and leading arguments that start Gradle in `project_root`.
fn entry_point(project_root: &Path) -> (String, Vec<String>) {
    let windows = cfg!(target_os = "windows");
    match wrapper_path(project_root) {
        Some(_) if windows => (
            "cmd".to_string(),
            vec!["/C".to_string(), "gradlew.bat".to_string()],
        ),
        // Through sh so a wrapper checked out without its execute bit still runs
        Some(_) => ("sh".to_string(), vec!["gradlew".to_string()]),
        None if windows => ("gradle.bat".to_string(), Vec::new()),
        None => ("gradle".to_string(), Vec::new()),
    }
}

impl BuildTool for Gradle {
    fn run_task(&self, project_root: &Path, task: &str) -> Result<TaskOutput, BuildError> {
        let command = Gradle::command(project_root, task);
        run_captured(command, task, self.timeout)
    }
}

/// Run `command` to completion with both streams captured.
///
/// Streams go to anonymous temp files rather than pipes so a chatty build cannot
/// block on a full pipe while we poll for exit.
pub fn run_captured(
    mut command: Command,
    task: &str,
    timeout: Option<Duration>,
) -> Result<TaskOutput, BuildError> {
    let wait_err = |e| BuildError::Wait {
        task: task.to_string(),
        source: e,
    };

    let mut stdout = tempfile::tempfile().map_err(wait_err)?;
    let mut stderr = tempfile::tempfile().map_err(wait_err)?;
    command
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout.try_clone().map_err(wait_err)?))
        .stderr(Stdio::from(stderr.try_clone().map_err(wait_err)?));

    let program = command.get_program().to_string_lossy().into_owned();
    info!(task, program = %program, "starting build task");
    let started = Instant::now();

    let mut child = command.spawn().map_err(|e| BuildError::Spawn {
        program: program.clone(),
        source: e,
    })?;
    // The parent's copies of the stream handles live in `command`
    drop(command);

    let status = wait_with_timeout(&mut child, task, timeout)?;
    let exit_code = status.code();
    info!(task, ?exit_code, elapsed = ?started.elapsed(), "build task finished");

    Ok(TaskOutput {
        exit_code,
        stdout: read_captured(&mut stdout).map_err(wait_err)?,
        stderr: read_captured(&mut stderr).map_err(wait_err)?,
    })
}

fn wait_with_timeout(
    child: &mut Child,
    task: &str,
    timeout: Option<Duration>,
) -> Result<ExitStatus, BuildError> {
    let wait_err = |e| BuildError::Wait {
        task: task.to_string(),
        source: e,
    };

    let Some(timeout) = timeout else {
        return child.wait().map_err(wait_err);
    };

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait().map_err(wait_err)? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            warn!(task, ?timeout, "build task timed out, killing it");
            kill_tree(child);
            if let Err(e) = child.kill() {
                debug!(task, error = %e, "kill failed, task may have just exited");
            }
            // Reap so no zombie is left behind
            let _ = child.wait();
            return Err(BuildError::TimedOut {
                task: task.to_string(),
                timeout,
            });
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Terminate the processes the child started; `cmd /C` does not forward a kill.
#[cfg(windows)]
fn kill_tree(child: &Child) {
    let status = Command::new("taskkill")
        .args(["/T", "/F", "/PID", &child.id().to_string()])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    if let Err(e) = status {
        debug!(pid = child.id(), error = %e, "taskkill failed");
    }
}

#[cfg(not(windows))]
fn kill_tree(_child: &Child) {}

fn read_captured(file: &mut File) -> std::io::Result<String> {
    file.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Path of the wrapper script, if the project ships one.
pub fn wrapper_path(project_root: &Path) -> Option<PathBuf> {
    let name = if cfg!(target_os = "windows") {
        "gradlew.bat"
    } else {
        "gradlew"
    };
    let path = project_root.join(name);
    path.is_file().then_some(path)
}
