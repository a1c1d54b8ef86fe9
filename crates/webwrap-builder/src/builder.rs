use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, info_span, warn};
use webwrap_core::icon::{self, IconReport, ScaleMode};
use webwrap_core::patch::{self, PatchReport};
use webwrap_core::retry::RetryPolicy;
use webwrap_core::utils::hash::hash_bytes;
use webwrap_core::{BuildRequest, ProjectPaths};

use crate::error::BuildError;
use crate::tool::{BuildTool, TaskOutput};

/// Gradle task that wipes previous build outputs.
pub const CLEAN_TASK: &str = "clean";

/// Knobs for one build run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Run `clean` before assembling; `None` cleans only for package-aware requests
    pub clean: Option<bool>,
    pub scale_mode: ScaleMode,
    /// Policy for removing the old package tree during relocation
    pub retry: RetryPolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            clean: None,
            scale_mode: ScaleMode::Identical,
            retry: RetryPolicy::default(),
        }
    }
}

/// The packaged app handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Where the build tool left it
    pub path: PathBuf,
    /// Name to hand it out under
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub sha256: String,
}

/// Outcome of a successful build-tool run.
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub patch: PatchReport,
    pub icons: IconReport,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// `None` when the tool reported success but left no file at the expected path
    pub artifact: Option<Artifact>,
}

/// Patch the project, regenerate icons and build the APK.
///
/// # Arguments
/// * `paths` - Project layout anchored at the project root
/// * `request` - Label, URL, optional package name, icon and variant
/// * `tool` - Build tool to run the clean and assemble tasks with
/// * `options` - Clean, scaling and retry settings
///
/// # Returns
/// The captured output of the assemble task and the artifact, if one was found.
/// A failing task is an error carrying both output streams verbatim.
pub fn build<T: BuildTool>(
    paths: &ProjectPaths,
    request: &BuildRequest,
    tool: &T,
    options: &BuildOptions,
) -> Result<BuildResult, BuildError> {
    let span = info_span!("build", variant = %request.variant, root = %paths.root.display());
    let _enter = span.enter();

    // Step 1: Validate the request, decoding the icon before any file is touched
    request.validate()?;
    let icon_image = icon::decode_icon(&request.icon)?;

    // Step 2: Patch templates
    let patch_report = patch::patch_project_with(paths, request, &options.retry)?;

    // Step 3: Regenerate launcher icons
    let icon_report = icon::generate_icons_from(paths, icon_image, options.scale_mode)?;

    // Step 4: Clean, for package-aware builds unless told otherwise
    let clean = options.clean.unwrap_or(request.package_name.is_some());
    if clean {
        run_checked(tool, &paths.root, CLEAN_TASK)?;
    }

    // Step 5: Assemble
    let output = run_checked(tool, &paths.root, request.variant.task())?;

    // Step 6: Pick up the artifact
    let artifact = resolve_artifact(paths, request)?;

    Ok(BuildResult {
        patch: patch_report,
        icons: icon_report,
        exit_code: output.exit_code,
        stdout: output.stdout,
        stderr: output.stderr,
        artifact,
    })
}

/// Run `task`, turning a non-zero exit into [`BuildError::TaskFailed`].
fn run_checked<T: BuildTool>(tool: &T, root: &Path, task: &str) -> Result<TaskOutput, BuildError> {
    let output = tool.run_task(root, task)?;
    if !output.success() {
        return Err(BuildError::TaskFailed {
            task: task.to_string(),
            exit_code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
        });
    }
    Ok(output)
}

/// Read the artifact for the request's variant, or `None` if the tool left nothing there.
pub fn resolve_artifact(
    paths: &ProjectPaths,
    request: &BuildRequest,
) -> Result<Option<Artifact>, BuildError> {
    let path = paths.artifact(request.variant);
    if !path.is_file() {
        warn!(path = %path.display(), "build succeeded but artifact not found at expected location");
        return Ok(None);
    }

    let bytes = fs::read(&path).map_err(|e| BuildError::ArtifactRead {
        path: path.clone(),
        source: e,
    })?;
    let sha256 = hash_bytes(&bytes);
    info!(path = %path.display(), size = bytes.len(), %sha256, "artifact ready");

    Ok(Some(Artifact {
        path,
        file_name: request.artifact_name(),
        bytes,
        sha256,
    }))
}

/// Write the artifact into `output_dir` under its file name.
pub fn export_artifact(artifact: &Artifact, output_dir: &Path) -> Result<PathBuf, BuildError> {
    fs::create_dir_all(output_dir).map_err(|e| BuildError::Export {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let dest = output_dir.join(&artifact.file_name);
    fs::write(&dest, &artifact.bytes).map_err(|e| BuildError::Export {
        path: dest.clone(),
        source: e,
    })?;
    Ok(dest)
}
