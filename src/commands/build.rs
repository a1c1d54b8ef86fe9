use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;
use webwrap_builder::{BuildError, BuildOptions, BuildResult, Gradle, export_artifact};
use webwrap_core::icon::ScaleMode;
use webwrap_core::{BuildRequest, BuildVariant};

use crate::commands::project_paths;

/// Everything the `build` subcommand needs.
#[derive(Debug, Clone)]
pub struct BuildArgs {
    pub project: PathBuf,
    pub layout: Option<PathBuf>,
    pub label: String,
    pub url: String,
    pub package_name: Option<String>,
    pub icon: PathBuf,
    pub variant: BuildVariant,
    pub clean: Option<bool>,
    pub scale_mode: ScaleMode,
    pub timeout: Option<Duration>,
    /// Copy the APK here under its artifact name
    pub output: Option<PathBuf>,
}

/// Result of the build together with where the APK was exported, if anywhere.
#[derive(Debug)]
pub struct BuildOutcome {
    pub result: BuildResult,
    pub exported: Option<PathBuf>,
}

/// Patch, regenerate icons, run Gradle and optionally export the APK.
///
/// Errors are boxed; a failed Gradle task is a `BuildError::TaskFailed` the
/// caller can downcast to print the captured output.
pub fn run(args: &BuildArgs) -> Result<BuildOutcome, Box<dyn Error>> {
    let paths = project_paths(&args.project, args.layout.as_deref())?;

    let request = BuildRequest::from_icon_file(
        args.label.as_str(),
        args.url.as_str(),
        args.package_name.clone(),
        &args.icon,
        args.variant,
    )
    .map_err(BuildError::from)?;
    let options = BuildOptions {
        clean: args.clean,
        scale_mode: args.scale_mode,
        ..BuildOptions::default()
    };

    let result = webwrap_builder::build(&paths, &request, &Gradle::new(args.timeout), &options)?;

    let exported = match (&result.artifact, &args.output) {
        (Some(artifact), Some(dir)) => {
            let dest = export_artifact(artifact, dir)?;
            info!(path = %dest.display(), "exported artifact");
            Some(dest)
        }
        _ => None,
    };

    Ok(BuildOutcome { result, exported })
}

/// `--timeout` in seconds, where zero means no limit.
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
