//! Template patching: rewrite placeholders in the manifest, build script and activity.

pub mod gradle;
pub mod manifest;
pub mod source;
mod error;

pub use error::PatchError;

use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::layout::ProjectPaths;
use crate::request::BuildRequest;
use crate::retry::RetryPolicy;

/// What a patch run touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchReport {
    /// Every file rewritten, in the order they were written
    pub files: Vec<PathBuf>,
    /// Where the activity source lives after patching
    pub activity: PathBuf,
    /// Package tree removed during relocation, if any
    pub removed_tree: Option<PathBuf>,
}

/// Patch the project for `request` using the default retry policy.
pub fn patch_project(paths: &ProjectPaths, request: &BuildRequest) -> Result<PatchReport, PatchError> {
    patch_project_with(paths, request, &RetryPolicy::default())
}

/// Patch the project for `request`.
///
/// - Legacy requests (no package name): manifest label and activity URL, in place.
/// - Package-aware requests: additionally the manifest package, the build script
///   `applicationId` and the activity's package, with the activity moved to match.
pub fn patch_project_with(
    paths: &ProjectPaths,
    request: &BuildRequest,
    retry: &RetryPolicy,
) -> Result<PatchReport, PatchError> {
    let application_id = request.application_id();
    let mut files = Vec::new();

    manifest::patch_manifest(&paths.manifest, &request.label, application_id.as_deref())?;
    info!(file = %paths.manifest.display(), "patched manifest");
    files.push(paths.manifest.clone());

    if let Some(id) = &application_id {
        gradle::patch_build_config(&paths.build_config, id)?;
        info!(file = %paths.build_config.display(), application_id = %id, "patched build config");
        files.push(paths.build_config.clone());
    }

    let outcome = source::patch_activity(paths, &request.url, application_id.as_deref(), retry)?;
    info!(file = %outcome.path.display(), "patched activity");
    files.push(outcome.path.clone());

    Ok(PatchReport {
        files,
        activity: outcome.path,
        removed_tree: outcome.removed_tree,
    })
}

pub(crate) fn compile(pattern: &str) -> Result<Regex, PatchError> {
    Regex::new(pattern).map_err(|e| PatchError::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })
}

pub(crate) fn read_file(file: &Path) -> Result<String, PatchError> {
    fs::read_to_string(file).map_err(|e| PatchError::Read {
        file: file.to_path_buf(),
        source: e,
    })
}

pub(crate) fn write_file(file: &Path, content: &str) -> Result<(), PatchError> {
    fs::write(file, content).map_err(|e| PatchError::Write {
        file: file.to_path_buf(),
        source: e,
    })
}

/// Replace up to `limit` matches (0 = all), failing when there are none.
pub(crate) fn replace_required<F>(
    content: &str,
    re: &Regex,
    limit: usize,
    file: &Path,
    pattern: &str,
    replacement: F,
) -> Result<String, PatchError>
where
    F: FnMut(&Captures) -> String,
{
    if !re.is_match(content) {
        return Err(PatchError::PatternNotFound {
            file: file.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }
    Ok(re.replacen(content, limit, replacement).into_owned())
}
