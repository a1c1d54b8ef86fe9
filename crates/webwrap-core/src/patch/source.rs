//! Activity source: start URL, package declaration and relocation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::escape;
use crate::layout::{ProjectPaths, package_dir};
use crate::patch::{PatchError, compile, read_file, replace_required, write_file};
use crate::retry::{self, RetryPolicy};

const PACKAGE_DECL_PATTERN: &str = r"(?m)^(\s*)package\s+([A-Za-z_][\w.]*)\s*;";

/// Result of patching the activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityOutcome {
    pub path: PathBuf,
    pub removed_tree: Option<PathBuf>,
}

/// Find the activity: first where the template ships it, then anywhere under the Java root.
///
/// The fallback finds the file again after an earlier run moved it.
pub fn locate_activity(paths: &ProjectPaths) -> Result<PathBuf, PatchError> {
    let template = paths.template_activity();
    if template.is_file() {
        return Ok(template);
    }

    let name = &paths.layout.activity_file;
    let not_found = || PatchError::SourceNotFound {
        name: name.clone(),
        java_root: paths.java_root.clone(),
    };
    find_file(&paths.java_root, name)
        .map_err(|_| not_found())?
        .ok_or_else(not_found)
}

/// Depth-first search in sorted order so the result is stable.
fn find_file(dir: &Path, name: &str) -> io::Result<Option<PathBuf>> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in &entries {
        if entry.file_type()?.is_file() && entry.file_name() == name {
            return Ok(Some(entry.path()));
        }
    }
    for entry in &entries {
        if entry.file_type()?.is_dir() {
            if let Some(found) = find_file(&entry.path(), name)? {
                return Ok(Some(found));
            }
        }
    }
    Ok(None)
}

/// Package declared by a Java source file.
pub fn declared_package(content: &str) -> Option<String> {
    let re = compile(PACKAGE_DECL_PATTERN).ok()?;
    re.captures(content).map(|caps| caps[2].to_string())
}

/// Replace the literal assigned to `String <variable> = "…";`.
pub fn patch_url(content: &str, variable: &str, url: &str, file: &Path) -> Result<String, PatchError> {
    let pattern = format!(
        r#"(String\s+{}\s*=\s*)"(?:[^"\\]|\\.)*"(\s*;)"#,
        regex::escape(variable)
    );
    let re = compile(&pattern)?;
    let value = escape::java_string(url);
    let description = format!(r#"String {} = "…";"#, variable);
    replace_required(content, &re, 1, file, &description, |caps| {
        format!(r#"{}"{}"{}"#, &caps[1], value, &caps[2])
    })
}

/// Replace the file's `package …;` declaration.
pub fn patch_package_decl(content: &str, package: &str, file: &Path) -> Result<String, PatchError> {
    let re = compile(PACKAGE_DECL_PATTERN)?;
    replace_required(content, &re, 1, file, "package declaration", |caps| {
        format!("{}package {};", &caps[1], package)
    })
}

/// Root of the namespace an old package occupies: its first two segments.
///
/// `com.myexampoint.webtoapp` owns `com/myexampoint`.
pub fn namespace_root(java_root: &Path, package: &str) -> PathBuf {
    let owned: Vec<&str> = package.split('.').take(2).collect();
    package_dir(java_root, &owned.join("."))
}

/// Patch the activity's URL and, for package-aware requests, move it under the new package.
pub fn patch_activity(
    paths: &ProjectPaths,
    url: &str,
    application_id: Option<&str>,
    retry: &RetryPolicy,
) -> Result<ActivityOutcome, PatchError> {
    let current = locate_activity(paths)?;
    let content = read_file(&current)?;
    let mut patched = patch_url(&content, &paths.layout.url_variable, url, &current)?;

    let Some(package) = application_id else {
        write_file(&current, &patched)?;
        return Ok(ActivityOutcome {
            path: current,
            removed_tree: None,
        });
    };

    let old_package = declared_package(&content).ok_or_else(|| PatchError::PatternNotFound {
        file: current.clone(),
        pattern: "package declaration".to_string(),
    })?;
    patched = patch_package_decl(&patched, package, &current)?;

    // Write the relocated file first so a failure here leaves the original in place
    let new_dir = package_dir(&paths.java_root, package);
    fs::create_dir_all(&new_dir).map_err(|e| PatchError::CreateDir {
        dir: new_dir.clone(),
        source: e,
    })?;
    let destination = new_dir.join(&paths.layout.activity_file);
    write_file(&destination, &patched)?;

    let old_root = namespace_root(&paths.java_root, &old_package);
    debug!(tree = %old_root.display(), policy = %retry, "removing old package tree");
    remove_tree_keeping(&old_root, &destination, retry)?;

    Ok(ActivityOutcome {
        path: destination,
        removed_tree: Some(old_root),
    })
}

/// Remove `root` entirely, or everything under it except `keep` and its ancestors.
fn remove_tree_keeping(root: &Path, keep: &Path, retry: &RetryPolicy) -> Result<(), PatchError> {
    if !keep.starts_with(root) {
        return Ok(retry::remove_dir_all(root, retry)?);
    }
    if root == keep {
        return Ok(());
    }

    let read_err = |e| PatchError::ReadDir {
        dir: root.to_path_buf(),
        source: e,
    };
    for entry in fs::read_dir(root).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if keep.starts_with(&path) {
            if path.is_dir() {
                remove_tree_keeping(&path, keep, retry)?;
            }
        } else if path.is_dir() {
            retry::remove_dir_all(&path, retry)?;
        } else {
            retry::remove_file(&path, retry)?;
        }
    }
    Ok(())
}
