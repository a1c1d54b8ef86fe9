//! Project layout: every file and directory role the patcher and icon generator touch.
//!
//! Paths are stored relative to the project root so one layout file can describe
//! any checkout of the template project.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::request::BuildVariant;

/// Errors from loading or saving a layout file.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid layout {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write layout {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLayout {
    /// Android manifest holding `android:label` and `package`
    pub manifest: PathBuf,
    /// Gradle build script holding `applicationId`
    pub build_config: PathBuf,
    /// Root of the Java source tree
    pub java_root: PathBuf,
    /// File name of the activity that loads the URL
    pub activity_file: String,
    /// Package the activity ships with in the unmodified template
    pub template_package: String,
    /// Name of the `String` variable holding the start URL
    pub url_variable: String,
    /// Android resource directory
    pub res_dir: PathBuf,
    /// Density directory names under `res_dir` that receive launcher icons
    pub density_dirs: Vec<String>,
    /// `mipmap-*` directories never purged (adaptive icon XML references)
    pub preserved_dirs: Vec<String>,
    /// Shared prefix of every generated launcher icon file
    pub icon_prefix: String,
    pub debug_artifact: PathBuf,
    pub release_artifact: PathBuf,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        ProjectLayout {
            manifest: PathBuf::from("app/src/main/AndroidManifest.xml"),
            build_config: PathBuf::from("app/build.gradle"),
            java_root: PathBuf::from("app/src/main/java"),
            activity_file: "MainActivity.java".to_string(),
            template_package: "com.myexampoint.webtoapp".to_string(),
            url_variable: "myurl".to_string(),
            res_dir: PathBuf::from("app/src/main/res"),
            density_dirs: ["mdpi", "hdpi", "xhdpi", "xxhdpi", "xxxhdpi"]
                .iter()
                .map(|dpi| format!("mipmap-{}", dpi))
                .collect(),
            preserved_dirs: vec!["mipmap-anydpi-v26".to_string()],
            icon_prefix: "ic_launcher".to_string(),
            debug_artifact: PathBuf::from("app/build/outputs/apk/debug/app-debug.apk"),
            release_artifact: PathBuf::from("app/build/outputs/apk/release/app-release.apk"),
        }
    }
}

impl ProjectLayout {
    pub fn load(path: &Path) -> Result<ProjectLayout, LayoutError> {
        let content = fs::read_to_string(path).map_err(|e| LayoutError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| LayoutError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), LayoutError> {
        let write_err = |e| LayoutError::Write {
            path: path.to_path_buf(),
            source: e,
        };
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| write_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
        fs::write(path, content).map_err(write_err)
    }

    /// Anchor every relative path at `root`.
    pub fn resolve(&self, root: &Path) -> ProjectPaths {
        ProjectPaths {
            root: root.to_path_buf(),
            manifest: root.join(&self.manifest),
            build_config: root.join(&self.build_config),
            java_root: root.join(&self.java_root),
            res_dir: root.join(&self.res_dir),
            layout: self.clone(),
        }
    }
}

/// A layout anchored at a concrete project root.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub manifest: PathBuf,
    pub build_config: PathBuf,
    pub java_root: PathBuf,
    pub res_dir: PathBuf,
    pub layout: ProjectLayout,
}

impl ProjectPaths {
    /// Absolute paths of the density directories, in layout order.
    pub fn density_dirs(&self) -> Vec<PathBuf> {
        self.layout
            .density_dirs
            .iter()
            .map(|name| self.res_dir.join(name))
            .collect()
    }

    /// Where the activity lives in the unmodified template.
    pub fn template_activity(&self) -> PathBuf {
        package_dir(&self.java_root, &self.layout.template_package).join(&self.layout.activity_file)
    }

    pub fn artifact(&self, variant: BuildVariant) -> PathBuf {
        match variant {
            BuildVariant::Debug => self.root.join(&self.layout.debug_artifact),
            BuildVariant::Release => self.root.join(&self.layout.release_artifact),
        }
    }
}

/// Directory for a dotted Java package under a source root.
pub fn package_dir(java_root: &Path, package: &str) -> PathBuf {
    package
        .split('.')
        .fold(java_root.to_path_buf(), |dir, segment| dir.join(segment))
}
