//! The build request collected from the user.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Icon file extensions accepted on upload.
pub const ICON_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp"];

/// Artifact file name when the request carries no package name.
pub const DEFAULT_ARTIFACT_NAME: &str = "webtoapp.apk";

/// Prefix joined to the package name to form the application identifier.
pub const APPLICATION_ID_PREFIX: &str = "com";

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid package name '{0}': expected dot-separated identifiers")]
    InvalidPackageName(String),
    #[error("unsupported icon format '{extension}' (expected jpg, jpeg, png, webp or bmp)")]
    UnsupportedIconFormat { extension: String },
    #[error("failed to read icon {}: {source}", .path.display())]
    IconRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unknown build variant '{0}' (expected debug or release)")]
    UnknownVariant(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildVariant {
    #[default]
    Debug,
    Release,
}

impl BuildVariant {
    /// Gradle task that assembles this variant.
    pub fn task(self) -> &'static str {
        match self {
            BuildVariant::Debug => "assembleDebug",
            BuildVariant::Release => "assembleRelease",
        }
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildVariant::Debug => write!(f, "debug"),
            BuildVariant::Release => write!(f, "release"),
        }
    }
}

impl FromStr for BuildVariant {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "assembledebug" => Ok(BuildVariant::Debug),
            "release" | "assemblerelease" => Ok(BuildVariant::Release),
            _ => Err(ValidationError::UnknownVariant(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub label: String,
    pub url: String,
    /// `None` selects the legacy flow: no package rename, no relocation.
    pub package_name: Option<String>,
    /// Raw bytes of the uploaded icon, any format `image` can decode.
    pub icon: Vec<u8>,
    pub variant: BuildVariant,
}

impl BuildRequest {
    /// Build a request whose icon is read from `icon_path`.
    pub fn from_icon_file(
        label: impl Into<String>,
        url: impl Into<String>,
        package_name: Option<String>,
        icon_path: &Path,
        variant: BuildVariant,
    ) -> Result<Self, ValidationError> {
        let icon = read_icon(icon_path)?;
        Ok(BuildRequest {
            label: label.into(),
            url: url.into(),
            package_name,
            icon,
            variant,
        })
    }

    /// Check every required field, reporting the first problem.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_text()?;
        if self.icon.is_empty() {
            return Err(ValidationError::MissingField("icon"));
        }
        Ok(())
    }

    /// Check the fields the template patcher consumes: label, URL and package name.
    pub fn validate_text(&self) -> Result<(), ValidationError> {
        if self.label.trim().is_empty() {
            return Err(ValidationError::MissingField("label"));
        }
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingField("url"));
        }
        if let Some(name) = &self.package_name {
            if name.trim().is_empty() {
                return Err(ValidationError::MissingField("package name"));
            }
            validate_package_name(name)?;
        }
        Ok(())
    }

    /// `com.<package_name>`, or `None` in the legacy flow.
    pub fn application_id(&self) -> Option<String> {
        self.package_name
            .as_deref()
            .map(|name| format!("{}.{}", APPLICATION_ID_PREFIX, name))
    }

    /// File name the built APK is handed back under.
    pub fn artifact_name(&self) -> String {
        match &self.package_name {
            Some(name) => format!("{}.apk", name),
            None => DEFAULT_ARTIFACT_NAME.to_string(),
        }
    }
}

/// Accept dot-separated Java identifiers made of ASCII letters, digits and `_`.
pub fn validate_package_name(name: &str) -> Result<(), ValidationError> {
    let valid_segment = |segment: &str| {
        let mut chars = segment.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    };

    if name.split('.').all(valid_segment) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPackageName(name.to_string()))
    }
}

/// Read an icon upload from disk after checking its extension.
pub fn read_icon(path: &Path) -> Result<Vec<u8>, ValidationError> {
    check_icon_extension(path)?;
    fs::read(path).map_err(|e| ValidationError::IconRead {
        path: path.to_path_buf(),
        source: e,
    })
}

fn check_icon_extension(path: &Path) -> Result<(), ValidationError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if ICON_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedIconFormat { extension })
    }
}
