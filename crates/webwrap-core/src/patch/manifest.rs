//! AndroidManifest.xml placeholders.

use std::path::Path;

use crate::escape;
use crate::patch::{PatchError, compile, read_file, replace_required, write_file};

const LABEL_PATTERN: &str = r#"android:label="[^"]*""#;
const PACKAGE_PATTERN: &str = r#"(\s)package="[^"]*""#;

/// Set every `android:label` attribute to `label`.
pub fn patch_label(content: &str, label: &str, file: &Path) -> Result<String, PatchError> {
    let re = compile(LABEL_PATTERN)?;
    let value = escape::xml_attr(label);
    replace_required(content, &re, 0, file, "android:label", |_| {
        format!(r#"android:label="{}""#, value)
    })
}

/// Set the `<manifest package="…">` attribute.
pub fn patch_package(content: &str, application_id: &str, file: &Path) -> Result<String, PatchError> {
    let re = compile(PACKAGE_PATTERN)?;
    let value = escape::xml_attr(application_id);
    replace_required(content, &re, 1, file, "package", |caps| {
        format!(r#"{}package="{}""#, &caps[1], value)
    })
}

/// Patch the manifest in place. The package is only touched when `application_id` is given.
pub fn patch_manifest(
    file: &Path,
    label: &str,
    application_id: Option<&str>,
) -> Result<(), PatchError> {
    let mut content = read_file(file)?;
    content = patch_label(&content, label, file)?;
    if let Some(id) = application_id {
        content = patch_package(&content, id, file)?;
    }
    write_file(file, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::tests::MANIFEST;

    fn file() -> &'static Path {
        Path::new("AndroidManifest.xml")
    }

    #[test]
    fn replaces_every_label() {
        let out = patch_label(MANIFEST, "Shnuritek The Game", file()).unwrap();
        assert_eq!(out.matches(r#"android:label="Shnuritek The Game""#).count(), 2);
    }

    #[test]
    fn label_with_metacharacters_is_escaped() {
        let out = patch_label(MANIFEST, r#"Tom & "Jerry""#, file()).unwrap();
        assert!(out.contains(r#"android:label="Tom &amp; &quot;Jerry&quot;""#));
    }

    #[test]
    fn label_with_dollar_is_literal() {
        let out = patch_label(MANIFEST, "Cash $1", file()).unwrap();
        assert!(out.contains(r#"android:label="Cash $1""#));
    }

    #[test]
    fn replaces_package_attribute_only() {
        let out = patch_package(MANIFEST, "com.testapp123", file()).unwrap();
        assert!(out.contains(r#"package="com.testapp123""#));
        assert!(out.contains(r#"android:name=".MainActivity""#));
        assert!(out.contains("xmlns:android="));
    }

    #[test]
    fn missing_package_attribute_is_reported() {
        let content = r#"<manifest><application android:label="x"/></manifest>"#;
        let result = patch_package(content, "com.a", file());
        match result {
            Err(PatchError::PatternNotFound { pattern, .. }) => assert_eq!(pattern, "package"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
