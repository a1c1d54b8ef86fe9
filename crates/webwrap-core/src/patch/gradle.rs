//! Gradle build script placeholders (Groovy or Kotlin DSL).

use std::path::Path;

use crate::escape;
use crate::patch::{PatchError, compile, read_file, replace_required, write_file};

// `applicationId "x"`, `applicationId 'x'` and `applicationId = "x"`
const APPLICATION_ID_PATTERN: &str = r#"(applicationId\s*=?\s*)(?:"[^"]*"|'[^']*')"#;

pub fn patch_application_id(
    content: &str,
    application_id: &str,
    file: &Path,
) -> Result<String, PatchError> {
    let re = compile(APPLICATION_ID_PATTERN)?;
    let value = escape::gradle_string(application_id);
    replace_required(content, &re, 0, file, "applicationId", |caps| {
        format!(r#"{}"{}""#, &caps[1], value)
    })
}

pub fn patch_build_config(file: &Path, application_id: &str) -> Result<(), PatchError> {
    let content = read_file(file)?;
    let patched = patch_application_id(&content, application_id, file)?;
    write_file(file, &patched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::tests::BUILD_GRADLE;

    fn file() -> &'static Path {
        Path::new("build.gradle")
    }

    #[test]
    fn groovy_application_id() {
        let out = patch_application_id(BUILD_GRADLE, "com.testapp123", file()).unwrap();
        assert!(out.contains(r#"applicationId "com.testapp123""#));
        assert!(out.contains("minSdkVersion 21"));
    }

    #[test]
    fn single_quoted_application_id() {
        let out = patch_application_id("applicationId 'com.old'", "com.new", file()).unwrap();
        assert_eq!(out, r#"applicationId "com.new""#);
    }

    #[test]
    fn kotlin_dsl_application_id() {
        let content = "defaultConfig {\n    applicationId = \"com.old\"\n}\n";
        let out = patch_application_id(content, "com.new", file()).unwrap();
        assert_eq!(out, "defaultConfig {\n    applicationId = \"com.new\"\n}\n");
    }

    #[test]
    fn missing_application_id_is_reported() {
        let result = patch_application_id("android {}", "com.a", file());
        assert!(matches!(result, Err(PatchError::PatternNotFound { .. })));
    }
}
