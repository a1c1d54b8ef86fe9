use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use webwrap_core::utils::hash::hash_bytes;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("expected hash '{0}' is not a 64-character hex SHA-256")]
    InvalidExpected(String),
}

/// SHA-256 and size of a built artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDigest {
    pub sha256: String,
    pub size: u64,
}

pub enum Verification {
    Match,
    Mismatch { actual: String },
}

pub fn run(file: &Path) -> Result<ArtifactDigest, HashError> {
    let data = fs::read(file).map_err(|e| HashError::Read {
        path: file.to_path_buf(),
        source: e,
    })?;
    Ok(ArtifactDigest {
        sha256: hash_bytes(&data),
        size: data.len() as u64,
    })
}

/// Compare a file against an expected SHA-256.
///
/// `expected` may carry a `sha256:` prefix or be a `sha256sum` output line.
pub fn verify(file: &Path, expected: &str) -> Result<Verification, HashError> {
    let expected = normalize_expected(expected)?;
    let digest = run(file)?;
    if digest.sha256 == expected {
        Ok(Verification::Match)
    } else {
        Ok(Verification::Mismatch {
            actual: digest.sha256,
        })
    }
}

fn normalize_expected(expected: &str) -> Result<String, HashError> {
    let token = expected.split_whitespace().next().unwrap_or_default();
    let hex = token.strip_prefix("sha256:").unwrap_or(token).to_ascii_lowercase();
    if hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(hex)
    } else {
        Err(HashError::InvalidExpected(expected.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TEST_CONTENT_SHA: &str = "6ae8a75555209fd6c44157c0aed8016e763ff435a19cf186f76863140143ff72";

    fn apk(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn digest_has_hash_and_size() {
        let file = apk(b"test content");
        let digest = run(file.path()).unwrap();

        assert_eq!(digest.sha256, TEST_CONTENT_SHA);
        assert_eq!(digest.size, 12);
    }

    #[test]
    fn verify_accepts_prefixed_and_sha256sum_forms() {
        let file = apk(b"test content");
        let upper = TEST_CONTENT_SHA.to_uppercase();
        let prefixed = format!("sha256:{}", TEST_CONTENT_SHA);
        let sum_line = format!("{}  app-debug.apk\n", TEST_CONTENT_SHA);

        for expected in [upper.as_str(), prefixed.as_str(), sum_line.as_str()] {
            assert!(matches!(verify(file.path(), expected).unwrap(), Verification::Match));
        }
    }

    #[test]
    fn verify_reports_actual_on_mismatch() {
        let file = apk(b"other content");
        match verify(file.path(), TEST_CONTENT_SHA).unwrap() {
            Verification::Mismatch { actual } => assert_ne!(actual, TEST_CONTENT_SHA),
            Verification::Match => panic!("hashes should differ"),
        }
    }

    #[test]
    fn malformed_expected_is_rejected_before_reading() {
        let result = verify(Path::new("/nonexistent/app.apk"), "deadbeef");
        assert!(matches!(result, Err(HashError::InvalidExpected(_))));
    }

    #[test]
    fn missing_file_is_read_error() {
        let result = run(Path::new("/nonexistent/app.apk"));
        assert!(matches!(result, Err(HashError::Read { .. })));
    }
}
