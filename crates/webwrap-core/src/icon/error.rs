use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from launcher icon generation.
#[derive(Debug, Error)]
pub enum IconError {
    /// Uploaded bytes are not a decodable image
    #[error("failed to decode icon: {0}")]
    Decode(#[source] image::ImageError),
    /// Generated image could not be encoded as PNG
    #[error("failed to encode {name}: {source}")]
    Encode {
        name: String,
        source: image::ImageError,
    },
    /// Filesystem failure while purging or writing icons
    #[error("icon I/O failed for {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}
