use std::io;
use std::path::Path;

use webwrap_core::{LayoutError, ProjectLayout};

/// Write the default project layout to `output` so it can be edited.
///
/// An existing file is only replaced when `force` is set.
pub fn run(output: &Path, force: bool) -> Result<(), LayoutError> {
    if output.exists() && !force {
        return Err(LayoutError::Write {
            path: output.to_path_buf(),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "file exists (use --force)"),
        });
    }
    ProjectLayout::default().save(output)
}
