pub mod build;
pub mod hash;
pub mod icons;
pub mod init_layout;
pub mod patch;

use std::path::Path;

use webwrap_core::{LayoutError, ProjectLayout, ProjectPaths};

/// Resolve the layout for `project`, from `layout_file` when given.
pub fn project_paths(project: &Path, layout_file: Option<&Path>) -> Result<ProjectPaths, LayoutError> {
    let layout = match layout_file {
        Some(path) => ProjectLayout::load(path)?,
        None => ProjectLayout::default(),
    };
    Ok(layout.resolve(project))
}
