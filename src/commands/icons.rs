use std::error::Error;
use std::path::Path;

use webwrap_core::icon::{self, IconReport, ScaleMode};
use webwrap_core::request::read_icon;

use crate::commands::project_paths;

/// Regenerate the launcher icon set from an image file.
pub fn run(
    project: &Path,
    layout: Option<&Path>,
    icon_path: &Path,
    mode: ScaleMode,
) -> Result<IconReport, Box<dyn Error>> {
    let paths = project_paths(project, layout)?;
    let bytes = read_icon(icon_path)?;
    Ok(icon::generate_icons(&paths, &bytes, mode)?)
}
