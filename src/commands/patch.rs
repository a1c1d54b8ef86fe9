use std::error::Error;
use std::path::Path;

use webwrap_core::patch::{self, PatchReport};
use webwrap_core::{BuildRequest, BuildVariant};

use crate::commands::project_paths;

/// Rewrite the template's label, URL and (optionally) package without building.
pub fn run(
    project: &Path,
    layout: Option<&Path>,
    label: &str,
    url: &str,
    package_name: Option<&str>,
) -> Result<PatchReport, Box<dyn Error>> {
    let paths = project_paths(project, layout)?;
    let request = BuildRequest {
        label: label.to_string(),
        url: url.to_string(),
        package_name: package_name.map(str::to_string),
        icon: Vec::new(),
        variant: BuildVariant::Debug,
    };
    request.validate_text()?;
    Ok(patch::patch_project(&paths, &request)?)
}
