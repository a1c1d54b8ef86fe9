//! Purging stale launcher files and writing the generated set.

use image::{ImageFormat, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::icon::density;
use crate::icon::{IconBundle, IconError, ScaleMode};
use crate::layout::ProjectPaths;

/// File names of the three generated icons, derived from the layout's prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconFileNames {
    pub icon: String,
    pub foreground: String,
    pub round: String,
}

impl IconFileNames {
    pub fn new(prefix: &str) -> Self {
        IconFileNames {
            icon: format!("{}.png", prefix),
            foreground: format!("{}_foreground.png", prefix),
            round: format!("{}_round.png", prefix),
        }
    }
}

/// PNG bytes for each variant.
struct EncodedBundle {
    icon: Vec<u8>,
    foreground: Vec<u8>,
    round: Vec<u8>,
}

impl EncodedBundle {
    fn encode(bundle: &IconBundle, names: &IconFileNames) -> Result<Self, IconError> {
        Ok(EncodedBundle {
            icon: encode_png(&bundle.original, &names.icon)?,
            foreground: encode_png(&bundle.foreground, &names.foreground)?,
            round: encode_png(&bundle.rounded, &names.round)?,
        })
    }
}

fn encode_png(img: &RgbaImage, name: &str) -> Result<Vec<u8>, IconError> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(|e| IconError::Encode {
            name: name.to_string(),
            source: e,
        })?;
    Ok(out.into_inner())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> IconError + '_ {
    move |e| IconError::Io {
        path: path.to_path_buf(),
        source: e,
    }
}

/// Delete every `<prefix>*` file in each `mipmap-*` directory except the preserved ones.
///
/// Returns the number of files removed. A missing resource directory removes nothing.
pub fn purge_launcher_icons(paths: &ProjectPaths) -> Result<usize, IconError> {
    let res_dir = &paths.res_dir;
    if !res_dir.is_dir() {
        return Ok(0);
    }

    let layout = &paths.layout;
    let mut removed = 0;
    for entry in fs::read_dir(res_dir).map_err(io_error(res_dir))? {
        let entry = entry.map_err(io_error(res_dir))?;
        let dir = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        if !dir.is_dir() || !name.starts_with("mipmap-") || layout.preserved_dirs.contains(&name) {
            continue;
        }

        for file in fs::read_dir(&dir).map_err(io_error(&dir))? {
            let file = file.map_err(io_error(&dir))?;
            let path = file.path();
            let is_launcher = file
                .file_name()
                .to_string_lossy()
                .starts_with(&layout.icon_prefix);
            if is_launcher && path.is_file() {
                fs::remove_file(&path).map_err(io_error(&path))?;
                debug!(file = %path.display(), "removed stale launcher icon");
                removed += 1;
            }
        }
    }

    Ok(removed)
}

/// Write the bundle into every density directory, creating directories as needed.
///
/// Returns the paths written, three per density directory.
pub fn write_icons(
    paths: &ProjectPaths,
    bundle: &IconBundle,
    mode: ScaleMode,
) -> Result<Vec<PathBuf>, IconError> {
    let names = IconFileNames::new(&paths.layout.icon_prefix);
    let full_size = EncodedBundle::encode(bundle, &names)?;
    let mut written = Vec::new();

    for dir_name in &paths.layout.density_dirs {
        let dir = paths.res_dir.join(dir_name);
        fs::create_dir_all(&dir).map_err(io_error(&dir))?;

        let scaled = match (mode, density::for_dir(dir_name)) {
            (ScaleMode::PerDensity, Some(d)) => {
                Some(EncodedBundle::encode(&bundle.scaled(d.launcher, d.foreground), &names)?)
            }
            _ => None,
        };
        let encoded = scaled.as_ref().unwrap_or(&full_size);

        for (name, bytes) in [
            (&names.icon, &encoded.icon),
            (&names.foreground, &encoded.foreground),
            (&names.round, &encoded.round),
        ] {
            let path = dir.join(name);
            fs::write(&path, bytes).map_err(io_error(&path))?;
            written.push(path);
        }
    }

    Ok(written)
}
