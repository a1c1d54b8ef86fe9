//! Launcher icon generation from a single uploaded image.

pub mod density;
mod error;
pub mod mask;
pub mod write;

pub use error::IconError;
pub use mask::{make_rounded, rounded_mask_contains};
pub use write::{IconFileNames, purge_launcher_icons, write_icons};

use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::path::PathBuf;
use tracing::info;

use crate::layout::ProjectPaths;

/// How icons are sized across density directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMode {
    /// Every density directory receives the full-resolution images
    #[default]
    Identical,
    /// Each known density directory receives icons resized to its launcher size
    PerDensity,
}

/// The three launcher icon variants derived from one upload.
#[derive(Debug, Clone, PartialEq)]
pub struct IconBundle {
    pub original: RgbaImage,
    pub foreground: RgbaImage,
    pub rounded: RgbaImage,
}

impl IconBundle {
    pub fn from_image(img: RgbaImage) -> Self {
        let rounded = make_rounded(&img);
        IconBundle {
            foreground: img.clone(),
            original: img,
            rounded,
        }
    }

    /// Resize to a square launcher size; the foreground layer gets its own size.
    pub fn scaled(&self, launcher: u32, foreground: u32) -> Self {
        let original = imageops::resize(&self.original, launcher, launcher, FilterType::Lanczos3);
        let foreground =
            imageops::resize(&self.foreground, foreground, foreground, FilterType::Lanczos3);
        let rounded = make_rounded(&original);
        IconBundle {
            original,
            foreground,
            rounded,
        }
    }
}

/// Summary of one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconReport {
    pub width: u32,
    pub height: u32,
    /// Stale launcher files removed by the purge
    pub removed: usize,
    pub written: Vec<PathBuf>,
}

/// Decode uploaded bytes into an RGBA image.
pub fn decode_icon(bytes: &[u8]) -> Result<RgbaImage, IconError> {
    let img = image::load_from_memory(bytes).map_err(IconError::Decode)?;
    Ok(img.to_rgba8())
}

/// Decode, purge stale launcher files, then write the new icon set.
pub fn generate_icons(
    paths: &ProjectPaths,
    icon: &[u8],
    mode: ScaleMode,
) -> Result<IconReport, IconError> {
    let img = decode_icon(icon)?;
    generate_icons_from(paths, img, mode)
}

/// Purge and write from an already decoded image.
///
/// Lets a caller reject an undecodable upload before touching the project.
pub fn generate_icons_from(
    paths: &ProjectPaths,
    img: RgbaImage,
    mode: ScaleMode,
) -> Result<IconReport, IconError> {
    let (width, height) = img.dimensions();
    let bundle = IconBundle::from_image(img);

    let removed = purge_launcher_icons(paths)?;
    let written = write_icons(paths, &bundle, mode)?;
    info!(width, height, removed, written = written.len(), ?mode, "generated launcher icons");

    Ok(IconReport {
        width,
        height,
        removed,
        written,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::layout::ProjectLayout;
    use image::{ImageFormat, Rgba};
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        });
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode_icon(b"not an image"), Err(IconError::Decode(_))));
    }

    #[test]
    fn bundle_foreground_is_a_copy() {
        let img = decode_icon(&png_bytes(32, 32)).unwrap();
        let bundle = IconBundle::from_image(img.clone());
        assert_eq!(bundle.original, img);
        assert_eq!(bundle.foreground, img);
        assert_eq!(bundle.rounded.get_pixel(0, 0)[3], 0);
        assert_eq!(bundle.rounded.get_pixel(16, 16), img.get_pixel(16, 16));
    }

    #[test]
    fn scaled_bundle_uses_requested_sizes() {
        let bundle = IconBundle::from_image(decode_icon(&png_bytes(100, 100)).unwrap());
        let scaled = bundle.scaled(48, 108);
        assert_eq!(scaled.original.dimensions(), (48, 48));
        assert_eq!(scaled.rounded.dimensions(), (48, 48));
        assert_eq!(scaled.foreground.dimensions(), (108, 108));
        assert_eq!(scaled.rounded.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn generate_writes_three_files_per_density() {
        let dir = tempdir().unwrap();
        let paths = ProjectLayout::default().resolve(dir.path());

        let report = generate_icons(&paths, &png_bytes(64, 64), ScaleMode::Identical).unwrap();

        assert_eq!((report.width, report.height), (64, 64));
        assert_eq!(report.removed, 0);
        assert_eq!(report.written.len(), 15);
        for density_dir in paths.density_dirs() {
            let mut names: Vec<String> = fs::read_dir(&density_dir)
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            names.sort();
            assert_eq!(
                names,
                vec!["ic_launcher.png", "ic_launcher_foreground.png", "ic_launcher_round.png"]
            );
        }
    }

    #[test]
    fn generate_fails_on_undecodable_upload_without_touching_files() {
        let dir = tempdir().unwrap();
        let paths = ProjectLayout::default().resolve(dir.path());
        let stale = paths.res_dir.join("mipmap-hdpi/ic_launcher_old.webp");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, b"old").unwrap();

        let result = generate_icons(&paths, b"garbage", ScaleMode::Identical);
        assert!(matches!(result, Err(IconError::Decode(_))));
        assert!(stale.exists());
    }
}
