//! Conventional launcher icon sizes per screen density.

/// Launcher and adaptive-foreground pixel sizes for one density bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Density {
    pub name: &'static str,
    /// 48dp launcher icon
    pub launcher: u32,
    /// 108dp adaptive icon foreground layer
    pub foreground: u32,
}

pub const DENSITIES: [Density; 5] = [
    Density { name: "mdpi", launcher: 48, foreground: 108 },
    Density { name: "hdpi", launcher: 72, foreground: 162 },
    Density { name: "xhdpi", launcher: 96, foreground: 216 },
    Density { name: "xxhdpi", launcher: 144, foreground: 324 },
    Density { name: "xxxhdpi", launcher: 192, foreground: 432 },
];

/// Density bucket for a resource directory name such as `mipmap-xhdpi`.
pub fn for_dir(dir_name: &str) -> Option<Density> {
    let bucket = dir_name.strip_prefix("mipmap-").unwrap_or(dir_name);
    DENSITIES.iter().copied().find(|d| d.name == bucket)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_standard_dirs() {
        assert_eq!(for_dir("mipmap-mdpi").map(|d| d.launcher), Some(48));
        assert_eq!(for_dir("mipmap-xxxhdpi").map(|d| d.foreground), Some(432));
    }

    #[test]
    fn unknown_dirs_have_no_density() {
        assert_eq!(for_dir("mipmap-anydpi-v26"), None);
        assert_eq!(for_dir("drawable"), None);
    }

    #[test]
    fn foreground_is_larger_than_launcher() {
        for d in DENSITIES {
            assert_eq!(d.foreground * 4, d.launcher * 9);
        }
    }
}
