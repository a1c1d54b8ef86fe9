//! Rounded-rectangle mask for the round launcher icon.

use image::{Rgba, RgbaImage};

/// Whether pixel `(x, y)` lies inside the rounded rectangle covering a
/// `width` x `height` image with corner radius `min(width, height) / 2`.
///
/// Pixels are sampled at their centres. Square images get a full circle.
pub fn rounded_mask_contains(width: u32, height: u32, x: u32, y: u32) -> bool {
    if x >= width || y >= height {
        return false;
    }
    let radius = f64::from(width.min(height) / 2);
    let (w, h) = (f64::from(width), f64::from(height));
    let (px, py) = (f64::from(x) + 0.5, f64::from(y) + 0.5);

    // Nearest point of the inner rectangle the corner arcs are centred on
    let cx = px.clamp(radius, w - radius);
    let cy = py.clamp(radius, h - radius);
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= radius * radius
}

/// Copy `img` through the rounded mask; everything outside becomes transparent.
pub fn make_rounded(img: &RgbaImage) -> RgbaImage {
    let (width, height) = img.dimensions();
    RgbaImage::from_fn(width, height, |x, y| {
        if rounded_mask_contains(width, height, x, y) {
            *img.get_pixel(x, y)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([10, 200, 30, 255]))
    }

    #[test]
    fn square_mask_is_a_circle() {
        assert!(rounded_mask_contains(512, 512, 256, 256));
        assert!(rounded_mask_contains(512, 512, 0, 256));
        assert!(rounded_mask_contains(512, 512, 256, 511));
        assert!(!rounded_mask_contains(512, 512, 0, 0));
        assert!(!rounded_mask_contains(512, 512, 511, 511));
        assert!(!rounded_mask_contains(512, 512, 40, 40));
    }

    #[test]
    fn wide_mask_is_a_stadium() {
        // radius 50: straight top and bottom edges between the arcs
        assert!(rounded_mask_contains(200, 100, 100, 0));
        assert!(rounded_mask_contains(200, 100, 60, 99));
        assert!(!rounded_mask_contains(200, 100, 0, 0));
        assert!(!rounded_mask_contains(200, 100, 199, 99));
    }

    #[test]
    fn out_of_bounds_is_outside() {
        assert!(!rounded_mask_contains(10, 10, 10, 5));
    }

    #[test]
    fn rounded_keeps_dimensions() {
        let rounded = make_rounded(&opaque(300, 120));
        assert_eq!(rounded.dimensions(), (300, 120));
    }

    #[test]
    fn outside_pixels_are_transparent_inside_pixels_kept() {
        let img = opaque(64, 48);
        let rounded = make_rounded(&img);
        for (x, y, pixel) in rounded.enumerate_pixels() {
            if rounded_mask_contains(64, 48, x, y) {
                assert_eq!(pixel, img.get_pixel(x, y));
            } else {
                assert_eq!(pixel[3], 0, "pixel ({}, {}) should be transparent", x, y);
            }
        }
    }

    #[test]
    fn tiny_images_survive() {
        assert_eq!(make_rounded(&opaque(1, 1)).get_pixel(0, 0)[3], 255);
        assert_eq!(make_rounded(&opaque(0, 0)).dimensions(), (0, 0));
    }
}
