use serde::{Deserialize, Serialize};

/// Pixel-space face box as reported by a detector: `(top, right, bottom, left)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBox {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl PixelBox {
    pub fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Clips the box to a `width × height` image.
    pub fn clamped(&self, width: u32, height: u32) -> Self {
        let left = self.left.min(width);
        let top = self.top.min(height);
        Self {
            top,
            right: self.right.clamp(left, width),
            bottom: self.bottom.clamp(top, height),
            left,
        }
    }
}

/// Face bounding box in both pixel and image-relative coordinates.
///
/// `x`/`y` are the left/top pixel edges. The `norm_*` fields are divided by
/// the image width (x-axis) or height (y-axis) and lie in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub norm_x: f64,
    pub norm_y: f64,
    pub norm_width: f64,
    pub norm_height: f64,
}

impl FaceBox {
    pub fn from_pixel_box(pixel_box: &PixelBox, image_width: u32, image_height: u32) -> Self {
        let b = pixel_box.clamped(image_width, image_height);
        let iw = image_width.max(1) as f64;
        let ih = image_height.max(1) as f64;
        Self {
            x: b.left,
            y: b.top,
            width: b.width(),
            height: b.height(),
            norm_x: b.left as f64 / iw,
            norm_y: b.top as f64 / ih,
            norm_width: b.width() as f64 / iw,
            norm_height: b.height() as f64 / ih,
        }
    }

    /// Pixel-space area used for primary-face selection.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Maps the normalized box onto an image of the given size.
    ///
    /// Returns `(x1, y1, x2, y2)` corner pixels.
    pub fn to_pixel_corners(&self, image_width: u32, image_height: u32) -> (i64, i64, i64, i64) {
        let w = image_width as f64;
        let h = image_height as f64;
        (
            (self.norm_x * w).round() as i64,
            (self.norm_y * h).round() as i64,
            ((self.norm_x + self.norm_width) * w).round() as i64,
            ((self.norm_y + self.norm_height) * h).round() as i64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_pixel_box_dimensions() {
        let b = PixelBox::new(10, 60, 90, 20);
        assert_eq!(b.width(), 40);
        assert_eq!(b.height(), 80);
        assert_eq!(b.area(), 3200);
    }

    #[test]
    fn test_inverted_box_has_zero_size() {
        let b = PixelBox::new(50, 10, 40, 20);
        assert_eq!(b.width(), 0);
        assert_eq!(b.height(), 0);
    }

    #[test]
    fn test_normalization_formulas() {
        // top=20, right=150, bottom=120, left=50 on a 200x400 image
        let fb = FaceBox::from_pixel_box(&PixelBox::new(20, 150, 120, 50), 200, 400);
        assert_eq!((fb.x, fb.y, fb.width, fb.height), (50, 20, 100, 100));
        assert_relative_eq!(fb.norm_x, 0.25);
        assert_relative_eq!(fb.norm_y, 0.05);
        assert_relative_eq!(fb.norm_width, 0.5);
        assert_relative_eq!(fb.norm_height, 0.25);
    }

    #[rstest]
    #[case::inside(PixelBox::new(0, 100, 100, 0), 100, 100)]
    #[case::overflow_right(PixelBox::new(10, 140, 50, 80), 100, 100)]
    #[case::overflow_bottom(PixelBox::new(90, 30, 300, 10), 64, 120)]
    #[case::odd_dims(PixelBox::new(1, 2, 3, 1), 3, 7)]
    fn test_normalized_box_within_unit_square(
        #[case] b: PixelBox,
        #[case] w: u32,
        #[case] h: u32,
    ) {
        let fb = FaceBox::from_pixel_box(&b, w, h);
        for v in [fb.norm_x, fb.norm_y, fb.norm_width, fb.norm_height] {
            assert!((0.0..=1.0).contains(&v), "{v} out of range");
        }
        assert!(fb.norm_x + fb.norm_width <= 1.0 + 1e-9);
        assert!(fb.norm_y + fb.norm_height <= 1.0 + 1e-9);
    }

    #[test]
    fn test_zero_sized_image_does_not_divide_by_zero() {
        let fb = FaceBox::from_pixel_box(&PixelBox::new(0, 0, 0, 0), 0, 0);
        assert_relative_eq!(fb.norm_width, 0.0);
        assert!(fb.norm_x.is_finite());
    }

    #[test]
    fn test_pixel_corners_scale_to_other_image() {
        let fb = FaceBox::from_pixel_box(&PixelBox::new(20, 150, 120, 50), 200, 400);
        // Same normalized box on an image twice as large.
        assert_eq!(fb.to_pixel_corners(400, 800), (100, 40, 300, 240));
    }
}
