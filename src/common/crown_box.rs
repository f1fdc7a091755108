use serde::{Deserialize, Serialize};

/// Axis-aligned crown box in pixel coordinates.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrownBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl CrownBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Builds a pixel box from a normalized `(ymin, xmin, ymax, xmax)` model box.
    ///
    /// # Arguments
    ///
    /// * `normalized` - Box corners in `[0, 1]`, in object-detection output order.
    /// * `img_width` - Width of the source image in pixels.
    /// * `img_height` - Height of the source image in pixels.
    ///
    /// # Returns
    ///
    /// A `CrownBox` with every corner rounded to the nearest pixel.
    pub fn from_normalized(normalized: [f32; 4], img_width: u32, img_height: u32) -> Self {
        let [ymin, xmin, ymax, xmax] = normalized;
        let (w, h) = (img_width as f32, img_height as f32);
        Self {
            x1: (xmin * w).round() as i32,
            y1: (ymin * h).round() as i32,
            x2: (xmax * w).round() as i32,
            y2: (ymax * h).round() as i32,
        }
    }

    /// Returns the width of the box.
    pub fn width(&self) -> i64 {
        self.x2 as i64 - self.x1 as i64
    }

    /// Returns the height of the box.
    pub fn height(&self) -> i64 {
        self.y2 as i64 - self.y1 as i64
    }

    /// `true` when `x1 < x2` and `y1 < y2`.
    pub fn is_valid(&self) -> bool {
        self.x1 < self.x2 && self.y1 < self.y2
    }

    /// Computes the area of the box, zero for degenerate boxes.
    pub fn area(&self) -> i128 {
        self.width().max(0) as i128 * self.height().max(0) as i128
    }

    /// Computes the intersection area between this box and another.
    pub fn intersect(&self, other: &CrownBox) -> i128 {
        let left = self.x1.max(other.x1) as i64;
        let right = self.x2.min(other.x2) as i64;
        let top = self.y1.max(other.y1) as i64;
        let bottom = self.y2.min(other.y2) as i64;
        (right - left).max(0) as i128 * (bottom - top).max(0) as i128
    }

    /// Computes the union area between this box and another.
    pub fn union(&self, other: &CrownBox) -> i128 {
        self.area() + other.area() - self.intersect(other)
    }

    /// Computes the intersection over union (IoU) between this box and another.
    ///
    /// A zero union (both boxes degenerate) counts as no overlap.
    pub fn iou(&self, other: &CrownBox) -> f64 {
        let union = self.union(other);
        if union <= 0 {
            return 0.0;
        }
        self.intersect(other) as f64 / union as f64
    }

    /// Returns the box coordinates as `(x1, y1, x2, y2)`.
    pub fn xy1_xy2(&self) -> (i32, i32, i32, i32) {
        (self.x1, self.y1, self.x2, self.y2)
    }

    /// Clamps the box to an image of `width` x `height` pixels.
    pub fn clamp_to(&self, width: usize, height: usize) -> CrownBox {
        let (w, h) = (width as i32, height as i32);
        CrownBox {
            x1: self.x1.clamp(0, w),
            y1: self.y1.clamp(0, h),
            x2: self.x2.clamp(0, w),
            y2: self.y2.clamp(0, h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iou_half_shift() {
        let a = CrownBox::new(0, 0, 10, 10);
        let b = CrownBox::new(5, 0, 15, 10);
        assert_eq!(a.intersect(&b), 50);
        assert_eq!(a.union(&b), 150);
        assert!((a.iou(&b) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_iou_disjoint_and_identical() {
        let a = CrownBox::new(0, 0, 10, 10);
        assert_eq!(a.iou(&CrownBox::new(20, 20, 30, 30)), 0.0);
        assert_eq!(a.iou(&a), 1.0);
    }

    #[test]
    fn test_iou_degenerate_is_zero() {
        let flat = CrownBox::new(3, 3, 3, 3);
        assert_eq!(flat.iou(&flat), 0.0);
        assert_eq!(flat.iou(&CrownBox::new(0, 0, 10, 10)), 0.0);
    }

    #[test]
    fn test_full_range_box_does_not_overflow() {
        let wide = CrownBox::new(i32::MIN, 0, i32::MAX, 10);
        let small = CrownBox::new(0, 0, 10, 10);
        assert_eq!(wide.width(), u32::MAX as i64);
        assert_eq!(wide.intersect(&small), 100);
        assert_eq!(wide.area(), u32::MAX as i128 * 10);

        let huge = CrownBox::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(huge.area(), (u32::MAX as i128).pow(2));
        assert_eq!(huge.iou(&huge), 1.0);
        assert!(wide.iou(&small) > 0.0 && wide.iou(&small) < 1e-8);
    }

    #[test]
    fn test_from_normalized() {
        let bbox = CrownBox::from_normalized([0.1, 0.25, 0.5, 0.75], 200, 100);
        assert_eq!(bbox.xy1_xy2(), (50, 10, 150, 50));
    }

    #[test]
    fn test_clamp_to() {
        let bbox = CrownBox::new(-4, 2, 120, 90).clamp_to(100, 80);
        assert_eq!(bbox.xy1_xy2(), (0, 2, 100, 80));
    }
}
