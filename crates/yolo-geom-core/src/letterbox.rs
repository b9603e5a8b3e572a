//! Scale-and-pad mapping from an arbitrary source region onto a fixed
//! network-input canvas.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::image::{sample_bilinear_rgb_u8, RgbImage, RgbImageView};

/// Neutral gray used to fill letterbox borders.
pub const PAD_COLOR: [u8; 3] = [127, 127, 127];

/// Fixed input size expected by the network, in pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square input, the common case for YOLO-family networks.
    pub fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

/// Resolved mapping of one source region onto one target canvas.
///
/// `resized_width`/`resized_height` are the content dimensions actually placed
/// on the canvas; together with the four pads they tile the canvas exactly:
/// `left + resized_width + right == target.width` and
/// `top + resized_height + bottom == target.height` on the padded axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LetterboxPlan {
    pub scale: f64,
    pub resized_width: u32,
    pub resized_height: u32,
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
    pub target: TargetSize,
}

/// Compute the letterbox mapping for a source region of the given size.
///
/// The scale axis is chosen by comparing absolute pixel gaps:
/// `|source_width - target_width|` against `|source_height - target_height|`,
/// taking the width scale when the width gap is strictly larger and the height
/// scale otherwise. Note this is not the usual min-ratio aspect fit; for some
/// shapes the non-driving axis overshoots the canvas, in which case the
/// content is clipped at the canvas edge so the output stays exactly `target`.
///
/// The pad axis is chosen from the *source* aspect: regions wider than tall
/// are padded vertically, everything else horizontally. Centering floors the
/// leading pad and the trailing pad absorbs the remainder.
pub fn plan_letterbox(source_width: u32, source_height: u32, target: TargetSize) -> LetterboxPlan {
    debug_assert!(source_width > 0 && source_height > 0);

    let width_gap = (source_width as i64 - target.width as i64).abs();
    let height_gap = (source_height as i64 - target.height as i64).abs();

    let scale = if width_gap > height_gap {
        target.width as f64 / source_width as f64
    } else {
        target.height as f64 / source_height as f64
    };

    let resized_width = ((source_width as f64 * scale).round() as u32).min(target.width);
    let resized_height = ((source_height as f64 * scale).round() as u32).min(target.height);

    let (top, bottom, left, right) = if source_width > source_height {
        let top = (target.height - resized_height) / 2;
        let bottom = target.height - resized_height - top;
        (top, bottom, 0, 0)
    } else {
        let left = (target.width - resized_width) / 2;
        let right = target.width - resized_width - left;
        (0, 0, left, right)
    };

    LetterboxPlan {
        scale,
        resized_width,
        resized_height,
        top,
        bottom,
        left,
        right,
        target,
    }
}

impl LetterboxPlan {
    /// Resample `src` onto a `target`-sized canvas according to this plan.
    ///
    /// Content is sampled bilinearly at destination pixel centers; everything
    /// outside the content rectangle is `PAD_COLOR`.
    pub fn apply(&self, src: &RgbImageView<'_>) -> RgbImage {
        let mut out = RgbImage::filled(
            self.target.width as usize,
            self.target.height as usize,
            PAD_COLOR,
        );

        let inv = 1.0 / self.scale;
        for y in 0..self.resized_height as usize {
            let sy = ((y as f64 + 0.5) * inv - 0.5) as f32;
            for x in 0..self.resized_width as usize {
                let sx = ((x as f64 + 0.5) * inv - 0.5) as f32;
                let px = sample_bilinear_rgb_u8(src, sx, sy);
                out.put(x + self.left as usize, y + self.top as usize, px);
            }
        }

        out
    }

    /// Map a point from source-region pixels to target-canvas pixels.
    #[inline]
    pub fn map_point(&self, p: Point2<f32>) -> Point2<f32> {
        Point2::new(
            p.x * self.scale as f32 + self.left as f32,
            p.y * self.scale as f32 + self.top as f32,
        )
    }

    /// Map a point from target-canvas pixels back to source-region pixels.
    #[inline]
    pub fn unmap_point(&self, p: Point2<f32>) -> Point2<f32> {
        let inv = 1.0 / self.scale as f32;
        Point2::new((p.x - self.left as f32) * inv, (p.y - self.top as f32) * inv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scale_follows_the_larger_pixel_gap() {
        // width gap 224 > height gap 64 -> width drives the scale
        let plan = plan_letterbox(640, 480, TargetSize::square(416));
        assert_relative_eq!(plan.scale, 416.0 / 640.0);
        assert_eq!(plan.resized_width, 416);
        assert_eq!(plan.resized_height, 312);

        // transposed source: height gap wins, same scale value
        let plan = plan_letterbox(480, 640, TargetSize::square(416));
        assert_relative_eq!(plan.scale, 416.0 / 640.0);
        assert_eq!(plan.resized_width, 312);
        assert_eq!(plan.resized_height, 416);
    }

    #[test]
    fn equal_gaps_take_the_height_scale() {
        let plan = plan_letterbox(200, 200, TargetSize::square(416));
        assert_relative_eq!(plan.scale, 416.0 / 200.0);
    }

    #[test]
    fn landscape_pads_vertically_and_centers() {
        let plan = plan_letterbox(640, 480, TargetSize::square(416));
        assert_eq!((plan.left, plan.right), (0, 0));
        assert_eq!((plan.top, plan.bottom), (52, 52));
    }

    #[test]
    fn portrait_pads_horizontally_and_centers() {
        let plan = plan_letterbox(480, 640, TargetSize::square(416));
        assert_eq!((plan.top, plan.bottom), (0, 0));
        assert_eq!((plan.left, plan.right), (52, 52));
    }

    #[test]
    fn odd_remainder_goes_to_the_trailing_pad() {
        // 640x358 -> scale 0.65 -> resized height 233, deficit 183
        let plan = plan_letterbox(640, 358, TargetSize::square(416));
        assert_eq!(plan.resized_height, 233);
        assert_eq!(plan.top, 91);
        assert_eq!(plan.bottom, 92);
        assert_eq!(plan.top + plan.bottom + plan.resized_height, 416);
    }

    #[test]
    fn pad_sums_close_exactly() {
        let target = TargetSize::square(416);
        for (w, h) in [
            (640u32, 480u32),
            (480, 640),
            (1920, 1080),
            (101, 53),
            (53, 101),
            (417, 415),
            (1, 1),
        ] {
            let plan = plan_letterbox(w, h, target);
            assert_eq!(
                plan.left + plan.right + plan.resized_width,
                target.width,
                "width sum for {w}x{h}"
            );
            assert_eq!(
                plan.top + plan.bottom + plan.resized_height,
                target.height,
                "height sum for {w}x{h}"
            );
        }
    }

    #[test]
    fn apply_returns_the_exact_target_size() {
        let target = TargetSize::new(608, 416);
        for (w, h) in [(640u32, 480u32), (480, 640), (500, 400), (1000, 990)] {
            let src = RgbImage::filled(w as usize, h as usize, [50, 100, 150]);
            let plan = plan_letterbox(w, h, target);
            let out = plan.apply(&src.view());
            assert_eq!(out.width, 608, "width for {w}x{h}");
            assert_eq!(out.height, 416, "height for {w}x{h}");
        }
    }

    #[test]
    fn apply_fills_borders_with_gray_and_content_with_source() {
        let src = RgbImage::filled(640, 480, [200, 10, 10]);
        let plan = plan_letterbox(640, 480, TargetSize::square(416));
        let out = plan.apply(&src.view());

        let px = |x: usize, y: usize| {
            let at = (y * out.width + x) * 3;
            [out.data[at], out.data[at + 1], out.data[at + 2]]
        };

        assert_eq!(px(208, 0), PAD_COLOR); // top band
        assert_eq!(px(208, 415), PAD_COLOR); // bottom band
        assert_eq!(px(208, 208), [200, 10, 10]); // content center
        assert_eq!(px(0, 52), [200, 10, 10]); // first content row
        assert_eq!(px(0, 51), PAD_COLOR); // last pad row above it
    }

    #[test]
    fn point_maps_round_trip() {
        let plan = plan_letterbox(640, 480, TargetSize::square(416));
        let p = Point2::new(123.0f32, 321.0);
        let q = plan.map_point(p);
        let back = plan.unmap_point(q);
        assert_relative_eq!(back.x, p.x, epsilon = 1e-3);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-3);

        // the frame center lands at the canvas center
        let c = plan.map_point(Point2::new(320.0, 240.0));
        assert_relative_eq!(c.x, 208.0, epsilon = 1e-3);
        assert_relative_eq!(c.y, 208.0, epsilon = 1e-3);
    }
}
