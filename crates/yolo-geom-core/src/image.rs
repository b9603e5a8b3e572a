#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // packed RGB, row-major, len = w*h*3
}

#[derive(Clone, Debug)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbImage {
    /// Allocate an image of the given size with every pixel set to `fill`.
    pub fn filled(width: usize, height: usize, fill: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&fill);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Borrow this image as a view.
    pub fn view(&self) -> RgbImageView<'_> {
        RgbImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn put(&mut self, x: usize, y: usize, px: [u8; 3]) {
        let at = (y * self.width + x) * 3;
        self.data[at..at + 3].copy_from_slice(&px);
    }
}

/// Rectangular sub-region of an image, in pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

#[inline]
fn get_rgb(src: &RgbImageView<'_>, x: i64, y: i64) -> [u8; 3] {
    // clamp-to-edge
    let x = x.clamp(0, src.width as i64 - 1) as usize;
    let y = y.clamp(0, src.height as i64 - 1) as usize;
    let at = (y * src.width + x) * 3;
    [src.data[at], src.data[at + 1], src.data[at + 2]]
}

#[inline]
pub fn sample_bilinear_rgb(src: &RgbImageView<'_>, x: f32, y: f32) -> [f32; 3] {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = get_rgb(src, x0, y0);
    let p10 = get_rgb(src, x0 + 1, y0);
    let p01 = get_rgb(src, x0, y0 + 1);
    let p11 = get_rgb(src, x0 + 1, y0 + 1);

    let mut out = [0.0f32; 3];
    for c in 0..3 {
        let a = p00[c] as f32 + fx * (p10[c] as f32 - p00[c] as f32);
        let b = p01[c] as f32 + fx * (p11[c] as f32 - p01[c] as f32);
        out[c] = a + fy * (b - a);
    }
    out
}

#[inline]
pub fn sample_bilinear_rgb_u8(src: &RgbImageView<'_>, x: f32, y: f32) -> [u8; 3] {
    let v = sample_bilinear_rgb(src, x, y);
    [
        v[0].clamp(0.0, 255.0) as u8,
        v[1].clamp(0.0, 255.0) as u8,
        v[2].clamp(0.0, 255.0) as u8,
    ]
}

/// Copy a rectangular region out of `src`.
///
/// The rectangle must lie inside the source image.
pub fn crop_rgb(src: &RgbImageView<'_>, rect: PixelRect) -> RgbImage {
    debug_assert!(rect.x + rect.width <= src.width);
    debug_assert!(rect.y + rect.height <= src.height);

    let mut data = Vec::with_capacity(rect.width * rect.height * 3);
    for row in rect.y..rect.y + rect.height {
        let start = (row * src.width + rect.x) * 3;
        data.extend_from_slice(&src.data[start..start + rect.width * 3]);
    }

    RgbImage {
        width: rect.width,
        height: rect.height,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> RgbImage {
        let mut img = RgbImage::filled(width, height, [0, 0, 0]);
        for y in 0..height {
            for x in 0..width {
                img.put(x, y, [x as u8, y as u8, 7]);
            }
        }
        img
    }

    #[test]
    fn crop_copies_the_requested_rows() {
        let img = gradient(8, 6);
        let rect = PixelRect {
            x: 2,
            y: 1,
            width: 4,
            height: 3,
        };
        let out = crop_rgb(&img.view(), rect);

        assert_eq!(out.width, 4);
        assert_eq!(out.height, 3);
        // top-left of the crop is source pixel (2, 1)
        assert_eq!(&out.data[..3], &[2, 1, 7]);
        // bottom-right is source pixel (5, 3)
        let last = out.data.len() - 3;
        assert_eq!(&out.data[last..], &[5, 3, 7]);
    }

    #[test]
    fn bilinear_midpoint_averages_neighbors() {
        let mut img = RgbImage::filled(2, 1, [0, 0, 0]);
        img.put(0, 0, [10, 20, 30]);
        img.put(1, 0, [30, 40, 50]);

        let v = sample_bilinear_rgb(&img.view(), 0.5, 0.0);
        assert_eq!(v, [20.0, 30.0, 40.0]);
    }

    #[test]
    fn sampling_clamps_at_the_border() {
        let img = RgbImage::filled(2, 2, [9, 9, 9]);
        assert_eq!(sample_bilinear_rgb_u8(&img.view(), -5.0, 10.0), [9, 9, 9]);
    }
}
