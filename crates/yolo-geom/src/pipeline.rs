//! Tile + letterbox composition: from a full frame to per-tile network
//! inputs.

use crate::core::{
    crop_rgb, plan_letterbox, tile_rect, RgbImage, RgbImageView, TargetSize, TilingError,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the pipeline helpers.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("invalid RGB buffer length (expected {expected} bytes, got {got})")]
    InvalidRgbBuffer { expected: usize, got: usize },

    #[error(transparent)]
    Tiling(#[from] TilingError),
}

/// Checked view over a packed RGB8 buffer.
pub fn rgb_view_from_slice(
    width: usize,
    height: usize,
    pixels: &[u8],
) -> Result<RgbImageView<'_>, PipelineError> {
    let expected = width * height * 3;
    if pixels.len() != expected {
        return Err(PipelineError::InvalidRgbBuffer {
            expected,
            got: pixels.len(),
        });
    }
    Ok(RgbImageView {
        width,
        height,
        data: pixels,
    })
}

/// Letterboxed network input for tile `index` of `frame`.
///
/// Equivalent to `tile_rect` -> `crop_rgb` -> `plan_letterbox` -> `apply`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(frame), fields(width = frame.width, height = frame.height))
)]
pub fn network_input(
    frame: &RgbImageView<'_>,
    tiles: u32,
    index: usize,
    target: TargetSize,
) -> Result<RgbImage, TilingError> {
    let rect = tile_rect(frame.width as u32, frame.height as u32, tiles, index)?;
    let tile = crop_rgb(frame, rect);
    let plan = plan_letterbox(rect.width as u32, rect.height as u32, target);
    Ok(plan.apply(&tile.view()))
}

/// Letterboxed network inputs for every tile of `frame`, in tile-index order.
pub fn network_inputs(
    frame: &RgbImageView<'_>,
    tiles: u32,
    target: TargetSize,
) -> Result<Vec<RgbImage>, TilingError> {
    (0..tiles as usize)
        .map(|index| network_input(frame, tiles, index, target))
        .collect()
}

/// Convenience entry point from a raw RGB8 buffer.
pub fn network_inputs_from_rgb8(
    width: usize,
    height: usize,
    pixels: &[u8],
    tiles: u32,
    target: TargetSize,
) -> Result<Vec<RgbImage>, PipelineError> {
    let frame = rgb_view_from_slice(width, height, pixels)?;
    Ok(network_inputs(&frame, tiles, target)?)
}

/// Borrow an `image::RgbImage` as the lightweight core view type.
#[cfg(feature = "image")]
pub fn rgb_view(img: &::image::RgbImage) -> RgbImageView<'_> {
    RgbImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Convert a core image back into an `image::RgbImage` (e.g. for saving).
#[cfg(feature = "image")]
pub fn to_image(img: &RgbImage) -> Option<::image::RgbImage> {
    ::image::RgbImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_length_is_validated() {
        let pixels = vec![0u8; 11];
        assert!(matches!(
            rgb_view_from_slice(2, 2, &pixels),
            Err(PipelineError::InvalidRgbBuffer {
                expected: 12,
                got: 11
            })
        ));
    }

    #[test]
    fn network_input_has_target_dimensions() {
        let frame = RgbImage::filled(640, 480, [10, 20, 30]);
        let out = network_input(&frame.view(), 1, 0, TargetSize::square(416)).unwrap();
        assert_eq!((out.width, out.height), (416, 416));
    }

    #[test]
    fn tile_errors_propagate() {
        let frame = RgbImage::filled(64, 48, [0, 0, 0]);
        assert!(matches!(
            network_input(&frame.view(), 5, 0, TargetSize::square(416)),
            Err(TilingError::UnsupportedTileCount { tiles: 5 })
        ));
    }
}
