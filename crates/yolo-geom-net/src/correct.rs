//! Mapping of normalized per-tile detections back onto the full frame.

use log::debug;
use thiserror::Error;
use yolo_geom_core::{tile_size, TargetSize, TilingError};

use crate::boxes::{DetectionBox, RawDetectionBox};

/// Errors from detection correction. Failure aborts the whole frame; no
/// partial results are returned.
#[derive(Error, Debug)]
pub enum CorrectError {
    #[error(transparent)]
    Tiling(#[from] TilingError),
    #[error("got {got} per-tile detection lists for {expected} tiles")]
    TileListMismatch { expected: u32, got: usize },
}

/// Placement of the resized tile content inside the network canvas, in
/// canvas-normalized units.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ContentGeometry {
    x_offset: f32,
    y_offset: f32,
    x_scale: f32,
    y_scale: f32,
}

/// Reconstruct content placement from the tile's logical size using the
/// smaller of the two axis ratios (the axis that ends up fully filled).
fn content_geometry(target: TargetSize, tile_w: f32, tile_h: f32) -> ContentGeometry {
    let target_w = target.width as f32;
    let target_h = target.height as f32;

    let (new_w, new_h) = if target_w / tile_w < target_h / tile_h {
        (target_w, tile_h * target_w / tile_w)
    } else {
        (tile_w * target_h / tile_h, target_h)
    };

    ContentGeometry {
        x_offset: (target_w - new_w) / (2.0 * target_w),
        y_offset: (target_h - new_h) / (2.0 * target_h),
        x_scale: new_w / target_w,
        y_scale: new_h / target_h,
    }
}

/// Convert normalized per-tile detections into pixel boxes on the original
/// frame.
///
/// `raw` holds one list per tile, in tile-index order; output preserves tile
/// order and within-tile order. Boxes from the second tile are shifted right
/// by the nominal tile width. No suppression or deduplication happens here.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(raw), fields(tiles = tiles))
)]
pub fn correct_detections(
    frame_width: u32,
    frame_height: u32,
    tiles: u32,
    target: TargetSize,
    raw: &[Vec<RawDetectionBox>],
) -> Result<Vec<DetectionBox>, CorrectError> {
    let (tile_w, tile_h) = tile_size(frame_width, frame_height, tiles)?;
    if raw.len() != tiles as usize {
        return Err(CorrectError::TileListMismatch {
            expected: tiles,
            got: raw.len(),
        });
    }

    let tile_w = tile_w as f32;
    let tile_h = tile_h as f32;
    let geom = content_geometry(target, tile_w, tile_h);

    let mut corrected = Vec::with_capacity(raw.iter().map(Vec::len).sum());
    for (tile_index, dets) in raw.iter().enumerate() {
        let x_shift = if tile_index == 1 { tile_w } else { 0.0 };
        for det in dets {
            corrected.push(DetectionBox {
                class_label: det.class_label.clone(),
                class_index: det.class_index,
                x: (det.x - geom.x_offset) / geom.x_scale * tile_w + x_shift,
                y: (det.y - geom.y_offset) / geom.y_scale * tile_h,
                w: det.w / geom.x_scale * tile_w,
                h: det.h / geom.y_scale * tile_h,
            });
        }
    }

    debug!("corrected {} detections across {} tiles", corrected.len(), tiles);
    Ok(corrected)
}
