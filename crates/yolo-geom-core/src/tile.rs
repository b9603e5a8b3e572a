//! Partition of a full frame into independently processed tiles.
//!
//! Supported layouts: a single tile covering the whole frame, or two tiles
//! splitting the frame into left and right halves at full height.

use crate::image::PixelRect;

/// Errors from tile geometry lookups.
#[derive(thiserror::Error, Debug)]
pub enum TilingError {
    #[error("unsupported tile count {tiles} (expected 1 or 2)")]
    UnsupportedTileCount { tiles: u32 },
    #[error("tile index {index} out of range for {tiles} tiles")]
    TileIndexOutOfRange { index: usize, tiles: u32 },
}

/// Pixel rectangle of tile `index` within a `frame_width` x `frame_height`
/// frame.
///
/// With two tiles the split column is `frame_width / 2` (truncating), so on
/// odd widths the right tile is one pixel wider.
pub fn tile_rect(
    frame_width: u32,
    frame_height: u32,
    tiles: u32,
    index: usize,
) -> Result<PixelRect, TilingError> {
    if !matches!(tiles, 1 | 2) {
        return Err(TilingError::UnsupportedTileCount { tiles });
    }
    if index >= tiles as usize {
        return Err(TilingError::TileIndexOutOfRange { index, tiles });
    }

    let rect = match (tiles, index) {
        (1, 0) => PixelRect {
            x: 0,
            y: 0,
            width: frame_width as usize,
            height: frame_height as usize,
        },
        (2, 0) => PixelRect {
            x: 0,
            y: 0,
            width: (frame_width / 2) as usize,
            height: frame_height as usize,
        },
        (2, 1) => PixelRect {
            x: (frame_width / 2) as usize,
            y: 0,
            width: (frame_width - frame_width / 2) as usize,
            height: frame_height as usize,
        },
        _ => unreachable!("tile count and index validated above"),
    };

    Ok(rect)
}

/// Logical per-tile size used when reconstructing detection geometry.
///
/// This is the *nominal* size: under two tiles both tiles count as
/// `frame_width / 2` wide, even though the right tile of an odd-width frame
/// is one pixel wider.
pub fn tile_size(
    frame_width: u32,
    frame_height: u32,
    tiles: u32,
) -> Result<(u32, u32), TilingError> {
    match tiles {
        1 => Ok((frame_width, frame_height)),
        2 => Ok((frame_width / 2, frame_height)),
        _ => Err(TilingError::UnsupportedTileCount { tiles }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_tile_covers_the_frame() {
        let rect = tile_rect(640, 480, 1, 0).unwrap();
        assert_eq!(
            rect,
            PixelRect {
                x: 0,
                y: 0,
                width: 640,
                height: 480
            }
        );
    }

    #[test]
    fn two_tiles_split_columns_with_remainder_right() {
        let left = tile_rect(641, 480, 2, 0).unwrap();
        let right = tile_rect(641, 480, 2, 1).unwrap();

        assert_eq!((left.x, left.width), (0, 320));
        assert_eq!((right.x, right.width), (320, 321));
        assert_eq!(left.height, 480);
        assert_eq!(right.height, 480);
        assert_eq!(left.width + right.width, 641);
    }

    #[test]
    fn nominal_tile_size_halves_the_width() {
        assert_eq!(tile_size(641, 480, 2).unwrap(), (320, 480));
        assert_eq!(tile_size(640, 480, 1).unwrap(), (640, 480));
    }

    #[test]
    fn unsupported_tile_counts_are_rejected() {
        assert!(matches!(
            tile_rect(640, 480, 3, 0),
            Err(TilingError::UnsupportedTileCount { tiles: 3 })
        ));
        assert!(matches!(
            tile_size(640, 480, 0),
            Err(TilingError::UnsupportedTileCount { tiles: 0 })
        ));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert!(matches!(
            tile_rect(640, 480, 2, 2),
            Err(TilingError::TileIndexOutOfRange { index: 2, tiles: 2 })
        ));
        assert!(matches!(
            tile_rect(640, 480, 1, 1),
            Err(TilingError::TileIndexOutOfRange { index: 1, tiles: 1 })
        ));
    }
}
