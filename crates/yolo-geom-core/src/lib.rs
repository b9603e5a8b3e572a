//! Pixel-geometry primitives for fixed-input object detectors.
//!
//! This crate is intentionally small and purely computational: RGB image
//! views, letterbox scale-and-pad planning, and frame tiling. It does *not*
//! run inference, touch the filesystem, or depend on any concrete image
//! decoding crate.

mod image;
mod letterbox;
mod logger;
mod tile;

pub use image::{
    crop_rgb, sample_bilinear_rgb, sample_bilinear_rgb_u8, PixelRect, RgbImage, RgbImageView,
};
pub use letterbox::{plan_letterbox, LetterboxPlan, TargetSize, PAD_COLOR};
pub use tile::{tile_rect, tile_size, TilingError};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
