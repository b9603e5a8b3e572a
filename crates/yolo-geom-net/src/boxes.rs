use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Detection as produced by the network for one tile, in coordinates
/// normalized to the network input size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawDetectionBox {
    pub class_label: String,
    pub class_index: u32,
    /// Box reference point, fractions of the network input size.
    pub x: f32,
    pub y: f32,
    /// Box extents, same normalized units.
    pub w: f32,
    pub h: f32,
}

/// Detection in pixel units of the original, untiled frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionBox {
    pub class_label: String,
    pub class_index: u32,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl DetectionBox {
    /// Box reference point as a 2D point.
    #[inline]
    pub fn position(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }
}
