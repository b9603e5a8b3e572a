//! High-level facade for the `yolo-geom-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the underlying geometry crates
//! - pipeline helpers composing tiling and letterboxing into ready-to-infer
//!   network inputs, plus (feature `image`) adapters for the `image` crate.
//!
//! The workspace covers the coordinate layer of a tiled YOLO pipeline:
//! splitting a frame into tiles, letterboxing each tile onto the fixed
//! network canvas, slicing configured anchors per output layer, and mapping
//! normalized detections back onto the original frame. Inference, NMS, and
//! rendering live elsewhere.
//!
//! ## Quickstart
//!
//! ```
//! use yolo_geom::core::{RgbImage, TargetSize};
//! use yolo_geom::net::RawDetectionBox;
//! use yolo_geom::{correct_detections, pipeline};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let frame = RgbImage::filled(640, 480, [32, 64, 96]);
//! let target = TargetSize::square(416);
//!
//! // one letterboxed input per tile, ready for the inference engine
//! let inputs = pipeline::network_inputs(&frame.view(), 1, target)?;
//! assert_eq!((inputs[0].width, inputs[0].height), (416, 416));
//!
//! // ... inference happens here ...
//! let raw = vec![vec![RawDetectionBox {
//!     class_label: "person".into(),
//!     class_index: 0,
//!     x: 0.5, y: 0.5, w: 0.2, h: 0.2,
//! }]];
//! let boxes = correct_detections(640, 480, 1, target, &raw)?;
//! assert!((boxes[0].x - 320.0).abs() < 1e-3);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `yolo_geom::core`: image views, letterbox plans, tile geometry.
//! - `yolo_geom::net`: model configuration, anchors, detection correction.
//! - `yolo_geom::pipeline`: tile + letterbox composition and `image` adapters.

pub use yolo_geom_core as core;
pub use yolo_geom_net as net;

pub use yolo_geom_core::{plan_letterbox, LetterboxPlan, TargetSize, TilingError};
pub use yolo_geom_net::{
    correct_detections, select_anchors, Anchor, DetectionBox, ModelGeometry, RawDetectionBox,
};

pub mod pipeline;
