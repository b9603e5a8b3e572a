//! Network-side geometry for tiled YOLO pipelines: validated model
//! configuration, per-layer anchor assignment, and correction of normalized
//! detections back into full-frame pixel coordinates.
//!
//! Inference itself, non-maximum suppression, and rendering are out of scope;
//! this crate only answers *where* boxes live, never *what* they contain.

mod anchors;
mod boxes;
mod config;
mod correct;

pub use anchors::{select_anchors, Anchor, AnchorSelectError};
pub use boxes::{DetectionBox, RawDetectionBox};
pub use config::{ConfigError, ModelDoc, ModelGeometry, ModelSection};
pub use correct::{correct_detections, CorrectError};
