//! Model configuration: JSON schema and the validated geometry value.

use std::{fs, path::Path};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::anchors::Anchor;

/// Errors from loading or validating a model configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("anchor list has odd length {count}; anchors are flat (w, h) pairs")]
    OddAnchorList { count: usize },
    #[error("downsample list is empty; at least one output layer is required")]
    NoOutputLayers,
    #[error("{anchors} anchors cannot be split evenly over {outputs} output layers")]
    UnevenAnchorSplit { anchors: usize, outputs: usize },
    #[error("tile count must be positive")]
    ZeroTiles,
}

/// On-disk configuration document, `{"model": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDoc {
    pub model: ModelSection,
}

/// The `model` section of the configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSection {
    /// One entry per detection output layer; only the count matters here.
    pub downsample: Vec<u32>,
    /// Flat anchor sizes in file order, `[w1, h1, w2, h2, ...]`.
    pub anchors: Vec<u32>,
    /// Number of frame tiles fed to the network per frame.
    pub tiles: u32,
}

/// Validated anchor/tile geometry, immutable after construction.
///
/// One `ModelGeometry` is built at startup and shared read-only across all
/// frames; every accessor is cheap and the value is `Send + Sync`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelGeometry {
    anchors: Vec<Anchor>,
    output_count: usize,
    tiles: u32,
}

fn anchor_pairs(flat: &[u32]) -> Result<Vec<Anchor>, ConfigError> {
    if flat.len() % 2 != 0 {
        return Err(ConfigError::OddAnchorList { count: flat.len() });
    }
    Ok(flat
        .chunks_exact(2)
        .map(|pair| Anchor {
            width: pair[0],
            height: pair[1],
        })
        .collect())
}

impl ModelGeometry {
    /// Build a geometry from already-paired anchors.
    pub fn new(anchors: Vec<Anchor>, output_count: usize, tiles: u32) -> Result<Self, ConfigError> {
        if output_count == 0 {
            return Err(ConfigError::NoOutputLayers);
        }
        if anchors.len() % output_count != 0 {
            return Err(ConfigError::UnevenAnchorSplit {
                anchors: anchors.len(),
                outputs: output_count,
            });
        }
        if tiles == 0 {
            return Err(ConfigError::ZeroTiles);
        }

        Ok(Self {
            anchors,
            output_count,
            tiles,
        })
    }

    /// Build a geometry from a parsed `model` section.
    pub fn from_section(section: &ModelSection) -> Result<Self, ConfigError> {
        let anchors = anchor_pairs(&section.anchors)?;
        let geometry = Self::new(anchors, section.downsample.len(), section.tiles)?;
        debug!(
            "model geometry: {} anchors over {} output layers, {} tile(s)",
            geometry.anchors.len(),
            geometry.output_count,
            geometry.tiles
        );
        Ok(geometry)
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let doc: ModelDoc = serde_json::from_str(raw)?;
        Self::from_section(&doc.model)
    }

    /// Load and validate a JSON configuration file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// All anchors, in file order.
    #[inline]
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Number of detection output layers.
    #[inline]
    pub fn output_count(&self) -> usize {
        self.output_count
    }

    /// Number of tiles each frame is split into.
    #[inline]
    pub fn tiles(&self) -> u32 {
        self.tiles
    }

    /// Anchors assigned to each output layer.
    #[inline]
    pub fn anchors_per_layer(&self) -> usize {
        self.anchors.len() / self.output_count
    }
}
