//! Per-layer anchor assignment.

use serde::{Deserialize, Serialize};

use crate::config::ModelGeometry;

/// Reference box shape used by one detection output layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Anchor {
    pub width: u32,
    pub height: u32,
}

/// Errors from anchor selection.
#[derive(thiserror::Error, Debug)]
pub enum AnchorSelectError {
    #[error("layer index {layer} out of range for {outputs} output layers")]
    LayerOutOfRange { layer: usize, outputs: usize },
}

/// Contiguous anchor slice assigned to output layer `layer`.
///
/// Layer order is the reverse of file order: layer 0 (the finest output)
/// takes the *last* `anchors_per_layer` entries of the configured list and
/// the coarsest layer takes the first.
pub fn select_anchors(
    cfg: &ModelGeometry,
    layer: usize,
) -> Result<&[Anchor], AnchorSelectError> {
    let outputs = cfg.output_count();
    if layer >= outputs {
        return Err(AnchorSelectError::LayerOutOfRange { layer, outputs });
    }

    let per_layer = cfg.anchors_per_layer();
    let start = per_layer * (outputs - layer - 1);
    Ok(&cfg.anchors()[start..start + per_layer])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_geometry() -> ModelGeometry {
        let anchors = [
            (10, 14),
            (23, 27),
            (37, 58),
            (81, 82),
            (135, 169),
            (344, 319),
        ]
        .into_iter()
        .map(|(width, height)| Anchor { width, height })
        .collect();
        ModelGeometry::new(anchors, 3, 1).unwrap()
    }

    #[test]
    fn finest_layer_takes_the_last_slice() {
        let cfg = sample_geometry();
        let layer0 = select_anchors(&cfg, 0).unwrap();
        assert_eq!(
            layer0,
            [
                Anchor {
                    width: 135,
                    height: 169
                },
                Anchor {
                    width: 344,
                    height: 319
                }
            ]
        );

        let last = select_anchors(&cfg, 2).unwrap();
        assert_eq!(
            last,
            [
                Anchor {
                    width: 10,
                    height: 14
                },
                Anchor {
                    width: 23,
                    height: 27
                }
            ]
        );
    }

    #[test]
    fn slices_partition_the_list_in_reverse_layer_order() {
        let cfg = sample_geometry();

        let mut rebuilt = Vec::new();
        for layer in (0..cfg.output_count()).rev() {
            rebuilt.extend_from_slice(select_anchors(&cfg, layer).unwrap());
        }

        assert_eq!(rebuilt.as_slice(), cfg.anchors());
    }

    #[test]
    fn out_of_range_layer_is_rejected() {
        let cfg = sample_geometry();
        assert!(matches!(
            select_anchors(&cfg, 3),
            Err(AnchorSelectError::LayerOutOfRange {
                layer: 3,
                outputs: 3
            })
        ));
    }
}
