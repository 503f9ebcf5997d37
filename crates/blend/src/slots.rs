//! Preset slots on the blend control.

use serde::{Deserialize, Serialize};
use toile_mesh::ShapeKind;

use crate::weights::BlendWeights;

/// A library preset assigned to a blend slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetDescriptor {
    pub id: String,
    pub name: String,
    pub kind: ShapeKind,
}

/// The three named slots of the blend control.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlendSlots {
    pub top: Option<PresetDescriptor>,
    pub left: Option<PresetDescriptor>,
    pub right: Option<PresetDescriptor>,
}

impl BlendSlots {
    /// Pick the preset for a generation action: the highest-weighted
    /// non-empty slot, ties broken by slot priority top > left > right.
    /// Returns None when every slot is empty.
    pub fn select(&self, weights: &BlendWeights) -> Option<&PresetDescriptor> {
        let candidates = [
            (weights.top, self.top.as_ref()),
            (weights.left, self.left.as_ref()),
            (weights.right, self.right.as_ref()),
        ];

        let mut best: Option<(u32, &PresetDescriptor)> = None;
        for (weight, preset) in candidates {
            let Some(preset) = preset else { continue };
            // Strict comparison keeps the earlier (higher-priority) slot on ties.
            if best.is_none_or(|(best_weight, _)| weight > best_weight) {
                best = Some((weight, preset));
            }
        }
        best.map(|(_, preset)| preset)
    }
}
