//! Sculpt brush configuration.

use serde::{Deserialize, Serialize};

/// Whether the brush builds material up or cuts it away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SculptDirection {
    /// Displace along the hit normal (outward).
    #[default]
    Raise,
    /// Displace against the hit normal (inward).
    Carve,
}

impl SculptDirection {
    /// Sign applied to the displacement.
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            SculptDirection::Raise => 1.0,
            SculptDirection::Carve => -1.0,
        }
    }
}

/// Sculpt brush settings, shared process-wide and mutated by the host UI.
///
/// Engines receive this read-only per call; nothing here is object state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SculptBrush {
    /// Brush radius in object-local units, (0, 1].
    pub radius: f32,
    /// Stroke strength, (0, 1].
    pub intensity: f32,
    /// Raise or carve.
    pub direction: SculptDirection,
}

impl Default for SculptBrush {
    fn default() -> Self {
        Self {
            radius: 0.3,
            intensity: 0.5,
            direction: SculptDirection::Raise,
        }
    }
}
