//! Paint brush configuration.

use serde::{Deserialize, Serialize};

/// Paint brush settings, shared process-wide and mutated by the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintBrush {
    /// Brush color, linear RGB.
    pub color: [f32; 3],
    /// Brush size; the stamped dab radius is `size * 2` pixels.
    pub size: u32,
    /// Stroke opacity, 0.0 to 1.0.
    pub opacity: f32,
    /// Edge hardness, 0.0 (soft) to 1.0 (hard).
    /// At 1.0 the dab is a uniformly filled circle.
    pub hardness: f32,
}

impl Default for PaintBrush {
    fn default() -> Self {
        Self {
            color: [1.0, 0.0, 0.0],
            size: 10,
            opacity: 1.0,
            hardness: 1.0,
        }
    }
}

impl PaintBrush {
    /// Dab radius in pixels.
    #[inline]
    pub fn radius_px(&self) -> f32 {
        self.size as f32 * 2.0
    }
}
