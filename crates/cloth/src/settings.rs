//! Solver tunables and the scene collider.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Cloth solver tuning.
///
/// These constants are tuned for a specific visual target, not derived from
/// a physical unit system. Values are configurable and should not be treated
/// as magic numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClothSettings {
    /// Per-tick velocity retention; an ad hoc air-resistance factor so the
    /// cloth does not swing forever.
    pub damping: f32,
    /// Relaxation passes per tick. More passes make the cloth stiffer.
    pub constraint_iterations: u32,
    /// Downward acceleration magnitude.
    pub gravity: f32,
    /// Multiplier on gravity so light fabric reads correctly at this time
    /// step; the intended visual rate is faster than a literal 9.8 m/s^2.
    pub gravity_visual_scale: f32,
    /// Vertices whose rest-position Y exceeds this stay attached, standing
    /// in for the seam line at the top of the attachment. Being an absolute
    /// object-local height, it is mesh-scale dependent.
    pub pin_rest_height: f32,
}

impl Default for ClothSettings {
    fn default() -> Self {
        Self {
            damping: 0.98,
            constraint_iterations: 3,
            gravity: 9.8,
            gravity_visual_scale: 5.0,
            pin_rest_height: 0.4,
        }
    }
}

/// The single fixed world-space sphere approximating the torso.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereCollider {
    pub center: Vec3,
    pub radius: f32,
}

impl Default for SphereCollider {
    fn default() -> Self {
        Self {
            center: Vec3::new(0.0, 1.3, 0.0),
            radius: 0.35,
        }
    }
}
