//! Radial Gaussian displacement.

use glam::Vec3;
use toile_mesh::MeshBuffer;
use tracing::debug;

use crate::brush::SculptBrush;

/// Scales a full-intensity stroke so a single frame visibly moves geometry
/// without runaway distortion. Tuned against the catalog shapes at default
/// brush settings.
pub const DISPLACEMENT_SCALE: f32 = 0.05;

/// Gaussian brush falloff.
///
/// Weight 1 at the hit point, decaying with sigma at half the brush radius:
/// `exp(-d^2 / (2 * (0.5 * radius)^2))`.
#[inline]
pub fn gaussian_falloff(distance: f32, radius: f32) -> f32 {
    let sigma = 0.5 * radius;
    (-(distance * distance) / (2.0 * sigma * sigma)).exp()
}

/// Apply one sculpt stroke to the buffer.
///
/// Every vertex within `brush.radius` of `hit_point` (exact Euclidean test)
/// moves along `hit_normal` by the falloff-weighted displacement. Vertices
/// outside the radius are untouched. Normals are recomputed whenever at
/// least one vertex moved, so hit-testing and collision never read stale
/// normal data.
///
/// A degenerate (zero-length) hit normal - which can occur at mesh seams -
/// skips the stroke entirely rather than displacing in an undefined
/// direction.
///
/// Returns whether any vertex moved.
pub fn apply_stroke(
    buffer: &mut MeshBuffer,
    hit_point: Vec3,
    hit_normal: Vec3,
    brush: &SculptBrush,
) -> bool {
    let direction = hit_normal.normalize_or_zero();
    if direction == Vec3::ZERO {
        debug!("apply_stroke: degenerate hit normal, skipping");
        return false;
    }

    let radius_sq = brush.radius * brush.radius;
    let scale = brush.intensity * brush.direction.sign() * DISPLACEMENT_SCALE;
    let mut changed = false;

    for vertex in buffer.positions_mut() {
        let distance_sq = vertex.distance_squared(hit_point);
        if distance_sq > radius_sq {
            continue;
        }
        let weight = gaussian_falloff(distance_sq.sqrt(), brush.radius);
        *vertex += direction * (weight * scale);
        changed = true;
    }

    if changed {
        buffer.recompute_normals();
    }
    changed
}
