//! UV-addressed dab stamping.

use glam::Vec2;
use tracing::debug;

use crate::brush::PaintBrush;
use crate::surface::PixelSurface;

/// Map a UV coordinate to pixel coordinates on the surface.
///
/// V is flipped because UV space has its origin at the bottom-left while the
/// pixel grid starts at the top-left.
#[inline]
pub fn uv_to_pixel(uv: Vec2, width: u32, height: u32) -> (f32, f32) {
    (uv.x * width as f32, (1.0 - uv.y) * height as f32)
}

/// Stamp one brush dab at a UV position.
///
/// Draws a filled circle of radius `brush.size * 2` pixels, composited with
/// the brush color at the brush opacity. Overlapping dabs accumulate.
pub fn stamp_uv(surface: &mut PixelSurface, uv: Vec2, brush: &PaintBrush) {
    let (center_x, center_y) = uv_to_pixel(uv, surface.width, surface.height);
    stamp(surface, center_x, center_y, brush);
}

/// Stamp one brush dab at pixel coordinates.
/// Returns the affected bounding box `(x, y, width, height)`, or None if the
/// dab lies entirely outside the surface.
pub fn stamp(
    surface: &mut PixelSurface,
    center_x: f32,
    center_y: f32,
    brush: &PaintBrush,
) -> Option<(u32, u32, u32, u32)> {
    let radius = brush.radius_px();
    if radius <= 0.0 || brush.opacity <= 0.0 {
        debug!("stamp: zero radius or opacity, skipping");
        return None;
    }

    let x_min = ((center_x - radius).floor().max(0.0) as u32).min(surface.width);
    let y_min = ((center_y - radius).floor().max(0.0) as u32).min(surface.height);
    let x_max = ((center_x + radius).ceil().max(0.0) as u32).min(surface.width);
    let y_max = ((center_y + radius).ceil().max(0.0) as u32).min(surface.height);

    if x_min >= x_max || y_min >= y_max {
        return None;
    }

    let radius_sq = radius * radius;
    for py in y_min..y_max {
        for px in x_min..x_max {
            // Distance from the pixel center.
            let dx = (px as f32 + 0.5) - center_x;
            let dy = (py as f32 + 0.5) - center_y;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq > radius_sq {
                continue;
            }

            let falloff = hardness_falloff(dist_sq.sqrt() / radius, brush.hardness);
            if falloff > 0.0 {
                surface.blend_pixel(px, py, brush.color, brush.opacity * falloff);
            }
        }
    }

    Some((x_min, y_min, x_max - x_min, y_max - y_min))
}

/// Edge falloff from hardness.
/// `distance_normalized` is 0 at the dab center, 1 at the edge.
/// Hardness 1.0 keeps full strength across the whole circle; lower values
/// fade linearly toward the edge.
#[inline]
pub fn hardness_falloff(distance_normalized: f32, hardness: f32) -> f32 {
    if hardness >= 1.0 {
        1.0
    } else {
        let t = distance_normalized.clamp(0.0, 1.0);
        let soft = 1.0 - t;
        soft * (1.0 - hardness) + hardness
    }
}
