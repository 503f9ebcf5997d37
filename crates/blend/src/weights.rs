//! Pointer position to three-way influence weights.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Anchor angles on the control circle, standard trigonometric convention.
const ANCHOR_ANGLES_DEG: [f32; 3] = [90.0, 210.0, 330.0];

/// Three-way influence weights in percent.
///
/// Each component is in [0, 100]; the sum is 100 give or take one unit of
/// per-component rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlendWeights {
    pub top: u32,
    pub left: u32,
    pub right: u32,
}

impl BlendWeights {
    #[inline]
    pub fn sum(&self) -> u32 {
        self.top + self.left + self.right
    }

    /// Components in slot priority order (top, left, right).
    #[inline]
    pub fn as_array(&self) -> [u32; 3] {
        [self.top, self.left, self.right]
    }
}

/// Compute blend weights from a pointer offset relative to the center of a
/// circular control area of the given radius.
///
/// The pointer is clamped into the circle. Each anchor's raw influence falls
/// off linearly with the distance to the pointer and reaches zero exactly at
/// the two other anchors (the anchors sit 120 degrees apart, `sqrt(3) * R`
/// from each other), so a pointer parked on one anchor yields 100/0/0. A
/// zero influence sum (unreachable inside the clamped circle, but guarded
/// anyway) substitutes 1 to avoid dividing by zero.
pub fn weights_for_pointer(offset: Vec2, radius: f32) -> BlendWeights {
    let pointer = clamp_to_circle(offset, radius);

    // Chord length between adjacent anchors; influence hits zero there.
    let falloff_reach = 3.0_f32.sqrt() * radius;

    let mut influences = [0.0_f32; 3];
    for (influence, angle_deg) in influences.iter_mut().zip(ANCHOR_ANGLES_DEG) {
        let angle = angle_deg.to_radians();
        let anchor = Vec2::new(angle.cos(), angle.sin()) * radius;
        let distance = pointer.distance(anchor);
        *influence = (1.0 - distance / falloff_reach).max(0.0);
    }

    let mut total: f32 = influences.iter().sum();
    if total == 0.0 {
        total = 1.0;
    }

    let percent = |influence: f32| (100.0 * influence / total).round() as u32;
    BlendWeights {
        top: percent(influences[0]),
        left: percent(influences[1]),
        right: percent(influences[2]),
    }
}

fn clamp_to_circle(offset: Vec2, radius: f32) -> Vec2 {
    let length = offset.length();
    if length > radius && length > 0.0 {
        offset * (radius / length)
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: f32 = 120.0;

    fn anchor(angle_deg: f32) -> Vec2 {
        let angle = angle_deg.to_radians();
        Vec2::new(angle.cos(), angle.sin()) * R
    }

    #[test]
    fn test_pointer_on_top_anchor_is_pure_top() {
        let weights = weights_for_pointer(anchor(90.0), R);
        assert_eq!(weights.top, 100);
        assert_eq!(weights.left, 0);
        assert_eq!(weights.right, 0);
    }

    #[test]
    fn test_pointer_on_side_anchors() {
        let left = weights_for_pointer(anchor(210.0), R);
        assert_eq!((left.top, left.left, left.right), (0, 100, 0));

        let right = weights_for_pointer(anchor(330.0), R);
        assert_eq!((right.top, right.left, right.right), (0, 0, 100));
    }

    #[test]
    fn test_center_is_roughly_even() {
        let weights = weights_for_pointer(Vec2::ZERO, R);
        for w in weights.as_array() {
            assert!((32..=35).contains(&w), "center weight {w} out of range");
        }
        assert!((99..=101).contains(&weights.sum()));
    }

    #[test]
    fn test_sum_stays_normalized_across_the_disc() {
        for ix in -4..=4 {
            for iy in -4..=4 {
                let offset = Vec2::new(ix as f32, iy as f32) * (R / 4.0);
                let weights = weights_for_pointer(offset, R);
                assert!(
                    (99..=101).contains(&weights.sum()),
                    "sum {} at offset {offset:?}",
                    weights.sum()
                );
            }
        }
    }

    #[test]
    fn test_pointer_outside_circle_is_clamped() {
        // Far beyond the top anchor clamps back onto it.
        let weights = weights_for_pointer(Vec2::new(0.0, 10.0 * R), R);
        assert_eq!(weights.top, 100);
        assert_eq!(weights.left + weights.right, 0);
    }

    #[test]
    fn test_weights_shift_toward_dragged_anchor() {
        let near_top = weights_for_pointer(Vec2::new(0.0, R * 0.5), R);
        assert!(near_top.top > near_top.left);
        assert!(near_top.top > near_top.right);
        assert_eq!(near_top.left, near_top.right);
    }
}
