//! Object transform, owned by the host scene.

use glam::{Mat4, Quat, Vec3};

/// Position, rotation, and scale of a scene object.
///
/// The host owns and mutates this; the core only reads it, mainly to map
/// vertices between object-local and world space for collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Local-to-world matrix.
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// World-to-local matrix.
    #[inline]
    pub fn inverse_matrix(&self) -> Mat4 {
        self.matrix().inverse()
    }

    #[inline]
    pub fn point_to_world(&self, point: Vec3) -> Vec3 {
        self.matrix().transform_point3(point)
    }

    #[inline]
    pub fn point_to_local(&self, point: Vec3) -> Vec3 {
        self.inverse_matrix().transform_point3(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let transform = Transform::new(
            Vec3::new(0.0, 1.3, 0.3),
            Quat::from_rotation_y(0.7),
            Vec3::splat(0.1),
        );
        let p = Vec3::new(0.25, -0.5, 0.1);
        let back = transform.point_to_local(transform.point_to_world(p));
        assert!(back.distance(p) < 1e-5);
    }

    #[test]
    fn test_identity_is_noop() {
        let transform = Transform::default();
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(transform.point_to_world(p), p);
    }
}
