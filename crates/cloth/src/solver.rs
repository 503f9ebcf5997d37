//! Verlet integration, constraint relaxation, and sphere collision.

use glam::Vec3;
use toile_mesh::{MeshBuffer, Transform};
use tracing::debug;

use crate::settings::{ClothSettings, SphereCollider};

/// A pairwise rule forcing two vertices toward their rest separation,
/// relaxed iteratively rather than solved exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceConstraint {
    pub a: u32,
    pub b: u32,
    pub rest_distance: f32,
}

/// Per-object cloth state, attached while physics is enabled.
///
/// `rest_positions` is snapshotted once, the first time physics is turned on
/// for the object, and stays fixed for the object's lifetime: disabling
/// physics freezes the mesh in its current deformed shape, and re-enabling
/// reuses the existing snapshot and constraints instead of retaking them.
pub struct ClothSim {
    rest_positions: Vec<Vec3>,
    previous_positions: Vec<Vec3>,
    constraints: Vec<DistanceConstraint>,
}

impl ClothSim {
    /// Snapshot the buffer and derive one constraint per unique mesh edge.
    ///
    /// Edges shared by two triangles are added once, keyed as
    /// `(min(a, b), max(a, b))`.
    pub fn from_buffer(buffer: &MeshBuffer) -> Self {
        let rest_positions = buffer.positions().to_vec();
        let constraints = buffer
            .unique_edges()
            .into_iter()
            .map(|(a, b)| DistanceConstraint {
                a,
                b,
                rest_distance: rest_positions[a as usize]
                    .distance(rest_positions[b as usize]),
            })
            .collect::<Vec<_>>();

        debug!(
            "cloth init: {} vertices, {} constraints",
            rest_positions.len(),
            constraints.len()
        );

        Self {
            previous_positions: rest_positions.clone(),
            rest_positions,
            constraints,
        }
    }

    #[inline]
    pub fn constraints(&self) -> &[DistanceConstraint] {
        &self.constraints
    }

    #[inline]
    pub fn rest_positions(&self) -> &[Vec3] {
        &self.rest_positions
    }

    /// Whether the constraint and integration steps hold this vertex fixed.
    ///
    /// A vertex is pinned when its rest Y exceeds the pin threshold, which
    /// approximates "the top edge stays attached to the body" without
    /// authored anchor points.
    #[inline]
    pub fn is_pinned(&self, index: usize, settings: &ClothSettings) -> bool {
        self.rest_positions[index].y > settings.pin_rest_height
    }

    /// Advance the simulation by `delta` seconds.
    ///
    /// Order within a tick: Verlet integration, constraint relaxation,
    /// sphere collision, then one normal recomputation so nothing after the
    /// tick reads stale normals.
    pub fn step(
        &mut self,
        buffer: &mut MeshBuffer,
        transform: &Transform,
        collider: &SphereCollider,
        settings: &ClothSettings,
        delta: f32,
    ) {
        self.integrate(buffer.positions_mut(), settings, delta);
        self.relax(buffer.positions_mut(), settings);
        self.collide(buffer.positions_mut(), transform, collider);
        buffer.recompute_normals();
    }

    /// Verlet integration with damping and scaled gravity.
    fn integrate(&mut self, positions: &mut [Vec3], settings: &ClothSettings, delta: f32) {
        let gravity_step = settings.gravity * delta * delta * settings.gravity_visual_scale;

        for (index, position) in positions.iter_mut().enumerate() {
            let current = *position;
            if self.is_pinned(index, settings) {
                self.previous_positions[index] = current;
                continue;
            }

            let velocity = (current - self.previous_positions[index]) * settings.damping;
            self.previous_positions[index] = current;

            let mut next = current + velocity;
            next.y -= gravity_step;
            *position = next;
        }
    }

    /// Relax every distance constraint `constraint_iterations` times.
    ///
    /// Each pass moves both endpoints half the error toward the rest
    /// distance, skipping pinned endpoints and zero-length (degenerate)
    /// pairs.
    pub fn relax(&self, positions: &mut [Vec3], settings: &ClothSettings) {
        for _ in 0..settings.constraint_iterations {
            for constraint in &self.constraints {
                let a = constraint.a as usize;
                let b = constraint.b as usize;
                let diff = positions[b] - positions[a];
                let distance = diff.length();
                if distance == 0.0 {
                    continue;
                }

                let correction = (distance - constraint.rest_distance) / distance * 0.5;
                let offset = diff * correction;

                if !self.is_pinned(a, settings) {
                    positions[a] += offset;
                }
                if !self.is_pinned(b, settings) {
                    positions[b] -= offset;
                }
            }
        }
    }

    /// Push vertices inside the collider back to its surface.
    ///
    /// Runs in world space: each vertex is transformed out, pushed along the
    /// outward radial direction if penetrating, and transformed back.
    fn collide(&self, positions: &mut [Vec3], transform: &Transform, collider: &SphereCollider) {
        let to_world = transform.matrix();
        let to_local = to_world.inverse();

        for position in positions.iter_mut() {
            let world = to_world.transform_point3(*position);
            let offset = world - collider.center;
            let distance = offset.length();
            if distance >= collider.radius || distance == 0.0 {
                continue;
            }
            let on_surface = collider.center + offset / distance * collider.radius;
            *position = to_local.transform_point3(on_surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use toile_mesh::shapes::generate_plane;

    fn far_collider() -> SphereCollider {
        SphereCollider {
            center: Vec3::new(0.0, 100.0, 0.0),
            radius: 0.35,
        }
    }

    /// One triangle with vertex 0 above the pin threshold.
    fn triangle() -> MeshBuffer {
        MeshBuffer::new(
            vec![
                Vec3::new(0.0, 0.5, 0.0),
                Vec3::new(-0.5, -0.5, 0.0),
                Vec3::new(0.5, -0.5, 0.0),
            ],
            vec![Vec3::Z; 3],
            vec![Vec2::ZERO; 3],
            vec![[0, 1, 2]],
        )
        .unwrap()
    }

    #[test]
    fn test_constraints_deduplicate_shared_edges() {
        let buffer = MeshBuffer::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![Vec3::Z; 4],
            vec![Vec2::ZERO; 4],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .unwrap();

        let sim = ClothSim::from_buffer(&buffer);
        // Two triangles sharing a diagonal: 5 unique edges, not 6.
        assert_eq!(sim.constraints().len(), 5);
    }

    #[test]
    fn test_relaxation_converges_to_rest_distance() {
        let mut buffer = triangle();
        let sim = ClothSim::from_buffer(&buffer);
        let settings = ClothSettings::default();

        // Stretch a free vertex well away from its rest position.
        buffer.positions_mut()[2] += Vec3::new(0.6, -0.4, 0.3);

        let mut positions = buffer.positions().to_vec();
        for _ in 0..200 {
            sim.relax(&mut positions, &settings);
        }

        for constraint in sim.constraints() {
            let length =
                positions[constraint.a as usize].distance(positions[constraint.b as usize]);
            assert!(
                (length - constraint.rest_distance).abs() < 1e-3,
                "edge ({}, {}) settled at {length}, rest {}",
                constraint.a,
                constraint.b,
                constraint.rest_distance
            );
        }
    }

    #[test]
    fn test_pinned_vertex_never_moves_in_relaxation() {
        let mut buffer = triangle();
        let sim = ClothSim::from_buffer(&buffer);
        let settings = ClothSettings::default();
        let pinned = buffer.positions()[0];

        buffer.positions_mut()[1] += Vec3::new(-0.8, 0.0, 0.2);
        buffer.positions_mut()[2] += Vec3::new(0.8, 0.0, -0.2);

        let mut positions = buffer.positions().to_vec();
        for _ in 0..100 {
            sim.relax(&mut positions, &settings);
        }

        assert_eq!(positions[0], pinned);
    }

    #[test]
    fn test_zero_length_constraint_is_skipped() {
        let mut buffer = triangle();
        let sim = ClothSim::from_buffer(&buffer);
        let settings = ClothSettings::default();

        // Collapse two free vertices onto the same point.
        buffer.positions_mut()[2] = buffer.positions()[1];
        let mut positions = buffer.positions().to_vec();
        sim.relax(&mut positions, &settings);

        for p in &positions {
            assert!(p.is_finite(), "degenerate pair produced {p:?}");
        }
    }

    #[test]
    fn test_collision_pushes_vertices_out() {
        let mut buffer = triangle();
        let mut sim = ClothSim::from_buffer(&buffer);
        let settings = ClothSettings::default();
        let collider = SphereCollider::default();
        let transform = Transform::default();

        // Drop a free vertex inside the collider sphere.
        buffer.positions_mut()[1] = collider.center + Vec3::new(0.05, 0.0, 0.0);

        sim.step(&mut buffer, &transform, &collider, &settings, 1.0 / 60.0);

        for &p in buffer.positions() {
            let distance = transform.point_to_world(p).distance(collider.center);
            assert!(
                distance >= collider.radius - 1e-4,
                "vertex ended {distance} from collider center"
            );
        }
    }

    #[test]
    fn test_cloth_settles_downward_with_pins_held() {
        let mut buffer = generate_plane(1.0, 1.0, 8, 8);
        let mut sim = ClothSim::from_buffer(&buffer);
        let settings = ClothSettings::default();
        let transform = Transform::default();
        let collider = far_collider();

        let rest_mean_y: f32 =
            buffer.positions().iter().map(|p| p.y).sum::<f32>() / buffer.vertex_count() as f32;
        let pinned_before: Vec<(usize, Vec3)> = buffer
            .positions()
            .iter()
            .enumerate()
            .filter(|(i, _)| sim.is_pinned(*i, &settings))
            .map(|(i, &p)| (i, p))
            .collect();
        assert!(!pinned_before.is_empty(), "test mesh has no pinned row");

        for _ in 0..120 {
            sim.step(&mut buffer, &transform, &collider, &settings, 1.0 / 60.0);
        }

        let mean_y: f32 =
            buffer.positions().iter().map(|p| p.y).sum::<f32>() / buffer.vertex_count() as f32;
        assert!(
            mean_y < rest_mean_y,
            "cloth did not settle: mean y {mean_y} vs rest {rest_mean_y}"
        );

        for (index, before) in pinned_before {
            assert_eq!(
                buffer.positions()[index],
                before,
                "pinned vertex {index} moved"
            );
        }
    }

    #[test]
    fn test_gravity_free_cloth_stays_put() {
        let mut buffer = triangle();
        let mut sim = ClothSim::from_buffer(&buffer);
        let settings = ClothSettings {
            gravity: 0.0,
            ..Default::default()
        };
        let before = buffer.positions().to_vec();

        for _ in 0..30 {
            sim.step(
                &mut buffer,
                &Transform::default(),
                &far_collider(),
                &settings,
                1.0 / 60.0,
            );
        }

        for (&old, &new) in before.iter().zip(buffer.positions()) {
            assert!(old.distance(new) < 1e-5);
        }
    }
}
