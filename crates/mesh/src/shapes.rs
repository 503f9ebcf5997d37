//! Procedural generators for the base shape catalog.
//!
//! Attachments start life as one of four primitive shapes. The kind is
//! resolved into a concrete [`MeshBuffer`] exactly once at object creation;
//! the editing engines never look at it again.
//!
//! Segment counts and dimensions match the asset catalog defaults: dense
//! enough that sculpting reads as smooth, small enough that per-frame edits
//! stay cheap.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::buffer::MeshBuffer;

/// Base shape of a newly created attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Flat pocket blank, 1 x 1 x 0.2
    #[default]
    Box,
    /// Button blank, radius 0.5
    Sphere,
    /// Zipper/cord blank, radius 0.2, height 1
    Cylinder,
    /// Patch blank, 1 x 1
    Plane,
}

impl ShapeKind {
    /// Generate the catalog-default geometry for this kind.
    pub fn generate(&self) -> MeshBuffer {
        match self {
            ShapeKind::Box => generate_box(1.0, 1.0, 0.2, 64, 64, 4),
            ShapeKind::Sphere => generate_sphere(0.5, 128, 128),
            ShapeKind::Cylinder => generate_cylinder(0.2, 1.0, 64, 32),
            ShapeKind::Plane => generate_plane(1.0, 1.0, 64, 64),
        }
    }
}

/// Subdivided plane in the XY plane facing +Z, centered at the origin.
pub fn generate_plane(width: f32, height: f32, segs_x: u32, segs_y: u32) -> MeshBuffer {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();

    for iy in 0..=segs_y {
        let v = iy as f32 / segs_y as f32;
        let y = height / 2.0 - v * height;
        for ix in 0..=segs_x {
            let u = ix as f32 / segs_x as f32;
            let x = u * width - width / 2.0;
            positions.push(Vec3::new(x, y, 0.0));
            normals.push(Vec3::Z);
            uvs.push(Vec2::new(u, 1.0 - v));
        }
    }

    let faces = grid_faces(segs_x, segs_y, 0);
    MeshBuffer::new(positions, normals, uvs, faces)
        .expect("plane generator produces a valid buffer")
}

/// Triangulate a (segs_x + 1) x (segs_y + 1) vertex grid laid out row-major,
/// starting at `base`.
fn grid_faces(segs_x: u32, segs_y: u32, base: u32) -> Vec<[u32; 3]> {
    let stride = segs_x + 1;
    let mut faces = Vec::with_capacity((segs_x * segs_y * 2) as usize);
    for iy in 0..segs_y {
        for ix in 0..segs_x {
            let a = base + iy * stride + ix;
            let b = base + (iy + 1) * stride + ix;
            let c = base + (iy + 1) * stride + ix + 1;
            let d = base + iy * stride + ix + 1;
            faces.push([a, b, d]);
            faces.push([b, c, d]);
        }
    }
    faces
}

/// Axis-aligned box centered at the origin, with each of the six faces
/// mapped into its own cell of a 3 x 2 UV atlas so paint strokes never bleed
/// across faces.
pub fn generate_box(
    width: f32,
    height: f32,
    depth: f32,
    segs_w: u32,
    segs_h: u32,
    segs_d: u32,
) -> MeshBuffer {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut faces = Vec::new();

    // (normal, u tangent, v tangent, u size, v size, u segs, v segs, atlas col, atlas row)
    // Tangents satisfy t_u x t_v == normal so every face winds outward.
    let face_layouts: [(Vec3, Vec3, Vec3, f32, f32, u32, u32, u32, u32); 6] = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y, depth, height, segs_d, segs_h, 0, 0),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y, depth, height, segs_d, segs_h, 1, 0),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z, width, depth, segs_w, segs_d, 2, 0),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z, width, depth, segs_w, segs_d, 0, 1),
        (Vec3::Z, Vec3::X, Vec3::Y, width, height, segs_w, segs_h, 1, 1),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y, width, height, segs_w, segs_h, 2, 1),
    ];

    let half = Vec3::new(width, height, depth) / 2.0;
    const ATLAS_COL_W: f32 = 1.0 / 3.0;
    const ATLAS_ROW_H: f32 = 1.0 / 2.0;

    for (normal, t_u, t_v, size_u, size_v, segs_u, segs_v, col, row) in face_layouts {
        let base = positions.len() as u32;
        let center = normal * (normal.abs().dot(half));

        for iy in 0..=segs_v {
            let v = iy as f32 / segs_v as f32;
            for ix in 0..=segs_u {
                let u = ix as f32 / segs_u as f32;
                let point =
                    center + t_u * size_u * (u - 0.5) + t_v * size_v * (0.5 - v);
                positions.push(point);
                normals.push(normal);

                // Face-local UV packed into its atlas cell.
                let cell_u = u * ATLAS_COL_W + col as f32 * ATLAS_COL_W;
                let cell_v = (1.0 - v) * ATLAS_ROW_H + row as f32 * ATLAS_ROW_H;
                uvs.push(Vec2::new(cell_u, cell_v));
            }
        }

        faces.extend(grid_faces(segs_u, segs_v, base));
    }

    MeshBuffer::new(positions, normals, uvs, faces)
        .expect("box generator produces a valid buffer")
}

/// UV sphere centered at the origin.
pub fn generate_sphere(radius: f32, segs_w: u32, segs_h: u32) -> MeshBuffer {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();

    for iy in 0..=segs_h {
        let v = iy as f32 / segs_h as f32;
        let polar = v * PI;
        for ix in 0..=segs_w {
            let u = ix as f32 / segs_w as f32;
            let azimuth = u * TAU;

            let point = Vec3::new(
                -radius * azimuth.cos() * polar.sin(),
                radius * polar.cos(),
                radius * azimuth.sin() * polar.sin(),
            );
            positions.push(point);
            normals.push(point.normalize_or_zero());
            uvs.push(Vec2::new(u, 1.0 - v));
        }
    }

    let stride = segs_w + 1;
    let mut faces = Vec::new();
    for iy in 0..segs_h {
        for ix in 0..segs_w {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;
            // Skip the degenerate triangles that collapse into the poles.
            if iy != 0 {
                faces.push([a, b, d]);
            }
            if iy != segs_h - 1 {
                faces.push([b, c, d]);
            }
        }
    }

    MeshBuffer::new(positions, normals, uvs, faces)
        .expect("sphere generator produces a valid buffer")
}

/// Capped cylinder centered at the origin, axis along Y.
pub fn generate_cylinder(radius: f32, height: f32, segs_radial: u32, segs_h: u32) -> MeshBuffer {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut faces = Vec::new();

    let half_height = height / 2.0;
    let stride = segs_radial + 1;

    // Side wall.
    for iy in 0..=segs_h {
        let v = iy as f32 / segs_h as f32;
        let y = half_height - v * height;
        for ix in 0..=segs_radial {
            let u = ix as f32 / segs_radial as f32;
            let theta = u * TAU;
            positions.push(Vec3::new(radius * theta.sin(), y, radius * theta.cos()));
            normals.push(Vec3::new(theta.sin(), 0.0, theta.cos()));
            uvs.push(Vec2::new(u, 1.0 - v));
        }
    }
    for iy in 0..segs_h {
        for ix in 0..segs_radial {
            let a = iy * stride + ix;
            let b = (iy + 1) * stride + ix;
            let c = (iy + 1) * stride + ix + 1;
            let d = iy * stride + ix + 1;
            faces.push([a, b, d]);
            faces.push([b, c, d]);
        }
    }

    // Caps: one center vertex plus a ring each, fanned out.
    for (y, cap_normal) in [(half_height, Vec3::Y), (-half_height, Vec3::NEG_Y)] {
        let center_index = positions.len() as u32;
        positions.push(Vec3::new(0.0, y, 0.0));
        normals.push(cap_normal);
        uvs.push(Vec2::new(0.5, 0.5));

        let ring_base = positions.len() as u32;
        for ix in 0..=segs_radial {
            let theta = ix as f32 / segs_radial as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            positions.push(Vec3::new(radius * sin, y, radius * cos));
            normals.push(cap_normal);
            uvs.push(Vec2::new(sin * 0.5 + 0.5, cos * 0.5 + 0.5));
        }
        for ix in 0..segs_radial {
            let ring_a = ring_base + ix;
            let ring_b = ring_base + ix + 1;
            if cap_normal.y > 0.0 {
                faces.push([center_index, ring_a, ring_b]);
            } else {
                faces.push([center_index, ring_b, ring_a]);
            }
        }
    }

    MeshBuffer::new(positions, normals, uvs, faces)
        .expect("cylinder generator produces a valid buffer")
}
