//! Mesh geometry for Toile.
//!
//! This crate owns the per-object geometry buffer that every editing engine
//! operates on:
//! - [`buffer::MeshBuffer`] - vertex positions, normals, UVs, and triangle faces
//! - [`transform::Transform`] - the host-owned object transform (read-only here)
//! - [`shapes`] - procedural generators for the base shape catalog
//!
//! Engines mutate positions through the buffer and rely on
//! [`buffer::MeshBuffer::recompute_normals`] to keep normal data coherent
//! between edits, collision, and hit-testing.

pub mod buffer;
pub mod shapes;
pub mod transform;

pub use buffer::{BufferError, MeshBuffer};
pub use shapes::ShapeKind;
pub use transform::Transform;
