//! Cloth solver for Toile.
//!
//! Settles a garment mesh under gravity with self-rigidity and body
//! collision, using position-based Verlet integration:
//! velocity falls out of the difference between current and previous
//! positions, distance constraints over the unique mesh edges are relaxed
//! iteratively, and a single sphere approximating the torso pushes
//! penetrating vertices back to its surface.
//!
//! The solver mutates the object's [`toile_mesh::MeshBuffer`] in place and
//! recomputes normals once per tick.

pub mod settings;
pub mod solver;

pub use settings::{ClothSettings, SphereCollider};
pub use solver::{ClothSim, DistanceConstraint};
