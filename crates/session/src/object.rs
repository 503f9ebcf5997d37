//! The per-object aggregate the engines operate on.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use toile_blend::{BlendSlots, BlendWeights};
use toile_cloth::{ClothSettings, ClothSim, SphereCollider};
use toile_mesh::{BufferError, MeshBuffer, ShapeKind, Transform};
use toile_paint::{SurfaceSlot, DEFAULT_TEXTURE_SIZE};

/// Opaque object key, assigned by the host store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ObjectId(u64);

impl ObjectId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("position snapshot has {actual} floats, live mesh needs {expected}")]
    VertexCountMismatch { expected: usize, actual: usize },
}

/// One attachment on the garment: geometry, paint surface, optional cloth
/// state, and the host-owned transform.
pub struct MeshObject {
    id: ObjectId,
    name: String,
    kind: ShapeKind,
    buffer: MeshBuffer,
    /// Host-owned; the core reads it for collision math only.
    pub transform: Transform,
    paint: SurfaceSlot,
    cloth: Option<ClothSim>,
    physics_enabled: bool,
    blend_weights: Option<BlendWeights>,
}

impl MeshObject {
    /// Create an object with the catalog geometry for `kind` and the
    /// default texture resolution.
    pub fn new(id: ObjectId, name: impl Into<String>, kind: ShapeKind) -> Self {
        Self::with_texture_size(id, name, kind, DEFAULT_TEXTURE_SIZE)
    }

    /// As [`Self::new`] with an explicit texture resolution.
    pub fn with_texture_size(
        id: ObjectId,
        name: impl Into<String>,
        kind: ShapeKind,
        texture_size: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            buffer: kind.generate(),
            transform: Transform::default(),
            paint: SurfaceSlot::new(texture_size, texture_size),
            cloth: None,
            physics_enabled: false,
            blend_weights: None,
        }
    }

    /// Generation action: resolve the blend control into a new object.
    ///
    /// Picks the highest-weighted non-empty slot's base shape and snapshots
    /// the weight triple onto the object. Returns None when every slot is
    /// empty.
    pub fn from_blend(
        id: ObjectId,
        slots: &BlendSlots,
        weights: BlendWeights,
    ) -> Option<Self> {
        let preset = slots.select(&weights)?;
        let mut object = Self::new(id, preset.name.clone(), preset.kind);
        object.blend_weights = Some(weights);
        Some(object)
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[inline]
    pub fn buffer(&self) -> &MeshBuffer {
        &self.buffer
    }

    #[inline]
    pub fn buffer_mut(&mut self) -> &mut MeshBuffer {
        &mut self.buffer
    }

    #[inline]
    pub fn paint_slot(&self) -> &SurfaceSlot {
        &self.paint
    }

    #[inline]
    pub fn paint_slot_mut(&mut self) -> &mut SurfaceSlot {
        &mut self.paint
    }

    #[inline]
    pub fn blend_weights(&self) -> Option<BlendWeights> {
        self.blend_weights
    }

    #[inline]
    pub fn physics_enabled(&self) -> bool {
        self.physics_enabled
    }

    /// Toggle physics.
    ///
    /// The first enable snapshots the current shape as the rest state and
    /// builds the edge constraints; disabling freezes the mesh where it is,
    /// and later enables reuse the existing state rather than retaking the
    /// snapshot.
    pub fn set_physics_enabled(&mut self, enabled: bool) {
        if enabled && self.cloth.is_none() {
            self.cloth = Some(ClothSim::from_buffer(&self.buffer));
        }
        self.physics_enabled = enabled;
    }

    /// Run one physics tick if this object participates.
    pub fn tick_physics(
        &mut self,
        collider: &SphereCollider,
        settings: &ClothSettings,
        delta: f32,
    ) {
        if !self.physics_enabled {
            return;
        }
        if let Some(cloth) = &mut self.cloth {
            cloth.step(&mut self.buffer, &self.transform, collider, settings, delta);
        }
    }

    /// Restore sculpted positions from a persisted flat float array.
    ///
    /// A snapshot whose length disagrees with the live topology is rejected
    /// wholesale; on success normals are recomputed immediately.
    pub fn restore_positions(&mut self, flat: &[f32]) -> Result<(), RestoreError> {
        self.buffer.set_positions_flat(flat).map_err(|error| {
            debug!("rejecting position restore for {:?}: {error}", self.id);
            match error {
                BufferError::FlatLengthMismatch { expected, actual } => {
                    RestoreError::VertexCountMismatch { expected, actual }
                }
                // set_positions_flat only fails on length.
                _ => RestoreError::VertexCountMismatch {
                    expected: self.buffer.vertex_count() * 3,
                    actual: flat.len(),
                },
            }
        })?;
        self.buffer.recompute_normals();
        Ok(())
    }

    /// Restore the paint surface from persisted snapshot bytes (or reset it
    /// when the host has none). The decode completes via
    /// [`Self::finish_texture_restore`].
    pub fn restore_texture(&mut self, snapshot: Option<Vec<u8>>) {
        self.paint.begin_restore(snapshot);
    }

    /// Complete an outstanding texture decode. Failures fall back to the
    /// neutral surface inside the slot; painting stays usable.
    pub fn finish_texture_restore(&mut self) {
        let _ = self.paint.complete_restore();
    }

    /// Finalized positions for the host exporter.
    pub fn positions_flat(&self) -> Vec<f32> {
        self.buffer.positions_flat()
    }

    /// Raw texture bytes for the host exporter, if no decode is pending.
    pub fn texture_bytes(&self) -> Option<&[u8]> {
        self.paint.surface().map(|surface| surface.as_bytes())
    }
}
