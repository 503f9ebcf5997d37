//! Contracts with the host application.
//!
//! The host render/scene layer delivers pointer events with the hit data
//! already resolved (object-local point, UV, face normal); the host store
//! receives finalized buffers on commit. The core never issues draw calls
//! and never persists anything itself.

use std::time::Duration;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use toile_paint::PaintBrush;
use toile_sculpt::SculptBrush;

use crate::object::ObjectId;

/// Process-wide brush settings, owned and mutated by the host UI.
/// Engines receive this read-only each frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BrushSettings {
    pub sculpt: SculptBrush,
    pub paint: PaintBrush,
}

/// A pointer-move sample over an object, with hit data resolved by the
/// host's picking.
#[derive(Debug, Clone, Copy)]
pub struct PointerMove {
    pub object: ObjectId,
    /// Hit point in object-local space.
    pub local_point: Vec3,
    /// Face normal at the hit, object-local.
    pub hit_normal: Vec3,
    /// Hit UV in [0, 1]^2.
    pub uv: Vec2,
    pub button_down: bool,
    /// Host frame clock, monotonic within a session.
    pub time: Duration,
}

/// Pointer button release over an object.
#[derive(Debug, Clone, Copy)]
pub struct PointerUp {
    pub object: ObjectId,
}

#[derive(Debug, Clone, Copy)]
pub enum PointerEvent {
    Move(PointerMove),
    Up(PointerUp),
}

/// A finalized edit, emitted on pointer release for the host store to
/// persist. Intermediate frames are never committed.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitPayload {
    /// Raw vertex positions, `3 * vertex_count` floats.
    Positions(Vec<f32>),
    /// Opaque encoded texture snapshot.
    Texture(Vec<u8>),
}

/// Host store callback receiving commits.
pub trait CommitSink {
    fn commit(&mut self, object: ObjectId, payload: CommitPayload);
}

/// Commit collector for tests and simple hosts.
#[derive(Debug, Default)]
pub struct CommitLog {
    pub commits: Vec<(ObjectId, CommitPayload)>,
}

impl CommitSink for CommitLog {
    fn commit(&mut self, object: ObjectId, payload: CommitPayload) {
        self.commits.push((object, payload));
    }
}
