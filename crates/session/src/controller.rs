//! Per-frame event dispatch and commit emission.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, warn};

use toile_cloth::{ClothSettings, SphereCollider};
use toile_sculpt as sculpt;

use crate::host::{BrushSettings, CommitPayload, CommitSink, PointerEvent, PointerMove};
use crate::mode::{route, InteractionMode, Route};
use crate::object::{MeshObject, ObjectId};

/// Minimum spacing between two edit applications to the same object.
/// Coalescing the pointer-move stream bounds per-frame cost on dense
/// geometry.
pub const MIN_EDIT_INTERVAL: Duration = Duration::from_millis(16);

/// Serializes engine access per frame: selection, camera override, and the
/// per-object edit rate limit live here; everything else is read from the
/// host each call.
#[derive(Debug, Default)]
pub struct SessionController {
    selected: Option<ObjectId>,
    camera_override: bool,
    last_edit: HashMap<ObjectId, Duration>,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn select(&mut self, object: Option<ObjectId>) {
        self.selected = object;
    }

    #[inline]
    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    /// Track the camera modifier key. While held, pointer input rotates the
    /// camera and every deformation/paint write is suppressed.
    #[inline]
    pub fn set_camera_override(&mut self, held: bool) {
        self.camera_override = held;
    }

    #[inline]
    pub fn camera_override(&self) -> bool {
        self.camera_override
    }

    /// Dispatch one pointer-move sample to at most one engine.
    ///
    /// Returns the route that was actually applied; rate-limited samples
    /// report [`Route::None`].
    pub fn handle_pointer_move(
        &mut self,
        object: &mut MeshObject,
        event: &PointerMove,
        mode: InteractionMode,
        brushes: &BrushSettings,
    ) -> Route {
        let selected = self.selected == Some(event.object) && object.id() == event.object;
        let decision = route(mode, self.camera_override, selected, event.button_down);
        if decision == Route::None {
            return Route::None;
        }

        if !self.edit_interval_elapsed(event.object, event.time) {
            return Route::None;
        }
        self.last_edit.insert(event.object, event.time);

        match decision {
            Route::Sculpt => {
                sculpt::apply_stroke(
                    object.buffer_mut(),
                    event.local_point,
                    event.hit_normal,
                    &brushes.sculpt,
                );
                Route::Sculpt
            }
            Route::Paint => {
                object.paint_slot_mut().stroke(event.uv, &brushes.paint);
                Route::Paint
            }
            Route::None => Route::None,
        }
    }

    /// Finalize the stroke sequence on pointer release.
    ///
    /// In Sculpt or Paint mode (and not under camera override) this emits a
    /// commit with the finalized buffer for the host store; intermediate
    /// frames never commit.
    pub fn handle_pointer_up(
        &mut self,
        object: &mut MeshObject,
        mode: InteractionMode,
        sink: &mut dyn CommitSink,
    ) {
        if self.selected != Some(object.id()) || self.camera_override {
            return;
        }

        match mode {
            InteractionMode::Sculpt => {
                sink.commit(object.id(), CommitPayload::Positions(object.positions_flat()));
            }
            InteractionMode::Paint => match object.paint_slot().encode_snapshot() {
                Some(Ok(bytes)) => sink.commit(object.id(), CommitPayload::Texture(bytes)),
                Some(Err(error)) => {
                    warn!("texture snapshot encode failed for {:?}: {error}", object.id());
                }
                None => {
                    debug!("skipping texture commit for {:?}: decode pending", object.id());
                }
            },
            InteractionMode::Select => {}
        }
    }

    /// Run one frame for a set of objects.
    ///
    /// Per object, edits (with their normal recomputation) land before the
    /// cloth tick, so physics never reads stale normals. Physics runs for
    /// every physics-enabled object regardless of mode.
    #[allow(clippy::too_many_arguments)]
    pub fn frame(
        &mut self,
        objects: &mut [MeshObject],
        events: &[PointerEvent],
        mode: InteractionMode,
        brushes: &BrushSettings,
        sink: &mut dyn CommitSink,
        collider: &SphereCollider,
        cloth_settings: &ClothSettings,
        delta: f32,
    ) {
        for event in events {
            match event {
                PointerEvent::Move(sample) => {
                    if let Some(object) =
                        objects.iter_mut().find(|o| o.id() == sample.object)
                    {
                        self.handle_pointer_move(object, sample, mode, brushes);
                    }
                }
                PointerEvent::Up(release) => {
                    if let Some(object) =
                        objects.iter_mut().find(|o| o.id() == release.object)
                    {
                        self.handle_pointer_up(object, mode, sink);
                    }
                }
            }
        }

        for object in objects.iter_mut() {
            object.tick_physics(collider, cloth_settings, delta);
        }
    }

    fn edit_interval_elapsed(&self, object: ObjectId, now: Duration) -> bool {
        match self.last_edit.get(&object) {
            Some(&last) => now.saturating_sub(last) >= MIN_EDIT_INTERVAL,
            None => true,
        }
    }
}
