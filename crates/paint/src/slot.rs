//! Per-object paint surface with an explicit restore state machine.
//!
//! Restoring a snapshot is the one suspension point in the paint path: the
//! host may hand bytes over before it is ready to pay for the decode. The
//! slot therefore has two states, `Ready` and `Decoding`. Strokes arriving
//! while a decode is outstanding are queued (bounded) and replayed once the
//! decode lands - they are never applied to a half-initialized buffer. A
//! failed decode falls back to the neutral fill and painting stays usable.

use glam::Vec2;
use tracing::{debug, warn};

use crate::brush::PaintBrush;
use crate::dab::stamp_uv;
use crate::snapshot::{self, SnapshotError};
use crate::surface::PixelSurface;

/// Flat neutral fill used for fresh and fallen-back surfaces (#1a1a1a).
pub const NEUTRAL_FILL: [f32; 4] = [0.102, 0.102, 0.102, 1.0];

/// Upper bound on strokes queued while a decode is outstanding; anything
/// beyond is dropped.
const MAX_PENDING_STROKES: usize = 256;

#[derive(Debug, Clone, Copy)]
struct PendingStroke {
    uv: Vec2,
    brush: PaintBrush,
}

enum SlotState {
    Ready(PixelSurface),
    Decoding {
        bytes: Vec<u8>,
        pending: Vec<PendingStroke>,
    },
}

/// A paint surface plus its restore lifecycle.
pub struct SurfaceSlot {
    width: u32,
    height: u32,
    state: SlotState,
}

impl SurfaceSlot {
    /// Create a ready slot filled with the neutral color.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            state: SlotState::Ready(PixelSurface::filled(width, height, NEUTRAL_FILL)),
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, SlotState::Ready(_))
    }

    /// The live surface, if no decode is outstanding.
    pub fn surface(&self) -> Option<&PixelSurface> {
        match &self.state {
            SlotState::Ready(surface) => Some(surface),
            SlotState::Decoding { .. } => None,
        }
    }

    /// Apply a stroke, or queue it if a decode is outstanding.
    /// Returns true if the stroke was applied immediately.
    pub fn stroke(&mut self, uv: Vec2, brush: &PaintBrush) -> bool {
        match &mut self.state {
            SlotState::Ready(surface) => {
                stamp_uv(surface, uv, brush);
                true
            }
            SlotState::Decoding { pending, .. } => {
                if pending.len() < MAX_PENDING_STROKES {
                    pending.push(PendingStroke { uv, brush: *brush });
                } else {
                    debug!("stroke queue full during decode, dropping stroke");
                }
                false
            }
        }
    }

    /// Begin restoring from a snapshot.
    ///
    /// `None` means the host has no snapshot for this object: the surface
    /// resets to the neutral fill immediately. `Some` parks the bytes until
    /// [`Self::complete_restore`] performs the decode.
    pub fn begin_restore(&mut self, snapshot: Option<Vec<u8>>) {
        match snapshot {
            None => {
                self.state = SlotState::Ready(PixelSurface::filled(
                    self.width,
                    self.height,
                    NEUTRAL_FILL,
                ));
            }
            Some(bytes) => {
                self.state = SlotState::Decoding {
                    bytes,
                    pending: Vec::new(),
                };
            }
        }
    }

    /// Finish an outstanding restore.
    ///
    /// On success the decoded surface replaces the live one and queued
    /// strokes are replayed in order. On failure the surface falls back to
    /// the neutral fill, queued strokes are dropped, and the error is
    /// returned after logging - painting remains usable either way.
    /// A no-op if the slot is already ready.
    pub fn complete_restore(&mut self) -> Result<(), SnapshotError> {
        let (bytes, pending) =
            match std::mem::replace(&mut self.state, SlotState::Ready(placeholder_surface())) {
                SlotState::Decoding { bytes, pending } => (bytes, pending),
                ready => {
                    self.state = ready;
                    return Ok(());
                }
            };

        match snapshot::decode(&bytes, self.width, self.height) {
            Ok(mut surface) => {
                for stroke in &pending {
                    stamp_uv(&mut surface, stroke.uv, &stroke.brush);
                }
                self.state = SlotState::Ready(surface);
                Ok(())
            }
            Err(error) => {
                warn!("paint snapshot decode failed, falling back to neutral fill: {error}");
                self.state = SlotState::Ready(PixelSurface::filled(
                    self.width,
                    self.height,
                    NEUTRAL_FILL,
                ));
                Err(error)
            }
        }
    }

    /// Encode the live surface for commit.
    /// Returns None while a decode is outstanding - there is nothing
    /// finalized to persist.
    pub fn encode_snapshot(&self) -> Option<Result<Vec<u8>, SnapshotError>> {
        self.surface().map(snapshot::encode)
    }
}

// Transient value swapped in while complete_restore owns the old state.
fn placeholder_surface() -> PixelSurface {
    PixelSurface::filled(0, 0, NEUTRAL_FILL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_brush() -> PaintBrush {
        PaintBrush {
            color: [1.0, 0.0, 0.0],
            size: 4,
            opacity: 1.0,
            hardness: 1.0,
        }
    }

    #[test]
    fn test_new_slot_is_neutral() {
        let slot = SurfaceSlot::new(8, 8);
        assert!(slot.is_ready());
        let pixel = slot.surface().unwrap().get_pixel(0, 0).unwrap();
        assert_eq!(pixel, NEUTRAL_FILL);
    }

    #[test]
    fn test_restore_absent_snapshot_resets_to_neutral() {
        let mut slot = SurfaceSlot::new(8, 8);
        slot.stroke(Vec2::new(0.5, 0.5), &red_brush());
        slot.begin_restore(None);
        assert!(slot.is_ready());
        let pixel = slot.surface().unwrap().get_pixel(4, 4).unwrap();
        assert_eq!(pixel, NEUTRAL_FILL);
    }

    #[test]
    fn test_strokes_queue_during_decode_and_replay() {
        let mut slot = SurfaceSlot::new(16, 16);
        let bytes = slot.encode_snapshot().unwrap().unwrap();

        slot.begin_restore(Some(bytes));
        assert!(!slot.is_ready());
        // Stroke lands in the queue, not on a half-initialized buffer.
        assert!(!slot.stroke(Vec2::new(0.5, 0.5), &red_brush()));

        slot.complete_restore().unwrap();
        assert!(slot.is_ready());
        let pixel = slot.surface().unwrap().get_pixel(8, 8).unwrap();
        assert!((pixel[0] - 1.0).abs() < 0.01, "queued stroke not replayed");
    }

    #[test]
    fn test_failed_decode_falls_back_to_neutral() {
        let mut slot = SurfaceSlot::new(16, 16);
        slot.begin_restore(Some(vec![1, 2, 3, 4]));
        slot.stroke(Vec2::new(0.5, 0.5), &red_brush());

        assert!(slot.complete_restore().is_err());
        assert!(slot.is_ready());
        // Queued strokes are dropped with the failed decode.
        let pixel = slot.surface().unwrap().get_pixel(8, 8).unwrap();
        assert_eq!(pixel, NEUTRAL_FILL);

        // Painting still works afterward.
        assert!(slot.stroke(Vec2::new(0.5, 0.5), &red_brush()));
    }

    #[test]
    fn test_complete_restore_without_decode_is_noop() {
        let mut slot = SurfaceSlot::new(8, 8);
        slot.stroke(Vec2::new(0.5, 0.5), &red_brush());
        let before = slot.surface().unwrap().pixels().to_vec();
        slot.complete_restore().unwrap();
        assert_eq!(slot.surface().unwrap().pixels(), before.as_slice());
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut slot = SurfaceSlot::new(16, 16);
        let bytes = slot.encode_snapshot().unwrap().unwrap();
        slot.begin_restore(Some(bytes));

        for _ in 0..(MAX_PENDING_STROKES + 50) {
            slot.stroke(Vec2::new(0.5, 0.5), &red_brush());
        }
        // Excess strokes were dropped silently; replay must not blow up.
        slot.complete_restore().unwrap();
        assert!(slot.is_ready());
    }
}
