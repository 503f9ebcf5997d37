//! Painting engine for Toile.
//!
//! Rasterizes brush strokes into a persistent per-object pixel surface,
//! addressed through mesh UVs:
//! - [`surface::PixelSurface`] - CPU RGBA surface with alpha compositing
//! - [`brush::PaintBrush`] - host-owned brush settings
//! - [`dab`] - UV-addressed circular dab stamping
//! - [`snapshot`] - PNG snapshot encode/decode for host persistence
//! - [`slot::SurfaceSlot`] - per-object surface with an explicit restore
//!   state machine, so strokes are never applied to a half-decoded buffer
//!
//! Painting never touches vertex positions.

pub mod brush;
pub mod dab;
pub mod slot;
pub mod snapshot;
pub mod surface;

pub use brush::PaintBrush;
pub use slot::{SurfaceSlot, NEUTRAL_FILL};
pub use snapshot::SnapshotError;
pub use surface::PixelSurface;

/// Default texture resolution for attachment surfaces.
pub const DEFAULT_TEXTURE_SIZE: u32 = 2048;
