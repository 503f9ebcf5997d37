//! Editing session coordination for Toile.
//!
//! Ties the engine crates together behind the per-frame contract the host
//! drives:
//! - [`object::MeshObject`] - one attachment: geometry buffer, paint
//!   surface, optional cloth state, and host-owned transform
//! - [`mode`] - the interaction mode x camera override routing table
//! - [`controller::SessionController`] - pointer event dispatch, edit rate
//!   limiting, commit emission, and the per-frame ordering guarantee
//!   (edits, then normals, then physics)
//! - [`host`] - the narrow interfaces to the host application store
//!
//! The host owns the canonical object list, brush settings, and mode; the
//! controller reads them per frame and only calls back on commit.

pub mod controller;
pub mod host;
pub mod mode;
pub mod object;

pub use controller::{SessionController, MIN_EDIT_INTERVAL};
pub use host::{BrushSettings, CommitPayload, CommitSink, PointerEvent, PointerMove, PointerUp};
pub use mode::{route, InteractionMode, Route};
pub use object::{MeshObject, ObjectId, RestoreError};
