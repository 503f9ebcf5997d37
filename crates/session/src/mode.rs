//! Interaction mode and pointer routing.
//!
//! The mode/override combination is a small state machine that is easy to
//! get wrong as scattered boolean checks, so routing is one exhaustive
//! match over `(InteractionMode, camera_override)`.

use serde::{Deserialize, Serialize};

/// The active editing tool. Global, switched explicitly by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    #[default]
    Select,
    Sculpt,
    Paint,
}

/// Which engine a pointer-move event reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Sculpt,
    Paint,
    /// No engine touches the buffer: wrong mode, nothing selected, button
    /// up, or the camera override is held.
    None,
}

/// Decide the routing for one pointer-move event.
///
/// The camera override wins over everything: while the modifier key is held
/// the host camera moves and no deformation or paint write happens,
/// whatever the mode.
pub fn route(
    mode: InteractionMode,
    camera_override: bool,
    object_selected: bool,
    button_down: bool,
) -> Route {
    if !object_selected || !button_down {
        return Route::None;
    }
    match (mode, camera_override) {
        (InteractionMode::Sculpt, false) => Route::Sculpt,
        (InteractionMode::Paint, false) => Route::Paint,
        (InteractionMode::Select, false) => Route::None,
        (InteractionMode::Sculpt, true)
        | (InteractionMode::Paint, true)
        | (InteractionMode::Select, true) => Route::None,
    }
}
