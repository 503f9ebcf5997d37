//! Blend weight calculator for Toile.
//!
//! A circular control surface mixes three preset slots. The pointer position
//! inside the circle is turned into three normalized percentage weights, one
//! per slot anchor, recomputed continuously while the pointer drags. A
//! generation action then reads the slots and weights to pick the base shape
//! for a new attachment.

pub mod slots;
pub mod weights;

pub use slots::{BlendSlots, PresetDescriptor};
pub use weights::{weights_for_pointer, BlendWeights};
