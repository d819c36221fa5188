//! Pointer-driven camera orbiting.
//!
//! # Invariants
//! - Windowing events are translated by the application into `PointerButton`
//!   and cursor positions; this crate never sees platform types.
//! - Controls only move the camera; they never touch wave settings.

pub mod action;
pub mod orbit;

pub use action::{DragTracker, PointerAction, PointerButton};
pub use orbit::OrbitControls;
