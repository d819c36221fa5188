//! Rendering Adapter: the water scene as seen by any renderer.
//!
//! # Invariants
//! - Renderers read the scene and camera; they never mutate settings.
//! - The time uniform only moves forward: it is fed from `FrameClock`, whose
//!   elapsed value is monotonic non-decreasing.
//! - Camera aspect always matches the last recorded viewport.

mod camera;
mod clock;
mod renderer;
mod scene;

pub use camera::PerspectiveCamera;
pub use clock::{FrameClock, FrameTime};
pub use renderer::{DebugTextRenderer, Renderer};
pub use scene::{WaterMesh, WaterScene, CLEAR_COLOR_HEX};

pub fn crate_info() -> &'static str {
    "tidewater-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
