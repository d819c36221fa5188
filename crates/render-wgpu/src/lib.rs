//! wgpu render backend for the water demo.
//!
//! Draws one subdivided plane whose vertices are displaced on the GPU by the
//! wave shader. All tunables reach the shader through a single uniform block
//! rebuilt every frame from the scene and camera.
//!
//! # Invariants
//! - Renderer never mutates wave settings.
//! - `WaterUniforms` layout matches the WGSL `WaterUniforms` struct byte for byte.
//! - Pipelines and geometry are created once; resizing only rebuilds the
//!   offscreen colour and depth targets.
//! - The scene is drawn at `Viewport::render_size` and stretched onto the surface.

mod context;
mod gpu;
mod mesh;
mod shaders;
mod uniforms;

pub use context::{GpuContext, RenderError};
pub use gpu::WaterRenderer;
pub use mesh::{PlaneGeometry, PlaneVertex};
pub use shaders::{BLIT_SHADER, WATER_SHADER};
pub use uniforms::WaterUniforms;
