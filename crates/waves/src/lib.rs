//! Water surface parameters and the displacement function that drives them.
//!
//! # Invariants
//! - `field` evaluates the same formula as the WGSL vertex/fragment shaders,
//!   so host samples match what the GPU draws for the same uniforms.
//! - Settings are plain values; ranges are advisory and only enforced by the
//!   debug panel sliders and by `config::load`.

pub mod config;
pub mod field;
pub mod settings;

pub use config::{ConfigError, Format};
pub use field::{WaveField, WaveSample};
pub use settings::{ColorSlot, Folder, Param, ParamRange, WaveSettings};
