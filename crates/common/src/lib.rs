//! Shared value types used across the tidewater crates.

mod types;

pub use types::{Color, ColorError, Viewport};
