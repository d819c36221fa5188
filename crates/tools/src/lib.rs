//! Developer tooling: the live-tuning debug panel.
//!
//! # Invariants
//! - The panel edits settings in place; colours only change through the
//!   validated setters on `WaveSettings`.

mod panel;

pub use panel::{hex_field_id, DebugPanel, PanelResponse};

pub fn crate_info() -> &'static str {
    "tidewater-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
