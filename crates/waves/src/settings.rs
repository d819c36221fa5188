use glam::Vec2;
use serde::{Deserialize, Serialize};
use tidewater_common::{Color, ColorError};

/// Slider bounds for one tunable parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Panel folder a parameter is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Folder {
    Waves,
    SmallWaves,
    Colors,
}

impl Folder {
    pub const ALL: [Folder; 3] = [Folder::Waves, Folder::SmallWaves, Folder::Colors];

    pub fn title(self) -> &'static str {
        match self {
            Folder::Waves => "Waves",
            Folder::SmallWaves => "Small waves",
            Folder::Colors => "Colors",
        }
    }
}

/// A scalar field of [`WaveSettings`] exposed to the debug panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    WavesElevation,
    WavesFrequencyX,
    WavesFrequencyY,
    WavesSpeed,
    SmallWavesElevation,
    SmallWavesFrequency,
    SmallWavesSpeed,
    SmallWavesIterations,
    ColorOffset,
    ColorMultiplier,
}

impl Param {
    pub const ALL: [Param; 10] = [
        Param::WavesElevation,
        Param::WavesFrequencyX,
        Param::WavesFrequencyY,
        Param::WavesSpeed,
        Param::SmallWavesElevation,
        Param::SmallWavesFrequency,
        Param::SmallWavesSpeed,
        Param::SmallWavesIterations,
        Param::ColorOffset,
        Param::ColorMultiplier,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Param::WavesElevation => "wavesElevation",
            Param::WavesFrequencyX => "wavesFrequencyX",
            Param::WavesFrequencyY => "wavesFrequencyY",
            Param::WavesSpeed => "wavesSpeed",
            Param::SmallWavesElevation => "smallWavesElevation",
            Param::SmallWavesFrequency => "smallWavesFrequency",
            Param::SmallWavesSpeed => "smallWavesSpeed",
            Param::SmallWavesIterations => "smallWavesIterations",
            Param::ColorOffset => "colorOffset",
            Param::ColorMultiplier => "colorMultiplier",
        }
    }

    pub fn folder(self) -> Folder {
        match self {
            Param::WavesElevation
            | Param::WavesFrequencyX
            | Param::WavesFrequencyY
            | Param::WavesSpeed => Folder::Waves,
            Param::SmallWavesElevation
            | Param::SmallWavesFrequency
            | Param::SmallWavesSpeed
            | Param::SmallWavesIterations => Folder::SmallWaves,
            Param::ColorOffset | Param::ColorMultiplier => Folder::Colors,
        }
    }

    pub fn range(self) -> ParamRange {
        match self {
            Param::WavesElevation => ParamRange::new(0.0, 1.0, 0.001),
            Param::WavesFrequencyX | Param::WavesFrequencyY => ParamRange::new(0.0, 10.0, 0.001),
            Param::WavesSpeed => ParamRange::new(0.0, 4.0, 0.001),
            Param::SmallWavesElevation => ParamRange::new(0.0, 1.0, 0.001),
            Param::SmallWavesFrequency => ParamRange::new(0.0, 30.0, 0.001),
            Param::SmallWavesSpeed => ParamRange::new(0.0, 4.0, 0.001),
            Param::SmallWavesIterations => ParamRange::new(0.0, 10.0, 1.0),
            Param::ColorOffset => ParamRange::new(0.0, 1.0, 0.001),
            Param::ColorMultiplier => ParamRange::new(0.0, 10.0, 0.001),
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Param::SmallWavesIterations)
    }

    pub fn get(self, s: &WaveSettings) -> f32 {
        match self {
            Param::WavesElevation => s.waves_elevation,
            Param::WavesFrequencyX => s.waves_frequency.x,
            Param::WavesFrequencyY => s.waves_frequency.y,
            Param::WavesSpeed => s.waves_speed,
            Param::SmallWavesElevation => s.small_waves_elevation,
            Param::SmallWavesFrequency => s.small_waves_frequency,
            Param::SmallWavesSpeed => s.small_waves_speed,
            Param::SmallWavesIterations => s.small_waves_iterations as f32,
            Param::ColorOffset => s.color_offset,
            Param::ColorMultiplier => s.color_multiplier,
        }
    }

    /// Write a value. The iteration count rounds to the nearest non-negative integer.
    pub fn set(self, s: &mut WaveSettings, value: f32) {
        match self {
            Param::WavesElevation => s.waves_elevation = value,
            Param::WavesFrequencyX => s.waves_frequency.x = value,
            Param::WavesFrequencyY => s.waves_frequency.y = value,
            Param::WavesSpeed => s.waves_speed = value,
            Param::SmallWavesElevation => s.small_waves_elevation = value,
            Param::SmallWavesFrequency => s.small_waves_frequency = value,
            Param::SmallWavesSpeed => s.small_waves_speed = value,
            Param::SmallWavesIterations => s.small_waves_iterations = value.max(0.0).round() as u32,
            Param::ColorOffset => s.color_offset = value,
            Param::ColorMultiplier => s.color_multiplier = value,
        }
    }
}

/// Which of the two blend colours a colour edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Depth,
    Surface,
}

impl ColorSlot {
    pub const ALL: [ColorSlot; 2] = [ColorSlot::Depth, ColorSlot::Surface];

    pub fn label(self) -> &'static str {
        match self {
            ColorSlot::Depth => "depthColor",
            ColorSlot::Surface => "surfaceColor",
        }
    }
}

/// Every tunable input of the water material.
///
/// Created once at startup, mutated in place by the debug panel, and read
/// each frame when the uniform block is rebuilt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveSettings {
    depth_color: Color,
    surface_color: Color,

    pub waves_elevation: f32,
    pub waves_frequency: Vec2,
    pub waves_speed: f32,

    pub small_waves_elevation: f32,
    pub small_waves_frequency: f32,
    pub small_waves_speed: f32,
    pub small_waves_iterations: u32,

    pub color_offset: f32,
    pub color_multiplier: f32,
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            depth_color: Color::rgb(0x2b as f32 / 255.0, 0xad as f32 / 255.0, 0xf3 as f32 / 255.0),
            surface_color: Color::WHITE,
            waves_elevation: 0.074,
            waves_frequency: Vec2::new(1.748, 0.975),
            waves_speed: 0.75,
            small_waves_elevation: 0.19,
            small_waves_frequency: 1.069,
            small_waves_speed: 0.235,
            small_waves_iterations: 4,
            color_offset: 0.175,
            color_multiplier: 2.676,
        }
    }
}

impl WaveSettings {
    pub fn depth_color(&self) -> Color {
        self.depth_color
    }

    pub fn surface_color(&self) -> Color {
        self.surface_color
    }

    pub fn color(&self, slot: ColorSlot) -> Color {
        match slot {
            ColorSlot::Depth => self.depth_color,
            ColorSlot::Surface => self.surface_color,
        }
    }

    /// Hex string of a colour, as shown by the debug panel.
    pub fn color_hex(&self, slot: ColorSlot) -> String {
        self.color(slot).to_hex()
    }

    pub fn set_color(&mut self, slot: ColorSlot, color: Color) {
        match slot {
            ColorSlot::Depth => self.depth_color = color,
            ColorSlot::Surface => self.surface_color = color,
        }
        tracing::debug!("{} set to {}", slot.label(), color);
    }

    /// Parse and store a hex colour. On error the previous colour is kept.
    pub fn set_color_hex(&mut self, slot: ColorSlot, hex: &str) -> Result<(), ColorError> {
        let color = Color::from_hex(hex)?;
        self.set_color(slot, color);
        Ok(())
    }

    pub fn set_depth_color(&mut self, hex: &str) -> Result<(), ColorError> {
        self.set_color_hex(ColorSlot::Depth, hex)
    }

    pub fn set_surface_color(&mut self, hex: &str) -> Result<(), ColorError> {
        self.set_color_hex(ColorSlot::Surface, hex)
    }

    /// Parameters that fall outside their slider range.
    pub fn out_of_range(&self) -> Vec<Param> {
        Param::ALL
            .into_iter()
            .filter(|p| !p.range().contains(p.get(self)))
            .collect()
    }

    /// Parameters holding NaN or infinity.
    pub fn non_finite(&self) -> Vec<Param> {
        Param::ALL
            .into_iter()
            .filter(|p| !p.get(self).is_finite())
            .collect()
    }

    /// Copy of the settings with every parameter pulled into its slider range.
    pub fn clamped(&self) -> Self {
        let mut out = self.clone();
        for p in Param::ALL {
            p.set(&mut out, p.range().clamp(p.get(self)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_values() {
        let s = WaveSettings::default();
        assert_eq!(s.color_hex(ColorSlot::Depth), "#2badf3");
        assert_eq!(s.color_hex(ColorSlot::Surface), "#ffffff");
        assert_eq!(s.waves_frequency, Vec2::new(1.748, 0.975));
        assert_eq!(s.small_waves_iterations, 4);
    }

    #[test]
    fn defaults_sit_inside_slider_ranges() {
        assert!(WaveSettings::default().out_of_range().is_empty());
    }

    #[test]
    fn setter_rejects_bad_hex_and_keeps_old_value() {
        let mut s = WaveSettings::default();
        let before = s.depth_color();
        assert!(s.set_depth_color("not-a-colour").is_err());
        assert_eq!(s.depth_color(), before);

        s.set_surface_color("#102030").unwrap();
        assert_eq!(s.color_hex(ColorSlot::Surface), "#102030");
    }

    #[test]
    fn iterations_round_through_param() {
        let mut s = WaveSettings::default();
        Param::SmallWavesIterations.set(&mut s, 6.6);
        assert_eq!(s.small_waves_iterations, 7);
        Param::SmallWavesIterations.set(&mut s, -3.0);
        assert_eq!(s.small_waves_iterations, 0);
    }

    #[test]
    fn clamped_pulls_values_into_range() {
        let mut s = WaveSettings::default();
        s.waves_elevation = 5.0;
        s.small_waves_frequency = -1.0;
        s.small_waves_iterations = 40;
        assert_eq!(s.out_of_range().len(), 3);

        let c = s.clamped();
        assert_eq!(c.waves_elevation, 1.0);
        assert_eq!(c.small_waves_frequency, 0.0);
        assert_eq!(c.small_waves_iterations, 10);
        assert!(c.out_of_range().is_empty());
    }

    #[test]
    fn every_param_belongs_to_a_folder_with_a_label() {
        for folder in Folder::ALL {
            assert!(Param::ALL.iter().any(|p| p.folder() == folder));
        }
        for p in Param::ALL {
            assert!(!p.label().is_empty());
        }
    }
}
