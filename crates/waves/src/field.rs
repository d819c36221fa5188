//! Host-side evaluation of the water displacement.
//!
//! Mirrors the wgpu backend's WGSL vertex shader line for line: a primary
//! wave built from the product of two sines, minus `small_waves_iterations`
//! octaves of rectified sine ripples whose amplitude falls off as `1 / i`.

use crate::settings::WaveSettings;
use glam::Vec3;

/// Vertical displacement at world position `(x, z)` and time `t` (seconds).
pub fn elevation(s: &WaveSettings, x: f32, z: f32, t: f32) -> f32 {
    let phase = t * s.waves_speed;
    let mut e = (x * s.waves_frequency.x + phase).sin()
        * (z * s.waves_frequency.y + phase).sin()
        * s.waves_elevation;

    let ripple_phase = t * s.small_waves_speed;
    for i in 1..=s.small_waves_iterations {
        let i = i as f32;
        let px = x * s.small_waves_frequency * i;
        let pz = z * s.small_waves_frequency * i;
        let ripple = (px + ripple_phase + i).sin() * (pz - ripple_phase + 2.0 * i).sin();
        e -= ripple.abs() * s.small_waves_elevation / i;
    }
    e
}

/// Blend factor between depth and surface colour for an elevation.
pub fn mix_strength(s: &WaveSettings, elevation: f32) -> f32 {
    (elevation + s.color_offset) * s.color_multiplier
}

/// Linear RGB of the surface at an elevation. Unclamped, like WGSL `mix`.
pub fn surface_color(s: &WaveSettings, elevation: f32) -> Vec3 {
    let depth = s.depth_color().to_linear();
    let surface = s.surface_color().to_linear();
    depth.lerp(surface, mix_strength(s, elevation))
}

/// One evaluated point of the water surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSample {
    pub elevation: f32,
    pub color: Vec3,
}

/// Borrowing view that samples the surface for a fixed settings record.
#[derive(Debug, Clone, Copy)]
pub struct WaveField<'a> {
    settings: &'a WaveSettings,
}

impl<'a> WaveField<'a> {
    pub fn new(settings: &'a WaveSettings) -> Self {
        Self { settings }
    }

    pub fn elevation(&self, x: f32, z: f32, t: f32) -> f32 {
        elevation(self.settings, x, z, t)
    }

    pub fn sample(&self, x: f32, z: f32, t: f32) -> WaveSample {
        let e = self.elevation(x, z, t);
        WaveSample {
            elevation: e,
            color: surface_color(self.settings, e),
        }
    }

    /// Elevations on a `cols` x `rows` lattice spanning `[-half, half]` on both axes,
    /// row-major with z increasing per row.
    pub fn grid(&self, half: f32, cols: usize, rows: usize, t: f32) -> Vec<f32> {
        let coord = |i: usize, n: usize| {
            if n <= 1 {
                0.0
            } else {
                -half + 2.0 * half * i as f32 / (n - 1) as f32
            }
        };
        let mut out = Vec::with_capacity(cols * rows);
        for r in 0..rows {
            let z = coord(r, rows);
            for c in 0..cols {
                out.push(self.elevation(coord(c, cols), z, t));
            }
        }
        out
    }

    /// Upper bound on `|elevation|` for these settings.
    pub fn amplitude_bound(&self) -> f32 {
        let s = self.settings;
        let ripples: f32 = (1..=s.small_waves_iterations).map(|i| 1.0 / i as f32).sum();
        s.waves_elevation.abs() + s.small_waves_elevation.abs() * ripples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_inputs_give_equal_outputs() {
        let s = WaveSettings::default();
        let field = WaveField::new(&s);
        for &(x, z, t) in &[(0.0, 0.0, 0.0), (1.3, -2.7, 4.2), (-5.0, 5.0, 123.456)] {
            assert_eq!(field.sample(x, z, t), field.sample(x, z, t));
        }
    }

    #[test]
    fn small_time_step_gives_small_change() {
        let s = WaveSettings::default();
        let field = WaveField::new(&s);
        // d(elevation)/dt is bounded by the sum of amplitude * frequency terms.
        let max_rate = 2.0 * s.waves_elevation * s.waves_speed
            + (1..=s.small_waves_iterations)
                .map(|i| 2.0 * s.small_waves_elevation * s.small_waves_speed / i as f32)
                .sum::<f32>();
        let dt = 1e-3;
        for step in 0..200 {
            let t = step as f32 * 0.05;
            for &(x, z) in &[(0.0, 0.0), (2.5, -1.0), (-4.0, 3.3)] {
                let a = field.elevation(x, z, t);
                let b = field.elevation(x, z, t + dt);
                assert!((a - b).abs() <= max_rate * dt + 1e-5, "jump at t={t}");
            }
        }
    }

    #[test]
    fn flat_when_all_elevations_zero() {
        let mut s = WaveSettings::default();
        s.waves_elevation = 0.0;
        s.small_waves_elevation = 0.0;
        assert!(WaveField::new(&s).grid(5.0, 9, 9, 3.0).iter().all(|&e| e == 0.0));
    }

    #[test]
    fn zero_iterations_leaves_only_primary_wave() {
        let mut s = WaveSettings::default();
        s.small_waves_iterations = 0;
        let x = 0.4;
        let z = -1.1;
        let t = 2.0;
        let expected = (x * s.waves_frequency.x + t * s.waves_speed).sin()
            * (z * s.waves_frequency.y + t * s.waves_speed).sin()
            * s.waves_elevation;
        assert_eq!(elevation(&s, x, z, t), expected);
    }

    #[test]
    fn ripples_only_push_the_surface_down() {
        let mut primary_only = WaveSettings::default();
        primary_only.small_waves_iterations = 0;
        let full = WaveSettings::default();
        for &(x, z, t) in &[(0.1, 0.2, 0.3), (3.0, -2.0, 9.0), (-1.5, 4.5, 0.0)] {
            assert!(elevation(&full, x, z, t) <= elevation(&primary_only, x, z, t));
        }
    }

    #[test]
    fn elevation_stays_within_bound() {
        let s = WaveSettings::default();
        let field = WaveField::new(&s);
        let bound = field.amplitude_bound();
        for e in field.grid(5.0, 33, 33, 1.7) {
            assert!(e.abs() <= bound + 1e-6);
        }
    }

    #[test]
    fn colour_blend_endpoints() {
        let s = WaveSettings::default();
        // mix == 0 -> depth colour, mix == 1 -> surface colour.
        let at_depth = -s.color_offset;
        let at_surface = 1.0 / s.color_multiplier - s.color_offset;
        let d = surface_color(&s, at_depth);
        let u = surface_color(&s, at_surface);
        assert!((d - s.depth_color().to_linear()).length() < 1e-5);
        assert!((u - s.surface_color().to_linear()).length() < 1e-5);
    }

    #[test]
    fn grid_has_requested_shape() {
        let s = WaveSettings::default();
        let g = WaveField::new(&s).grid(5.0, 7, 3, 0.0);
        assert_eq!(g.len(), 21);
        let single = WaveField::new(&s).grid(5.0, 1, 1, 0.0);
        assert_eq!(single, vec![elevation(&s, 0.0, 0.0, 0.0)]);
    }
}
