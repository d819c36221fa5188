use crate::camera::PerspectiveCamera;
use crate::scene::WaterScene;
use std::fmt::Write;
use tidewater_waves::WaveField;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and camera, then produces output. It never
/// mutates the settings; those belong to the debug panel.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and camera.
    fn render(&self, scene: &WaterScene, camera: &PerspectiveCamera) -> Self::Output;
}

/// Characters from deepest to highest elevation.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Text renderer: a top-down ASCII elevation map of the water plane.
///
/// Useful for CLI output and for checking the wave field without a GPU.
#[derive(Debug, Clone, Copy)]
pub struct DebugTextRenderer {
    pub columns: usize,
    pub rows: usize,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self {
            columns: 64,
            rows: 24,
        }
    }
}

impl DebugTextRenderer {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    fn glyph(elevation: f32, bound: f32) -> char {
        if bound <= 0.0 {
            return RAMP[RAMP.len() / 2] as char;
        }
        let t = ((elevation / bound) * 0.5 + 0.5).clamp(0.0, 1.0);
        let idx = (t * (RAMP.len() - 1) as f32).round() as usize;
        RAMP[idx] as char
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &WaterScene, camera: &PerspectiveCamera) -> String {
        let s = &scene.settings;
        let field = WaveField::new(s);
        let (hx, hz) = scene.mesh.half_extents();
        let time = scene.time();

        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Water (t={:.3}s, {}x{} px) ===",
            time, scene.viewport.width, scene.viewport.height
        );
        let _ = writeln!(
            out,
            "Camera: pos=({:.2}, {:.2}, {:.2}) fov={:.0} aspect={:.3}",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.fov_degrees,
            camera.aspect()
        );
        let _ = writeln!(
            out,
            "Waves: elevation={:.3} frequency=({:.3}, {:.3}) speed={:.3}",
            s.waves_elevation, s.waves_frequency.x, s.waves_frequency.y, s.waves_speed
        );
        let _ = writeln!(
            out,
            "Small waves: elevation={:.3} frequency={:.3} speed={:.3} iterations={}",
            s.small_waves_elevation,
            s.small_waves_frequency,
            s.small_waves_speed,
            s.small_waves_iterations
        );
        let _ = writeln!(
            out,
            "Colors: depth={} surface={} offset={:.3} multiplier={:.3}",
            s.depth_color(),
            s.surface_color(),
            s.color_offset,
            s.color_multiplier
        );

        let bound = field.amplitude_bound();
        let (mut lo, mut hi) = (f32::INFINITY, f32::NEG_INFINITY);
        for r in 0..self.rows {
            let z = lerp_axis(hz, r, self.rows);
            for c in 0..self.columns {
                let e = field.elevation(lerp_axis(hx, c, self.columns), z, time);
                lo = lo.min(e);
                hi = hi.max(e);
                out.push(Self::glyph(e, bound));
            }
            out.push('\n');
        }
        let _ = writeln!(out, "Elevation range: [{lo:.4}, {hi:.4}]");
        out
    }
}

fn lerp_axis(half: f32, i: usize, n: usize) -> f32 {
    if n <= 1 {
        return 0.0;
    }
    -half + 2.0 * half * i as f32 / (n - 1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidewater_common::Viewport;
    use tidewater_waves::WaveSettings;

    fn scene() -> WaterScene {
        WaterScene::new(WaveSettings::default(), Viewport::default())
    }

    #[test]
    fn header_and_grid_shape() {
        let renderer = DebugTextRenderer::new(16, 4);
        let out = renderer.render(&scene(), &PerspectiveCamera::default());

        assert!(out.contains("t=0.000s"));
        assert!(out.contains("depth=#2badf3"));
        let grid: Vec<&str> = out.lines().filter(|l| l.len() == 16).collect();
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn same_time_renders_identically() {
        let renderer = DebugTextRenderer::default();
        let camera = PerspectiveCamera::default();
        let mut a = scene();
        let mut b = scene();
        a.advance(3.5);
        b.advance(3.5);
        assert_eq!(renderer.render(&a, &camera), renderer.render(&b, &camera));
    }

    #[test]
    fn flat_water_uses_middle_glyph() {
        let mut s = scene();
        s.settings.waves_elevation = 0.0;
        s.settings.small_waves_elevation = 0.0;
        let out = DebugTextRenderer::new(8, 2).render(&s, &PerspectiveCamera::default());
        assert!(out.contains("\n++++++++\n++++++++\n"));
    }
}
