use bytemuck::{Pod, Zeroable};
use tidewater_render::{PerspectiveCamera, WaterScene};

/// CPU mirror of the WGSL `WaterUniforms` block (208 bytes, 16-byte aligned).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct WaterUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub depth_color: [f32; 4],
    pub surface_color: [f32; 4],
    pub waves_frequency: [f32; 2],
    pub time: f32,
    pub waves_elevation: f32,
    pub waves_speed: f32,
    pub small_waves_elevation: f32,
    pub small_waves_frequency: f32,
    pub small_waves_speed: f32,
    pub small_waves_iterations: u32,
    pub color_offset: f32,
    pub color_multiplier: f32,
    pub _pad: f32,
}

impl WaterUniforms {
    /// Snapshot the scene and camera into the layout the shader reads.
    pub fn new(scene: &WaterScene, camera: &PerspectiveCamera) -> Self {
        let s = &scene.settings;
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            model: scene.mesh.model_matrix().to_cols_array_2d(),
            depth_color: s.depth_color().to_linear().extend(1.0).to_array(),
            surface_color: s.surface_color().to_linear().extend(1.0).to_array(),
            waves_frequency: s.waves_frequency.to_array(),
            time: scene.time(),
            waves_elevation: s.waves_elevation,
            waves_speed: s.waves_speed,
            small_waves_elevation: s.small_waves_elevation,
            small_waves_frequency: s.small_waves_frequency,
            small_waves_speed: s.small_waves_speed,
            small_waves_iterations: s.small_waves_iterations,
            color_offset: s.color_offset,
            color_multiplier: s.color_multiplier,
            _pad: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidewater_common::{Color, Viewport};
    use tidewater_waves::WaveSettings;

    fn scene() -> WaterScene {
        WaterScene::new(WaveSettings::default(), Viewport::default())
    }

    #[test]
    fn layout_size_matches_wgsl() {
        assert_eq!(std::mem::size_of::<WaterUniforms>(), 208);
        assert_eq!(std::mem::size_of::<WaterUniforms>() % 16, 0);
        assert_eq!(std::mem::offset_of!(WaterUniforms, waves_frequency), 160);
        assert_eq!(std::mem::offset_of!(WaterUniforms, small_waves_iterations), 192);
    }

    #[test]
    fn defaults_flow_into_uniforms() {
        let u = WaterUniforms::new(&scene(), &PerspectiveCamera::default());
        assert_eq!(u.waves_elevation, 0.074);
        assert_eq!(u.waves_frequency, [1.748, 0.975]);
        assert_eq!(u.small_waves_iterations, 4);
        assert_eq!(u.time, 0.0);
        assert_eq!(u.surface_color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn colour_edit_updates_colour_uniform() {
        let mut scene = scene();
        let camera = PerspectiveCamera::default();
        let before = WaterUniforms::new(&scene, &camera);

        scene.settings.set_depth_color("#ff8000").unwrap();
        let after = WaterUniforms::new(&scene, &camera);

        let expected = Color::from_hex("#ff8000").unwrap().to_linear();
        assert_ne!(before.depth_color, after.depth_color);
        assert_eq!(after.depth_color, expected.extend(1.0).to_array());
        assert_eq!(before.surface_color, after.surface_color);
    }

    #[test]
    fn time_uniform_follows_scene() {
        let mut scene = scene();
        scene.advance(12.5);
        let u = WaterUniforms::new(&scene, &PerspectiveCamera::default());
        assert_eq!(u.time, 12.5);
    }

    #[test]
    fn camera_aspect_changes_view_projection() {
        let scene = scene();
        let mut camera = PerspectiveCamera::default();
        let a = WaterUniforms::new(&scene, &camera);
        camera.set_aspect(1.0);
        let b = WaterUniforms::new(&scene, &camera);
        assert_ne!(a.view_proj, b.view_proj);
        assert_eq!(a.model, b.model);
    }

    #[test]
    fn bytes_are_castable() {
        let u = WaterUniforms::new(&scene(), &PerspectiveCamera::default());
        assert_eq!(bytemuck::bytes_of(&u).len(), 208);
    }
}
