use crate::camera::PerspectiveCamera;
use glam::{Mat4, Vec3};
use tidewater_common::{Color, Viewport};
use tidewater_waves::WaveSettings;

/// Background colour behind the water.
pub const CLEAR_COLOR_HEX: &str = "#fdd8b5";

/// The single water plane: a subdivided rectangle laid flat in XZ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterMesh {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    /// Rotation about X applied to the XY-plane geometry.
    pub rotation_x: f32,
}

impl Default for WaterMesh {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 10.0,
            width_segments: 512,
            height_segments: 512,
            rotation_x: -std::f32::consts::FRAC_PI_2,
        }
    }
}

impl WaterMesh {
    pub fn vertex_count(&self) -> u32 {
        (self.width_segments + 1) * (self.height_segments + 1)
    }

    pub fn index_count(&self) -> u32 {
        self.width_segments * self.height_segments * 6
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotation_x)
    }

    /// Half extents of the plane on the world X and Z axes.
    pub fn half_extents(&self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }
}

/// Everything a renderer needs to draw one frame of water.
#[derive(Debug, Clone)]
pub struct WaterScene {
    pub settings: WaveSettings,
    pub mesh: WaterMesh,
    pub viewport: Viewport,
    pub clear_color: Color,
    time: f32,
}

impl WaterScene {
    pub fn new(settings: WaveSettings, viewport: Viewport) -> Self {
        Self {
            settings,
            mesh: WaterMesh::default(),
            viewport,
            clear_color: Color::from_srgb_u8([0xfd, 0xd8, 0xb5]),
            time: 0.0,
        }
    }

    /// Current value of the time uniform, in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Write the elapsed time into the time uniform.
    pub fn advance(&mut self, elapsed: f32) {
        self.time = elapsed;
    }

    /// Record a new viewport size and keep the camera projection in step.
    pub fn resize(&mut self, width: u32, height: u32, camera: &mut PerspectiveCamera) {
        self.viewport.resize(width, height);
        camera.set_aspect(self.viewport.aspect());
        tracing::debug!(
            "viewport resized to {}x{} (aspect {:.3})",
            self.viewport.width,
            self.viewport.height,
            camera.aspect()
        );
    }

    /// Clear colour with the sRGB curve removed, for sRGB render targets.
    pub fn clear_color_linear(&self) -> Vec3 {
        self.clear_color.to_linear()
    }
}
