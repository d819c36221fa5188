//! Orbit camera controls with damping.
//!
//! The camera position is kept in spherical coordinates around a target.
//! Gestures accumulate deltas; `update` applies a fraction of them each frame
//! (when damping is on) so motion eases out after the pointer is released.

use crate::action::PointerAction;
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};
use tidewater_render::PerspectiveCamera;

const EPS: f32 = 1e-6;
/// Closest the camera may get to the target, whatever `min_distance` says.
const MIN_RADIUS: f32 = 1e-3;
/// Camera displacement below this counts as standing still.
const MOVE_EPS: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    /// Polar angle from +Y.
    phi: f32,
    /// Azimuth around +Y, measured from +Z toward +X.
    theta: f32,
}

impl Spherical {
    /// `None` when the offset is too short to carry a direction.
    fn from_offset(v: Vec3) -> Option<Self> {
        let radius = v.length();
        if !radius.is_finite() || radius < EPS {
            return None;
        }
        Some(Self {
            radius,
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
            theta: v.x.atan2(v.z),
        })
    }

    /// Orbit of the default camera, used until a real one has been seen.
    fn fallback() -> Self {
        Self::from_offset(PerspectiveCamera::default().position).unwrap_or(Self {
            radius: 1.0,
            phi: PI * 0.5,
            theta: 0.0,
        })
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

/// Orbit controls: rotate around, dolly toward, and pan the look-at target.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per update.
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
    last_orbit: Spherical,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            last_orbit: Spherical::fallback(),
        }
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Queue a rotation for a cursor delta in pixels. A drag across the full
    /// viewport height turns the camera one full revolution.
    pub fn rotate(&mut self, delta_px: Vec2, viewport_height: u32) {
        let h = viewport_height.max(1) as f32;
        self.delta_theta -= TAU * delta_px.x / h * self.rotate_speed;
        self.delta_phi -= TAU * delta_px.y / h * self.rotate_speed;
    }

    /// Queue a dolly. Positive steps move toward the target.
    pub fn dolly(&mut self, steps: f32) {
        self.scale *= 0.95_f32.powf(steps * self.zoom_speed);
    }

    /// Queue a pan for a cursor delta in pixels, in the camera's screen plane.
    pub fn pan(&mut self, delta_px: Vec2, camera: &PerspectiveCamera, viewport_height: u32) {
        let h = viewport_height.max(1) as f32;
        let offset = camera.position - self.target;
        let distance = offset.length() * (camera.fov_radians() * 0.5).tan();
        let forward = (-offset).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);

        let dx = 2.0 * delta_px.x * distance / h * self.pan_speed;
        let dy = 2.0 * delta_px.y * distance / h * self.pan_speed;
        self.pan_offset += -right * dx + up * dy;
    }

    pub fn apply(&mut self, action: PointerAction, camera: &PerspectiveCamera, viewport_height: u32) {
        match action {
            PointerAction::Rotate(d) => self.rotate(d, viewport_height),
            PointerAction::Pan(d) => self.pan(d, camera, viewport_height),
            PointerAction::Zoom(steps) => self.dolly(steps),
            PointerAction::None => {}
        }
    }

    /// True while queued motion is still being applied.
    pub fn is_moving(&self) -> bool {
        self.delta_theta.abs() > EPS
            || self.delta_phi.abs() > EPS
            || (self.scale - 1.0).abs() > EPS
            || self.pan_offset.length_squared() > EPS * EPS
    }

    /// Move the camera by the pending motion. Call once per frame.
    /// Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let mut s = match Spherical::from_offset(camera.position - self.target) {
            Some(s) => s,
            None => {
                tracing::warn!("camera collapsed onto its target; restoring last orbit");
                self.last_orbit
            }
        };
        let k = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        s.theta += self.delta_theta * k;
        s.phi += self.delta_phi * k;
        s.phi = s
            .phi
            .clamp(self.min_polar_angle.max(EPS), self.max_polar_angle.min(PI - EPS));
        let min_radius = self.min_distance.max(MIN_RADIUS);
        s.radius = (s.radius * self.scale).clamp(min_radius, self.max_distance.max(min_radius));
        self.last_orbit = s;

        self.target += self.pan_offset * k;

        let new_position = self.target + s.to_offset();
        let moved = (new_position - camera.position).length_squared() > MOVE_EPS * MOVE_EPS
            || camera.target != self.target;
        camera.position = new_position;
        camera.target = self.target;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        if moved {
            tracing::trace!(
                "camera at ({:.2}, {:.2}, {:.2})",
                camera.position.x,
                camera.position.y,
                camera.position.z
            );
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::default()
    }

    #[test]
    fn spherical_round_trip() {
        let v = Vec3::new(1.0, 0.5, 5.0);
        let back = Spherical::from_offset(v).map(Spherical::to_offset);
        assert!(back.is_some_and(|b| (b - v).length() < 1e-5));
        assert_eq!(Spherical::from_offset(Vec3::ZERO), None);
    }

    #[test]
    fn zooming_in_all_the_way_can_still_zoom_out() {
        let mut cam = camera();
        let mut controls = OrbitControls::default();
        for _ in 0..320 {
            controls.dolly(1.0);
            controls.update(&mut cam);
        }
        assert!(cam.position.length() >= MIN_RADIUS * 0.99);
        assert!(!cam.view_projection().is_nan());

        for _ in 0..320 {
            controls.dolly(-1.0);
            controls.update(&mut cam);
        }
        assert!(cam.position.length() > 1.0);
        assert!(!cam.view_projection().is_nan());
    }

    #[test]
    fn camera_on_target_is_moved_back_onto_an_orbit() {
        let mut cam = camera();
        cam.position = Vec3::ZERO;
        let mut controls = OrbitControls::default();
        controls.update(&mut cam);
        assert!(cam.position.is_finite());
        assert!(cam.position.length() > MIN_RADIUS);
        assert!(!cam.view_projection().is_nan());
    }

    #[test]
    fn idle_update_keeps_camera_still() {
        let mut cam = camera();
        let start = cam.position;
        let mut controls = OrbitControls::default();
        assert!(!controls.update(&mut cam));
        assert!((cam.position - start).length() < 1e-5);
    }

    #[test]
    fn rotate_preserves_distance_to_target() {
        let mut cam = camera();
        let dist = cam.position.length();
        let mut controls = OrbitControls::default();
        controls.rotate(Vec2::new(120.0, 30.0), 720);
        for _ in 0..60 {
            controls.update(&mut cam);
        }
        assert!((cam.position.length() - dist).abs() < 1e-4);
        assert_ne!(cam.position, camera().position);
    }

    #[test]
    fn damping_eases_out() {
        let mut cam = camera();
        let mut controls = OrbitControls::default();
        controls.rotate(Vec2::new(200.0, 0.0), 720);

        let p0 = cam.position;
        controls.update(&mut cam);
        let first_step = (cam.position - p0).length();
        for _ in 0..100 {
            controls.update(&mut cam);
        }
        let p1 = cam.position;
        controls.update(&mut cam);
        let late_step = (cam.position - p1).length();

        assert!(first_step > 0.0);
        assert!(late_step < first_step);
        assert!(controls.is_moving());
    }

    #[test]
    fn without_damping_motion_applies_at_once() {
        let mut cam = camera();
        let mut controls = OrbitControls {
            enable_damping: false,
            ..OrbitControls::default()
        };
        controls.rotate(Vec2::new(90.0, 0.0), 360);
        assert!(controls.update(&mut cam));
        assert!(!controls.is_moving());
        assert!(!controls.update(&mut cam));
    }

    #[test]
    fn polar_angle_never_flips_over_the_pole() {
        let mut cam = camera();
        let mut controls = OrbitControls {
            enable_damping: false,
            ..OrbitControls::default()
        };
        let dist = cam.position.length();
        controls.rotate(Vec2::new(0.0, 10_000.0), 100);
        controls.update(&mut cam);
        assert!(cam.position.is_finite());
        assert!(cam.position.y > 0.0);
        assert!((cam.position.length() - dist).abs() < 1e-4);
        assert!(!cam.view_projection().is_nan());
    }

    #[test]
    fn dolly_moves_toward_target_and_respects_min_distance() {
        let mut cam = camera();
        let start = cam.position.length();
        let mut controls = OrbitControls {
            enable_damping: false,
            min_distance: 2.0,
            ..OrbitControls::default()
        };
        controls.dolly(3.0);
        controls.update(&mut cam);
        assert!(cam.position.length() < start);

        controls.dolly(500.0);
        controls.update(&mut cam);
        assert!((cam.position.length() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn pan_moves_target_with_camera() {
        let mut cam = camera();
        let offset_before = cam.position - cam.target;
        let mut controls = OrbitControls {
            enable_damping: false,
            ..OrbitControls::default()
        };
        controls.pan(Vec2::new(50.0, 0.0), &cam, 720);
        controls.update(&mut cam);

        assert_ne!(controls.target, Vec3::ZERO);
        assert_eq!(cam.target, controls.target);
        assert!(((cam.position - cam.target) - offset_before).length() < 1e-4);
    }
}
