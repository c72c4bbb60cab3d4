//! Mouse-driven orbit camera around the block.

use crate::{Vec3, camera::Camera};

pub const DRAG_DEGREES_PER_PIXEL: f32 = 0.3;
pub const PITCH_LIMIT_DEG: f32 = 89.9;
pub const ZOOM_STEP: f32 = 0.5;
pub const MIN_DISTANCE: f32 = 1.0;
pub const MAX_DISTANCE: f32 = 100.0;

const FOV_Y_DEG: f32 = 60.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 1000.0;

/// Spherical camera looking at the origin. Angles are in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Elevation above the XZ plane.
    pub pitch_deg: f32,
    /// Rotation around +Y.
    pub yaw_deg: f32,
    pub distance: f32,
    drag_anchor: Option<(f64, f64)>,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            pitch_deg: 25.0,
            yaw_deg: 30.0,
            distance: 6.0,
            drag_anchor: None,
        }
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn begin_drag(&mut self, cursor: (f64, f64)) {
        self.drag_anchor = Some(cursor);
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Rotate by the cursor motion since the last call. No-op unless dragging.
    pub fn drag_to(&mut self, cursor: (f64, f64)) {
        let Some((last_x, last_y)) = self.drag_anchor else {
            return;
        };
        let dx = (cursor.0 - last_x) as f32;
        let dy = (cursor.1 - last_y) as f32;
        self.drag_anchor = Some(cursor);

        self.yaw_deg -= dx * DRAG_DEGREES_PER_PIXEL;
        self.pitch_deg = (self.pitch_deg - dy * DRAG_DEGREES_PER_PIXEL)
            .clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
    }

    pub fn zoom_in(&mut self) {
        self.distance = (self.distance - ZOOM_STEP).max(MIN_DISTANCE);
    }

    pub fn zoom_out(&mut self) {
        self.distance = (self.distance + ZOOM_STEP).min(MAX_DISTANCE);
    }

    /// Eye position on the sphere of radius `distance`.
    pub fn eye(&self) -> Vec3 {
        let (sin_p, cos_p) = self.pitch_deg.to_radians().sin_cos();
        let (sin_y, cos_y) = self.yaw_deg.to_radians().sin_cos();
        Vec3::new(
            self.distance * sin_y * cos_p,
            self.distance * sin_p,
            self.distance * cos_y * cos_p,
        )
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera::new_perspective(
            self.eye(),
            Vec3::ZERO,
            Vec3::Y,
            FOV_Y_DEG.to_radians(),
            Z_NEAR,
            Z_FAR,
            aspect,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_eye_position() {
        let cam = OrbitCamera::new();
        let eye = cam.eye();
        assert!((eye.length() - 6.0).abs() < 1e-5);
        assert!((eye.y - 6.0 * 25f32.to_radians().sin()).abs() < 1e-5);
        assert!(eye.x > 0.0 && eye.z > 0.0);
    }

    #[test]
    fn drag_rotates_and_clamps_pitch() {
        let mut cam = OrbitCamera::new();
        cam.drag_to((100.0, 100.0));
        assert_eq!(cam, OrbitCamera::new(), "motion without a drag is ignored");

        cam.begin_drag((100.0, 100.0));
        cam.drag_to((110.0, 100.0));
        assert!((cam.yaw_deg - 27.0).abs() < 1e-4);

        cam.drag_to((110.0, -1000.0));
        assert_eq!(cam.pitch_deg, PITCH_LIMIT_DEG);
        cam.drag_to((110.0, 5000.0));
        assert_eq!(cam.pitch_deg, -PITCH_LIMIT_DEG);

        cam.end_drag();
        assert!(!cam.is_dragging());
    }

    #[test]
    fn zoom_is_bounded() {
        let mut cam = OrbitCamera::new();
        for _ in 0..100 {
            cam.zoom_in();
        }
        assert_eq!(cam.distance, MIN_DISTANCE);
        for _ in 0..1000 {
            cam.zoom_out();
        }
        assert_eq!(cam.distance, MAX_DISTANCE);
    }

    #[test]
    fn camera_looks_at_origin() {
        let cam = OrbitCamera::new().camera(4.0 / 3.0);
        assert_eq!(cam.target, Vec3::ZERO);
        assert!(cam.proj_view().to_cols_array().iter().all(|f| f.is_finite()));
    }
}
