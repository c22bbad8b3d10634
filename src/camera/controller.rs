use glam::{Mat4, Vec3};

use super::state::{CameraState, Projection, MAX_ZOOM, MIN_ZOOM};
use crate::options::CameraOptions;

/// Orbit camera: turns pixel-space drag and scroll input into
/// [`CameraState`] changes and composes the MVP matrix.
///
/// Every mutating method returns `true` when the state actually changed, so
/// the caller re-uploads the uniform only when it has to.
#[derive(Debug, Clone)]
pub struct CameraController {
    state: CameraState,
    projection: Projection,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
}

impl CameraController {
    /// Controller at identity state with the given parameters.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        Self {
            state: CameraState::default(),
            projection: Projection {
                fovy: options.fovy,
                znear: options.znear,
                zfar: options.zfar,
                distance: options.distance,
            },
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
        }
    }

    /// Current accumulated state.
    #[must_use]
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Projection parameters.
    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Orbit by a pixel delta. Horizontal motion turns about Y, vertical
    /// about X.
    pub fn rotate(&mut self, dx: f32, dy: f32) -> bool {
        if dx == 0.0 && dy == 0.0 {
            return false;
        }
        self.state.rotation_y += dx * self.rotate_speed;
        self.state.rotation_x += dy * self.rotate_speed;
        true
    }

    /// Pan by a pixel delta so the object follows the cursor under the
    /// current rotation.
    ///
    /// The delta is converted to NDC (Y flipped) and un-rotated by the
    /// transpose of [`CameraState::rotation_matrix`] before accumulating.
    /// A zero-sized viewport ignores the input.
    pub fn pan(&mut self, dx: f32, dy: f32, viewport: (u32, u32)) -> bool {
        let (width, height) = viewport;
        if width == 0 || height == 0 || (dx == 0.0 && dy == 0.0) {
            return false;
        }
        let ndc = Vec3::new(
            dx * 2.0 / width as f32,
            dy * -2.0 / height as f32,
            0.0,
        );
        let object_delta = self.state.rotation_matrix().transpose() * ndc;
        self.state.translation += object_delta * self.pan_speed;
        true
    }

    /// Apply one zoom input, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn zoom(&mut self, delta: f32) -> bool {
        let zoom = (self.state.zoom + delta * self.zoom_speed).clamp(MIN_ZOOM, MAX_ZOOM);
        if zoom == self.state.zoom {
            return false;
        }
        self.state.zoom = zoom;
        true
    }

    /// Back to identity state. Returns `false` if already there.
    pub fn reset(&mut self) -> bool {
        let changed = self.state != CameraState::default();
        self.state = CameraState::default();
        changed
    }

    /// `Projection * View * Rotation * Translation * Scale` for the given
    /// viewport size. A zero height is treated as square.
    #[must_use]
    pub fn mvp(&self, viewport: (u32, u32)) -> Mat4 {
        let (width, height) = viewport;
        let aspect = if height == 0 || width == 0 {
            1.0
        } else {
            width as f32 / height as f32
        };
        self.projection.projection_matrix(aspect)
            * self.projection.view_matrix()
            * self.state.model_matrix()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use glam::Vec4;

    use super::*;

    fn controller() -> CameraController {
        CameraController::new(&CameraOptions::default())
    }

    #[test]
    fn rotation_accumulates_linearly() {
        let mut split = controller();
        for _ in 0..10 {
            assert!(split.rotate(3.0, -1.5));
        }
        let mut single = controller();
        assert!(single.rotate(30.0, -15.0));

        assert_relative_eq!(split.state().rotation_y, single.state().rotation_y, max_relative = 1e-5);
        assert_relative_eq!(split.state().rotation_x, single.state().rotation_x, max_relative = 1e-5);
        assert_abs_diff_eq!(single.state().rotation_y, 0.3, epsilon = 1e-6);
    }

    #[test]
    fn rotation_is_unbounded() {
        let mut camera = controller();
        for _ in 0..100 {
            let _ = camera.rotate(100.0, 0.0);
        }
        // 100 drags of 1 rad each, never wrapped.
        assert_abs_diff_eq!(camera.state().rotation_y, 100.0, epsilon = 1e-3);
    }

    #[test]
    fn zero_motion_is_not_a_change() {
        let mut camera = controller();
        assert!(!camera.rotate(0.0, 0.0));
        assert!(!camera.pan(0.0, 0.0, (800, 600)));
        assert!(!camera.zoom(0.0));
    }

    #[test]
    fn zoom_stays_clamped() {
        let mut camera = controller();
        let deltas = [5.0, 200.0, -3.0, -1000.0, 0.5, 77.0, -0.25, -400.0, 12.0];
        for delta in deltas {
            let _ = camera.zoom(delta);
            let zoom = camera.state().zoom;
            assert!((MIN_ZOOM..=MAX_ZOOM).contains(&zoom), "zoom {zoom} escaped");
        }
    }

    #[test]
    fn zoom_is_idempotent_at_the_floor() {
        let mut camera = controller();
        let _ = camera.zoom(-1000.0);
        assert_eq!(camera.state().zoom, MIN_ZOOM);
        assert!(!camera.zoom(-1.0));
        assert_eq!(camera.state().zoom, MIN_ZOOM);
    }

    #[test]
    fn zoom_in_then_out_returns_home() {
        let mut camera = controller();
        assert!(camera.zoom(3.0));
        assert!(camera.zoom(-3.0));
        assert_abs_diff_eq!(camera.state().zoom, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn zoom_round_trip_breaks_at_the_ceiling() {
        let mut camera = controller();
        let _ = camera.zoom(500.0);
        let _ = camera.zoom(-50.0);
        // Clamped to 10.0 first, so 10.0 - 5.0 instead of 1.0.
        assert_abs_diff_eq!(camera.state().zoom, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn pan_at_identity_is_horizontal() {
        let mut camera = controller();
        assert!(camera.pan(40.0, 0.0, (800, 600)));
        let t = camera.state().translation;
        assert_abs_diff_eq!(t.x, 0.1, epsilon = 1e-6);
        assert_eq!(t.y, 0.0);
        assert_eq!(t.z, 0.0);
    }

    #[test]
    fn pan_flips_pixel_y() {
        let mut camera = controller();
        let _ = camera.pan(0.0, 30.0, (800, 600));
        let t = camera.state().translation;
        assert_abs_diff_eq!(t.y, -0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(t.x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn pan_under_quarter_turn_moves_along_local_z() {
        let mut camera = controller();
        // rotate_speed 0.01 rad/px: 50π px is a quarter turn about Y.
        let _ = camera.rotate(FRAC_PI_2 / 0.01, 0.0);
        assert_abs_diff_eq!(camera.state().rotation_y, FRAC_PI_2, epsilon = 1e-5);

        assert!(camera.pan(40.0, 0.0, (800, 600)));
        let t = camera.state().translation;
        assert!(t.z.abs() > 100.0 * t.x.abs(), "translation {t} not along Z");
        assert_abs_diff_eq!(t.z, 0.1, epsilon = 1e-5);

        // The rotated translation lands back on screen-space +X.
        let on_screen = camera.state().rotation_matrix() * t;
        assert_abs_diff_eq!(on_screen.x, 0.1, epsilon = 1e-5);
        assert_abs_diff_eq!(on_screen.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn pan_compensation_matches_forward_rotation_everywhere() {
        let mut camera = controller();
        let _ = camera.rotate(73.0, -41.0);
        let _ = camera.pan(-25.0, 60.0, (1024, 768));
        let screen = camera.state().rotation_matrix() * camera.state().translation;
        assert_abs_diff_eq!(screen.x, -25.0 * 2.0 / 1024.0, epsilon = 1e-5);
        assert_abs_diff_eq!(screen.y, 60.0 * -2.0 / 768.0, epsilon = 1e-5);
        assert_abs_diff_eq!(screen.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn pan_ignores_empty_viewport() {
        let mut camera = controller();
        assert!(!camera.pan(10.0, 10.0, (0, 600)));
        assert_eq!(camera.state().translation, Vec3::ZERO);
    }

    #[test]
    fn reset_restores_identity() {
        let mut camera = controller();
        assert!(!camera.reset());
        let _ = camera.rotate(5.0, 5.0);
        let _ = camera.zoom(2.0);
        assert!(camera.reset());
        assert_eq!(*camera.state(), CameraState::default());
    }

    #[test]
    fn mvp_composes_projection_view_model() {
        let mut camera = controller();
        let _ = camera.rotate(12.0, 34.0);
        let _ = camera.pan(5.0, -7.0, (640, 480));
        let _ = camera.zoom(4.0);

        let viewport = (640, 480);
        let p = camera.projection();
        let expected = p.projection_matrix(640.0 / 480.0)
            * p.view_matrix()
            * camera.state().model_matrix();
        assert_eq!(camera.mvp(viewport), expected);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let camera = controller();
        let clip = camera.mvp((800, 600)) * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert_abs_diff_eq!(ndc.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(ndc.y, 0.0, epsilon = 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn aspect_follows_viewport() {
        let camera = controller();
        let point = Vec4::new(0.5, 0.0, 0.0, 1.0);
        let wide = camera.mvp((1600, 600)) * point;
        let square = camera.mvp((600, 600)) * point;
        // Wider viewport, same point lands closer to the center horizontally.
        assert!(wide.x / wide.w < square.x / square.w);
        // Degenerate viewport falls back to square instead of dividing by 0.
        assert_eq!(camera.mvp((600, 0)), camera.mvp((600, 600)));
    }
}
