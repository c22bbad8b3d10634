use glam::{Mat3, Mat4, Vec3};

/// Smallest zoom factor.
pub const MIN_ZOOM: f32 = 0.1;
/// Largest zoom factor.
pub const MAX_ZOOM: f32 = 10.0;

/// Accumulated orbit camera input.
///
/// Rotation angles grow without wrapping; only the trigonometry in
/// [`rotation_matrix`](Self::rotation_matrix) sees them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Rotation about X in radians (vertical drag).
    pub rotation_x: f32,
    /// Rotation about Y in radians (horizontal drag).
    pub rotation_y: f32,
    /// Object-space translation in world units.
    pub translation: Vec3,
    /// Uniform scale, kept in `[MIN_ZOOM, MAX_ZOOM]`.
    pub zoom: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            translation: Vec3::ZERO,
            zoom: 1.0,
        }
    }
}

impl CameraState {
    /// `Rx(rotation_x) * Ry(rotation_y)`.
    ///
    /// The forward model transform and the pan compensation both go through
    /// here; they must agree on this order.
    #[must_use]
    pub fn rotation_matrix(&self) -> Mat3 {
        Mat3::from_rotation_x(self.rotation_x) * Mat3::from_rotation_y(self.rotation_y)
    }

    /// `Rotation * Translation * Scale(zoom)`.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_mat3(self.rotation_matrix())
            * Mat4::from_translation(self.translation)
            * Mat4::from_scale(Vec3::splat(self.zoom))
    }
}

/// Fixed perspective parameters and the eye pullback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Distance from the eye to the orbit pivot along -Z.
    pub distance: f32,
}

impl Projection {
    /// Perspective matrix for the given aspect ratio (wgpu [0, 1] depth).
    #[must_use]
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy.to_radians(), aspect, self.znear, self.zfar)
    }

    /// View matrix: the scene pushed `distance` units in front of the eye.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance))
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn identity_defaults() {
        let state = CameraState::default();
        assert_eq!(state.rotation_matrix(), Mat3::IDENTITY);
        assert_eq!(state.model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn rotation_order_is_x_then_y() {
        let state = CameraState {
            rotation_x: FRAC_PI_2,
            rotation_y: FRAC_PI_2,
            ..CameraState::default()
        };
        // Ry takes +X to -Z, then Rx takes -Z to +Y.
        let v = state.rotation_matrix() * Vec3::X;
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(v.y, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(v.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn translation_applies_before_rotation() {
        let state = CameraState {
            rotation_y: FRAC_PI_2,
            translation: Vec3::X,
            zoom: 2.0,
            ..CameraState::default()
        };
        let p = state.model_matrix().transform_point3(Vec3::X);
        // (1 * 2 + 1) along +X, then rotated onto -Z.
        assert_abs_diff_eq!(p.z, -3.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-5);
    }
}
