use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera projection and control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// How far the eye is pulled back from the orbit pivot.
    pub distance: f32,
    /// Radians of rotation per pixel dragged.
    pub rotate_speed: f32,
    /// Multiplier on the NDC delta of a pan drag.
    pub pan_speed: f32,
    /// Zoom change per scroll tick.
    pub zoom_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
            distance: 3.0,
            rotate_speed: 0.01,
            pan_speed: 1.0,
            zoom_speed: 0.1,
        }
    }
}
