use glam::Mat4;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the model-view-projection matrix.
///
/// One column-major `mat4x4<f32>`, 64 bytes, no padding.
pub struct CameraUniform {
    /// Combined model-view-projection matrix, column-major.
    pub mvp: [[f32; 4]; 4],
}

static_assertions::const_assert_eq!(size_of::<CameraUniform>(), 64);

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new(&Mat4::IDENTITY)
    }
}

impl CameraUniform {
    /// Uniform holding `mvp`.
    #[must_use]
    pub fn new(mvp: &Mat4) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
        }
    }
}
