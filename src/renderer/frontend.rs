use glam::Mat4;

use crate::{gpu::DeviceError, point_cloud::Point};

/// Why a frame was not presented.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// No presentable image this frame (timeout, minimized, outdated or lost
    /// surface). The frame is dropped and the next one retries.
    #[error("surface image unavailable: {0}")]
    SurfaceUnavailable(String),
    /// The GPU device is gone or out of memory. Not recoverable.
    #[error("GPU device lost: {0}")]
    DeviceLost(String),
}

impl FrameError {
    /// Whether skipping the frame is enough to recover.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::SurfaceUnavailable(_))
    }
}

/// GPU-facing capabilities used by the engine.
pub trait Frontend {
    /// Replace the vertex buffer with one holding `points`, uploaded once.
    ///
    /// The previous buffer is released only after every frame already
    /// submitted with it has finished.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::GeometryTooLarge`] if the points exceed the
    /// device's buffer limit. The previous geometry is kept in that case.
    fn load_geometry(&mut self, points: &[Point]) -> Result<(), DeviceError>;

    /// Write `mvp` into the camera uniform. The last write before a draw
    /// wins.
    fn update_camera(&mut self, mvp: &Mat4);

    /// Draw the loaded points with the current camera uniform and present.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::SurfaceUnavailable`] when the frame should be
    /// skipped and [`FrameError::DeviceLost`] when rendering cannot continue.
    fn draw_frame(&mut self) -> Result<(), FrameError>;

    /// Resize the presentation surface. Zero dimensions are ignored.
    fn resize(&mut self, width: u32, height: u32);

    /// Current surface size in physical pixels.
    fn viewport_size(&self) -> (u32, u32);
}
