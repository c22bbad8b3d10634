//! Point cloud data: the fixed vertex record, its PLY codec, bounding
//! boxes, and normalization into the renderable volume.

/// Axis-aligned bounding box over point positions.
pub mod bounds;
/// Centering and isotropic scaling of a loaded cloud.
pub mod normalize;
/// Binary little-endian PLY reader and writer.
pub mod ply;

use glam::Vec3;

pub use bounds::BoundingBox;
pub use normalize::{normalize, Normalized, TARGET_EXTENT};
pub use ply::FormatError;

/// One point as stored in the file and uploaded to the GPU.
///
/// The layout is the vertex buffer layout: position at offset 0, intensity
/// at offset 12, 16-byte stride with no padding.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
    /// Raw intensity value, passed through untouched.
    pub intensity: f32,
}

static_assertions::const_assert_eq!(size_of::<Point>(), Point::STRIDE);

impl Point {
    /// Size of one record in bytes, both on disk and in the vertex buffer.
    pub const STRIDE: usize = 16;

    /// Byte offset of the intensity field inside a record.
    pub const INTENSITY_OFFSET: usize = 12;

    /// Create a point from its four fields.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, intensity: f32) -> Self {
        Self { x, y, z, intensity }
    }

    /// Position as a vector.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Same intensity, new position.
    #[must_use]
    pub fn with_position(self, position: Vec3) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            intensity: self.intensity,
        }
    }
}
