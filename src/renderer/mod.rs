//! Point cloud rendering.
//!
//! [`Frontend`] is the capability surface the engine drives: it owns every
//! GPU-resident resource and exposes only geometry upload, camera upload,
//! and frame drawing. [`GpuFrontend`] implements it on wgpu.

/// The `Frontend` trait and its frame error type.
pub mod frontend;
/// wgpu implementation of the frontend.
pub mod gpu_frontend;
pub(crate) mod pipeline_util;
/// Point-list pipeline, vertex buffer, and camera uniform.
pub mod point_cloud;

pub use frontend::{FrameError, Frontend};
pub use gpu_frontend::GpuFrontend;
pub use point_cloud::PointCloudRenderer;
