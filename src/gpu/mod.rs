//! GPU resource management utilities.
//!
//! Provides adapter discovery, wgpu device/surface initialization, and the
//! depth attachment.

/// Adapter enumeration, selection, and description.
pub mod adapter;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth attachment texture.
pub mod texture;

pub use adapter::{select_adapter, AdapterChoice, AdapterSummary};
pub use render_context::{DeviceError, RenderContext};
pub use texture::DepthTexture;
