//! Crate-level error types.

use std::path::PathBuf;

use crate::{gpu::render_context::DeviceError, point_cloud::FormatError, renderer::FrameError};

/// Errors produced by the plyview crate.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// The point cloud file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The point cloud file was rejected by the decoder.
    #[error("unsupported point cloud: {0}")]
    Format(#[from] FormatError),
    /// GPU context initialization failure.
    #[error("GPU error: {0}")]
    Device(#[from] DeviceError),
    /// A frame failed in a way that cannot be skipped.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),
    /// Generic I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML options parsing/serialization failure.
    #[error("options parse error: {0}")]
    OptionsParse(String),
    /// Window or event-loop failure.
    #[error("viewer error: {0}")]
    Viewer(String),
}
