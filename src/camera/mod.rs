//! Orbit camera model.
//!
//! Holds the accumulated rotation, translation and zoom, converts pixel
//! deltas from drags into world-space motion, and builds the
//! model-view-projection matrix uploaded to the GPU.

/// Input-to-state conversion and MVP composition.
pub mod controller;
/// Camera state value and projection parameters.
pub mod state;
/// GPU uniform layout for the MVP matrix.
pub mod uniform;

pub use controller::CameraController;
pub use state::{CameraState, Projection, MAX_ZOOM, MIN_ZOOM};
pub use uniform::CameraUniform;
