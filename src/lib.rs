// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive wgpu viewer for binary PLY point clouds.
//!
//! A point cloud is read from a binary little-endian PLY file, centered and
//! scaled into a fixed volume, uploaded to the GPU once, and drawn as a
//! point list under an orbit camera driven by mouse drag and scroll.
//!
//! # Key entry points
//!
//! - [`point_cloud::ply`] - the binary point record codec
//! - [`point_cloud::normalize()`] - centering and isotropic scaling
//! - [`camera::CameraController`] - rotate, pan, zoom, and MVP composition
//! - [`engine::PointCloudEngine`] - owner of camera, input, and frontend
//! - [`options::Options`] - runtime configuration loaded from TOML
//!
//! # Architecture
//!
//! Everything runs on the winit thread. Input events become
//! [`input::ViewerCommand`]s, commands mutate the camera and mark its
//! uniform dirty, and each redraw uploads the matrix at most once before a
//! single draw call. All GPU handles sit behind the [`renderer::Frontend`]
//! trait, so the engine is testable without a device.

pub mod camera;
#[cfg(feature = "binary")]
pub mod cli;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod point_cloud;
pub mod renderer;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
