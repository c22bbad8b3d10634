//! Small helpers shared by the viewer loop.

/// Smoothed FPS tracking with periodic reports.
pub mod frame_timing;

pub use frame_timing::FrameTiming;
