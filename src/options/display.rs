use serde::{Deserialize, Serialize};

/// How points are shaded and the frame is cleared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayOptions {
    /// Background color (linear RGBA).
    pub clear_color: [f64; 4],
    /// Intensity mapped to full white; values above saturate.
    pub intensity_scale: f32,
    /// Depth-test points against each other.
    pub depth_test: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            clear_color: [0.1, 0.1, 0.2, 1.0],
            intensity_scale: 255.0,
            depth_test: true,
        }
    }
}
