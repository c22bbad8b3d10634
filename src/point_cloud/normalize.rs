use glam::Vec3;

use super::{BoundingBox, Point};

/// Largest per-axis size of a normalized cloud.
pub const TARGET_EXTENT: f32 = 1.8;

/// A normalized copy of a point cloud plus the transform that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Centered and scaled points, same order and intensities as the input.
    pub points: Vec<Point>,
    /// Bounds of the input cloud (`None` when it was empty).
    pub bounds: Option<BoundingBox>,
    /// Center subtracted from every input position.
    pub center: Vec3,
    /// Uniform scale applied after centering.
    pub scale: f32,
}

impl Normalized {
    /// Whether the input collapsed to a single position and the scale fell
    /// back to 1.0.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.bounds
            .is_some_and(|b| !is_usable_extent(b.max_extent()))
    }
}

/// Center `points` on the origin and scale them so the largest axis spans
/// [`TARGET_EXTENT`].
///
/// Centering and scaling run in f64, so any finite input gives finite output.
/// A zero-extent cloud (every point identical) keeps a scale of 1.0 and logs
/// a warning.
#[must_use]
pub fn normalize(points: &[Point]) -> Normalized {
    let Some(bounds) = BoundingBox::from_points(points) else {
        return Normalized {
            points: Vec::new(),
            bounds: None,
            center: Vec3::ZERO,
            scale: 1.0,
        };
    };

    let center = bounds.center_f64();
    let extent = bounds.max_extent();
    let scale = if is_usable_extent(extent) {
        f64::from(TARGET_EXTENT) / extent
    } else {
        log::warn!(
            "point cloud has degenerate extent {extent} ({} points), using \
             scale 1.0",
            points.len()
        );
        1.0
    };

    let points = points
        .iter()
        .map(|p| p.with_position(((p.position().as_dvec3() - center) * scale).as_vec3()))
        .collect();

    Normalized {
        points,
        bounds: Some(bounds),
        center: center.as_vec3(),
        scale: scale as f32,
    }
}

fn is_usable_extent(extent: f64) -> bool {
    extent > 0.0 && extent.is_finite()
}
