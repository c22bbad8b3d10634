use glam::{DVec3, Vec3};

use super::Point;

/// Axis-aligned bounds of a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Per-axis minimum.
    pub min: Vec3,
    /// Per-axis maximum.
    pub max: Vec3,
}

impl BoundingBox {
    /// Bounds of all points in a single pass. `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let start = first.position();
        let (min, max) = rest.iter().fold((start, start), |(min, max), p| {
            let pos = p.position();
            (min.min(pos), max.max(pos))
        });
        Some(Self { min, max })
    }

    /// Midpoint of each axis range, computed in f64.
    #[must_use]
    pub fn center_f64(&self) -> DVec3 {
        (self.min.as_dvec3() + self.max.as_dvec3()) * 0.5
    }

    /// Midpoint of each axis range. Always finite for finite bounds.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.center_f64().as_vec3()
    }

    /// Per-axis size. Overflows to infinity for ranges wider than `f32::MAX`;
    /// use [`max_extent`](Self::max_extent) when that matters.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Largest per-axis size, computed in f64 so it stays finite for any
    /// finite bounds.
    #[must_use]
    pub fn max_extent(&self) -> f64 {
        (self.max.as_dvec3() - self.min.as_dvec3()).max_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_bounds() {
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn axes_reduce_independently() {
        let points = [
            Point::new(1.0, -5.0, 0.0, 0.0),
            Point::new(-2.0, 3.0, 7.0, 0.0),
            Point::new(0.5, 0.0, -1.0, 0.0),
        ];
        let bounds = BoundingBox::from_points(&points).unwrap();
        assert_eq!(bounds.min, Vec3::new(-2.0, -5.0, -1.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 3.0, 7.0));
        assert_eq!(bounds.center(), Vec3::new(-0.5, -1.0, 3.0));
        assert_eq!(bounds.max_extent(), 8.0);
    }

    #[test]
    fn single_point_is_zero_sized() {
        let bounds =
            BoundingBox::from_points(&[Point::new(4.0, 4.0, 4.0, 1.0)]).unwrap();
        assert_eq!(bounds.size(), Vec3::ZERO);
        assert_eq!(bounds.center(), Vec3::splat(4.0));
    }

    #[test]
    fn extreme_coordinates_keep_a_finite_center_and_extent() {
        let bounds = BoundingBox::from_points(&[
            Point::new(-3e38, f32::MAX, 0.0, 0.0),
            Point::new(3e38, f32::MAX, 0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(bounds.center(), Vec3::new(0.0, f32::MAX, 0.0));
        assert!(bounds.max_extent().is_finite());
        assert_eq!(bounds.max_extent(), f64::from(3e38_f32) * 2.0);
    }
}
