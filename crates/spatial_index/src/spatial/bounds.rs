//! Geometry shared by the 2D and 3D indexes
//!
//! A [`Region`] is an axis-aligned rectangle or box that a tree node covers.
//! The tree itself is dimension-agnostic; everything it needs to know about
//! space goes through this trait.

use std::fmt::Debug;

use crate::foundation::math::{Vec2, Vec3};

/// A location in 2D or 3D space
pub trait Point: Copy + Debug {
    /// Squared Euclidean distance to another point
    fn distance_squared(&self, other: &Self) -> f32;
}

impl Point for Vec2 {
    fn distance_squared(&self, other: &Self) -> f32 {
        (self - other).norm_squared()
    }
}

impl Point for Vec3 {
    fn distance_squared(&self, other: &Self) -> f32 {
        (self - other).norm_squared()
    }
}

/// Axis-aligned region a tree node can cover
///
/// Implementations must make [`Region::split`] an exact partition: the
/// children share edges with each other and with the parent, computed from
/// the same `min`/`center`/`max` values so no gaps open up between them.
pub trait Region: Copy + Debug + PartialEq {
    /// Point type of this dimensionality
    type Point: Point;

    /// Number of children produced by [`Region::split`] (4 or 8)
    const CHILD_COUNT: usize;

    /// Inclusive overlap test; touching edges count as overlapping
    fn overlaps(&self, other: &Self) -> bool;

    /// Whether halving every axis still leaves at least `minimum_node_size`
    fn can_split(&self, minimum_node_size: f32) -> bool;

    /// Split into [`Region::CHILD_COUNT`] equal children.
    ///
    /// Child `i` lies on the positive side of axis `k` when bit `k` of `i` is
    /// set (x is bit 0, y bit 1, z bit 2).
    fn split(&self) -> Vec<Self>;

    /// Region centered on `center` reaching `half_extent` along every axis
    fn around(center: Self::Point, half_extent: f32) -> Self;

    /// Center point of the region
    fn center(&self) -> Self::Point;
}

/// Pick the lower or upper half of an axis for the child with the given index
pub(crate) fn half_axis(index: usize, bit: usize, min: f32, center: f32, max: f32) -> (f32, f32) {
    if index & (1 << bit) == 0 {
        (min, center)
    } else {
        (center, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_distance() {
        assert_relative_eq!(Vec2::new(0.0, 0.0).distance_squared(&Vec2::new(3.0, 4.0)), 25.0);
        assert_relative_eq!(Vec3::new(1.0, 2.0, 3.0).distance_squared(&Vec3::new(1.0, 2.0, 3.0)), 0.0);
    }

    #[test]
    fn test_half_axis_selects_by_bit() {
        assert_eq!(half_axis(0b010, 0, 0.0, 5.0, 10.0), (0.0, 5.0));
        assert_eq!(half_axis(0b010, 1, 0.0, 5.0, 10.0), (5.0, 10.0));
    }
}
