//! Quadtree spatial partitioning
//!
//! Divides a 2D rectangle into four equal quadrants whenever a leaf's item
//! count reaches the preferred maximum, down to the configured minimum node
//! size.

use serde::{Deserialize, Serialize};

use super::bounds::{half_axis, Region};
use super::tree::SpatialTree;
use crate::foundation::math::Vec2;

/// 2D index over items implementing [`SpatialItem<Rect>`](super::SpatialItem)
pub type Quadtree<'a, T> = SpatialTree<'a, Rect, T>;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl Rect {
    /// Create a rectangle from its corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from its minimum corner and size
    pub fn from_position_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Create a rectangle centered at a point with given half-size
    pub fn from_center_extents(center: Vec2, extents: Vec2) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Width along x
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height along y
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check if this rectangle contains a point (edges included)
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y
    }

    /// Check if this rectangle overlaps another (edges included)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y
    }
}

impl Region for Rect {
    type Point = Vec2;

    const CHILD_COUNT: usize = 4;

    fn overlaps(&self, other: &Self) -> bool {
        self.intersects(other)
    }

    fn can_split(&self, minimum_node_size: f32) -> bool {
        self.width() >= minimum_node_size * 2.0 && self.height() >= minimum_node_size * 2.0
    }

    fn split(&self) -> Vec<Self> {
        let center = self.center();

        (0..Self::CHILD_COUNT)
            .map(|quadrant| {
                let (min_x, max_x) = half_axis(quadrant, 0, self.min.x, center.x, self.max.x);
                let (min_y, max_y) = half_axis(quadrant, 1, self.min.y, center.y, self.max.y);
                Rect::new(Vec2::new(min_x, min_y), Vec2::new(max_x, max_y))
            })
            .collect()
    }

    fn around(center: Vec2, half_extent: f32) -> Self {
        Self::from_center_extents(center, Vec2::repeat(half_extent))
    }

    fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}
