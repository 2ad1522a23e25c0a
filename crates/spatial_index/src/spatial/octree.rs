//! Octree spatial partitioning structure
//!
//! Efficiently divides 3D space into hierarchical regions for fast
//! spatial queries. Each node subdivides into 8 octants when item
//! density reaches the preferred maximum.
//!
//! Unlike the quadtree, the octree also offers exact variants, where leaves
//! screen their items before they reach the result set.

use serde::{Deserialize, Serialize};

use super::bounds::{half_axis, Region};
use super::error::IndexError;
use super::item::SpatialItem;
use super::node::LeafFilter;
use super::tree::{ItemSet, SpatialTree};
use crate::foundation::math::Vec3;

/// 3D index over items implementing [`SpatialItem<AABB>`](super::SpatialItem)
pub type Octree<'a, T> = SpatialTree<'a, AABB, T>;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Create an AABB centered at a point with given full size
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        Self::from_center_extents(center, size * 0.5)
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Get the full size of the AABB
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }
}

impl Region for AABB {
    type Point = Vec3;

    const CHILD_COUNT: usize = 8;

    fn overlaps(&self, other: &Self) -> bool {
        self.intersects(other)
    }

    fn can_split(&self, minimum_node_size: f32) -> bool {
        let size = self.size();
        let floor = minimum_node_size * 2.0;
        size.x >= floor && size.y >= floor && size.z >= floor
    }

    // Octant layout:
    // 0: -X, -Y, -Z    4: -X, -Y, +Z
    // 1: +X, -Y, -Z    5: +X, -Y, +Z
    // 2: -X, +Y, -Z    6: -X, +Y, +Z
    // 3: +X, +Y, -Z    7: +X, +Y, +Z
    fn split(&self) -> Vec<Self> {
        let center = self.center();

        (0..Self::CHILD_COUNT)
            .map(|octant| {
                let (min_x, max_x) = half_axis(octant, 0, self.min.x, center.x, self.max.x);
                let (min_y, max_y) = half_axis(octant, 1, self.min.y, center.y, self.max.y);
                let (min_z, max_z) = half_axis(octant, 2, self.min.z, center.z, self.max.z);
                AABB::new(Vec3::new(min_x, min_y, min_z), Vec3::new(max_x, max_y, max_z))
            })
            .collect()
    }

    fn around(center: Vec3, half_extent: f32) -> Self {
        Self::from_center_extents(center, Vec3::repeat(half_extent))
    }

    fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

impl<'a, T: SpatialItem<AABB> + ?Sized> SpatialTree<'a, AABB, T> {
    /// Items whose own bounds intersect `search`
    ///
    /// Leaves test each item against the box instead of contributing
    /// everything they hold.
    pub fn find_in_box_exact(&self, search: AABB) -> Result<ItemSet<'a, T>, IndexError> {
        self.search_box(&search, LeafFilter::Bounds)
    }

    /// Same result as [`SpatialTree::find_in_range`], with leaves dropping
    /// items whose boxed bounding sphere misses the search box before the
    /// distance test
    pub fn find_in_range_exact(&self, location: Vec3, range: f32) -> Result<ItemSet<'a, T>, IndexError> {
        self.search_range(location, range, LeafFilter::Sphere)
    }
}
