//! # Spatial Index
//!
//! Adaptive spatial partitioning for "what is near point P within radius R"
//! queries over a dynamic set of spatially extended objects.
//!
//! ## Features
//!
//! - **Quadtree**: 2D rectangles split into four quadrants on demand
//! - **Octree**: 3D boxes split into eight octants, with exact-bounds queries
//! - **Overlap insertion**: items straddling a split live in every child they touch
//! - **Range tracking**: enter/exit events for a moving observer
//!
//! ## Quick Start
//!
//! ```rust
//! use spatial_index::prelude::*;
//!
//! struct Rock {
//!     position: Vec2,
//!     radius: f32,
//! }
//!
//! impl SpatialItem<Rect> for Rock {
//!     fn location(&self) -> Vec2 {
//!         self.position
//!     }
//!
//!     fn bounds(&self) -> Rect {
//!         Rect::from_center_extents(self.position, Vec2::repeat(self.radius))
//!     }
//!
//!     fn radius(&self) -> f32 {
//!         self.radius
//!     }
//! }
//!
//! fn main() -> Result<(), IndexError> {
//!     let rocks: Vec<Rock> = (0..10)
//!         .map(|i| Rock { position: Vec2::new(i as f32, i as f32), radius: 0.0 })
//!         .collect();
//!
//!     let mut tree = Quadtree::new(IndexConfig {
//!         preferred_max_items_per_node: 4,
//!         minimum_node_size: 1.0,
//!         track_stats: true,
//!     })?;
//!     tree.prepare(Rect::from_position_size(0.0, 0.0, 100.0, 100.0));
//!     tree.insert_all(&rocks)?;
//!
//!     let nearby = tree.find_in_range(Vec2::new(0.0, 0.0), 5.0)?;
//!     assert_eq!(nearby.len(), 4);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod foundation;
pub mod config;
pub mod spatial;

/// Common imports for index users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, IndexConfig},
        foundation::math::{Vec2, Vec3},
        spatial::{
            IndexError, IndexStats, ItemRef, ItemSet, Octree, Quadtree, QueryStats, RangeEvent,
            RangeTracker, Rect, SpatialItem, SpatialQuery, AABB,
        },
    };
}
