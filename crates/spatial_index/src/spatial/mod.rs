//! Spatial partitioning data structures
//!
//! Adaptive quadtree (2D) and octree (3D) indexes answering "what is near
//! point P within radius R" over caller-owned, spatially extended items, plus
//! a tracker that turns successive queries into enter/exit events.

mod bounds;
mod error;
mod item;
mod node;
mod octree;
mod quadtree;
mod range_tracker;
mod spatial_query;
mod stats;
mod tree;

pub use bounds::{Point, Region};
pub use error::IndexError;
pub use item::{ItemRef, SpatialItem};
pub use octree::{Octree, AABB};
pub use quadtree::{Quadtree, Rect};
pub use range_tracker::{diff, RangeEvent, RangeTracker};
pub use spatial_query::SpatialQuery;
pub use stats::{IndexStats, QueryStats};
pub use tree::{ItemSet, SpatialTree};
