//! Abstract range query interface
//!
//! Consumers such as [`RangeTracker`](super::RangeTracker) only need "what is
//! within R of P". This trait lets them run against either tree, or against
//! any other source of result sets.

use super::bounds::{Point, Region};
use super::error::IndexError;
use super::item::SpatialItem;
use super::tree::{ItemSet, SpatialTree};

/// Radius query over borrowed items
pub trait SpatialQuery<'a> {
    /// Location type queries are issued at
    type Point: Point;

    /// Item type held in result sets
    type Item: ?Sized + 'a;

    /// All items within `range` of `location`
    fn find_in_range(&self, location: Self::Point, range: f32) -> Result<ItemSet<'a, Self::Item>, IndexError>;
}

impl<'a, R: Region, T: SpatialItem<R> + ?Sized + 'a> SpatialQuery<'a> for SpatialTree<'a, R, T> {
    type Point = R::Point;
    type Item = T;

    fn find_in_range(&self, location: R::Point, range: f32) -> Result<ItemSet<'a, T>, IndexError> {
        SpatialTree::find_in_range(self, location, range)
    }
}
