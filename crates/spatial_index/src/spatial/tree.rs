//! Root wrapper shared by [`Quadtree`](super::Quadtree) and [`Octree`](super::Octree)
//!
//! Lifecycle: construct once with an [`IndexConfig`], then for each
//! population cycle call [`SpatialTree::prepare`] with the world bounds,
//! insert every item, and query as often as needed. There is no removal or
//! in-place update; re-preparing discards the whole tree.

use std::cell::Cell;
use std::collections::HashSet;

use super::bounds::{Point, Region};
use super::error::IndexError;
use super::item::{ItemRef, SpatialItem};
use super::node::{LeafFilter, Node};
use super::stats::{IndexStats, QueryStats};
use crate::config::IndexConfig;
use crate::foundation::math::utils::squared;
use crate::foundation::time::Stopwatch;

/// Result set of a query: the matching items, by identity
pub type ItemSet<'a, T> = HashSet<ItemRef<'a, T>>;

/// Adaptive spatial partitioning index over regions of type `R`
///
/// Items are borrowed for `'a` and never owned. The index is single-threaded;
/// query statistics are kept in a [`Cell`], which also keeps it `!Sync`.
pub struct SpatialTree<'a, R, T: ?Sized> {
    config: IndexConfig,
    root: Option<Node<'a, R, T>>,
    stats: IndexStats,
    last_query: Cell<Option<QueryStats>>,
}

impl<'a, R: Region, T: SpatialItem<R> + ?Sized> SpatialTree<'a, R, T> {
    /// Create an unprepared index, rejecting invalid configuration
    pub fn new(config: IndexConfig) -> Result<Self, IndexError> {
        config.validate()?;

        Ok(Self {
            config,
            root: None,
            stats: IndexStats::for_root(),
            last_query: Cell::new(None),
        })
    }

    /// Configuration this index was built with
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Discard any existing tree and start a fresh empty root covering `bounds`
    pub fn prepare(&mut self, bounds: R) {
        log::info!("Preparing {}-way spatial index over {:?}", R::CHILD_COUNT, bounds);

        self.root = Some(Node::new(bounds, 0));
        self.stats = IndexStats::for_root();
        self.last_query.set(None);
    }

    /// Whether [`SpatialTree::prepare`] has been called
    pub fn is_prepared(&self) -> bool {
        self.root.is_some()
    }

    /// Bounds passed to the last [`SpatialTree::prepare`]
    pub fn root_bounds(&self) -> Option<R> {
        self.root.as_ref().map(|root| *root.bounds())
    }

    /// Insert one item
    ///
    /// Items whose bounds overlap no node are dropped without error. That can
    /// only happen when the prepared bounds do not cover the item.
    pub fn insert(&mut self, item: &'a T) -> Result<(), IndexError> {
        let Self { config, root, stats, .. } = self;
        let root = root.as_mut().ok_or(IndexError::NotPrepared)?;
        root.insert(ItemRef::new(item), config, stats);
        Ok(())
    }

    /// Insert a batch of items in iteration order
    pub fn insert_all<I>(&mut self, items: I) -> Result<(), IndexError>
    where
        I: IntoIterator<Item = &'a T>,
    {
        for item in items {
            self.insert(item)?;
        }
        Ok(())
    }

    /// All items within `range` of `location`
    ///
    /// An item matches when the distance from `location` to its
    /// [`location`](SpatialItem::location) is at most `range` plus its
    /// [`radius`](SpatialItem::radius).
    pub fn find_in_range(&self, location: R::Point, range: f32) -> Result<ItemSet<'a, T>, IndexError> {
        self.search_range(location, range, LeafFilter::All)
    }

    /// Coarse candidates for a box: every item held by a leaf reachable
    /// through nodes overlapping `search`, with no distance filtering
    pub fn find_in_box(&self, search: R) -> Result<ItemSet<'a, T>, IndexError> {
        self.search_box(&search, LeafFilter::All)
    }

    pub(crate) fn search_range(
        &self,
        location: R::Point,
        range: f32,
        filter: LeafFilter,
    ) -> Result<ItemSet<'a, T>, IndexError> {
        let root = self.root.as_ref().ok_or(IndexError::NotPrepared)?;
        if !range.is_finite() || range < 0.0 {
            return Err(IndexError::InvalidRange(range));
        }

        let stopwatch = self.config.track_stats.then(Stopwatch::start_new);

        let search = R::around(location, range);
        let mut found = HashSet::new();
        root.collect(&search, filter, &mut found);
        let candidates = found.len();

        found.retain(|item| {
            let test_range = range + item.radius();
            location.distance_squared(&item.location()) <= squared(test_range)
        });

        if let Some(stopwatch) = stopwatch {
            self.record_query(candidates, found.len(), &stopwatch);
        }

        Ok(found)
    }

    pub(crate) fn search_box(&self, search: &R, filter: LeafFilter) -> Result<ItemSet<'a, T>, IndexError> {
        let root = self.root.as_ref().ok_or(IndexError::NotPrepared)?;

        let stopwatch = self.config.track_stats.then(Stopwatch::start_new);

        let mut found = HashSet::new();
        root.collect(search, filter, &mut found);

        if let Some(stopwatch) = stopwatch {
            self.record_query(found.len(), found.len(), &stopwatch);
        }

        Ok(found)
    }

    fn record_query(&self, candidates: usize, results: usize, stopwatch: &Stopwatch) {
        let query = QueryStats {
            candidates,
            results,
            elapsed: stopwatch.elapsed(),
        };
        log::debug!("{query}");
        self.last_query.set(Some(query));
    }

    /// Node count and depth, or `None` when statistics tracking is off
    pub fn stats(&self) -> Option<&IndexStats> {
        self.config.track_stats.then_some(&self.stats)
    }

    /// Cost of the most recent query, when statistics tracking is on
    pub fn last_query(&self) -> Option<QueryStats> {
        self.last_query.get()
    }

    /// Log the tree shape at info level
    pub fn log_stats(&self) {
        if let Some(stats) = self.stats() {
            log::info!("Max Depth: {}", stats.max_depth);
            log::info!("Num Nodes: {}", stats.node_count);
        }
    }

    /// Number of leaves; 0 before `prepare`
    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, Node::leaf_count)
    }

    /// Walk every node depth-first
    ///
    /// The visitor receives the node bounds, its depth, and for leaves the
    /// items held there (`None` for internal nodes).
    pub fn visit_nodes<F>(&self, mut visitor: F)
    where
        F: FnMut(&R, u32, Option<&ItemSet<'a, T>>),
    {
        if let Some(root) = &self.root {
            root.visit(&mut visitor);
        }
    }
}
