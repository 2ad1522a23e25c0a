//! Recursive tree node shared by the quadtree and octree
//!
//! A node is either a leaf holding items or an internal node holding exactly
//! [`Region::CHILD_COUNT`] children, never both. Splitting is one-way.

use std::collections::HashSet;

use super::bounds::Region;
use super::item::{ItemRef, SpatialItem};
use super::stats::IndexStats;
use crate::config::IndexConfig;

/// Contents of a node
pub(crate) enum NodeKind<'a, R, T: ?Sized> {
    /// Items stored directly at this node
    Leaf(HashSet<ItemRef<'a, T>>),

    /// Children partitioning this node's bounds
    Internal(Box<[Node<'a, R, T>]>),
}

/// How leaves screen their items during a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LeafFilter {
    /// Every item in a reached leaf
    All,

    /// Items whose bounds overlap the search region
    Bounds,

    /// Items whose bounding sphere, boxed, overlaps the search region.
    /// Any item within `range + radius` of the search center passes.
    Sphere,
}

impl LeafFilter {
    fn keeps<R: Region, T: SpatialItem<R> + ?Sized>(self, search: &R, item: &T) -> bool {
        match self {
            Self::All => true,
            Self::Bounds => search.overlaps(&item.bounds()),
            Self::Sphere => search.overlaps(&R::around(item.location(), item.radius())),
        }
    }
}

/// Single node in the tree hierarchy
pub(crate) struct Node<'a, R, T: ?Sized> {
    /// Region covered by this node
    bounds: R,

    /// Depth in the tree (0 = root)
    depth: u32,

    kind: NodeKind<'a, R, T>,
}

impl<'a, R: Region, T: SpatialItem<R> + ?Sized> Node<'a, R, T> {
    /// Create a new empty leaf
    pub fn new(bounds: R, depth: u32) -> Self {
        Self {
            bounds,
            depth,
            kind: NodeKind::Leaf(HashSet::new()),
        }
    }

    pub fn bounds(&self) -> &R {
        &self.bounds
    }

    /// Insert an item, splitting this leaf when it reaches the preferred size
    ///
    /// The split check counts the incoming item, so the insert that brings a
    /// leaf to `preferred_max_items_per_node` is the one that splits it. The
    /// caller has already established that the item overlaps this node (or
    /// that this node is the root).
    pub fn insert(&mut self, item: ItemRef<'a, T>, config: &IndexConfig, stats: &mut IndexStats) {
        if let NodeKind::Leaf(items) = &mut self.kind {
            let reached_threshold = items.len() + 1 >= config.preferred_max_items_per_node;
            if !(reached_threshold && self.bounds.can_split(config.minimum_node_size)) {
                items.insert(item);
                return;
            }

            self.split(config, stats);
        }

        self.insert_into_children(item, config, stats);
    }

    /// Turn this leaf into an internal node and push its items down
    fn split(&mut self, config: &IndexConfig, stats: &mut IndexStats) {
        let depth = self.depth + 1;
        let children: Box<[Self]> = self
            .bounds
            .split()
            .into_iter()
            .map(|bounds| Self::new(bounds, depth))
            .collect();
        stats.record_split(children.len(), depth);

        if let NodeKind::Leaf(items) = std::mem::replace(&mut self.kind, NodeKind::Internal(children)) {
            for item in items {
                self.insert_into_children(item, config, stats);
            }
        }
    }

    /// Forward an item to every child its bounds overlap
    ///
    /// An item overlapping no child is dropped silently.
    fn insert_into_children(&mut self, item: ItemRef<'a, T>, config: &IndexConfig, stats: &mut IndexStats) {
        let NodeKind::Internal(children) = &mut self.kind else {
            return;
        };

        let item_bounds = item.bounds();
        let mut placed = false;
        for child in children.iter_mut().filter(|child| child.bounds.overlaps(&item_bounds)) {
            child.insert(item, config, stats);
            placed = true;
        }

        if !placed {
            log::trace!("Dropping item with bounds {:?}: outside node {:?}", item_bounds, self.bounds);
        }
    }

    /// Gather items from every leaf reachable through nodes overlapping `search`
    ///
    /// Leaves contribute the items `filter` keeps.
    pub fn collect(&self, search: &R, filter: LeafFilter, found: &mut HashSet<ItemRef<'a, T>>) {
        match &self.kind {
            NodeKind::Leaf(items) => {
                found.extend(items.iter().copied().filter(|item| filter.keeps(search, item.get())));
            }
            NodeKind::Internal(children) => {
                for child in children.iter().filter(|child| child.bounds.overlaps(search)) {
                    child.collect(search, filter, found);
                }
            }
        }
    }

    /// Depth-first walk; leaves report their items, internal nodes `None`
    pub fn visit<F>(&self, visitor: &mut F)
    where
        F: FnMut(&R, u32, Option<&HashSet<ItemRef<'a, T>>>),
    {
        match &self.kind {
            NodeKind::Leaf(items) => visitor(&self.bounds, self.depth, Some(items)),
            NodeKind::Internal(children) => {
                visitor(&self.bounds, self.depth, None);
                for child in children.iter() {
                    child.visit(visitor);
                }
            }
        }
    }

    /// Count leaf nodes in this subtree
    pub fn leaf_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::Internal(children) => children.iter().map(Self::leaf_count).sum(),
        }
    }
}
