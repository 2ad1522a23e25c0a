//! Enter/exit tracking for a moving observer
//!
//! Each update re-runs a range query at the observer's location and diffs it
//! against the previous result, so callers toggle per-item state once per
//! transition instead of on every tick an item stays in range.

use std::collections::HashSet;
use std::fmt;

use approx::abs_diff_eq;

use super::bounds::Point;
use super::error::IndexError;
use super::item::ItemRef;
use super::spatial_query::SpatialQuery;
use super::tree::ItemSet;

/// Squared displacement below which the observer counts as stationary
const MOVE_EPSILON: f32 = f32::EPSILON;

/// A change in an item's membership of the observer's range
pub enum RangeEvent<'a, T: ?Sized> {
    /// Item was not in range last update and is now
    Entered(ItemRef<'a, T>),
    /// Item was in range last update and no longer is
    Left(ItemRef<'a, T>),
}

impl<'a, T: ?Sized> RangeEvent<'a, T> {
    /// The item this event is about
    pub fn item(&self) -> ItemRef<'a, T> {
        match self {
            Self::Entered(item) | Self::Left(item) => *item,
        }
    }

    /// Whether this is an [`RangeEvent::Entered`] event
    pub fn is_entered(&self) -> bool {
        matches!(self, Self::Entered(_))
    }
}

impl<T: ?Sized> Clone for RangeEvent<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for RangeEvent<'_, T> {}

impl<T: ?Sized> PartialEq for RangeEvent<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Entered(a), Self::Entered(b)) | (Self::Left(a), Self::Left(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: ?Sized> Eq for RangeEvent<'_, T> {}

impl<T: ?Sized> fmt::Debug for RangeEvent<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entered(item) => f.debug_tuple("Entered").field(item).finish(),
            Self::Left(item) => f.debug_tuple("Left").field(item).finish(),
        }
    }
}

/// Events turning `previous` into `current`: every "left" event first, then
/// every "entered" event
///
/// With no previous set, every current item has just entered.
pub fn diff<'a, T: ?Sized>(previous: Option<&ItemSet<'a, T>>, current: &ItemSet<'a, T>) -> Vec<RangeEvent<'a, T>> {
    match previous {
        Some(previous) => previous
            .difference(current)
            .copied()
            .map(RangeEvent::Left)
            .chain(current.difference(previous).copied().map(RangeEvent::Entered))
            .collect(),
        None => current.iter().copied().map(RangeEvent::Entered).collect(),
    }
}

/// Tracks which items are within range of an observer across updates
pub struct RangeTracker<'a, P, T: ?Sized> {
    range: f32,
    previous: Option<ItemSet<'a, T>>,
    last_location: Option<P>,
}

impl<'a, P: Point, T: ?Sized> RangeTracker<'a, P, T> {
    /// Create a tracker with no history
    pub fn new(range: f32) -> Self {
        Self {
            range,
            previous: None,
            last_location: None,
        }
    }

    /// Search range used for each query
    pub fn range(&self) -> f32 {
        self.range
    }

    /// Change the search range; the next [`RangeTracker::update_if_moved`]
    /// re-queries even if the observer has not moved
    pub fn set_range(&mut self, range: f32) {
        self.range = range;
        self.last_location = None;
    }

    /// Items in range as of the last update, `None` before the first one
    pub fn nearby(&self) -> Option<&ItemSet<'a, T>> {
        self.previous.as_ref()
    }

    /// Forget all history; the next update reports every item as entered
    pub fn reset(&mut self) {
        self.previous = None;
        self.last_location = None;
    }

    /// Whether `location` differs from the last queried location
    pub fn has_moved(&self, location: &P) -> bool {
        self.last_location
            .map_or(true, |last| !abs_diff_eq!(last.distance_squared(location), 0.0, epsilon = MOVE_EPSILON))
    }

    /// Query at `location` and report what changed since the last update
    ///
    /// On error the tracker state is left untouched.
    pub fn update<Q>(&mut self, index: &Q, location: P) -> Result<Vec<RangeEvent<'a, T>>, IndexError>
    where
        Q: SpatialQuery<'a, Point = P, Item = T> + ?Sized,
    {
        let current: HashSet<_> = index.find_in_range(location, self.range)?;
        let events = diff(self.previous.as_ref(), &current);

        self.previous = Some(current);
        self.last_location = Some(location);
        Ok(events)
    }

    /// Like [`RangeTracker::update`], but skips the query and reports no
    /// events when the observer has not moved since the last update
    pub fn update_if_moved<Q>(&mut self, index: &Q, location: P) -> Result<Vec<RangeEvent<'a, T>>, IndexError>
    where
        Q: SpatialQuery<'a, Point = P, Item = T> + ?Sized,
    {
        if !self.has_moved(&location) {
            return Ok(Vec::new());
        }
        self.update(index, location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexConfig;
    use crate::foundation::math::Vec2;
    use crate::spatial::{Quadtree, Rect, SpatialItem};
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    struct Post {
        id: usize,
        location: Vec2,
    }

    impl SpatialItem<Rect> for Post {
        fn location(&self) -> Vec2 {
            self.location
        }

        fn bounds(&self) -> Rect {
            Rect::from_center_extents(self.location, Vec2::zeros())
        }

        fn radius(&self) -> f32 {
            0.0
        }
    }

    /// Query source replaying fixed result sets
    struct Scripted<'a> {
        results: RefCell<Vec<ItemSet<'a, Post>>>,
    }

    impl<'a> SpatialQuery<'a> for Scripted<'a> {
        type Point = Vec2;
        type Item = Post;

        fn find_in_range(&self, _: Vec2, _: f32) -> Result<ItemSet<'a, Post>, IndexError> {
            Ok(self.results.borrow_mut().remove(0))
        }
    }

    fn posts(count: usize) -> Vec<Post> {
        (0..count)
            .map(|id| Post {
                id,
                location: Vec2::new(id as f32 * 10.0, 0.0),
            })
            .collect()
    }

    fn set<'a>(posts: &'a [Post], ids: &[usize]) -> ItemSet<'a, Post> {
        ids.iter().map(|&id| ItemRef::new(&posts[id])).collect()
    }

    fn split_events(events: &[RangeEvent<'_, Post>]) -> (BTreeSet<usize>, BTreeSet<usize>) {
        let left = events.iter().filter(|e| !e.is_entered()).map(|e| e.item().id).collect();
        let entered = events.iter().filter(|e| e.is_entered()).map(|e| e.item().id).collect();
        (left, entered)
    }

    #[test]
    fn test_diff_reports_exact_set_differences() {
        let posts = posts(6);
        let previous = set(&posts, &[0, 1, 2, 3]);
        let current = set(&posts, &[2, 3, 4, 5]);

        let events = diff(Some(&previous), &current);
        assert_eq!(events.len(), 4);
        assert!(!events[0].is_entered() && !events[1].is_entered());

        let (left, entered) = split_events(&events);
        assert_eq!(left, BTreeSet::from([0, 1]));
        assert_eq!(entered, BTreeSet::from([4, 5]));
    }

    #[test]
    fn test_first_update_enters_everything() {
        let posts = posts(3);
        let current = set(&posts, &[0, 1, 2]);

        let events = diff(None, &current);
        let (left, entered) = split_events(&events);
        assert!(left.is_empty());
        assert_eq!(entered, BTreeSet::from([0, 1, 2]));
    }

    #[test]
    fn test_identical_sets_produce_no_events() {
        let posts = posts(3);
        let a = set(&posts, &[0, 2]);
        assert!(diff(Some(&a), &a.clone()).is_empty());
    }

    #[test]
    fn test_tracker_with_scripted_results() {
        let posts = posts(5);
        let source = Scripted {
            results: RefCell::new(vec![set(&posts, &[0, 1]), set(&posts, &[1, 2, 3]), set(&posts, &[])]),
        };
        let mut tracker = RangeTracker::new(5.0);
        assert!(tracker.nearby().is_none());

        let (left, entered) = split_events(&tracker.update(&source, Vec2::new(0.0, 0.0)).unwrap());
        assert!(left.is_empty());
        assert_eq!(entered, BTreeSet::from([0, 1]));

        let (left, entered) = split_events(&tracker.update(&source, Vec2::new(1.0, 0.0)).unwrap());
        assert_eq!(left, BTreeSet::from([0]));
        assert_eq!(entered, BTreeSet::from([2, 3]));
        assert_eq!(tracker.nearby().map(HashSet::len), Some(3));

        let (left, entered) = split_events(&tracker.update(&source, Vec2::new(2.0, 0.0)).unwrap());
        assert_eq!(left, BTreeSet::from([1, 2, 3]));
        assert!(entered.is_empty());
    }

    #[test]
    fn test_tracker_follows_observer_through_quadtree() {
        let posts = posts(10);
        let mut tree = Quadtree::new(IndexConfig {
            preferred_max_items_per_node: 2,
            minimum_node_size: 1.0,
            track_stats: false,
        })
        .unwrap();
        tree.prepare(Rect::from_position_size(-10.0, -10.0, 120.0, 20.0));
        tree.insert_all(&posts).unwrap();

        let mut tracker = RangeTracker::new(12.0);
        let (_, entered) = split_events(&tracker.update(&tree, Vec2::new(0.0, 0.0)).unwrap());
        assert_eq!(entered, BTreeSet::from([0, 1]));

        let (left, entered) = split_events(&tracker.update(&tree, Vec2::new(30.0, 0.0)).unwrap());
        assert_eq!(left, BTreeSet::from([0, 1]));
        assert_eq!(entered, BTreeSet::from([2, 3, 4]));
    }

    #[test]
    fn test_update_if_moved_skips_stationary_observer() {
        let posts = posts(4);
        let mut tree = Quadtree::new(IndexConfig::default()).unwrap();
        tree.prepare(Rect::from_position_size(-10.0, -10.0, 60.0, 20.0));
        tree.insert_all(&posts).unwrap();

        let mut tracker = RangeTracker::new(5.0);
        let location = Vec2::new(10.0, 0.0);
        assert!(tracker.has_moved(&location));
        assert_eq!(tracker.update_if_moved(&tree, location).unwrap().len(), 1);

        assert!(!tracker.has_moved(&location));
        assert!(tracker.update_if_moved(&tree, location).unwrap().is_empty());

        tracker.set_range(15.0);
        assert!(tracker.has_moved(&location));
        let (_, entered) = split_events(&tracker.update_if_moved(&tree, location).unwrap());
        assert_eq!(entered, BTreeSet::from([0, 2]));

        tracker.reset();
        assert!(tracker.nearby().is_none());
        assert_eq!(tracker.update_if_moved(&tree, location).unwrap().len(), 3);
    }

    #[test]
    fn test_failed_query_leaves_state_untouched() {
        let unprepared: Quadtree<'_, Post> = Quadtree::new(IndexConfig::default()).unwrap();
        let mut tracker = RangeTracker::new(5.0);

        assert_eq!(tracker.update(&unprepared, Vec2::zeros()), Err(IndexError::NotPrepared));
        assert!(tracker.nearby().is_none());
        assert!(tracker.has_moved(&Vec2::zeros()));
    }
}
