//! Items stored in the spatial indexes
//!
//! The indexes never own items. They hold [`ItemRef`] handles borrowed for
//! the lifetime `'a`, so the items (usually kept in a
//! [`HandleMap`](crate::foundation::collections::HandleMap) or a `Vec`) must
//! outlive the tree and every result set taken from it. Moving an item after
//! insertion does not move it within the tree; rebuild with
//! [`SpatialTree::prepare`](super::SpatialTree::prepare) instead.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use super::bounds::Region;

/// Anything that can be placed in a quadtree (`R = Rect`) or octree (`R = AABB`)
///
/// Values must stay stable between insertion and any query that should see
/// the item. Items are told apart by address, so implementors must not be
/// zero-sized: distinct zero-sized values share an address and would collapse
/// into one entry.
pub trait SpatialItem<R: Region> {
    /// Reference location used for exact distance filtering
    fn location(&self) -> R::Point;

    /// Bounding volume used to place the item in the tree
    fn bounds(&self) -> R;

    /// Bounding-sphere radius added to the query range when filtering
    fn radius(&self) -> f32;
}

/// Borrowed item handle compared by identity
///
/// Two handles are equal only if they point at the same object, regardless
/// of the item's contents. Zero-sized items cannot be told apart and are
/// rejected by a debug assertion.
pub struct ItemRef<'a, T: ?Sized>(&'a T);

impl<'a, T: ?Sized> ItemRef<'a, T> {
    /// Wrap a borrowed item
    pub fn new(item: &'a T) -> Self {
        debug_assert!(
            std::mem::size_of_val(item) != 0,
            "zero-sized items have no distinct identity"
        );
        Self(item)
    }

    /// The underlying item, with the full borrow lifetime
    pub fn get(self) -> &'a T {
        self.0
    }

    fn addr(self) -> *const () {
        (self.0 as *const T).cast::<()>()
    }
}

impl<'a, T: ?Sized> From<&'a T> for ItemRef<'a, T> {
    fn from(item: &'a T) -> Self {
        Self::new(item)
    }
}

impl<T: ?Sized> Clone for ItemRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for ItemRef<'_, T> {}

impl<T: ?Sized> PartialEq for ItemRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl<T: ?Sized> Eq for ItemRef<'_, T> {}

impl<T: ?Sized> Hash for ItemRef<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl<T: ?Sized> Deref for ItemRef<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.0
    }
}

impl<T: ?Sized> fmt::Debug for ItemRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ItemRef").field(&self.addr()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug, PartialEq)]
    struct Marker(u32);

    #[test]
    fn test_equality_is_by_identity() {
        let a = Marker(1);
        let b = Marker(1);

        assert_eq!(a, b);
        assert_ne!(ItemRef::new(&a), ItemRef::new(&b));
        assert_eq!(ItemRef::new(&a), ItemRef::from(&a));
    }

    #[test]
    fn test_set_deduplicates_same_object() {
        let a = Marker(7);
        let b = Marker(7);

        let set: HashSet<_> = [ItemRef::new(&a), ItemRef::new(&a), ItemRef::new(&b)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "zero-sized items have no distinct identity")]
    fn test_zero_sized_items_rejected() {
        struct Unit;
        let _ = ItemRef::new(&Unit);
    }

    #[test]
    fn test_deref_reaches_item() {
        let a = Marker(3);
        let handle = ItemRef::new(&a);
        assert_eq!((*handle).0, 3);
        assert_eq!(handle.get().0, 3);
    }
}
