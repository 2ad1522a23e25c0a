//! Arena collections for caller-owned spatial items
//!
//! The indexes never own the items they hold. Callers typically keep their
//! items in a [`HandleMap`] and hand the index borrowed references, so the
//! borrow checker guarantees the arena outlives every tree built over it.

pub use slotmap::{SlotMap, DefaultKey};

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<DefaultKey, T>;
