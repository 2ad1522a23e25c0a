//! Spatial index errors

use thiserror::Error;

/// Errors returned by the quadtree and octree
///
/// All of these indicate a caller bug rather than a runtime condition; there
/// is nothing to retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndexError {
    /// The index was used before [`prepare`](super::SpatialTree::prepare)
    #[error("spatial index used before prepare() was called")]
    NotPrepared,

    /// Construction-time misconfiguration
    #[error("invalid index configuration: {0}")]
    InvalidConfiguration(String),

    /// Query radius was negative or not finite
    #[error("invalid search range: {0}")]
    InvalidRange(f32),
}
