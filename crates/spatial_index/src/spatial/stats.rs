//! Diagnostic counters for the spatial indexes
//!
//! Informational only; nothing in the index behaves differently based on them.

use std::fmt;
use std::time::Duration;

/// Shape of the tree since the last `prepare`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Total nodes created, root included
    pub node_count: usize,

    /// Deepest depth reached by any split (root is 0)
    pub max_depth: u32,
}

impl IndexStats {
    pub(crate) fn for_root() -> Self {
        Self {
            node_count: 1,
            max_depth: 0,
        }
    }

    pub(crate) fn record_split(&mut self, children: usize, depth: u32) {
        self.node_count += children;
        self.max_depth = self.max_depth.max(depth);
    }
}

impl Default for IndexStats {
    fn default() -> Self {
        Self::for_root()
    }
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "max depth {}, {} nodes", self.max_depth, self.node_count)
    }
}

/// Cost of the most recent query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryStats {
    /// Items gathered by the coarse box pass
    pub candidates: usize,

    /// Items left after exact filtering
    pub results: usize,

    /// Wall time spent in the query
    pub elapsed: Duration,
}

impl fmt::Display for QueryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "search found {} results ({} candidates) in {:.3} ms",
            self.results,
            self.candidates,
            self.elapsed.as_secs_f64() * 1000.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_accounting() {
        let mut stats = IndexStats::for_root();
        stats.record_split(4, 1);
        stats.record_split(4, 2);
        stats.record_split(4, 1);

        assert_eq!(stats.node_count, 13);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.to_string(), "max depth 2, 13 nodes");
    }
}
