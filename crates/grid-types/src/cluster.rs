use std::fmt;

use serde::{Deserialize, Serialize};

/// Dense, monotonically-increasing identifier for a geometric equivalence
/// class of point-rows, assigned by the spatial clusterer (C2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClusterId(pub u32);

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic allocator for `ClusterId`s, owned by the revision context.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterIdAllocator(u32);

impl ClusterIdAllocator {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn next(&mut self) -> ClusterId {
        let id = ClusterId(self.0);
        self.0 += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn peek(&self) -> u32 {
        self.0
    }
}
