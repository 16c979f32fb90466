//! Polygon containment/distance lookups (§6.2).
//!
//! ## Map-reduce attribution
//!
//! A single buffer's attribution is containment-then-nearest over one
//! catalog; attributing a whole buffer list is an embarrassingly
//! parallel map (§5: "polygon containment in C6 is naturally
//! parallelizable"), so `attribute_many` follows the same
//! map-then-serialize-writes shape as other read-only batch passes in
//! this workspace: map each buffer to its label independently, then
//! apply writes to the shared controller list sequentially at the
//! call site.

use geo::{Contains, EuclideanDistance, Point, Polygon};
use rayon::prelude::*;

/// Below this many points, sequential iteration avoids rayon's
/// thread-pool overhead.
pub const PARALLEL_THRESHOLD: usize = 64;

/// An ordered sequence of `(label, polygon)` pairs (§6.2). The core
/// treats polygons as opaque; this catalog only needs containment and
/// distance.
#[derive(Debug, Clone, Default)]
pub struct PolygonCatalog {
    entries: Vec<(String, Polygon<f64>)>,
}

impl PolygonCatalog {
    pub fn new(entries: Vec<(String, Polygon<f64>)>) -> Self {
        PolygonCatalog { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Containment first (in catalog order, first match wins), else the
    /// label of the polygon nearest to `(x, y)` by Euclidean distance.
    /// `None` only when the catalog itself is empty (§7 `PolygonMiss`).
    pub fn attribute(&self, x: f64, y: f64) -> Option<&str> {
        let point = Point::new(x, y);
        if let Some((label, _)) = self.entries.iter().find(|(_, poly)| poly.contains(&point)) {
            return Some(label.as_str());
        }
        self.entries
            .iter()
            .min_by(|(_, a), (_, b)| {
                a.euclidean_distance(&point)
                    .partial_cmp(&b.euclidean_distance(&point))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(label, _)| label.as_str())
    }

    /// Attribute many points at once. Falls back to sequential iteration
    /// for small batches.
    pub fn attribute_many(&self, points: &[(f64, f64)]) -> Vec<Option<String>> {
        if points.len() < PARALLEL_THRESHOLD {
            points
                .iter()
                .map(|(x, y)| self.attribute(*x, *y).map(str::to_owned))
                .collect()
        } else {
            points
                .par_iter()
                .map(|(x, y)| self.attribute(*x, *y).map(str::to_owned))
                .collect()
        }
    }
}
