//! The shared mutable state C1-C6 operate on, and the positional contract
//! (I1) that governs every insertion and deletion into it.
//!
//! Rather than storing a row index in every `PointRow` and shifting it by
//! hand on every mutation (the source's approach, and the one the design
//! notes call out as error-prone), a `PointRow` names its owning entity by
//! *reference* (`EntityRef`) and the dense index is always recomputed from
//! the current length of `transporters`. A transporter insertion or
//! deletion therefore shifts every downstream buffer's positional index
//! for free, by construction, instead of by a hand-rolled shift pass.

use std::collections::HashMap;

use grid_types::{Buffer, ClusterId, ClusterIdAllocator, Refinement, RevisionError, Transporter};

/// Which end of a transporter a `PointRow` describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Origin,
    Dest,
}

/// What a `PointRow` belongs to. The positional contract (I1) is the
/// function `entity_index` below, not a stored field: `i < 2*|T|` is a
/// transporter endpoint, `i >= 2*|T|` is a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Transporter(usize, Endpoint),
    Buffer(usize),
}

impl EntityRef {
    pub fn entity_index(&self, num_transporters: usize) -> usize {
        match *self {
            EntityRef::Transporter(i, Endpoint::Origin) => 2 * i,
            EntityRef::Transporter(i, Endpoint::Dest) => 2 * i + 1,
            EntityRef::Buffer(i) => 2 * num_transporters + i,
        }
    }
}

/// A unified record for a buffer or a transporter endpoint, scoped to a
/// single refinement column, used only by C1-C5 (§3).
#[derive(Debug, Clone)]
pub struct PointRow {
    pub entity: EntityRef,
    pub refinement: Refinement,
    pub x: f64,
    pub y: f64,
    pub cluster: Option<ClusterId>,
}

/// A request, queued by C2's secondary pass, for C3 to materialize a new
/// transporter between an isolated point and its nearest neighbor. `from`
/// is the isolated row, freshly assigned `from_cluster`; `to` is the
/// already-clustered row it snapped onto, keeping its existing
/// `to_cluster` — the two ends must stay in different clusters or the
/// synthesized transporter would be a self-loop (I3).
#[derive(Debug, Clone)]
pub struct SynthRequest {
    pub from: EntityRef,
    pub to: EntityRef,
    pub refinement: Refinement,
    pub from_xy: (f64, f64),
    pub to_xy: (f64, f64),
    pub from_cluster: ClusterId,
    pub to_cluster: ClusterId,
}

/// The graph state shared by C1-C6. Owns every transporter, buffer, and
/// point-row; all mutation goes through the methods below so the
/// positional contract can never be violated ad hoc (§9).
#[derive(Debug, Clone, Default)]
pub struct RevisionContext {
    pub transporters: Vec<Transporter>,
    pub buffers: Vec<Buffer>,
    pub points: Vec<PointRow>,
    /// Global, first-seen-order refinement list (§4.1). Explicit field,
    /// not a singleton (§9).
    pub refinements: Vec<Refinement>,
    /// All controller labels ever attached to any entity, deduplicated.
    /// Explicit field, not a singleton (§9).
    pub controllers: Vec<String>,
    pub cluster_alloc: ClusterIdAllocator,
    pub synth_queue: Vec<SynthRequest>,
}

impl RevisionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_refinement(&mut self, refinement: Refinement) {
        if !self.refinements.contains(&refinement) {
            self.refinements.push(refinement);
        }
    }

    pub fn register_controller(&mut self, label: &str) {
        if !self.controllers.iter().any(|c| c == label) {
            self.controllers.push(label.to_string());
        }
    }

    pub fn push_transporter(&mut self, t: Transporter) -> usize {
        self.transporters.push(t);
        self.transporters.len() - 1
    }

    pub fn push_buffer(&mut self, b: Buffer) -> usize {
        self.buffers.push(b);
        self.buffers.len() - 1
    }

    /// Removes a transporter and every point-row that named it, then
    /// renumbers every `EntityRef::Transporter` index greater than `idx`
    /// down by one. Buffer-row positional indices shift `-2` for free
    /// (§4.4) because they are derived from `transporters.len()`.
    pub fn delete_transporter(&mut self, idx: usize) -> Result<(), RevisionError> {
        if idx >= self.transporters.len() {
            return Err(RevisionError::invariant(
                "prune",
                format!("transporter index {idx} out of bounds"),
            ));
        }
        self.points.retain(|p| !matches!(p.entity, EntityRef::Transporter(i, _) if i == idx));
        for p in &mut self.points {
            if let EntityRef::Transporter(i, _) = &mut p.entity {
                if *i > idx {
                    *i -= 1;
                }
            }
        }
        self.transporters.remove(idx);
        Ok(())
    }

    /// Removes a buffer and every point-row that named it, then
    /// renumbers every `EntityRef::Buffer` index greater than `idx` down
    /// by one (§4.4).
    pub fn delete_buffer(&mut self, idx: usize) -> Result<(), RevisionError> {
        if idx >= self.buffers.len() {
            return Err(RevisionError::invariant(
                "prune",
                format!("buffer index {idx} out of bounds"),
            ));
        }
        self.points.retain(|p| !matches!(p.entity, EntityRef::Buffer(i) if i == idx));
        for p in &mut self.points {
            if let EntityRef::Buffer(i) = &mut p.entity {
                if *i > idx {
                    *i -= 1;
                }
            }
        }
        self.buffers.remove(idx);
        Ok(())
    }

    /// Debug-oriented sanity check that every point-row's entity actually
    /// exists; a violation here would indicate a bug in the delete/insert
    /// helpers above rather than bad input, so it is always an
    /// `InvariantViolation` (§7, §9 open question (a)).
    pub fn assert_contract(&self) -> Result<(), RevisionError> {
        let num_t = self.transporters.len();
        for p in &self.points {
            match p.entity {
                EntityRef::Transporter(i, _) => {
                    if i >= num_t {
                        return Err(RevisionError::invariant(
                            "context",
                            format!("point-row references transporter {i} but only {num_t} exist"),
                        ));
                    }
                }
                EntityRef::Buffer(i) => {
                    if i >= self.buffers.len() {
                        return Err(RevisionError::invariant(
                            "context",
                            format!(
                                "point-row references buffer {i} but only {} exist",
                                self.buffers.len()
                            ),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// After clustering, push each point-row's cluster assignment back
    /// onto its owning `Transporter`/`Buffer` (I2).
    pub fn sync_clusters_to_entities(&mut self) {
        for p in &self.points {
            let Some(cluster) = p.cluster else { continue };
            match p.entity {
                EntityRef::Transporter(i, Endpoint::Origin) => {
                    self.transporters[i].cluster_origin = Some(cluster);
                }
                EntityRef::Transporter(i, Endpoint::Dest) => {
                    self.transporters[i].cluster_dest = Some(cluster);
                }
                EntityRef::Buffer(i) => {
                    if !self.buffers[i].clusters.contains(&cluster) {
                        self.buffers[i].clusters.push(cluster);
                    }
                }
            }
        }
    }

    /// Euclidean distance between two point-rows, planar on stored
    /// `(x, y)` per §4.2.
    pub fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
        ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
    }

    /// All point-row indices for a given entity (an entity may serve
    /// several refinements, hence several rows).
    pub fn rows_for(&self, entity: EntityRef) -> Vec<usize> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.entity == entity)
            .map(|(i, _)| i)
            .collect()
    }

    /// Point-row indices belonging to a cluster.
    pub fn rows_in_cluster(&self, cluster: ClusterId) -> Vec<usize> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.cluster == Some(cluster))
            .map(|(i, _)| i)
            .collect()
    }

    /// Distinct transporter indices that have at least one endpoint in
    /// `cluster`, paired with which endpoint.
    pub fn transporter_endpoints_in_cluster(&self, cluster: ClusterId) -> Vec<(usize, Endpoint)> {
        let mut seen = HashMap::new();
        for p in &self.points {
            if p.cluster != Some(cluster) {
                continue;
            }
            if let EntityRef::Transporter(i, end) = p.entity {
                seen.insert((i, end), ());
            }
        }
        let mut out: Vec<_> = seen.into_keys().collect();
        out.sort_by_key(|(i, end)| (*i, matches!(end, Endpoint::Dest)));
        out
    }

    /// Distinct buffer indices that have at least one point-row in
    /// `cluster`.
    pub fn buffers_in_cluster(&self, cluster: ClusterId) -> Vec<usize> {
        let mut seen: Vec<usize> = self
            .points
            .iter()
            .filter_map(|p| match p.entity {
                EntityRef::Buffer(i) if p.cluster == Some(cluster) => Some(i),
                _ => None,
            })
            .collect();
        seen.sort_unstable();
        seen.dedup();
        seen
    }
}
