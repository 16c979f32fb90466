//! C2 — spatial clusterer.
//!
//! Three-radius snapping over point-rows sharing a refinement column
//! (§4.2). Primary pass sweeps transporter endpoints in insertion order;
//! secondary pass attaches leftover points to the nearest endpoint
//! cluster or queues a synthetic-transporter request; midpoint collapse
//! replaces every member's coordinate with its cluster's centroid.

use std::collections::HashMap;

use grid_types::constants::{EPSILON_PRIMARY, EPSILON_SECONDARY, EPSILON_TERTIARY};
use grid_types::{ClusterId, RevisionError};
use tracing::debug;

use crate::context::{EntityRef, Endpoint, RevisionContext, SynthRequest};

pub fn cluster(ctx: &mut RevisionContext) -> Result<(), RevisionError> {
    primary_pass(ctx);
    secondary_pass(ctx);
    collapse_midpoints(ctx);
    ctx.sync_clusters_to_entities();
    debug!(
        clusters = ctx.cluster_alloc_count(),
        synth_requests = ctx.synth_queue.len(),
        "C2 clustering complete"
    );
    Ok(())
}

impl RevisionContext {
    fn cluster_alloc_count(&self) -> u32 {
        self.cluster_alloc.peek()
    }
}

/// Iterate transporter endpoints in insertion order; for each, find the
/// nearest already-clustered same-refinement candidate within
/// `EPSILON_PRIMARY` (tie-break: smallest distance, then lowest
/// cluster-id); otherwise allocate a fresh cluster.
fn primary_pass(ctx: &mut RevisionContext) {
    let num_transporters = ctx.transporters.len();
    for t_idx in 0..num_transporters {
        for end in [Endpoint::Origin, Endpoint::Dest] {
            let rows = ctx.rows_for(EntityRef::Transporter(t_idx, end));
            for row_idx in rows {
                if ctx.points[row_idx].cluster.is_some() {
                    continue;
                }
                assign_via_nearest(ctx, row_idx, EPSILON_PRIMARY);
            }
        }
    }
}

/// For every point-row still unclustered after the primary pass, attach
/// to the nearest same-refinement clustered row within `EPSILON_SECONDARY`;
/// else allocate a new cluster and queue a synthesis request if within
/// `EPSILON_TERTIARY`; else leave unclustered (pruned by C4).
fn secondary_pass(ctx: &mut RevisionContext) {
    let unclustered: Vec<usize> = ctx
        .points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.cluster.is_none())
        .map(|(i, _)| i)
        .collect();

    for row_idx in unclustered {
        if ctx.points[row_idx].cluster.is_some() {
            continue;
        }
        let refinement = ctx.points[row_idx].refinement;
        let (x, y) = (ctx.points[row_idx].x, ctx.points[row_idx].y);

        let nearest = ctx
            .points
            .iter()
            .enumerate()
            .filter(|(i, p)| {
                *i != row_idx
                    && p.refinement == refinement
                    && p.cluster.is_some()
                    && matches!(p.entity, EntityRef::Transporter(_, _))
            })
            .map(|(i, p)| (i, RevisionContext::distance(x, y, p.x, p.y)))
            .min_by(|(ia, da), (ib, db)| {
                da.partial_cmp(db)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(ia.cmp(ib))
            });

        match nearest {
            Some((nearest_idx, dist)) if dist <= EPSILON_SECONDARY => {
                ctx.points[row_idx].cluster = ctx.points[nearest_idx].cluster;
            }
            Some((nearest_idx, dist)) if dist <= EPSILON_TERTIARY => {
                let cluster = ctx.cluster_alloc.next();
                ctx.points[row_idx].cluster = Some(cluster);
                let to_cluster = ctx.points[nearest_idx]
                    .cluster
                    .expect("secondary pass only matches already-clustered candidates");
                ctx.synth_queue.push(SynthRequest {
                    from: ctx.points[row_idx].entity,
                    to: ctx.points[nearest_idx].entity,
                    refinement,
                    from_xy: (x, y),
                    to_xy: (ctx.points[nearest_idx].x, ctx.points[nearest_idx].y),
                    from_cluster: cluster,
                    to_cluster,
                });
            }
            _ => {
                // Left unclustered; C4 prunes it.
            }
        }
    }
}

fn assign_via_nearest(ctx: &mut RevisionContext, row_idx: usize, epsilon: f64) {
    let refinement = ctx.points[row_idx].refinement;
    let (x, y) = (ctx.points[row_idx].x, ctx.points[row_idx].y);

    let best = ctx
        .points
        .iter()
        .enumerate()
        .filter(|(i, p)| *i != row_idx && p.refinement == refinement && p.cluster.is_some())
        .map(|(_, p)| (RevisionContext::distance(x, y, p.x, p.y), p.cluster.unwrap()))
        .filter(|(d, _)| *d <= epsilon)
        .min_by(|(da, ca), (db, cb)| da.partial_cmp(db).unwrap_or(std::cmp::Ordering::Equal).then(ca.cmp(cb)));

    let cluster = match best {
        Some((_, c)) => c,
        None => ctx.cluster_alloc.next(),
    };
    ctx.points[row_idx].cluster = Some(cluster);
}

/// Replace every clustered point-row's coordinate with the centroid of
/// its cluster's members (§4.2).
fn collapse_midpoints(ctx: &mut RevisionContext) {
    let mut sums: HashMap<ClusterId, (f64, f64, usize)> = HashMap::new();
    for p in &ctx.points {
        if let Some(c) = p.cluster {
            let entry = sums.entry(c).or_insert((0.0, 0.0, 0));
            entry.0 += p.x;
            entry.1 += p.y;
            entry.2 += 1;
        }
    }
    for p in &mut ctx.points {
        if let Some(c) = p.cluster {
            let (sx, sy, n) = sums[&c];
            p.x = sx / n as f64;
            p.y = sy / n as f64;
        }
    }

    // Reflect collapsed coordinates back onto the owning entities so
    // downstream distance math (C5, C6) sees the same positions.
    let num_transporters = ctx.transporters.len();
    let mut entity_xy: HashMap<(usize, bool), (f64, f64, usize)> = HashMap::new();
    let mut buffer_xy: HashMap<usize, (f64, f64, usize)> = HashMap::new();
    for p in &ctx.points {
        match p.entity {
            EntityRef::Transporter(i, end) => {
                let key = (i, matches!(end, Endpoint::Dest));
                let e = entity_xy.entry(key).or_insert((0.0, 0.0, 0));
                e.0 += p.x;
                e.1 += p.y;
                e.2 += 1;
            }
            EntityRef::Buffer(i) => {
                let e = buffer_xy.entry(i).or_insert((0.0, 0.0, 0));
                e.0 += p.x;
                e.1 += p.y;
                e.2 += 1;
            }
        }
    }
    for ((i, is_dest), (sx, sy, n)) in entity_xy {
        if i >= num_transporters || n == 0 {
            continue;
        }
        let (x, y) = (sx / n as f64, sy / n as f64);
        let endpoint = grid_types::EndpointRef::Point { x, y };
        if is_dest {
            ctx.transporters[i].dest = endpoint;
        } else {
            ctx.transporters[i].origin = endpoint;
        }
    }
    for (i, (sx, sy, n)) in buffer_xy {
        if i >= ctx.buffers.len() || n == 0 {
            continue;
        }
        ctx.buffers[i].x = sx / n as f64;
        ctx.buffers[i].y = sy / n as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assemble;
    use grid_ingest::{SubsystemInput, TransporterRecord};
    use grid_types::{LineStatus, LineType, Refinement};

    fn elec(name: &str, ox: f64, oy: f64, dx: f64, dy: f64) -> TransporterRecord {
        TransporterRecord {
            name: name.to_string(),
            line_type: LineType::ElecLine,
            origin_xy: (ox, oy),
            dest_xy: (dx, dy),
            refinements: vec![Refinement::ElectricPower132kV],
            status: LineStatus::Active,
        }
    }

    #[test]
    fn s1_primary_snap() {
        // T1 (0,0)->(1,0), T2 (1.001,0)->(2,0): three clusters, middle shared.
        let input = SubsystemInput {
            refinements: vec![Refinement::ElectricPower132kV],
            buffers: vec![],
            transporters: vec![
                elec("T1", 0.0, 0.0, 1.0, 0.0),
                elec("T2", 1.0010, 0.0, 2.0, 0.0),
            ],
        };
        let mut ctx = assemble(&[input]).unwrap();
        cluster(&mut ctx).unwrap();
        assert_eq!(ctx.transporters[0].cluster_dest, ctx.transporters[1].cluster_origin);
        assert_ne!(ctx.transporters[0].cluster_origin, ctx.transporters[0].cluster_dest);
        assert_ne!(ctx.transporters[1].cluster_origin, ctx.transporters[1].cluster_dest);
    }

    #[test]
    fn s3_tertiary_synthesis_queues_request() {
        let input = SubsystemInput {
            refinements: vec![Refinement::ElectricPower132kV],
            buffers: vec![grid_ingest::BufferRecord {
                name: "Gen1".to_string(),
                node_type: grid_types::NodeType::GenC,
                x: 1.2,
                y: 0.0,
                refinements: vec![Refinement::ElectricPower132kV],
                capacities: None,
                region: None,
                iso: None,
                status: None,
            }],
            transporters: vec![elec("T1", 0.0, 0.0, 1.0, 0.0), elec("T2", 2.0, 0.0, 3.0, 0.0)],
        };
        let mut ctx = assemble(&[input]).unwrap();
        cluster(&mut ctx).unwrap();
        assert_eq!(ctx.synth_queue.len(), 1);
    }
}
