//! C5 — cluster condenser.
//!
//! Three sub-operations applied in order (§4.5): same-type buffer merge
//! (5a), line-segment join (5b), independent buffer insertion (5c). Each
//! walks the cluster space built by C2/C3 and restores its own
//! post-condition before the next sub-operation begins.

use std::collections::HashMap;

use grid_types::{ClusterId, NodeType, Refinement, RevisionError};

use crate::context::{EntityRef, Endpoint, PointRow, RevisionContext};

pub fn condense(ctx: &mut RevisionContext) -> Result<(), RevisionError> {
    same_type(ctx)?;
    line_join(ctx)?;
    independent_buffer(ctx)?;
    Ok(())
}

/// Every distinct, non-null cluster id currently carried by a point-row,
/// in ascending order. A stable enumeration order is what makes the
/// condenser's counters (and thus synthesized names) deterministic.
fn distinct_clusters(ctx: &RevisionContext) -> Vec<ClusterId> {
    let mut clusters: Vec<ClusterId> = ctx.points.iter().filter_map(|p| p.cluster).collect();
    clusters.sort_unstable();
    clusters.dedup();
    clusters
}

/// 5a — within each cluster, partition member buffers by `node_type`;
/// merge every duplicate into the first ("prime") buffer of that type.
pub fn same_type(ctx: &mut RevisionContext) -> Result<(), RevisionError> {
    for cluster in distinct_clusters(ctx) {
        merge_duplicates_in_cluster(ctx, cluster)?;
    }
    ctx.assert_contract()?;
    Ok(())
}

fn merge_duplicates_in_cluster(ctx: &mut RevisionContext, cluster: ClusterId) -> Result<(), RevisionError> {
    loop {
        let buffers = ctx.buffers_in_cluster(cluster);
        let mut seen: HashMap<NodeType, usize> = HashMap::new();
        let mut duplicate = None;
        for &idx in &buffers {
            let node_type = ctx.buffers[idx].node_type;
            match seen.get(&node_type) {
                Some(&prime) => {
                    duplicate = Some((prime, idx));
                    break;
                }
                None => {
                    seen.insert(node_type, idx);
                }
            }
        }
        let Some((prime_idx, dup_idx)) = duplicate else {
            return Ok(());
        };

        if ctx.buffers[prime_idx].node_type.accumulates_fuel_pairs() {
            let dup_pairs = ctx.buffers[dup_idx].fuel_capacities.clone().unwrap_or_default();
            let prime_pairs = ctx.buffers[prime_idx]
                .fuel_capacities
                .get_or_insert_with(Vec::new);
            for pair in dup_pairs {
                if !prime_pairs.contains(&pair) {
                    prime_pairs.push(pair);
                }
            }
        }
        // All other node types: the duplicate is simply discarded (§5a);
        // only its cluster membership survives, folded into the prime.

        let dup_clusters = ctx.buffers[dup_idx].clusters.clone();
        for c in dup_clusters {
            if !ctx.buffers[prime_idx].clusters.contains(&c) {
                ctx.buffers[prime_idx].clusters.push(c);
            }
        }

        ctx.delete_buffer(dup_idx)?;
    }
}

/// 5b — fuse transporters that meet at a degree-2, buffer-free cluster.
pub fn line_join(ctx: &mut RevisionContext) -> Result<(), RevisionError> {
    let mut t_idx = 0;
    while t_idx < ctx.transporters.len() {
        loop {
            if try_fuse(ctx, &mut t_idx, Endpoint::Origin)? {
                continue;
            }
            if try_fuse(ctx, &mut t_idx, Endpoint::Dest)? {
                continue;
            }
            break;
        }
        t_idx += 1;
    }
    ctx.assert_contract()?;
    Ok(())
}

/// Attempts one fusion at `t_idx`'s `end`. Returns `Ok(true)` if a fusion
/// happened (`t_idx` may have shifted down by one — the caller must keep
/// using the updated value) so the caller re-examines the same
/// transporter from scratch, matching `joinLineSegs`' `continue` without
/// advancing `k1`.
fn try_fuse(
    ctx: &mut RevisionContext,
    t_idx: &mut usize,
    end: Endpoint,
) -> Result<bool, RevisionError> {
    let cluster = match end {
        Endpoint::Origin => ctx.transporters[*t_idx].cluster_origin,
        Endpoint::Dest => ctx.transporters[*t_idx].cluster_dest,
    };
    let Some(cluster) = cluster else { return Ok(false) };

    if !ctx.buffers_in_cluster(cluster).is_empty() {
        return Ok(false);
    }
    let endpoints = ctx.transporter_endpoints_in_cluster(cluster);
    if endpoints.len() != 2 {
        return Ok(false);
    }
    let Some(&(peer_idx, peer_end)) = endpoints.iter().find(|&&(i, e)| !(i == *t_idx && e == end))
    else {
        return Ok(false);
    };
    if peer_idx == *t_idx {
        // Both endpoints of the same transporter share this cluster —
        // a self-loop, left for C4-style handling elsewhere, not a join.
        return Ok(false);
    }

    let (far_cluster, far_endpoint) = match peer_end {
        Endpoint::Origin => (
            ctx.transporters[peer_idx].cluster_dest,
            ctx.transporters[peer_idx].dest.clone(),
        ),
        Endpoint::Dest => (
            ctx.transporters[peer_idx].cluster_origin,
            ctx.transporters[peer_idx].origin.clone(),
        ),
    };
    let Some(far_cluster) = far_cluster else { return Ok(false) };

    let other_end_cluster = match end {
        Endpoint::Origin => ctx.transporters[*t_idx].cluster_dest,
        Endpoint::Dest => ctx.transporters[*t_idx].cluster_origin,
    };
    if other_end_cluster == Some(far_cluster) {
        // Fusing would create a self-loop ("looping lines" in the
        // source); leave both transporters as-is.
        return Ok(false);
    }

    match end {
        Endpoint::Origin => {
            ctx.transporters[*t_idx].cluster_origin = Some(far_cluster);
            ctx.transporters[*t_idx].origin = far_endpoint.clone();
        }
        Endpoint::Dest => {
            ctx.transporters[*t_idx].cluster_dest = Some(far_cluster);
            ctx.transporters[*t_idx].dest = far_endpoint.clone();
        }
    }
    let (fx, fy) = match &far_endpoint {
        grid_types::EndpointRef::Point { x, y } => (*x, *y),
        grid_types::EndpointRef::Buffer(_) => {
            return Err(RevisionError::invariant(
                "condense::line_join",
                "endpoint resolved to a buffer name before C6",
            ))
        }
    };
    for row in ctx.rows_for(EntityRef::Transporter(*t_idx, end)) {
        ctx.points[row].cluster = Some(far_cluster);
        ctx.points[row].x = fx;
        ctx.points[row].y = fy;
    }

    let shift = peer_idx < *t_idx;
    ctx.delete_transporter(peer_idx)?;
    if shift {
        *t_idx -= 1;
    }
    Ok(true)
}

/// 5c — synthesize a junction buffer at the centroid of every cluster
/// that aggregates three or more line-endpoints and holds no buffer.
pub fn independent_buffer(ctx: &mut RevisionContext) -> Result<(), RevisionError> {
    let mut count = 0usize;
    for cluster in distinct_clusters(ctx) {
        if !ctx.buffers_in_cluster(cluster).is_empty() {
            continue;
        }
        let endpoints = ctx.transporter_endpoints_in_cluster(cluster);
        if endpoints.len() < 3 {
            continue;
        }

        let mut refinements: Vec<Refinement> = Vec::new();
        for &(t_idx, _) in &endpoints {
            for r in &ctx.transporters[t_idx].refinements {
                if !refinements.contains(r) {
                    refinements.push(*r);
                }
            }
        }
        let node_type = dominant_node_type(&refinements);

        let rows = ctx.rows_in_cluster(cluster);
        let (x, y) = rows
            .first()
            .map(|&r| (ctx.points[r].x, ctx.points[r].y))
            .unwrap_or((0.0, 0.0));

        let mut buffer = grid_types::Buffer::new(format!("IndBuffer {count}"), x, y, node_type);
        buffer.refinements = refinements.clone();
        buffer.clusters.push(cluster);
        count += 1;
        let b_idx = ctx.push_buffer(buffer);
        for r in &refinements {
            ctx.points.push(PointRow {
                entity: EntityRef::Buffer(b_idx),
                refinement: *r,
                x,
                y,
                cluster: Some(cluster),
            });
        }
    }
    ctx.assert_contract()?;
    Ok(())
}

/// Junction-buffer subtype priority (§4.5 5c). Any refinement outside
/// the closed families falls back to `Bus`, matching the source's
/// `Bus`-like fallback for an unhandled refinement set (§7
/// `UnknownRefinement` in C5c).
fn dominant_node_type(refinements: &[Refinement]) -> NodeType {
    if refinements.contains(&Refinement::ElectricPower132kV) {
        NodeType::Bus
    } else if refinements.iter().any(Refinement::is_gas_family) {
        NodeType::NGIndBuffer
    } else if refinements.iter().any(Refinement::is_oil_family) {
        NodeType::OilIndBuffer
    } else if refinements.contains(&Refinement::Coal) {
        NodeType::CoalIndBuffer
    } else {
        NodeType::Bus
    }
}
