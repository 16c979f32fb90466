//! Cluster-primary selection and endpoint naming
//! (`findClusterPrimary`/`setPipeODNames2`).
//!
//! For every transporter, each endpoint's cluster is resolved to a
//! single primary buffer — cached per cluster so a cluster visited from
//! several transporters always yields the same primary (I6) — and the
//! transporter's bare-tuple endpoint is rewritten to that primary's name
//! (I5). A transporter with an unnameable endpoint is dropped.

use std::collections::HashMap;

use grid_types::{Buffer, ClusterId, EndpointRef, LineType, NodeType, RevisionError};

use crate::context::RevisionContext;

/// `cluster -> (line_type, primary buffer index)`, recorded only for
/// clusters with more than one member buffer — the set `radial` needs to
/// emit connectors for (`linkClusterBuffers`' `clusterRadialCenter`).
pub type RadialCenters = HashMap<ClusterId, (LineType, usize)>;

pub fn assign_primaries_and_names(ctx: &mut RevisionContext) -> Result<RadialCenters, RevisionError> {
    let mut primary_cache: HashMap<ClusterId, usize> = HashMap::new();
    let mut radial_centers: RadialCenters = HashMap::new();
    let mut unnameable = Vec::new();

    for t_idx in 0..ctx.transporters.len() {
        let line_type = ctx.transporters[t_idx].line_type;
        let origin_cluster = ctx.transporters[t_idx].cluster_origin;
        let dest_cluster = ctx.transporters[t_idx].cluster_dest;

        let origin_primary = resolve_primary(ctx, origin_cluster, line_type, &mut primary_cache, &mut radial_centers);
        let dest_primary = resolve_primary(ctx, dest_cluster, line_type, &mut primary_cache, &mut radial_centers);

        match (origin_primary, dest_primary) {
            (Some(o_idx), Some(d_idx)) => {
                let o_name = ctx.buffers[o_idx].name.clone();
                let d_name = ctx.buffers[d_idx].name.clone();
                ctx.transporters[t_idx].origin = EndpointRef::Buffer(o_name);
                ctx.transporters[t_idx].dest = EndpointRef::Buffer(d_name);

                let mut controllers = ctx.buffers[o_idx].controllers.clone();
                for c in &ctx.buffers[d_idx].controllers {
                    if !controllers.contains(c) {
                        controllers.push(c.clone());
                    }
                }
                ctx.transporters[t_idx].controllers = controllers;
            }
            _ => unnameable.push(t_idx),
        }
    }

    for t_idx in unnameable.into_iter().rev() {
        ctx.delete_transporter(t_idx)?;
    }

    Ok(radial_centers)
}

fn resolve_primary(
    ctx: &RevisionContext,
    cluster: Option<ClusterId>,
    line_type: LineType,
    cache: &mut HashMap<ClusterId, usize>,
    radial_centers: &mut RadialCenters,
) -> Option<usize> {
    let cluster = cluster?;
    if let Some(&idx) = cache.get(&cluster) {
        return Some(idx);
    }

    let buffers = ctx.buffers_in_cluster(cluster);
    let primary_idx = match buffers.len() {
        0 => return None,
        1 => buffers[0],
        _ => {
            let chosen = find_cluster_primary(line_type, &buffers, &ctx.buffers);
            radial_centers.insert(cluster, (line_type, chosen));
            chosen
        }
    };
    cache.insert(cluster, primary_idx);
    Some(primary_idx)
}

/// `findClusterPrimary`: priority order per line type (§4.6 table);
/// first match wins, ties within a tier resolved by ascending buffer
/// index (discovery order). Any line type without an explicit priority
/// row (`OtherPipe`) and the `NGPipe` "any" fallback both resolve to the
/// first buffer in the cluster.
fn find_cluster_primary(line_type: LineType, buffer_idxs: &[usize], buffers: &[Buffer]) -> usize {
    let priority: &[NodeType] = match line_type {
        LineType::ElecLine => &[NodeType::LoadC, NodeType::LoadS, NodeType::GenC, NodeType::GenS],
        LineType::NGPipe => &[
            NodeType::NGReceiptDelivery,
            NodeType::NGProcessor,
            NodeType::Compressor,
        ],
        LineType::OilRefPipe | LineType::OilCrudePipe => {
            &[NodeType::OilPort, NodeType::OilTerminal, NodeType::OilRefinery]
        }
        LineType::CoalRailroad => &[NodeType::CoalDock, NodeType::CoalSource],
        LineType::OtherPipe => &[],
    };

    for &node_type in priority {
        if let Some(&idx) = buffer_idxs.iter().find(|&&i| buffers[i].node_type == node_type) {
            return idx;
        }
    }
    buffer_idxs[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assemble;
    use crate::cluster::cluster;
    use grid_ingest::{BufferRecord, SubsystemInput, TransporterRecord};
    use grid_types::{LineStatus, Refinement};

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

    fn loadc(name: &str, x: f64, y: f64) -> BufferRecord {
        BufferRecord {
            name: name.to_string(),
            node_type: NodeType::LoadC,
            x,
            y,
            refinements: vec![Refinement::ElectricPower132kV],
            capacities: None,
            region: None,
            iso: None,
            status: None,
        }
    }

    #[test]
    fn s2_secondary_attach_names_middle_primary() {
        let mut buf = loadc("Load1", 1.0050, 0.0005);
        buf.node_type = NodeType::LoadC;
        let input = SubsystemInput {
            refinements: vec![Refinement::ElectricPower132kV],
            buffers: vec![buf],
            transporters: vec![
                elec("T1", 0.0, 0.0, 1.0, 0.0),
                elec("T2", 1.0010, 0.0, 2.0, 0.0),
            ],
        };
        let mut ctx = assemble(&[input]).unwrap();
        cluster(&mut ctx).unwrap();
        crate::synthesize::synthesize(&mut ctx).unwrap();
        crate::prune::prune(&mut ctx).unwrap();
        crate::condense::condense(&mut ctx).unwrap();
        assign_primaries_and_names(&mut ctx).unwrap();
        assert_eq!(
            ctx.transporters[0].dest.as_buffer_name(),
            Some("Load1")
        );
        assert_eq!(
            ctx.transporters[1].origin.as_buffer_name(),
            Some("Load1")
        );
    }

    #[test]
    fn single_member_cluster_is_primary_unconditionally() {
        let input = SubsystemInput {
            refinements: vec![Refinement::ElectricPower132kV],
            buffers: vec![loadc("Load1", 1.0, 0.0)],
            transporters: vec![elec("T1", 0.0, 0.0, 1.0005, 0.0)],
        };
        let mut ctx = assemble(&[input]).unwrap();
        cluster(&mut ctx).unwrap();
        crate::synthesize::synthesize(&mut ctx).unwrap();
        crate::prune::prune(&mut ctx).unwrap();
        crate::condense::condense(&mut ctx).unwrap();
        assign_primaries_and_names(&mut ctx).unwrap();
        assert_eq!(ctx.transporters[0].dest.as_buffer_name(), Some("Load1"));
    }
}
