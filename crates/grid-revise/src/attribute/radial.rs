//! Radial connector emission (`linkClusterBuffers`).
//!
//! For every cluster whose primary was chosen from more than one member
//! buffer, emit one connector transporter from the primary to each
//! non-primary buffer, carrying the intersection of their refinements.
//! An empty intersection means no carrier exists between the two
//! buffers, so no connector is emitted for that pair.

use grid_types::{ClusterId, EndpointRef, LineStatus, LineType, Refinement, RevisionError, Transporter};

use super::primary::RadialCenters;
use crate::context::RevisionContext;

pub fn emit_radial_connectors(
    ctx: &mut RevisionContext,
    radial_centers: &RadialCenters,
) -> Result<(), RevisionError> {
    let mut clusters: Vec<ClusterId> = radial_centers.keys().copied().collect();
    clusters.sort_unstable();

    let mut counters: std::collections::HashMap<LineType, usize> = std::collections::HashMap::new();
    let mut new_transporters = Vec::new();

    for cluster in clusters {
        let &(line_type, primary_idx) = &radial_centers[&cluster];
        for buf_idx in ctx.buffers_in_cluster(cluster) {
            if buf_idx == primary_idx {
                continue;
            }
            let shared: Vec<Refinement> = ctx.buffers[primary_idx]
                .refinements
                .iter()
                .copied()
                .filter(|r| ctx.buffers[buf_idx].refinements.contains(r))
                .collect();
            if shared.is_empty() {
                continue;
            }

            let counter = counters.entry(line_type).or_insert(0);
            *counter += 1;
            let name = format!("{} Connector {}", connector_label(line_type), counter);

            let mut controllers = ctx.buffers[primary_idx].controllers.clone();
            for c in &ctx.buffers[buf_idx].controllers {
                if !controllers.contains(c) {
                    controllers.push(c.clone());
                }
            }

            let mut t = Transporter::new(
                name,
                EndpointRef::Buffer(ctx.buffers[primary_idx].name.clone()),
                EndpointRef::Buffer(ctx.buffers[buf_idx].name.clone()),
                line_type,
            );
            t.refinements = shared;
            t.status = LineStatus::Active;
            t.cluster_origin = Some(cluster);
            t.cluster_dest = Some(cluster);
            t.controllers = controllers;
            new_transporters.push(t);
        }
    }

    for t in new_transporters {
        ctx.push_transporter(t);
    }
    Ok(())
}

fn connector_label(line_type: LineType) -> &'static str {
    match line_type {
        LineType::ElecLine => "Transmission Line",
        LineType::NGPipe => "NG Pipeline",
        LineType::OilRefPipe => "Refined Oil Pipeline",
        LineType::OilCrudePipe => "Crude Oil Pipeline",
        LineType::CoalRailroad => "Coal Railroad",
        LineType::OtherPipe => "Pipeline",
    }
}
