//! C1 — point-table assembler.
//!
//! Flattens every subsystem's buffers and transporter endpoints into one
//! `RevisionContext`, line-endpoints first and buffers second, keyed by
//! commodity refinement (§4.1). A subsystem's refinements are appended to
//! the global list only the first time they are seen.

use grid_ingest::SubsystemInput;
use grid_types::{EndpointRef, RevisionError, Transporter};
use tracing::warn;

use crate::context::{EntityRef, Endpoint, PointRow, RevisionContext};

/// Assembles a `RevisionContext` from a sequence of subsystem inputs,
/// applied in the order given. A subsystem contributing neither buffers
/// nor transporters is a no-op (§4.1 "a missing subsystem yields empty
/// sub-tables").
pub fn assemble(inputs: &[SubsystemInput]) -> Result<RevisionContext, RevisionError> {
    let mut ctx = RevisionContext::new();

    for input in inputs {
        for refinement in &input.refinements {
            ctx.register_refinement(*refinement);
        }

        for record in &input.transporters {
            if record.refinements.is_empty() {
                warn!(name = %record.name, "transporter has no refinements, skipping (MalformedInput)");
                continue;
            }
            let mut transporter = Transporter::new(
                record.name.clone(),
                EndpointRef::Point {
                    x: record.origin_xy.0,
                    y: record.origin_xy.1,
                },
                EndpointRef::Point {
                    x: record.dest_xy.0,
                    y: record.dest_xy.1,
                },
                record.line_type,
            );
            transporter.refinements = record.refinements.clone();
            transporter.status = record.status;
            let idx = ctx.push_transporter(transporter);

            for refinement in &record.refinements {
                ctx.points.push(PointRow {
                    entity: EntityRef::Transporter(idx, Endpoint::Origin),
                    refinement: *refinement,
                    x: record.origin_xy.0,
                    y: record.origin_xy.1,
                    cluster: None,
                });
                ctx.points.push(PointRow {
                    entity: EntityRef::Transporter(idx, Endpoint::Dest),
                    refinement: *refinement,
                    x: record.dest_xy.0,
                    y: record.dest_xy.1,
                    cluster: None,
                });
            }
        }

        for record in &input.buffers {
            if record.refinements.is_empty() {
                warn!(name = %record.name, "buffer has no refinements, skipping (MalformedInput)");
                continue;
            }
            let mut buffer =
                grid_types::Buffer::new(record.name.clone(), record.x, record.y, record.node_type);
            buffer.refinements = record.refinements.clone();
            buffer.fuel_capacities = record.capacities.clone();
            buffer.region = record.region.clone();
            buffer.iso = record.iso.clone();
            let idx = ctx.push_buffer(buffer);

            for refinement in &record.refinements {
                ctx.points.push(PointRow {
                    entity: EntityRef::Buffer(idx),
                    refinement: *refinement,
                    x: record.x,
                    y: record.y,
                    cluster: None,
                });
            }
        }
    }

    ctx.assert_contract()?;
    Ok(ctx)
}
