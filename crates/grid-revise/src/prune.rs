//! C4 — pruner.
//!
//! Isolate removal followed by self-loop removal (§4.4), both routed
//! through `RevisionContext::delete_buffer`/`delete_transporter` so the
//! positional contract never needs a hand-written shift.

use grid_types::RevisionError;
use tracing::debug;

pub fn prune(ctx: &mut crate::context::RevisionContext) -> Result<(), RevisionError> {
    let isolates_removed = remove_isolates(ctx)?;
    let self_loops_removed = remove_self_loops(ctx)?;
    // Self-loop removal can strand a buffer that was only reachable
    // through the removed transporter; re-scan once more (§4.4).
    let isolates_removed_second_pass = remove_isolates(ctx)?;
    ctx.assert_contract()?;
    debug!(
        isolates_removed = isolates_removed + isolates_removed_second_pass,
        self_loops_removed,
        "C4 pruning complete"
    );
    Ok(())
}

/// Drop every buffer whose every point-row has a null cluster-id. A
/// buffer with at least one clustered row (possible across refinements)
/// survives in full (§4.4).
fn remove_isolates(ctx: &mut crate::context::RevisionContext) -> Result<usize, RevisionError> {
    let mut removed = 0;
    let mut idx = 0;
    while idx < ctx.buffers.len() {
        let rows = ctx.rows_for(crate::context::EntityRef::Buffer(idx));
        let has_cluster = rows.iter().any(|&r| ctx.points[r].cluster.is_some());
        if has_cluster {
            idx += 1;
            continue;
        }
        ctx.delete_buffer(idx)?;
        removed += 1;
        // Do not advance: the next buffer has shifted into `idx`.
    }
    Ok(removed)
}

/// Drop every transporter whose origin and destination share a cluster
/// (I3). Deletion is driven by a fresh scan after each removal since
/// transporter indices shift by one per deletion (not two — `-2` in
/// §4.4 refers to point-row positional indices, not the transporter
/// array index itself).
fn remove_self_loops(ctx: &mut crate::context::RevisionContext) -> Result<usize, RevisionError> {
    let mut removed = 0;
    let mut idx = 0;
    while idx < ctx.transporters.len() {
        if ctx.transporters[idx].is_self_loop() {
            ctx.delete_transporter(idx)?;
            removed += 1;
            continue;
        }
        idx += 1;
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assemble;
    use crate::cluster::cluster;
    use grid_ingest::{SubsystemInput, TransporterRecord};
    use grid_types::{LineStatus, LineType, Refinement};

    #[test]
    fn s4_self_loop_is_removed() {
        let input = SubsystemInput {
            refinements: vec![Refinement::ElectricPower132kV],
            buffers: vec![],
            transporters: vec![TransporterRecord {
                name: "Loopy".to_string(),
                line_type: LineType::ElecLine,
                origin_xy: (0.0, 0.0),
                dest_xy: (0.0001, 0.0001),
                refinements: vec![Refinement::ElectricPower132kV],
                status: LineStatus::Active,
            }],
        };
        let mut ctx = assemble(&[input]).unwrap();
        cluster(&mut ctx).unwrap();
        assert_eq!(ctx.transporters.len(), 1);
        prune(&mut ctx).unwrap();
        assert!(ctx.transporters.is_empty());
        assert!(ctx.points.is_empty());
    }

    #[test]
    fn isolate_buffer_is_removed() {
        let input = SubsystemInput {
            refinements: vec![Refinement::ElectricPower132kV],
            buffers: vec![grid_ingest::BufferRecord {
                name: "Stray".to_string(),
                node_type: grid_types::NodeType::Bus,
                x: 50.0,
                y: 50.0,
                refinements: vec![Refinement::ElectricPower132kV],
                capacities: None,
                region: None,
                iso: None,
                status: None,
            }],
            transporters: vec![],
        };
        let mut ctx = assemble(&[input]).unwrap();
        cluster(&mut ctx).unwrap();
        assert_eq!(ctx.buffers.len(), 1);
        prune(&mut ctx).unwrap();
        assert!(ctx.buffers.is_empty());
    }
}
