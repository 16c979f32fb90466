//! C3 — transporter synthesizer.
//!
//! Consumes the synthetic-transporter queue C2's secondary pass filled
//! and materializes one new transporter per entry (§4.3). New point-rows
//! are appended to `ctx.points`; because their positional index is
//! derived from `ctx.transporters.len()` (see `context.rs`), downstream
//! buffer rows shift by the required `+2` automatically rather than by a
//! hand-rolled array shift.

use grid_types::{EndpointRef, LineStatus, LineType, Refinement, RevisionError, Transporter};
use tracing::warn;

use crate::context::{EntityRef, Endpoint, PointRow, RevisionContext, SynthRequest};

fn line_type_for(refinement: Refinement) -> Option<LineType> {
    match refinement {
        Refinement::ElectricPower132kV => Some(LineType::ElecLine),
        Refinement::ProcessedGas | Refinement::Syngas | Refinement::RawGas => {
            Some(LineType::NGPipe)
        }
        Refinement::ProcessedOil => Some(LineType::OilRefPipe),
        Refinement::CrudeOil | Refinement::LiquidBiomassFeedstock | Refinement::WaterEnergy => {
            Some(LineType::OilCrudePipe)
        }
        Refinement::Coal => Some(LineType::CoalRailroad),
        Refinement::Other | Refinement::SolidBiomassFeedstock | Refinement::Uranium => {
            Some(LineType::OtherPipe)
        }
        Refinement::Solar | Refinement::WindEnergy => None,
    }
}

pub fn synthesize(ctx: &mut RevisionContext) -> Result<(), RevisionError> {
    let requests: Vec<SynthRequest> = std::mem::take(&mut ctx.synth_queue);
    let mut synthesized = 0usize;

    for request in requests {
        let Some(line_type) = line_type_for(request.refinement) else {
            warn!(
                refinement = %request.refinement,
                "unrecognized refinement for synthesis, aborting this entry (UnknownRefinement)"
            );
            continue;
        };

        let mut transporter = Transporter::new(
            format!("Synthetic {} {}", line_type_name(line_type), synthesized),
            EndpointRef::Point {
                x: request.from_xy.0,
                y: request.from_xy.1,
            },
            EndpointRef::Point {
                x: request.to_xy.0,
                y: request.to_xy.1,
            },
            line_type,
        );
        transporter.refinements = vec![request.refinement];
        transporter.status = LineStatus::Active;
        transporter.cluster_origin = Some(request.from_cluster);
        transporter.cluster_dest = Some(request.to_cluster);

        let t_idx = ctx.push_transporter(transporter);
        ctx.points.push(PointRow {
            entity: EntityRef::Transporter(t_idx, Endpoint::Origin),
            refinement: request.refinement,
            x: request.from_xy.0,
            y: request.from_xy.1,
            cluster: Some(request.from_cluster),
        });
        ctx.points.push(PointRow {
            entity: EntityRef::Transporter(t_idx, Endpoint::Dest),
            refinement: request.refinement,
            x: request.to_xy.0,
            y: request.to_xy.1,
            cluster: Some(request.to_cluster),
        });
        synthesized += 1;
    }

    ctx.assert_contract()?;
    tracing::debug!(synthesized, "C3 synthesis complete");
    Ok(())
}

fn line_type_name(lt: LineType) -> &'static str {
    match lt {
        LineType::ElecLine => "ElecLine",
        LineType::NGPipe => "NGPipe",
        LineType::OilCrudePipe => "OilCrudePipe",
        LineType::OilRefPipe => "OilRefPipe",
        LineType::CoalRailroad => "CoalRailroad",
        LineType::OtherPipe => "OtherPipe",
    }
}
