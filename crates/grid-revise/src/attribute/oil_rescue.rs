//! Post-C6 isolated oil-plant rescue (`reviseOil`).
//!
//! A controllable generator burning processed oil with no transporter
//! naming it as an endpoint is otherwise invisible to the revised graph.
//! Rather than drop it silently, search within `EPSILON_OIL_RESCUE` for
//! the nearest oil terminal, port, or independent buffer — any one,
//! regardless of the refinements it happens to carry — and splice in a
//! synthetic pipe. Plants with no candidate within range are reported
//! back to the caller instead of being silently dropped (supplementing
//! the original's log-only behavior, since a library has no console to
//! print to).

use std::collections::HashSet;

use grid_types::{
    constants::EPSILON_OIL_RESCUE, EndpointRef, LineStatus, LineType, NodeType, Refinement,
    Transporter,
};

use crate::context::RevisionContext;

pub fn rescue_isolated_oil_plants(ctx: &mut RevisionContext) -> Vec<String> {
    let named: HashSet<String> = ctx
        .transporters
        .iter()
        .flat_map(|t| [t.origin.as_buffer_name(), t.dest.as_buffer_name()])
        .flatten()
        .map(str::to_string)
        .collect();

    let isolated: Vec<usize> = ctx
        .buffers
        .iter()
        .enumerate()
        .filter(|(_, b)| {
            b.node_type == NodeType::GenC
                && b.serves(Refinement::ProcessedOil)
                && !named.contains(&b.name)
        })
        .map(|(i, _)| i)
        .collect();

    let mut stranded = Vec::new();
    let mut rescue_count = 0usize;

    for plant_idx in isolated {
        let (px, py) = (ctx.buffers[plant_idx].x, ctx.buffers[plant_idx].y);

        let mut best: Option<(usize, f64)> = None;
        for (idx, candidate) in ctx.buffers.iter().enumerate() {
            if idx == plant_idx {
                continue;
            }
            if !matches!(
                candidate.node_type,
                NodeType::OilTerminal | NodeType::OilPort | NodeType::OilIndBuffer
            ) {
                continue;
            }
            let dist = RevisionContext::distance(px, py, candidate.x, candidate.y);
            if dist > EPSILON_OIL_RESCUE {
                continue;
            }
            if best.map_or(true, |(_, best_dist)| dist < best_dist) {
                best = Some((idx, dist));
            }
        }

        match best {
            Some((candidate_idx, _)) => {
                rescue_count += 1;
                let plant_name = ctx.buffers[plant_idx].name.clone();
                let candidate_name = ctx.buffers[candidate_idx].name.clone();
                let mut t = Transporter::new(
                    format!("Oil Rescue Pipe {rescue_count}"),
                    EndpointRef::Buffer(plant_name),
                    EndpointRef::Buffer(candidate_name),
                    LineType::OilRefPipe,
                );
                t.refinements = vec![Refinement::ProcessedOil];
                t.status = LineStatus::Active;
                t.controllers = ctx.buffers[plant_idx].controllers.clone();
                ctx.push_transporter(t);
            }
            None => stranded.push(ctx.buffers[plant_idx].name.clone()),
        }
    }

    stranded
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_types::Buffer;

    #[test]
    fn isolated_generator_within_range_gets_rescue_pipe() {
        let mut ctx = RevisionContext::new();
        let mut plant = Buffer::new("Plant1", 0.0, 0.0, NodeType::GenC);
        plant.refinements = vec![Refinement::ProcessedOil];
        ctx.push_buffer(plant);
        let mut terminal = Buffer::new("Terminal1", 0.1, 0.1, NodeType::OilTerminal);
        terminal.refinements = vec![Refinement::ProcessedOil];
        ctx.push_buffer(terminal);

        let stranded = rescue_isolated_oil_plants(&mut ctx);
        assert!(stranded.is_empty());
        assert_eq!(ctx.transporters.len(), 1);
        assert_eq!(
            ctx.transporters[0].origin.as_buffer_name(),
            Some("Plant1")
        );
        assert_eq!(
            ctx.transporters[0].dest.as_buffer_name(),
            Some("Terminal1")
        );
    }

    #[test]
    fn isolated_generator_out_of_range_is_reported_stranded() {
        let mut ctx = RevisionContext::new();
        let mut plant = Buffer::new("Plant1", 0.0, 0.0, NodeType::GenC);
        plant.refinements = vec![Refinement::ProcessedOil];
        ctx.push_buffer(plant);
        let mut terminal = Buffer::new("Terminal1", 50.0, 50.0, NodeType::OilTerminal);
        terminal.refinements = vec![Refinement::ProcessedOil];
        ctx.push_buffer(terminal);

        let stranded = rescue_isolated_oil_plants(&mut ctx);
        assert_eq!(stranded, vec!["Plant1".to_string()]);
        assert!(ctx.transporters.is_empty());
    }

    #[test]
    fn generator_without_processed_oil_is_ignored() {
        let mut ctx = RevisionContext::new();
        let mut plant = Buffer::new("Plant1", 0.0, 0.0, NodeType::GenC);
        plant.refinements = vec![Refinement::ElectricPower132kV];
        ctx.push_buffer(plant);
        ctx.push_buffer(Buffer::new("Terminal1", 0.1, 0.1, NodeType::OilTerminal));

        let stranded = rescue_isolated_oil_plants(&mut ctx);
        assert!(stranded.is_empty());
        assert!(ctx.transporters.is_empty());
    }

    #[test]
    fn candidate_without_processed_oil_refinement_is_still_eligible() {
        let mut ctx = RevisionContext::new();
        let mut plant = Buffer::new("Plant1", 0.0, 0.0, NodeType::GenC);
        plant.refinements = vec![Refinement::ProcessedOil];
        ctx.push_buffer(plant);
        // Terminal carries no refinement list at all; node type alone
        // qualifies it as a candidate (§4.6).
        ctx.push_buffer(Buffer::new("Terminal1", 0.1, 0.1, NodeType::OilTerminal));

        let stranded = rescue_isolated_oil_plants(&mut ctx);
        assert!(stranded.is_empty());
        assert_eq!(ctx.transporters.len(), 1);
        assert_eq!(
            ctx.transporters[0].dest.as_buffer_name(),
            Some("Terminal1")
        );
    }

    #[test]
    fn named_generator_is_left_alone() {
        let mut ctx = RevisionContext::new();
        let mut plant = Buffer::new("Plant1", 0.0, 0.0, NodeType::GenC);
        plant.refinements = vec![Refinement::ProcessedOil];
        ctx.push_buffer(plant);
        let mut terminal = Buffer::new("Terminal1", 0.1, 0.1, NodeType::OilTerminal);
        terminal.refinements = vec![Refinement::ProcessedOil];
        ctx.push_buffer(terminal);
        ctx.push_transporter(Transporter::new(
            "Existing",
            EndpointRef::Buffer("Plant1".to_string()),
            EndpointRef::Buffer("Terminal1".to_string()),
            LineType::OilRefPipe,
        ));

        let stranded = rescue_isolated_oil_plants(&mut ctx);
        assert!(stranded.is_empty());
        assert_eq!(ctx.transporters.len(), 1);
    }
}
