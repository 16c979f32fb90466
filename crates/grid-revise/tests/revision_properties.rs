//! Acceptance tests for the revision core's invariants (P1-P7), round-trip
//! properties (R1-R2), and boundary behavior (B1, B3).
//!
//! The individual component modules carry their own scenario tests
//! (S1-S6) alongside the code they exercise; this file covers the
//! cross-component properties that only make sense against the full
//! `grid_revise::revise` pipeline.

use grid_geo::RegionCatalogs;
use grid_ingest::{BufferRecord, SubsystemInput, TransporterRecord};
use grid_types::{LineStatus, LineType, NodeType, Refinement};
use proptest::prelude::*;

fn elec_transporter(name: &str, ox: f64, oy: f64, dx: f64, dy: f64) -> TransporterRecord {
    TransporterRecord {
        name: name.to_string(),
        line_type: LineType::ElecLine,
        origin_xy: (ox, oy),
        dest_xy: (dx, dy),
        refinements: vec![Refinement::ElectricPower132kV],
        status: LineStatus::Active,
    }
}

fn elec_buffer(name: &str, node_type: NodeType, x: f64, y: f64) -> BufferRecord {
    BufferRecord {
        name: name.to_string(),
        node_type,
        x,
        y,
        refinements: vec![Refinement::ElectricPower132kV],
        capacities: None,
        region: None,
        iso: None,
        status: None,
    }
}

/// B1 — zero transporters yields zero transporters and zero buffers (every
/// buffer is an isolate with no line to snap to, so C4 prunes all of them).
#[test]
fn b1_no_transporters_prunes_every_buffer() {
    let input = SubsystemInput {
        refinements: vec![Refinement::ElectricPower132kV],
        buffers: vec![
            elec_buffer("Gen1", NodeType::GenC, 0.0, 0.0),
            elec_buffer("Load1", NodeType::LoadC, 1.0, 1.0),
        ],
        transporters: vec![],
    };
    let catalogs = RegionCatalogs::default();
    let graph = grid_revise::revise(&[input], &catalogs).unwrap();
    assert!(graph.buffers.is_empty());
    assert!(graph.transporters.is_empty());
}

/// B3 — a chain of k >= 2 transporters whose internal clusters each have
/// exactly two endpoints and no buffer collapses to one transporter joining
/// the two terminal clusters, named for the buffers anchoring each end.
#[test]
fn b3_chain_of_four_collapses_to_one_transporter() {
    let input = SubsystemInput {
        refinements: vec![Refinement::ElectricPower132kV],
        buffers: vec![
            elec_buffer("Gen1", NodeType::GenC, 0.0, 0.0),
            elec_buffer("Load1", NodeType::LoadC, 4.0, 0.0),
        ],
        transporters: vec![
            elec_transporter("T1", 0.0, 0.0, 1.0, 0.0),
            elec_transporter("T2", 1.0, 0.0, 2.0, 0.0),
            elec_transporter("T3", 2.0, 0.0, 3.0, 0.0),
            elec_transporter("T4", 3.0, 0.0, 4.0, 0.0),
        ],
    };
    let catalogs = RegionCatalogs::default();
    let graph = grid_revise::revise(&[input], &catalogs).unwrap();
    assert_eq!(graph.transporters.len(), 1);
    let t = &graph.transporters[0];
    assert_eq!(t.origin.as_buffer_name(), Some("Gen1"));
    assert_eq!(t.dest.as_buffer_name(), Some("Load1"));
}

/// P6 / I5 — after revision, every transporter's endpoints name an
/// existing buffer; no bare geolocation tuple survives.
#[test]
fn p6_every_transporter_endpoint_names_a_surviving_buffer() {
    let input = SubsystemInput {
        refinements: vec![Refinement::ElectricPower132kV],
        buffers: vec![
            elec_buffer("Gen1", NodeType::GenC, 0.0, 0.0),
            elec_buffer("Load1", NodeType::LoadC, 1.0, 0.0),
        ],
        transporters: vec![elec_transporter("T1", 0.0, 0.0, 1.0, 0.0)],
    };
    let catalogs = RegionCatalogs::default();
    let graph = grid_revise::revise(&[input], &catalogs).unwrap();
    let names: std::collections::HashSet<&str> =
        graph.buffers.iter().map(|b| b.name.as_str()).collect();
    for t in &graph.transporters {
        assert!(names.contains(t.origin.as_buffer_name().expect("origin resolved")));
        assert!(names.contains(t.dest.as_buffer_name().expect("dest resolved")));
    }
}

/// P7 — no buffer carries a duplicate controller, and every transporter's
/// controller list is exactly the union of its two endpoints' controllers.
#[test]
fn p7_controllers_are_deduplicated_and_unioned() {
    let mut gen1 = elec_buffer("Gen1", NodeType::GenC, 0.0, 0.0);
    gen1.region = Some("ME".to_string());
    let mut load1 = elec_buffer("Load1", NodeType::LoadC, 1.0, 0.0);
    load1.region = Some("NH".to_string());
    let input = SubsystemInput {
        refinements: vec![Refinement::ElectricPower132kV],
        buffers: vec![gen1, load1],
        transporters: vec![elec_transporter("T1", 0.0, 0.0, 1.0, 0.0)],
    };
    let catalogs = RegionCatalogs::default();
    let graph = grid_revise::revise(&[input], &catalogs).unwrap();

    for b in &graph.buffers {
        let mut seen = std::collections::HashSet::new();
        assert!(b.controllers.iter().all(|c| seen.insert(c.clone())));
    }

    let by_name: std::collections::HashMap<&str, &grid_types::Buffer> =
        graph.buffers.iter().map(|b| (b.name.as_str(), b)).collect();
    for t in &graph.transporters {
        let origin = by_name[t.origin.as_buffer_name().unwrap()];
        let dest = by_name[t.dest.as_buffer_name().unwrap()];
        let mut expected: Vec<String> = origin.controllers.clone();
        for c in &dest.controllers {
            if !expected.contains(c) {
                expected.push(c.clone());
            }
        }
        assert_eq!(t.controllers, expected);
    }
}

/// R1 — running the revision on its own output is a fixed point: feeding
/// a revised graph back in as a fresh `SubsystemInput` (buffers as-is,
/// transporters re-anchored at their named endpoints' coordinates) and
/// revising again yields the same buffers and transporter connectivity.
#[test]
fn r1_revision_is_idempotent() {
    let input = SubsystemInput {
        refinements: vec![Refinement::ElectricPower132kV],
        buffers: vec![
            elec_buffer("Gen1", NodeType::GenC, 0.0, 0.0),
            elec_buffer("Load1", NodeType::LoadC, 1.0050, 0.0005),
        ],
        transporters: vec![
            elec_transporter("T1", 0.0, 0.0, 1.0, 0.0),
            elec_transporter("T2", 1.0010, 0.0, 2.0, 0.0),
        ],
    };
    let catalogs = RegionCatalogs::default();
    let first = grid_revise::revise(&[input], &catalogs).unwrap();

    let roundtrip = graph_to_subsystem_input(&first);
    let second = grid_revise::revise(&[roundtrip], &catalogs).unwrap();

    let names = |g: &grid_revise::RevisedGraph| -> std::collections::BTreeSet<String> {
        g.buffers.iter().map(|b| b.name.clone()).collect()
    };
    assert_eq!(names(&first), names(&second));

    let edges = |g: &grid_revise::RevisedGraph| -> std::collections::BTreeSet<(String, String)> {
        g.transporters
            .iter()
            .map(|t| {
                (
                    t.origin.as_buffer_name().unwrap().to_string(),
                    t.dest.as_buffer_name().unwrap().to_string(),
                )
            })
            .collect()
    };
    assert_eq!(edges(&first), edges(&second));
}

fn graph_to_subsystem_input(graph: &grid_revise::RevisedGraph) -> SubsystemInput {
    let coords: std::collections::HashMap<&str, (f64, f64)> = graph
        .buffers
        .iter()
        .map(|b| (b.name.as_str(), (b.x, b.y)))
        .collect();

    let buffers = graph
        .buffers
        .iter()
        .map(|b| BufferRecord {
            name: b.name.clone(),
            node_type: b.node_type,
            x: b.x,
            y: b.y,
            refinements: b.refinements.clone(),
            capacities: b.fuel_capacities.clone(),
            region: None,
            iso: None,
            status: None,
        })
        .collect();

    let transporters = graph
        .transporters
        .iter()
        .map(|t| {
            let origin_xy = coords[t.origin.as_buffer_name().unwrap()];
            let dest_xy = coords[t.dest.as_buffer_name().unwrap()];
            TransporterRecord {
                name: t.name.clone(),
                line_type: t.line_type,
                origin_xy,
                dest_xy,
                refinements: t.refinements.clone(),
                status: t.status,
            }
        })
        .collect();

    SubsystemInput {
        refinements: graph.refinements.clone(),
        buffers,
        transporters,
    }
}

proptest! {
    /// R2 — uniformly translating every point by a vector smaller than
    /// `EPSILON_PRIMARY / 10` does not change which rows cluster together.
    #[test]
    fn r2_small_translation_preserves_cluster_partition(
        dx in -0.0001446f64..0.0001446,
        dy in -0.0001446f64..0.0001446,
    ) {
        let base = SubsystemInput {
            refinements: vec![Refinement::ElectricPower132kV],
            buffers: vec![elec_buffer("Gen1", NodeType::GenC, 1.2, 0.0)],
            transporters: vec![
                elec_transporter("T1", 0.0, 0.0, 1.0, 0.0),
                elec_transporter("T2", 1.0010, 0.0, 2.0, 0.0),
            ],
        };

        let mut ctx_a = grid_revise::assembler::assemble(&[base.clone()]).unwrap();
        grid_revise::cluster::cluster(&mut ctx_a).unwrap();

        let translated = SubsystemInput {
            refinements: base.refinements.clone(),
            buffers: base
                .buffers
                .iter()
                .map(|b| {
                    let mut b = b.clone();
                    b.x += dx;
                    b.y += dy;
                    b
                })
                .collect(),
            transporters: base
                .transporters
                .iter()
                .map(|t| {
                    let mut t = t.clone();
                    t.origin_xy = (t.origin_xy.0 + dx, t.origin_xy.1 + dy);
                    t.dest_xy = (t.dest_xy.0 + dx, t.dest_xy.1 + dy);
                    t
                })
                .collect(),
        };
        let mut ctx_b = grid_revise::assembler::assemble(&[translated]).unwrap();
        grid_revise::cluster::cluster(&mut ctx_b).unwrap();

        // Same partition: row i and row j share a cluster in A iff they do in B.
        prop_assert_eq!(ctx_a.points.len(), ctx_b.points.len());
        for i in 0..ctx_a.points.len() {
            for j in 0..ctx_a.points.len() {
                let same_a = ctx_a.points[i].cluster == ctx_a.points[j].cluster;
                let same_b = ctx_b.points[i].cluster == ctx_b.points[j].cluster;
                prop_assert_eq!(same_a, same_b);
            }
        }
    }
}
