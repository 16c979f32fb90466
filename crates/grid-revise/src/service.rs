//! Top-level orchestration: runs C1-C6 in order and packages the result.
//!
//! Mirrors the `Service` + injected-dependency shape used elsewhere in
//! this workspace for a single-purpose entry point backed by a handful of
//! pure functions rather than long-lived state.

use grid_geo::RegionCatalogs;
use grid_ingest::SubsystemInput;
use grid_types::{Buffer, RevisionError, Transporter};

use crate::{assembler, attribute, cluster, condense, prune, synthesize};

/// The fully revised graph: every buffer and transporter that survived
/// C1-C6 (and the post-C6 oil rescue pass), plus the global refinement
/// and controller lists threaded through since C1 (§4.1, §4.6) and the
/// names of any oil plant the rescue pass could not reconnect.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RevisedGraph {
    pub buffers: Vec<Buffer>,
    pub transporters: Vec<Transporter>,
    pub refinements: Vec<grid_types::Refinement>,
    pub controllers: Vec<String>,
    pub stranded_oil_plants: Vec<String>,
}

/// Runs the full revision pipeline over `inputs` (one entry per
/// subsystem, in the order C1 should assemble them) and `catalogs` (the
/// region/ISO/NG-region polygons C6 attributes against).
pub fn revise(inputs: &[SubsystemInput], catalogs: &RegionCatalogs) -> Result<RevisedGraph, RevisionError> {
    let mut ctx = assembler::assemble(inputs)?;
    cluster::cluster(&mut ctx)?;
    synthesize::synthesize(&mut ctx)?;
    prune::prune(&mut ctx)?;
    condense::condense(&mut ctx)?;
    attribute::attribute(&mut ctx, catalogs)?;
    let stranded_oil_plants = attribute::rescue_isolated_oil_plants(&mut ctx);

    Ok(RevisedGraph {
        buffers: ctx.buffers,
        transporters: ctx.transporters,
        refinements: ctx.refinements,
        controllers: ctx.controllers,
        stranded_oil_plants,
    })
}
