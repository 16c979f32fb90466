//! C6 — attributor & namer.
//!
//! Region/operator attribution, cluster-primary selection and endpoint
//! naming, radial connector emission, and the post-C6 isolated oil-plant
//! rescue pass (§4.6). Unlike C1-C5, this component does not touch
//! `ctx.points` — by the time naming begins, every downstream decision
//! is driven off `ctx.buffers`/`ctx.transporters` and the cluster ids
//! already stamped onto them by `sync_clusters_to_entities`.

mod oil_rescue;
mod primary;
mod radial;
mod region;

pub use oil_rescue::rescue_isolated_oil_plants;

use grid_geo::RegionCatalogs;
use grid_types::RevisionError;

use crate::context::RevisionContext;

/// Runs region attribution, primary selection/naming, and radial
/// connector emission, in that order (§4.6). The isolated oil-plant
/// rescue pass is deliberately *not* run here — the spec describes it as
/// "post-C6", so callers invoke `rescue_isolated_oil_plants` separately
/// once they want the stranded-plant report.
pub fn attribute(ctx: &mut RevisionContext, catalogs: &RegionCatalogs) -> Result<(), RevisionError> {
    region::attribute_regions(ctx, catalogs)?;
    let radial_centers = primary::assign_primaries_and_names(ctx)?;
    radial::emit_radial_connectors(ctx, &radial_centers)?;
    Ok(())
}
