//! Region/operator attribution (`setRegion`/`setController`/`setISO`).
//!
//! A pre-declared region/ISO on the buffer record always wins; otherwise
//! the matching polygon catalog is consulted (containment, else
//! nearest). `NGStorage` buffers additionally consult the NG-region
//! catalog. An empty catalog is a `PolygonMiss` (§7): the buffer gets an
//! `"UNKNOWN"` controller and processing continues.

use grid_geo::{canonicalize_iso, RegionCatalogs};
use grid_types::{NodeType, RevisionError};

use crate::context::RevisionContext;

const UNKNOWN_CONTROLLER: &str = "UNKNOWN";

pub fn attribute_regions(
    ctx: &mut RevisionContext,
    catalogs: &RegionCatalogs,
) -> Result<(), RevisionError> {
    attribute_declared_or_catalog(ctx, catalogs, Pass::State);
    attribute_declared_or_catalog(ctx, catalogs, Pass::Iso);

    let ng_storage: Vec<usize> = ctx
        .buffers
        .iter()
        .enumerate()
        .filter(|(_, b)| b.node_type == NodeType::NGStorage)
        .map(|(i, _)| i)
        .collect();
    let coords: Vec<(f64, f64)> = ng_storage.iter().map(|&i| (ctx.buffers[i].x, ctx.buffers[i].y)).collect();
    let labels = catalogs.ng_regions.attribute_many(&coords);
    for (k, &i) in ng_storage.iter().enumerate() {
        let label = labels[k].clone().unwrap_or_else(|| UNKNOWN_CONTROLLER.to_string());
        apply_controller(ctx, i, &label);
    }

    Ok(())
}

enum Pass {
    State,
    Iso,
}

fn attribute_declared_or_catalog(ctx: &mut RevisionContext, catalogs: &RegionCatalogs, pass: Pass) {
    let declared: Vec<(usize, Option<String>)> = ctx
        .buffers
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let value = match pass {
                Pass::State => b.region.clone(),
                Pass::Iso => b.iso.clone(),
            };
            (i, value)
        })
        .collect();

    let mut lookup_idx = Vec::new();
    for (i, value) in &declared {
        match value {
            Some(v) => {
                let label = match pass {
                    Pass::State => v.clone(),
                    Pass::Iso => canonicalize_iso(v),
                };
                apply_controller(ctx, *i, &label);
            }
            None => lookup_idx.push(*i),
        }
    }

    let coords: Vec<(f64, f64)> = lookup_idx.iter().map(|&i| (ctx.buffers[i].x, ctx.buffers[i].y)).collect();
    let catalog = match pass {
        Pass::State => &catalogs.states,
        Pass::Iso => &catalogs.iso,
    };
    let labels = catalog.attribute_many(&coords);
    for (k, &i) in lookup_idx.iter().enumerate() {
        let label = match &labels[k] {
            Some(l) => match pass {
                Pass::State => l.clone(),
                Pass::Iso => canonicalize_iso(l),
            },
            None => UNKNOWN_CONTROLLER.to_string(),
        };
        apply_controller(ctx, i, &label);
    }
}

fn apply_controller(ctx: &mut RevisionContext, buffer_idx: usize, label: &str) {
    ctx.buffers[buffer_idx].add_controller(label.to_string());
    ctx.register_controller(label);
}
