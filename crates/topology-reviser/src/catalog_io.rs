//! Loads the state/ISO/NG-region polygon catalogs C6 attributes against
//! from a JSON file, since the live GIS shapefile stack is out of scope
//! (§6.2) but a concrete, typed on-disk format is still needed to drive
//! the CLI end-to-end.

use std::fs;
use std::path::Path;

use geo::{LineString, Polygon};
use grid_geo::{PolygonCatalog, RegionCatalogs};
use serde::{Deserialize, Serialize};

/// One named polygon, stored as a closed ring of `(x, y)` vertices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedPolygon {
    pub label: String,
    pub ring: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub states: Vec<NamedPolygon>,
    #[serde(default)]
    pub iso: Vec<NamedPolygon>,
    #[serde(default)]
    pub ng_regions: Vec<NamedPolygon>,
}

fn to_catalog(polygons: Vec<NamedPolygon>) -> PolygonCatalog {
    let entries = polygons
        .into_iter()
        .map(|p| (p.label, Polygon::new(LineString::from(p.ring), vec![])))
        .collect();
    PolygonCatalog::new(entries)
}

/// Loads `RegionCatalogs` from a JSON file. A missing `path` yields
/// empty catalogs, so every buffer attributes to `"UNKNOWN"` (§7
/// `PolygonMiss`) rather than failing the run.
pub fn load_region_catalogs(path: Option<&Path>) -> anyhow::Result<RegionCatalogs> {
    let Some(path) = path else {
        return Ok(RegionCatalogs::default());
    };
    let text = fs::read_to_string(path)?;
    let file: CatalogFile = serde_json::from_str(&text)?;
    Ok(RegionCatalogs::new(
        to_catalog(file.states),
        to_catalog(file.iso),
        to_catalog(file.ng_regions),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_empty_catalogs() {
        let catalogs = load_region_catalogs(None).unwrap();
        assert!(catalogs.states.is_empty());
        assert!(catalogs.iso.is_empty());
        assert!(catalogs.ng_regions.is_empty());
    }

    #[test]
    fn loads_named_polygons_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalogs.json");
        let file = CatalogFile {
            states: vec![NamedPolygon {
                label: "ME".to_string(),
                ring: vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)],
            }],
            iso: Vec::new(),
            ng_regions: Vec::new(),
        };
        fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();

        let catalogs = load_region_catalogs(Some(&path)).unwrap();
        assert_eq!(catalogs.states.attribute(0.5, 0.5), Some("ME"));
    }
}
