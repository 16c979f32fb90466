//! # Grid Geo
//!
//! Polygon containment/distance catalogs and ISO canonicalization for the
//! attribution stage (C6). The core treats polygons as opaque (§6.2); this
//! crate is the geometry utility that makes containment and distance
//! concrete via the `geo` crate.

pub mod catalog;
pub mod catalogs;
pub mod iso;

pub use catalog::PolygonCatalog;
pub use catalogs::RegionCatalogs;
pub use iso::canonicalize_iso;
