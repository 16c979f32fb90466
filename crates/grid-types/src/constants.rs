//! Process-wide configuration (§5, §6.4). These are constants, not
//! per-call arguments, so every component sees the same radii.

/// Primary clustering radius, ≈0.1 mi in WGS84 degrees.
pub const EPSILON_PRIMARY: f64 = 0.001446;

/// Secondary clustering radius, ≈1.0 mi in WGS84 degrees.
pub const EPSILON_SECONDARY: f64 = 0.014465;

/// Tertiary clustering radius, ≈35 mi in WGS84 degrees.
pub const EPSILON_TERTIARY: f64 = 0.5075;

/// Search radius for the post-C6 isolated oil-plant rescue pass.
pub const EPSILON_OIL_RESCUE: f64 = 4.0 * EPSILON_TERTIARY;

/// Decimal places raw coordinates are assumed rounded to before ingestion.
pub const GPS_DECIMAL_PLACES: u32 = 4;
