use std::collections::HashMap;

use grid_types::Refinement;

use crate::errors::IngestError;

/// Maps a free-form fuel string to the closed refinement set. The full
/// table is ≈150 input strings onto 14 canonical classes (§6.1); it is
/// ingestion-boundary data, not revision logic, so only a representative
/// slice ships here. Downstream callers that need the complete mapping
/// for a live atlas supply their own `FuelNormalizer`.
pub trait FuelNormalizer {
    fn normalize(&self, raw: &str) -> Result<Refinement, IngestError>;
}

pub struct StaticFuelTable {
    table: HashMap<String, Refinement>,
}

impl StaticFuelTable {
    pub fn new() -> Self {
        let entries: &[(&str, Refinement)] = &[
            ("NG", Refinement::ProcessedGas),
            ("Natural Gas", Refinement::ProcessedGas),
            ("Pipeline Quality Gas", Refinement::ProcessedGas),
            ("Raw Gas", Refinement::RawGas),
            ("Wellhead Gas", Refinement::RawGas),
            ("Syngas", Refinement::Syngas),
            ("Synthesis Gas", Refinement::Syngas),
            ("DFO", Refinement::ProcessedOil),
            ("Distillate Fuel Oil", Refinement::ProcessedOil),
            ("RFO", Refinement::ProcessedOil),
            ("Residual Fuel Oil", Refinement::ProcessedOil),
            ("Crude", Refinement::CrudeOil),
            ("Crude Oil", Refinement::CrudeOil),
            ("LFG", Refinement::LiquidBiomassFeedstock),
            ("Landfill Gas", Refinement::LiquidBiomassFeedstock),
            ("BIO", Refinement::LiquidBiomassFeedstock),
            ("WDS", Refinement::SolidBiomassFeedstock),
            ("Wood Waste Solids", Refinement::SolidBiomassFeedstock),
            ("BIT", Refinement::Coal),
            ("SUB", Refinement::Coal),
            ("LIG", Refinement::Coal),
            ("Coal", Refinement::Coal),
            ("NUC", Refinement::Uranium),
            ("Uranium", Refinement::Uranium),
            ("WAT", Refinement::WaterEnergy),
            ("Water", Refinement::WaterEnergy),
            ("Hydro", Refinement::WaterEnergy),
            ("SUN", Refinement::Solar),
            ("Solar", Refinement::Solar),
            ("WND", Refinement::WindEnergy),
            ("Wind", Refinement::WindEnergy),
            ("132kV", Refinement::ElectricPower132kV),
            ("Electric Power", Refinement::ElectricPower132kV),
            ("OTH", Refinement::Other),
            ("Other", Refinement::Other),
        ];
        let table = entries
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), *v))
            .collect();
        StaticFuelTable { table }
    }
}

impl Default for StaticFuelTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FuelNormalizer for StaticFuelTable {
    fn normalize(&self, raw: &str) -> Result<Refinement, IngestError> {
        self.table
            .get(&raw.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| IngestError::UnknownFuel(raw.to_string()))
    }
}
