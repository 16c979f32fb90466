use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A commodity/voltage class drawn from the closed enumeration the
/// fuel-normalization table maps onto. Ordering is stable per subsystem:
/// the first time a refinement is seen in ingestion order, it is appended
/// to the global refinement list and never reordered afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Refinement {
    ElectricPower132kV,
    RawGas,
    ProcessedGas,
    Syngas,
    CrudeOil,
    ProcessedOil,
    LiquidBiomassFeedstock,
    SolidBiomassFeedstock,
    Coal,
    Uranium,
    WaterEnergy,
    Solar,
    WindEnergy,
    Other,
}

impl Refinement {
    pub const ALL: [Refinement; 14] = [
        Refinement::ElectricPower132kV,
        Refinement::RawGas,
        Refinement::ProcessedGas,
        Refinement::Syngas,
        Refinement::CrudeOil,
        Refinement::ProcessedOil,
        Refinement::LiquidBiomassFeedstock,
        Refinement::SolidBiomassFeedstock,
        Refinement::Coal,
        Refinement::Uranium,
        Refinement::WaterEnergy,
        Refinement::Solar,
        Refinement::WindEnergy,
        Refinement::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Refinement::ElectricPower132kV => "electric power at 132kV",
            Refinement::RawGas => "raw gas",
            Refinement::ProcessedGas => "processed gas",
            Refinement::Syngas => "syngas",
            Refinement::CrudeOil => "crude oil",
            Refinement::ProcessedOil => "processed oil",
            Refinement::LiquidBiomassFeedstock => "liquid biomass feedstock",
            Refinement::SolidBiomassFeedstock => "solid biomass feedstock",
            Refinement::Coal => "coal",
            Refinement::Uranium => "uranium",
            Refinement::WaterEnergy => "water energy",
            Refinement::Solar => "solar",
            Refinement::WindEnergy => "wind energy",
            Refinement::Other => "other",
        }
    }

    /// Gas-family refinements as used by the NGPipe synthesis rule (§4.3)
    /// and the independent-buffer priority rule (§5c).
    pub fn is_gas_family(&self) -> bool {
        matches!(
            self,
            Refinement::RawGas | Refinement::ProcessedGas | Refinement::Syngas
        )
    }

    /// Oil-family refinements as used by the independent-buffer priority
    /// rule (§5c). Distinct from the narrower OilCrudePipe/OilRefPipe
    /// synthesis split in C3.
    pub fn is_oil_family(&self) -> bool {
        matches!(
            self,
            Refinement::CrudeOil
                | Refinement::ProcessedOil
                | Refinement::LiquidBiomassFeedstock
                | Refinement::WaterEnergy
                | Refinement::SolidBiomassFeedstock
        )
    }
}

impl fmt::Display for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unrecognized refinement string: {0:?}")]
pub struct ParseRefinementError(pub String);

impl FromStr for Refinement {
    type Err = ParseRefinementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Refinement::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ParseRefinementError(s.to_string()))
    }
}
