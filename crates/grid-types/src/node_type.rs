use serde::{Deserialize, Serialize};

/// Buffer subtype tag. A tagged enum stands in for the source's
/// class-per-node-type hierarchy; the only place that needs to recover
/// per-variant behavior beyond matching is the (out-of-scope) XML emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    GenC,
    GenS,
    LoadC,
    LoadS,
    StorageC,
    StorageS,
    Bus,
    CoalDock,
    CoalSource,
    CoalIndBuffer,
    NGProcessor,
    NGReceiptDelivery,
    NGStorage,
    NGTerminal,
    Compressor,
    NGIndBuffer,
    OilTerminal,
    OilPort,
    OilRefinery,
    OilIndBuffer,
}

impl NodeType {
    /// Whether duplicates of this type within a cluster accumulate the
    /// distinct `(fuel, capacity)` pairs (§5a) instead of being discarded.
    pub fn accumulates_fuel_pairs(&self) -> bool {
        matches!(self, NodeType::GenC | NodeType::GenS)
    }
}
