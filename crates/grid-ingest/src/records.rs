use serde::{Deserialize, Serialize};

use grid_types::{LineType, LineStatus, NodeType, Refinement};

/// A buffer as supplied by a subsystem's upstream ingestion layer, before
/// any revision has happened (§6.1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferRecord {
    pub name: String,
    pub node_type: NodeType,
    pub x: f64,
    pub y: f64,
    pub refinements: Vec<Refinement>,
    /// `(fuel, capacity)` pairs aligned to `refinements`; absent when the
    /// subsystem carries no capacity vector for this buffer.
    pub capacities: Option<Vec<(Refinement, f64)>>,
    pub region: Option<String>,
    pub iso: Option<String>,
    pub status: Option<LineStatus>,
}

/// A transporter as supplied by a subsystem's upstream ingestion layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransporterRecord {
    pub name: String,
    pub line_type: LineType,
    pub origin_xy: (f64, f64),
    pub dest_xy: (f64, f64),
    pub refinements: Vec<Refinement>,
    pub status: LineStatus,
}

/// One subsystem's full ingestion payload: its buffers, its transporters,
/// and its ordered refinement list (§6.1). `SubsystemInput`s from multiple
/// subsystems (electric, gas, oil, coal) are assembled by C1 in the order
/// they are supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubsystemInput {
    pub refinements: Vec<Refinement>,
    pub buffers: Vec<BufferRecord>,
    pub transporters: Vec<TransporterRecord>,
}
