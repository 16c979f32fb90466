use serde::{Deserialize, Serialize};

/// Transporter subtype, driven by subsystem and, for synthesized
/// transporters, by the carried refinement (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineType {
    ElecLine,
    NGPipe,
    OilCrudePipe,
    OilRefPipe,
    CoalRailroad,
    OtherPipe,
}
