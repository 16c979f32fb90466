use serde::{Deserialize, Serialize};

use crate::cluster::ClusterId;
use crate::node_type::NodeType;
use crate::refinement::Refinement;

/// A point facility: generator, load, storage, bus, terminal, dock, etc.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Buffer {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub node_type: NodeType,
    pub refinements: Vec<Refinement>,
    /// `(fuel, capacity)` pairs aligned one-to-one; `None` when the
    /// subsystem record carried no capacity vector.
    pub fuel_capacities: Option<Vec<(Refinement, f64)>>,
    pub region: Option<String>,
    pub iso: Option<String>,
    /// Clusters this buffer participates in, one per refinement column it
    /// was assigned to during C2. A buffer serving three refinements may
    /// carry up to three entries here.
    pub clusters: Vec<ClusterId>,
    pub controllers: Vec<String>,
}

impl Buffer {
    pub fn new(name: impl Into<String>, x: f64, y: f64, node_type: NodeType) -> Self {
        Buffer {
            name: name.into(),
            x,
            y,
            node_type,
            refinements: Vec::new(),
            fuel_capacities: None,
            region: None,
            iso: None,
            clusters: Vec::new(),
            controllers: Vec::new(),
        }
    }

    pub fn add_controller(&mut self, controller: String) {
        if !self.controllers.contains(&controller) {
            self.controllers.push(controller);
        }
    }

    /// Whether this buffer serves `refinement`, consulting the
    /// `(fuel, capacity)` pairs first and falling back to the plain
    /// refinement list when no capacity vector was supplied (§4.6 oil
    /// rescue: "fuel list contains processed oil").
    pub fn serves(&self, refinement: Refinement) -> bool {
        if let Some(pairs) = &self.fuel_capacities {
            if pairs.iter().any(|(fuel, _)| *fuel == refinement) {
                return true;
            }
        }
        self.refinements.contains(&refinement)
    }
}
