use serde::{Deserialize, Serialize};

use crate::cluster::ClusterId;
use crate::line_type::LineType;
use crate::refinement::Refinement;
use crate::status::LineStatus;

/// An endpoint of a transporter: a bare geolocation until C6 resolves it
/// to the name of the cluster's primary buffer (I5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EndpointRef {
    Point { x: f64, y: f64 },
    Buffer(String),
}

impl EndpointRef {
    pub fn as_buffer_name(&self) -> Option<&str> {
        match self {
            EndpointRef::Buffer(name) => Some(name),
            EndpointRef::Point { .. } => None,
        }
    }
}

/// A line facility: origin and destination start as bare geolocations and
/// are resolved to buffer names by C6 (I5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transporter {
    pub name: String,
    pub origin: EndpointRef,
    pub dest: EndpointRef,
    pub refinements: Vec<Refinement>,
    pub line_type: LineType,
    pub cluster_origin: Option<ClusterId>,
    pub cluster_dest: Option<ClusterId>,
    pub status: LineStatus,
    pub controllers: Vec<String>,
}

impl Transporter {
    pub fn new(
        name: impl Into<String>,
        origin: EndpointRef,
        dest: EndpointRef,
        line_type: LineType,
    ) -> Self {
        Transporter {
            name: name.into(),
            origin,
            dest,
            refinements: Vec::new(),
            line_type,
            cluster_origin: None,
            cluster_dest: None,
            status: LineStatus::Active,
            controllers: Vec::new(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        match (self.cluster_origin, self.cluster_dest) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
