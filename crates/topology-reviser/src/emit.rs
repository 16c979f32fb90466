//! Outbound port for the revised graph. The fixed HFGT XML schema is out
//! of scope; `JsonGraphSink` proves the port boundary with `serde_json`
//! instead of fabricating that schema.

use std::fs;
use std::path::Path;

use grid_revise::RevisedGraph;

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("failed to serialize revised graph: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// An outbound sink for a finished `RevisedGraph`.
pub trait GraphSink {
    fn emit(&self, graph: &RevisedGraph) -> Result<(), EmitError>;
}

/// Serializes the revised graph as JSON and writes it to a file.
pub struct JsonGraphSink {
    pub path: String,
    pub pretty: bool,
}

impl JsonGraphSink {
    pub fn new(path: impl Into<String>, pretty: bool) -> Self {
        Self {
            path: path.into(),
            pretty,
        }
    }
}

impl GraphSink for JsonGraphSink {
    fn emit(&self, graph: &RevisedGraph) -> Result<(), EmitError> {
        let text = if self.pretty {
            serde_json::to_string_pretty(graph)?
        } else {
            serde_json::to_string(graph)?
        };
        fs::write(Path::new(&self.path), text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_types::Refinement;

    #[test]
    fn json_sink_writes_valid_json() {
        let graph = RevisedGraph {
            buffers: Vec::new(),
            transporters: Vec::new(),
            refinements: vec![Refinement::ElectricPower132kV],
            controllers: vec!["UNKNOWN".to_string()],
            stranded_oil_plants: Vec::new(),
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let sink = JsonGraphSink::new(path.to_string_lossy().to_string(), false);
        sink.emit(&graph).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["controllers"][0], "UNKNOWN");
    }
}
