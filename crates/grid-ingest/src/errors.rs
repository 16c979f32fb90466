use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum IngestError {
    #[error("unrecognized fuel string: {0:?}")]
    UnknownFuel(String),

    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl From<IngestError> for grid_types::RevisionError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::UnknownFuel(s) => grid_types::RevisionError::UnknownRefinement(s),
            IngestError::MalformedInput(s) => grid_types::RevisionError::MalformedInput(s),
        }
    }
}
