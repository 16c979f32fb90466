use thiserror::Error;

/// The shared error taxonomy (§7). `InvariantViolation` is the only
/// variant that aborts a whole revision; the others are recorded and the
/// run continues (the offending record is skipped, or a fallback is
/// substituted).
#[derive(Debug, Clone, Error)]
pub enum RevisionError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("unknown refinement: {0:?}")]
    UnknownRefinement(String),

    #[error("invariant violation in {component}: {detail}")]
    InvariantViolation { component: &'static str, detail: String },

    #[error("no polygon contains or is nearest to the point; falling back to UNKNOWN")]
    PolygonMiss,
}

impl RevisionError {
    pub fn invariant(component: &'static str, detail: impl Into<String>) -> Self {
        RevisionError::InvariantViolation {
            component,
            detail: detail.into(),
        }
    }

    /// Whether this error must abort the whole pipeline (§5, §7) as
    /// opposed to being logged and skipped/fallback-substituted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RevisionError::InvariantViolation { .. })
    }
}
