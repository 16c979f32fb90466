use crate::records::SubsystemInput;

/// Inbound port: something that can supply one subsystem's worth of
/// ingestion records. A live adapter would read shapefiles and run them
/// through CRS reprojection and fuel normalization; those layers are
/// explicitly out of scope (§1), so only an in-memory adapter ships here.
pub trait SubsystemSource {
    fn load(&self) -> SubsystemInput;
}

/// An in-memory `SubsystemSource` for tests and for callers that have
/// already materialized their records (e.g. from a prior ingestion step
/// run out-of-process).
pub struct StaticSubsystemSource(pub SubsystemInput);

impl SubsystemSource for StaticSubsystemSource {
    fn load(&self) -> SubsystemInput {
        self.0.clone()
    }
}
