use nodemap_core::Dataset;
use std::time::Duration;

/// Result of one load attempt, as delivered to the render thread.
#[derive(Debug, Clone)]
pub struct Incoming {
    pub source: String,
    pub kind: IncomingKind,
}

#[derive(Debug, Clone)]
pub enum IncomingKind {
    Loaded { dataset: Dataset, elapsed: Duration },
    Unavailable(String),
}

impl Incoming {
    pub fn loaded(source: String, dataset: Dataset, elapsed: Duration) -> Self {
        Self {
            source,
            kind: IncomingKind::Loaded { dataset, elapsed },
        }
    }

    pub fn unavailable(source: String, reason: String) -> Self {
        Self {
            source,
            kind: IncomingKind::Unavailable(reason),
        }
    }
}
