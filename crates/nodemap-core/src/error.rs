use thiserror::Error;

/// Failures while obtaining the entity snapshot. None of these are fatal:
/// callers substitute the synthetic dataset from [`crate::mock`].
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("data source unavailable ({endpoint}): {reason}")]
    Unavailable { endpoint: String, reason: String },
    #[error("malformed payload from {endpoint}: {source}")]
    Malformed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum FxMessageError {
    #[error("fx message is not valid SHADER_CTRL json: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("fx message carries a non-finite value")]
    NonFinite,
}
