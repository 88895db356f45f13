//! Decode errors raised while shaping an aggregation response.

/// Failure to decode part of the engine's `aggregations` document.
///
/// Every variant that concerns a single aggregation carries its key so
/// callers can report exactly which aggregation was malformed.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The top-level `aggregations` container is not a JSON object.
    #[error("unmarshal aggregations: {0}")]
    Aggregations(#[source] serde_json::Error),

    #[error("unmarshal present aggregation {key}: {source}")]
    Presence {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unmarshal distribution aggregation {key}: {source}")]
    Distribution {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FormatError {
    /// The aggregation key that failed to decode, if the failure was
    /// specific to one aggregation.
    pub fn key(&self) -> Option<&str> {
        match self {
            FormatError::Aggregations(_) => None,
            FormatError::Presence { key, .. } | FormatError::Distribution { key, .. } => {
                Some(key.as_str())
            }
        }
    }
}
