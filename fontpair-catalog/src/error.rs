use thiserror::Error;

/// Errors produced while fetching or decoding the font catalog and font assets.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure or non-2xx response.
    #[error("request to '{url}' failed: {source}")]
    Http {
        url: String,
        #[source]
        source: ureq::Error,
    },

    /// Reading a local catalog or asset file failed.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog body was not the expected JSON shape.
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rejected before any request was made.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Body exceeded the configured size cap.
    #[error("'{source_name}' exceeds the {limit} byte limit")]
    TooLarge { source_name: String, limit: u64 },
}
