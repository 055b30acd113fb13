/// Errors from the lookup clients.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The query itself was malformed (empty postcode, inverted dates).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Lookup API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response parsed but was missing required data.
    #[error("Malformed lookup response: {0}")]
    MalformedResponse(String),

    /// The service knows nothing about the requested key.
    #[error("Not found: {0}")]
    NotFound(String),
}
