use thiserror::Error;

/// Failures talking to the coverage service.
///
/// Everything here means "the upstream could not answer", as opposed to
/// "the upstream answered that nothing matched", which is not an error.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network, DNS, or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The call did not complete within the configured per-call timeout.
    #[error("request to {path} timed out")]
    Timeout { path: String },

    /// The upstream refused the call (auth failure or server error).
    #[error("upstream rejected {path} with HTTP {status}")]
    Rejected { path: String, status: u16 },

    /// The response could not be read as a `{ "Body": ... }` envelope.
    #[error("malformed envelope from {path}: {reason}")]
    MalformedEnvelope { path: String, reason: String },

    #[error("TLS configuration error: {0}")]
    Tls(#[from] rustls::Error),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// User input that cannot be looked up. Raised before any network call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("city name is required")]
    BlankCity,

    #[error("address is required")]
    BlankAddress,

    #[error("street number is required")]
    BlankStreetNumber,

    #[error("street number must start with a digit, got '{0}'")]
    MalformedStreetNumber(String),
}

/// The coverage payload does not have the shape the report needs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataShapeError {
    #[error("coverage payload has no AvailabilityReports array")]
    MissingReports,

    #[error("availability report {index} is not an object")]
    NotAnObject { index: usize },

    #[error("availability report {index} is missing {field}")]
    MissingField { index: usize, field: &'static str },
}

/// Terminal failure of one coverage resolution.
#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error("upstream unavailable: {0}")]
    Transport(#[from] TransportError),

    #[error("unexpected coverage data: {0}")]
    DataShape(#[from] DataShapeError),
}
