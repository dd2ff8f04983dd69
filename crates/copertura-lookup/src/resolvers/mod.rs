//! The four chained lookups against the coverage service.
//!
//! Every stage follows the same contract: issue one `GET`, interpret the
//! envelope, and return `Ok(Some(identity))` or `Ok(None)` when the upstream
//! found nothing. Only transport-level failures are `Err`.
//!
//! Status handling: `200` is read as an envelope; `401`, `403`, and `5xx` are
//! [`TransportError::Rejected`] (bad credentials or an outage must not look
//! like "no coverage here"); any other status is that stage's not-found.

mod address;
mod city;
mod coverage;
mod headers;

use std::sync::Arc;

use serde_json::Value;

use crate::envelope::Envelope;
use crate::error::TransportError;
use crate::transport::Transport;

pub const GET_CITIES: &str = "GetCities";
pub const GET_ADDRESSES_BY_CITY: &str = "GetAddressesByCity";
pub const GET_HEADERS: &str = "GetHeaders";
pub const GET_COVERAGE_SERVICES: &str = "GetCoverageServices";

/// Rule selector sent on every coverage query.
pub const COVERAGE_RULE: &str = "1";

/// Stage resolvers sharing one transport.
#[derive(Clone)]
pub struct Resolvers {
    transport: Arc<dyn Transport>,
}

enum StatusClass {
    Ok,
    NotFound,
    Rejected,
}

fn classify_status(status: u16) -> StatusClass {
    match status {
        200 => StatusClass::Ok,
        401 | 403 | 500..=599 => StatusClass::Rejected,
        _ => StatusClass::NotFound,
    }
}

impl Resolvers {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Calls `path` and returns the envelope body, or `None` when the
    /// upstream had nothing (`Body` null or empty, or a not-found status).
    ///
    /// # Errors
    ///
    /// - Any [`TransportError`] from the transport.
    /// - [`TransportError::Rejected`] on `401`, `403`, or `5xx`.
    /// - [`TransportError::MalformedEnvelope`] if the body is not an envelope.
    async fn fetch_body(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<Value>, TransportError> {
        let raw = self.transport.get(path, query).await?;

        match classify_status(raw.status) {
            StatusClass::Ok => {}
            StatusClass::NotFound => {
                tracing::debug!(path, status = raw.status, "non-200 status treated as not found");
                return Ok(None);
            }
            StatusClass::Rejected => {
                tracing::warn!(path, status = raw.status, "upstream rejected request");
                return Err(TransportError::Rejected {
                    path: path.to_string(),
                    status: raw.status,
                });
            }
        }

        match Envelope::parse(&raw.body) {
            Envelope::Found(body) => Ok(Some(body)),
            Envelope::Empty => Ok(None),
            Envelope::Malformed(reason) => {
                tracing::warn!(path, reason = %reason, "malformed upstream envelope");
                Err(TransportError::MalformedEnvelope {
                    path: path.to_string(),
                    reason,
                })
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::test_support::StubTransport;
    use super::*;

    #[tokio::test]
    async fn null_and_empty_body_are_both_none() {
        for body in [json!({"Body": []}), json!({"Body": null})] {
            let stub = Arc::new(StubTransport::new().ok(GET_CITIES, &body));
            let resolvers = Resolvers::new(stub);
            let result = resolvers.fetch_body(GET_CITIES, &[]).await.unwrap();
            assert!(result.is_none(), "body {body} should be not-found");
        }
    }

    #[tokio::test]
    async fn not_found_status_is_none() {
        let stub = Arc::new(StubTransport::new().respond(GET_CITIES, 404, "not here"));
        let resolvers = Resolvers::new(stub);
        assert!(resolvers.fetch_body(GET_CITIES, &[]).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn server_error_is_rejected() {
        let stub = Arc::new(StubTransport::new().respond(GET_CITIES, 502, "bad gateway"));
        let resolvers = Resolvers::new(stub);
        let err = resolvers.fetch_body(GET_CITIES, &[]).await.unwrap_err();
        assert!(matches!(err, TransportError::Rejected { status: 502, .. }));
    }

    #[tokio::test]
    async fn unauthorized_is_rejected() {
        let stub = Arc::new(StubTransport::new().respond(GET_CITIES, 401, ""));
        let resolvers = Resolvers::new(stub);
        let err = resolvers.fetch_body(GET_CITIES, &[]).await.unwrap_err();
        assert!(matches!(err, TransportError::Rejected { status: 401, .. }));
    }

    #[tokio::test]
    async fn malformed_envelope_is_an_error() {
        let stub = Arc::new(StubTransport::new().respond(GET_CITIES, 200, "{\"Result\": 1}"));
        let resolvers = Resolvers::new(stub);
        let err = resolvers.fetch_body(GET_CITIES, &[]).await.unwrap_err();
        assert!(matches!(err, TransportError::MalformedEnvelope { .. }));
    }
}
