//! `POST /api/v1/coverage`: one address in, one coverage table out.

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use copertura_lookup::{CoverageError, CoverageOutcome, CoverageReport};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) const NO_RESULT_MESSAGE: &str = "Nessun risultato trovato. Controlla i dati inseriti.";
pub(super) const VALIDATION_MESSAGE: &str = "Verifica i dati inseriti.";
pub(super) const DATA_SHAPE_MESSAGE: &str =
    "I dati di copertura ricevuti non sono leggibili. Verifica l'indirizzo e riprova.";
pub(super) const UPSTREAM_MESSAGE: &str =
    "C'è stato un problema nella ricerca. Riprova più tardi";

#[derive(Debug, Deserialize)]
pub(super) struct CoverageRequest {
    pub city: String,
    pub address: String,
    /// Street number; accepted as a string so values like `12/A` pass through.
    pub number: String,
}

pub(super) async fn lookup_coverage(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<CoverageRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CoverageReport>>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected coverage request body");
        ApiError::new(req_id.0.clone(), "validation_error", VALIDATION_MESSAGE)
    })?;

    let outcome = state
        .pipeline
        .resolve_coverage(&request.city, &request.address, &request.number)
        .await
        .map_err(|error| map_coverage_error(req_id.0.clone(), &error))?;

    match outcome {
        CoverageOutcome::Report(report) => Ok(Json(ApiResponse {
            data: report,
            meta: ResponseMeta::new(req_id.0),
        })),
        CoverageOutcome::NotFound(stage) => {
            tracing::info!(%stage, city = %request.city, "coverage lookup found nothing");
            Err(ApiError::new(req_id.0, "no_result", NO_RESULT_MESSAGE))
        }
    }
}

fn map_coverage_error(request_id: String, error: &CoverageError) -> ApiError {
    match error {
        CoverageError::Input(e) => {
            tracing::debug!(error = %e, "coverage request failed validation");
            ApiError::new(request_id, "validation_error", VALIDATION_MESSAGE)
        }
        CoverageError::DataShape(e) => {
            tracing::warn!(error = %e, "coverage payload could not be normalized");
            ApiError::new(request_id, "data_shape_error", DATA_SHAPE_MESSAGE)
        }
        CoverageError::Transport(e) => {
            tracing::error!(error = %e, "coverage upstream unavailable");
            ApiError::new(request_id, "upstream_unavailable", UPSTREAM_MESSAGE)
        }
    }
}
