//! Orchestrates one coverage resolution.
//!
//! ```text
//! Start -> CityResolved -> AddressResolved -> HeadersResolved
//!       -> CoverageFetched -> Normalized
//! ```
//!
//! Any stage that finds nothing ends the run with
//! [`CoverageOutcome::NotFound`] naming that stage; any transport failure ends
//! it with [`CoverageError::Transport`]. Later stages are never called after
//! either.

use std::sync::Arc;

use copertura_core::PrefixVocabulary;
use serde::Serialize;

use crate::address::normalize_address;
use crate::error::{CoverageError, InputError};
use crate::report::{availability_reports, extract_provider, normalize_reports, ReportRow};
use crate::resolvers::Resolvers;
use crate::transport::Transport;

/// The step of the pipeline that came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// The address was only a street-type prefix.
    AddressNormalization,
    City,
    Address,
    Headers,
    Coverage,
    /// Coverage was returned but listed no services.
    Reports,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::AddressNormalization => "address_normalization",
            Stage::City => "city",
            Stage::Address => "address",
            Stage::Headers => "headers",
            Stage::Coverage => "coverage",
            Stage::Reports => "reports",
        };
        f.write_str(name)
    }
}

/// Rows for a successful resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    pub rows: Vec<ReportRow>,
    /// Optional provider name taken from the first report.
    pub provider: Option<String>,
}

/// Non-error result of a resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum CoverageOutcome {
    Report(CoverageReport),
    NotFound(Stage),
}

/// Runs the city → address → headers → coverage chain.
///
/// Holds only the shared transport and the read-only prefix vocabulary, so one
/// instance serves any number of concurrent resolutions.
#[derive(Clone)]
pub struct CoveragePipeline {
    resolvers: Resolvers,
    vocabulary: Arc<PrefixVocabulary>,
}

impl CoveragePipeline {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, vocabulary: Arc<PrefixVocabulary>) -> Self {
        Self {
            resolvers: Resolvers::new(transport),
            vocabulary,
        }
    }

    /// Resolves the coverage report for one street address.
    ///
    /// # Errors
    ///
    /// - [`CoverageError::Input`] for blank fields, before any network call.
    /// - [`CoverageError::Transport`] if any stage's call fails.
    /// - [`CoverageError::DataShape`] if the coverage payload cannot be normalized.
    pub async fn resolve_coverage(
        &self,
        city_name: &str,
        address: &str,
        street_number: &str,
    ) -> Result<CoverageOutcome, CoverageError> {
        let city_name = city_name.split_whitespace().collect::<Vec<_>>().join(" ");
        let street_number = street_number.trim();
        if city_name.is_empty() {
            return Err(InputError::BlankCity.into());
        }
        if address.trim().is_empty() {
            return Err(InputError::BlankAddress.into());
        }
        if street_number.is_empty() {
            return Err(InputError::BlankStreetNumber.into());
        }
        // Civic numbers are digits with an optional suffix: 12, 12/A, 12bis.
        if !street_number.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(InputError::MalformedStreetNumber(street_number.to_string()).into());
        }

        let normalized = normalize_address(address, &self.vocabulary);
        if normalized.is_empty() {
            return Ok(not_found(Stage::AddressNormalization));
        }

        let Some(city) = self.resolvers.resolve_city(&city_name).await? else {
            return Ok(not_found(Stage::City));
        };
        tracing::debug!(city_code = %city.city_code, "city resolved");

        let Some(address_id) = self
            .resolvers
            .resolve_address(&city, &normalized.address)
            .await?
        else {
            return Ok(not_found(Stage::Address));
        };
        tracing::debug!(address_code = %address_id.address_code, "address resolved");

        let Some(headers) = self
            .resolvers
            .resolve_headers(&city_name, &city, &normalized, street_number)
            .await?
        else {
            return Ok(not_found(Stage::Headers));
        };
        tracing::debug!(headers = headers.header_ids.len(), "headers resolved");

        let Some(payload) = self
            .resolvers
            .fetch_coverage(&city, &address_id, &headers, street_number)
            .await?
        else {
            return Ok(not_found(Stage::Coverage));
        };

        let reports = availability_reports(&payload)?;
        if reports.is_empty() {
            return Ok(not_found(Stage::Reports));
        }

        let rows = normalize_reports(reports)?;
        tracing::info!(rows = rows.len(), "coverage resolved");

        Ok(CoverageOutcome::Report(CoverageReport {
            rows,
            provider: extract_provider(reports),
        }))
    }
}

fn not_found(stage: Stage) -> CoverageOutcome {
    tracing::info!(%stage, "no result");
    CoverageOutcome::NotFound(stage)
}
