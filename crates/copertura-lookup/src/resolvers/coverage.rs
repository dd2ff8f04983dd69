//! `GetCoverageServices`: the services offered at one resolved address.

use crate::error::TransportError;
use crate::types::{AddressIdentity, CityIdentity, CoveragePayload, HeaderSet};

use super::{Resolvers, COVERAGE_RULE, GET_COVERAGE_SERVICES};

impl Resolvers {
    /// Fetches the raw coverage payload for a fully resolved address.
    ///
    /// Returns `Ok(None)` when `Body` is null or empty.
    ///
    /// # Errors
    ///
    /// Any [`TransportError`] from the underlying call.
    pub async fn fetch_coverage(
        &self,
        city: &CityIdentity,
        address: &AddressIdentity,
        headers: &HeaderSet,
        street_number: &str,
    ) -> Result<Option<CoveragePayload>, TransportError> {
        let headers_param = headers.headers_param();
        tracing::debug!(
            headers = %headers_param,
            main_code = %headers.main_code,
            "fetching coverage"
        );

        let query = [
            ("HeadersId", headers_param.as_str()),
            ("CityEgon", city.city_code.as_str()),
            ("AddressEgon", address.address_code.as_str()),
            ("MainEgon", headers.main_code.as_str()),
            ("StreetNumber", street_number),
            ("Rule", COVERAGE_RULE),
        ];

        Ok(self
            .fetch_body(GET_COVERAGE_SERVICES, &query)
            .await?
            .map(|body| CoveragePayload { body }))
    }
}
