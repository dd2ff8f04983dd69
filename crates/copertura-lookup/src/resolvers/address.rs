//! `GetAddressesByCity`: street name within a city to its Egon code.

use crate::envelope::{candidates, OpaqueId, CANDIDATE_POLICY};
use crate::error::TransportError;
use crate::types::{AddressIdentity, CityIdentity};

use super::{Resolvers, GET_ADDRESSES_BY_CITY};

impl Resolvers {
    /// Resolves a normalized street address inside `city`.
    ///
    /// Returns `Ok(None)` when nothing matched or the selected candidate has
    /// no `CodiceEgon`.
    ///
    /// # Errors
    ///
    /// Any [`TransportError`] from the underlying call.
    pub async fn resolve_address(
        &self,
        city: &CityIdentity,
        address: &str,
    ) -> Result<Option<AddressIdentity>, TransportError> {
        tracing::debug!(city_code = %city.city_code, address, "resolving address");
        let query = [("query", address), ("cityId", city.city_code.as_str())];
        let Some(body) = self.fetch_body(GET_ADDRESSES_BY_CITY, &query).await? else {
            return Ok(None);
        };

        let address_code = CANDIDATE_POLICY
            .select(candidates(&body))
            .and_then(|first| OpaqueId::from_field(first.get("CodiceEgon")));

        if address_code.is_none() {
            tracing::warn!(address, "address candidate missing CodiceEgon");
        }
        Ok(address_code.map(|address_code| AddressIdentity { address_code }))
    }
}
