//! `GetHeaders`: connection headers serving one street number.

use crate::address::NormalizedAddress;
use crate::envelope::{candidates, OpaqueId, CANDIDATE_POLICY};
use crate::error::TransportError;
use crate::types::{CityIdentity, HeaderSet};

use super::{Resolvers, GET_HEADERS};

impl Resolvers {
    /// Resolves the connection headers for a street number.
    ///
    /// Every candidate contributes its `IdHeader`; `CodiceEgon` of the
    /// selected (first) candidate becomes the main code. Candidates without
    /// an `IdHeader` are skipped. Returns `Ok(None)` when there are no
    /// headers or the first candidate has no `CodiceEgon`.
    ///
    /// # Errors
    ///
    /// Any [`TransportError`] from the underlying call.
    pub async fn resolve_headers(
        &self,
        city_name: &str,
        city: &CityIdentity,
        address: &NormalizedAddress,
        street_number: &str,
    ) -> Result<Option<HeaderSet>, TransportError> {
        tracing::debug!(
            city = city_name,
            province = %city.province,
            address = %address.address,
            street_number,
            "resolving headers"
        );

        let mut query = vec![
            ("city", city_name),
            ("province", city.province.as_str()),
            ("address", address.address.as_str()),
            ("number", street_number),
        ];
        if let Some(street_type) = address.street_type.as_deref() {
            query.push(("street", street_type));
        }

        let Some(body) = self.fetch_body(GET_HEADERS, &query).await? else {
            return Ok(None);
        };

        let list = candidates(&body);
        let header_ids: Vec<OpaqueId> = list
            .iter()
            .filter_map(|candidate| OpaqueId::from_field(candidate.get("IdHeader")))
            .collect();
        if header_ids.len() < list.len() {
            tracing::warn!(
                skipped = list.len() - header_ids.len(),
                "header candidates without IdHeader skipped"
            );
        }

        let main_code = CANDIDATE_POLICY
            .select(list)
            .and_then(|first| OpaqueId::from_field(first.get("CodiceEgon")));

        match main_code {
            Some(main_code) if !header_ids.is_empty() => Ok(Some(HeaderSet {
                header_ids,
                main_code,
            })),
            _ => {
                tracing::warn!(street_number, "no usable header candidates");
                Ok(None)
            }
        }
    }
}
