//! `GetCities`: city name to city code and province.

use crate::envelope::{candidates, OpaqueId, CANDIDATE_POLICY};
use crate::error::TransportError;
use crate::types::CityIdentity;

use super::{Resolvers, GET_CITIES};

impl Resolvers {
    /// Resolves a free-text city name to its [`CityIdentity`].
    ///
    /// Returns `Ok(None)` when nothing matched, or when the selected candidate
    /// lacks `IdCity` or `Province`.
    ///
    /// # Errors
    ///
    /// Any [`TransportError`] from the underlying call.
    pub async fn resolve_city(&self, city_name: &str) -> Result<Option<CityIdentity>, TransportError> {
        tracing::debug!(city = city_name, "resolving city");
        let Some(body) = self.fetch_body(GET_CITIES, &[("query", city_name)]).await? else {
            return Ok(None);
        };

        let Some(first) = CANDIDATE_POLICY.select(candidates(&body)) else {
            return Ok(None);
        };

        let city_code = OpaqueId::from_field(first.get("IdCity"));
        let province = first
            .get("Province")
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|p| !p.is_empty());

        match (city_code, province) {
            (Some(city_code), Some(province)) => Ok(Some(CityIdentity {
                city_code,
                province: province.to_string(),
            })),
            _ => {
                tracing::warn!(city = city_name, "city candidate missing IdCity or Province");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::super::test_support::StubTransport;
    use super::*;

    #[tokio::test]
    async fn picks_first_city_candidate() {
        let stub = Arc::new(StubTransport::new().ok(
            GET_CITIES,
            &json!({"Body": [
                {"IdCity": 15146, "Province": "MI", "Name": "MILANO"},
                {"IdCity": 99999, "Province": "XX", "Name": "MILANO MARITTIMA"}
            ]}),
        ));
        let resolvers = Resolvers::new(stub.clone());

        let city = resolvers.resolve_city("Milano").await.unwrap().unwrap();
        assert_eq!(city.city_code, OpaqueId::from("15146"));
        assert_eq!(city.province, "MI");
        assert_eq!(
            stub.query_of(GET_CITIES),
            vec![("query".to_string(), "Milano".to_string())]
        );
    }

    #[tokio::test]
    async fn candidate_without_province_fails_closed() {
        let stub = Arc::new(StubTransport::new().ok(
            GET_CITIES,
            &json!({"Body": [{"IdCity": 15146, "Province": null}]}),
        ));
        let resolvers = Resolvers::new(stub);
        assert!(resolvers.resolve_city("Milano").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn candidate_without_id_fails_closed() {
        let stub = Arc::new(
            StubTransport::new().ok(GET_CITIES, &json!({"Body": [{"Province": "MI"}]})),
        );
        let resolvers = Resolvers::new(stub);
        assert!(resolvers.resolve_city("Milano").await.unwrap().is_none());
    }
}
