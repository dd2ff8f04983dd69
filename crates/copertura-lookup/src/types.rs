//! Identities produced by the lookup stages.
//!
//! Each value lives only for the duration of one resolution; nothing here is
//! cached or shared between requests.

use serde_json::Value;

use crate::envelope::OpaqueId;

/// Result of `GetCities`: the city's code and its province.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityIdentity {
    pub city_code: OpaqueId,
    pub province: String,
}

/// Result of `GetAddressesByCity`: the street's Egon code within one city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressIdentity {
    pub address_code: OpaqueId,
}

/// Result of `GetHeaders`.
///
/// `header_ids` keeps every candidate in upstream order; `main_code` always
/// comes from the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSet {
    pub header_ids: Vec<OpaqueId>,
    pub main_code: OpaqueId,
}

impl HeaderSet {
    /// Renders `header_ids` in the bracketed form `GetCoverageServices`
    /// expects, e.g. `[101, 102]`. Ids are written verbatim, never quoted.
    #[must_use]
    pub fn headers_param(&self) -> String {
        let joined = self
            .header_ids
            .iter()
            .map(OpaqueId::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{joined}]")
    }
}

/// Raw `Body` of `GetCoverageServices`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoveragePayload {
    pub body: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_param_lists_every_header_in_order() {
        let set = HeaderSet {
            header_ids: vec![OpaqueId::from("101"), OpaqueId::from("102")],
            main_code: OpaqueId::from("900"),
        };
        assert_eq!(set.headers_param(), "[101, 102]");
    }

    #[test]
    fn headers_param_single_header() {
        let set = HeaderSet {
            header_ids: vec![OpaqueId::from("7")],
            main_code: OpaqueId::from("900"),
        };
        assert_eq!(set.headers_param(), "[7]");
    }

    #[test]
    fn headers_param_leaves_string_ids_unquoted() {
        let set = HeaderSet {
            header_ids: vec![OpaqueId::from("H1"), OpaqueId::from("H2")],
            main_code: OpaqueId::from("900"),
        };
        assert_eq!(set.headers_param(), "[H1, H2]");
    }
}
