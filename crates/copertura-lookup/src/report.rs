//! Turns the raw coverage payload into display rows.
//!
//! Only four fields of each availability report survive, under Italian
//! user-facing labels. Status and fiber range are canonicalized so the output
//! never contains raw nulls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DataShapeError;
use crate::types::CoveragePayload;

/// Label used whenever a value is missing or not understood.
pub const UNKNOWN: &str = "Sconosciuto";

/// Tri-state service status derived from `StatusCoverage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageStatus {
    #[serde(rename = "Attivo")]
    Active,
    #[serde(rename = "Non attivo")]
    Inactive,
    #[serde(rename = "Sconosciuto")]
    Unknown,
}

impl CoverageStatus {
    /// `true` and `false` map to active/inactive; anything else is unknown.
    #[must_use]
    pub fn from_field(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Bool(true)) => Self::Active,
            Some(Value::Bool(false)) => Self::Inactive,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Attivo",
            Self::Inactive => "Non attivo",
            Self::Unknown => UNKNOWN,
        }
    }
}

impl std::fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One offered service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// `MaxSpeed` exactly as the upstream sent it.
    #[serde(rename = "Velocità Massima")]
    pub max_speed: Value,
    #[serde(rename = "Tipo di Servizio")]
    pub service_type: String,
    #[serde(rename = "Fascia")]
    pub fiber_range: String,
    #[serde(rename = "Stato")]
    pub status: CoverageStatus,
}

/// Borrows the `AvailabilityReports` array out of a coverage payload.
/// A `null` array is read as empty, like an empty `Body`.
///
/// # Errors
///
/// [`DataShapeError::MissingReports`] if the key is absent or neither an
/// array nor `null`.
pub fn availability_reports(payload: &CoveragePayload) -> Result<&[Value], DataShapeError> {
    match payload.body.get("AvailabilityReports") {
        Some(Value::Null) => Ok(&[]),
        Some(Value::Array(reports)) => Ok(reports.as_slice()),
        _ => Err(DataShapeError::MissingReports),
    }
}

/// Normalizes every availability report into a [`ReportRow`], preserving
/// upstream order. An empty input gives an empty output.
///
/// # Errors
///
/// Aborts the whole report with [`DataShapeError`] if any entry is not an
/// object or lacks `MaxSpeed` or `ServiceDescription`.
pub fn normalize_reports(reports: &[Value]) -> Result<Vec<ReportRow>, DataShapeError> {
    reports
        .iter()
        .enumerate()
        .map(|(index, report)| normalize_row(index, report))
        .collect()
}

fn normalize_row(index: usize, report: &Value) -> Result<ReportRow, DataShapeError> {
    let Some(fields) = report.as_object() else {
        return Err(DataShapeError::NotAnObject { index });
    };

    let max_speed = fields
        .get("MaxSpeed")
        .filter(|v| !v.is_null())
        .cloned()
        .ok_or(DataShapeError::MissingField {
            index,
            field: "MaxSpeed",
        })?;

    let service_type = fields
        .get("ServiceDescription")
        .and_then(scalar_text)
        .ok_or(DataShapeError::MissingField {
            index,
            field: "ServiceDescription",
        })?;

    let fiber_range = fields
        .get("FiberRange")
        .and_then(scalar_text)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());

    Ok(ReportRow {
        max_speed,
        service_type,
        fiber_range,
        status: CoverageStatus::from_field(fields.get("StatusCoverage")),
    })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Name of the first provider: `reports[0].CoverageDetails[0].Description`.
///
/// Purely informational; any missing or mistyped step yields `None`.
#[must_use]
pub fn extract_provider(reports: &[Value]) -> Option<String> {
    reports
        .first()?
        .get("CoverageDetails")?
        .as_array()?
        .first()?
        .get("Description")?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn status_tri_state() {
        assert_eq!(
            CoverageStatus::from_field(Some(&json!(true))),
            CoverageStatus::Active
        );
        assert_eq!(
            CoverageStatus::from_field(Some(&json!(false))),
            CoverageStatus::Inactive
        );
        for other in [json!(null), json!("true"), json!(1), json!({})] {
            assert_eq!(
                CoverageStatus::from_field(Some(&other)),
                CoverageStatus::Unknown,
                "value {other}"
            );
        }
        assert_eq!(CoverageStatus::from_field(None), CoverageStatus::Unknown);
    }

    #[test]
    fn single_report_becomes_labelled_row() {
        let reports = [json!({
            "MaxSpeed": 100,
            "ServiceDescription": "FTTH",
            "FiberRange": "A",
            "StatusCoverage": true,
            "Operator": "dropped"
        })];
        let rows = normalize_reports(&reports).unwrap();
        assert_eq!(rows.len(), 1);

        let rendered = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(
            rendered,
            json!({
                "Velocità Massima": 100,
                "Tipo di Servizio": "FTTH",
                "Fascia": "A",
                "Stato": "Attivo"
            })
        );
    }

    #[test]
    fn missing_null_or_blank_fiber_range_is_unknown() {
        let reports = [
            json!({"MaxSpeed": 20, "ServiceDescription": "ADSL", "FiberRange": null}),
            json!({"MaxSpeed": 20, "ServiceDescription": "ADSL"}),
            json!({"MaxSpeed": 20, "ServiceDescription": "ADSL", "FiberRange": " "}),
        ];
        let rows = normalize_reports(&reports).unwrap();
        assert!(rows.iter().all(|r| r.fiber_range == UNKNOWN));
        assert!(rows.iter().all(|r| r.status == CoverageStatus::Unknown));
    }

    #[test]
    fn rows_keep_upstream_order() {
        let reports = [
            json!({"MaxSpeed": 1000, "ServiceDescription": "FTTH", "StatusCoverage": false}),
            json!({"MaxSpeed": 200, "ServiceDescription": "FTTC", "StatusCoverage": true}),
        ];
        let rows = normalize_reports(&reports).unwrap();
        assert_eq!(rows[0].service_type, "FTTH");
        assert_eq!(rows[0].status, CoverageStatus::Inactive);
        assert_eq!(rows[1].service_type, "FTTC");
    }

    #[test]
    fn normalization_is_idempotent() {
        let reports = [json!({
            "MaxSpeed": "100",
            "ServiceDescription": "FTTH",
            "FiberRange": null,
            "StatusCoverage": "maybe"
        })];
        let first = normalize_reports(&reports).unwrap();
        let second = normalize_reports(&reports).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_service_description_aborts_report() {
        let reports = [
            json!({"MaxSpeed": 100, "ServiceDescription": "FTTH"}),
            json!({"MaxSpeed": 100}),
        ];
        assert_eq!(
            normalize_reports(&reports),
            Err(DataShapeError::MissingField {
                index: 1,
                field: "ServiceDescription"
            })
        );
    }

    #[test]
    fn null_max_speed_aborts_report() {
        let reports = [json!({"MaxSpeed": null, "ServiceDescription": "FTTH"})];
        assert_eq!(
            normalize_reports(&reports),
            Err(DataShapeError::MissingField {
                index: 0,
                field: "MaxSpeed"
            })
        );
    }

    #[test]
    fn non_object_entry_aborts_report() {
        assert_eq!(
            normalize_reports(&[json!("FTTH")]),
            Err(DataShapeError::NotAnObject { index: 0 })
        );
    }

    #[test]
    fn availability_reports_requires_array() {
        let payload = CoveragePayload {
            body: json!({"Something": []}),
        };
        assert_eq!(
            availability_reports(&payload),
            Err(DataShapeError::MissingReports)
        );

        let payload = CoveragePayload {
            body: json!({"AvailabilityReports": [{"MaxSpeed": 1}]}),
        };
        assert_eq!(availability_reports(&payload).unwrap().len(), 1);

        let payload = CoveragePayload {
            body: json!({"AvailabilityReports": "none"}),
        };
        assert_eq!(
            availability_reports(&payload),
            Err(DataShapeError::MissingReports)
        );
    }

    #[test]
    fn null_availability_reports_reads_as_empty() {
        let payload = CoveragePayload {
            body: json!({"AvailabilityReports": null}),
        };
        assert_eq!(availability_reports(&payload), Ok(&[][..]));
    }

    #[test]
    fn provider_from_first_report() {
        let reports = [
            json!({"CoverageDetails": [{"Description": "Open Fiber"}, {"Description": "FiberCop"}]}),
            json!({"CoverageDetails": [{"Description": "Other"}]}),
        ];
        assert_eq!(extract_provider(&reports).as_deref(), Some("Open Fiber"));
    }

    #[test]
    fn provider_missing_anywhere_is_none() {
        assert_eq!(extract_provider(&[]), None);
        assert_eq!(extract_provider(&[json!({})]), None);
        assert_eq!(extract_provider(&[json!({"CoverageDetails": []})]), None);
        assert_eq!(extract_provider(&[json!({"CoverageDetails": "x"})]), None);
        assert_eq!(
            extract_provider(&[json!({"CoverageDetails": [{"Description": null}]})]),
            None
        );
    }
}
