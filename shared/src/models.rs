//! Shared data models.
//!
//! Field names follow the JSON contract asserted to the backend (camelCase).
//! Every field is optional at the boundary; see [`crate::lenient`].

use serde::{Deserialize, Serialize};

use crate::grounding::GroundingMetadata;
use crate::lenient;

/// WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// One lookup request.
#[derive(Debug, Clone, PartialEq)]
pub struct StationQuery {
    /// Free-text station name as typed by the user
    pub station_name: String,
    /// Optional position used to bias grounding
    pub location: Option<Location>,
}

impl StationQuery {
    pub fn new(station_name: impl Into<String>, location: Option<Location>) -> Self {
        Self {
            station_name: station_name.into(),
            location,
        }
    }
}

/// Top-level payload the backend is asked to return.
///
/// `is_ambiguous` is authoritative; `candidates` and `data` may both be
/// present or absent regardless of it. Interpretation lives in
/// [`crate::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResponseSchema {
    #[serde(default, deserialize_with = "lenient::flag_or_false")]
    pub is_ambiguous: bool,
    #[serde(default, deserialize_with = "lenient::list")]
    pub candidates: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::object",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<StationData>,
}

/// Resolved station record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationData {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub official_name: Option<String>,
    /// Main line or physical route, e.g. "West Coast Main Line"
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub route_description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub fun_fact: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub historical_context: Option<String>,
    /// "Opened: YYYY" or "Opened: YYYY  Reopened: YYYY"
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub opening_info: Option<String>,
    /// Free text; categorized by [`crate::classify::ServiceStatus`]
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub operational_status: Option<String>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub step_free_access: Option<StepFreeAccess>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub has_toilets: Option<bool>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub lines: Vec<TransitLine>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub buses: Vec<BusInfo>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub coaches: Vec<CoachInfo>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub next_departures: Vec<DepartureInfo>,
}

/// Accessibility summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepFreeAccess {
    /// One of the fixed phrasings, e.g. "Partial step-free access"
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A line, route or operator calling at the station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitLine {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub color_hex: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub text_color_hex: String,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub provider_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusInfo {
    #[serde(default, deserialize_with = "lenient::text")]
    pub route: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub destination: String,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub next_arrival: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoachInfo {
    #[serde(default, deserialize_with = "lenient::text")]
    pub provider: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub route: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartureInfo {
    #[serde(default, deserialize_with = "lenient::text")]
    pub destination: String,
    /// HH:MM
    #[serde(default, deserialize_with = "lenient::text")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Categorized by [`crate::classify::DepartureState`]
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

/// Result of one lookup.
///
/// `structured_data` is `None` exactly when the reply text was not usable
/// JSON; `raw_text` is always the unwrapped reply text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactResponse {
    pub structured_data: Option<StationResponseSchema>,
    pub raw_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_station() {
        let json = r##"{
            "isAmbiguous": false,
            "candidates": [],
            "data": {
                "officialName": "Bank",
                "routeDescription": "Central line",
                "location": "City of London",
                "openingInfo": "Opened: 1900",
                "funFact": "Fact.",
                "historicalContext": "History.",
                "operationalStatus": "Good Service",
                "stepFreeAccess": {"status": "Partial step-free access", "details": "DLR only"},
                "hasToilets": false,
                "lines": [{"name": "Central", "colorHex": "#DC241F", "textColorHex": "#FFFFFF", "providerUrl": "https://tfl.gov.uk"}],
                "buses": [{"route": "21", "destination": "Lewisham", "nextArrival": "3 min"}],
                "coaches": [],
                "nextDepartures": [{"destination": "Epping", "time": "10:04", "platform": "1", "status": "On time", "operator": "TfL"}]
            }
        }"##;

        let schema: StationResponseSchema = serde_json::from_str(json).unwrap();
        assert!(!schema.is_ambiguous);
        let data = schema.data.unwrap();
        assert_eq!(data.official_name.as_deref(), Some("Bank"));
        assert_eq!(data.has_toilets, Some(false));
        assert_eq!(data.lines[0].color_hex, "#DC241F");
        assert_eq!(data.buses[0].next_arrival.as_deref(), Some("3 min"));
        assert_eq!(data.next_departures[0].time, "10:04");
        assert_eq!(
            data.step_free_access.unwrap().details.as_deref(),
            Some("DLR only")
        );
    }

    #[test]
    fn test_missing_lists_are_empty() {
        let schema: StationResponseSchema =
            serde_json::from_str(r#"{"data": {"officialName": "Cyprus", "lines": null}}"#).unwrap();
        let data = schema.data.unwrap();
        assert!(data.lines.is_empty());
        assert!(data.buses.is_empty());
        assert!(data.coaches.is_empty());
        assert!(data.next_departures.is_empty());
        assert_eq!(data.fun_fact, None);
    }

    #[test]
    fn test_fact_response_wire_names() {
        let response = FactResponse {
            structured_data: None,
            raw_text: "oops".to_string(),
            grounding_metadata: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["structuredData"], serde_json::Value::Null);
        assert_eq!(value["rawText"], "oops");
        assert!(value.get("groundingMetadata").is_none());
    }
}
