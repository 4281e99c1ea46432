//! Display categories derived from free-text status fields.

use serde::Serialize;

use crate::models::StationData;

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Overall service state of a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceStatus {
    Good,
    Disrupted,
    Closed,
}

impl ServiceStatus {
    pub fn classify(status: &str) -> Self {
        let s = status.to_lowercase();
        if contains_any(&s, &["good", "operational", "normal", "on time"]) {
            ServiceStatus::Good
        } else if contains_any(&s, &["closure", "suspended", "closed"]) {
            ServiceStatus::Closed
        } else {
            ServiceStatus::Disrupted
        }
    }
}

/// Step-free access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StepFreeLevel {
    Full,
    Partial,
    None,
}

impl StepFreeLevel {
    /// Negative phrasings are checked first; unrecognized text counts as full access.
    pub fn classify(status: &str) -> Self {
        let s = status.to_lowercase();
        if contains_any(&s, &["no step-free", "not accessible", "no access"]) {
            StepFreeLevel::None
        } else if contains_any(&s, &["partial", "some", "limited"]) {
            StepFreeLevel::Partial
        } else {
            StepFreeLevel::Full
        }
    }
}

/// State of a single departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DepartureState {
    OnTime,
    Cancelled,
    /// Delayed, scheduled or unrecognized
    Other,
}

impl DepartureState {
    pub fn classify(status: &str) -> Self {
        let s = status.to_lowercase();
        if s.contains("time") {
            DepartureState::OnTime
        } else if s.contains("cancel") {
            DepartureState::Cancelled
        } else {
            DepartureState::Other
        }
    }
}

/// Categories for every status field of a station, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBadges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_free: Option<StepFreeLevel>,
    /// One entry per departure; `None` where the departure has no status
    pub departures: Vec<Option<DepartureState>>,
}

impl StatusBadges {
    pub fn for_station(data: &StationData) -> Self {
        Self {
            service: data.operational_status.as_deref().map(ServiceStatus::classify),
            step_free: data
                .step_free_access
                .as_ref()
                .and_then(|a| a.status.as_deref())
                .map(StepFreeLevel::classify),
            departures: data
                .next_departures
                .iter()
                .map(|d| d.status.as_deref().map(DepartureState::classify))
                .collect(),
        }
    }
}
