//! Station lookup orchestration: prompt, backend call, parse, normalize.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, NaiveTime};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::backend::{GeminiClient, GenerativeBackend, RawBackendReply};
use crate::classify::StatusBadges;
use crate::grounding::{extract_sources, GroundingSources};
use crate::models::{FactResponse, Location, StationQuery};
use crate::normalize::normalize;
use crate::parser::{parse_schema, unwrap_reply};
use crate::prompt::build_prompt;
use crate::resolve::{resolve_opt, Resolution};
use crate::{Config, Result};

/// Answers station queries against a generative backend.
///
/// Holds no per-query state; concurrent calls are independent.
pub struct StationFactService<B> {
    backend: B,
}

impl StationFactService<GeminiClient> {
    /// Build a service backed by the Gemini REST API.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(GeminiClient::new(config)?))
    }
}

impl<B: GenerativeBackend> StationFactService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Look up a station using the current local time.
    pub async fn get_station_fact(
        &self,
        station_name: &str,
        location: Option<Location>,
    ) -> Result<FactResponse> {
        let query = StationQuery::new(station_name, location);
        self.get_station_fact_at(&query, Local::now().time()).await
    }

    /// Look up a station as if the local time were `now`.
    ///
    /// Backend failures are returned as errors. Unparseable replies are not:
    /// they come back with `structured_data: None` and the raw text.
    pub async fn get_station_fact_at(
        &self,
        query: &StationQuery,
        now: NaiveTime,
    ) -> Result<FactResponse> {
        info!(
            "Looking up station '{}' (location bias: {})",
            query.station_name,
            query.location.is_some()
        );

        let payload = build_prompt(query, now);
        let reply = match self.backend.generate(&payload).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Backend call failed for '{}': {}", query.station_name, e);
                return Err(e);
            }
        };

        let response = assemble(reply);
        info!(
            "Lookup for '{}' finished (structured: {})",
            query.station_name,
            response.structured_data.is_some()
        );
        Ok(response)
    }

    /// Look up a station and reduce the result to what a view needs.
    pub async fn lookup(&self, query: &StationQuery) -> Result<StationLookup> {
        let fact = self.get_station_fact_at(query, Local::now().time()).await?;
        Ok(StationLookup::from(fact))
    }
}

/// Run a backend reply through unwrap, parse and normalize.
pub fn assemble(reply: RawBackendReply) -> FactResponse {
    let parsed = unwrap_reply(reply);

    let structured_data = match parse_schema(&parsed.text) {
        Ok(mut schema) => {
            normalize(&mut schema);
            Some(schema)
        }
        Err(e) => {
            warn!("Failed to parse backend reply: {}", e);
            warn!("Raw reply text: {}", parsed.text);
            None
        }
    };

    FactResponse {
        structured_data,
        raw_text: parsed.text,
        grounding_metadata: parsed.metadata,
    }
}

/// View-ready outcome of a lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationLookup {
    pub resolution: Resolution,
    pub sources: GroundingSources,
    /// Present only for resolved stations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badges: Option<StatusBadges>,
    pub raw_text: String,
}

impl From<FactResponse> for StationLookup {
    fn from(fact: FactResponse) -> Self {
        let sources = fact
            .grounding_metadata
            .as_ref()
            .map(extract_sources)
            .unwrap_or_default();

        let resolution = resolve_opt(fact.structured_data);
        let badges = match &resolution {
            Resolution::Resolved { data } => Some(StatusBadges::for_station(data)),
            _ => None,
        };

        Self {
            resolution,
            sources,
            badges,
            raw_text: fact.raw_text,
        }
    }
}

/// Identifies one issued query; compare with [`QueryTracker::is_current`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueryTicket(u64);

/// Hands out query tickets so a caller can drop results of superseded queries.
#[derive(Debug, Default)]
pub struct QueryTracker {
    latest: AtomicU64,
}

impl QueryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new query; every earlier ticket becomes stale.
    pub fn issue(&self) -> QueryTicket {
        QueryTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the most recently issued query.
    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
