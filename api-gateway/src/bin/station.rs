//! Station Lambda - Handles the /v1/station endpoint.
//!
//! Accepts `POST {"stationName": "...", "location": {...}}`, asks the
//! generative backend about the station and returns the resolved record,
//! the candidate list for ambiguous names, or an unresolved marker.

use lambda_http::http::Method;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Deserialize;
use shared::http::{error_response, json_response, RETRY_MESSAGE};
use shared::{parse_body, ApiResponse, Config, GeminiClient, Location, StationFactService, StationQuery};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct LookupRequest {
    #[validate(length(min = 1, max = 200))]
    station_name: String,
    #[validate(nested)]
    location: Option<Coordinates>,
}

#[derive(Debug, Deserialize, Validate)]
struct Coordinates {
    #[validate(range(min = -90.0, max = 90.0))]
    latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    longitude: f64,
}

impl From<Coordinates> for Location {
    fn from(c: Coordinates) -> Self {
        Location {
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

/// Application state shared across requests.
struct AppState {
    service: StationFactService<GeminiClient>,
}

impl AppState {
    fn new() -> Result<Self, Error> {
        let config = Config::from_env()?;
        info!("Using model {}", config.model);

        Ok(Self {
            service: StationFactService::<GeminiClient>::from_config(&config)?,
        })
    }
}

/// Check a request and turn it into a query.
fn into_query(request: LookupRequest) -> shared::Result<StationQuery> {
    request
        .validate()
        .map_err(|e| shared::Error::Validation(format!("Invalid request: {}", e)))?;

    let station_name = request.station_name.trim();
    if station_name.is_empty() {
        return Err(shared::Error::Validation(
            "Station name cannot be empty".to_string(),
        ));
    }

    Ok(StationQuery::new(
        station_name,
        request.location.map(Location::from),
    ))
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    if event.method() != Method::POST {
        return error_response(405, "Method not allowed");
    }

    let request: LookupRequest = parse_body!(event.body());

    let query = match into_query(request) {
        Ok(query) => query,
        Err(e) => return error_response(e.status_code(), e.to_string()),
    };

    match state.service.lookup(&query).await {
        Ok(lookup) => json_response(200, &ApiResponse::success(lookup)),
        Err(e) => {
            error!("Station lookup failed for '{}': {}", query.station_name, e);
            error_response(e.status_code(), RETRY_MESSAGE)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new()?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
