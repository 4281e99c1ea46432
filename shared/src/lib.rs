//! Station fact lookup core.
//!
//! Asks a grounded generative backend about a station, then repairs,
//! validates and sanitizes its reply into typed data. Shared by the Lambda
//! functions in this workspace.

pub mod backend;
pub mod classify;
pub mod config;
pub mod error;
pub mod grounding;
pub mod http;
pub mod lenient;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod prompt;
pub mod resolve;
pub mod sanitize;
pub mod service;

pub use backend::{GeminiClient, GenerativeBackend, RawBackendReply};
pub use classify::{DepartureState, ServiceStatus, StatusBadges, StepFreeLevel};
pub use config::Config;
pub use error::{Error, Result};
pub use grounding::{extract_sources, GroundingMetadata, GroundingSources, SourceLink};
pub use http::ApiResponse;
pub use models::{
    BusInfo, CoachInfo, DepartureInfo, FactResponse, Location, StationData, StationQuery,
    StationResponseSchema, StepFreeAccess, TransitLine,
};
pub use parser::ParseFailure;
pub use prompt::{build_prompt, PromptPayload};
pub use resolve::{resolve, Resolution};
pub use sanitize::strip_citations;
pub use service::{QueryTicket, QueryTracker, StationFactService, StationLookup};
