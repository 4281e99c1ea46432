//! Grounding metadata returned alongside the model reply, and the selection
//! of which sources to surface.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lenient;

/// Upper bound on web sources surfaced per answer.
pub const MAX_WEB_SOURCES: usize = 3;

const DEFAULT_MAP_TITLE: &str = "Google Maps";
const DEFAULT_WEB_TITLE: &str = "Source";

/// Side-channel metadata attached to a backend candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default, deserialize_with = "lenient::list")]
    pub grounding_chunks: Vec<GroundingChunk>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub grounding_supports: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub web_search_queries: Vec<String>,
}

/// A single citation; exactly one of `web` or `maps` is expected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub web: Option<WebChunk>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub maps: Option<MapsChunk>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebChunk {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsChunk {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_answer_sources: Option<Value>,
}

/// A link ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceLink {
    pub uri: String,
    pub title: String,
}

/// Sources chosen for display: at most one map, at most three web pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingSources {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_source: Option<SourceLink>,
    pub web_sources: Vec<SourceLink>,
}

fn link(uri: &Option<String>, title: &Option<String>, fallback: &str) -> Option<SourceLink> {
    let uri = uri.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
    let title = title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(fallback);
    Some(SourceLink {
        uri: uri.to_string(),
        title: title.to_string(),
    })
}

/// Pick the sources to show for an answer.
///
/// The first maps chunk wins; web chunks keep the backend's order and are
/// capped at [`MAX_WEB_SOURCES`]. Chunks without a URI are ignored.
pub fn extract_sources(metadata: &GroundingMetadata) -> GroundingSources {
    let map_source = metadata
        .grounding_chunks
        .iter()
        .filter_map(|c| c.maps.as_ref())
        .find_map(|m| link(&m.uri, &m.title, DEFAULT_MAP_TITLE));

    let web_sources = metadata
        .grounding_chunks
        .iter()
        .filter_map(|c| c.web.as_ref())
        .filter_map(|w| link(&w.uri, &w.title, DEFAULT_WEB_TITLE))
        .take(MAX_WEB_SOURCES)
        .collect();

    GroundingSources {
        map_source,
        web_sources,
    }
}
