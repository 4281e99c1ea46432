//! Turning a raw backend reply into text and a typed payload.

use serde_json::Value;
use thiserror::Error;

use crate::backend::RawBackendReply;
use crate::grounding::GroundingMetadata;
use crate::models::StationResponseSchema;

/// Text used when the backend produced no candidate or no text.
pub const EMPTY_REPLY: &str = "{}";

/// Reply text is not a usable JSON document.
///
/// Recoverable: the orchestrator turns it into `structured_data: None`.
#[derive(Error, Debug)]
pub enum ParseFailure {
    /// Not JSON at all
    #[error("Invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// JSON whose top level is not an object
    #[error("Expected a JSON object, got {0}")]
    Shape(String),
}

/// Text and side-channel metadata of the first candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    /// Trimmed, fence-stripped text
    pub text: String,
    pub metadata: Option<GroundingMetadata>,
}

/// Pull the first candidate's text and grounding metadata out of a reply.
///
/// Text fragments are joined with no separator. A reply without usable text
/// becomes [`EMPTY_REPLY`].
pub fn unwrap_reply(reply: RawBackendReply) -> ParsedReply {
    let candidate = reply.candidates.into_iter().next();

    let (joined, metadata) = match candidate {
        Some(c) => {
            let joined: String = c
                .content
                .map(|content| {
                    content
                        .parts
                        .into_iter()
                        .filter_map(|p| p.text)
                        .collect()
                })
                .unwrap_or_default();
            (joined, c.grounding_metadata)
        }
        None => (String::new(), None),
    };

    let text = if joined.is_empty() {
        EMPTY_REPLY
    } else {
        joined.as_str()
    };

    ParsedReply {
        text: strip_code_fence(text).to_string(),
        metadata,
    }
}

/// Trim and remove a surrounding Markdown code fence (```` ```json ```` or ```` ``` ````).
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let body = if let Some(rest) = trimmed.strip_prefix("```json") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest
    } else {
        return trimmed;
    };

    let body = body.trim_start();
    match body.strip_suffix("```") {
        Some(inner) => inner.trim_end(),
        None => body,
    }
}

/// Deserialize unwrapped reply text into the response schema.
pub fn parse_schema(text: &str) -> Result<StationResponseSchema, ParseFailure> {
    let value: Value = serde_json::from_str(text)?;

    match value {
        Value::Object(_) => {
            serde_json::from_value(value).map_err(|e| ParseFailure::Shape(e.to_string()))
        }
        Value::Array(_) => Err(ParseFailure::Shape("an array".to_string())),
        Value::String(_) => Err(ParseFailure::Shape("a string".to_string())),
        Value::Number(_) => Err(ParseFailure::Shape("a number".to_string())),
        Value::Bool(_) => Err(ParseFailure::Shape("a boolean".to_string())),
        Value::Null => Err(ParseFailure::Shape("null".to_string())),
    }
}
