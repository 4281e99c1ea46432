//! Instruction text and tool configuration sent to the generative backend.

use std::fmt::Write as _;

use chrono::NaiveTime;

use crate::models::{Location, StationQuery};
use crate::normalize::{DEFAULT_LINE_COLOR, DEFAULT_TEXT_COLOR};

/// Fixed phrasings allowed for `stepFreeAccess.status`.
pub const STEP_FREE_PHRASINGS: [&str; 3] = [
    "Full step-free access",
    "Partial step-free access",
    "No step-free access",
];

/// Known operator brand colors offered to the model as reference.
pub const OPERATOR_COLORS: &[(&str, &str)] = &[
    ("Avanti West Coast", "#00455D"),
    ("West Midlands Trains", "#F05A22 or #522398"),
    ("London Northwestern", "#00BFA5"),
    ("LNER", "#CE0E2D"),
    ("Elizabeth Line", "#6950a1"),
    ("Overground", "#ef7b10"),
];

/// Literal output contract embedded in the prompt.
pub const RESPONSE_SCHEMA: &str = r#"{
  "isAmbiguous": boolean,
  "candidates": string[],
  "data": {
    "officialName": string,
    "routeDescription": string,
    "location": string,
    "openingInfo": string,
    "funFact": string,
    "historicalContext": string,
    "operationalStatus": string,
    "stepFreeAccess": { "status": string, "details": string },
    "hasToilets": boolean,
    "lines": [{ "name": string, "colorHex": string, "textColorHex": string, "providerUrl": string }],
    "buses": [{ "route": string, "destination": string, "nextArrival": string }],
    "coaches": [{ "provider": string, "route": string, "link": string }],
    "nextDepartures": [{ "destination": string, "time": string, "platform": string, "status": string, "operator": string }]
  }
}"#;

/// Backend-side capabilities to enable for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundingTool {
    Maps,
    WebSearch,
}

/// Everything the backend needs for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPayload {
    pub text: String,
    pub tools: Vec<GroundingTool>,
    /// Present when the caller supplied a position
    pub location_bias: Option<Location>,
}

/// Render the request for `query` at local time `now`.
///
/// Pure: the same query and time always produce the same payload.
pub fn build_prompt(query: &StationQuery, now: NaiveTime) -> PromptPayload {
    PromptPayload {
        text: render_instructions(&query.station_name, now),
        tools: vec![GroundingTool::Maps, GroundingTool::WebSearch],
        location_bias: query.location,
    }
}

fn render_instructions(station_name: &str, now: NaiveTime) -> String {
    let mut text = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(text, "User Query: {:?}", station_name);
    let _ = writeln!(text, "Current Local Time: {}", now.format("%H:%M"));
    text.push('\n');

    text.push_str(
        "Task: Provide verified, accurate information about the RAIL/METRO/BUS STATION matching this name.\n\n",
    );

    text.push_str("AMBIGUITY RULE:\n");
    text.push_str(
        "- The user is asking about a STATION. If the query is also a country, place or common word \
         (e.g. \"Cyprus\", \"Bank\", \"Jordan\", \"Waterloo\"), assume they mean the STATION.\n",
    );
    text.push_str(
        "- ONLY set \"isAmbiguous\": true when MULTIPLE distinct STATIONS in DIFFERENT cities share \
         the name. Then list each one in \"candidates\" and omit \"data\".\n\n",
    );

    text.push_str("STATION DETAILS (when not ambiguous):\n");
    text.push_str("- officialName: full station name.\n");
    text.push_str(
        "- routeDescription: name of the main line or physical route (e.g. \"West Coast Main Line\", \
         \"Piccadilly Line\"). Empty string if unknown.\n",
    );
    text.push_str(
        "- openingInfo: STRICT FORMAT \"Opened: YYYY\", or \"Opened: YYYY  Reopened: YYYY\" if it \
         reopened. Years only, no other words.\n",
    );
    text.push_str("- location: city or address.\n");
    text.push_str("- funFact: a short, interesting fact unique to this station. Always include one.\n");
    text.push_str("- historicalContext: brief history.\n");
    text.push_str("- operationalStatus: e.g. \"Operational\" or \"Good Service\".\n");

    text.push_str(
        "- lines: EVERY line, route or service calling here: metro line codes or names (\"U5\", \
         \"Piccadilly Line\"), regional route numbers (\"RB12\"), train operator brands (\"LNER\", \"GWR\").\n",
    );
    text.push_str("  - colorHex: the OFFICIAL brand color in hex. Reference colors:\n");
    for (operator, color) in OPERATOR_COLORS {
        let _ = writeln!(text, "    - {}: {}", operator, color);
    }
    let _ = writeln!(
        text,
        "  - If the color is unknown use {}. NEVER leave colorHex blank.",
        DEFAULT_LINE_COLOR
    );
    let _ = writeln!(
        text,
        "  - textColorHex: readable text color on that background (usually {}).",
        DEFAULT_TEXT_COLOR
    );
    text.push_str("  - providerUrl: the operator's official website.\n");

    let _ = writeln!(
        text,
        "- stepFreeAccess.status: exactly one of {}. stepFreeAccess.details: short explanation.",
        STEP_FREE_PHRASINGS
            .iter()
            .map(|p| format!("\"{}\"", p))
            .collect::<Vec<_>>()
            .join(", ")
    );
    text.push_str("- hasToilets: boolean.\n");
    text.push_str("- buses: a SEPARATE entry for EACH local bus route number.\n");
    text.push_str(
        "- coaches: SPECIFIC coach operators only (e.g. \"National Express\"). If various or unknown, \
         return an EMPTY array []. Never add generic entries such as \"Bus Services\".\n",
    );
    text.push_str(
        "- nextDepartures: time as HH:MM, destination is the final station, status one of \"On time\", \
         \"Delayed\" or \"Scheduled\", operator is the specific operator. If real-time data is \
         unavailable use SCHEDULED times. Return an empty array only if the station is closed or defunct.\n\n",
    );

    text.push_str(
        "FORMAT: STRICT JSON only, no prose. Do not include citation markers such as [1] or [7, 10] \
         anywhere in the text.\n\n",
    );
    text.push_str("JSON Schema:\n");
    text.push_str(RESPONSE_SCHEMA);
    text.push('\n');

    text
}
