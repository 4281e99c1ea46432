//! End-to-end lookups against a scripted backend.
//!
//! Each test drives the public service API with a canned reply and checks
//! what a caller would see.

use async_trait::async_trait;
use chrono::NaiveTime;
use shared::backend::{Candidate, Content, Part};
use shared::grounding::{GroundingChunk, MapsChunk, WebChunk};
use shared::{
    extract_sources, GenerativeBackend, GroundingMetadata, PromptPayload, RawBackendReply,
    Resolution, Result, StationFactService, StationLookup, StationQuery,
};

/// Backend that always returns the same reply.
struct CannedBackend {
    text: String,
    metadata: Option<GroundingMetadata>,
}

impl CannedBackend {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            metadata: None,
        }
    }
}

#[async_trait]
impl GenerativeBackend for CannedBackend {
    async fn generate(&self, _payload: &PromptPayload) -> Result<RawBackendReply> {
        Ok(RawBackendReply {
            candidates: vec![Candidate {
                content: Some(Content {
                    parts: vec![Part {
                        text: Some(self.text.clone()),
                    }],
                }),
                grounding_metadata: self.metadata.clone(),
            }],
        })
    }
}

fn evening() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 45, 0).unwrap()
}

// =============================================================================
// Resolved and ambiguous replies
// =============================================================================

#[tokio::test]
async fn test_bank_fun_fact_is_cleaned() {
    let service = StationFactService::new(CannedBackend::new(
        r#"{
            "isAmbiguous": false,
            "candidates": [],
            "data": {
                "officialName": "Bank",
                "funFact": "It has no street-level entrance that isn't shared. [3]"
            }
        }"#,
    ));

    let fact = service
        .get_station_fact_at(&StationQuery::new("Bank", None), evening())
        .await
        .unwrap();

    let schema = fact.structured_data.unwrap();
    assert!(!schema.is_ambiguous);
    let data = schema.data.unwrap();
    assert_eq!(data.official_name.as_deref(), Some("Bank"));
    assert_eq!(
        data.fun_fact.as_deref(),
        Some("It has no street-level entrance that isn't shared.")
    );
}

#[tokio::test]
async fn test_ambiguous_without_candidates_is_unresolved() {
    let service = StationFactService::new(CannedBackend::new(
        r#"{"isAmbiguous": true, "candidates": []}"#,
    ));

    let fact = service
        .get_station_fact_at(&StationQuery::new("Cyprus", None), evening())
        .await
        .unwrap();

    assert!(fact.structured_data.is_some());
    assert_eq!(StationLookup::from(fact).resolution, Resolution::Unresolved);
}

#[tokio::test]
async fn test_real_ambiguity_lists_candidates() {
    let service = StationFactService::new(CannedBackend::new(
        "```json\n{\"isAmbiguous\": true, \"candidates\": [\"Jordan (Bristol)\", \"Jordanhill (Glasgow)\"]}\n```",
    ));

    let fact = service
        .get_station_fact_at(&StationQuery::new("Jordan", None), evening())
        .await
        .unwrap();

    match StationLookup::from(fact).resolution {
        Resolution::Ambiguous { candidates } => {
            assert_eq!(candidates, vec!["Jordan (Bristol)", "Jordanhill (Glasgow)"]);
        }
        other => panic!("expected ambiguous, got {:?}", other),
    }
}

// =============================================================================
// Degraded replies
// =============================================================================

#[tokio::test]
async fn test_not_json_resolves_with_raw_text() {
    let service = StationFactService::new(CannedBackend::new("not json at all"));

    let fact = service
        .get_station_fact_at(&StationQuery::new("Bank", None), evening())
        .await
        .unwrap();

    assert!(fact.structured_data.is_none());
    assert_eq!(fact.raw_text, "not json at all");
}

#[tokio::test]
async fn test_wrong_typed_fields_are_tolerated() {
    let service = StationFactService::new(CannedBackend::new(
        r#"{
            "isAmbiguous": "false",
            "data": {
                "officialName": "Birmingham New Street",
                "hasToilets": "yes",
                "lines": [{"name": "Avanti West Coast", "colorHex": ""}, 42],
                "coaches": null,
                "stepFreeAccess": "unknown"
            }
        }"#,
    ));

    let fact = service
        .get_station_fact_at(&StationQuery::new("New Street", None), evening())
        .await
        .unwrap();

    let data = fact.structured_data.unwrap().data.unwrap();
    assert_eq!(data.has_toilets, Some(true));
    assert_eq!(data.lines.len(), 1);
    assert_eq!(data.lines[0].color_hex, "#0f172a");
    assert!(data.coaches.is_empty());
    assert!(data.step_free_access.is_none());
}

// =============================================================================
// Grounding
// =============================================================================

fn web(n: u32) -> GroundingChunk {
    GroundingChunk {
        web: Some(WebChunk {
            uri: Some(format!("https://example.com/{}", n)),
            title: Some(format!("Page {}", n)),
        }),
        maps: None,
    }
}

fn maps(n: u32) -> GroundingChunk {
    GroundingChunk {
        web: None,
        maps: Some(MapsChunk {
            uri: Some(format!("https://maps.example.com/{}", n)),
            title: Some(format!("Place {}", n)),
            place_answer_sources: None,
        }),
    }
}

#[tokio::test]
async fn test_grounding_survives_parse_failure_and_is_capped() {
    let mut backend = CannedBackend::new("<<garbled>>");
    backend.metadata = Some(GroundingMetadata {
        grounding_chunks: vec![web(1), web(2), maps(1), web(3), maps(2), web(4), web(5)],
        ..Default::default()
    });
    let service = StationFactService::new(backend);

    let fact = service
        .get_station_fact_at(&StationQuery::new("Waterloo", None), evening())
        .await
        .unwrap();
    assert!(fact.structured_data.is_none());

    let sources = extract_sources(fact.grounding_metadata.as_ref().unwrap());
    assert_eq!(
        sources.map_source.unwrap().uri,
        "https://maps.example.com/1"
    );
    let titles: Vec<_> = sources.web_sources.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Page 1", "Page 2", "Page 3"]);
}
