//! Interpreting the ambiguity flag, candidate list and station record.

use serde::Serialize;
use tracing::warn;

use crate::models::{StationData, StationResponseSchema};

/// What a caller should show for a parsed response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Resolution {
    /// Several stations match; ask the user to pick one
    Ambiguous { candidates: Vec<String> },
    /// A single station was identified
    Resolved { data: Box<StationData> },
    /// Nothing usable came back
    Unresolved,
}

/// Classify a normalized response.
///
/// An ambiguous flag with at least one non-blank candidate wins. Otherwise
/// a present `data` record resolves, whatever the flag says. Anything else,
/// including a flagged response without candidates, is unresolved.
pub fn resolve(schema: StationResponseSchema) -> Resolution {
    let candidates: Vec<String> = schema
        .candidates
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    if schema.is_ambiguous && !candidates.is_empty() {
        return Resolution::Ambiguous { candidates };
    }

    if let Some(data) = schema.data {
        if schema.is_ambiguous {
            warn!("Response flagged ambiguous without candidates but carries data; resolving");
        }
        return Resolution::Resolved {
            data: Box::new(data),
        };
    }

    if schema.is_ambiguous {
        warn!("Response flagged ambiguous with no candidates and no data");
    }
    Resolution::Unresolved
}

/// Classify an optional response; a failed parse is unresolved.
pub fn resolve_opt(schema: Option<StationResponseSchema>) -> Resolution {
    schema.map(resolve).unwrap_or(Resolution::Unresolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(name: &str) -> StationData {
        StationData {
            official_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn schema(flag: bool, candidates: &[&str], data: Option<StationData>) -> StationResponseSchema {
        StationResponseSchema {
            is_ambiguous: flag,
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
            data,
        }
    }

    #[test]
    fn test_every_combination_classifies() {
        let names = ["Bank (London)", "Bank (Leeds)"];

        let cases = [
            (true, &names[..], true, "ambiguous"),
            (true, &names[..], false, "ambiguous"),
            (true, &[][..], true, "resolved"),
            (true, &[][..], false, "unresolved"),
            (false, &names[..], true, "resolved"),
            (false, &names[..], false, "unresolved"),
            (false, &[][..], true, "resolved"),
            (false, &[][..], false, "unresolved"),
        ];

        for (flag, candidates, has_data, expected) in cases {
            let data = has_data.then(|| station("Bank"));
            let kind = match resolve(schema(flag, candidates, data)) {
                Resolution::Ambiguous { .. } => "ambiguous",
                Resolution::Resolved { .. } => "resolved",
                Resolution::Unresolved => "unresolved",
            };
            assert_eq!(
                kind, expected,
                "flag={} candidates={} data={}",
                flag,
                candidates.len(),
                has_data
            );
        }
    }

    #[test]
    fn test_candidates_keep_order() {
        let resolution = resolve(schema(true, &["Cyprus (DLR)", " ", "Cyprus (Cardiff)"], None));
        assert_eq!(
            resolution,
            Resolution::Ambiguous {
                candidates: vec!["Cyprus (DLR)".to_string(), "Cyprus (Cardiff)".to_string()]
            }
        );
    }

    #[test]
    fn test_blank_candidates_do_not_count() {
        assert_eq!(resolve(schema(true, &["", "  "], None)), Resolution::Unresolved);
    }

    #[test]
    fn test_failed_parse_is_unresolved() {
        assert_eq!(resolve_opt(None), Resolution::Unresolved);
        assert!(matches!(
            resolve_opt(Some(schema(false, &[], Some(station("Bank"))))),
            Resolution::Resolved { .. }
        ));
    }

    #[test]
    fn test_serialized_tag() {
        let value = serde_json::to_value(Resolution::Ambiguous {
            candidates: vec!["A".into()],
        })
        .unwrap();
        assert_eq!(value["kind"], "ambiguous");
        assert_eq!(value["candidates"][0], "A");

        let value = serde_json::to_value(Resolution::Unresolved).unwrap();
        assert_eq!(value["kind"], "unresolved");
    }
}
