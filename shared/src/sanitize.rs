//! Citation marker removal for model-produced free text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A bracketed run of digits, commas and whitespace (`[1]`, `[7, 10]`),
/// together with any whitespace directly before it.
static CITATION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\s*)\[[\d,\s]+\]").expect("Invalid citation pattern"));

/// Remove citation markers and trim surrounding whitespace.
///
/// A marker that separated two words (`"Opened [1]in"`) leaves a single
/// space behind; otherwise the marker and the whitespace before it vanish.
/// Removal repeats until no marker is left, so nested input such as
/// `[[1]2]` cannot leave a fresh marker behind. Empty input yields an
/// empty string.
pub fn strip_citations(text: &str) -> String {
    let mut current = text.to_string();
    while CITATION_MARKER.is_match(&current) {
        let haystack = current.as_str();
        current = CITATION_MARKER
            .replace_all(haystack, |caps: &Captures| {
                let end = caps.get(0).map_or(haystack.len(), |m| m.end());
                let joins_word = haystack[end..]
                    .chars()
                    .next()
                    .map_or(false, char::is_alphanumeric);
                if joins_word && !caps[1].is_empty() {
                    " "
                } else {
                    ""
                }
            })
            .into_owned();
    }
    current.trim().to_string()
}

/// [`strip_citations`] over an optional field; absent stays absent.
pub fn strip_opt(text: Option<String>) -> Option<String> {
    text.map(|t| strip_citations(&t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_single_and_grouped_markers() {
        assert_eq!(
            strip_citations("Opened [1] in 1900 [7, 10]."),
            "Opened in 1900."
        );
        assert_eq!(
            strip_citations("It has no street-level entrance that isn't shared. [3]"),
            "It has no street-level entrance that isn't shared."
        );
    }

    #[test]
    fn test_keeps_words_apart() {
        assert_eq!(strip_citations("Opened [1]in 1900"), "Opened in 1900");
        assert_eq!(strip_citations("Opened\t[2, 3]in 1900 [4]."), "Opened in 1900.");
        assert_eq!(strip_citations("Bank [1] [2] station"), "Bank station");
    }

    #[test]
    fn test_empty_and_plain_text() {
        assert_eq!(strip_citations(""), "");
        assert_eq!(strip_citations("   "), "");
        assert_eq!(strip_citations("  Good Service  "), "Good Service");
    }

    #[test]
    fn test_leaves_non_numeric_brackets() {
        assert_eq!(strip_citations("Platform [A] only"), "Platform [A] only");
        assert_eq!(strip_citations("Zone [2a]"), "Zone [2a]");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Opened [1] in 1900 [7, 10].",
            "[[1]2] nested",
            "[1][2][3]",
            "trailing [ 4 ,5 ]   ",
            "no markers here",
            "[]",
            "Opened [1]in 1900",
            "[1 [2]3] joined",
        ];
        for s in samples {
            let once = strip_citations(s);
            assert_eq!(strip_citations(&once), once, "not idempotent for {:?}", s);
        }
        assert_eq!(strip_citations("[[1]2] nested"), "nested");
    }

    #[test]
    fn test_strip_opt() {
        assert_eq!(strip_opt(None), None);
        assert_eq!(strip_opt(Some("Fact. [2]".into())), Some("Fact.".into()));
    }
}
