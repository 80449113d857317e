// src/extraction/extractor.rs
// Runs every registry rule over the input text and materializes normalized,
// confidence-scored candidates. Pure and synchronous; no I/O.

use log::debug;

use crate::extraction::patterns::registry;
use crate::models::core::{Candidate, RecognizerKind};

/// Rules at or above this confidence skip the stop-word veto; their anchors
/// (explicit markers, the gazetteer) are precise enough that an edge word
/// like "just" is part of the mention, not noise.
const STOP_WORD_EXEMPT_CONFIDENCE: f64 = 0.9;

const CONFIDENCE_BOOST: f64 = 0.1;
const BOOST_CAP: f64 = 0.98;

/// Articles, conjunctions, prepositions, and temporal words that disqualify
/// a candidate when they sit on either edge of the normalized text.
const STOP_WORDS: [&str; 44] = [
    "a", "an", "the", "and", "or", "but", "so", "yet", "nor", "of", "in", "on", "at", "to",
    "for", "with", "from", "by", "this", "that", "these", "those", "just", "very", "really",
    "visited", "visiting", "today", "tomorrow", "yesterday", "tonight", "now", "then", "week",
    "weekend", "morning", "evening", "monday", "tuesday", "wednesday", "thursday", "friday",
    "saturday", "sunday",
];

/// Words that mark a mention as strongly place-like and earn the boost.
const LOCATION_INDICATORS: [&str; 26] = [
    "beach", "park", "hotel", "museum", "bay", "island", "airport", "station", "tower",
    "bridge", "temple", "palace", "square", "garden", "harbor", "harbour", "castle",
    "cathedral", "market", "plaza", "lake", "mountain", "falls", "pier", "valley", "resort",
];

/// Apply the full rule table to `text`. Rules are not mutually exclusive;
/// the same span may surface under several kinds with different confidences,
/// and the deduplicator sorts that out. Output order is unspecified.
pub fn extract(text: &str) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for rule in registry() {
        for raw in rule.matches(text) {
            let raw = if rule.kind == RecognizerKind::SocialTag {
                expand_tag(raw)
            } else {
                raw.to_string()
            };
            let normalized = normalize_text(&raw);
            if normalized.is_empty() {
                continue;
            }
            if rule.base_confidence < STOP_WORD_EXEMPT_CONFIDENCE
                && has_stop_word_edge(&normalized)
            {
                continue;
            }
            let confidence = boosted_confidence(&normalized, rule.base_confidence);
            if let Some(candidate) = Candidate::new(normalized, confidence, rule.kind) {
                candidates.push(candidate);
            }
        }
    }
    debug!(
        "Extraction produced {} raw candidates from {} chars of input",
        candidates.len(),
        text.chars().count()
    );
    candidates
}

/// Collapse whitespace and strip everything outside the allow-list: letters
/// of any script, digits, space, comma, period, hyphen, apostrophe.
/// Idempotent: normalizing already-normalized text is a no-op.
pub fn normalize_text(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| {
            c.is_alphabetic()
                || c.is_numeric()
                || matches!(c, ' ' | ',' | '.' | '-' | '\'' | '’')
        })
        .collect();
    let collapsed = filtered.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| matches!(c, ' ' | ',' | '.' | '-'))
        .to_string()
}

fn has_stop_word_edge(normalized: &str) -> bool {
    let mut words = normalized
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase());
    let first = match words.next() {
        Some(w) => w,
        None => return false,
    };
    let last = words.last().unwrap_or_else(|| first.clone());
    STOP_WORDS.contains(&first.as_str()) || STOP_WORDS.contains(&last.as_str())
}

fn boosted_confidence(normalized: &str, base: f64) -> f64 {
    let lowered = normalized.to_lowercase();
    let has_indicator = lowered
        .split(|c: char| !c.is_alphanumeric())
        .any(|w| LOCATION_INDICATORS.contains(&w));
    if has_indicator {
        (base + CONFIDENCE_BOOST).min(BOOST_CAP)
    } else {
        base
    }
}

/// Hashtag and @-mention tokens pack words together; split camel case and
/// underscores back into spaces so "#CentralPark" normalizes like prose.
fn expand_tag(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    let mut prev_lower = false;
    for c in raw.chars() {
        if c == '_' {
            out.push(' ');
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            out.push(' ');
        }
        prev_lower = c.is_lowercase();
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::core::{MAX_CANDIDATE_CHARS, MIN_CANDIDATE_CHARS};

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "  Central   Park, just\tvisited!  ",
            "📍 Bondi Beach 🏖",
            "Hà Nội -- old quarter",
            "서울 남산타워",
        ];
        for raw in samples {
            let once = normalize_text(raw);
            assert_eq!(normalize_text(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn normalization_strips_disallowed_characters() {
        assert_eq!(
            normalize_text("Central Park, just visited! "),
            "Central Park, just visited"
        );
        assert_eq!(normalize_text("!!!***"), "");
        // Non-Latin scripts and allowed punctuation survive.
        assert_eq!(normalize_text("  東京タワー!!"), "東京タワー");
        assert_eq!(normalize_text("O'Connell Street"), "O'Connell Street");
    }

    #[test]
    fn emitted_candidates_respect_length_invariant() {
        let text = "📍 Central Park, just visited! #NYC near Piazza San Marco, \
                    at 221 Baker Street, Portland, Oregon #CentralPark 東京";
        for candidate in extract(text) {
            let len = candidate.char_len();
            assert!(
                (MIN_CANDIDATE_CHARS..=MAX_CANDIDATE_CHARS).contains(&len),
                "candidate {:?} has out-of-range length {len}",
                candidate.text
            );
        }
    }

    #[test]
    fn marker_and_gazetteer_both_fire_on_pin_caption() {
        let candidates = extract("📍 Central Park, just visited! #NYC");
        let marker = candidates
            .iter()
            .find(|c| c.source == RecognizerKind::MarkerPrefixed)
            .expect("marker-prefixed candidate");
        assert_eq!(marker.text, "Central Park, just visited");
        // "park" indicator boost: 0.95 + 0.1 capped at 0.98.
        assert!((marker.confidence - 0.98).abs() < 1e-9);

        let gazetteer: Vec<&Candidate> = candidates
            .iter()
            .filter(|c| c.source == RecognizerKind::Gazetteer)
            .collect();
        assert!(gazetteer.iter().any(|c| c.text == "Central Park"));
        assert!(gazetteer.iter().any(|c| c.text == "NYC"));
    }

    #[test]
    fn stop_word_veto_applies_below_the_exemption_cutoff() {
        // "Just Visited" is a Title-Case run, but both edges are stop words.
        let candidates = extract("Just Visited Yesterday");
        assert!(candidates
            .iter()
            .all(|c| c.source != RecognizerKind::TitleCaseRun));

        // The marker rule (0.95) is exempt even with a stop-word edge.
        let candidates = extract("Location: The Gritti Palace");
        assert!(candidates
            .iter()
            .any(|c| c.source == RecognizerKind::MarkerPrefixed
                && c.text == "The Gritti Palace"));
    }

    #[test]
    fn indicator_boost_is_capped() {
        let candidates = extract("Location: Santa Monica Beach");
        let marker = candidates
            .iter()
            .find(|c| c.source == RecognizerKind::MarkerPrefixed)
            .unwrap();
        assert!((marker.confidence - 0.98).abs() < 1e-9);

        // No indicator word: base confidence unchanged.
        let candidates = extract("Location: Reykjavik");
        let marker = candidates
            .iter()
            .find(|c| c.source == RecognizerKind::MarkerPrefixed)
            .unwrap();
        assert!((marker.confidence - 0.95).abs() < 1e-9);
    }

    #[test]
    fn hashtags_expand_camel_case_and_underscores() {
        assert_eq!(expand_tag("CentralPark"), "Central Park");
        assert_eq!(expand_tag("bondi_beach"), "bondi beach");
        assert_eq!(expand_tag("NYC"), "NYC");

        let candidates = extract("great day #CentralPark");
        assert!(candidates
            .iter()
            .any(|c| c.source == RecognizerKind::SocialTag && c.text == "Central Park"));
    }

    #[test]
    fn non_latin_mentions_are_not_dropped() {
        let candidates = extract("📍 서울 남산타워");
        assert!(candidates
            .iter()
            .any(|c| c.source == RecognizerKind::MarkerPrefixed && c.text == "서울 남산타워"));

        let candidates = extract("Address: Hà Nội");
        assert!(candidates.iter().any(|c| c.text == "Hà Nội"));
    }

    #[test]
    fn empty_and_noise_inputs_yield_nothing() {
        assert!(extract("").is_empty());
        assert!(extract("!!! ??? ***").is_empty());
        assert!(extract("just some lowercase words").is_empty());
    }
}
