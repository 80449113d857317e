// src/models/core.rs
// Core data types shared across the extraction and geocoding stages.

use serde::Serialize;
use std::fmt;

/// Minimum candidate length in Unicode scalar values, after normalization.
pub const MIN_CANDIDATE_CHARS: usize = 3;
/// Maximum candidate length in Unicode scalar values, after normalization.
pub const MAX_CANDIDATE_CHARS: usize = 100;

/// Which recognizer class produced a candidate. Diagnostics only; the
/// confidence score, not the kind, drives deduplication and ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognizerKind {
    MarkerPrefixed,
    CityRegion,
    Gazetteer,
    TypedSuffix,
    Preposition,
    StreetAddress,
    SocialTag,
    TitleCaseRun,
}

impl RecognizerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecognizerKind::MarkerPrefixed => "marker_prefixed",
            RecognizerKind::CityRegion => "city_region",
            RecognizerKind::Gazetteer => "gazetteer",
            RecognizerKind::TypedSuffix => "typed_suffix",
            RecognizerKind::Preposition => "preposition",
            RecognizerKind::StreetAddress => "street_address",
            RecognizerKind::SocialTag => "social_tag",
            RecognizerKind::TitleCaseRun => "title_case_run",
        }
    }
}

impl fmt::Display for RecognizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected place-name mention with its normalized text and score.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub text: String,
    pub confidence: f64,
    pub source: RecognizerKind,
}

impl Candidate {
    /// Build a candidate from already-normalized text. Returns `None` when
    /// the text falls outside the [3,100] character window, so out-of-range
    /// candidates are never materialized.
    pub fn new(text: String, confidence: f64, source: RecognizerKind) -> Option<Self> {
        let chars = text.chars().count();
        if !(MIN_CANDIDATE_CHARS..=MAX_CANDIDATE_CHARS).contains(&chars) {
            return None;
        }
        Some(Self {
            text,
            confidence: confidence.clamp(0.0, 1.0),
            source,
        })
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Deduplicated output of one extraction run: confidence-descending, no two
/// entries in a case-insensitive substring relationship, capped at the
/// configured maximum.
#[derive(Debug, Clone, Default)]
pub struct RankedCandidateSet {
    pub(crate) entries: Vec<Candidate>,
}

impl RankedCandidateSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<Candidate> {
        self.entries
    }
}

impl IntoIterator for RankedCandidateSet {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Outcome of resolving one candidate against the geocoding service.
#[derive(Debug, Clone)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub geocoded: bool,
}

impl GeocodeResult {
    pub fn found(latitude: f64, longitude: f64, address: String) -> Self {
        Self {
            latitude,
            longitude,
            address,
            geocoded: true,
        }
    }

    pub fn not_found() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            address: String::new(),
            geocoded: false,
        }
    }
}

/// A candidate joined with a successful geocode; the unit handed back to the
/// API layer and, optionally, persisted by the storage collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub confidence: f64,
    pub source: RecognizerKind,
}

impl ResolvedLocation {
    pub fn new(candidate: Candidate, result: GeocodeResult) -> Self {
        let address = if result.address.is_empty() {
            candidate.text.clone()
        } else {
            result.address
        };
        Self {
            name: candidate.text,
            latitude: result.latitude,
            longitude: result.longitude,
            address,
            confidence: candidate.confidence,
            source: candidate.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_rejects_out_of_range_lengths() {
        assert!(Candidate::new("ab".to_string(), 0.9, RecognizerKind::Gazetteer).is_none());
        assert!(Candidate::new("x".repeat(101), 0.9, RecognizerKind::Gazetteer).is_none());
        assert!(Candidate::new("NYC".to_string(), 0.9, RecognizerKind::Gazetteer).is_some());
        assert!(Candidate::new("x".repeat(100), 0.9, RecognizerKind::Gazetteer).is_some());
    }

    #[test]
    fn candidate_length_counts_chars_not_bytes() {
        // Two CJK chars are six bytes but only two scalar values.
        assert!(Candidate::new("東京".to_string(), 0.9, RecognizerKind::Gazetteer).is_none());
        assert!(Candidate::new("東京タワー".to_string(), 0.9, RecognizerKind::Gazetteer).is_some());
    }

    #[test]
    fn candidate_clamps_confidence() {
        let c = Candidate::new("Central Park".to_string(), 1.4, RecognizerKind::Gazetteer).unwrap();
        assert_eq!(c.confidence, 1.0);
    }

    #[test]
    fn resolved_location_falls_back_to_candidate_text_for_address() {
        let cand = Candidate::new("Eiffel Tower".to_string(), 0.92, RecognizerKind::Gazetteer)
            .unwrap();
        let geo = GeocodeResult::found(48.8584, 2.2945, String::new());
        let loc = ResolvedLocation::new(cand, geo);
        assert_eq!(loc.address, "Eiffel Tower");
    }

    #[test]
    fn recognizer_kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&RecognizerKind::MarkerPrefixed).unwrap();
        assert_eq!(json, "\"marker_prefixed\"");
        assert_eq!(RecognizerKind::MarkerPrefixed.as_str(), "marker_prefixed");
    }
}
