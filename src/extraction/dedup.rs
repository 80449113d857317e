// src/extraction/dedup.rs
// Collapses overlapping mentions into a ranked, non-overlapping set.
// Overlap means one candidate's lowercased text is a substring of the
// other's, in either direction.

use log::debug;
use std::cmp::Ordering;

use crate::models::core::{Candidate, RankedCandidateSet};

const CONFIDENCE_EPSILON: f64 = 1e-9;

/// Merge raw candidates into a `RankedCandidateSet`, keeping at most `max`
/// entries. Preference order on overlap: higher confidence, then greater
/// specificity (longer text). When an incoming candidate beats an accepted
/// one, the accepted entry is removed rather than the incoming skipped, so a
/// worse near-duplicate never survives an earlier tie.
pub fn dedupe(mut candidates: Vec<Candidate>, max: usize) -> RankedCandidateSet {
    let input_len = candidates.len();
    // Stable sort keeps insertion order for ties.
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    let mut accepted: Vec<Candidate> = Vec::new();
    'next_candidate: for candidate in candidates {
        let candidate_lower = candidate.text.to_lowercase();
        let mut replaces: Vec<usize> = Vec::new();
        for (idx, kept) in accepted.iter().enumerate() {
            let kept_lower = kept.text.to_lowercase();
            let overlaps = candidate_lower.contains(&kept_lower)
                || kept_lower.contains(&candidate_lower);
            if !overlaps {
                continue;
            }
            if candidate.confidence + CONFIDENCE_EPSILON < kept.confidence {
                continue 'next_candidate;
            }
            let tied = (candidate.confidence - kept.confidence).abs() <= CONFIDENCE_EPSILON;
            if tied && candidate.char_len() <= kept.char_len() {
                continue 'next_candidate;
            }
            // Incoming is strictly better: equal confidence but more
            // specific (sorting guarantees it is never higher-confidence
            // than an already-accepted entry).
            replaces.push(idx);
        }
        for idx in replaces.into_iter().rev() {
            accepted.remove(idx);
        }
        accepted.push(candidate);
    }

    // Replacements can disturb the descending order; restore it before
    // applying the cap so truncation keeps the highest-confidence entries.
    accepted.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
    accepted.truncate(max);

    debug!(
        "Deduplication kept {} of {} candidates (cap {})",
        accepted.len(),
        input_len,
        max
    );
    RankedCandidateSet { entries: accepted }
}
