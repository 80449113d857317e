// src/models/stats.rs
// Per-run summary shapes returned to the API layer alongside the result rows.

use serde::Serialize;

use crate::models::core::ResolvedLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    /// Normal completion, including the zero-candidate case.
    Ok,
    /// The upstream collaborator produced no usable text (empty or
    /// whitespace-only input); distinguishable from "no locations found".
    NoReadableInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub status: PipelineStatus,
    /// Candidates surviving deduplication.
    pub total_found: usize,
    /// Candidates that resolved to coordinates.
    pub total_geocoded: usize,
    /// Truncated preview of the input text, for diagnostics.
    pub text_preview: String,
}

/// Facade return value: the resolved rows plus the run summary.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub locations: Vec<ResolvedLocation>,
    pub summary: PipelineSummary,
}

impl PipelineReport {
    pub fn empty(status: PipelineStatus, text_preview: String) -> Self {
        Self {
            locations: Vec::new(),
            summary: PipelineSummary {
                status,
                total_found: 0,
                total_geocoded: 0,
                text_preview,
            },
        }
    }
}
