// src/pipeline.rs
// Facade tying the stages together: extract -> dedupe -> resolve. This is
// the only entry point the API layer calls; it owns the lifecycle of every
// candidate and result for one invocation.

use anyhow::Result;
use log::{debug, info};
use std::cmp::Ordering;
use std::sync::Arc;
use uuid::Uuid;

use crate::extraction::{dedupe, extract};
use crate::geocoding::client::{GeocodingClient, PlaceLookup};
use crate::geocoding::orchestrator;
use crate::models::stats::{PipelineReport, PipelineStatus, PipelineSummary};
use crate::utils::config::PipelineConfig;

const PREVIEW_CHARS: usize = 120;

pub struct LocationPipeline {
    config: PipelineConfig,
    client: Arc<GeocodingClient>,
}

impl LocationPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let client = Arc::new(GeocodingClient::new(&config)?);
        Ok(Self { config, client })
    }

    /// Build against an alternate place-lookup transport.
    pub fn with_lookup(config: PipelineConfig, lookup: Arc<dyn PlaceLookup>) -> Self {
        let client = Arc::new(GeocodingClient::with_lookup(lookup, &config));
        Self { config, client }
    }

    /// Run the full pipeline over one text blob. "No locations found" is a
    /// success with zero rows; only empty or whitespace-only input gets the
    /// distinguishable `NoReadableInput` status, and in that case the
    /// geocoding service is never contacted.
    pub async fn run(&self, text: &str) -> PipelineReport {
        let run_id = Uuid::new_v4();
        if text.trim().is_empty() {
            info!("[{}] No readable input text, skipping extraction", run_id);
            return PipelineReport::empty(PipelineStatus::NoReadableInput, preview(text));
        }

        let raw_candidates = extract(text);
        let ranked = dedupe(raw_candidates, self.config.max_candidates);
        let total_found = ranked.len();
        debug!("[{}] {} candidates after deduplication", run_id, total_found);

        if ranked.is_empty() {
            info!("[{}] No place-name candidates found", run_id);
            return PipelineReport::empty(PipelineStatus::Ok, preview(text));
        }

        let mut locations =
            orchestrator::resolve(ranked, Arc::clone(&self.client), &self.config).await;
        // The orchestrator promises no ordering; rank the rows for callers.
        locations.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });

        info!(
            "[{}] Pipeline complete: {} candidates found, {} geocoded",
            run_id,
            total_found,
            locations.len()
        );
        PipelineReport {
            summary: PipelineSummary {
                status: PipelineStatus::Ok,
                total_found,
                total_geocoded: locations.len(),
                text_preview: preview(text),
            },
            locations,
        }
    }
}

/// Char-boundary-safe truncated view of the input for diagnostics.
fn preview(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= PREVIEW_CHARS {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(PREVIEW_CHARS).collect();
    out.push('…');
    out
}
