// src/geocoding/orchestrator.rs
// Fans geocoding calls out over a bounded worker pool while keeping the
// aggregate outbound rate at roughly one request per second. Candidate i
// delays its own dispatch by i * stagger, and a semaphore caps how many
// lookups are in flight at once.

use futures::future::join_all;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::{sleep, timeout};

use crate::geocoding::client::GeocodingClient;
use crate::models::core::{RankedCandidateSet, ResolvedLocation};
use crate::utils::config::PipelineConfig;

/// Resolve every candidate in the set, returning only those that geocoded
/// successfully. One candidate failing or timing out never aborts or delays
/// collection of its siblings. Output order is unspecified.
pub async fn resolve(
    set: RankedCandidateSet,
    client: Arc<GeocodingClient>,
    config: &PipelineConfig,
) -> Vec<ResolvedLocation> {
    let total = set.len();
    if total == 0 {
        return Vec::new();
    }

    let semaphore = Arc::new(Semaphore::new(config.geocode_workers));
    let mut handles = Vec::with_capacity(total);
    for (index, candidate) in set.into_iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let client = Arc::clone(&client);
        let stagger_delay = config.stagger * index as u32;
        let hard_timeout = config.hard_timeout;
        handles.push(tokio::spawn(async move {
            sleep(stagger_delay).await;
            // Acquire fails only when the semaphore is closed, which we
            // never do; treat it as a dropped candidate.
            let _permit = semaphore.acquire_owned().await.ok()?;
            match timeout(hard_timeout, client.geocode(&candidate.text)).await {
                Ok(result) if result.geocoded => Some(ResolvedLocation::new(candidate, result)),
                Ok(_) => {
                    debug!("Dropping unresolvable candidate '{}'", candidate.text);
                    None
                }
                Err(_) => {
                    warn!(
                        "Geocoding '{}' exceeded the {:?} hard timeout, abandoning it",
                        candidate.text, hard_timeout
                    );
                    None
                }
            }
        }));
    }

    let mut resolved = Vec::with_capacity(total);
    for outcome in join_all(handles).await {
        match outcome {
            Ok(Some(location)) => resolved.push(location),
            Ok(None) => {}
            Err(err) => warn!("Geocoding worker failed to complete: {}", err),
        }
    }
    info!("🌐 Geocoded {}/{} candidates", resolved.len(), total);
    resolved
}
