// src/geocoding/client.rs
// Single-candidate lookups against the external place-search service, with
// a bounded retry on transport failures. The transport itself sits behind
// `PlaceLookup` so the retry policy and response handling stay testable
// without network access.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::models::core::GeocodeResult;
use crate::utils::config::PipelineConfig;

/// One row of the service's JSON response. All fields arrive as strings and
/// any of them may be missing; parsing is defensive and a malformed row
/// degrades to "no match" rather than an error.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceRecord {
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Transport seam for the place-search service.
///
/// `Ok(vec![])` means the service answered and found nothing; that is a
/// final result, never retried. `Err(_)` is a transport-level failure
/// (timeout, connection error, non-2xx, malformed body) and is retryable.
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<PlaceRecord>>;
}

/// reqwest-backed lookup against a Nominatim-style endpoint.
pub struct NominatimLookup {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimLookup {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        // The User-Agent header identifies the caller; the public service
        // rejects anonymous clients.
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build geocoding HTTP client")?;
        Ok(Self {
            http,
            base_url: config.geocoder_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PlaceLookup for NominatimLookup {
    async fn search(&self, query: &str) -> Result<Vec<PlaceRecord>> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", "1"),
                ("addressdetails", "1"),
            ])
            .send()
            .await
            .context("Geocoding request failed to send")?
            .error_for_status()
            .context("Geocoding service returned an error status")?;
        let records: Vec<PlaceRecord> = response
            .json()
            .await
            .context("Geocoding response was not a JSON array of places")?;
        Ok(records)
    }
}

/// Retry policy over a `PlaceLookup`. Never surfaces an error to callers;
/// every failure mode collapses to `geocoded = false`.
pub struct GeocodingClient {
    lookup: Arc<dyn PlaceLookup>,
    max_attempts: u32,
    retry_backoff: Duration,
}

impl GeocodingClient {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        Ok(Self::with_lookup(
            Arc::new(NominatimLookup::new(config)?),
            config,
        ))
    }

    /// Build against an alternate transport (tests, or a different
    /// place-search provider).
    pub fn with_lookup(lookup: Arc<dyn PlaceLookup>, config: &PipelineConfig) -> Self {
        Self {
            lookup,
            max_attempts: config.max_attempts.max(1),
            retry_backoff: config.retry_backoff,
        }
    }

    /// Resolve one place name. Transport failures are retried up to the
    /// attempt budget with a fixed backoff; an empty result set is final.
    /// Throttling responses count as transport failures under the same
    /// budget.
    pub async fn geocode(&self, name: &str) -> GeocodeResult {
        for attempt in 1..=self.max_attempts {
            match self.lookup.search(name).await {
                Ok(records) => return Self::first_match(name, records),
                Err(err) => {
                    warn!(
                        "Geocoding attempt {}/{} failed for '{}': {:#}",
                        attempt, self.max_attempts, name, err
                    );
                    if attempt < self.max_attempts {
                        sleep(self.retry_backoff).await;
                    }
                }
            }
        }
        GeocodeResult::not_found()
    }

    fn first_match(name: &str, records: Vec<PlaceRecord>) -> GeocodeResult {
        let record = match records.into_iter().next() {
            Some(record) => record,
            None => {
                debug!("No geocoding match for '{}'", name);
                return GeocodeResult::not_found();
            }
        };
        let latitude = record.lat.as_deref().and_then(|v| v.parse::<f64>().ok());
        let longitude = record.lon.as_deref().and_then(|v| v.parse::<f64>().ok());
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => {
                let address = record
                    .display_name
                    .unwrap_or_else(|| name.to_string());
                GeocodeResult::found(latitude, longitude, address)
            }
            _ => {
                warn!(
                    "Geocoding match for '{}' had missing or unparsable coordinates",
                    name
                );
                GeocodeResult::not_found()
            }
        }
    }
}
