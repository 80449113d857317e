// src/utils/config.rs
// Pipeline tuning knobs, loadable from environment variables.

use log::debug;
use std::env;
use std::time::Duration;

const DEFAULT_MAX_CANDIDATES: usize = 15;
const DEFAULT_GEOCODE_WORKERS: usize = 3;
// The public geocoding service allows roughly one request per second;
// staggering dispatches slightly above that keeps us under the limit.
const DEFAULT_STAGGER_MS: u64 = 1_100;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RETRY_BACKOFF_MS: u64 = 1_000;
const DEFAULT_MAX_ATTEMPTS: u32 = 2;
const DEFAULT_HARD_TIMEOUT_SECS: u64 = 15;
const DEFAULT_GEOCODER_BASE_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Cap on the deduplicated candidate set.
    pub max_candidates: usize,
    /// Concurrent geocoding workers.
    pub geocode_workers: usize,
    /// Per-candidate dispatch stagger; candidate i waits i * stagger.
    pub stagger: Duration,
    /// Per-attempt HTTP timeout inside the geocoding client.
    pub request_timeout: Duration,
    /// Fixed wait between geocoding retry attempts.
    pub retry_backoff: Duration,
    /// Total geocoding attempts per candidate (first try included).
    pub max_attempts: u32,
    /// Orchestrator-level bound on one candidate's whole geocode call.
    pub hard_timeout: Duration,
    pub geocoder_base_url: String,
    /// Sent as the User-Agent header; the geocoding service requires callers
    /// to identify themselves.
    pub user_agent: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
            geocode_workers: DEFAULT_GEOCODE_WORKERS,
            stagger: Duration::from_millis(DEFAULT_STAGGER_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            hard_timeout: Duration::from_secs(DEFAULT_HARD_TIMEOUT_SECS),
            geocoder_base_url: DEFAULT_GEOCODER_BASE_URL.to_string(),
            user_agent: concat!("location_pipeline/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create configuration from environment variables, falling back to the
    /// defaults above for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let config = Self {
            max_candidates: env_usize("MAX_CANDIDATES", defaults.max_candidates),
            geocode_workers: env_usize("GEOCODE_WORKERS", defaults.geocode_workers).max(1),
            stagger: Duration::from_millis(env_u64("GEOCODE_STAGGER_MS", DEFAULT_STAGGER_MS)),
            request_timeout: Duration::from_secs(env_u64(
                "GEOCODE_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            retry_backoff: Duration::from_millis(env_u64(
                "GEOCODE_RETRY_BACKOFF_MS",
                DEFAULT_RETRY_BACKOFF_MS,
            )),
            max_attempts: env_u64("GEOCODE_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS as u64).max(1)
                as u32,
            hard_timeout: Duration::from_secs(env_u64(
                "GEOCODE_HARD_TIMEOUT_SECS",
                DEFAULT_HARD_TIMEOUT_SECS,
            )),
            geocoder_base_url: env::var("GEOCODER_BASE_URL")
                .unwrap_or_else(|_| defaults.geocoder_base_url.clone()),
            user_agent: env::var("GEOCODER_USER_AGENT")
                .unwrap_or_else(|_| defaults.user_agent.clone()),
        };
        debug!(
            "Pipeline config: max_candidates={}, workers={}, stagger={:?}, base_url={}",
            config.max_candidates, config.geocode_workers, config.stagger, config.geocoder_base_url
        );
        config
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}
