// src/lib.rs
//! Place-name extraction and geocoding pipeline.
//!
//! Takes a raw text blob (OCR output or a pasted caption), finds place-name
//! candidates with a ranked table of pattern recognizers, deduplicates
//! overlapping mentions by confidence, and resolves the survivors to
//! coordinates through a rate-limited geocoding client.

pub mod extraction;
pub mod geocoding;
pub mod models;
pub mod pipeline;
pub mod utils;

pub use extraction::{dedupe, extract};
pub use models::core::{
    Candidate, GeocodeResult, RankedCandidateSet, RecognizerKind, ResolvedLocation,
};
pub use models::stats::{PipelineReport, PipelineStatus, PipelineSummary};
pub use pipeline::LocationPipeline;
pub use utils::config::PipelineConfig;
