// src/models/mod.rs
pub mod core;
pub mod stats;

pub use self::core::{Candidate, GeocodeResult, RankedCandidateSet, RecognizerKind, ResolvedLocation};
pub use self::stats::{PipelineReport, PipelineStatus, PipelineSummary};
