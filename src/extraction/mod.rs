// src/extraction/mod.rs
pub mod dedup;
pub mod extractor;
pub mod patterns;

pub use dedup::dedupe;
pub use extractor::extract;
pub use patterns::{registry, PatternRule};
