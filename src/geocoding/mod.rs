// src/geocoding/mod.rs
pub mod client;
pub mod orchestrator;

pub use client::{GeocodingClient, NominatimLookup, PlaceLookup, PlaceRecord};
pub use orchestrator::resolve;
