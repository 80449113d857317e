// src/utils/mod.rs
pub mod config;
pub mod env;
