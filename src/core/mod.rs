//! Core functionality modules
//!
//! This module contains the enrichment pipeline organized by stage:
//! - `catalog`: Catalog loading and enriched CSV output
//! - `query`: Provider-specific query building
//! - `services`: External API clients behind the `SearchProvider` trait
//! - `rotation`: API-key rotation on quota exhaustion
//! - `metadata`: Field extraction from the best-matching item
//! - `enrich`: Per-row lookup and the batch driver

pub mod catalog;
pub mod enrich;
pub mod metadata;
pub mod query;
pub mod rotation;
pub mod services;
