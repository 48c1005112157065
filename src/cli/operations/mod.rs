//! Enrichment runs, one subcommand per provider.

pub mod enrich;

pub use enrich::*;
