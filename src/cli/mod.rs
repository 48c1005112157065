//! Command Line Interface module
//!
//! - `operations`: Enrichment runs (spotify, youtube)
//! - `management`: Configuration inspection and setup

pub mod operations;
pub mod management;

pub use operations::*;
pub use management::*;
