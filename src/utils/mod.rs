//! Utility modules for common functionality
//!
//! - `logging`: Logging configuration and setup
//! - `progress`: Progress bar utilities for consistent console feedback

pub mod logging;
pub mod progress;
