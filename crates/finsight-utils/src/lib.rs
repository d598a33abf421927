//! Shared utilities for finsight
//!
//! This crate provides common functionality used across the finsight
//! workspace: logging setup and the dollar-amount abbreviations used by both
//! prompt formatting and PDF rendering.

pub mod format;
pub mod logging;

pub use format::{format_usd, format_volume, truncate};
pub use logging::init_tracing;
