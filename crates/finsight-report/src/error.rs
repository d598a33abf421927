//! Error types for report assembly

use thiserror::Error;

/// Errors that can occur while building or writing a report
#[derive(Error, Debug)]
pub enum ReportError {
    /// PDF layout or rendering failure (includes font loading and
    /// image decoding)
    #[error("PDF error: {0}")]
    Pdf(#[from] genpdf::error::Error),
}

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;
