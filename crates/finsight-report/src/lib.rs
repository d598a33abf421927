//! PDF report assembly
//!
//! Builds analysis reports from market data, rendered charts, and model
//! summaries. The builder chains section methods and writes the finished
//! document to a file or byte buffer.
//!
//! # Example
//!
//! ```rust,ignore
//! use finsight_report::{ReportBuilder, ReportOptions};
//!
//! let options = ReportOptions::new()
//!     .with_title("IBM Analysis")
//!     .with_page_numbers();
//! ReportBuilder::new(options)?
//!     .add_title_page()
//!     .add_daily_range_summary(&summary)
//!     .save("ibm.pdf")?;
//! ```

pub mod builder;
pub mod error;
pub mod options;
pub mod sanitize;

// Re-export main types for convenience
pub use builder::ReportBuilder;
pub use error::{ReportError, Result};
pub use options::{PaperSize, ReportOptions};
pub use sanitize::sanitize_text;
