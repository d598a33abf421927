//! PNG chart rendering for market data
//!
//! Turns time-series and fundamentals data from `finsight-data` into PNG
//! byte buffers: price lines, candlesticks, earnings and revenue bars, cash
//! flow trends, and multi-symbol comparisons. Every function fails with
//! [`ChartError::NoData`] on empty input rather than emitting a blank image.
//!
//! # Example
//!
//! ```rust,ignore
//! use finsight_chart::{ChartOptions, daily_price_chart};
//!
//! let options = ChartOptions::new().with_size(800, 400).with_volume(false);
//! let png = daily_price_chart(&daily, &options)?;
//! std::fs::write("ibm.png", png)?;
//! ```

pub mod error;
pub mod options;
pub mod render;

// Re-export main types for convenience
pub use error::{ChartError, Result};
pub use options::ChartOptions;
pub use render::{
    candlestick_chart, cash_flow_chart, comparison_chart, daily_price_chart, earnings_chart,
    intraday_chart, price_history_chart, revenue_chart,
};
