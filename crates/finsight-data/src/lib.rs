//! Market data clients and time-series utilities
//!
//! This crate fetches financial market data from two upstream providers and
//! derives summary views from it. It includes:
//!
//! - Alpha Vantage client (market status, daily/intraday prices, balance
//!   sheets, cash flow, earnings, news sentiment)
//! - Financial Datasets client (statements, company facts, prices, insider
//!   trades, institutional ownership, news, financial metrics)
//! - Date-range and last-N-days filtering over daily/intraday series
//! - Range and intraday summary statistics ([`DailyRangeSummary`],
//!   [`IntradaySummary`])
//!
//! # Example
//!
//! ```rust,ignore
//! use finsight_data::{AlphaVantageClient, OutputSize, series};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AlphaVantageClient::from_env()?;
//!     let daily = client.daily("AAPL", OutputSize::Compact).await?;
//!
//!     let recent = series::filter_daily_last_n_days(&daily.series, 30);
//!     let summary = series::daily_range_summary("AAPL", &recent)?;
//!     println!("{} changed {:.2}%", summary.symbol, summary.price_change_pct);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod series;
pub mod types;

// Re-export main types for convenience
pub use api::{
    AlphaVantageClient, AlphaVantageConfig, FinancialDatasetsClient, FinancialDatasetsConfig,
    Interval, NewsSentimentOptions, OutputSize, Period, PriceInterval,
};
pub use error::{DataError, Result};
pub use series::{DailyRangeSummary, IntradaySummary};
pub use types::{Bar, TimeSeriesDailyResponse, TimeSeriesIntradayResponse};
