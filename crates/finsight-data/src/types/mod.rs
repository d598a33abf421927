//! Typed views of upstream JSON responses
//!
//! Field names mirror the provider payloads; price fields stay as the
//! decimal-bearing strings delivered upstream and are parsed on access.

pub mod fundamentals;
pub mod market;
pub mod news;
pub mod timeseries;

pub use fundamentals::{
    AnnualEarning, BalanceSheetReport, BalanceSheetResponse, CashFlowReport, CashFlowResponse,
    EarningsResponse, QuarterlyEarning,
};
pub use market::{Market, MarketStatusResponse};
pub use news::{NewsFeedItem, NewsSentimentResponse, TickerSentiment, Topic};
pub use timeseries::{
    Bar, IntradayMetaData, TimeSeriesDailyResponse, TimeSeriesIntradayResponse, TimeSeriesMetaData,
};
