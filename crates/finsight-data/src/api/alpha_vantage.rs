//! Alpha Vantage API client
//!
//! All endpoints are GET requests against a single query URL with a
//! `function` parameter. Alpha Vantage reports errors and rate-limit notices
//! inside 200-status bodies, so every response is screened for the embedded
//! `"Error Message"` / `"Note"` / `"Information"` fields before decoding.

use crate::error::{DataError, Result};
use crate::types::{
    BalanceSheetResponse, CashFlowResponse, EarningsResponse, MarketStatusResponse,
    NewsSentimentResponse, TimeSeriesDailyResponse, TimeSeriesIntradayResponse,
};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const PROVIDER: &str = "Alpha Vantage";

/// Configuration for the Alpha Vantage client
#[derive(Debug, Clone)]
pub struct AlphaVantageConfig {
    /// API key sent as the `apikey` query parameter
    pub api_key: String,

    /// Base URL for the query endpoint (default: "https://www.alphavantage.co/query")
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl AlphaVantageConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from the `ALPHA_VANTAGE_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ALPHA_VANTAGE_API_KEY").map_err(|_| {
            DataError::Config("ALPHA_VANTAGE_API_KEY environment variable not set".to_string())
        })?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (useful for tests and proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Output size option for time series endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSize {
    /// Latest 100 data points
    Compact,
    /// Full-length history
    Full,
}

impl OutputSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Full => "full",
        }
    }
}

/// Intraday interval granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Min1,
    Min5,
    Min15,
    Min30,
    Min60,
}

impl Interval {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Min1 => "1min",
            Self::Min5 => "5min",
            Self::Min15 => "15min",
            Self::Min30 => "30min",
            Self::Min60 => "60min",
        }
    }
}

/// Options for the news sentiment endpoint
///
/// Every field is optional; unset fields are omitted from the query.
#[derive(Debug, Clone, Default)]
pub struct NewsSentimentOptions {
    /// Comma-separated ticker symbols
    pub tickers: Option<String>,
    /// Comma-separated topics
    pub topics: Option<String>,
    /// Earliest publication time, `YYYYMMDDTHHMM`
    pub time_from: Option<String>,
    /// Latest publication time, `YYYYMMDDTHHMM`
    pub time_to: Option<String>,
    /// Sort order: LATEST, EARLIEST, or RELEVANCE
    pub sort: Option<String>,
    /// Maximum number of results (provider cap: 1000)
    pub limit: Option<u32>,
}

impl NewsSentimentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tickers(mut self, tickers: impl Into<String>) -> Self {
        self.tickers = Some(tickers.into());
        self
    }

    pub fn with_topics(mut self, topics: impl Into<String>) -> Self {
        self.topics = Some(topics.into());
        self
    }

    pub fn with_time_from(mut self, time_from: impl Into<String>) -> Self {
        self.time_from = Some(time_from.into());
        self
    }

    pub fn with_time_to(mut self, time_to: impl Into<String>) -> Self {
        self.time_to = Some(time_to.into());
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Alpha Vantage API client
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    config: AlphaVantageConfig,
}

impl AlphaVantageClient {
    /// Create a new client with custom configuration
    pub fn with_config(config: AlphaVantageConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Create a new client with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(AlphaVantageConfig::new(api_key))
    }

    /// Create a client from the `ALPHA_VANTAGE_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        Self::with_config(AlphaVantageConfig::from_env()?)
    }

    /// Get the current configuration
    pub fn config(&self) -> &AlphaVantageConfig {
        &self.config
    }

    /// Issue a query and return the screened JSON body
    async fn query(&self, params: &[(&str, &str)]) -> Result<Value> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(params)
            .query(&[("apikey", self.config.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DataError::Status {
                provider: PROVIDER,
                status: response.status().as_u16(),
            });
        }

        let body: Value = response.json().await?;
        check_api_error(&body)?;
        Ok(body)
    }

    /// Get current market status for major trading venues
    #[instrument(skip(self))]
    pub async fn market_status(&self) -> Result<MarketStatusResponse> {
        let body = self.query(&[("function", "MARKET_STATUS")]).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Get daily OHLCV data for a symbol
    #[instrument(skip(self))]
    pub async fn daily(
        &self,
        symbol: &str,
        output_size: OutputSize,
    ) -> Result<TimeSeriesDailyResponse> {
        let body = self
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("outputsize", output_size.as_str()),
            ])
            .await?;

        let result: TimeSeriesDailyResponse = serde_json::from_value(body)?;
        debug!(days = result.series.len(), "fetched daily series");
        Ok(result)
    }

    /// Get intraday OHLCV data for a symbol at the given interval
    #[instrument(skip(self))]
    pub async fn intraday(
        &self,
        symbol: &str,
        interval: Interval,
        output_size: OutputSize,
    ) -> Result<TimeSeriesIntradayResponse> {
        let body = self
            .query(&[
                ("function", "TIME_SERIES_INTRADAY"),
                ("symbol", symbol),
                ("interval", interval.as_str()),
                ("outputsize", output_size.as_str()),
            ])
            .await?;

        let result = parse_intraday_body(&body, interval)?;
        debug!(points = result.series.len(), "fetched intraday series");
        Ok(result)
    }

    /// Get balance sheet reports for a symbol
    #[instrument(skip(self))]
    pub async fn balance_sheet(&self, symbol: &str) -> Result<BalanceSheetResponse> {
        let body = self
            .query(&[("function", "BALANCE_SHEET"), ("symbol", symbol)])
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Get cash flow reports for a symbol
    #[instrument(skip(self))]
    pub async fn cash_flow(&self, symbol: &str) -> Result<CashFlowResponse> {
        let body = self
            .query(&[("function", "CASH_FLOW"), ("symbol", symbol)])
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Get earnings history for a symbol
    #[instrument(skip(self))]
    pub async fn earnings(&self, symbol: &str) -> Result<EarningsResponse> {
        let body = self
            .query(&[("function", "EARNINGS"), ("symbol", symbol)])
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Get news and sentiment data
    #[instrument(skip(self, options))]
    pub async fn news_sentiment(
        &self,
        options: &NewsSentimentOptions,
    ) -> Result<NewsSentimentResponse> {
        let mut params: Vec<(&str, &str)> = vec![("function", "NEWS_SENTIMENT")];
        if let Some(tickers) = &options.tickers {
            params.push(("tickers", tickers));
        }
        if let Some(topics) = &options.topics {
            params.push(("topics", topics));
        }
        if let Some(time_from) = &options.time_from {
            params.push(("time_from", time_from));
        }
        if let Some(time_to) = &options.time_to {
            params.push(("time_to", time_to));
        }
        if let Some(sort) = &options.sort {
            params.push(("sort", sort));
        }
        let limit_str;
        if let Some(limit) = options.limit {
            limit_str = limit.to_string();
            params.push(("limit", &limit_str));
        }

        let body = self.query(&params).await?;
        Ok(serde_json::from_value(body)?)
    }
}

/// Screen a 200-status body for embedded provider errors
fn check_api_error(body: &Value) -> Result<()> {
    if let Some(message) = body.get("Error Message").and_then(Value::as_str) {
        return Err(DataError::Api(message.to_string()));
    }
    if let Some(note) = body.get("Note").and_then(Value::as_str) {
        return Err(DataError::RateLimited(note.to_string()));
    }
    if let Some(info) = body.get("Information").and_then(Value::as_str) {
        return Err(DataError::Api(info.to_string()));
    }
    Ok(())
}

/// Assemble an intraday response from a body whose series key depends on the
/// requested interval
fn parse_intraday_body(body: &Value, interval: Interval) -> Result<TimeSeriesIntradayResponse> {
    let mut result = TimeSeriesIntradayResponse::default();

    if let Some(meta) = body.get("Meta Data") {
        result.meta = serde_json::from_value(meta.clone())?;
    }

    let series_key = format!("Time Series ({})", interval.as_str());
    if let Some(series) = body.get(&series_key) {
        result.series = serde_json::from_value(series.clone())?;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_defaults() {
        let config = AlphaVantageConfig::new("test_key");
        assert_eq!(config.api_key, "test_key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_builder() {
        let config = AlphaVantageConfig::new("test_key")
            .with_base_url("http://localhost:9000/query")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:9000/query");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_client_creation() {
        let client = AlphaVantageClient::new("test_key").unwrap();
        assert_eq!(client.config().api_key, "test_key");
    }

    #[test]
    fn test_interval_and_output_size_strings() {
        assert_eq!(Interval::Min1.as_str(), "1min");
        assert_eq!(Interval::Min60.as_str(), "60min");
        assert_eq!(OutputSize::Compact.as_str(), "compact");
        assert_eq!(OutputSize::Full.as_str(), "full");
    }

    #[test]
    fn test_check_api_error_variants() {
        assert!(check_api_error(&json!({"foo": "bar"})).is_ok());

        let err = check_api_error(&json!({"Error Message": "Invalid API call"})).unwrap_err();
        assert!(matches!(err, DataError::Api(_)));

        let err = check_api_error(&json!({"Note": "5 calls per minute"})).unwrap_err();
        assert!(matches!(err, DataError::RateLimited(_)));

        let err = check_api_error(&json!({"Information": "premium endpoint"})).unwrap_err();
        assert!(matches!(err, DataError::Api(_)));
    }

    #[test]
    fn test_parse_intraday_body_dynamic_key() {
        let body = json!({
            "Meta Data": {
                "1. Information": "Intraday (5min)",
                "2. Symbol": "IBM",
                "3. Last Refreshed": "2024-06-10 16:00:00",
                "4. Interval": "5min",
                "5. Output Size": "Compact",
                "6. Time Zone": "US/Eastern"
            },
            "Time Series (5min)": {
                "2024-06-10 09:30:00": {
                    "1. open": "50.0",
                    "2. high": "51.0",
                    "3. low": "49.0",
                    "4. close": "50.5",
                    "5. volume": "100"
                }
            }
        });

        let result = parse_intraday_body(&body, Interval::Min5).unwrap();
        assert_eq!(result.meta.symbol, "IBM");
        assert_eq!(result.meta.interval, "5min");
        assert_eq!(result.series.len(), 1);
        assert_eq!(result.series["2024-06-10 09:30:00"].close, "50.5");
    }

    #[test]
    fn test_parse_intraday_body_wrong_interval_yields_empty_series() {
        let body = json!({
            "Meta Data": {"2. Symbol": "IBM"},
            "Time Series (5min)": {}
        });
        let result = parse_intraday_body(&body, Interval::Min15).unwrap();
        assert!(result.series.is_empty());
    }

    #[test]
    fn test_news_options_builder() {
        let options = NewsSentimentOptions::new()
            .with_tickers("AAPL,MSFT")
            .with_sort("LATEST")
            .with_limit(50);
        assert_eq!(options.tickers.as_deref(), Some("AAPL,MSFT"));
        assert_eq!(options.sort.as_deref(), Some("LATEST"));
        assert_eq!(options.limit, Some(50));
        assert!(options.topics.is_none());
    }

    #[tokio::test]
    #[ignore] // Requires API key and network access
    async fn test_daily_live() {
        let client = AlphaVantageClient::from_env().unwrap();
        let daily = client.daily("IBM", OutputSize::Compact).await.unwrap();
        assert!(!daily.series.is_empty());
        assert_eq!(daily.meta.symbol, "IBM");
    }
}
