//! Financial Datasets API client
//!
//! Path-based endpoints with a header-carried API key. Every response wraps
//! its payload in a named top-level object (`income_statements`,
//! `balance_sheets`, ...), which the per-endpoint wrapper structs unwrap.

use crate::error::{DataError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

const DEFAULT_BASE_URL: &str = "https://api.financialdatasets.ai";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const PROVIDER: &str = "Financial Datasets";

/// Configuration for the Financial Datasets client
#[derive(Debug, Clone)]
pub struct FinancialDatasetsConfig {
    /// API key sent in the `X-API-KEY` header
    pub api_key: String,

    /// Base URL (default: "https://api.financialdatasets.ai")
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl FinancialDatasetsConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from the `FINANCIAL_DATASETS_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("FINANCIAL_DATASETS_API_KEY").map_err(|_| {
            DataError::Config("FINANCIAL_DATASETS_API_KEY environment variable not set".to_string())
        })?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL
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

/// Reporting period for statement endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Annual,
    Quarterly,
    /// Trailing twelve months
    Ttm,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
            Self::Ttm => "ttm",
        }
    }
}

/// Interval granularity for the historical price endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceInterval {
    Second,
    Minute,
    Day,
    Week,
    Month,
    Year,
}

impl PriceInterval {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// Income statement record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeStatement {
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub report_period: String,
    #[serde(default)]
    pub fiscal_period: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub cost_of_revenue: f64,
    #[serde(default)]
    pub gross_profit: f64,
    #[serde(default)]
    pub operating_expense: f64,
    #[serde(default)]
    pub operating_income: f64,
    #[serde(default)]
    pub interest_expense: f64,
    #[serde(default)]
    pub ebit: f64,
    #[serde(default)]
    pub income_tax_expense: f64,
    #[serde(default)]
    pub net_income: f64,
    #[serde(default)]
    pub earnings_per_share: f64,
    #[serde(default)]
    pub earnings_per_share_diluted: f64,
    #[serde(default)]
    pub weighted_average_shares: f64,
}

/// Balance sheet record (typed floats, unlike the Alpha Vantage shape)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FdBalanceSheet {
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub report_period: String,
    #[serde(default)]
    pub fiscal_period: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub total_assets: f64,
    #[serde(default)]
    pub current_assets: f64,
    #[serde(default)]
    pub cash_and_equivalents: f64,
    #[serde(default)]
    pub inventory: f64,
    #[serde(default)]
    pub total_liabilities: f64,
    #[serde(default)]
    pub current_liabilities: f64,
    #[serde(default)]
    pub current_debt: f64,
    #[serde(default)]
    pub non_current_debt: f64,
    #[serde(default)]
    pub total_debt: f64,
    #[serde(default)]
    pub shareholders_equity: f64,
    #[serde(default)]
    pub retained_earnings: f64,
    #[serde(default)]
    pub outstanding_shares: f64,
}

/// Cash flow statement record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CashFlowStatement {
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub report_period: String,
    #[serde(default)]
    pub fiscal_period: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub net_income: f64,
    #[serde(rename = "depreciation_and_amortization", default)]
    pub depreciation_amortization: f64,
    #[serde(default)]
    pub net_cash_flow_from_operations: f64,
    #[serde(default)]
    pub capital_expenditure: f64,
    #[serde(default)]
    pub net_cash_flow_from_investing: f64,
    #[serde(default)]
    pub net_cash_flow_from_financing: f64,
    #[serde(default)]
    pub free_cash_flow: f64,
    #[serde(default)]
    pub ending_cash_balance: f64,
}

/// Company profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyFacts {
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cik: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub exchange: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub listing_date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub market_cap: f64,
    #[serde(default)]
    pub number_of_employees: f64,
    #[serde(default)]
    pub website_url: String,
}

/// Historical price record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Price {
    #[serde(default)]
    pub open: f64,
    #[serde(default)]
    pub close: f64,
    #[serde(default)]
    pub high: f64,
    #[serde(default)]
    pub low: f64,
    #[serde(default)]
    pub volume: i64,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub time_milliseconds: i64,
}

/// Real-time price snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSnapshot {
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub day_change: f64,
    #[serde(default)]
    pub day_change_percent: f64,
    #[serde(default)]
    pub market_cap: f64,
    #[serde(default)]
    pub time: String,
}

/// Insider transaction record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsiderTrade {
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub is_board_director: bool,
    #[serde(default)]
    pub transaction_date: String,
    #[serde(default)]
    pub transaction_shares: f64,
    #[serde(default)]
    pub transaction_price_per_share: f64,
    #[serde(default)]
    pub transaction_value: f64,
    #[serde(default)]
    pub shares_owned_before_transaction: f64,
    #[serde(default)]
    pub shares_owned_after_transaction: f64,
    #[serde(default)]
    pub filing_date: String,
}

/// Institutional holding record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstitutionalOwnership {
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub investor: String,
    #[serde(default)]
    pub report_period: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub shares: f64,
    #[serde(default)]
    pub market_value: f64,
}

/// News article record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub sentiment: String,
}

/// Financial ratios and derived metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialMetrics {
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub market_cap: f64,
    #[serde(default)]
    pub enterprise_value: f64,
    #[serde(default)]
    pub price_to_earnings_ratio: f64,
    #[serde(default)]
    pub price_to_book_ratio: f64,
    #[serde(default)]
    pub price_to_sales_ratio: f64,
    #[serde(rename = "enterprise_value_to_ebitda_ratio", default)]
    pub ev_to_ebitda: f64,
    #[serde(default)]
    pub gross_margin: f64,
    #[serde(default)]
    pub operating_margin: f64,
    #[serde(default)]
    pub net_margin: f64,
    #[serde(default)]
    pub return_on_equity: f64,
    #[serde(default)]
    pub return_on_assets: f64,
    #[serde(default)]
    pub current_ratio: f64,
    #[serde(default)]
    pub quick_ratio: f64,
    #[serde(default)]
    pub debt_to_equity: f64,
    #[serde(default)]
    pub debt_to_assets: f64,
    #[serde(default)]
    pub revenue_growth: f64,
    #[serde(default)]
    pub earnings_growth: f64,
    #[serde(default)]
    pub earnings_per_share: f64,
    #[serde(default)]
    pub book_value_per_share: f64,
    #[serde(default)]
    pub free_cash_flow_per_share: f64,
}

/// Error body shape returned on non-success statuses
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: String,
}

/// Financial Datasets API client
#[derive(Debug, Clone)]
pub struct FinancialDatasetsClient {
    client: Client,
    config: FinancialDatasetsConfig,
}

impl FinancialDatasetsClient {
    /// Create a new client with custom configuration
    pub fn with_config(config: FinancialDatasetsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Create a new client with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(FinancialDatasetsConfig::new(api_key))
    }

    /// Create a client from the `FINANCIAL_DATASETS_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        Self::with_config(FinancialDatasetsConfig::from_env()?)
    }

    /// Get the current configuration
    pub fn config(&self) -> &FinancialDatasetsConfig {
        &self.config
    }

    async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<serde_json::Value> {
        let url = format!("{}{endpoint}", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .header("X-API-KEY", &self.config.api_key)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            if !body.message.is_empty() {
                return Err(DataError::Api(body.message));
            }
            if !body.error.is_empty() {
                return Err(DataError::Api(body.error));
            }
            return Err(DataError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    fn statement_params(ticker: &str, period: Period, limit: Option<u32>) -> Vec<(&str, String)> {
        let mut params = vec![
            ("ticker", ticker.to_string()),
            ("period", period.as_str().to_string()),
        ];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }

    /// Get income statements for a ticker
    #[instrument(skip(self))]
    pub async fn income_statements(
        &self,
        ticker: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<IncomeStatement>> {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default)]
            income_statements: Vec<IncomeStatement>,
        }
        let params = Self::statement_params(ticker, period, limit);
        let body = self.get("/financials/income-statements", &params).await?;
        let wrapper: Wrapper = serde_json::from_value(body)?;
        Ok(wrapper.income_statements)
    }

    /// Get balance sheets for a ticker
    #[instrument(skip(self))]
    pub async fn balance_sheets(
        &self,
        ticker: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<FdBalanceSheet>> {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default)]
            balance_sheets: Vec<FdBalanceSheet>,
        }
        let params = Self::statement_params(ticker, period, limit);
        let body = self.get("/financials/balance-sheets", &params).await?;
        let wrapper: Wrapper = serde_json::from_value(body)?;
        Ok(wrapper.balance_sheets)
    }

    /// Get cash flow statements for a ticker
    #[instrument(skip(self))]
    pub async fn cash_flow_statements(
        &self,
        ticker: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<CashFlowStatement>> {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default)]
            cash_flow_statements: Vec<CashFlowStatement>,
        }
        let params = Self::statement_params(ticker, period, limit);
        let body = self.get("/financials/cash-flow-statements", &params).await?;
        let wrapper: Wrapper = serde_json::from_value(body)?;
        Ok(wrapper.cash_flow_statements)
    }

    /// Get company profile information
    #[instrument(skip(self))]
    pub async fn company_facts(&self, ticker: &str) -> Result<CompanyFacts> {
        #[derive(Deserialize)]
        struct Wrapper {
            company_facts: CompanyFacts,
        }
        let params = [("ticker", ticker.to_string())];
        let body = self.get("/company/facts", &params).await?;
        let wrapper: Wrapper = serde_json::from_value(body)?;
        Ok(wrapper.company_facts)
    }

    /// Get the real-time price snapshot for a ticker
    #[instrument(skip(self))]
    pub async fn price_snapshot(&self, ticker: &str) -> Result<PriceSnapshot> {
        #[derive(Deserialize)]
        struct Wrapper {
            snapshot: PriceSnapshot,
        }
        let params = [("ticker", ticker.to_string())];
        let body = self.get("/prices/snapshot", &params).await?;
        let wrapper: Wrapper = serde_json::from_value(body)?;
        Ok(wrapper.snapshot)
    }

    /// Get historical prices between two dates
    #[instrument(skip(self))]
    pub async fn prices(
        &self,
        ticker: &str,
        interval: PriceInterval,
        multiplier: u32,
        start_date: &str,
        end_date: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Price>> {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default)]
            prices: Vec<Price>,
        }
        let mut params = vec![
            ("ticker", ticker.to_string()),
            ("interval", interval.as_str().to_string()),
            ("interval_multiplier", multiplier.to_string()),
            ("start_date", start_date.to_string()),
            ("end_date", end_date.to_string()),
        ];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        let body = self.get("/prices", &params).await?;
        let wrapper: Wrapper = serde_json::from_value(body)?;
        Ok(wrapper.prices)
    }

    /// Get insider trading records
    #[instrument(skip(self))]
    pub async fn insider_trades(
        &self,
        ticker: &str,
        limit: Option<u32>,
    ) -> Result<Vec<InsiderTrade>> {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default)]
            insider_trades: Vec<InsiderTrade>,
        }
        let mut params = vec![("ticker", ticker.to_string())];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        let body = self.get("/insider-trades", &params).await?;
        let wrapper: Wrapper = serde_json::from_value(body)?;
        Ok(wrapper.insider_trades)
    }

    /// Get institutional holdings
    #[instrument(skip(self))]
    pub async fn institutional_ownership(
        &self,
        ticker: &str,
        limit: Option<u32>,
    ) -> Result<Vec<InstitutionalOwnership>> {
        #[derive(Deserialize)]
        struct Wrapper {
            // Upstream names this wrapper with a hyphen
            #[serde(rename = "institutional-ownership", default)]
            ownership: Vec<InstitutionalOwnership>,
        }
        let mut params = vec![("ticker", ticker.to_string())];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        let body = self.get("/institutional-ownership", &params).await?;
        let wrapper: Wrapper = serde_json::from_value(body)?;
        Ok(wrapper.ownership)
    }

    /// Get news articles, optionally bounded by dates
    #[instrument(skip(self))]
    pub async fn news(
        &self,
        ticker: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<NewsArticle>> {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default)]
            news: Vec<NewsArticle>,
        }
        let mut params = vec![("ticker", ticker.to_string())];
        if let Some(start) = start_date {
            params.push(("start_date", start.to_string()));
        }
        if let Some(end) = end_date {
            params.push(("end_date", end.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        let body = self.get("/news", &params).await?;
        let wrapper: Wrapper = serde_json::from_value(body)?;
        Ok(wrapper.news)
    }

    /// Get historical financial metrics
    #[instrument(skip(self))]
    pub async fn financial_metrics(
        &self,
        ticker: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<FinancialMetrics>> {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default)]
            financial_metrics: Vec<FinancialMetrics>,
        }
        let params = Self::statement_params(ticker, period, limit);
        let body = self.get("/financial-metrics", &params).await?;
        let wrapper: Wrapper = serde_json::from_value(body)?;
        Ok(wrapper.financial_metrics)
    }

    /// Get current financial metrics (unwrapped response)
    #[instrument(skip(self))]
    pub async fn financial_metrics_snapshot(&self, ticker: &str) -> Result<FinancialMetrics> {
        let params = [("ticker", ticker.to_string())];
        let body = self.get("/financial-metrics/snapshot", &params).await?;
        Ok(serde_json::from_value(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_defaults() {
        let config = FinancialDatasetsConfig::new("fd_key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_period_and_interval_strings() {
        assert_eq!(Period::Annual.as_str(), "annual");
        assert_eq!(Period::Ttm.as_str(), "ttm");
        assert_eq!(PriceInterval::Day.as_str(), "day");
        assert_eq!(PriceInterval::Year.as_str(), "year");
    }

    #[test]
    fn test_income_statement_wrapper_shape() {
        let body = json!({
            "income_statements": [{
                "ticker": "AAPL",
                "report_period": "2023-09-30",
                "fiscal_period": "FY",
                "period": "annual",
                "currency": "USD",
                "revenue": 383_285_000_000.0,
                "net_income": 96_995_000_000.0,
                "earnings_per_share": 6.16
            }]
        });
        #[derive(Deserialize)]
        struct Wrapper {
            income_statements: Vec<IncomeStatement>,
        }
        let wrapper: Wrapper = serde_json::from_value(body).unwrap();
        let statement = &wrapper.income_statements[0];
        assert_eq!(statement.ticker, "AAPL");
        assert_eq!(statement.earnings_per_share, 6.16);
        // Unset fields default to zero
        assert_eq!(statement.cost_of_revenue, 0.0);
    }

    #[test]
    fn test_statement_params_include_limit_when_set() {
        let params = FinancialDatasetsClient::statement_params("AAPL", Period::Quarterly, Some(4));
        assert!(params.contains(&("period", "quarterly".to_string())));
        assert!(params.contains(&("limit", "4".to_string())));

        let params = FinancialDatasetsClient::statement_params("AAPL", Period::Annual, None);
        assert_eq!(params.len(), 2);
    }

    #[tokio::test]
    #[ignore] // Requires API key and network access
    async fn test_company_facts_live() {
        let client = FinancialDatasetsClient::from_env().unwrap();
        let facts = client.company_facts("AAPL").await.unwrap();
        assert_eq!(facts.ticker, "AAPL");
    }
}
