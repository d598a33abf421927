//! Analysis sections generated from fetched market data
//!
//! Each section builds a plain-text prompt from the data it covers and asks
//! the model for a short narrative. [`OpenRouterClient::full_analysis`] runs
//! all sections and degrades a failed one to a placeholder line so a report
//! still assembles when a single call fails.

use crate::error::{LlmError, Result};
use crate::format;
use crate::openrouter::OpenRouterClient;
use finsight_data::types::{
    BalanceSheetResponse, CashFlowResponse, EarningsResponse, NewsSentimentResponse,
    TimeSeriesDailyResponse,
};
use tracing::warn;

/// Market data gathered for one symbol's analysis
///
/// Every section is optional; prompts skip blocks whose data is absent.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput {
    pub symbol: String,
    pub daily: Option<TimeSeriesDailyResponse>,
    pub earnings: Option<EarningsResponse>,
    pub cash_flow: Option<CashFlowResponse>,
    pub balance_sheet: Option<BalanceSheetResponse>,
    pub news: Option<NewsSentimentResponse>,
}

impl AnalysisInput {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn with_daily(mut self, daily: TimeSeriesDailyResponse) -> Self {
        self.daily = Some(daily);
        self
    }

    pub fn with_earnings(mut self, earnings: EarningsResponse) -> Self {
        self.earnings = Some(earnings);
        self
    }

    pub fn with_cash_flow(mut self, cash_flow: CashFlowResponse) -> Self {
        self.cash_flow = Some(cash_flow);
        self
    }

    pub fn with_balance_sheet(mut self, balance_sheet: BalanceSheetResponse) -> Self {
        self.balance_sheet = Some(balance_sheet);
        self
    }

    pub fn with_news(mut self, news: NewsSentimentResponse) -> Self {
        self.news = Some(news);
        self
    }
}

/// Generated narrative sections for one symbol
#[derive(Debug, Clone, Default)]
pub struct AnalysisSummary {
    pub executive: String,
    pub price_analysis: String,
    pub fundamentals: String,
    pub risks: String,
    pub outlook: String,
}

fn section_or_placeholder(
    result: Result<String>,
    symbol: &str,
    section: &'static str,
    placeholder: &str,
) -> String {
    match result {
        Ok(text) => text,
        Err(e) => {
            warn!(symbol, error = %e, "{section} failed");
            placeholder.to_string()
        }
    }
}

impl OpenRouterClient {
    /// Generate all analysis sections, substituting placeholders on failure
    pub async fn full_analysis(&self, input: &AnalysisInput) -> AnalysisSummary {
        let symbol = &input.symbol;
        AnalysisSummary {
            executive: section_or_placeholder(
                self.executive_summary(input).await,
                symbol,
                "executive summary",
                "Unable to generate executive summary.",
            ),
            price_analysis: section_or_placeholder(
                self.analyze_price_trend(input).await,
                symbol,
                "price analysis",
                "Unable to analyze price trends.",
            ),
            fundamentals: section_or_placeholder(
                self.analyze_fundamentals(input).await,
                symbol,
                "fundamentals analysis",
                "Unable to analyze fundamentals.",
            ),
            risks: section_or_placeholder(
                self.assess_risks(input).await,
                symbol,
                "risk assessment",
                "Unable to assess risks.",
            ),
            outlook: section_or_placeholder(
                self.outlook(input).await,
                symbol,
                "outlook",
                "Unable to generate outlook.",
            ),
        }
    }

    /// Brief executive summary over all available data
    pub async fn executive_summary(&self, input: &AnalysisInput) -> Result<String> {
        let prompt = format!(
            "Analyze this stock data for {} and provide a brief executive summary (3-4 sentences).\n\n\
             {}\n\n\
             Provide a concise, professional summary focusing on key metrics and overall health.",
            input.symbol,
            format::data_block(input)
        );
        self.chat(&prompt).await
    }

    /// Price trend narrative from the daily series
    pub async fn analyze_price_trend(&self, input: &AnalysisInput) -> Result<String> {
        let daily = input
            .daily
            .as_ref()
            .filter(|d| !d.series.is_empty())
            .ok_or_else(|| LlmError::NoData(format!("no price data for {}", input.symbol)))?;

        let prompt = format!(
            "Analyze this stock price data and provide insights (3-4 sentences):\n\n\
             {}\n\n\
             Focus on: trend direction, volatility, support/resistance levels, and notable patterns.",
            format::price_block(daily)
        );
        self.chat(&prompt).await
    }

    /// Fundamentals narrative from earnings, cash flow, and balance sheet
    pub async fn analyze_fundamentals(&self, input: &AnalysisInput) -> Result<String> {
        let prompt = format!(
            "Analyze these fundamentals for {} (3-4 sentences):\n\n\
             {}\n\n\
             Focus on: profitability trends, financial health, and key ratios.",
            input.symbol,
            format::fundamentals_block(input)
        );
        self.chat(&prompt).await
    }

    /// Key risks as short bullet points
    pub async fn assess_risks(&self, input: &AnalysisInput) -> Result<String> {
        let prompt = format!(
            "Identify key risks for {} based on this data (3-4 bullet points):\n\n\
             {}\n\n\
             Focus on: financial risks, market risks, and operational concerns.",
            input.symbol,
            format::risk_block(input)
        );
        self.chat(&prompt).await
    }

    /// Balanced forward-looking note
    pub async fn outlook(&self, input: &AnalysisInput) -> Result<String> {
        let prompt = format!(
            "Based on this data for {}, provide a brief outlook (2-3 sentences):\n\n\
             {}\n\n\
             Be balanced and note this is not financial advice.",
            input.symbol,
            format::data_block(input)
        );
        self.chat(&prompt).await
    }

    /// Summary of recent news sentiment
    pub async fn summarize_news(&self, news: &NewsSentimentResponse) -> Result<String> {
        if news.feed.is_empty() {
            return Err(LlmError::NoData("no news data".to_string()));
        }

        let prompt = format!(
            "Summarize the recent news sentiment (2-3 sentences):\n\n\
             {}\n\n\
             Focus on: overall sentiment, key themes, and potential market impact.",
            format::news_block(news)
        );
        self.chat(&prompt).await
    }

    /// Free-form analysis with the gathered data as context
    pub async fn custom_analysis(&self, input: &AnalysisInput, request: &str) -> Result<String> {
        let prompt = format!(
            "Stock: {}\n\nData:\n{}\n\nUser Request: {request}",
            input.symbol,
            format::data_block(input)
        );
        self.chat(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_builder() {
        let input = AnalysisInput::new("IBM")
            .with_daily(TimeSeriesDailyResponse::default())
            .with_earnings(EarningsResponse::default());
        assert_eq!(input.symbol, "IBM");
        assert!(input.daily.is_some());
        assert!(input.earnings.is_some());
        assert!(input.news.is_none());
    }

    #[tokio::test]
    async fn test_price_trend_requires_data() {
        let client = OpenRouterClient::new("or-key").unwrap();

        let input = AnalysisInput::new("IBM");
        let err = client.analyze_price_trend(&input).await.unwrap_err();
        assert!(matches!(err, LlmError::NoData(_)));

        // An empty series is treated the same as no series
        let input = AnalysisInput::new("IBM").with_daily(TimeSeriesDailyResponse::default());
        let err = client.analyze_price_trend(&input).await.unwrap_err();
        assert!(matches!(err, LlmError::NoData(_)));
    }

    #[tokio::test]
    async fn test_summarize_news_requires_data() {
        let client = OpenRouterClient::new("or-key").unwrap();
        let err = client
            .summarize_news(&NewsSentimentResponse::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::NoData(_)));
    }
}
