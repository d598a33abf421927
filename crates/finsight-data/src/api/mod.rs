//! Transport clients for the upstream market data providers

pub mod alpha_vantage;
pub mod financial_datasets;

pub use alpha_vantage::{
    AlphaVantageClient, AlphaVantageConfig, Interval, NewsSentimentOptions, OutputSize,
};
pub use financial_datasets::{
    CashFlowStatement, CompanyFacts, FdBalanceSheet, FinancialDatasetsClient,
    FinancialDatasetsConfig, FinancialMetrics, IncomeStatement, InsiderTrade,
    InstitutionalOwnership, NewsArticle, Period, Price, PriceInterval, PriceSnapshot,
};
